//! List site content

use anyhow::{bail, Result};

use crate::Quill;

/// List site content by type.
pub fn run(quill: &Quill, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let catalog = quill.load_catalog()?;
            let listing = catalog.listing();
            let posts = listing.published();
            println!("Published posts ({}):", posts.len());
            for post in posts {
                let tags: Vec<&str> = post.tags.iter().map(String::as_str).collect();
                if tags.is_empty() {
                    println!("  {}  {}", post.date.format("%Y-%m-%d"), post.title);
                } else {
                    println!(
                        "  {}  {}  [{}]",
                        post.date.format("%Y-%m-%d"),
                        post.title,
                        tags.join(", ")
                    );
                }
            }
        }
        "draft" | "drafts" => {
            let catalog = quill.load_catalog()?;
            let mut drafts: Vec<_> = catalog.posts().filter(|p| p.draft).collect();
            drafts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
            println!("Drafts ({}):", drafts.len());
            for post in drafts {
                println!(
                    "  {}  {}  ({})",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.source
                );
            }
        }
        "tag" | "tags" => {
            let catalog = quill.load_catalog()?;
            let listing = catalog.listing();
            let tags = listing.all_tags();
            println!("Tags ({}):", tags.len());
            for tc in tags {
                println!("  {} ({})", tc.tag, tc.count);
            }
        }
        "page" | "pages" => {
            let pages = quill.load_pages()?;
            println!("Pages ({}):", pages.len());
            for page in pages {
                println!("  {}  ({})", page.title, page.source);
            }
        }
        _ => {
            bail!(
                "unknown type: {}. Available: posts, drafts, tags, pages",
                content_type
            );
        }
    }

    Ok(())
}
