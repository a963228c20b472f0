//! Static site generation
//!
//! Renders the validated catalog into the public directory: homepage,
//! paginated archive, one page per post, tag listings, standalone pages,
//! the Atom feed and the search index. Only published posts reach any
//! output; drafts stay in the catalog for tooling but never on disk.

pub mod feed;

use anyhow::{bail, Context as _, Result};
use std::collections::BTreeMap;
use std::fs;
use tera::Context;
use walkdir::WalkDir;

use crate::content::{Catalog, MarkdownRenderer, PageRecord, PostRecord};
use crate::helpers::url::{archive_url, page_url, post_url, tag_url, url_for};
use crate::listing::Listing;
use crate::templates::{
    NeighborData, PageData, PaginationData, PostData, SiteData, TagData, TagLink,
    TemplateRenderer,
};
use crate::Quill;

/// Renders one site build.
pub struct Generator<'a> {
    quill: &'a Quill,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
    site: SiteData,
}

impl<'a> Generator<'a> {
    pub fn new(quill: &'a Quill) -> Result<Self> {
        Ok(Self {
            quill,
            renderer: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::new(),
            site: SiteData::from_config(&quill.config),
        })
    }

    /// Generate the entire site.
    pub fn generate(&self, catalog: &Catalog, pages: &[PageRecord]) -> Result<()> {
        fs::create_dir_all(&self.quill.public_dir)?;
        self.write_output("css/paper.css", TemplateRenderer::stylesheet())?;

        let copied = self.copy_assets()?;
        if copied > 0 {
            tracing::debug!("copied {} asset files", copied);
        }

        let listing = catalog.listing();
        let published = listing.published();

        // Bodies render once; post pages, the feed and the search index
        // all reuse the same HTML.
        let rendered: Vec<(&PostRecord, String)> = published
            .iter()
            .map(|p| (*p, self.markdown.render(&p.body)))
            .collect();

        self.generate_homepage(&listing)?;
        self.generate_archive(&listing)?;
        self.generate_posts(&rendered)?;
        self.generate_tags(&listing)?;
        self.generate_pages(pages)?;

        let entries: Vec<(&PostRecord, &str)> =
            rendered.iter().map(|(p, html)| (*p, html.as_str())).collect();
        feed::write_atom(&self.quill.config, &self.quill.public_dir, &entries)?;
        feed::write_search_index(&self.quill.config, &self.quill.public_dir, &entries)?;

        Ok(())
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context
    }

    fn generate_homepage(&self, listing: &Listing) -> Result<()> {
        let recent: Vec<PostData> = listing
            .recent(self.quill.config.num_posts_on_homepage)
            .iter()
            .map(|p| self.listing_data(p))
            .collect();

        let mut context = self.base_context();
        context.insert("posts", &recent);
        context.insert("archive_url", &archive_url(&self.quill.config, 1));

        let html = self.renderer.render("home.html", &context)?;
        self.write_output("index.html", &html)
    }

    fn generate_archive(&self, listing: &Listing) -> Result<()> {
        let config = &self.quill.config;
        let first = listing.page(1, config.posts_per_page)?;

        // An empty catalog still gets its archive root page
        let last = first.total_pages.max(1);
        for number in 1..=last {
            let page = listing.page(number, config.posts_per_page)?;
            let posts: Vec<PostData> = page.items.iter().map(|p| self.listing_data(p)).collect();
            let pagination = PaginationData {
                page_number: page.page_number,
                total_pages: page.total_pages,
                prev_url: page
                    .has_prev()
                    .then(|| archive_url(config, page.page_number - 1)),
                next_url: page
                    .has_next()
                    .then(|| archive_url(config, page.page_number + 1)),
            };

            let mut context = self.base_context();
            context.insert("posts", &posts);
            context.insert("pagination", &pagination);

            let html = self.renderer.render("archive.html", &context)?;
            let relative = if number == 1 {
                "blog/index.html".to_string()
            } else {
                format!("blog/page/{}/index.html", number)
            };
            self.write_output(&relative, &html)?;
        }

        tracing::info!("rendered {} archive pages", last);
        Ok(())
    }

    fn generate_posts(&self, rendered: &[(&PostRecord, String)]) -> Result<()> {
        let config = &self.quill.config;

        let neighbor = |index: usize| {
            let (post, _) = &rendered[index];
            NeighborData {
                title: post.title.clone(),
                url: post_url(config, &post.slug),
            }
        };

        for (i, (post, body)) in rendered.iter().enumerate() {
            // blog/page/ belongs to the paginated archive
            let top = post.slug.split('/').next().unwrap_or_default();
            if top == "page" {
                bail!(
                    "post `{}` collides with the `blog/page/` route",
                    post.source
                );
            }

            // rendered is newest first
            let newer = (i > 0).then(|| neighbor(i - 1));
            let older = (i + 1 < rendered.len()).then(|| neighbor(i + 1));

            let mut context = self.base_context();
            context.insert("post", &self.post_data(post, body.clone()));
            context.insert("newer", &newer);
            context.insert("older", &older);

            let html = self.renderer.render("post.html", &context)?;
            self.write_output(&format!("blog/{}/index.html", post.slug), &html)?;
        }

        tracing::info!("rendered {} posts", rendered.len());
        Ok(())
    }

    fn generate_tags(&self, listing: &Listing) -> Result<()> {
        let config = &self.quill.config;
        let counts = listing.all_tags();

        // Distinct tags may collapse to one slug ("Rust!" and "rust").
        // That would silently overwrite a listing, so refuse the build.
        let mut seen: BTreeMap<String, String> = BTreeMap::new();
        let mut tags: Vec<TagData> = Vec::with_capacity(counts.len());
        for tc in &counts {
            let tag_slug = slug::slugify(&tc.tag);
            if tag_slug.is_empty() {
                bail!("tag `{}` produces an empty slug", tc.tag);
            }
            if let Some(other) = seen.get(&tag_slug) {
                bail!(
                    "tags `{}` and `{}` both map to slug `{}`",
                    other,
                    tc.tag,
                    tag_slug
                );
            }
            seen.insert(tag_slug.clone(), tc.tag.clone());
            tags.push(TagData {
                name: tc.tag.clone(),
                url: tag_url(config, &tag_slug),
                count: tc.count,
            });
        }

        let mut context = self.base_context();
        context.insert("tags", &tags);
        let html = self.renderer.render("tags.html", &context)?;
        self.write_output("tags/index.html", &html)?;

        for tag in &tags {
            let posts: Vec<PostData> = listing
                .by_tag(&tag.name)
                .iter()
                .map(|p| self.listing_data(p))
                .collect();

            let mut context = self.base_context();
            context.insert("tag", tag);
            context.insert("posts", &posts);
            context.insert("tags_url", &url_for(config, "tags/"));

            let html = self.renderer.render("tag.html", &context)?;
            let tag_slug = slug::slugify(&tag.name);
            self.write_output(&format!("tags/{}/index.html", tag_slug), &html)?;
        }

        tracing::info!("rendered {} tag pages", tags.len());
        Ok(())
    }

    fn generate_pages(&self, pages: &[PageRecord]) -> Result<()> {
        let config = &self.quill.config;

        for page in pages {
            let top = page.slug.split('/').next().unwrap_or_default();
            if top == "blog" || top == "tags" {
                bail!("page `{}` collides with the `/{}/` route", page.source, top);
            }

            let data = PageData {
                title: page.title.clone(),
                description: page.description.clone(),
                url: page_url(config, &page.slug),
                content: self.markdown.render(&page.body),
            };

            let mut context = self.base_context();
            context.insert("page", &data);

            let html = self.renderer.render("page.html", &context)?;
            self.write_output(&format!("{}/index.html", page.slug), &html)?;
        }

        if !pages.is_empty() {
            tracing::info!("rendered {} pages", pages.len());
        }
        Ok(())
    }

    fn post_data(&self, post: &PostRecord, content: String) -> PostData {
        let config = &self.quill.config;
        PostData {
            title: post.title.clone(),
            description: post.description.clone(),
            date: post.date.format("%B %-d, %Y").to_string(),
            machine_date: post.date.format("%Y-%m-%d").to_string(),
            url: post_url(config, &post.slug),
            tags: post
                .tags
                .iter()
                .map(|t| TagLink {
                    name: t.clone(),
                    url: tag_url(config, &slug::slugify(t)),
                })
                .collect(),
            content,
            word_count: post.word_count,
            read_minutes: post.read_minutes(),
        }
    }

    /// Post data for list contexts, body omitted.
    fn listing_data(&self, post: &PostRecord) -> PostData {
        self.post_data(post, String::new())
    }

    fn write_output(&self, relative: &str, contents: &str) -> Result<()> {
        let path = self.quill.public_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!("generated {}", relative);
        Ok(())
    }

    /// Copy non-markdown files under the content directory into the output,
    /// keeping relative paths. The posts and pages trees are skipped; they
    /// are rendered, not copied.
    fn copy_assets(&self) -> Result<usize> {
        let content_dir = &self.quill.content_dir;
        if !content_dir.is_dir() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("md") | Some("markdown")
            ) {
                continue;
            }

            let relative = path.strip_prefix(content_dir)?;
            let top = relative.components().next();
            if matches!(top, Some(c) if c.as_os_str() == "posts" || c.as_os_str() == "pages") {
                continue;
            }

            let dest = self.quill.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            copied += 1;
        }

        Ok(copied)
    }
}
