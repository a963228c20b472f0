//! Create a new post skeleton

use anyhow::{bail, Result};
use std::fs;

use crate::Quill;

/// Create `content/posts/<slug>.md` with front matter filled in. Refuses to
/// overwrite an existing file.
pub fn run(quill: &Quill, title: &str, draft: bool) -> Result<()> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        bail!("title `{}` produces an empty slug", title);
    }

    let posts_dir = quill.posts_dir();
    fs::create_dir_all(&posts_dir)?;

    let file_path = posts_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        bail!("{} already exists", file_path.display());
    }

    // Dates are written in UTC, matching how the loader reads them back
    let now = chrono::Utc::now();
    // The title sits in a double-quoted YAML scalar; backslashes must be
    // escaped before quotes or they read back as YAML escape sequences
    let mut content = format!(
        "---\ntitle: \"{}\"\ndate: {}\n",
        title.replace('\\', "\\\\").replace('"', "\\\""),
        now.format("%Y-%m-%d %H:%M:%S")
    );
    if draft {
        content.push_str("draft: true\n");
    }
    content.push_str("tags:\n---\n\n");

    fs::write(&file_path, content)?;
    println!("Created: {}", file_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn test_quill(dir: &std::path::Path) -> Quill {
        Quill {
            config: SiteConfig::default(),
            base_dir: dir.to_path_buf(),
            content_dir: dir.join("content"),
            public_dir: dir.join("public"),
        }
    }

    #[test]
    fn test_new_post_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let quill = test_quill(dir.path());

        run(&quill, "My First \"Real\" Post", false).unwrap();

        let catalog = quill.load_catalog().unwrap();
        let post = catalog.get("my-first-real-post").unwrap();
        assert_eq!(post.title, "My First \"Real\" Post");
        assert!(!post.draft);
    }

    #[test]
    fn test_new_title_with_backslashes_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let quill = test_quill(dir.path());

        run(&quill, r"Paths like C:\new\tmp", false).unwrap();
        run(&quill, r"Ends with \", false).unwrap();

        let catalog = quill.load_catalog().unwrap();
        assert_eq!(
            catalog.get("paths-like-c-new-tmp").unwrap().title,
            r"Paths like C:\new\tmp"
        );
        assert_eq!(catalog.get("ends-with").unwrap().title, r"Ends with \");
    }

    #[test]
    fn test_new_draft_sets_the_flag() {
        let dir = tempfile::tempdir().unwrap();
        let quill = test_quill(dir.path());

        run(&quill, "Work In Progress", true).unwrap();

        let catalog = quill.load_catalog().unwrap();
        assert!(catalog.get("work-in-progress").unwrap().draft);
    }

    #[test]
    fn test_new_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let quill = test_quill(dir.path());

        run(&quill, "Same Title", false).unwrap();
        let err = run(&quill, "Same Title", false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_new_rejects_unsluggable_title() {
        let dir = tempfile::tempdir().unwrap();
        let quill = test_quill(dir.path());
        assert!(run(&quill, "!!!", false).is_err());
    }
}
