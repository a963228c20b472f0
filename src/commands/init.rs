//! Initialize a new site

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

use crate::Quill;

/// Scaffold a fresh site: configuration, content directories, a welcome
/// post and an about page.
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(crate::CONFIG_FILE);
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }

    fs::create_dir_all(target_dir.join("content/posts"))?;
    fs::create_dir_all(target_dir.join("content/pages"))?;
    fs::create_dir_all(target_dir.join("content/static"))?;

    let config_content = r#"# Site
title: A Blog
description: ""
author: ""
email: ""

# URL
url: http://example.com
root: /

# Directory
content_dir: content
public_dir: public

# Listing
num_posts_on_homepage: 3
posts_per_page: 10

# Navigation
nav_links:
  - label: blog
    href: /blog
  - label: about
    href: /about
social_links: []
"#;
    fs::write(&config_path, config_content)?;

    let now = chrono::Utc::now();
    let welcome = format!(
        r#"---
title: Hello World
date: {}
tags:
  - meta
---

Welcome to your new blog. This post lives in `content/posts/`; edit it or
delete it and write your own.

Some commands to get going:

```bash
# create a post
quill new "My First Post"

# build the site into public/
quill build

# see what you have
quill list posts
```
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );
    fs::write(target_dir.join("content/posts/hello-world.md"), welcome)?;

    let about = r#"---
title: About
---

Say something about yourself here.
"#;
    fs::write(target_dir.join("content/pages/about.md"), about)?;

    tracing::info!("initialized site at {}", target_dir.display());
    Ok(())
}

/// Run the init command for an opened site.
pub fn run(quill: &Quill) -> Result<()> {
    init_site(&quill.base_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_scaffolds_a_buildable_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        assert!(dir.path().join("site.yml").is_file());
        assert!(dir.path().join("content/posts/hello-world.md").is_file());
        assert!(dir.path().join("content/pages/about.md").is_file());

        // The scaffold must load cleanly
        let quill = Quill::new(dir.path()).unwrap();
        let catalog = quill.load_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        let listing = catalog.listing();
        assert_eq!(listing.published()[0].title, "Hello World");
        let pages = quill.load_pages().unwrap();
        assert_eq!(pages[0].title, "About");
    }

    #[test]
    fn test_init_refuses_an_initialized_directory() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        let err = init_site(dir.path()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
