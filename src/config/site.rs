//! Site configuration (site.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A navigation or social link: a label and where it points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub email: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Listing
    pub num_posts_on_homepage: usize,
    pub posts_per_page: usize,

    // Navigation
    #[serde(default)]
    pub nav_links: Vec<Link>,
    #[serde(default)]
    pub social_links: Vec<Link>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "A Blog".to_string(),
            description: String::new(),
            author: String::new(),
            email: String::new(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),

            num_posts_on_homepage: 3,
            posts_per_page: 10,

            nav_links: vec![
                Link {
                    label: "blog".to_string(),
                    href: "/blog".to_string(),
                },
                Link {
                    label: "about".to_string(),
                    href: "/about".to_string(),
                },
            ],
            social_links: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "A Blog");
        assert_eq!(config.num_posts_on_homepage, 3);
        assert_eq!(config.posts_per_page, 10);
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.public_dir, "public");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Notes From The Attic
description: long-form posts about systems
author: Mel
url: https://attic.example.org
num_posts_on_homepage: 5
posts_per_page: 8
nav_links:
  - label: blog
    href: /blog
  - label: about
    href: /about
social_links:
  - label: github
    href: https://github.com/mel
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Notes From The Attic");
        assert_eq!(config.num_posts_on_homepage, 5);
        assert_eq!(config.posts_per_page, 8);
        assert_eq!(config.nav_links.len(), 2);
        assert_eq!(config.nav_links[0].label, "blog");
        assert_eq!(config.social_links[0].href, "https://github.com/mel");
        // Unset fields fall back to defaults
        assert_eq!(config.root, "/");
        assert_eq!(config.public_dir, "public");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(SiteConfig::load("/definitely/not/here/site.yml").is_err());
    }
}
