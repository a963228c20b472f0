//! quill: a small static site generator for a personal blog
//!
//! Markdown posts and pages go in, a fully static site comes out: homepage,
//! paginated archive, per-post pages, tag listings, an Atom feed and a
//! search index, rendered through the embedded paper theme.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod listing;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{Catalog, ContentSource, PageRecord};

/// Name of the site configuration file at the site root.
pub const CONFIG_FILE: &str = "site.yml";

/// One site rooted at a directory: its configuration and content layout.
pub struct Quill {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Site root
    pub base_dir: PathBuf,
    /// Where markdown content lives
    pub content_dir: PathBuf,
    /// Where the rendered site is written
    pub public_dir: PathBuf,
}

impl Quill {
    /// Open a site rooted at `base_dir`. A missing `site.yml` falls back to
    /// defaults so commands work in a bare directory; a malformed one is an
    /// error.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        })
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.content_dir.join("posts")
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.content_dir.join("pages")
    }

    /// Read and validate every post under `content/posts`.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let entries = ContentSource::new(self).posts()?;
        Ok(Catalog::load(entries)?)
    }

    /// Read and validate every standalone page under `content/pages`.
    pub fn load_pages(&self) -> Result<Vec<PageRecord>> {
        let entries = ContentSource::new(self).pages()?;
        Ok(content::load_pages(entries)?)
    }

    /// Scaffold a fresh site in the base directory.
    pub fn init(&self) -> Result<()> {
        commands::init::run(self)
    }

    /// Build the whole site into the public directory.
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Remove the public directory.
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post skeleton.
    pub fn new_post(&self, title: &str, draft: bool) -> Result<()> {
        commands::new::run(self, title, draft)
    }
}
