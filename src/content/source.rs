//! Content source - walks the content tree and reads raw entries
//!
//! All filesystem work for content lives here. The catalog loader never
//! touches disk: it consumes the [`RawEntry`] values this module produces.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path};
use walkdir::WalkDir;

use super::frontmatter;
use crate::Quill;

/// One content item as read from disk, not yet validated: a path-derived
/// slug, the source path (for error messages), the untyped front-matter
/// mapping, and the body.
#[derive(Debug, Clone)]
pub struct RawEntry {
    pub slug: String,
    pub source: String,
    pub matter: serde_yaml::Mapping,
    pub body: String,
}

/// Reads raw content entries from the site's content directory.
pub struct ContentSource<'a> {
    quill: &'a Quill,
}

impl<'a> ContentSource<'a> {
    pub fn new(quill: &'a Quill) -> Self {
        Self { quill }
    }

    /// Read all post entries from `content/posts`.
    pub fn posts(&self) -> Result<Vec<RawEntry>> {
        scan(&self.quill.content_dir.join("posts"))
    }

    /// Read all standalone page entries from `content/pages`.
    pub fn pages(&self) -> Result<Vec<RawEntry>> {
        scan(&self.quill.content_dir.join("pages"))
    }
}

/// Walk `dir` and read every markdown file into a [`RawEntry`].
///
/// The walk is sorted so the same tree always yields entries in the same
/// order. A missing directory is an empty source, not an error; an
/// unreadable file or an unparseable front-matter block fails the scan.
fn scan(dir: &Path) -> Result<Vec<RawEntry>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !is_markdown_file(path) {
            continue;
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let (matter, body) = frontmatter::split(&text)
            .with_context(|| format!("in {}", path.display()))?;

        let relative = path.strip_prefix(dir).unwrap_or(path);
        entries.push(RawEntry {
            slug: derive_slug(relative),
            source: path.display().to_string(),
            matter,
            body: body.to_string(),
        });
    }

    Ok(entries)
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// Derive a slug from a path relative to the scanned directory: strip the
/// extension, slugify each component, keep `/` separators so nested posts
/// stay distinguishable (`2024/intro` vs `2025/intro`).
fn derive_slug(relative: &Path) -> String {
    let mut parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(os) => Some(os.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if let Some(last) = parts.last_mut() {
        if let Some(stem) = Path::new(last.as_str())
            .file_stem()
            .and_then(|s| s.to_str())
        {
            *last = stem.to_string();
        }
    }

    parts
        .iter()
        .map(|p| slug::slugify(p))
        .collect::<Vec<_>>()
        .join("/")
}
