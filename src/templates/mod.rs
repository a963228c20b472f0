//! Built-in "paper" theme rendered with Tera
//!
//! The whole theme is embedded in the binary so a generated site needs no
//! theme checkout next to it.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::{Link, SiteConfig};

/// Template renderer with the embedded paper theme.
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Post bodies arrive as rendered HTML; autoescaping would mangle them
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("paper/layout.html")),
            ("home.html", include_str!("paper/home.html")),
            ("archive.html", include_str!("paper/archive.html")),
            ("post.html", include_str!("paper/post.html")),
            ("page.html", include_str!("paper/page.html")),
            ("tags.html", include_str!("paper/tags.html")),
            ("tag.html", include_str!("paper/tag.html")),
            (
                "partials/post_list.html",
                include_str!("paper/partials/post_list.html"),
            ),
            (
                "partials/pagination.html",
                include_str!("paper/partials/pagination.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// The theme stylesheet, written next to the rendered pages.
    pub fn stylesheet() -> &'static str {
        include_str!("paper/paper.css")
    }

    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: strip HTML tags.
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(crate::helpers::text::strip_html(&s)))
}

/// Tera filter: truncate to a character count, appending an ellipsis.
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 160,
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!("{}…", truncated.trim_end())))
    }
}

// Context structures handed to the templates

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub url: String,
    pub root: String,
    pub nav_links: Vec<Link>,
    pub social_links: Vec<Link>,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        // Templates join asset paths directly onto the root
        let mut root = config.root.clone();
        if !root.ends_with('/') {
            root.push('/');
        }

        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            url: config.url.trim_end_matches('/').to_string(),
            root,
            nav_links: config.nav_links.clone(),
            social_links: config.social_links.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub title: String,
    pub description: Option<String>,
    /// Display form, like "January 5, 2024"
    pub date: String,
    /// `<time datetime=...>` form, like "2024-01-05"
    pub machine_date: String,
    pub url: String,
    pub tags: Vec<TagLink>,
    pub content: String,
    pub word_count: usize,
    pub read_minutes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagData {
    pub name: String,
    pub url: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaginationData {
    pub page_number: usize,
    pub total_pages: usize,
    /// Toward newer posts
    pub prev_url: Option<String>,
    /// Toward older posts
    pub next_url: Option<String>,
}

/// Adjacent post link on a post page.
#[derive(Debug, Clone, Serialize)]
pub struct NeighborData {
    pub title: String,
    pub url: String,
}
