//! Atom feed and search index output

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::content::PostRecord;
use crate::helpers::text::strip_html;
use crate::helpers::url::{full_url_for, post_url};

/// Feed entries are capped so the XML stays small on old blogs.
const FEED_LIMIT: usize = 20;

/// Feed timestamp when there are no posts yet.
const EPOCH: &str = "1970-01-01T00:00:00+00:00";

/// Write `atom.xml` for the newest published posts. The feed's `updated`
/// stamp is the newest post date, not the build clock, so rebuilding an
/// unchanged site produces identical bytes.
pub fn write_atom(
    config: &SiteConfig,
    public_dir: &Path,
    entries: &[(&PostRecord, &str)],
) -> Result<()> {
    let base_url = config.url.trim_end_matches('/');
    let site_url = full_url_for(config, "");

    let mut feed = String::new();
    feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
    feed.push('\n');
    feed.push_str(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
    feed.push('\n');
    feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
    feed.push_str(&format!(
        "  <link href=\"{}\" rel=\"self\"/>\n",
        full_url_for(config, "atom.xml")
    ));
    feed.push_str(&format!("  <link href=\"{}\"/>\n", site_url));
    let updated = entries
        .first()
        .map(|(post, _)| post.date.to_rfc3339())
        .unwrap_or_else(|| EPOCH.to_string());
    feed.push_str(&format!("  <updated>{}</updated>\n", updated));
    feed.push_str(&format!("  <id>{}</id>\n", site_url));
    feed.push_str(&format!(
        "  <author><name>{}</name></author>\n",
        escape_xml(&config.author)
    ));

    for (post, html) in entries.iter().take(FEED_LIMIT) {
        let permalink = full_url_for(config, &format!("blog/{}/", post.slug));

        feed.push_str("  <entry>\n");
        feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
        feed.push_str(&format!("    <link href=\"{}\"/>\n", permalink));
        feed.push_str(&format!("    <id>{}</id>\n", permalink));
        feed.push_str(&format!(
            "    <published>{}</published>\n",
            post.date.to_rfc3339()
        ));
        feed.push_str(&format!(
            "    <updated>{}</updated>\n",
            post.date.to_rfc3339()
        ));
        for tag in &post.tags {
            feed.push_str(&format!(
                "    <category term=\"{}\"/>\n",
                escape_xml(tag)
            ));
        }
        // Readers resolve nothing themselves, so inline every URL
        let absolute = absolutize_urls(html, base_url);
        let clean = escape_cdata(&strip_invalid_xml_chars(&absolute));
        feed.push_str(&format!(
            "    <content type=\"html\"><![CDATA[{}]]></content>\n",
            clean
        ));
        feed.push_str("  </entry>\n");
    }

    feed.push_str("</feed>\n");

    fs::write(public_dir.join("atom.xml"), feed)?;
    tracing::info!("generated atom.xml");

    Ok(())
}

/// Write `search.json`: one record per published post with its tag names
/// and tag-stripped text, ready for a client-side search widget.
pub fn write_search_index(
    config: &SiteConfig,
    public_dir: &Path,
    entries: &[(&PostRecord, &str)],
) -> Result<()> {
    let records: Vec<serde_json::Value> = entries
        .iter()
        .map(|(post, html)| {
            serde_json::json!({
                "title": post.title,
                "url": post_url(config, &post.slug),
                "date": post.date.format("%Y-%m-%d").to_string(),
                "tags": post.tags,
                "content": strip_html(html),
            })
        })
        .collect();

    let json = serde_json::to_string_pretty(&records)?;
    fs::write(public_dir.join("search.json"), json)?;
    tracing::info!("generated search.json");

    Ok(())
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Rewrite root-relative `href`/`src` attributes to absolute URLs.
fn absolutize_urls(content: &str, base_url: &str) -> String {
    content
        .replace("href=\"/", &format!("href=\"{}/", base_url))
        .replace("src=\"/", &format!("src=\"{}/", base_url))
        .replace("href='/", &format!("href='{}/", base_url))
        .replace("src='/", &format!("src='{}/", base_url))
}

/// Split a literal `]]>` across two CDATA sections; left alone it would
/// terminate the enclosing section early.
fn escape_cdata(s: &str) -> String {
    s.replace("]]>", "]]]]><![CDATA[>")
}

/// Drop control characters XML 1.0 refuses to carry, keeping tab, newline
/// and carriage return.
fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}
