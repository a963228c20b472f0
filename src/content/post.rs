//! Post and page models

use chrono::{DateTime, FixedOffset};
use std::collections::BTreeSet;

/// Words per minute assumed when estimating reading time.
const WORDS_PER_MINUTE: usize = 200;

/// A blog post, validated and immutable once the catalog is loaded.
#[derive(Debug, Clone)]
pub struct PostRecord {
    /// Stable identifier derived from the source path; unique per catalog
    pub slug: String,

    /// Post title (never empty)
    pub title: String,

    /// Optional one-line summary shown on listings and in the feed
    pub description: Option<String>,

    /// Publication date; the sole ordering key for every listing view
    pub date: DateTime<FixedOffset>,

    /// Tag set; duplicates collapsed, may be empty
    pub tags: BTreeSet<String>,

    /// Drafts are excluded from every published-facing view
    pub draft: bool,

    /// Source file path, kept for error messages and tooling output
    pub source: String,

    /// Raw markdown body; never interpreted by the listing engine
    pub body: String,

    /// Derived word count (ASCII word runs plus CJK characters)
    pub word_count: usize,
}

impl PostRecord {
    /// Estimated reading time in whole minutes, never zero.
    pub fn read_minutes(&self) -> usize {
        self.word_count.div_ceil(WORDS_PER_MINUTE).max(1)
    }
}

/// A standalone page (about, contact, ...): no date, no draft flag, and no
/// part in the post listing.
#[derive(Debug, Clone)]
pub struct PageRecord {
    /// Identifier derived from the source path; doubles as the URL segment
    pub slug: String,

    /// Page title (never empty)
    pub title: String,

    /// Optional one-line summary for the page head
    pub description: Option<String>,

    /// Source file path
    pub source: String,

    /// Raw markdown body
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(word_count: usize) -> PostRecord {
        PostRecord {
            slug: "p".to_string(),
            title: "P".to_string(),
            description: None,
            date: DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap(),
            tags: BTreeSet::new(),
            draft: false,
            source: "p.md".to_string(),
            body: String::new(),
            word_count,
        }
    }

    #[test]
    fn test_read_minutes_rounds_up() {
        assert_eq!(post(1).read_minutes(), 1);
        assert_eq!(post(200).read_minutes(), 1);
        assert_eq!(post(201).read_minutes(), 2);
        assert_eq!(post(1999).read_minutes(), 10);
    }

    #[test]
    fn test_read_minutes_never_zero() {
        assert_eq!(post(0).read_minutes(), 1);
    }
}
