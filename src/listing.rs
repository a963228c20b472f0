//! Listing views over the catalog
//!
//! Every view starts from the published set: drafts filtered out, then
//! newest first with ties broken by slug so the order is total and stable
//! across builds. Views borrow from the catalog and never mutate it.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::content::{Catalog, PostRecord};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListingError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// One page of the published timeline.
#[derive(Debug)]
pub struct ListingPage<'a> {
    pub items: Vec<&'a PostRecord>,
    pub page_number: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl ListingPage<'_> {
    pub fn has_prev(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }
}

/// A tag with its published-post count.
#[derive(Debug, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Read-only query interface over one catalog.
pub struct Listing<'a> {
    catalog: &'a Catalog,
}

impl<'a> Listing<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// All published posts, newest first. Posts sharing an instant are
    /// ordered by slug so equal-date runs never reshuffle between builds.
    pub fn published(&self) -> Vec<&'a PostRecord> {
        let mut posts: Vec<&PostRecord> = self.catalog.posts().filter(|p| !p.draft).collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
        posts
    }

    /// The `count` newest published posts. Asking for more than exist
    /// returns everything; zero returns nothing.
    pub fn recent(&self, count: usize) -> Vec<&'a PostRecord> {
        let mut posts = self.published();
        posts.truncate(count);
        posts
    }

    /// One page of the published timeline. Pages are 1-based; a page past
    /// the end comes back empty but still carries the real totals, so a
    /// caller can render "page 9 of 3" honestly instead of erroring.
    pub fn page(&self, page_number: usize, page_size: usize) -> Result<ListingPage<'a>, ListingError> {
        if page_number == 0 {
            return Err(ListingError::InvalidArgument("page_number must be at least 1"));
        }
        if page_size == 0 {
            return Err(ListingError::InvalidArgument("page_size must be at least 1"));
        }

        let posts = self.published();
        let total_items = posts.len();
        let total_pages = total_items.div_ceil(page_size);

        let start = (page_number - 1).saturating_mul(page_size);
        let items = if start < total_items {
            let end = start.saturating_add(page_size).min(total_items);
            posts[start..end].to_vec()
        } else {
            Vec::new()
        };

        Ok(ListingPage {
            items,
            page_number,
            page_size,
            total_items,
            total_pages,
        })
    }

    /// Published posts carrying `tag`, newest first. Matching is exact and
    /// case sensitive; an unknown tag is an empty list, not an error.
    pub fn by_tag(&self, tag: &str) -> Vec<&'a PostRecord> {
        self.published()
            .into_iter()
            .filter(|p| p.tags.contains(tag))
            .collect()
    }

    /// Every tag on at least one published post, most-used first, ties in
    /// tag order. Tags that only appear on drafts are absent here even
    /// though the catalog itself knows them.
    pub fn all_tags(&self) -> Vec<TagCount> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for post in self.published() {
            for tag in &post.tags {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }

        let mut tags: Vec<TagCount> = counts
            .into_iter()
            .map(|(tag, count)| TagCount {
                tag: tag.to_string(),
                count,
            })
            .collect();
        tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RawEntry;

    fn entry(slug: &str, date: &str, draft: bool, tags: &[&str]) -> RawEntry {
        let mut yaml = format!("title: {}\ndate: {}\n", slug.to_uppercase(), date);
        if draft {
            yaml.push_str("draft: true\n");
        }
        if !tags.is_empty() {
            yaml.push_str(&format!("tags: [{}]\n", tags.join(", ")));
        }
        RawEntry {
            slug: slug.to_string(),
            source: format!("content/posts/{}.md", slug),
            matter: serde_yaml::from_str(&yaml).unwrap(),
            body: String::new(),
        }
    }

    /// Five published posts dated Jan 1 through Jan 5 plus one draft on
    /// Jan 6, fed to the catalog in shuffled order.
    fn sample() -> Catalog {
        Catalog::load([
            entry("jan-3", "2024-01-03", false, &["rust"]),
            entry("jan-1", "2024-01-01", false, &["rust", "notes"]),
            entry("jan-5", "2024-01-05", false, &[]),
            entry("jan-2", "2024-01-02", false, &["notes"]),
            entry("jan-4", "2024-01-04", false, &["rust"]),
            entry("jan-6-draft", "2024-01-06", true, &["secret", "rust"]),
        ])
        .unwrap()
    }

    fn slugs<'a>(posts: &[&'a PostRecord]) -> Vec<&'a str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_published_is_newest_first_without_drafts() {
        let catalog = sample();
        let posts = catalog.listing().published();
        assert_eq!(slugs(&posts), vec!["jan-5", "jan-4", "jan-3", "jan-2", "jan-1"]);
    }

    #[test]
    fn test_published_ties_break_by_slug() {
        let catalog = Catalog::load([
            entry("zebra", "2024-03-01 10:00", false, &[]),
            entry("apple", "2024-03-01 10:00", false, &[]),
            entry("mango", "2024-03-01 10:00", false, &[]),
        ])
        .unwrap();

        let posts = catalog.listing().published();
        assert_eq!(slugs(&posts), vec!["apple", "mango", "zebra"]);
    }

    #[test]
    fn test_recent_takes_the_newest() {
        let catalog = sample();
        let listing = catalog.listing();

        assert_eq!(slugs(&listing.recent(2)), vec!["jan-5", "jan-4"]);
        assert!(listing.recent(0).is_empty());
        assert_eq!(listing.recent(50).len(), 5);
    }

    #[test]
    fn test_page_slices_the_timeline() {
        let catalog = sample();
        let page = catalog.listing().page(2, 2).unwrap();

        assert_eq!(slugs(&page.items), vec!["jan-3", "jan-2"]);
        assert_eq!(page.page_number, 2);
        assert_eq!(page.page_size, 2);
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_prev());
        assert!(page.has_next());
    }

    #[test]
    fn test_pages_partition_the_published_set() {
        let catalog = sample();
        let listing = catalog.listing();
        let all = slugs(&listing.published());

        let mut collected = Vec::new();
        let first = listing.page(1, 2).unwrap();
        for number in 1..=first.total_pages {
            let page = listing.page(number, 2).unwrap();
            collected.extend(slugs(&page.items));
        }

        assert_eq!(collected, all);
    }

    #[test]
    fn test_page_past_the_end_is_empty_with_real_totals() {
        let catalog = sample();
        let page = catalog.listing().page(9, 2).unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.page_number, 9);
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_rejects_zero_arguments() {
        let catalog = sample();
        let listing = catalog.listing();

        assert!(matches!(
            listing.page(0, 10),
            Err(ListingError::InvalidArgument(_))
        ));
        assert!(matches!(
            listing.page(1, 0),
            Err(ListingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_last_page_holds_the_remainder() {
        let catalog = sample();
        let page = catalog.listing().page(3, 2).unwrap();

        assert_eq!(slugs(&page.items), vec!["jan-1"]);
        assert!(page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn test_by_tag_is_exact_and_ordered() {
        let catalog = sample();
        let listing = catalog.listing();

        assert_eq!(slugs(&listing.by_tag("rust")), vec!["jan-4", "jan-3", "jan-1"]);
        assert_eq!(slugs(&listing.by_tag("notes")), vec!["jan-2", "jan-1"]);
        // Case sensitive, no fuzzy matching
        assert!(listing.by_tag("Rust").is_empty());
        assert!(listing.by_tag("unknown").is_empty());
        // The draft carries this tag but drafts never list
        assert!(listing.by_tag("secret").is_empty());
    }

    #[test]
    fn test_all_tags_counts_published_only() {
        let catalog = sample();
        let tags = catalog.listing().all_tags();

        assert_eq!(
            tags,
            vec![
                TagCount { tag: "rust".to_string(), count: 3 },
                TagCount { tag: "notes".to_string(), count: 2 },
            ]
        );
    }

    #[test]
    fn test_all_tags_ties_break_alphabetically() {
        let catalog = Catalog::load([
            entry("a", "2024-01-01", false, &["zig", "ada"]),
            entry("b", "2024-01-02", false, &["zig", "ada"]),
        ])
        .unwrap();

        let tags = catalog.listing().all_tags();
        assert_eq!(
            tags,
            vec![
                TagCount { tag: "ada".to_string(), count: 2 },
                TagCount { tag: "zig".to_string(), count: 2 },
            ]
        );
    }

    #[test]
    fn test_empty_catalog_yields_empty_views() {
        let catalog = Catalog::load([]).unwrap();
        let listing = catalog.listing();

        assert!(listing.published().is_empty());
        assert!(listing.all_tags().is_empty());

        let page = listing.page(1, 10).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_prev());
        assert!(!page.has_next());
    }
}
