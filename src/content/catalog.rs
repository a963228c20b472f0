//! The content catalog
//!
//! `Catalog::load` turns raw content entries into validated, immutable
//! [`PostRecord`]s. Validation is fail-fast: one malformed required field
//! aborts the whole load, because a static build must not quietly publish a
//! partial or malformed catalog. Optional fields coerce to their documented
//! defaults instead.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde_yaml::Value;
use std::collections::BTreeSet;
use thiserror::Error;

use super::post::{PageRecord, PostRecord};
use super::source::RawEntry;
use crate::helpers::text::count_words;
use crate::listing::Listing;

/// Load-time errors. All of them abort the build.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required field is missing or malformed on one entry.
    #[error("post `{slug}`: field `{field}` {reason}")]
    Validation {
        slug: String,
        field: &'static str,
        reason: String,
    },

    /// Two content files resolve to the same slug.
    #[error("duplicate slug `{slug}`: {first} and {second} collide")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },
}

/// The full mapping from slug to post record for one build, plus the set of
/// every tag discovered at load (drafts included, for tooling). Immutable
/// once constructed; every listing view is computed from it on demand.
#[derive(Debug)]
pub struct Catalog {
    posts: IndexMap<String, PostRecord>,
    tags: BTreeSet<String>,
}

impl Catalog {
    /// Validate raw entries into a catalog.
    ///
    /// Pure transformation: no I/O, no clock, deterministic for a given
    /// input sequence. Entries keep their scan order; ordering for display
    /// is the listing engine's job.
    pub fn load(entries: impl IntoIterator<Item = RawEntry>) -> Result<Self, CatalogError> {
        let mut posts: IndexMap<String, PostRecord> = IndexMap::new();
        let mut tags = BTreeSet::new();

        for entry in entries {
            let record = validate_post(entry)?;
            if let Some(existing) = posts.get(&record.slug) {
                return Err(CatalogError::DuplicateSlug {
                    slug: record.slug,
                    first: existing.source.clone(),
                    second: record.source,
                });
            }
            tags.extend(record.tags.iter().cloned());
            posts.insert(record.slug.clone(), record);
        }

        Ok(Self { posts, tags })
    }

    /// Look up one record by slug.
    pub fn get(&self, slug: &str) -> Option<&PostRecord> {
        self.posts.get(slug)
    }

    /// All records in scan order, drafts included.
    pub fn posts(&self) -> impl Iterator<Item = &PostRecord> {
        self.posts.values()
    }

    /// Every distinct tag seen at load, including tags only on drafts.
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Listing views over this catalog.
    pub fn listing(&self) -> Listing<'_> {
        Listing::new(self)
    }
}

/// Validate standalone pages with the same fail-fast rules (title required,
/// duplicate slugs rejected); pages carry no date and no draft flag.
pub fn load_pages(entries: impl IntoIterator<Item = RawEntry>) -> Result<Vec<PageRecord>, CatalogError> {
    let mut pages: Vec<PageRecord> = Vec::new();

    for entry in entries {
        let title = required_title(&entry)?;
        let description = optional_string(&entry, "description")?;
        if let Some(existing) = pages.iter().find(|p| p.slug == entry.slug) {
            return Err(CatalogError::DuplicateSlug {
                slug: entry.slug,
                first: existing.source.clone(),
                second: entry.source,
            });
        }
        pages.push(PageRecord {
            slug: entry.slug,
            title,
            description,
            source: entry.source,
            body: entry.body,
        });
    }

    Ok(pages)
}

fn validate_post(entry: RawEntry) -> Result<PostRecord, CatalogError> {
    let title = required_title(&entry)?;
    let description = optional_string(&entry, "description")?;
    let date = required_date(&entry)?;
    let tags = optional_tags(&entry)?;
    let draft = optional_draft(&entry)?;

    let word_count = count_words(&entry.body);

    Ok(PostRecord {
        slug: entry.slug,
        title,
        description,
        date,
        tags,
        draft,
        source: entry.source,
        body: entry.body,
        word_count,
    })
}

fn invalid(entry: &RawEntry, field: &'static str, reason: impl Into<String>) -> CatalogError {
    CatalogError::Validation {
        slug: entry.slug.clone(),
        field,
        reason: reason.into(),
    }
}

fn required_title(entry: &RawEntry) -> Result<String, CatalogError> {
    match entry.matter.get("title") {
        None | Some(Value::Null) => Err(invalid(entry, "title", "is required")),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(invalid(entry, "title", "must not be empty"))
        }
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(_) => Err(invalid(entry, "title", "must be a string")),
    }
}

fn optional_string(entry: &RawEntry, field: &'static str) -> Result<Option<String>, CatalogError> {
    match entry.matter.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid(entry, field, "must be a string")),
    }
}

fn required_date(entry: &RawEntry) -> Result<DateTime<FixedOffset>, CatalogError> {
    match entry.matter.get("date") {
        None | Some(Value::Null) => Err(invalid(entry, "date", "is required")),
        Some(Value::String(s)) => parse_date(s)
            .ok_or_else(|| invalid(entry, "date", format!("`{}` is not a recognized date", s))),
        Some(other) => Err(invalid(
            entry,
            "date",
            format!("must be a date string, got `{:?}`", other),
        )),
    }
}

fn optional_tags(entry: &RawEntry) -> Result<BTreeSet<String>, CatalogError> {
    match entry.matter.get("tags") {
        None | Some(Value::Null) => Ok(BTreeSet::new()),
        // A bare string is a single tag
        Some(Value::String(s)) => Ok(BTreeSet::from([s.clone()])),
        Some(Value::Sequence(seq)) => {
            let mut tags = BTreeSet::new();
            for item in seq {
                match item {
                    Value::String(s) => {
                        tags.insert(s.clone());
                    }
                    _ => return Err(invalid(entry, "tags", "must be a list of strings")),
                }
            }
            Ok(tags)
        }
        Some(_) => Err(invalid(entry, "tags", "must be a string or a list of strings")),
    }
}

/// Missing `draft` means published; drafts are opt-in.
fn optional_draft(entry: &RawEntry) -> Result<bool, CatalogError> {
    match entry.matter.get("draft") {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(invalid(entry, "draft", "must be true or false")),
    }
}

/// Parse a date string into a fixed-offset instant.
///
/// RFC 3339 keeps its offset; naive date-times and bare dates are taken as
/// UTC (midnight for bare dates) so the ordering key is identical on every
/// machine that runs the build.
fn parse_date(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(as_utc(dt));
        }
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(as_utc(d.and_hms_opt(0, 0, 0)?));
        }
    }

    None
}

fn as_utc(dt: NaiveDateTime) -> DateTime<FixedOffset> {
    Utc.from_utc_datetime(&dt).fixed_offset()
}
