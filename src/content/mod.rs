//! Content loading and validation

pub mod catalog;
pub mod frontmatter;
pub mod markdown;
pub mod post;
pub mod source;

pub use catalog::{load_pages, Catalog, CatalogError};
pub use markdown::MarkdownRenderer;
pub use post::{PageRecord, PostRecord};
pub use source::{ContentSource, RawEntry};
