//! Small helpers shared across the generator and templates

pub mod text;
pub mod url;
