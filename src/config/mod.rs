//! Configuration module

mod site;

pub use site::Link;
pub use site::SiteConfig;
