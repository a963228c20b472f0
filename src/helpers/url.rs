//! URL helper functions

use crate::config::SiteConfig;

/// Join a path onto the configured site root.
///
/// # Examples
/// ```ignore
/// url_for(&config, "blog/hello/") // -> "/blog/hello/" with root "/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Absolute URL including the configured domain.
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Permalink of a post.
pub fn post_url(config: &SiteConfig, slug: &str) -> String {
    url_for(config, &format!("blog/{}/", slug))
}

/// Permalink of a standalone page.
pub fn page_url(config: &SiteConfig, slug: &str) -> String {
    url_for(config, &format!("{}/", slug))
}

/// URL of one page of the post archive. Page 1 is the archive root itself,
/// deeper pages live under `blog/page/N/`.
pub fn archive_url(config: &SiteConfig, page_number: usize) -> String {
    if page_number <= 1 {
        url_for(config, "blog/")
    } else {
        url_for(config, &format!("blog/page/{}/", page_number))
    }
}

/// URL of one tag's listing, keyed by the tag's slug.
pub fn tag_url(config: &SiteConfig, tag_slug: &str) -> String {
    url_for(config, &format!("tags/{}/", tag_slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com".to_string(),
            root: "/".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "css/style.css"), "/css/style.css");
        assert_eq!(url_for(&config, "/about/"), "/about/");
        assert_eq!(url_for(&config, ""), "/");
    }

    #[test]
    fn test_url_for_with_subdirectory_root() {
        let config = SiteConfig {
            root: "/notes/".to_string(),
            ..test_config()
        };
        assert_eq!(url_for(&config, "blog/hello/"), "/notes/blog/hello/");
        assert_eq!(url_for(&config, ""), "/notes/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/blog/hello/"),
            "https://example.com/blog/hello/"
        );
    }

    #[test]
    fn test_route_builders() {
        let config = test_config();
        assert_eq!(post_url(&config, "hello-world"), "/blog/hello-world/");
        assert_eq!(post_url(&config, "2024/deep-dive"), "/blog/2024/deep-dive/");
        assert_eq!(page_url(&config, "about"), "/about/");
        assert_eq!(archive_url(&config, 1), "/blog/");
        assert_eq!(archive_url(&config, 3), "/blog/page/3/");
        assert_eq!(tag_url(&config, "rust"), "/tags/rust/");
    }
}
