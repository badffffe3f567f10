use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::error::{ConfigError, ResolutionError};
use crate::models::ItemIdentifier;

pub const DEFAULT_MARKETPLACE_DOMAIN: &str = "rakuten.co.jp";

/// Pulls the shop/item identifier pair out of product page URLs for one
/// marketplace domain.
#[derive(Debug, Clone)]
pub struct Extractor {
    pattern: Regex,
}

impl Extractor {
    /// Builds an extractor for `domain` (e.g. `rakuten.co.jp`). The domain is
    /// matched literally; the two path segments after it are captured.
    pub fn new(domain: &str) -> Result<Self, ConfigError> {
        let domain = domain.trim().trim_matches('/');
        if domain.is_empty() || domain.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidDomain(domain.to_owned()));
        }

        let pattern = Regex::new(&format!(
            r"{}/([^/?#]+)/([^/?#]+)",
            regex::escape(domain)
        ))
        .map_err(|_| ConfigError::InvalidDomain(domain.to_owned()))?;

        Ok(Self { pattern })
    }

    pub fn extract(&self, url: &str) -> Result<ItemIdentifier, ResolutionError> {
        let caps = self
            .pattern
            .captures(url)
            .ok_or(ResolutionError::ExtractionFailure)?;

        Ok(ItemIdentifier {
            shop_id: caps[1].to_owned(),
            item_id: caps[2].to_owned(),
        })
    }
}

/// Derives a search keyword from the last non-empty path segment of `url`,
/// percent-decoded. The scheme is optional; the first segment is always
/// taken as the host. Returns `None` when the URL has no usable segment.
pub fn fallback_keyword(url: &str) -> Option<String> {
    let url = url.trim();
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let without_query = &url[..end];
    let without_scheme = without_query
        .split_once("://")
        .map_or(without_query, |(_, rest)| rest);

    let segment = without_scheme
        .split('/')
        .skip(1)
        .filter(|s| !s.is_empty())
        .last()?;
    let keyword = percent_decode_str(segment).decode_utf8_lossy().trim().to_owned();

    if keyword.is_empty() {
        None
    } else {
        Some(keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(url: &str) -> Result<ItemIdentifier, ResolutionError> {
        Extractor::new(DEFAULT_MARKETPLACE_DOMAIN)
            .unwrap()
            .extract(url)
    }

    #[test]
    fn extracts_shop_and_item_from_product_url() {
        let id = extract("https://item.rakuten.co.jp/shopA/item123/").unwrap();
        assert_eq!(id.shop_id, "shopA");
        assert_eq!(id.item_id, "item123");
    }

    #[test]
    fn item_id_stops_at_query_and_fragment() {
        let id = extract("https://item.rakuten.co.jp/shopA/item123?scid=af_pc#reviews").unwrap();
        assert_eq!(id.item_id, "item123");

        let id = extract("https://item.rakuten.co.jp/shopA/item123#top").unwrap();
        assert_eq!(id.item_id, "item123");
    }

    #[test]
    fn ignores_trailing_segments() {
        let id = extract("https://item.rakuten.co.jp/shopA/item123/extra/path").unwrap();
        assert_eq!(id.shop_id, "shopA");
        assert_eq!(id.item_id, "item123");
    }

    #[test]
    fn custom_domain_marker() {
        let extractor = Extractor::new("example.co.jp").unwrap();
        let id = extractor
            .extract("https://item.example.co.jp/shopA/item123/")
            .unwrap();
        assert_eq!(id.item_code(), "shopA:item123");
    }

    #[test]
    fn domain_dots_are_literal() {
        let err = extract("https://item.rakutenXco.jp/shopA/item123/").unwrap_err();
        assert_eq!(err, ResolutionError::ExtractionFailure);
    }

    #[test]
    fn fails_without_two_segments() {
        for url in [
            "https://item.rakuten.co.jp/shopA/",
            "https://item.rakuten.co.jp/shopA",
            "https://item.rakuten.co.jp/",
            "https://www.amazon.co.jp/dp/B000000",
            "not a url",
            "",
        ] {
            assert_eq!(
                extract(url),
                Err(ResolutionError::ExtractionFailure),
                "expected failure for {url:?}"
            );
        }
    }

    #[test]
    fn rejects_blank_domain() {
        assert!(matches!(Extractor::new("  "), Err(ConfigError::InvalidDomain(_))));
    }

    #[test]
    fn keyword_is_last_non_empty_segment() {
        assert_eq!(
            fallback_keyword("https://item.rakuten.co.jp/shopA/item123/").as_deref(),
            Some("item123")
        );
        assert_eq!(
            fallback_keyword("https://item.rakuten.co.jp/shopA/item123?x=1").as_deref(),
            Some("item123")
        );
    }

    #[test]
    fn keyword_without_scheme() {
        let url = "item.rakuten.co.jp/shopA/item123/";
        assert!(extract(url).is_ok());
        assert_eq!(fallback_keyword(url).as_deref(), Some("item123"));
        assert_eq!(
            fallback_keyword("item.rakuten.co.jp/shopA/item123#reviews").as_deref(),
            Some("item123")
        );
    }

    #[test]
    fn keyword_ignores_slashes_in_query() {
        assert_eq!(
            fallback_keyword("https://item.rakuten.co.jp/shopA/item123/?ref=https://x.test/a/b")
                .as_deref(),
            Some("item123")
        );
    }

    #[test]
    fn keyword_is_percent_decoded() {
        assert_eq!(
            fallback_keyword("https://item.rakuten.co.jp/shop/%E6%B0%B4/").as_deref(),
            Some("水")
        );
    }

    #[test]
    fn keyword_missing_for_bare_host() {
        assert_eq!(fallback_keyword("https://item.rakuten.co.jp/"), None);
        assert_eq!(fallback_keyword("item.rakuten.co.jp"), None);
        assert_eq!(fallback_keyword("garbage"), None);
        assert_eq!(fallback_keyword("https://item.rakuten.co.jp/?q=a/b"), None);
    }
}
