//! PreviewResolver: URL -> rendered preview markup, memoized per page.
//!
//! Entries are never evicted. A page holds a small, finite set of links, and
//! the cache dies with the controller that owns it.

use std::collections::HashMap;

use crate::links::{Classification, LinkClassifier};

use super::card::PreviewCard;

// =============================================================================
// PreviewCache
// =============================================================================

/// Normalized URL -> markup
#[derive(Debug, Default, Clone)]
pub struct PreviewCache {
    entries: HashMap<String, String>,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache key for an href
    pub fn normalize(href: &str) -> String {
        href.trim().to_string()
    }

    pub fn get(&self, href: &str) -> Option<&str> {
        self.entries.get(&Self::normalize(href)).map(String::as_str)
    }

    pub fn insert(&mut self, href: &str, markup: String) {
        self.entries.insert(Self::normalize(href), markup);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// PreviewResolver
// =============================================================================

/// Derives and memoizes preview markup
#[derive(Debug, Clone)]
pub struct PreviewResolver {
    classifier: LinkClassifier,
    cache: PreviewCache,
    /// Number of cache misses that derived a card
    derivations: u64,
}

impl PreviewResolver {
    pub fn new(classifier: LinkClassifier) -> Self {
        Self {
            classifier,
            cache: PreviewCache::new(),
            derivations: 0,
        }
    }

    /// Markup for `href`, from cache when already resolved this session
    pub fn resolve(&mut self, href: &str) -> String {
        if let Some(markup) = self.cache.get(href) {
            return markup.to_string();
        }

        let markup = self.derive(href).render().into_string();
        self.cache.insert(href, markup.clone());
        markup
    }

    fn derive(&mut self, href: &str) -> PreviewCard {
        self.derivations += 1;
        match self.classifier.classify(href) {
            Classification::External(_) => {
                PreviewCard::external(href.trim(), self.classifier.registry())
            }
            _ => PreviewCard::Internal,
        }
    }

    pub fn derivations(&self) -> u64 {
        self.derivations
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn classifier(&self) -> &LinkClassifier {
        &self.classifier
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sitematch_core::SiteRegistry;
    use std::rc::Rc;

    fn resolver() -> PreviewResolver {
        PreviewResolver::new(LinkClassifier::new(
            "example.com",
            Rc::new(SiteRegistry::with_defaults()),
        ))
    }

    // -------------------------------------------------------------------------
    // Requirement 1: Second resolution is served from cache, byte-identical
    // -------------------------------------------------------------------------
    #[test]
    fn test_cache_hit_skips_derivation() {
        let mut r = resolver();
        let first = r.resolve("https://github.com/user/repo");
        let second = r.resolve("https://github.com/user/repo");

        assert_eq!(first, second);
        assert_eq!(r.derivations(), 1);
        assert_eq!(r.cache_len(), 1);
    }

    #[test]
    fn test_normalized_key() {
        let mut r = resolver();
        r.resolve("https://github.com/user/repo");
        r.resolve("  https://github.com/user/repo ");
        assert_eq!(r.derivations(), 1);
    }

    // -------------------------------------------------------------------------
    // Requirement 2: Distinct URLs derive separately
    // -------------------------------------------------------------------------
    #[test]
    fn test_distinct_urls() {
        let mut r = resolver();
        r.resolve("/about");
        r.resolve("/archive");
        r.resolve("https://spotify.com/track/1");
        assert_eq!(r.derivations(), 3);
        assert_eq!(r.cache_len(), 3);
    }

    // -------------------------------------------------------------------------
    // Requirement 3: Internal vs external content
    // -------------------------------------------------------------------------
    #[test]
    fn test_internal_and_external_content() {
        let mut r = resolver();
        assert!(r.resolve("/about").contains("internal-preview"));
        assert!(r.resolve("https://example.com/tags").contains("internal-preview"));

        let external = r.resolve("https://www.linkedin.com/in/someone");
        assert!(external.contains("external-preview"));
        assert!(external.contains("LinkedIn"));
        assert!(external.contains("www.linkedin.com"));
    }
}
