//! LinkClassifier: internal / external / skipped decision for an href
//!
//! Classification is a pure, total function of the href and the page host.
//! Hrefs that fail to parse as URLs are never an error: they fall through to
//! the scheme heuristic (anything containing a colon is external).

use std::rc::Rc;

use serde::Serialize;
use sitematch_core::{SiteMatch, SiteRegistry};
use url::Url;

// =============================================================================
// Types
// =============================================================================

/// Why an href was not classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    Empty,
    Fragment,
    Script,
}

/// Outcome of classifying one href
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification<'a> {
    Skipped(SkipReason),
    Internal,
    External(SiteMatch<'a>),
}

impl Classification<'_> {
    pub fn is_external(&self) -> bool {
        matches!(self, Classification::External(_))
    }
}

// =============================================================================
// Helpers
// =============================================================================

pub(crate) fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn has_http_scheme(href: &str) -> bool {
    starts_with_ignore_case(href, "http://") || starts_with_ignore_case(href, "https://")
}

/// Host of an absolute URL, if it parses and has one
pub fn host_of(href: &str) -> Option<String> {
    Url::parse(href.trim())
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
}

// =============================================================================
// LinkClassifier
// =============================================================================

/// Classifies hrefs against the current page host
#[derive(Debug, Clone)]
pub struct LinkClassifier {
    page_host: String,
    registry: Rc<SiteRegistry>,
}

impl LinkClassifier {
    pub fn new(page_host: &str, registry: Rc<SiteRegistry>) -> Self {
        Self {
            page_host: page_host.trim().to_ascii_lowercase(),
            registry,
        }
    }

    pub fn page_host(&self) -> &str {
        &self.page_host
    }

    pub fn registry(&self) -> &SiteRegistry {
        &self.registry
    }

    /// Fragment, script pseudo-URL or empty href
    pub fn skip_reason(href: &str) -> Option<SkipReason> {
        let href = href.trim();
        if href.is_empty() {
            Some(SkipReason::Empty)
        } else if href.starts_with('#') {
            Some(SkipReason::Fragment)
        } else if starts_with_ignore_case(href, "javascript:") {
            Some(SkipReason::Script)
        } else {
            None
        }
    }

    /// True if the href leaves the current site
    pub fn is_external(&self, href: &str) -> bool {
        let href = href.trim();

        if has_http_scheme(href) {
            if let Some(host) = host_of(href) {
                return host != self.page_host;
            }
            // Unparseable absolute URL: the colon heuristic below applies
        }

        href.contains(':') || href.ends_with(".rss")
    }

    /// Full classification; the registry is consulted for external links only
    pub fn classify(&self, href: &str) -> Classification<'_> {
        if let Some(reason) = Self::skip_reason(href) {
            return Classification::Skipped(reason);
        }

        if self.is_external(href) {
            Classification::External(self.registry.lookup(href.trim()))
        } else {
            Classification::Internal
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
