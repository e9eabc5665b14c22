//! LinkCortex: External Link Decoration
//!
//! Turns a classification into concrete decorations and applies them through
//! the `LinkElement` interface:
//! - `external-link` class plus `data-site` / `data-site-color`
//! - a decorative icon node (`aria-hidden`)
//! - an accessible label naming the destination site
//! - `target="_blank"` + `rel="noopener noreferrer"` unless a target is set
//!
//! Decorated links carry `data-link-annotated`, so a second pass is a no-op.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use sitematch_core::{SitePattern, SiteRegistry};

use super::classify::{Classification, LinkClassifier, SkipReason};

// =============================================================================
// Constants
// =============================================================================

pub const EXTERNAL_CLASS: &str = "external-link";
pub const ICON_CLASS: &str = "external-link-icon";
pub const ANNOTATED_ATTR: &str = "data-link-annotated";
pub const SITE_ATTR: &str = "data-site";
pub const SITE_COLOR_ATTR: &str = "data-site-color";
pub const NEW_TAB_TARGET: &str = "_blank";
pub const SAFE_REL: &str = "noopener noreferrer";

// =============================================================================
// LinkElement
// =============================================================================

/// Narrow view of an anchor element
pub trait LinkElement {
    fn href(&self) -> Option<String>;
    /// Visible text content
    fn text(&self) -> String;
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), String>;
    fn add_class(&mut self, class: &str) -> Result<(), String>;
    /// Append a decorative `span.{class}` child holding `text`, hidden from
    /// assistive technology
    fn append_icon(&mut self, class: &str, text: &str) -> Result<(), String>;
}

// =============================================================================
// Types
// =============================================================================

/// Decorations derived for one external link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkAnnotation {
    pub href: String,
    pub pattern: SitePattern,
    pub is_fallback: bool,
    pub aria_label: String,
    /// True when the link had no target and is forced into a new tab
    pub open_in_new_tab: bool,
}

impl LinkAnnotation {
    /// Icon node text: a separating space, then the glyph
    pub fn icon_text(&self) -> String {
        format!(" {}", self.pattern.icon)
    }
}

/// What `decorate` did to a link
#[derive(Debug, Clone, PartialEq)]
pub enum Decoration {
    Skipped(SkipReason),
    Internal,
    AlreadyAnnotated,
    Annotated(LinkAnnotation),
}

/// Counters for one document pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    pub seen: usize,
    pub annotated: usize,
    pub internal: usize,
    pub skipped: usize,
    pub already_annotated: usize,
    pub failed: usize,
    pub elapsed_ms: f64,
}

// =============================================================================
// LinkCortex
// =============================================================================

/// Classifier + decorator for anchors
#[derive(Debug, Clone)]
pub struct LinkCortex {
    classifier: LinkClassifier,
}

impl LinkCortex {
    pub fn new(page_host: &str, registry: Rc<SiteRegistry>) -> Self {
        Self {
            classifier: LinkClassifier::new(page_host, registry),
        }
    }

    pub fn classifier(&self) -> &LinkClassifier {
        &self.classifier
    }

    /// Derive decorations without touching any element.
    /// `None` for skipped and internal hrefs.
    pub fn plan(&self, href: &str, text: &str, has_target: bool) -> Option<LinkAnnotation> {
        match self.classifier.classify(href) {
            Classification::External(hit) => Some(LinkAnnotation {
                href: href.to_string(),
                pattern: hit.pattern.clone(),
                is_fallback: hit.is_fallback,
                aria_label: format!("{} ({}, opens in a new tab)", text, hit.pattern.label),
                open_in_new_tab: !has_target,
            }),
            _ => None,
        }
    }

    /// Classify and decorate a single link
    pub fn decorate<L: LinkElement>(&self, link: &mut L) -> Result<Decoration, String> {
        if link.attribute(ANNOTATED_ATTR).is_some() {
            return Ok(Decoration::AlreadyAnnotated);
        }

        let href = link.href().unwrap_or_default();
        match self.classifier.classify(&href) {
            Classification::Skipped(reason) => return Ok(Decoration::Skipped(reason)),
            Classification::Internal => return Ok(Decoration::Internal),
            Classification::External(_) => {}
        }

        // Read text and target before the icon node changes the text content
        let text = link.text();
        let has_target = link
            .attribute("target")
            .map_or(false, |t| !t.is_empty());

        let annotation = match self.plan(&href, &text, has_target) {
            Some(a) => a,
            None => return Ok(Decoration::Internal),
        };

        Self::apply(link, &annotation)?;
        Ok(Decoration::Annotated(annotation))
    }

    /// Write an annotation onto a link
    pub fn apply<L: LinkElement>(link: &mut L, annotation: &LinkAnnotation) -> Result<(), String> {
        link.add_class(EXTERNAL_CLASS)?;
        link.set_attribute(SITE_ATTR, &annotation.pattern.token)?;
        link.set_attribute(SITE_COLOR_ATTR, &annotation.pattern.color)?;
        // Marker before the icon: a re-scan must never add a second icon
        link.set_attribute(ANNOTATED_ATTR, "true")?;
        link.append_icon(ICON_CLASS, &annotation.icon_text())?;
        link.set_attribute("aria-label", &annotation.aria_label)?;

        if annotation.open_in_new_tab {
            link.set_attribute("target", NEW_TAB_TARGET)?;
            link.set_attribute("rel", SAFE_REL)?;
        }
        Ok(())
    }

    /// Decorate every link, collecting per-pass counters.
    /// A failing link is counted and the pass continues.
    pub fn decorate_all<'l, L, I>(&self, links: I) -> (ScanStats, Vec<String>)
    where
        L: LinkElement + 'l,
        I: IntoIterator<Item = &'l mut L>,
    {
        let start = instant::Instant::now();
        let mut stats = ScanStats::default();
        let mut errors = Vec::new();

        for link in links {
            stats.seen += 1;
            match self.decorate(link) {
                Ok(Decoration::Annotated(_)) => stats.annotated += 1,
                Ok(Decoration::Internal) => stats.internal += 1,
                Ok(Decoration::Skipped(_)) => stats.skipped += 1,
                Ok(Decoration::AlreadyAnnotated) => stats.already_annotated += 1,
                Err(e) => {
                    stats.failed += 1;
                    errors.push(e);
                }
            }
        }

        stats.elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        (stats, errors)
    }
}

// =============================================================================
// Tests
// =============================================================================
