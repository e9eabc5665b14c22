//! Preview card content, synthesized from the URL alone (no fetch).

use maud::{html, Markup};
use serde::Serialize;
use sitematch_core::SiteRegistry;

use crate::links::host_of;

/// Placeholder shown while the card is resolved
pub const LOADING_MARKUP: &str = r#"<div class="preview-loader">Loading preview...</div>"#;

const EXTERNAL_MESSAGE: &str = "Click to visit this external site";
const INTERNAL_ICON: &str = "📄";
const INTERNAL_SITE: &str = "This Website";
const INTERNAL_MESSAGE: &str = "Internal link to another page";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PreviewCard {
    External {
        icon: String,
        site_name: String,
        host: String,
        color: String,
    },
    Internal,
}

impl PreviewCard {
    /// Card for an external href. The host is matched, not the full href;
    /// an unparseable href is shown verbatim as its own host.
    pub fn external(href: &str, registry: &SiteRegistry) -> Self {
        let host = host_of(href).unwrap_or_else(|| href.to_string());
        let hit = registry.lookup(&host);
        PreviewCard::External {
            icon: hit.pattern.icon.clone(),
            site_name: hit.pattern.label.clone(),
            host,
            color: hit.pattern.color.clone(),
        }
    }

    pub fn render(&self) -> Markup {
        match self {
            PreviewCard::External { icon, site_name, host, color } => html! {
                div class="external-preview" {
                    div class="preview-icon" style=(format!("background: {}", color)) { (icon) }
                    div class="preview-info" {
                        div class="preview-site" { (site_name) }
                        div class="preview-url" { (host) }
                        div class="preview-message" { (EXTERNAL_MESSAGE) }
                    }
                }
            },
            PreviewCard::Internal => html! {
                div class="internal-preview" {
                    div class="preview-icon" { (INTERNAL_ICON) }
                    div class="preview-info" {
                        div class="preview-site" { (INTERNAL_SITE) }
                        div class="preview-message" { (INTERNAL_MESSAGE) }
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_card_matches_host() {
        let registry = SiteRegistry::with_defaults();
        let card = PreviewCard::external("https://www.youtube.com/watch?v=abc", &registry);
        assert_eq!(
            card,
            PreviewCard::External {
                icon: "📺".to_string(),
                site_name: "YouTube".to_string(),
                host: "www.youtube.com".to_string(),
                color: "hsl(0, 100%, 50%)".to_string(),
            }
        );
    }

    #[test]
    fn test_external_card_matches_host_not_path() {
        let registry = SiteRegistry::with_defaults();
        // github.com only appears in the query string
        let card = PreviewCard::external("https://example.org/?ref=github.com", &registry);
        match card {
            PreviewCard::External { site_name, host, .. } => {
                assert_eq!(site_name, "External Link");
                assert_eq!(host, "example.org");
            }
            other => panic!("expected external card, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_href_uses_raw_string() {
        let registry = SiteRegistry::with_defaults();
        match PreviewCard::external("weird:<thing>", &registry) {
            PreviewCard::External { host, .. } => assert_eq!(host, "weird:<thing>"),
            other => panic!("expected external card, got {:?}", other),
        }
    }

    #[test]
    fn test_render_escapes() {
        let registry = SiteRegistry::with_defaults();
        let html = PreviewCard::external("weird:<thing>", &registry).render().into_string();
        assert!(html.contains("weird:&lt;thing&gt;"));
        assert!(!html.contains("<thing>"));
        assert!(html.contains(EXTERNAL_MESSAGE));
    }

    #[test]
    fn test_render_escapes_attribute() {
        let card = PreviewCard::External {
            icon: "*".to_string(),
            site_name: "Quote".to_string(),
            host: "q.example".to_string(),
            color: "red\" onmouseover=\"x".to_string(),
        };
        let html = card.render().into_string();
        assert!(html.contains(r#"style="background: red&quot; onmouseover=&quot;x""#));
    }

    #[test]
    fn test_internal_render() {
        let html = PreviewCard::Internal.render().into_string();
        assert!(html.starts_with(r#"<div class="internal-preview">"#));
        assert!(html.contains("This Website"));
        assert!(html.contains("Internal link to another page"));
    }
}
