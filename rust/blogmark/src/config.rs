//! Configuration types and defaults for Blogmark
//!
//! Every field has a default, so `{}` (or no config at all) reproduces the
//! theme's behaviour.

use serde::{Deserialize, Serialize};
use sitematch_core::{RegistryError, SitePattern, SiteRegistry};

use crate::preview::{HoverTiming, PlacementConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogmarkConfig {
    /// Host treated as "this site". Default: `window.location.hostname`
    #[serde(default)]
    pub page_host: Option<String>,
    /// Anchors to scan. Default: `a[href]`
    #[serde(default = "default_selector")]
    pub selector: String,
    /// Decorate external links. Default: true
    #[serde(default = "default_true")]
    pub annotate: bool,
    /// Install hover previews. Default: true
    #[serde(default = "default_true")]
    pub preview: bool,
    /// Debounce before the panel appears. Default: 400
    #[serde(default = "default_hover_delay")]
    pub hover_delay_ms: u32,
    /// Grace period before the active link is forgotten. Default: 300
    #[serde(default = "default_release_delay")]
    pub release_delay_ms: u32,
    /// Assumed panel height for the flip test. Default: 250
    #[serde(default = "default_panel_height")]
    pub panel_height: f64,
    /// Gap between link and panel. Default: 10
    #[serde(default = "default_panel_offset")]
    pub panel_offset: f64,
    /// Custom pattern table; must contain exactly one fallback entry
    #[serde(default)]
    pub patterns: Option<Vec<SitePattern>>,
    /// Log a scan summary to the console
    #[serde(default)]
    pub debug: bool,
}

fn default_true() -> bool { true }
fn default_selector() -> String { "a[href]".to_string() }
fn default_hover_delay() -> u32 { 400 }
fn default_release_delay() -> u32 { 300 }
fn default_panel_height() -> f64 { 250.0 }
fn default_panel_offset() -> f64 { 10.0 }

impl Default for BlogmarkConfig {
    fn default() -> Self {
        Self {
            page_host: None,
            selector: default_selector(),
            annotate: true,
            preview: true,
            hover_delay_ms: default_hover_delay(),
            release_delay_ms: default_release_delay(),
            panel_height: default_panel_height(),
            panel_offset: default_panel_offset(),
            patterns: None,
            debug: false,
        }
    }
}

impl BlogmarkConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid config: {}", e))
    }

    pub fn timing(&self) -> HoverTiming {
        HoverTiming {
            hover_delay_ms: self.hover_delay_ms,
            release_delay_ms: self.release_delay_ms,
        }
    }

    pub fn placement(&self) -> PlacementConfig {
        PlacementConfig {
            panel_height: self.panel_height,
            offset: self.panel_offset,
        }
    }

    /// The shared registry: custom table if given, otherwise the defaults
    pub fn build_registry(&self) -> Result<SiteRegistry, RegistryError> {
        match &self.patterns {
            Some(patterns) => SiteRegistry::new(patterns.clone()),
            None => Ok(SiteRegistry::with_defaults()),
        }
    }
}
