//! Panel placement: below the link by default, above it when the panel would
//! overflow the bottom of the viewport.

use serde::{Deserialize, Serialize};

/// Link geometry in viewport coordinates, plus the page scroll offset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkMetrics {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub width: f64,
    pub viewport_height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Assumed panel height used for the overflow test
    pub panel_height: f64,
    /// Gap between link and panel
    pub offset: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            panel_height: 250.0,
            offset: 10.0,
        }
    }
}

/// Side of the panel the arrow sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arrow {
    /// Panel below the link
    Top,
    /// Panel above the link
    Bottom,
}

impl Arrow {
    pub fn css_class(&self) -> &'static str {
        match self {
            Arrow::Top => "top",
            Arrow::Bottom => "bottom",
        }
    }
}

/// Document coordinates of the panel anchor point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelPlacement {
    pub top: f64,
    /// Horizontal centre; the panel is shifted by -50% of its own width
    pub left: f64,
    pub arrow: Arrow,
}

pub fn place_panel(metrics: &LinkMetrics, config: &PlacementConfig) -> PanelPlacement {
    let left = metrics.left + metrics.scroll_x + metrics.width / 2.0;

    if metrics.bottom + config.panel_height > metrics.viewport_height {
        PanelPlacement {
            top: metrics.top + metrics.scroll_y - config.offset,
            left,
            arrow: Arrow::Bottom,
        }
    } else {
        PanelPlacement {
            top: metrics.bottom + metrics.scroll_y + config.offset,
            left,
            arrow: Arrow::Top,
        }
    }
}
