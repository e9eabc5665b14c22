use std::collections::HashMap;
use std::rc::Rc;

use sitematch_core::SiteRegistry;

use crate::links::LinkClassifier;
use crate::preview::{
    HoverTiming, LinkId, LinkMetrics, ManualClock, PanelPlacement, PlacementConfig,
    PreviewController, PreviewResolver, PreviewSurface,
};

/// Surface that records every call instead of touching a document
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub metrics: HashMap<LinkId, LinkMetrics>,
    /// Placement and content of every `show`
    pub shows: Vec<(PanelPlacement, String)>,
    pub fills: Vec<String>,
    pub hides: usize,
    /// Set by the first `show`, like appending the panel to the body
    pub attached: bool,
    pub visible: bool,
}

impl PreviewSurface for RecordingSurface {
    fn measure(&self, link: LinkId) -> Option<LinkMetrics> {
        self.metrics.get(&link).copied()
    }

    fn show(&mut self, placement: &PanelPlacement, markup: &str) {
        self.attached = true;
        self.visible = true;
        self.shows.push((*placement, markup.to_string()));
    }

    fn fill(&mut self, markup: &str) {
        self.fills.push(markup.to_string());
    }

    fn hide(&mut self) {
        self.visible = false;
        self.hides += 1;
    }
}

pub type TestController = PreviewController<ManualClock, RecordingSurface>;

pub fn metrics_at(bottom: f64) -> LinkMetrics {
    LinkMetrics {
        top: bottom - 20.0,
        bottom,
        left: 100.0,
        width: 80.0,
        viewport_height: 800.0,
        scroll_x: 0.0,
        scroll_y: 0.0,
    }
}

pub fn controller() -> TestController {
    let classifier = LinkClassifier::new("example.com", Rc::new(SiteRegistry::with_defaults()));
    PreviewController::new(
        PreviewResolver::new(classifier),
        ManualClock::new(),
        RecordingSurface::default(),
        HoverTiming::default(),
        PlacementConfig::default(),
    )
}

/// Register a link and give it geometry
pub fn add_link(ctrl: &mut TestController, href: &str, bottom: f64) -> LinkId {
    let id = ctrl.register_link(href).expect("previewable link");
    ctrl.surface_mut().metrics.insert(id, metrics_at(bottom));
    id
}

/// Advance the simulated clock and deliver whatever fired
pub fn advance(ctrl: &mut TestController, ms: u64) {
    let fired = ctrl.scheduler_mut().advance(ms);
    for (handle, task) in fired {
        ctrl.on_timer(handle, task);
    }
}
