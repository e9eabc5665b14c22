//! PreviewController: hover/focus state machine for the preview panel
//!
//! # Design Principles
//! 1. State machine: Idle → PendingDelay → Visible → Idle
//! 2. One panel, reused: every reveal repositions and refills it
//! 3. At most one reveal in flight; fired timers that no longer match the
//!    session are ignored
//!
//! Time and rendering are injected (`Scheduler`, `PreviewSurface`), so the
//! whole machine runs natively under a `ManualClock`.

use serde::Serialize;

use crate::links::classify::starts_with_ignore_case;

use super::cache::PreviewResolver;
use super::card::LOADING_MARKUP;
use super::placement::{place_panel, LinkMetrics, PanelPlacement, PlacementConfig};
use super::timer::{Scheduler, TimerHandle, TimerTask};

// =============================================================================
// Types
// =============================================================================

/// Index of a registered link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LinkId(pub usize);

/// Rendering side of the controller
pub trait PreviewSurface {
    /// Current geometry of a link; None if it is gone
    fn measure(&self, link: LinkId) -> Option<LinkMetrics>;
    /// Position the panel, set its content and make it visible
    fn show(&mut self, placement: &PanelPlacement, markup: &str);
    /// Replace the content of the visible panel
    fn fill(&mut self, markup: &str);
    fn hide(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HoverTiming {
    pub hover_delay_ms: u32,
    pub release_delay_ms: u32,
}

impl Default for HoverTiming {
    fn default() -> Self {
        Self {
            hover_delay_ms: 400,
            release_delay_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HoverState {
    Idle,
    PendingDelay { link: LinkId, timer: TimerHandle },
    Visible { link: LinkId },
}

// =============================================================================
// PreviewController
// =============================================================================

pub struct PreviewController<S: Scheduler, P: PreviewSurface> {
    resolver: PreviewResolver,
    scheduler: S,
    surface: P,
    timing: HoverTiming,
    placement: PlacementConfig,
    /// LinkId -> href
    links: Vec<String>,
    state: HoverState,
    active_link: Option<LinkId>,
    release_timer: Option<TimerHandle>,
}

impl<S: Scheduler, P: PreviewSurface> PreviewController<S, P> {
    pub fn new(
        resolver: PreviewResolver,
        scheduler: S,
        surface: P,
        timing: HoverTiming,
        placement: PlacementConfig,
    ) -> Self {
        Self {
            resolver,
            scheduler,
            surface,
            timing,
            placement,
            links: Vec::new(),
            state: HoverState::Idle,
            active_link: None,
            release_timer: None,
        }
    }

    /// Links that get a preview: everything except fragments, scripts,
    /// mail and phone links
    pub fn is_previewable(href: &str) -> bool {
        let href = href.trim();
        !(href.is_empty()
            || href.starts_with('#')
            || starts_with_ignore_case(href, "javascript:")
            || starts_with_ignore_case(href, "mailto:")
            || starts_with_ignore_case(href, "tel:"))
    }

    pub fn register_link(&mut self, href: &str) -> Option<LinkId> {
        if !Self::is_previewable(href) {
            return None;
        }
        self.links.push(href.to_string());
        Some(LinkId(self.links.len() - 1))
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn href(&self, link: LinkId) -> Option<&str> {
        self.links.get(link.0).map(String::as_str)
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Pointer entered or focus gained
    pub fn enter(&mut self, link: LinkId) {
        if link.0 >= self.links.len() {
            return;
        }

        match self.state {
            HoverState::Visible { link: current } if current == link => return,
            HoverState::Visible { .. } => self.surface.hide(),
            HoverState::PendingDelay { timer, .. } => self.scheduler.cancel(timer),
            HoverState::Idle => {}
        }

        if let Some(release) = self.release_timer.take() {
            self.scheduler.cancel(release);
        }

        self.active_link = Some(link);
        let timer = self.scheduler.schedule(self.timing.hover_delay_ms, TimerTask::Reveal);
        self.state = HoverState::PendingDelay { link, timer };
    }

    /// Pointer left or focus lost
    pub fn leave(&mut self, link: LinkId) {
        match self.state {
            HoverState::PendingDelay { link: current, timer } if current == link => {
                self.scheduler.cancel(timer);
                self.active_link = None;
                self.state = HoverState::Idle;
            }
            HoverState::Visible { link: current } if current == link => {
                self.surface.hide();
                self.state = HoverState::Idle;
                let release = self
                    .scheduler
                    .schedule(self.timing.release_delay_ms, TimerTask::ReleaseActive);
                self.release_timer = Some(release);
            }
            _ => {}
        }
    }

    /// A scheduled task fired
    pub fn on_timer(&mut self, handle: TimerHandle, task: TimerTask) {
        match task {
            TimerTask::Reveal => {
                if let HoverState::PendingDelay { link, timer } = self.state {
                    if timer == handle {
                        self.reveal(link);
                    }
                }
            }
            TimerTask::ReleaseActive => {
                if self.release_timer == Some(handle) {
                    self.release_timer = None;
                    if self.state == HoverState::Idle {
                        self.active_link = None;
                    }
                }
            }
        }
        self.scheduler.complete(handle);
    }

    /// Cancel every timer, hide the panel and return to Idle
    pub fn reset(&mut self) {
        match self.state {
            HoverState::PendingDelay { timer, .. } => self.scheduler.cancel(timer),
            HoverState::Visible { .. } => self.surface.hide(),
            HoverState::Idle => {}
        }
        if let Some(release) = self.release_timer.take() {
            self.scheduler.cancel(release);
        }
        self.active_link = None;
        self.state = HoverState::Idle;
    }

    fn reveal(&mut self, link: LinkId) {
        let (metrics, href) = match (self.surface.measure(link), self.links.get(link.0)) {
            (Some(metrics), Some(href)) => (metrics, href.clone()),
            _ => {
                self.active_link = None;
                self.state = HoverState::Idle;
                return;
            }
        };

        let placement = place_panel(&metrics, &self.placement);
        self.surface.show(&placement, LOADING_MARKUP);
        let markup = self.resolver.resolve(&href);
        self.surface.fill(&markup);
        self.state = HoverState::Visible { link };
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn active_link(&self) -> Option<LinkId> {
        self.active_link
    }

    pub fn is_panel_visible(&self) -> bool {
        matches!(self.state, HoverState::Visible { .. })
    }

    pub fn state_name(&self) -> &'static str {
        match self.state {
            HoverState::Idle => "idle",
            HoverState::PendingDelay { .. } => "pending",
            HoverState::Visible { .. } => "visible",
        }
    }

    pub fn resolver(&self) -> &PreviewResolver {
        &self.resolver
    }

    pub fn surface(&self) -> &P {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut P {
        &mut self.surface
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
