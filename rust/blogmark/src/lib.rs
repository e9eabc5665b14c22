//! Blogmark: external link annotation and hover previews for a blog theme
//!
//! A Rust/WASM port of the theme's link enhancements.
//!
//! # Architecture
//!
//! ## Link Components
//! - `links/classify.rs` - LinkClassifier: internal vs external, skip rules
//! - `links/annotate.rs` - LinkCortex: icon, aria-label and new-tab decoration
//!
//! ## Preview Components
//! - `preview/card.rs` - PreviewCard: panel markup for a URL
//! - `preview/cache.rs` - PreviewResolver: per-page markup cache
//! - `preview/placement.rs` - place_panel: above/below geometry
//! - `preview/timer.rs` - Scheduler trait and ManualClock
//! - `preview/controller.rs` - PreviewController: hover state machine
//!
//! ## Browser Adapter
//! - `dom/` - DomAnchor, DomPanel, WindowScheduler, LinkEnhancer
//!
//! Site matching itself lives in `sitematch-core`.
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { enhanceLinks } from 'blogmark';
//!
//! await init();
//!
//! const enhancer = enhanceLinks({ hover_delay_ms: 400, debug: true });
//! console.log(enhancer.stats());        // { seen, annotated, internal, ... }
//! console.log(enhancer.previewState()); // "idle"
//!
//! // Later, e.g. on client-side navigation
//! enhancer.detach();
//! ```

pub mod config;
pub mod links;
pub mod preview;
pub mod dom;

pub use config::BlogmarkConfig;
pub use dom::{enhance_links, LinkEnhancer};
pub use links::*;
pub use preview::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("blogmark v{}", env!("CARGO_PKG_VERSION"))
}
