//! Browser adapter: binds the pure link and preview logic to a live document.
//!
//! Compiled for every target; only exercised on `wasm32`.

pub mod anchor;
pub mod panel;
pub mod scheduler;
pub mod enhancer;

pub use anchor::*;
pub use panel::*;
pub use scheduler::*;
pub use enhancer::*;

use wasm_bindgen::JsValue;

/// Render a JS exception for logs and `Result<_, String>` paths
pub(crate) fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}
