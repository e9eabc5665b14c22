//! SiteMatch: Ordered Site Pattern Lookup
//!
//! Classifies a destination string (an href or a host) into a site descriptor
//! using an ordered table of match tokens. The first table entry whose token
//! occurs in the destination wins; a single fallback entry covers everything
//! else, so a lookup always produces a descriptor.
//!
//! # Architecture
//! - `pattern.rs` - SitePattern descriptor and the default table
//! - `registry.rs` - SiteRegistry lookup service (Aho-Corasick, first-match-wins)
//! - `wasm.rs` - SiteMatcher JS binding
//!
//! # Usage (WASM)
//! ```javascript
//! import init, { SiteMatcher } from 'sitematch-core';
//!
//! await init();
//! const matcher = new SiteMatcher();
//! const hit = matcher.lookup("https://github.com/user/repo");
//! console.log(hit.pattern.label); // "GitHub"
//! ```

mod pattern;
mod registry;
mod wasm;

pub use pattern::*;
pub use registry::*;
pub use wasm::*;
