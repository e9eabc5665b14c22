use wasm_bindgen::prelude::*;

use crate::pattern::SitePattern;
use crate::registry::SiteRegistry;

/// JS handle over a SiteRegistry
#[wasm_bindgen]
pub struct SiteMatcher {
    inner: SiteRegistry,
}

#[wasm_bindgen]
impl SiteMatcher {
    /// Build from an array of `{ token, icon, label, color }`, or the default
    /// table when `patterns` is null/undefined.
    #[wasm_bindgen(constructor)]
    pub fn new(patterns: JsValue) -> Result<SiteMatcher, JsValue> {
        if patterns.is_null() || patterns.is_undefined() {
            return Ok(Self { inner: SiteRegistry::with_defaults() });
        }

        let patterns: Vec<SitePattern> = serde_wasm_bindgen::from_value(patterns)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse patterns: {}", e)))?;
        let inner = SiteRegistry::new(patterns)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }

    /// Returns `{ index, pattern, is_fallback }`
    #[wasm_bindgen]
    pub fn lookup(&self, href: &str) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.lookup(href))
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(js_name = patternCount)]
    pub fn pattern_count(&self) -> usize {
        self.inner.len()
    }
}

impl SiteMatcher {
    pub fn registry(&self) -> &SiteRegistry {
        &self.inner
    }
}
