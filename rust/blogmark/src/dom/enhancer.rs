//! LinkEnhancer: one pass over the document after load.
//!
//! # Usage (JavaScript)
//! ```javascript
//! import init, { enhanceLinks } from 'blogmark';
//!
//! await init();
//! document.addEventListener('DOMContentLoaded', () => {
//!   const enhancer = enhanceLinks({ debug: true });
//!   console.log(enhancer.stats()); // { seen, annotated, internal, ... }
//! });
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use sitematch_core::SiteRegistry;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, Window};

use crate::config::BlogmarkConfig;
use crate::links::{LinkClassifier, LinkCortex, ScanStats};
use crate::preview::{PreviewController, PreviewResolver};

use super::anchor::DomAnchor;
use super::js_error;
use super::panel::DomPanel;
use super::scheduler::{DomController, WindowScheduler};

/// Set on anchors that already carry hover listeners
pub const PREVIEW_ATTR: &str = "data-link-preview";

const ENTER_EVENTS: [&str; 2] = ["mouseenter", "focus"];
const LEAVE_EVENTS: [&str; 2] = ["mouseleave", "blur"];

struct Listener {
    element: Element,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Handle returned by `enhanceLinks`; keeps the hover listeners alive
#[wasm_bindgen]
pub struct LinkEnhancer {
    controller: Option<Rc<RefCell<DomController>>>,
    listeners: Vec<Listener>,
    stats: ScanStats,
}

/// Scan the document: decorate external links and install hover previews.
/// `config` may be null/undefined for defaults.
#[wasm_bindgen(js_name = enhanceLinks)]
pub fn enhance_links(config: JsValue) -> Result<LinkEnhancer, JsValue> {
    let config: BlogmarkConfig = if config.is_null() || config.is_undefined() {
        BlogmarkConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
    };
    LinkEnhancer::install(&config)
}

#[wasm_bindgen]
impl LinkEnhancer {
    /// Scan statistics of the annotation pass
    #[wasm_bindgen]
    pub fn stats(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.stats)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Number of links with a hover preview
    #[wasm_bindgen(js_name = previewLinkCount)]
    pub fn preview_link_count(&self) -> usize {
        self.controller
            .as_ref()
            .map_or(0, |c| c.borrow().link_count())
    }

    /// Hover state name: "idle", "pending" or "visible"
    #[wasm_bindgen(js_name = previewState)]
    pub fn preview_state(&self) -> String {
        self.controller
            .as_ref()
            .map_or("idle", |c| c.borrow().state_name())
            .to_string()
    }

    /// False when the document was missing and nothing was installed
    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.controller.is_some() || self.stats.seen > 0
    }

    /// Remove hover listeners and hide the panel. Annotations stay.
    #[wasm_bindgen]
    pub fn detach(&mut self) {
        for listener in self.listeners.drain(..) {
            if let Err(e) = listener.element.remove_event_listener_with_callback(
                listener.event,
                listener.callback.as_ref().unchecked_ref(),
            ) {
                web_sys::console::error_1(
                    &format!("[LinkEnhancer] Failed to remove {} listener: {}", listener.event, js_error(e))
                        .into(),
                );
            }
            if let Err(e) = listener.element.remove_attribute(PREVIEW_ATTR) {
                web_sys::console::error_1(
                    &format!("[LinkEnhancer] Failed to clear preview marker: {}", js_error(e)).into(),
                );
            }
        }
        if let Some(controller) = self.controller.take() {
            if let Ok(mut controller) = controller.try_borrow_mut() {
                controller.reset();
            }
        }
    }
}

impl LinkEnhancer {
    fn inert() -> Self {
        Self {
            controller: None,
            listeners: Vec::new(),
            stats: ScanStats::default(),
        }
    }

    /// Run both passes. A page without window, document or body is a no-op.
    pub fn install(config: &BlogmarkConfig) -> Result<Self, JsValue> {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return Ok(Self::inert()),
        };
        let document = match window.document() {
            Some(d) if d.body().is_some() => d,
            _ => return Ok(Self::inert()),
        };

        let page_host = match &config.page_host {
            Some(host) => host.clone(),
            None => window.location().hostname().unwrap_or_default(),
        };
        let registry = Rc::new(
            config
                .build_registry()
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
        );

        let elements = query_anchors(&document, &config.selector)?;
        let mut enhancer = Self::inert();

        if config.annotate {
            enhancer.stats = annotate(&elements, &document, &page_host, Rc::clone(&registry));
        }
        if config.preview {
            enhancer.install_previews(config, &elements, window, document, &page_host, registry)?;
        }

        if config.debug {
            web_sys::console::debug_1(
                &format!(
                    "[LinkEnhancer] {} links: {} annotated, {} internal, {} skipped, {} failed ({:.2}ms); {} previews",
                    enhancer.stats.seen,
                    enhancer.stats.annotated,
                    enhancer.stats.internal,
                    enhancer.stats.skipped,
                    enhancer.stats.failed,
                    enhancer.stats.elapsed_ms,
                    enhancer.preview_link_count(),
                )
                .into(),
            );
        }

        Ok(enhancer)
    }

    fn install_previews(
        &mut self,
        config: &BlogmarkConfig,
        elements: &[Element],
        window: Window,
        document: Document,
        page_host: &str,
        registry: Rc<SiteRegistry>,
    ) -> Result<(), JsValue> {
        let resolver = PreviewResolver::new(LinkClassifier::new(page_host, registry));
        let controller = Rc::new_cyclic(|weak: &Weak<RefCell<DomController>>| {
            RefCell::new(PreviewController::new(
                resolver,
                WindowScheduler::new(window.clone(), weak.clone()),
                DomPanel::new(window, document),
                config.timing(),
                config.placement(),
            ))
        });

        for element in elements {
            // Already wired by an earlier enhancer
            if element.has_attribute(PREVIEW_ATTR) {
                continue;
            }
            let href = match element.get_attribute("href") {
                Some(h) => h,
                None => continue,
            };
            let link = {
                let mut c = controller.borrow_mut();
                match c.register_link(&href) {
                    Some(link) => {
                        c.surface_mut().track(link, element.clone());
                        link
                    }
                    None => continue,
                }
            };
            element.set_attribute(PREVIEW_ATTR, "true")?;

            for (event, entering) in ENTER_EVENTS
                .iter()
                .map(|e| (*e, true))
                .chain(LEAVE_EVENTS.iter().map(|e| (*e, false)))
            {
                let target = Rc::downgrade(&controller);
                let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                    if let Some(controller) = target.upgrade() {
                        if let Ok(mut controller) = controller.try_borrow_mut() {
                            if entering {
                                controller.enter(link);
                            } else {
                                controller.leave(link);
                            }
                        }
                    }
                });
                element.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
                self.listeners.push(Listener {
                    element: element.clone(),
                    event,
                    callback,
                });
            }
        }

        self.controller = Some(controller);
        Ok(())
    }
}

fn query_anchors(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn annotate(
    elements: &[Element],
    document: &Document,
    page_host: &str,
    registry: Rc<SiteRegistry>,
) -> ScanStats {
    let cortex = LinkCortex::new(page_host, registry);
    let mut anchors: Vec<DomAnchor> = elements
        .iter()
        .map(|e| DomAnchor::new(e.clone(), document.clone()))
        .collect();

    let (stats, errors) = cortex.decorate_all(anchors.iter_mut());
    for error in errors {
        web_sys::console::error_1(&format!("[LinkEnhancer] Failed to decorate link: {}", error).into());
    }
    stats
}
