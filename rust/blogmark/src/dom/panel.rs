//! DomPanel: the single floating preview element.
//!
//! Created on first use (or adopted if the document already has one),
//! appended to `document.body` on first show, then repositioned and refilled
//! for every hover target.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::Promise;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::preview::{LinkId, LinkMetrics, PanelPlacement, PreviewSurface, LOADING_MARKUP};

use super::js_error;

pub const CONTAINER_CLASS: &str = "link-preview-container";
pub const CONTENT_CLASS: &str = "link-preview-content";
pub const ARROW_CLASS: &str = "link-preview-arrow";
pub const VISIBLE_CLASS: &str = "visible";

struct PanelNodes {
    root: HtmlElement,
    content: Element,
    arrow: Element,
}

pub struct DomPanel {
    window: Window,
    document: Document,
    nodes: Option<PanelNodes>,
    anchors: HashMap<LinkId, Element>,
    /// Bumped on every show/hide; a pending fill only lands if unchanged
    generation: Rc<Cell<u64>>,
}

impl DomPanel {
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            nodes: None,
            anchors: HashMap::new(),
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Remember which element a link id refers to
    pub fn track(&mut self, link: LinkId, element: Element) {
        self.anchors.insert(link, element);
    }

    pub fn root(&self) -> Option<&HtmlElement> {
        self.nodes.as_ref().map(|n| &n.root)
    }

    /// Adopt a container left in the document by another panel
    fn existing_nodes(&self) -> Result<Option<PanelNodes>, String> {
        let found = self
            .document
            .query_selector(&format!(".{}", CONTAINER_CLASS))
            .map_err(js_error)?;
        let root = match found.and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
            Some(root) => root,
            None => return Ok(None),
        };

        let content = root.query_selector(&format!(".{}", CONTENT_CLASS)).map_err(js_error)?;
        let arrow = root.query_selector(&format!(".{}", ARROW_CLASS)).map_err(js_error)?;
        Ok(match (content, arrow) {
            (Some(content), Some(arrow)) => Some(PanelNodes { root, content, arrow }),
            _ => None,
        })
    }

    fn build_nodes(&self) -> Result<PanelNodes, String> {
        if let Some(nodes) = self.existing_nodes()? {
            return Ok(nodes);
        }

        let root = self
            .document
            .create_element("div")
            .map_err(js_error)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| "Panel root is not an HtmlElement".to_string())?;
        root.set_class_name(CONTAINER_CLASS);

        let content = self.document.create_element("div").map_err(js_error)?;
        content.set_class_name(CONTENT_CLASS);
        content.set_inner_html(LOADING_MARKUP);

        let arrow = self.document.create_element("div").map_err(js_error)?;
        arrow.set_class_name(ARROW_CLASS);

        root.append_child(&content).map_err(js_error)?;
        root.append_child(&arrow).map_err(js_error)?;

        Ok(PanelNodes { root, content, arrow })
    }

    fn try_show(&mut self, placement: &PanelPlacement, markup: &str) -> Result<(), String> {
        if self.nodes.is_none() {
            self.nodes = Some(self.build_nodes()?);
        }
        let nodes = match &self.nodes {
            Some(n) => n,
            None => return Ok(()),
        };

        if !nodes.root.is_connected() {
            let body = self.document.body().ok_or("Document has no body")?;
            body.append_child(&nodes.root).map_err(js_error)?;
        }

        nodes
            .arrow
            .set_class_name(&format!("{} {}", ARROW_CLASS, placement.arrow.css_class()));

        let style = nodes.root.style();
        style.set_property("top", &format!("{}px", placement.top)).map_err(js_error)?;
        style.set_property("left", &format!("{}px", placement.left)).map_err(js_error)?;
        style.set_property("transform", "translateX(-50%)").map_err(js_error)?;

        nodes.content.set_inner_html(markup);
        nodes.root.class_list().add_1(VISIBLE_CLASS).map_err(js_error)
    }
}

impl PreviewSurface for DomPanel {
    fn measure(&self, link: LinkId) -> Option<LinkMetrics> {
        let element = self.anchors.get(&link)?;
        if !element.is_connected() {
            return None;
        }

        let rect = element.get_bounding_client_rect();
        Some(LinkMetrics {
            top: rect.top(),
            bottom: rect.bottom(),
            left: rect.left(),
            width: rect.width(),
            viewport_height: self.window.inner_height().ok()?.as_f64()?,
            scroll_x: self.window.scroll_x().ok()?,
            scroll_y: self.window.scroll_y().ok()?,
        })
    }

    fn show(&mut self, placement: &PanelPlacement, markup: &str) {
        self.generation.set(self.generation.get() + 1);
        if let Err(e) = self.try_show(placement, markup) {
            web_sys::console::error_1(&format!("[DomPanel] Show failed: {}", e).into());
        }
    }

    fn fill(&mut self, markup: &str) {
        let content = match &self.nodes {
            Some(n) => n.content.clone(),
            None => return,
        };
        let expected = self.generation.get();
        let generation = Rc::clone(&self.generation);
        let markup = markup.to_string();

        wasm_bindgen_futures::spawn_local(async move {
            // Resolve after the current event handler returns
            let _ = JsFuture::from(Promise::resolve(&JsValue::NULL)).await;
            if generation.get() == expected {
                content.set_inner_html(&markup);
            }
        });
    }

    fn hide(&mut self) {
        self.generation.set(self.generation.get() + 1);
        if let Some(nodes) = &self.nodes {
            if let Err(e) = nodes.root.class_list().remove_1(VISIBLE_CLASS) {
                web_sys::console::error_1(
                    &format!("[DomPanel] Hide failed: {}", js_error(e)).into(),
                );
            }
        }
    }
}
