use web_sys::{Document, Element};

use crate::links::LinkElement;

use super::js_error;

/// `LinkElement` over a live anchor
#[derive(Debug, Clone)]
pub struct DomAnchor {
    element: Element,
    document: Document,
}

impl DomAnchor {
    pub fn new(element: Element, document: Document) -> Self {
        Self { element, document }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl LinkElement for DomAnchor {
    fn href(&self) -> Option<String> {
        self.element.get_attribute("href")
    }

    fn text(&self) -> String {
        self.element.text_content().unwrap_or_default()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), String> {
        self.element.set_attribute(name, value).map_err(js_error)
    }

    fn add_class(&mut self, class: &str) -> Result<(), String> {
        self.element.class_list().add_1(class).map_err(js_error)
    }

    fn append_icon(&mut self, class: &str, text: &str) -> Result<(), String> {
        let icon = self.document.create_element("span").map_err(js_error)?;
        icon.set_class_name(class);
        icon.set_attribute("aria-hidden", "true").map_err(js_error)?;
        icon.set_text_content(Some(text));
        self.element.append_child(&icon).map_err(js_error)?;
        Ok(())
    }
}
