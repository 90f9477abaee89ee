//! `web_sys` implementations of the element and document seams.

use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlElement, HtmlInputElement, NodeList, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    Window,
};

use crate::dom::{Document, Node, Rect, ScrollBlock, ScrollMetrics, Selector};
use crate::error::{Error, Result};

/// A browser element.
#[derive(Debug, Clone)]
pub struct WebNode(Element);

impl WebNode {
    #[must_use]
    pub fn new(element: Element) -> Self {
        Self(element)
    }

    #[must_use]
    pub fn element(&self) -> &Element {
        &self.0
    }
}

fn elements(list: &NodeList) -> Vec<WebNode> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| match node.dyn_into::<Element>() {
            Ok(element) => Some(WebNode(element)),
            Err(_) => None,
        })
        .collect()
}

impl Node for WebNode {
    fn attr(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attr(&self, name: &str, value: &str) -> Result<()> {
        Ok(self.0.set_attribute(name, value)?)
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_class(&self, class: &str, on: bool) -> Result<()> {
        let list = self.0.class_list();
        if on {
            list.add_1(class)?;
        } else {
            list.remove_1(class)?;
        }
        Ok(())
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn set_style(&self, name: &str, value: &str) -> Result<()> {
        let Some(html) = self.0.dyn_ref::<HtmlElement>() else {
            return Ok(());
        };
        Ok(html.style().set_property(name, value)?)
    }

    fn value(&self) -> Option<String> {
        self.0.dyn_ref::<HtmlInputElement>().map(HtmlInputElement::value)
    }

    fn set_value(&self, value: &str) {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        }
    }

    fn rect(&self) -> Rect {
        let rect = self.0.get_bounding_client_rect();
        Rect::new(rect.top(), rect.bottom())
    }

    fn scroll_into_view(&self, block: ScrollBlock) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(match block {
            ScrollBlock::Start => ScrollLogicalPosition::Start,
            ScrollBlock::Nearest => ScrollLogicalPosition::Nearest,
        });
        self.0.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn contains(&self, other: &Self) -> bool {
        let other: &web_sys::Node = &other.0;
        self.0.contains(Some(other))
    }

    fn closest(&self, selector: &Selector) -> Result<Option<Self>> {
        Ok(self.0.closest(&selector.to_css())?.map(WebNode))
    }

    fn query_all(&self, selector: &Selector) -> Result<Vec<Self>> {
        Ok(elements(&self.0.query_selector_all(&selector.to_css())?))
    }
}

/// The current page.
pub struct WebDocument {
    window: Window,
    document: web_sys::Document,
}

impl WebDocument {
    /// Bind to the global window and its document.
    pub fn current() -> Result<Self> {
        let window = web_sys::window().ok_or(Error::NoWindow)?;
        let document = window.document().ok_or(Error::NoDocument)?;
        Ok(Self { window, document })
    }

    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    #[must_use]
    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }
}

impl Document for WebDocument {
    type Node = WebNode;

    fn root(&self) -> Option<WebNode> {
        self.document.document_element().map(WebNode)
    }

    fn by_id(&self, id: &str) -> Option<WebNode> {
        self.document.get_element_by_id(id).map(WebNode)
    }

    fn query_all(&self, selector: &Selector) -> Result<Vec<WebNode>> {
        Ok(elements(&self.document.query_selector_all(&selector.to_css())?))
    }

    fn viewport_width(&self) -> f64 {
        match self.window.inner_width() {
            Ok(width) => width.as_f64().unwrap_or(0.0),
            Err(_) => 0.0,
        }
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        let Some(root) = self.document.document_element() else {
            return ScrollMetrics::default();
        };
        ScrollMetrics {
            scroll_top: f64::from(root.scroll_top()),
            scroll_height: f64::from(root.scroll_height()),
            client_height: f64::from(root.client_height()),
        }
    }

    fn pathname(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    fn reload(&self) -> Result<()> {
        Ok(self.window.location().reload()?)
    }
}
