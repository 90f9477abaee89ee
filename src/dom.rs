//! Element and document seams.
//!
//! Components never call browser APIs directly. They hold [`Node`] handles
//! resolved once from a [`Document`] and mutate them through this trait, so
//! the same logic runs against `web_sys` in the browser and against an
//! in-memory tree in tests.
//!
//! Handles are cheap clones of a shared underlying element; all mutation goes
//! through `&self`, matching how the browser DOM behaves.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

#[cfg(test)]
pub(crate) mod fake;

use crate::error::Result;

/// A viewport-relative bounding box in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Whether `inner` lies entirely within this box vertically.
    #[must_use]
    pub fn encloses(&self, inner: &Rect) -> bool {
        inner.top >= self.top && inner.bottom <= self.bottom
    }
}

/// Vertical alignment for a smooth `scrollIntoView`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    /// Align the element's top with the top of the scroll container.
    Start,
    /// Scroll the minimum distance needed to make the element visible.
    Nearest,
}

/// Document scroll position, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

/// The subset of CSS selectors the controller needs.
///
/// Matches elements by optional tag name, class, and attribute (presence or
/// exact value). Rendered to CSS text for the browser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selector {
    pub tag: Option<&'static str>,
    pub class: Option<&'static str>,
    pub attr: Option<&'static str>,
    pub attr_value: Option<&'static str>,
}

impl Selector {
    /// Elements carrying `class`.
    #[must_use]
    pub const fn class(class: &'static str) -> Self {
        Self { tag: None, class: Some(class), attr: None, attr_value: None }
    }

    /// Elements with tag name `tag`.
    #[must_use]
    pub const fn tag(tag: &'static str) -> Self {
        Self { tag: Some(tag), class: None, attr: None, attr_value: None }
    }

    /// Additionally require the attribute `name` to be present.
    #[must_use]
    pub const fn with_attr(mut self, name: &'static str) -> Self {
        self.attr = Some(name);
        self.attr_value = None;
        self
    }

    /// Additionally require the attribute `name` to equal `value`.
    #[must_use]
    pub const fn with_attr_value(mut self, name: &'static str, value: &'static str) -> Self {
        self.attr = Some(name);
        self.attr_value = Some(value);
        self
    }

    /// CSS text, e.g. `meta[name="theme-color"]` or `.blogentry[data-tags]`.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        if let Some(tag) = self.tag {
            css.push_str(tag);
        }
        if let Some(class) = self.class {
            css.push('.');
            css.push_str(class);
        }
        if let Some(name) = self.attr {
            css.push('[');
            css.push_str(name);
            if let Some(value) = self.attr_value {
                css.push_str("=\"");
                css.push_str(value);
                css.push('"');
            }
            css.push(']');
        }
        if css.is_empty() {
            css.push('*');
        }
        css
    }
}

/// A handle to one element.
pub trait Node: Clone {
    fn attr(&self, name: &str) -> Option<String>;

    fn set_attr(&self, name: &str, value: &str) -> Result<()>;

    fn has_class(&self, class: &str) -> bool;

    /// Add `class` when `on`, remove it otherwise.
    fn set_class(&self, class: &str, on: bool) -> Result<()>;

    /// Replace the element's text content.
    fn set_text(&self, text: &str);

    /// Set an inline style property; custom properties (`--name`) included.
    fn set_style(&self, name: &str, value: &str) -> Result<()>;

    /// Current value of a form control; `None` for non-inputs.
    fn value(&self) -> Option<String>;

    /// Set the value of a form control; ignored for non-inputs.
    fn set_value(&self, value: &str);

    fn rect(&self) -> Rect;

    /// Smoothly scroll this element into view.
    fn scroll_into_view(&self, block: ScrollBlock);

    /// Whether `other` is this element or one of its descendants.
    fn contains(&self, other: &Self) -> bool;

    /// This element or its nearest ancestor matching `selector`.
    fn closest(&self, selector: &Selector) -> Result<Option<Self>>;

    /// Descendants matching `selector`, in document order.
    fn query_all(&self, selector: &Selector) -> Result<Vec<Self>>;

    /// First descendant matching `selector`.
    fn query(&self, selector: &Selector) -> Result<Option<Self>> {
        Ok(self.query_all(selector)?.into_iter().next())
    }
}

/// A handle to the page.
pub trait Document {
    type Node: Node;

    /// The `<html>` element, which carries the global style variables.
    fn root(&self) -> Option<Self::Node>;

    fn by_id(&self, id: &str) -> Option<Self::Node>;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &Selector) -> Result<Vec<Self::Node>>;

    fn query(&self, selector: &Selector) -> Result<Option<Self::Node>> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    /// Viewport width in CSS pixels.
    fn viewport_width(&self) -> f64;

    fn scroll_metrics(&self) -> ScrollMetrics;

    /// Path component of the current location, e.g. `/posts/index.html`.
    fn pathname(&self) -> String;

    /// Reload the page.
    fn reload(&self) -> Result<()>;
}
