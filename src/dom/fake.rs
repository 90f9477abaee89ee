//! In-memory DOM used by unit tests.
//!
//! Nodes form a real tree (children plus weak parent links) so containment
//! and scoped queries behave like the browser. Side effects that have no
//! visible state in a tree (smooth scrolls, reloads) are recorded instead.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use super::{Document, Node, Rect, ScrollBlock, ScrollMetrics, Selector};
use crate::error::{Error, Result};

#[derive(Default)]
struct NodeData {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: String,
    style: BTreeMap<String, String>,
    value: Option<String>,
    rect: Rect,
    scrolls: Vec<ScrollBlock>,
    children: Vec<FakeNode>,
    parent: Weak<RefCell<NodeData>>,
    rejects_writes: bool,
}

#[derive(Clone)]
pub struct FakeNode(Rc<RefCell<NodeData>>);

impl FakeNode {
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(NodeData { tag: tag.to_owned(), ..NodeData::default() })))
    }

    pub fn with_id(self, id: &str) -> Self {
        self.0.borrow_mut().attrs.insert("id".to_owned(), id.to_owned());
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.0.borrow_mut().classes.push(class.to_owned());
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.0.borrow_mut().attrs.insert(name.to_owned(), value.to_owned());
        self
    }

    pub fn with_value(self, value: &str) -> Self {
        self.0.borrow_mut().value = Some(value.to_owned());
        self
    }

    /// Make class, attribute, and style writes fail like a throwing DOM call.
    pub fn rejecting_writes(self) -> Self {
        self.0.borrow_mut().rejects_writes = true;
        self
    }

    pub fn with_rect(self, top: f64, bottom: f64) -> Self {
        self.set_rect(top, bottom);
        self
    }

    pub fn set_rect(&self, top: f64, bottom: f64) {
        self.0.borrow_mut().rect = Rect::new(top, bottom);
    }

    /// Append `child` and return it for further chaining.
    pub fn append(&self, child: FakeNode) -> FakeNode {
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child.clone());
        child
    }

    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    pub fn style(&self, name: &str) -> Option<String> {
        self.0.borrow().style.get(name).cloned()
    }

    pub fn scrolls(&self) -> Vec<ScrollBlock> {
        self.0.borrow().scrolls.clone()
    }

    pub fn ptr_eq(&self, other: &FakeNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn matches(&self, selector: &Selector) -> bool {
        let data = self.0.borrow();
        if selector.tag.is_some_and(|tag| tag != data.tag) {
            return false;
        }
        if selector.class.is_some_and(|class| !data.classes.iter().any(|c| c == class)) {
            return false;
        }
        match (selector.attr, selector.attr_value) {
            (Some(name), Some(value)) => data.attrs.get(name).is_some_and(|v| v == value),
            (Some(name), None) => data.attrs.contains_key(name),
            _ => true,
        }
    }

    fn check_writable(&self) -> Result<()> {
        if self.0.borrow().rejects_writes {
            return Err(Error::Js(format!("write to <{}> rejected", self.0.borrow().tag)));
        }
        Ok(())
    }

    fn descendants(&self, out: &mut Vec<FakeNode>) {
        for child in &self.0.borrow().children {
            out.push(child.clone());
            child.descendants(out);
        }
    }
}

impl Node for FakeNode {
    fn attr(&self, name: &str) -> Option<String> {
        self.0.borrow().attrs.get(name).cloned()
    }

    fn set_attr(&self, name: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        self.0.borrow_mut().attrs.insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn set_class(&self, class: &str, on: bool) -> Result<()> {
        self.check_writable()?;
        let mut data = self.0.borrow_mut();
        let present = data.classes.iter().any(|c| c == class);
        if on && !present {
            data.classes.push(class.to_owned());
        } else if !on {
            data.classes.retain(|c| c != class);
        }
        Ok(())
    }

    fn set_text(&self, text: &str) {
        text.clone_into(&mut self.0.borrow_mut().text);
    }

    fn set_style(&self, name: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        self.0.borrow_mut().style.insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn value(&self) -> Option<String> {
        self.0.borrow().value.clone()
    }

    fn set_value(&self, value: &str) {
        let mut data = self.0.borrow_mut();
        if data.tag == "input" {
            data.value = Some(value.to_owned());
        }
    }

    fn rect(&self) -> Rect {
        self.0.borrow().rect
    }

    fn scroll_into_view(&self, block: ScrollBlock) {
        self.0.borrow_mut().scrolls.push(block);
    }

    fn contains(&self, other: &Self) -> bool {
        let mut cursor = Some(other.0.clone());
        while let Some(node) = cursor {
            if Rc::ptr_eq(&node, &self.0) {
                return true;
            }
            cursor = node.borrow().parent.upgrade();
        }
        false
    }

    fn closest(&self, selector: &Selector) -> Result<Option<Self>> {
        let mut cursor = Some(self.clone());
        while let Some(node) = cursor {
            if node.matches(selector) {
                return Ok(Some(node));
            }
            cursor = node.0.borrow().parent.upgrade().map(FakeNode);
        }
        Ok(None)
    }

    fn query_all(&self, selector: &Selector) -> Result<Vec<Self>> {
        let mut all = Vec::new();
        self.descendants(&mut all);
        Ok(all.into_iter().filter(|node| node.matches(selector)).collect())
    }
}

pub struct FakeDocument {
    pub html: FakeNode,
    pub body: FakeNode,
    width: Cell<f64>,
    metrics: Cell<ScrollMetrics>,
    pathname: RefCell<String>,
    reloads: Cell<u32>,
}

impl FakeDocument {
    pub fn new() -> Self {
        let html = FakeNode::new("html");
        let body = html.append(FakeNode::new("body"));
        Self {
            html,
            body,
            width: Cell::new(1440.0),
            metrics: Cell::new(ScrollMetrics::default()),
            pathname: RefCell::new("/index.html".to_owned()),
            reloads: Cell::new(0),
        }
    }

    pub fn set_width(&self, width: f64) {
        self.width.set(width);
    }

    pub fn set_metrics(&self, metrics: ScrollMetrics) {
        self.metrics.set(metrics);
    }

    pub fn set_pathname(&self, path: &str) {
        path.clone_into(&mut self.pathname.borrow_mut());
    }

    pub fn reloads(&self) -> u32 {
        self.reloads.get()
    }
}

impl Document for FakeDocument {
    type Node = FakeNode;

    fn root(&self) -> Option<FakeNode> {
        Some(self.html.clone())
    }

    fn by_id(&self, id: &str) -> Option<FakeNode> {
        let mut all = Vec::new();
        self.html.descendants(&mut all);
        all.into_iter().find(|node| node.attr("id").is_some_and(|v| v == id))
    }

    fn query_all(&self, selector: &Selector) -> Result<Vec<FakeNode>> {
        self.html.query_all(selector)
    }

    fn viewport_width(&self) -> f64 {
        self.width.get()
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        self.metrics.get()
    }

    fn pathname(&self) -> String {
        self.pathname.borrow().clone()
    }

    fn reload(&self) -> Result<()> {
        self.reloads.set(self.reloads.get() + 1);
        Ok(())
    }
}
