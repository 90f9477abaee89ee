//! In-page anchor navigation and the reading progress bar.

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

use crate::consts::SCROLL_PROGRESS_CLASS;
use crate::dom::{Document, Node, ScrollBlock, ScrollMetrics, Selector};
use crate::error::Result;

/// Links whose clicks are candidates for smooth in-page scrolling.
pub const ANCHOR_LINKS: Selector = Selector::tag("a").with_attr("href");

const INDEX_PREFIX: &str = "index.html#";

/// The element id an anchor `href` should scroll to on the current page.
///
/// `#id` always resolves (bare `#` does not). `index.html#id` resolves only
/// while the current page is the index, i.e. `pathname` ends in `index.html`
/// or `/`; anywhere else the browser should follow the link.
#[must_use]
pub fn anchor_target<'a>(href: &'a str, pathname: &str) -> Option<&'a str> {
    if let Some(id) = href.strip_prefix('#') {
        return (!id.is_empty()).then_some(id);
    }
    let id = href.strip_prefix(INDEX_PREFIX)?;
    let on_index = pathname.ends_with("index.html") || pathname.ends_with('/');
    (on_index && !id.is_empty()).then_some(id)
}

/// Smooth-scroll to the target of `href` if it is on this page.
///
/// Returns the element scrolled to; `None` means the host should let the
/// browser handle the click.
pub fn navigate_to_anchor<D: Document>(doc: &D, href: &str) -> Option<D::Node> {
    let pathname = doc.pathname();
    let target = doc.by_id(anchor_target(href, &pathname)?)?;
    target.scroll_into_view(ScrollBlock::Start);
    Some(target)
}

/// Percentage of the document scrolled past, in `0..=100`.
///
/// A page that cannot scroll reports 0.
#[must_use]
pub fn scroll_progress(metrics: &ScrollMetrics) -> f64 {
    let scrollable = metrics.scroll_height - metrics.client_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (metrics.scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

/// The `.scroll-progress` bar, if the page has one.
pub struct ProgressBar<N> {
    bar: N,
}

impl<N: Node> ProgressBar<N> {
    pub fn attach<D: Document<Node = N>>(doc: &D) -> Result<Option<Self>> {
        Ok(doc
            .query(&Selector::class(SCROLL_PROGRESS_CLASS))?
            .map(|bar| Self { bar }))
    }

    /// Resize the bar to the current scroll position.
    pub fn update(&self, metrics: &ScrollMetrics) -> Result<()> {
        self.bar.set_style("width", &format!("{}%", scroll_progress(metrics)))
    }
}
