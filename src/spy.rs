//! Scroll-spy side navigation.
//!
//! Sections (`.blogentry`) are watched through an [`IntersectionSource`]
//! against a thin [`TrackingBand`] near the top of the screen. When a section
//! enters the band its nav entry becomes the only active one, and the nav list
//! scrolls to keep that entry visible. Within one batch the last intersecting
//! entry wins; no stronger ordering is inferred.
//!
//! On narrow viewports the nav is a drawer with its own toggle, closed by
//! outside clicks and by navigating to a section.
//!
//! Nav entries and sections are resolved once at attach time; elements added
//! to the page later are not tracked.

#[cfg(test)]
#[path = "spy_test.rs"]
mod spy_test;

use serde::Deserialize;

use crate::consts::{
    ACTIVE_CLASS, BLOG_ENTRY_CLASS, DATA_TARGET, DRAWER_CLOSED_GLYPH, DRAWER_OPEN_GLYPH, OPEN_CLASS, POST_NAV_CLASS,
    POST_NAV_ID, POST_NAV_ITEM_CLASS, POST_NAV_LIST_ID, POST_NAV_TOGGLE_CLASS, POST_NAV_TOGGLE_ID,
};
use crate::dom::{Document, Node, ScrollBlock, Selector};
use crate::error::{Error, Result};

/// The screen strip in which a section counts as being read.
///
/// The band starts `top_px` below the viewport top and ends `bottom_percent`
/// of the viewport height above the viewport bottom.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackingBand {
    pub top_px: f64,
    pub bottom_percent: f64,
}

impl Default for TrackingBand {
    fn default() -> Self {
        Self { top_px: 80.0, bottom_percent: 60.0 }
    }
}

impl TrackingBand {
    /// Reject offsets that would not form a valid root margin.
    pub fn validate(&self) -> Result<()> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if valid(self.top_px) && valid(self.bottom_percent) {
            Ok(())
        } else {
            Err(Error::InvalidBand { top_px: self.top_px, bottom_percent: self.bottom_percent })
        }
    }

    /// `IntersectionObserver` root margin, e.g. `-80px 0px -60% 0px`.
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!("-{}px 0px -{}% 0px", self.top_px, self.bottom_percent)
    }
}

/// One observation: whether the section with `target_id` is in the band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intersection {
    pub target_id: String,
    pub is_intersecting: bool,
}

impl Intersection {
    #[must_use]
    pub fn entering(target_id: &str) -> Self {
        Self { target_id: target_id.to_owned(), is_intersecting: true }
    }

    #[must_use]
    pub fn leaving(target_id: &str) -> Self {
        Self { target_id: target_id.to_owned(), is_intersecting: false }
    }
}

/// Callback receiving one batch of observations.
pub type BatchHandler = Box<dyn FnMut(Vec<Intersection>)>;

/// Something that reports section visibility in batches.
///
/// Dropping the returned subscription stops delivery.
pub trait IntersectionSource<N> {
    type Subscription;

    fn subscribe(&self, band: &TrackingBand, targets: &[N], on_batch: BatchHandler) -> Result<Self::Subscription>;
}

/// Drawer toggle plus its glyph.
struct Drawer<N> {
    nav: N,
    toggle: N,
}

impl<N: Node> Drawer<N> {
    fn is_open(&self) -> bool {
        self.nav.has_class(OPEN_CLASS)
    }

    /// Whether a click on `target` happened inside the nav or on its toggle.
    fn holds(&self, target: &N) -> Result<bool> {
        if self.nav.contains(target) || self.toggle.contains(target) {
            return Ok(true);
        }
        Ok(target.closest(&Selector::class(POST_NAV_CLASS))?.is_some()
            || target.closest(&Selector::class(POST_NAV_TOGGLE_CLASS))?.is_some())
    }

    fn set_open(&self, open: bool) -> Result<()> {
        self.nav.set_class(OPEN_CLASS, open)?;
        self.toggle.set_text(if open { DRAWER_OPEN_GLYPH } else { DRAWER_CLOSED_GLYPH });
        Ok(())
    }
}

pub struct ScrollSpy<N> {
    list: N,
    items: Vec<N>,
    sections: Vec<N>,
    drawer: Option<Drawer<N>>,
    band: TrackingBand,
    breakpoint_px: f64,
}

impl<N: Node> ScrollSpy<N> {
    /// Bind to `#postNav`/`#postNavList`. Returns `None` (inert) when the nav,
    /// its list, its entries, or the page's sections are missing.
    pub fn attach<D: Document<Node = N>>(doc: &D, band: TrackingBand, breakpoint_px: f64) -> Result<Option<Self>> {
        let (Some(nav), Some(list)) = (doc.by_id(POST_NAV_ID), doc.by_id(POST_NAV_LIST_ID)) else {
            return Ok(None);
        };
        let items = list.query_all(&Selector::class(POST_NAV_ITEM_CLASS))?;
        if items.is_empty() {
            return Ok(None);
        }
        let sections = doc.query_all(&Selector::class(BLOG_ENTRY_CLASS))?;
        if sections.is_empty() {
            return Ok(None);
        }
        let drawer = doc
            .by_id(POST_NAV_TOGGLE_ID)
            .map(|toggle| Drawer { nav, toggle });
        Ok(Some(Self { list, items, sections, drawer, band, breakpoint_px }))
    }

    pub fn items(&self) -> &[N] {
        &self.items
    }

    pub fn sections(&self) -> &[N] {
        &self.sections
    }

    pub fn band(&self) -> &TrackingBand {
        &self.band
    }

    /// The drawer toggle, if the page has one.
    pub fn drawer_toggle(&self) -> Option<&N> {
        self.drawer.as_ref().map(|d| &d.toggle)
    }

    /// `data-target` of the currently active entry.
    pub fn active_target(&self) -> Option<String> {
        self.items
            .iter()
            .find(|item| item.has_class(ACTIVE_CLASS))
            .and_then(|item| item.attr(DATA_TARGET))
    }

    fn entry_for(&self, target_id: &str) -> Option<&N> {
        self.items
            .iter()
            .find(|item| item.attr(DATA_TARGET).is_some_and(|t| t == target_id))
    }

    /// Apply one observation batch in order.
    pub fn on_intersections(&self, batch: &[Intersection]) -> Result<()> {
        for entry in batch.iter().filter(|e| e.is_intersecting) {
            self.activate(&entry.target_id)?;
        }
        Ok(())
    }

    /// Make the entry for `target_id` the only active one and keep it in view.
    pub fn activate(&self, target_id: &str) -> Result<()> {
        for item in &self.items {
            item.set_class(ACTIVE_CLASS, false)?;
        }
        let Some(active) = self.entry_for(target_id) else {
            return Ok(());
        };
        active.set_class(ACTIVE_CLASS, true)?;
        log::debug!("scroll spy: {target_id} active");

        if !self.list.rect().encloses(&active.rect()) {
            active.scroll_into_view(ScrollBlock::Nearest);
        }
        Ok(())
    }

    /// Nav entry click: scroll to its section and close the drawer on narrow
    /// viewports. Returns whether the target section exists.
    pub fn on_item_click<D: Document<Node = N>>(&self, doc: &D, item: &N) -> Result<bool> {
        let Some(section) = item.attr(DATA_TARGET).and_then(|id| doc.by_id(&id)) else {
            return Ok(false);
        };
        section.scroll_into_view(ScrollBlock::Start);
        if doc.viewport_width() <= self.breakpoint_px
            && let Some(drawer) = &self.drawer
        {
            drawer.set_open(false)?;
        }
        Ok(true)
    }

    /// Drawer toggle click. Returns whether the drawer is now open.
    pub fn on_drawer_toggle(&self) -> Result<bool> {
        let Some(drawer) = &self.drawer else {
            return Ok(false);
        };
        let open = !drawer.is_open();
        drawer.set_open(open)?;
        Ok(open)
    }

    /// Document click: on narrow viewports, close the drawer unless `target`
    /// is inside a `.post-nav`/`.post-nav-toggle` or the bound nav and toggle.
    pub fn on_document_click(&self, target: &N, viewport_width: f64) -> Result<()> {
        let Some(drawer) = &self.drawer else {
            return Ok(());
        };
        if viewport_width > self.breakpoint_px || drawer.holds(target)? {
            return Ok(());
        }
        drawer.set_open(false)
    }
}
