//! Page controller: builds every component once and routes events to them.
//!
//! ARCHITECTURE
//! ============
//! `Controller` is the browser-free core. It reads preferences once at
//! startup, applies theme and saved tag filter, and then exposes one entry
//! point per event source. The `web` shell owns the listeners and calls in;
//! tests drive the same entry points against the fake DOM.
//!
//! Components with missing page elements are simply absent, so every entry
//! point is safe to call on any page.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::rc::Rc;

use crate::config::Config;
use crate::dom::Document;
use crate::error::Result;
use crate::filter::TagFilter;
use crate::menu::{MenuController, MenuState};
use crate::scroll::{ProgressBar, navigate_to_anchor};
use crate::spy::{Intersection, IntersectionSource, ScrollSpy};
use crate::store::{KeyValueStore, PreferenceStore, Preferences};
use crate::theme::{self, ThemeApplier};

pub struct Controller<D: Document, S> {
    doc: D,
    prefs: PreferenceStore<S>,
    theme: ThemeApplier<D::Node>,
    menu: Option<MenuController<D::Node>>,
    spy: Option<Rc<ScrollSpy<D::Node>>>,
    filter: Option<TagFilter<D::Node>>,
    progress: Option<ProgressBar<D::Node>>,
}

impl<D: Document, S: KeyValueStore> Controller<D, S> {
    /// Attach to the page and apply the saved preferences.
    pub fn init(doc: D, store: S, config: &Config) -> Result<Self> {
        let prefs = PreferenceStore::new(store, config.keys());
        let saved = prefs.load();

        let theme = ThemeApplier::new(&doc)?;
        theme.apply(&saved)?;

        let menu = MenuController::attach(&doc)?;
        let spy = ScrollSpy::attach(&doc, config.band, config.drawer_breakpoint_px)?.map(Rc::new);
        let filter = TagFilter::attach(&doc)?;
        if let Some(filter) = &filter {
            filter.apply(&saved.active_tag)?;
        }
        let progress = ProgressBar::attach(&doc)?;

        log::debug!(
            "controller attached: menu={} spy={} filter={} progress={}",
            menu.is_some(),
            spy.is_some(),
            filter.is_some(),
            progress.is_some()
        );
        Ok(Self { doc, prefs, theme, menu, spy, filter, progress })
    }

    // --- Accessors ---

    pub fn doc(&self) -> &D {
        &self.doc
    }

    pub fn prefs(&self) -> &PreferenceStore<S> {
        &self.prefs
    }

    pub fn theme(&self) -> &ThemeApplier<D::Node> {
        &self.theme
    }

    pub fn menu(&self) -> Option<&MenuController<D::Node>> {
        self.menu.as_ref()
    }

    pub fn spy(&self) -> Option<&ScrollSpy<D::Node>> {
        self.spy.as_deref()
    }

    pub fn filter(&self) -> Option<&TagFilter<D::Node>> {
        self.filter.as_ref()
    }

    /// Current persisted preferences with defaults resolved.
    pub fn preferences(&self) -> Preferences {
        self.prefs.load()
    }

    // --- Theme ---

    /// Slider moved: apply and persist the raw value.
    pub fn on_slider_input(&self, value: &str) -> Result<()> {
        self.theme.apply_intensity(value)?;
        self.prefs.set_color_intensity(value)
    }

    /// Dark mode toggle clicked. Returns the new mode (`true` = dark).
    pub fn on_dark_mode_click(&self) -> Result<bool> {
        let dark = !self.prefs.dark_mode();
        self.theme.apply_dark_mode(dark)?;
        self.theme.update_toggle_glyph(dark)?;
        self.prefs.set_dark_mode(dark)?;
        Ok(dark)
    }

    /// Clear the persisted theme and reload the page.
    pub fn reset_to_defaults(&self) -> Result<()> {
        theme::reset_to_defaults(&self.prefs, &self.doc)
    }

    // --- Menu and document-wide input ---

    pub fn on_menu_toggle_click(&self) -> Result<Option<MenuState>> {
        self.menu.as_ref().map(MenuController::on_toggle_click).transpose()
    }

    /// Click that reached the document: outside-click dismissal for the menu
    /// and the nav drawer. Each is attempted even if the other fails.
    pub fn on_document_click(&self, target: &D::Node) {
        if let Some(menu) = &self.menu
            && let Err(err) = menu.on_document_click(target)
        {
            log::warn!("menu dismissal failed: {err}");
        }
        if let Some(spy) = &self.spy
            && let Err(err) = spy.on_document_click(target, self.doc.viewport_width())
        {
            log::warn!("nav drawer dismissal failed: {err}");
        }
    }

    pub fn on_key_down(&self, key: &str) -> Result<()> {
        match &self.menu {
            Some(menu) => menu.on_key_down(key),
            None => Ok(()),
        }
    }

    /// Anchor clicked. Returns `true` when handled here, in which case the
    /// host must prevent the default navigation.
    pub fn on_anchor_click(&self, href: &str) -> Result<bool> {
        if navigate_to_anchor(&self.doc, href).is_none() {
            return Ok(false);
        }
        if let Some(menu) = &self.menu {
            menu.close()?;
        }
        Ok(true)
    }

    pub fn on_scroll(&self) -> Result<()> {
        match &self.progress {
            Some(progress) => progress.update(&self.doc.scroll_metrics()),
            None => Ok(()),
        }
    }

    // --- Tag filter ---

    pub fn on_tag_click(&self, button: &D::Node) -> Result<()> {
        match &self.filter {
            Some(filter) => filter.on_button_click(button, &self.prefs),
            None => Ok(()),
        }
    }

    // --- Scroll spy ---

    pub fn on_nav_item_click(&self, item: &D::Node) -> Result<bool> {
        match &self.spy {
            Some(spy) => spy.on_item_click(&self.doc, item),
            None => Ok(false),
        }
    }

    pub fn on_drawer_toggle(&self) -> Result<bool> {
        match &self.spy {
            Some(spy) => spy.on_drawer_toggle(),
            None => Ok(false),
        }
    }

    pub fn on_intersections(&self, batch: &[Intersection]) -> Result<()> {
        match &self.spy {
            Some(spy) => spy.on_intersections(batch),
            None => Ok(()),
        }
    }

    /// Subscribe the scroll spy to `source`. Returns `None` when the spy is
    /// inert; dropping the subscription stops tracking.
    pub fn install_scroll_spy<Src>(&self, source: &Src) -> Result<Option<Src::Subscription>>
    where
        Src: IntersectionSource<D::Node>,
        D::Node: 'static,
    {
        let Some(spy) = &self.spy else {
            return Ok(None);
        };
        let handler_spy = Rc::clone(spy);
        let subscription = source.subscribe(
            spy.band(),
            spy.sections(),
            Box::new(move |batch| {
                if let Err(err) = handler_spy.on_intersections(&batch) {
                    log::warn!("scroll spy update failed: {err}");
                }
            }),
        )?;
        Ok(Some(subscription))
    }

    /// Collect the elements whose events feed this controller.
    pub fn listener_targets(&self) -> ListenerTargets<D::Node> {
        ListenerTargets {
            slider: self.theme.slider().cloned(),
            dark_mode_toggle: self.theme.toggle().cloned(),
            menu_toggle: self.menu.as_ref().map(|m| m.toggle().clone()),
            drawer_toggle: self.spy.as_ref().and_then(|s| s.drawer_toggle().cloned()),
            nav_items: self.spy.as_ref().map(|s| s.items().to_vec()).unwrap_or_default(),
            tag_buttons: self.filter.as_ref().map(|f| f.buttons().to_vec()).unwrap_or_default(),
        }
    }
}

/// Element handles the host needs to attach listeners to.
pub struct ListenerTargets<N> {
    pub slider: Option<N>,
    pub dark_mode_toggle: Option<N>,
    pub menu_toggle: Option<N>,
    pub drawer_toggle: Option<N>,
    pub nav_items: Vec<N>,
    pub tag_buttons: Vec<N>,
}
