//! Browser shell: startup, listener wiring, and the JavaScript exports.
//!
//! SYSTEM CONTEXT
//! ==============
//! The module starts via `#[wasm_bindgen(start)]`, waits for the document to
//! be parsed, builds a [`Controller`] over the live page, and hooks every
//! event source to the matching controller entry point. Listener guards and
//! the intersection subscription are parked in a single page [`Session`] so
//! they live exactly as long as the page.
//!
//! Startup failures are logged and leave the page usable without the theme
//! controller.

mod dom;
mod events;
mod observer;
mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{Element, Event, EventTarget, KeyboardEvent};

pub use self::dom::{WebDocument, WebNode};
pub use self::events::Listener;
pub use self::observer::{Subscription, WebIntersections};
pub use self::storage::{BrowserStore, LocalStorage};
use crate::config::Config;
use crate::consts::CONFIG_SCRIPT_ID;
use crate::controller::Controller;
use crate::dom::{Document, Node};
use crate::error::Result;
use crate::scroll::ANCHOR_LINKS;
use crate::store::PreferenceStore;
use crate::theme;

type PageController = Controller<WebDocument, BrowserStore>;

/// Everything that must stay alive while the page is open.
struct Session {
    controller: Rc<PageController>,
    _listeners: Vec<Listener>,
    _scroll_spy: Option<Subscription>,
}

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

fn report<T>(what: &str, result: Result<T>) {
    if let Err(err) = result {
        log::warn!("{what} failed: {err}");
    }
}

fn event_element(event: &Event) -> Option<WebNode> {
    match event.target()?.dyn_into::<Element>() {
        Ok(element) => Some(WebNode::new(element)),
        Err(_) => None,
    }
}

/// Read the inline `#theme-config` JSON block; absent or blank means defaults.
fn read_config() -> Result<Config> {
    let doc = WebDocument::current()?;
    match doc.by_id(CONFIG_SCRIPT_ID).and_then(|el| el.element().text_content()) {
        Some(raw) if !raw.trim().is_empty() => Config::from_json(&raw),
        _ => Ok(Config::default()),
    }
}

/// Attach a listener for `kind` on `target` that receives the controller.
fn listen(
    listeners: &mut Vec<Listener>,
    controller: &Rc<PageController>,
    target: &EventTarget,
    kind: &'static str,
    mut handler: impl FnMut(&PageController, Event) + 'static,
) -> Result<()> {
    let controller = Rc::clone(controller);
    listeners.push(Listener::new(target, kind, move |event| handler(controller.as_ref(), event))?);
    Ok(())
}

fn wire(controller: &Rc<PageController>) -> Result<Vec<Listener>> {
    let targets = controller.listener_targets();
    let mut listeners = Vec::new();
    let document: &EventTarget = controller.doc().document();
    let window: &EventTarget = controller.doc().window();

    if let Some(slider) = targets.slider {
        let input = slider.clone();
        listen(&mut listeners, controller, slider.element(), "input", move |c, _| {
            let value = input.value().unwrap_or_default();
            report("intensity update", c.on_slider_input(&value));
        })?;
    }

    if let Some(toggle) = targets.dark_mode_toggle {
        listen(&mut listeners, controller, toggle.element(), "click", |c, _| {
            report("dark mode toggle", c.on_dark_mode_click());
        })?;
    }

    for anchor in controller.doc().query_all(&ANCHOR_LINKS)? {
        let link = anchor.clone();
        listen(&mut listeners, controller, anchor.element(), "click", move |c, event| {
            let Some(href) = link.attr("href") else {
                return;
            };
            match c.on_anchor_click(&href) {
                Ok(true) => event.prevent_default(),
                Ok(false) => {}
                Err(err) => log::warn!("anchor navigation failed: {err}"),
            }
        })?;
    }

    if let Some(toggle) = targets.menu_toggle {
        listen(&mut listeners, controller, toggle.element(), "click", |c, event| {
            event.stop_propagation();
            report("menu toggle", c.on_menu_toggle_click());
        })?;
    }

    listen(&mut listeners, controller, document, "click", |c, event| {
        if let Some(target) = event_element(&event) {
            c.on_document_click(&target);
        }
    })?;

    listen(&mut listeners, controller, document, "keydown", |c, event| {
        if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
            report("key handling", c.on_key_down(&key));
        }
    })?;

    listen(&mut listeners, controller, window, "scroll", |c, _| {
        report("scroll progress", c.on_scroll());
    })?;

    if let Some(toggle) = targets.drawer_toggle {
        listen(&mut listeners, controller, toggle.element(), "click", |c, _| {
            report("nav drawer toggle", c.on_drawer_toggle());
        })?;
    }

    for item in targets.nav_items {
        let entry = item.clone();
        listen(&mut listeners, controller, item.element(), "click", move |c, event| {
            event.prevent_default();
            report("nav navigation", c.on_nav_item_click(&entry));
        })?;
    }

    for button in targets.tag_buttons {
        let btn = button.clone();
        listen(&mut listeners, controller, button.element(), "click", move |c, _| {
            report("tag filter", c.on_tag_click(&btn));
        })?;
    }

    Ok(listeners)
}

fn boot(config: &Config) -> Result<()> {
    let doc = WebDocument::current()?;
    let store = BrowserStore::open(doc.window());
    let controller = Rc::new(Controller::init(doc, store, config)?);
    let listeners = wire(&controller)?;
    // The page stays interactive without section tracking.
    let scroll_spy = match controller.install_scroll_spy(&WebIntersections) {
        Ok(subscription) => subscription,
        Err(err) => {
            log::warn!("scroll spy disabled: {err}");
            None
        }
    };
    SESSION.with(|session| {
        *session.borrow_mut() = Some(Session { controller, _listeners: listeners, _scroll_spy: scroll_spy });
    });
    log::info!("🖥️ derlocke.net theme loaded");
    Ok(())
}

fn run() {
    let config = match read_config() {
        Ok(config) => config,
        Err(err) => {
            log::warn!("{err}; using defaults");
            Config::default()
        }
    };
    log::set_max_level(config.level().to_level_filter());
    if let Err(err) = boot(&config) {
        log::error!("Theme initialization error: {err}");
    }
}

/// Module entry point.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Trace).is_err() {
        log::debug!("logger already installed");
    }
    log::set_max_level(log::LevelFilter::Info);

    let document = match WebDocument::current() {
        Ok(doc) => doc,
        Err(err) => {
            log::error!("Theme initialization error: {err}");
            return;
        }
    };
    if document.document().ready_state() != "loading" {
        run();
        return;
    }

    // The config block and the elements the controller binds to are only
    // guaranteed to exist once parsing finishes.
    let on_ready = Closure::once_into_js(run);
    if let Err(err) = document
        .document()
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
    {
        log::error!("Theme initialization error: {err:?}");
    }
}

/// Clear the saved theme and reload. Exposed as `resetTheme()` for debugging.
#[wasm_bindgen(js_name = resetTheme)]
pub fn reset_theme() {
    let attached = SESSION.with(|session| {
        session
            .borrow()
            .as_ref()
            .map(|s| s.controller.reset_to_defaults())
    });
    let result = attached.unwrap_or_else(reset_detached);
    report("theme reset", result);
}

/// Reset when startup never completed.
fn reset_detached() -> Result<()> {
    let doc = WebDocument::current()?;
    let config = read_config().unwrap_or_default();
    let prefs = PreferenceStore::new(BrowserStore::open(doc.window()), config.keys());
    theme::reset_to_defaults(&prefs, &doc)
}
