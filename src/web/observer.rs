//! `IntersectionObserver` as an [`IntersectionSource`].

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::dom::WebNode;
use crate::error::Result;
use crate::spy::{BatchHandler, Intersection, IntersectionSource, TrackingBand};

/// Observes against the viewport, shrunk to the tracking band.
pub struct WebIntersections;

/// A live observer. Dropping it disconnects.
pub struct Subscription {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn to_intersection(value: JsValue) -> Option<Intersection> {
    let entry = match value.dyn_into::<IntersectionObserverEntry>() {
        Ok(entry) => entry,
        Err(_) => return None,
    };
    Some(Intersection { target_id: entry.target().id(), is_intersecting: entry.is_intersecting() })
}

impl IntersectionSource<WebNode> for WebIntersections {
    type Subscription = Subscription;

    fn subscribe(&self, band: &TrackingBand, targets: &[WebNode], mut on_batch: BatchHandler) -> Result<Subscription> {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                on_batch(entries.iter().filter_map(to_intersection).collect());
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_root_margin(&band.root_margin());
        options.set_threshold(&JsValue::from_f64(0.0));
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        for target in targets {
            observer.observe(target.element());
        }
        Ok(Subscription { observer, _callback: callback })
    }
}
