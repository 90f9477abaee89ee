//! Crate error type.
//!
//! Missing elements are not errors: components resolve them to `Option` once
//! and go inert. Errors here are rejected browser calls and bad configuration.

/// Error returned by fallible DOM, storage, and configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No global `window` object (not running in a browser main thread).
    #[error("no global window")]
    NoWindow,
    /// The window has no document.
    #[error("window has no document")]
    NoDocument,
    /// `localStorage` is disabled or threw on access.
    #[error("local storage unavailable")]
    StorageUnavailable,
    /// A browser API rejected the call.
    #[error("browser call failed: {0}")]
    Js(String),
    /// Tracking band offsets must be finite and non-negative.
    #[error("invalid tracking band: top {top_px}px, bottom {bottom_percent}%")]
    InvalidBand { top_px: f64, bottom_percent: f64 },
    /// The inline configuration block is not valid JSON for [`crate::config::Config`].
    #[error("invalid theme config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(feature = "hydrate")]
impl From<wasm_bindgen::JsValue> for Error {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
