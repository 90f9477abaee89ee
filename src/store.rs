//! Persisted preferences.
//!
//! [`KeyValueStore`] is the seam over the browser's `localStorage`;
//! [`PreferenceStore`] layers typed accessors and defaults on top of it.
//!
//! DECODING
//! ========
//! Reads never validate. Flags decode by exact match against `"true"`; the
//! dark mode flag is the exception where absence means `true`. Intensity and
//! tag strings pass through verbatim, and only absent or empty values fall
//! back to their defaults.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::collections::HashMap;

use crate::consts::{ALL_TAGS, DEFAULT_DARK_MODE, DEFAULT_INTENSITY};
use crate::error::Result;

/// Durable string-keyed storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Page-lifetime storage, used when `localStorage` is unavailable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// The three storage keys, sharing one namespace prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceKeys {
    pub color_intensity: String,
    pub dark_mode: String,
    pub active_tag: String,
}

impl PreferenceKeys {
    #[must_use]
    pub fn namespaced(namespace: &str) -> Self {
        Self {
            color_intensity: format!("{namespace}-colorIntensity"),
            dark_mode: format!("{namespace}-darkMode"),
            active_tag: format!("{namespace}-activeTag"),
        }
    }
}

/// Stored color intensity, kept as the literal string.
///
/// The slider constrains input to 0–100, but whatever was stored is applied
/// as-is to the style variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intensity(String);

impl Intensity {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self::new(DEFAULT_INTENSITY)
    }
}

/// Snapshot of every persisted preference with defaults resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub color_intensity: Intensity,
    pub dark_mode: bool,
    pub active_tag: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            color_intensity: Intensity::default(),
            dark_mode: DEFAULT_DARK_MODE,
            active_tag: ALL_TAGS.to_owned(),
        }
    }
}

/// Decode a stored flag: `"true"` is true, anything else is false, and a
/// missing entry takes `default`.
#[must_use]
pub fn decode_flag(raw: Option<&str>, default: bool) -> bool {
    raw.map_or(default, |v| v == "true")
}

#[must_use]
pub fn encode_flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Typed access to the namespaced preference keys.
pub struct PreferenceStore<S> {
    store: S,
    keys: PreferenceKeys,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(store: S, keys: PreferenceKeys) -> Self {
        Self { store, keys }
    }

    /// The underlying raw store.
    pub fn raw(&self) -> &S {
        &self.store
    }

    pub fn keys(&self) -> &PreferenceKeys {
        &self.keys
    }

    fn non_empty(&self, key: &str) -> Option<String> {
        self.store.get(key).filter(|v| !v.is_empty())
    }

    pub fn color_intensity(&self) -> Intensity {
        self.non_empty(&self.keys.color_intensity)
            .map(Intensity::new)
            .unwrap_or_default()
    }

    pub fn set_color_intensity(&self, value: &str) -> Result<()> {
        self.store.set(&self.keys.color_intensity, value)
    }

    /// Dark mode is on unless explicitly stored as something other than `"true"`.
    pub fn dark_mode(&self) -> bool {
        decode_flag(self.store.get(&self.keys.dark_mode).as_deref(), DEFAULT_DARK_MODE)
    }

    pub fn set_dark_mode(&self, dark: bool) -> Result<()> {
        self.store.set(&self.keys.dark_mode, encode_flag(dark))
    }

    pub fn active_tag(&self) -> String {
        self.non_empty(&self.keys.active_tag)
            .unwrap_or_else(|| ALL_TAGS.to_owned())
    }

    pub fn set_active_tag(&self, tag: &str) -> Result<()> {
        self.store.set(&self.keys.active_tag, tag)
    }

    /// Remove the intensity and dark mode keys. The saved tag is kept.
    pub fn clear_theme(&self) -> Result<()> {
        self.store.remove(&self.keys.color_intensity)?;
        self.store.remove(&self.keys.dark_mode)
    }

    /// Read every preference once.
    pub fn load(&self) -> Preferences {
        Preferences {
            color_intensity: self.color_intensity(),
            dark_mode: self.dark_mode(),
            active_tag: self.active_tag(),
        }
    }
}
