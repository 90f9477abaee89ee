//! Runtime configuration.
//!
//! Pages may embed a JSON block (`<script id="theme-config"
//! type="application/json">`) to override any field; every field has a
//! default so an empty object, or no block at all, yields [`Config::default`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::error::Result;
use crate::spy::TrackingBand;
use crate::store::PreferenceKeys;

/// Controller configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix for every persisted key, e.g. `derlocke-darkMode`.
    pub namespace: String,
    /// Viewports at or below this width (CSS px) treat the post nav as a drawer.
    pub drawer_breakpoint_px: f64,
    /// Screen strip used by the scroll spy to decide the current section.
    pub band: TrackingBand,
    /// Console log level filter (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: "derlocke".to_owned(),
            drawer_breakpoint_px: 1200.0,
            band: TrackingBand::default(),
            log_level: "info".to_owned(),
        }
    }
}

impl Config {
    /// Parse a configuration block. Missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.band.validate()?;
        Ok(config)
    }

    /// Storage keys derived from [`Config::namespace`].
    #[must_use]
    pub fn keys(&self) -> PreferenceKeys {
        PreferenceKeys::namespaced(&self.namespace)
    }

    /// The configured log level, falling back to `Info` for unknown names.
    #[must_use]
    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
