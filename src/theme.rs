//! Theme application: color intensity, dark mode, and the toggle button.
//!
//! Each operation writes global presentation state only and is idempotent;
//! none of them depend on each other's order. The elements involved are
//! resolved once when the applier is built.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use crate::consts::{
    COLOR_INTENSITY_VAR, CONTENT_SLIDER_ID, DARK_MODE_TOGGLE_ID, DARK_MODE_VAR, DARK_SWITCH_GLYPH, DARK_SWITCH_TITLE,
    DARK_THEME_COLOR, LIGHT_SWITCH_GLYPH, LIGHT_SWITCH_TITLE, LIGHT_THEME_COLOR,
};
use crate::dom::{Document, Node, Selector};
use crate::error::Result;
use crate::store::{KeyValueStore, PreferenceStore, Preferences};

const THEME_COLOR_META: Selector = Selector::tag("meta").with_attr_value("name", "theme-color");

/// Writes theme state onto the page.
pub struct ThemeApplier<N> {
    root: Option<N>,
    meta: Option<N>,
    toggle: Option<N>,
    slider: Option<N>,
}

impl<N: Node> ThemeApplier<N> {
    /// Resolve the root element, theme-color meta, toggle button, and slider.
    pub fn new<D: Document<Node = N>>(doc: &D) -> Result<Self> {
        Ok(Self {
            root: doc.root(),
            meta: doc.query(&THEME_COLOR_META)?,
            toggle: doc.by_id(DARK_MODE_TOGGLE_ID),
            slider: doc.by_id(CONTENT_SLIDER_ID),
        })
    }

    /// The dark mode toggle button, if the page has one.
    pub fn toggle(&self) -> Option<&N> {
        self.toggle.as_ref()
    }

    /// The color intensity slider, if the page has one.
    pub fn slider(&self) -> Option<&N> {
        self.slider.as_ref()
    }

    /// Set `--color-intensity` to `value` verbatim.
    pub fn apply_intensity(&self, value: &str) -> Result<()> {
        if let Some(root) = &self.root {
            root.set_style(COLOR_INTENSITY_VAR, value)?;
        }
        Ok(())
    }

    /// Set `--dark-mode` and the mobile browser theme color.
    pub fn apply_dark_mode(&self, dark: bool) -> Result<()> {
        if let Some(root) = &self.root {
            root.set_style(DARK_MODE_VAR, if dark { "1" } else { "0" })?;
        }
        if let Some(meta) = &self.meta {
            meta.set_attr("content", if dark { DARK_THEME_COLOR } else { LIGHT_THEME_COLOR })?;
        }
        Ok(())
    }

    /// Label the toggle with the mode it switches to.
    pub fn update_toggle_glyph(&self, dark: bool) -> Result<()> {
        if let Some(toggle) = &self.toggle {
            let (glyph, title) = if dark {
                (LIGHT_SWITCH_GLYPH, LIGHT_SWITCH_TITLE)
            } else {
                (DARK_SWITCH_GLYPH, DARK_SWITCH_TITLE)
            };
            toggle.set_text(glyph);
            toggle.set_attr("title", title)?;
        }
        Ok(())
    }

    /// Apply a full preference snapshot, including the slider position.
    pub fn apply(&self, prefs: &Preferences) -> Result<()> {
        if let Some(slider) = &self.slider {
            slider.set_value(prefs.color_intensity.as_str());
        }
        self.apply_intensity(prefs.color_intensity.as_str())?;
        self.apply_dark_mode(prefs.dark_mode)?;
        self.update_toggle_glyph(prefs.dark_mode)
    }
}

/// Clear the persisted theme and reload so startup re-derives the defaults.
pub fn reset_to_defaults<S, D>(prefs: &PreferenceStore<S>, doc: &D) -> Result<()>
where
    S: KeyValueStore,
    D: Document,
{
    prefs.clear_theme()?;
    log::info!("theme preferences cleared, reloading");
    doc.reload()
}
