//! Dropdown menu state machine.
//!
//! The menu's state lives on the page: the `active` class on the dropdown.
//! Every transition rewrites the class, the toggle glyph, and
//! `aria-expanded` together so the three never disagree.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use crate::consts::{
    ACTIVE_CLASS, ARIA_EXPANDED, ESCAPE_KEY, MENU_CLOSED_GLYPH, MENU_CONTAINER_CLASS, MENU_DROPDOWN_CLASS,
    MENU_OPEN_GLYPH, MENU_TOGGLE_CLASS,
};
use crate::dom::{Document, Node, Selector};
use crate::error::Result;

/// Whether the dropdown is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    fn glyph(self) -> &'static str {
        match self {
            Self::Closed => MENU_CLOSED_GLYPH,
            Self::Open => MENU_OPEN_GLYPH,
        }
    }

    fn aria_expanded(self) -> &'static str {
        match self {
            Self::Closed => "false",
            Self::Open => "true",
        }
    }
}

pub struct MenuController<N> {
    toggle: N,
    dropdown: N,
}

impl<N: Node> MenuController<N> {
    /// Bind to the page's menu. Returns `None` unless both the toggle and the
    /// dropdown exist.
    pub fn attach<D: Document<Node = N>>(doc: &D) -> Result<Option<Self>> {
        let toggle = doc.query(&Selector::class(MENU_TOGGLE_CLASS))?;
        let dropdown = doc.query(&Selector::class(MENU_DROPDOWN_CLASS))?;
        Ok(toggle.zip(dropdown).map(|(toggle, dropdown)| Self { toggle, dropdown }))
    }

    pub fn toggle(&self) -> &N {
        &self.toggle
    }

    #[must_use]
    pub fn state(&self) -> MenuState {
        if self.dropdown.has_class(ACTIVE_CLASS) {
            MenuState::Open
        } else {
            MenuState::Closed
        }
    }

    fn set_state(&self, state: MenuState) -> Result<()> {
        self.dropdown.set_class(ACTIVE_CLASS, state == MenuState::Open)?;
        self.toggle.set_text(state.glyph());
        self.toggle.set_attr(ARIA_EXPANDED, state.aria_expanded())
    }

    pub fn open(&self) -> Result<()> {
        self.set_state(MenuState::Open)
    }

    pub fn close(&self) -> Result<()> {
        self.set_state(MenuState::Closed)
    }

    /// Toggle-button click. The host must stop the event from reaching the
    /// document-level outside-click handler.
    pub fn on_toggle_click(&self) -> Result<MenuState> {
        let next = match self.state() {
            MenuState::Open => MenuState::Closed,
            MenuState::Closed => MenuState::Open,
        };
        self.set_state(next)?;
        Ok(next)
    }

    /// Document click: closes unless `target` is inside any menu container.
    pub fn on_document_click(&self, target: &N) -> Result<()> {
        if target.closest(&Selector::class(MENU_CONTAINER_CLASS))?.is_some() {
            return Ok(());
        }
        self.close()
    }

    pub fn on_key_down(&self, key: &str) -> Result<()> {
        if key == ESCAPE_KEY {
            self.close()?;
        }
        Ok(())
    }
}
