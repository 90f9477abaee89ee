//! Presentation controller for the derlocke.net static blog.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It keeps
//! three kinds of page state consistent with each other: persisted
//! preferences in `localStorage`, presentation state on the document (CSS
//! custom properties, classes, button labels), and the visibility of tagged
//! content. Every component is written against the [`dom`] and [`store`]
//! seams so the logic can be tested natively; the browser bindings live in
//! [`web`] behind the `hydrate` feature.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | Page-level wiring of all components and their event entry points |
//! | [`store`] | Key-value store seam and the typed preference store |
//! | [`theme`] | Color intensity, dark mode, and toggle glyph application |
//! | [`menu`] | Dropdown menu open/close state machine |
//! | [`spy`] | Scroll-spy side navigation and its mobile drawer |
//! | [`filter`] | Tag filter over entries, nav items, and archive links |
//! | [`scroll`] | Anchor-link navigation and the scroll progress bar |
//! | [`dom`] | Element and document traits, selectors, geometry |
//! | [`config`] | Runtime configuration with defaults |
//! | [`consts`] | Fixed ids, class names, glyphs, and colors |
//! | [`error`] | Crate error type |

pub mod config;
pub mod consts;
pub mod controller;
pub mod dom;
pub mod error;
pub mod filter;
pub mod menu;
pub mod scroll;
pub mod spy;
pub mod store;
pub mod theme;
#[cfg(feature = "hydrate")]
pub mod web;
