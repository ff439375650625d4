#![forbid(unsafe_code)]

//! Browser host for the DuoPane layout.
//!
//! On `wasm32` this crate exports [`DuoPaneLayout`], a `wasm-bindgen` class
//! that owns a `LayoutCoordinator` wired to the DOM (`DomApplier`) and to
//! `localStorage` (`LocalStorageChannel`). The page's JS glue forwards
//! events; nothing here installs listeners or keeps global state.
//!
//! [`host_core`] holds the platform-independent parts (selectors, JSON
//! shapes, style mapping) and builds natively so it can be tested without a
//! browser.

pub mod host_core;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{DomApplier, DuoPaneLayout, LocalStorageChannel};
