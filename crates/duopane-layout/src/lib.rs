#![forbid(unsafe_code)]

//! Host-agnostic model for a two-pane resizable layout.
//!
//! This crate owns the data side of DuoPane: the canonical [`LayoutState`],
//! its validation and JSON snapshot codec, the [`LayoutConfig`] surface,
//! pointer geometry for the resize handle, device-mode classification, and
//! the named [`LayoutIntent`]s that controls emit.
//!
//! # Role in DuoPane
//! `duopane-layout` is pure: no I/O beyond optional config-file loading, no
//! logging, no interior mutability. `duopane-runtime` builds the store,
//! drag controller and coordinator on top of it, and `duopane-web` binds
//! those to a browser page.

pub mod affordance;
pub mod config;
pub mod device;
pub mod geometry;
pub mod intent;
pub mod state;

pub use affordance::{ControlAffordances, MaximizeAffordance, PaneAffordance, ToggleAffordance};
pub use config::{
    DEFAULT_MAX_WIDTH, DEFAULT_MAXIMIZE_THRESHOLD, DEFAULT_MIN_WIDTH, DEFAULT_MOBILE_MAX_WIDTH,
    DEFAULT_PANE_WIDTH, DEFAULT_RESIZE_DEBOUNCE_MS, DEFAULT_STORAGE_KEY, LayoutConfig,
    LayoutConfigError,
};
pub use device::DeviceMode;
pub use geometry::{ContainerBounds, drag_proposal};
pub use intent::{LayoutIntent, LayoutShortcut, ShowAuxiliaryOptions};
pub use state::{
    FULL_WIDTH, LayoutState, LayoutStateError, PaneId, PanePatch, PaneState, PartialLayoutState,
    SnapshotError, UnknownPaneId, WIDTH_EPSILON,
};
