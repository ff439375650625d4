#![forbid(unsafe_code)]

//! Stateful runtime for the DuoPane two-pane layout.
//!
//! - [`LayoutStore`] owns the canonical state: merge, validate, render,
//!   persist, export, import.
//! - [`DragController`] turns a pointer gesture into transient proposals
//!   and one persisted commit.
//! - [`LayoutCoordinator`] applies named intents and routes pointer and
//!   viewport signals.
//!
//! Everything runs synchronously on the caller's thread. Hosts plug in a
//! [`StorageChannel`] and a [`VisualApplier`]; this crate never installs a
//! `tracing` subscriber.

pub mod applier;
pub mod coordinator;
pub mod debounce;
pub mod drag;
pub mod storage;
pub mod store;

pub use applier::{NullApplier, VisualApplier};
pub use coordinator::LayoutCoordinator;
pub use debounce::ResizeDebouncer;
pub use drag::{
    DragController, DragDispatch, DragIgnoredReason, DragOutcome, DragPhase, DragSession,
    PointerButton, PointerCaptureCommand,
};
#[cfg(feature = "file-storage")]
pub use storage::FileStorage;
pub use storage::{MemoryStorage, StorageChannel, StorageError};
pub use store::{LayoutStore, LoadSource, PersistOutcome, SetStateOptions};

pub use duopane_layout as layout;
