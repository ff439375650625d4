#![forbid(unsafe_code)]

//! Authoritative layout store.
//!
//! [`LayoutStore`] owns the one mutable [`LayoutState`] in the system. All
//! changes go through [`LayoutStore::set_state`] (or the reset/import
//! variants built on it): merge, validate, render, then persist if asked.
//!
//! # Invariants
//!
//! 1. `state()` always returns a value that passed [`LayoutState::merged`]
//!    or [`LayoutState::validate`]; a rejected update leaves it untouched.
//! 2. Persistence is a mirror. A failed write is logged and reported as
//!    [`PersistOutcome::Failed`]; the in-memory state stays authoritative.
//! 3. Every accepted update is rendered exactly once before it is persisted.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Persisted snapshot missing or invalid | Compiled default is used |
//! | Import JSON malformed or out of range | `import_state` returns `false`, nothing changes |
//! | Merge hides both panes or has a NaN width | Update rejected, `warn!` logged |
//! | Storage write fails | `warn!` logged, state kept in memory |
//! | Presentation target missing | `warn!` logged, state kept |

use duopane_layout::{
    ControlAffordances, DeviceMode, LayoutConfig, LayoutState, PartialLayoutState, SnapshotError,
};

use crate::applier::VisualApplier;
use crate::storage::StorageChannel;

/// Per-call options for [`LayoutStore::set_state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetStateOptions {
    /// Write the merged state to the persistence channel. Default: `true`.
    pub persist: bool,
}

impl SetStateOptions {
    pub const PERSIST: Self = Self { persist: true };
    pub const TRANSIENT: Self = Self { persist: false };
}

impl Default for SetStateOptions {
    fn default() -> Self {
        Self::PERSIST
    }
}

/// Result of a [`LayoutStore::save_state`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Written,
    /// Persistence is switched off in the config.
    Disabled,
    /// The channel refused the write. Already logged.
    Failed,
}

/// Where the state came from in [`LayoutStore::load_state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Persisted,
    Defaults,
}

/// Owner of the canonical layout state.
#[derive(Debug)]
pub struct LayoutStore<S, A> {
    config: LayoutConfig,
    state: LayoutState,
    storage: S,
    applier: A,
    device_mode: DeviceMode,
}

impl<S: StorageChannel, A: VisualApplier> LayoutStore<S, A> {
    /// Build a store and load its initial state.
    ///
    /// The config is passed through [`LayoutConfig::validated`] first. No
    /// render happens here; the coordinator renders on start.
    pub fn new(config: LayoutConfig, storage: S, applier: A) -> Self {
        let config = config.validated();
        let mut store = Self {
            state: config.default_state,
            config,
            storage,
            applier,
            device_mode: DeviceMode::Desktop,
        };
        store.load_state();
        store
    }

    /// Independent copy of the current state.
    #[must_use]
    pub fn state(&self) -> LayoutState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub fn applier(&self) -> &A {
        &self.applier
    }

    pub fn applier_mut(&mut self) -> &mut A {
        &mut self.applier
    }

    #[must_use]
    pub const fn device_mode(&self) -> DeviceMode {
        self.device_mode
    }

    /// Record the device mode used when deriving control affordances.
    pub fn set_device_mode(&mut self, mode: DeviceMode) {
        self.device_mode = mode;
    }

    /// Merge `partial` over the current state, render, and persist if
    /// `options.persist`. Returns the resulting canonical state, which is the
    /// unchanged previous state when the merge is rejected.
    pub fn set_state(
        &mut self,
        partial: &PartialLayoutState,
        options: SetStateOptions,
    ) -> LayoutState {
        match self.state.merged(partial) {
            Ok(next) => {
                self.state = next;
                self.render();
                if options.persist {
                    self.save_state();
                }
            }
            Err(error) => {
                tracing::warn!(
                    target: "duopane.store",
                    error = %error,
                    persist = options.persist,
                    "layout update rejected"
                );
            }
        }
        self.state
    }

    /// Replace the state with the compiled default, render, and persist.
    pub fn reset_state(&mut self) -> LayoutState {
        self.state = self.config.default_state;
        self.render();
        self.save_state();
        self.state
    }

    /// Mirror the current state to the persistence channel.
    pub fn save_state(&mut self) -> PersistOutcome {
        if !self.config.enable_storage {
            tracing::trace!(target: "duopane.store", "persistence disabled, skipping save");
            return PersistOutcome::Disabled;
        }
        let json = match self.state.to_json() {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!(target: "duopane.store", error = %error, "layout snapshot encode failed");
                return PersistOutcome::Failed;
            }
        };
        match self.storage.set(&self.config.storage_key, &json) {
            Ok(()) => {
                tracing::debug!(
                    target: "duopane.store",
                    key = %self.config.storage_key,
                    bytes = json.len(),
                    "layout persisted"
                );
                PersistOutcome::Written
            }
            Err(error) => {
                tracing::warn!(
                    target: "duopane.store",
                    key = %self.config.storage_key,
                    error = %error,
                    "layout persist failed"
                );
                PersistOutcome::Failed
            }
        }
    }

    /// Replace the state from the persistence channel, or with the compiled
    /// default when nothing valid is stored. Never fails.
    pub fn load_state(&mut self) -> LoadSource {
        match self.read_persisted() {
            Some(state) => {
                self.state = state;
                LoadSource::Persisted
            }
            None => {
                self.state = self.config.default_state;
                LoadSource::Defaults
            }
        }
    }

    /// Adopt the persisted snapshot if there is a valid one. Renders on
    /// success, does not write back.
    pub fn restore_persisted(&mut self) -> bool {
        let Some(state) = self.read_persisted() else {
            return false;
        };
        self.state = state;
        self.render();
        true
    }

    fn read_persisted(&self) -> Option<LayoutState> {
        if !self.config.enable_storage {
            return None;
        }
        let key = &self.config.storage_key;
        let json = match self.storage.get(key) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(error) => {
                tracing::warn!(target: "duopane.store", key = %key, error = %error, "layout load failed");
                return None;
            }
        };
        match self.decode(&json) {
            Ok(state) => Some(state),
            Err(error) => {
                tracing::warn!(
                    target: "duopane.store",
                    key = %key,
                    error = %error,
                    "persisted layout rejected, using defaults"
                );
                None
            }
        }
    }

    /// Parse, validate, and check the visibility rule for a snapshot.
    fn decode(&self, json: &str) -> Result<LayoutState, SnapshotError> {
        let candidate = LayoutState::from_json(json)?;
        self.config
            .default_state
            .merged(&PartialLayoutState::from(candidate))
            .map_err(SnapshotError::Invalid)
    }

    /// Structural check for a candidate state: finite widths in `[0, 100]`.
    #[must_use]
    pub fn validate_state(&self, candidate: &LayoutState) -> bool {
        candidate.validate().is_ok()
    }

    /// Canonical JSON for the current state. Always valid import input.
    #[must_use]
    pub fn export_state(&self) -> String {
        match self.state.to_json() {
            Ok(json) => json,
            Err(error) => {
                // Unreachable for validated state: widths are always finite.
                tracing::warn!(target: "duopane.store", error = %error, "layout export failed");
                String::new()
            }
        }
    }

    /// Replace the state from `json`. On success renders, persists, and
    /// returns `true`; on any failure leaves everything untouched.
    pub fn import_state(&mut self, json: &str) -> bool {
        match self.decode(json) {
            Ok(state) => {
                self.state = state;
                self.render();
                self.save_state();
                tracing::debug!(target: "duopane.store", "layout imported");
                true
            }
            Err(error) => {
                tracing::warn!(target: "duopane.store", error = %error, "layout import rejected");
                false
            }
        }
    }

    /// Push the current state and its affordances to the applier.
    pub fn render(&mut self) -> bool {
        let applied = self.applier.apply_visual_state(&self.state);
        if !applied {
            tracing::warn!(
                target: "duopane.store",
                "presentation target missing, layout state kept"
            );
        }
        let affordances = ControlAffordances::derive(&self.state, &self.config, self.device_mode);
        self.applier.update_control_affordances(&affordances);
        applied
    }

    /// Forward drag presentation on/off to the applier.
    pub fn set_drag_feedback(&mut self, active: bool) {
        self.applier.set_drag_feedback(active);
    }
}
