#![allow(dead_code)]

use duopane_layout::{ControlAffordances, LayoutConfig, LayoutState};
use duopane_runtime::{
    LayoutCoordinator, MemoryStorage, StorageChannel, StorageError, VisualApplier,
};

/// Applier that remembers what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingApplier {
    pub renders: Vec<LayoutState>,
    pub affordances: Option<ControlAffordances>,
    pub drag_feedback: Vec<bool>,
    /// Report every render as missing its target.
    pub missing_targets: bool,
}

impl VisualApplier for RecordingApplier {
    fn apply_visual_state(&mut self, state: &LayoutState) -> bool {
        self.renders.push(*state);
        !self.missing_targets
    }

    fn update_control_affordances(&mut self, affordances: &ControlAffordances) {
        self.affordances = Some(*affordances);
    }

    fn set_drag_feedback(&mut self, active: bool) {
        self.drag_feedback.push(active);
    }
}

/// Channel whose writes always fail, like a full `localStorage`.
#[derive(Debug, Default)]
pub struct QuotaStorage {
    pub attempts: u32,
}

impl StorageChannel for QuotaStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.attempts += 1;
        Err(StorageError::QuotaExceeded {
            key: key.to_owned(),
            bytes: value.len(),
        })
    }
}

pub type TestCoordinator = LayoutCoordinator<MemoryStorage, RecordingApplier>;

/// Started desktop coordinator with persistence on.
pub fn desktop() -> TestCoordinator {
    desktop_with(LayoutConfig::default().with_storage(true), MemoryStorage::new())
}

pub fn desktop_with(config: LayoutConfig, storage: MemoryStorage) -> TestCoordinator {
    let mut coordinator = LayoutCoordinator::new(config, storage, RecordingApplier::default());
    coordinator.start(1280.0);
    coordinator
}

pub fn writes(coordinator: &TestCoordinator) -> u64 {
    coordinator.store().storage().write_count()
}
