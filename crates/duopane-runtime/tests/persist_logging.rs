//! Non-fatal failures are logged, never propagated.

mod common;

use common::{QuotaStorage, RecordingApplier};
use duopane_layout::{LayoutConfig, LayoutState, PaneId, PaneState};
use duopane_runtime::{LayoutCoordinator, LayoutStore, MemoryStorage, NullApplier, PersistOutcome};
use tracing_test::traced_test;

#[traced_test]
#[test]
fn quota_failure_is_logged_and_state_kept() {
    let mut coordinator = LayoutCoordinator::new(
        LayoutConfig::default().with_storage(true),
        QuotaStorage::default(),
        RecordingApplier::default(),
    );
    coordinator.start(1280.0);

    let state = coordinator.toggle_pane(PaneId::Auxiliary);

    assert_eq!(
        state,
        LayoutState::new(PaneState::new(100.0, true), PaneState::new(40.0, false))
    );
    assert_eq!(coordinator.store().storage().attempts, 1);
    assert!(logs_contain("layout persist failed"));
    assert!(logs_contain("quota exceeded"));
}

#[traced_test]
#[test]
fn save_reports_failure_outcome() {
    let mut store = LayoutStore::new(
        LayoutConfig::default().with_storage(true),
        QuotaStorage::default(),
        NullApplier,
    );
    assert_eq!(store.save_state(), PersistOutcome::Failed);
    assert!(logs_contain("layout persist failed"));
}

#[traced_test]
#[test]
fn corrupt_snapshot_falls_back_to_defaults_with_warning() {
    let storage = MemoryStorage::new().with_entry("panelLayoutState", "{not json");
    let store = LayoutStore::new(LayoutConfig::default().with_storage(true), storage, NullApplier);
    assert_eq!(store.state(), LayoutState::default());
    assert!(logs_contain("persisted layout rejected"));
}

#[traced_test]
#[test]
fn rejected_import_is_logged() {
    let mut coordinator = LayoutCoordinator::new(
        LayoutConfig::default(),
        MemoryStorage::new(),
        NullApplier,
    );
    coordinator.start(1280.0);
    assert!(!coordinator.import_state(r#"{"paneA":{"width":"wide","visible":true}}"#));
    assert!(logs_contain("layout import rejected"));
}

#[traced_test]
#[test]
fn missing_presentation_target_is_logged() {
    let mut coordinator = LayoutCoordinator::new(
        LayoutConfig::default(),
        MemoryStorage::new(),
        RecordingApplier {
            missing_targets: true,
            ..Default::default()
        },
    );
    coordinator.start(1280.0);
    assert!(logs_contain("presentation target missing"));
}
