//! Drag gestures write to storage once, at the end, whatever ends them.

mod common;

use common::{desktop, writes};
use duopane_layout::{LayoutState, PaneId};
use duopane_runtime::{DragIgnoredReason, DragOutcome, PointerButton, PointerCaptureCommand};

const CONTAINER_LEFT: f64 = 40.0;
const CONTAINER_WIDTH: f64 = 1000.0;

#[test]
fn n_moves_then_up_persist_exactly_once() {
    let mut coordinator = desktop();
    let writes_before = writes(&coordinator);

    coordinator.pointer_down(4, PointerButton::Primary, CONTAINER_LEFT, CONTAINER_WIDTH);
    for step in 0..50 {
        let x = CONTAINER_LEFT + 200.0 + f64::from(step) * 10.0;
        let dispatch = coordinator.pointer_move(4, x);
        assert!(matches!(dispatch.outcome, DragOutcome::Proposed { .. }));
    }
    assert_eq!(writes(&coordinator), writes_before);

    let dispatch = coordinator.pointer_up(4);
    assert_eq!(dispatch.outcome, DragOutcome::Committed);
    assert_eq!(writes(&coordinator), writes_before + 1);

    // Last move was at 690 px into a 1000 px container.
    assert!(coordinator.state().approx_eq(&LayoutState::split(69.0)));
}

#[test]
fn raw_ninety_six_percent_is_clamped() {
    let mut coordinator = desktop();
    coordinator.pointer_down(1, PointerButton::Primary, 0.0, 500.0);
    let dispatch = coordinator.pointer_move(1, 480.0);
    assert_eq!(dispatch.outcome, DragOutcome::Proposed { width: 90.0 });
    let state = coordinator.state();
    assert_eq!(state.pane_a.width, 90.0);
    assert_eq!(state.pane_b.width, 10.0);
    assert!(state.both_visible());
}

#[test]
fn click_without_drag_commits_unchanged_state() {
    let mut coordinator = desktop();
    let before = coordinator.state();
    coordinator.pointer_down(2, PointerButton::Primary, CONTAINER_LEFT, CONTAINER_WIDTH);
    let dispatch = coordinator.pointer_up(2);
    assert_eq!(dispatch.outcome, DragOutcome::Committed);
    assert_eq!(coordinator.state(), before);
    let stored = coordinator
        .store()
        .storage()
        .entry("panelLayoutState")
        .expect("commit writes snapshot");
    assert_eq!(LayoutState::from_json(stored).expect("decodes"), before);
}

#[test]
fn every_terminating_signal_commits_once() {
    type End = fn(&mut common::TestCoordinator, u32) -> DragOutcome;
    let endings: [(&str, End); 5] = [
        ("pointer_up", |c, id| c.pointer_up(id).outcome),
        ("pointer_cancel", |c, id| c.pointer_cancel(id).outcome),
        ("lost_pointer_capture", |c, id| c.lost_pointer_capture(id).outcome),
        ("blur", |c, _| c.blur().outcome),
        ("visibility_hidden", |c, _| c.visibility_hidden().outcome),
    ];
    for (name, end) in endings {
        let mut coordinator = desktop();
        let writes_before = writes(&coordinator);
        coordinator.pointer_down(8, PointerButton::Primary, 0.0, 800.0);
        coordinator.pointer_move(8, 200.0);
        assert_eq!(end(&mut coordinator, 8), DragOutcome::Committed, "{name}");
        assert!(!coordinator.drag().is_dragging(), "{name}");
        assert_eq!(writes(&coordinator), writes_before + 1, "{name}");
        assert!(
            coordinator.state().approx_eq(&LayoutState::split(25.0)),
            "{name}"
        );
    }
}

#[test]
fn drag_feedback_brackets_the_gesture() {
    let mut coordinator = desktop();
    let down = coordinator.pointer_down(3, PointerButton::Primary, 0.0, 800.0);
    assert_eq!(
        down.capture_command,
        Some(PointerCaptureCommand::Acquire { pointer_id: 3 })
    );
    coordinator.pointer_move(3, 400.0);
    let up = coordinator.pointer_up(3);
    assert_eq!(
        up.capture_command,
        Some(PointerCaptureCommand::Release { pointer_id: 3 })
    );
    assert_eq!(coordinator.store().applier().drag_feedback, vec![true, false]);
}

#[test]
fn stray_signals_after_commit_are_ignored() {
    let mut coordinator = desktop();
    coordinator.pointer_down(5, PointerButton::Primary, 0.0, 800.0);
    coordinator.pointer_up(5);
    let writes_after = writes(&coordinator);

    assert_eq!(
        coordinator.pointer_move(5, 100.0).outcome,
        DragOutcome::Ignored(DragIgnoredReason::NoActiveDrag)
    );
    assert_eq!(
        coordinator.blur().outcome,
        DragOutcome::Ignored(DragIgnoredReason::NoActiveDrag)
    );
    assert_eq!(writes(&coordinator), writes_after);
}

#[test]
fn handle_is_inert_while_a_pane_is_hidden() {
    let mut coordinator = desktop();
    coordinator.hide_auxiliary_pane();
    let dispatch = coordinator.pointer_down(1, PointerButton::Primary, 0.0, 800.0);
    assert_eq!(
        dispatch.outcome,
        DragOutcome::Ignored(DragIgnoredReason::HandleHidden)
    );
    assert!(!coordinator.state().pane(PaneId::Auxiliary).visible);
}
