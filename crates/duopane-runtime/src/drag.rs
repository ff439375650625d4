#![forbid(unsafe_code)]

//! Pointer drag controller for the resize handle.
//!
//! Turns one pointer gesture into a stream of transient proposals followed
//! by exactly one persisted commit:
//!
//! ```text
//! Idle --pointer_down--> Dragging --pointer_move--> Dragging
//!   ^                        |
//!   +--- pointer_up / cancel / lost capture / blur / hidden ---+
//! ```
//!
//! The controller enforces:
//! - one active pointer at a time; signals from other pointers are ignored,
//! - explicit capture acquire/release commands for the host, and
//! - a commit on every terminating signal, so a lost pointer-up cannot leave
//!   the layout stuck mid-drag.
//!
//! The store is passed in per call; the controller never owns or copies
//! layout state beyond the last proposed width.

use duopane_layout::{ContainerBounds, LayoutState, PartialLayoutState, drag_proposal};

use crate::applier::VisualApplier;
use crate::storage::StorageChannel;
use crate::store::{LayoutStore, SetStateOptions};

/// Mouse/pen/touch button that produced a pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
    Other(i16),
}

impl PointerButton {
    /// Map a DOM `PointerEvent.button` index. Touch contacts report `0`.
    #[must_use]
    pub const fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// Host command for browser pointer capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerCaptureCommand {
    Acquire { pointer_id: u32 },
    Release { pointer_id: u32 },
}

/// Lifecycle signal that produced a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    LostPointerCapture,
    Blur,
    VisibilityHidden,
}

impl DragPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PointerDown => "pointer_down",
            Self::PointerMove => "pointer_move",
            Self::PointerUp => "pointer_up",
            Self::PointerCancel => "pointer_cancel",
            Self::LostPointerCapture => "lost_pointer_capture",
            Self::Blur => "blur",
            Self::VisibilityHidden => "visibility_hidden",
        }
    }
}

/// Why a lifecycle signal was dropped without touching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragIgnoredReason {
    ButtonNotAllowed,
    /// The resize handle is not shown because a pane is hidden.
    HandleHidden,
    DegenerateContainer,
    NoActiveDrag,
    PointerMismatch,
    NonFinitePosition,
}

/// What a dispatch did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    Started,
    /// A pointer-down replaced a session whose end signal never arrived.
    Restarted,
    /// Transient proposal applied; `width` is the clamped primary width.
    Proposed { width: f64 },
    /// Gesture ended and the state was committed with persistence.
    Committed,
    Ignored(DragIgnoredReason),
}

/// Structured record of one controller dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragDispatch {
    pub phase: DragPhase,
    /// Monotonic sequence for accepted signals; `None` when ignored.
    pub sequence: Option<u64>,
    pub pointer_id: Option<u32>,
    pub outcome: DragOutcome,
    /// State the store holds after a proposal or commit.
    pub state: Option<LayoutState>,
    pub capture_command: Option<PointerCaptureCommand>,
}

impl DragDispatch {
    fn ignored(phase: DragPhase, reason: DragIgnoredReason, pointer_id: Option<u32>) -> Self {
        Self {
            phase,
            sequence: None,
            pointer_id,
            outcome: DragOutcome::Ignored(reason),
            state: None,
            capture_command: None,
        }
    }

    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self.outcome, DragOutcome::Ignored(_))
    }
}

/// Ephemeral state of one active gesture. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pointer_id: u32,
    bounds: ContainerBounds,
    last_proposed_width: Option<f64>,
}

impl DragSession {
    #[must_use]
    pub const fn pointer_id(&self) -> u32 {
        self.pointer_id
    }

    /// Container geometry captured at gesture start.
    #[must_use]
    pub const fn bounds(&self) -> ContainerBounds {
        self.bounds
    }

    #[must_use]
    pub const fn last_proposed_width(&self) -> Option<f64> {
        self.last_proposed_width
    }
}

/// Drives one resize gesture at a time against a [`LayoutStore`].
#[derive(Debug, Clone, Default)]
pub struct DragController {
    active: Option<DragSession>,
    next_sequence: u64,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        self.active.as_ref()
    }

    /// Begin a gesture on the resize handle.
    ///
    /// `container_left`/`container_width` are the container's bounding box in
    /// client coordinates at the moment of the press.
    pub fn pointer_down<S: StorageChannel, A: VisualApplier>(
        &mut self,
        store: &mut LayoutStore<S, A>,
        pointer_id: u32,
        button: PointerButton,
        container_left: f64,
        container_width: f64,
    ) -> DragDispatch {
        let phase = DragPhase::PointerDown;
        if button != PointerButton::Primary {
            return DragDispatch::ignored(
                phase,
                DragIgnoredReason::ButtonNotAllowed,
                Some(pointer_id),
            );
        }
        if !store.state().both_visible() {
            return DragDispatch::ignored(phase, DragIgnoredReason::HandleHidden, Some(pointer_id));
        }
        let Some(bounds) = ContainerBounds::new(container_left, container_width) else {
            return DragDispatch::ignored(
                phase,
                DragIgnoredReason::DegenerateContainer,
                Some(pointer_id),
            );
        };

        let stale = self.active.replace(DragSession {
            pointer_id,
            bounds,
            last_proposed_width: None,
        });
        let outcome = match stale {
            Some(previous) => {
                tracing::debug!(
                    target: "duopane.drag",
                    stale_pointer_id = previous.pointer_id,
                    pointer_id,
                    "drag restarted over stale session"
                );
                DragOutcome::Restarted
            }
            None => {
                store.set_drag_feedback(true);
                tracing::debug!(
                    target: "duopane.drag",
                    pointer_id,
                    container_width,
                    "drag started"
                );
                DragOutcome::Started
            }
        };
        self.accepted(
            phase,
            pointer_id,
            outcome,
            None,
            Some(PointerCaptureCommand::Acquire { pointer_id }),
        )
    }

    /// Apply a transient proposal for the pointer at `client_x`.
    pub fn pointer_move<S: StorageChannel, A: VisualApplier>(
        &mut self,
        store: &mut LayoutStore<S, A>,
        pointer_id: u32,
        client_x: f64,
    ) -> DragDispatch {
        let phase = DragPhase::PointerMove;
        let Some(session) = self.active.as_mut() else {
            return DragDispatch::ignored(phase, DragIgnoredReason::NoActiveDrag, Some(pointer_id));
        };
        if session.pointer_id != pointer_id {
            return DragDispatch::ignored(
                phase,
                DragIgnoredReason::PointerMismatch,
                Some(pointer_id),
            );
        }
        let Some(raw) = session.bounds.percentage_at(client_x) else {
            return DragDispatch::ignored(
                phase,
                DragIgnoredReason::NonFinitePosition,
                Some(pointer_id),
            );
        };

        let proposal = drag_proposal(raw, store.config());
        let width = proposal.pane_a.width;
        session.last_proposed_width = Some(width);
        let state = store.set_state(
            &PartialLayoutState::from(proposal),
            SetStateOptions::TRANSIENT,
        );
        tracing::trace!(target: "duopane.drag", pointer_id, raw, width, "drag proposal");
        self.accepted(
            phase,
            pointer_id,
            DragOutcome::Proposed { width },
            Some(state),
            None,
        )
    }

    /// End the gesture normally and commit.
    pub fn pointer_up<S: StorageChannel, A: VisualApplier>(
        &mut self,
        store: &mut LayoutStore<S, A>,
        pointer_id: u32,
    ) -> DragDispatch {
        self.finish(store, DragPhase::PointerUp, Some(pointer_id))
    }

    /// Browser `pointercancel`: treated as an end signal.
    pub fn pointer_cancel<S: StorageChannel, A: VisualApplier>(
        &mut self,
        store: &mut LayoutStore<S, A>,
        pointer_id: u32,
    ) -> DragDispatch {
        self.finish(store, DragPhase::PointerCancel, Some(pointer_id))
    }

    /// Browser `lostpointercapture`: treated as an end signal.
    pub fn lost_pointer_capture<S: StorageChannel, A: VisualApplier>(
        &mut self,
        store: &mut LayoutStore<S, A>,
        pointer_id: u32,
    ) -> DragDispatch {
        self.finish(store, DragPhase::LostPointerCapture, Some(pointer_id))
    }

    /// Window lost focus mid-gesture.
    pub fn blur<S: StorageChannel, A: VisualApplier>(
        &mut self,
        store: &mut LayoutStore<S, A>,
    ) -> DragDispatch {
        self.finish(store, DragPhase::Blur, None)
    }

    /// Document became hidden mid-gesture.
    pub fn visibility_hidden<S: StorageChannel, A: VisualApplier>(
        &mut self,
        store: &mut LayoutStore<S, A>,
    ) -> DragDispatch {
        self.finish(store, DragPhase::VisibilityHidden, None)
    }

    fn finish<S: StorageChannel, A: VisualApplier>(
        &mut self,
        store: &mut LayoutStore<S, A>,
        phase: DragPhase,
        pointer_id: Option<u32>,
    ) -> DragDispatch {
        let Some(session) = self.active else {
            return DragDispatch::ignored(phase, DragIgnoredReason::NoActiveDrag, pointer_id);
        };
        if let Some(id) = pointer_id
            && id != session.pointer_id
        {
            return DragDispatch::ignored(phase, DragIgnoredReason::PointerMismatch, Some(id));
        }

        self.active = None;
        store.set_drag_feedback(false);
        let current = store.state();
        let state = store.set_state(&PartialLayoutState::from(current), SetStateOptions::PERSIST);
        tracing::debug!(
            target: "duopane.drag",
            pointer_id = session.pointer_id,
            phase = phase.as_str(),
            width = state.pane_a.width,
            moved = session.last_proposed_width.is_some(),
            "drag committed"
        );
        self.accepted(
            phase,
            session.pointer_id,
            DragOutcome::Committed,
            Some(state),
            Some(PointerCaptureCommand::Release {
                pointer_id: session.pointer_id,
            }),
        )
    }

    fn accepted(
        &mut self,
        phase: DragPhase,
        pointer_id: u32,
        outcome: DragOutcome,
        state: Option<LayoutState>,
        capture_command: Option<PointerCaptureCommand>,
    ) -> DragDispatch {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        DragDispatch {
            phase,
            sequence: Some(sequence),
            pointer_id: Some(pointer_id),
            outcome,
            state,
            capture_command,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applier::NullApplier;
    use crate::storage::MemoryStorage;
    use duopane_layout::{LayoutConfig, PaneId, PanePatch};

    type TestStore = LayoutStore<MemoryStorage, NullApplier>;

    fn store() -> TestStore {
        LayoutStore::new(
            LayoutConfig::default().with_storage(true),
            MemoryStorage::new(),
            NullApplier,
        )
    }

    fn start(controller: &mut DragController, store: &mut TestStore, pointer_id: u32) -> DragDispatch {
        controller.pointer_down(store, pointer_id, PointerButton::Primary, 0.0, 1000.0)
    }

    #[test]
    fn pointer_down_requests_capture() {
        let mut store = store();
        let mut controller = DragController::new();
        let dispatch = start(&mut controller, &mut store, 7);
        assert_eq!(dispatch.outcome, DragOutcome::Started);
        assert_eq!(
            dispatch.capture_command,
            Some(PointerCaptureCommand::Acquire { pointer_id: 7 })
        );
        assert_eq!(controller.session().map(DragSession::pointer_id), Some(7));
    }

    #[test]
    fn pointer_id_zero_drags_and_secondary_button_is_refused() {
        let mut store = store();
        let mut controller = DragController::new();
        let dispatch =
            controller.pointer_down(&mut store, 3, PointerButton::Secondary, 0.0, 1000.0);
        assert_eq!(
            dispatch.outcome,
            DragOutcome::Ignored(DragIgnoredReason::ButtonNotAllowed)
        );
        assert!(!controller.is_dragging());

        let dispatch = controller.pointer_down(&mut store, 0, PointerButton::Primary, 0.0, 1000.0);
        assert_eq!(dispatch.outcome, DragOutcome::Started);
        assert_eq!(
            dispatch.capture_command,
            Some(PointerCaptureCommand::Acquire { pointer_id: 0 })
        );
        let dispatch = controller.pointer_move(&mut store, 0, 300.0);
        assert!(!dispatch.is_ignored());
        assert_eq!(store.state().pane_a.width, 30.0);
        assert_eq!(store.state().pane_b.width, 70.0);
        let dispatch = controller.pointer_up(&mut store, 0);
        assert_eq!(dispatch.outcome, DragOutcome::Committed);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn degenerate_container_is_ignored() {
        let mut store = store();
        let mut controller = DragController::new();
        let dispatch = controller.pointer_down(&mut store, 1, PointerButton::Primary, 0.0, 0.0);
        assert_eq!(
            dispatch.outcome,
            DragOutcome::Ignored(DragIgnoredReason::DegenerateContainer)
        );
    }

    #[test]
    fn hidden_handle_refuses_drag() {
        let mut store = store();
        store.set_state(
            &PartialLayoutState::new().with(PaneId::Auxiliary, PanePatch::new().with_visible(false)),
            SetStateOptions::TRANSIENT,
        );
        let mut controller = DragController::new();
        assert_eq!(
            start(&mut controller, &mut store, 1).outcome,
            DragOutcome::Ignored(DragIgnoredReason::HandleHidden)
        );
    }

    #[test]
    fn move_from_other_pointer_is_ignored() {
        let mut store = store();
        let mut controller = DragController::new();
        start(&mut controller, &mut store, 5);
        let before = store.state();
        let dispatch = controller.pointer_move(&mut store, 6, 300.0);
        assert_eq!(
            dispatch.outcome,
            DragOutcome::Ignored(DragIgnoredReason::PointerMismatch)
        );
        assert_eq!(dispatch.sequence, None);
        assert_eq!(store.state(), before);
    }

    #[test]
    fn move_proposes_clamped_pair_without_persisting() {
        let mut store = store();
        let mut controller = DragController::new();
        start(&mut controller, &mut store, 1);
        let dispatch = controller.pointer_move(&mut store, 1, 960.0);
        assert_eq!(dispatch.outcome, DragOutcome::Proposed { width: 90.0 });
        let state = dispatch.state.expect("proposal state");
        assert_eq!(state.pane_a.width, 90.0);
        assert_eq!(state.pane_b.width, 10.0);
        assert_eq!(store.storage().write_count(), 0);
    }

    #[test]
    fn blur_commits_and_releases_capture() {
        let mut store = store();
        let mut controller = DragController::new();
        start(&mut controller, &mut store, 9);
        controller.pointer_move(&mut store, 9, 700.0);
        let dispatch = controller.blur(&mut store);
        assert_eq!(dispatch.outcome, DragOutcome::Committed);
        assert_eq!(
            dispatch.capture_command,
            Some(PointerCaptureCommand::Release { pointer_id: 9 })
        );
        assert!(!controller.is_dragging());
        assert_eq!(store.storage().write_count(), 1);
    }

    #[test]
    fn stale_session_restarts_on_new_press() {
        let mut store = store();
        let mut controller = DragController::new();
        start(&mut controller, &mut store, 1);
        let dispatch = start(&mut controller, &mut store, 2);
        assert_eq!(dispatch.outcome, DragOutcome::Restarted);
        assert_eq!(
            controller.pointer_up(&mut store, 1).outcome,
            DragOutcome::Ignored(DragIgnoredReason::PointerMismatch)
        );
        assert_eq!(controller.pointer_up(&mut store, 2).outcome, DragOutcome::Committed);
        assert_eq!(store.storage().write_count(), 1);
    }

    #[test]
    fn sequence_counts_accepted_signals_only() {
        let mut store = store();
        let mut controller = DragController::new();
        assert_eq!(controller.pointer_up(&mut store, 1).sequence, None);
        assert_eq!(start(&mut controller, &mut store, 1).sequence, Some(0));
        assert_eq!(controller.pointer_move(&mut store, 1, 400.0).sequence, Some(1));
        assert_eq!(controller.pointer_up(&mut store, 1).sequence, Some(2));
    }
}
