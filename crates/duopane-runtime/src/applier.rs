//! Presentation hook driven by the store.
//!
//! A [`VisualApplier`] mirrors a [`LayoutState`] snapshot onto whatever the
//! host renders with. It never holds layout state of its own and never fails
//! loudly: a missing target is reported through the `bool` return so the
//! store can log it and carry on.

use duopane_layout::{ControlAffordances, LayoutState};

/// Presentation sink for layout snapshots.
pub trait VisualApplier {
    /// Mirror `state` onto the presentation. Returns `false` if any target
    /// was missing; the state transition itself is never undone.
    fn apply_visual_state(&mut self, state: &LayoutState) -> bool;

    /// Refresh toggle/maximize indicators.
    fn update_control_affordances(&mut self, affordances: &ControlAffordances);

    /// Enter (`true`) or leave (`false`) drag presentation: transitions and
    /// text selection suppressed, resize cursor shown.
    fn set_drag_feedback(&mut self, active: bool) {
        let _ = active;
    }
}

impl<A: VisualApplier + ?Sized> VisualApplier for Box<A> {
    fn apply_visual_state(&mut self, state: &LayoutState) -> bool {
        (**self).apply_visual_state(state)
    }

    fn update_control_affordances(&mut self, affordances: &ControlAffordances) {
        (**self).update_control_affordances(affordances);
    }

    fn set_drag_feedback(&mut self, active: bool) {
        (**self).set_drag_feedback(active);
    }
}

/// Applier for headless hosts. Renders nothing and always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullApplier;

impl VisualApplier for NullApplier {
    fn apply_visual_state(&mut self, _state: &LayoutState) -> bool {
        true
    }

    fn update_control_affordances(&mut self, _affordances: &ControlAffordances) {}
}
