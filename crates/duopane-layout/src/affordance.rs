//! Control affordances derived from layout state.
//!
//! Hosts render toggle/maximize indicators from these values; nothing here
//! holds state of its own.

use crate::config::LayoutConfig;
use crate::device::DeviceMode;
use crate::state::{LayoutState, PaneId};

/// What a pane's toggle control currently does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAffordance {
    Hide,
    Show,
}

impl ToggleAffordance {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hide => "Hide",
            Self::Show => "Show",
        }
    }
}

/// What a pane's maximize control currently does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaximizeAffordance {
    Maximize,
    Restore,
}

impl MaximizeAffordance {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Maximize => "Maximize",
            Self::Restore => "Restore",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneAffordance {
    pub toggle: ToggleAffordance,
    pub maximize: MaximizeAffordance,
}

/// Full set of control indicators for one state snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlAffordances {
    pub pane_a: PaneAffordance,
    pub pane_b: PaneAffordance,
    /// Whether the "open auxiliary pane" button is offered.
    pub show_auxiliary_button: bool,
    /// Whether the resize handle is shown.
    pub resizer_visible: bool,
}

impl ControlAffordances {
    #[must_use]
    pub fn derive(state: &LayoutState, config: &LayoutConfig, mode: DeviceMode) -> Self {
        let pane = |id: PaneId| PaneAffordance {
            toggle: if state.pane(id).visible {
                ToggleAffordance::Hide
            } else {
                ToggleAffordance::Show
            },
            maximize: if state.is_maximized(id, config.maximize_threshold) {
                MaximizeAffordance::Restore
            } else {
                MaximizeAffordance::Maximize
            },
        };
        Self {
            pane_a: pane(PaneId::Primary),
            pane_b: pane(PaneId::Auxiliary),
            show_auxiliary_button: mode == DeviceMode::Desktop && !state.pane_b.visible,
            resizer_visible: state.both_visible(),
        }
    }

    #[must_use]
    pub const fn pane(&self, id: PaneId) -> &PaneAffordance {
        match id {
            PaneId::Primary => &self.pane_a,
            PaneId::Auxiliary => &self.pane_b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PaneState;

    #[test]
    fn default_state_offers_hide_and_maximize() {
        let affordances = ControlAffordances::derive(
            &LayoutState::default(),
            &LayoutConfig::default(),
            DeviceMode::Desktop,
        );
        for id in PaneId::ALL {
            assert_eq!(affordances.pane(id).toggle, ToggleAffordance::Hide);
            assert_eq!(affordances.pane(id).maximize, MaximizeAffordance::Maximize);
        }
        assert!(!affordances.show_auxiliary_button);
        assert!(affordances.resizer_visible);
    }

    #[test]
    fn maximized_primary_offers_restore() {
        let state = LayoutState::new(PaneState::new(100.0, true), PaneState::new(0.0, false));
        let affordances =
            ControlAffordances::derive(&state, &LayoutConfig::default(), DeviceMode::Desktop);
        assert_eq!(affordances.pane_a.maximize, MaximizeAffordance::Restore);
        assert_eq!(affordances.pane_b.toggle, ToggleAffordance::Show);
        assert!(affordances.show_auxiliary_button);
        assert!(!affordances.resizer_visible);
    }

    #[test]
    fn mobile_never_offers_auxiliary_button() {
        let state = LayoutState::new(PaneState::new(100.0, true), PaneState::new(40.0, false));
        let affordances =
            ControlAffordances::derive(&state, &LayoutConfig::default(), DeviceMode::Mobile);
        assert!(!affordances.show_auxiliary_button);
    }
}
