//! Named layout intents and the inputs that produce them.
//!
//! Controls carry an explicit intent payload (`data-intent` / `data-pane`
//! attributes on the web host, key chords on keyboards) instead of having
//! the layout infer a target from markup structure.

use serde::{Deserialize, Serialize};

use crate::device::DeviceMode;
use crate::state::PaneId;

/// Options for re-showing the auxiliary pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowAuxiliaryOptions {
    /// Use the configured default width instead of the remembered one.
    /// Default: `false`.
    pub use_default_width: bool,
}

impl ShowAuxiliaryOptions {
    pub const REMEMBERED: Self = Self {
        use_default_width: false,
    };
    pub const DEFAULT_WIDTH: Self = Self {
        use_default_width: true,
    };
}

/// One atomic layout operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum LayoutIntent {
    TogglePane { pane: PaneId },
    MaximizePane { pane: PaneId },
    ShowAuxiliary { options: ShowAuxiliaryOptions },
    HideAuxiliary,
    /// Hide the auxiliary pane if visible, otherwise show it.
    ToggleAuxiliary,
    Reset,
    DeviceLayout { mode: DeviceMode },
}

impl LayoutIntent {
    /// Stable name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TogglePane { .. } => "toggle_pane",
            Self::MaximizePane { .. } => "maximize_pane",
            Self::ShowAuxiliary { .. } => "show_auxiliary",
            Self::HideAuxiliary => "hide_auxiliary",
            Self::ToggleAuxiliary => "toggle_auxiliary",
            Self::Reset => "reset",
            Self::DeviceLayout { .. } => "device_layout",
        }
    }

    /// Build an intent from a control's declared payload.
    ///
    /// `intent` is one of `toggle`, `maximize`, `show-auxiliary`,
    /// `show-auxiliary-default`, `hide-auxiliary`, `toggle-auxiliary`,
    /// `reset`. Pane-scoped intents require a parseable `pane`.
    #[must_use]
    pub fn from_control(intent: &str, pane: Option<&str>) -> Option<Self> {
        let target = || pane.and_then(|p| p.parse::<PaneId>().ok());
        match intent.trim() {
            "toggle" => target().map(|pane| Self::TogglePane { pane }),
            "maximize" => target().map(|pane| Self::MaximizePane { pane }),
            "show-auxiliary" => Some(Self::ShowAuxiliary {
                options: ShowAuxiliaryOptions::REMEMBERED,
            }),
            "show-auxiliary-default" => Some(Self::ShowAuxiliary {
                options: ShowAuxiliaryOptions::DEFAULT_WIDTH,
            }),
            "hide-auxiliary" => Some(Self::HideAuxiliary),
            "toggle-auxiliary" => Some(Self::ToggleAuxiliary),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

/// Keyboard chords bound to layout intents.
///
/// | Chord | Intent |
/// |-------|--------|
/// | `Ctrl+1` | toggle the auxiliary pane |
/// | `Ctrl+2` | hide the auxiliary pane |
/// | `Ctrl+0` | show the auxiliary pane |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutShortcut {
    ToggleAuxiliary,
    HideAuxiliary,
    ShowAuxiliary,
}

impl LayoutShortcut {
    /// Map a key press to a shortcut. Only Ctrl chords are bound.
    #[must_use]
    pub fn from_key(ctrl: bool, key: &str) -> Option<Self> {
        if !ctrl {
            return None;
        }
        match key {
            "1" => Some(Self::ToggleAuxiliary),
            "2" => Some(Self::HideAuxiliary),
            "0" => Some(Self::ShowAuxiliary),
            _ => None,
        }
    }

    #[must_use]
    pub const fn intent(self) -> LayoutIntent {
        match self {
            Self::ToggleAuxiliary => LayoutIntent::ToggleAuxiliary,
            Self::HideAuxiliary => LayoutIntent::HideAuxiliary,
            Self::ShowAuxiliary => LayoutIntent::ShowAuxiliary {
                options: ShowAuxiliaryOptions::REMEMBERED,
            },
        }
    }
}
