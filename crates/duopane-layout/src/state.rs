//! Canonical two-pane layout state and its validation rules.
//!
//! [`LayoutState`] is the only authoritative layout entity. It is small and
//! `Copy`, so every read hands out an independent value and no caller can
//! mutate the store's copy in place.
//!
//! # Invariants
//!
//! 1. Every width is finite and lies in `[0, 100]`.
//! 2. At least one pane is visible after any merge.
//! 3. A hidden pane keeps its last width as restoration memory.
//!
//! Rebalancing (making a visible pair sum to 100) is the responsibility of
//! whoever computes the width pair; [`LayoutState::merged`] only enforces
//! the rules above.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing width sums.
pub const WIDTH_EPSILON: f64 = 1e-6;

/// Full container width in percent.
pub const FULL_WIDTH: f64 = 100.0;

/// Identifier for one of the two panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PaneId {
    /// The primary (left) pane.
    #[serde(rename = "paneA", alias = "A")]
    Primary,
    /// The auxiliary (right) pane.
    #[serde(rename = "paneB", alias = "B")]
    Auxiliary,
}

impl PaneId {
    /// Both panes in layout order.
    pub const ALL: [Self; 2] = [Self::Primary, Self::Auxiliary];

    /// The opposite pane.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Primary => Self::Auxiliary,
            Self::Auxiliary => Self::Primary,
        }
    }

    /// Wire name used in persisted snapshots.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "paneA",
            Self::Auxiliary => "paneB",
        }
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPaneId(pub String);

impl fmt::Display for UnknownPaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown pane id {:?}", self.0)
    }
}

impl std::error::Error for UnknownPaneId {}

impl FromStr for PaneId {
    type Err = UnknownPaneId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "paneA" | "A" | "a" | "pane1" | "panel1" | "primary" => Ok(Self::Primary),
            "paneB" | "B" | "b" | "pane2" | "panel2" | "auxiliary" => Ok(Self::Auxiliary),
            other => Err(UnknownPaneId(other.to_owned())),
        }
    }
}

/// Width and visibility of one pane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaneState {
    /// Percentage of the container width (0..=100).
    pub width: f64,
    /// Whether the pane participates in the visible layout.
    pub visible: bool,
}

impl PaneState {
    #[must_use]
    pub const fn new(width: f64, visible: bool) -> Self {
        Self { width, visible }
    }

    /// Width this pane contributes to the visible layout.
    #[must_use]
    pub fn effective_width(&self) -> f64 {
        if self.visible { self.width } else { 0.0 }
    }
}

/// Authoritative two-pane layout snapshot.
///
/// This is both the storage format and the export/import wire format:
///
/// ```json
/// { "paneA": { "width": 60.0, "visible": true },
///   "paneB": { "width": 40.0, "visible": true } }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutState {
    #[serde(rename = "paneA", alias = "A")]
    pub pane_a: PaneState,
    #[serde(rename = "paneB", alias = "B")]
    pub pane_b: PaneState,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            pane_a: PaneState::new(60.0, true),
            pane_b: PaneState::new(40.0, true),
        }
    }
}

impl LayoutState {
    #[must_use]
    pub const fn new(pane_a: PaneState, pane_b: PaneState) -> Self {
        Self { pane_a, pane_b }
    }

    /// Both panes visible with the primary pane at `primary_width`.
    #[must_use]
    pub fn split(primary_width: f64) -> Self {
        Self {
            pane_a: PaneState::new(primary_width, true),
            pane_b: PaneState::new(FULL_WIDTH - primary_width, true),
        }
    }

    #[must_use]
    pub const fn pane(&self, id: PaneId) -> &PaneState {
        match id {
            PaneId::Primary => &self.pane_a,
            PaneId::Auxiliary => &self.pane_b,
        }
    }

    pub fn pane_mut(&mut self, id: PaneId) -> &mut PaneState {
        match id {
            PaneId::Primary => &mut self.pane_a,
            PaneId::Auxiliary => &mut self.pane_b,
        }
    }

    #[must_use]
    pub const fn both_visible(&self) -> bool {
        self.pane_a.visible && self.pane_b.visible
    }

    /// Sum of widths that take part in the visible layout.
    #[must_use]
    pub fn visible_width_sum(&self) -> f64 {
        self.pane_a.effective_width() + self.pane_b.effective_width()
    }

    /// Whether `id` is at or past the maximize boundary.
    #[must_use]
    pub fn is_maximized(&self, id: PaneId, threshold: f64) -> bool {
        self.pane(id).width >= threshold
    }

    /// Structural check: both widths finite and inside `[0, 100]`.
    ///
    /// Visibility is a `bool` by construction, and missing keys are rejected
    /// while decoding, so this is the full structural rule set for a decoded
    /// candidate.
    pub fn validate(&self) -> Result<(), LayoutStateError> {
        for id in PaneId::ALL {
            let width = self.pane(id).width;
            if !width.is_finite() {
                return Err(LayoutStateError::NonFiniteWidth { pane: id });
            }
            if !(0.0..=FULL_WIDTH).contains(&width) {
                return Err(LayoutStateError::WidthOutOfRange { pane: id, width });
            }
        }
        Ok(())
    }

    /// Merge `partial` over `self` field by field.
    ///
    /// Finite widths are clamped into `[0, 100]`; a non-finite width rejects
    /// the whole merge, as does a result where neither pane is visible.
    pub fn merged(&self, partial: &PartialLayoutState) -> Result<Self, LayoutStateError> {
        let mut next = *self;
        for id in PaneId::ALL {
            let Some(patch) = partial.pane(id) else {
                continue;
            };
            let pane = next.pane_mut(id);
            if let Some(width) = patch.width {
                if !width.is_finite() {
                    return Err(LayoutStateError::NonFiniteWidth { pane: id });
                }
                pane.width = width.clamp(0.0, FULL_WIDTH);
            }
            if let Some(visible) = patch.visible {
                pane.visible = visible;
            }
        }
        if !next.pane_a.visible && !next.pane_b.visible {
            return Err(LayoutStateError::BothPanesHidden);
        }
        Ok(next)
    }

    /// Serialize to the canonical pretty-printed JSON snapshot.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(SnapshotError::Json)
    }

    /// Decode and validate a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let state: Self = serde_json::from_str(json).map_err(SnapshotError::Json)?;
        state.validate().map_err(SnapshotError::Invalid)?;
        Ok(state)
    }

    /// Approximate equality within [`WIDTH_EPSILON`].
    #[must_use]
    pub fn approx_eq(&self, other: &Self) -> bool {
        PaneId::ALL.iter().all(|&id| {
            let (a, b) = (self.pane(id), other.pane(id));
            a.visible == b.visible && (a.width - b.width).abs() <= WIDTH_EPSILON
        })
    }
}

/// Field-level update for one pane. `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PanePatch {
    pub width: Option<f64>,
    pub visible: Option<bool>,
}

impl PanePatch {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            width: None,
            visible: None,
        }
    }

    #[must_use]
    pub const fn full(width: f64, visible: bool) -> Self {
        Self {
            width: Some(width),
            visible: Some(visible),
        }
    }

    #[must_use]
    pub const fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }
}

impl From<PaneState> for PanePatch {
    fn from(pane: PaneState) -> Self {
        Self::full(pane.width, pane.visible)
    }
}

/// Partial update merged over the current [`LayoutState`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartialLayoutState {
    pub pane_a: Option<PanePatch>,
    pub pane_b: Option<PanePatch>,
}

impl PartialLayoutState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pane_a: None,
            pane_b: None,
        }
    }

    /// Set the patch for `id` (builder pattern).
    #[must_use]
    pub fn with(mut self, id: PaneId, patch: PanePatch) -> Self {
        match id {
            PaneId::Primary => self.pane_a = Some(patch),
            PaneId::Auxiliary => self.pane_b = Some(patch),
        }
        self
    }

    #[must_use]
    pub const fn pane(&self, id: PaneId) -> Option<&PanePatch> {
        match id {
            PaneId::Primary => self.pane_a.as_ref(),
            PaneId::Auxiliary => self.pane_b.as_ref(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pane_a.is_none() && self.pane_b.is_none()
    }
}

impl From<LayoutState> for PartialLayoutState {
    fn from(state: LayoutState) -> Self {
        Self {
            pane_a: Some(state.pane_a.into()),
            pane_b: Some(state.pane_b.into()),
        }
    }
}

/// Reasons a candidate layout state is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutStateError {
    /// Width is NaN or infinite.
    NonFiniteWidth { pane: PaneId },
    /// Width is outside `[0, 100]`.
    WidthOutOfRange { pane: PaneId, width: f64 },
    /// The merge would hide both panes.
    BothPanesHidden,
}

impl fmt::Display for LayoutStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteWidth { pane } => write!(f, "{pane} width is not a finite number"),
            Self::WidthOutOfRange { pane, width } => {
                write!(f, "{pane} width {width} is outside [0, 100]")
            }
            Self::BothPanesHidden => write!(f, "at least one pane must stay visible"),
        }
    }
}

impl std::error::Error for LayoutStateError {}

/// Errors decoding or encoding a layout snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    /// Malformed JSON or wrong shape.
    Json(serde_json::Error),
    /// Well-formed JSON that violates the layout rules.
    Invalid(LayoutStateError),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "layout snapshot JSON error: {e}"),
            Self::Invalid(e) => write!(f, "invalid layout snapshot: {e}"),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Invalid(e) => Some(e),
        }
    }
}
