#![forbid(unsafe_code)]

//! Platform-independent pieces of the browser host.
//!
//! Selector/class conventions, the JSON shapes exchanged with JavaScript,
//! and the mapping from layout state to pane styles. No JS/WASM types here,
//! so everything is testable natively.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use duopane_layout::{LayoutConfig, LayoutState, PaneId, PanePatch, PartialLayoutState};
use duopane_runtime::{
    DragDispatch, DragIgnoredReason, DragOutcome, PointerCaptureCommand, SetStateOptions,
    StorageError,
};

/// Class added to a hidden pane.
pub const PANE_HIDDEN_CLASS: &str = "panel-hidden";
/// Class added to the resize handle while a pane is hidden.
pub const RESIZER_HIDDEN_CLASS: &str = "resizer-hidden";
/// Class that suppresses width transitions during a drag.
pub const NO_TRANSITION_CLASS: &str = "no-transition";
/// Class marking an active drag (resize cursor, no text selection).
pub const DRAGGING_CLASS: &str = "dragging";

/// CSS selectors for the elements the host touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DomSelectors {
    pub pane_a: String,
    pub pane_b: String,
    pub resizer: String,
    /// Element whose bounding box defines drag percentages.
    pub container: String,
    /// Buttons that re-open the auxiliary pane.
    pub auxiliary_button: String,
}

impl Default for DomSelectors {
    fn default() -> Self {
        Self {
            pane_a: "#pane1".into(),
            pane_b: "#pane2".into(),
            resizer: "#resizer".into(),
            container: "#panel-wrapper".into(),
            auxiliary_button: ".js-open-panel2-btn".into(),
        }
    }
}

impl DomSelectors {
    #[must_use]
    pub fn pane(&self, id: PaneId) -> &str {
        match id {
            PaneId::Primary => &self.pane_a,
            PaneId::Auxiliary => &self.pane_b,
        }
    }
}

/// Selector for controls declaring `data-intent` (and `data-pane`).
#[must_use]
pub fn control_selector(intent: &str, pane: Option<PaneId>) -> String {
    match pane {
        Some(pane) => format!(r#"[data-intent="{intent}"][data-pane="{pane}"]"#),
        None => format!(r#"[data-intent="{intent}"]"#),
    }
}

/// Options object accepted by the JS constructor.
///
/// ```json
/// { "config": { "enable_storage": true }, "selectors": { "paneA": "#left" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostOptions {
    pub config: LayoutConfig,
    pub selectors: DomSelectors,
}

impl HostOptions {
    /// Parse constructor options. Empty input means all defaults.
    pub fn from_json(json: &str) -> Result<Self, String> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let options: Self =
            serde_json::from_str(json).map_err(|e| format!("invalid layout options: {e}"))?;
        let errors = options.config.validate();
        if !errors.is_empty() {
            return Err(format!("invalid layout config: {}", errors.join("; ")));
        }
        Ok(options)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PanePatchWire {
    width: Option<f64>,
    visible: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialStateWire {
    #[serde(rename = "paneA", alias = "A")]
    pane_a: Option<PanePatchWire>,
    #[serde(rename = "paneB", alias = "B")]
    pane_b: Option<PanePatchWire>,
}

/// Decode a JS `setState` partial such as `{"paneB": {"visible": false}}`.
pub fn parse_partial_state(json: &str) -> Result<PartialLayoutState, serde_json::Error> {
    let wire: PartialStateWire = serde_json::from_str(json)?;
    let patch = |pane: PanePatchWire| PanePatch {
        width: pane.width,
        visible: pane.visible,
    };
    Ok(PartialLayoutState {
        pane_a: wire.pane_a.map(patch),
        pane_b: wire.pane_b.map(patch),
    })
}

/// `setState` options from JS; a missing flag means "persist".
#[must_use]
pub fn set_state_options(persist: Option<bool>) -> SetStateOptions {
    SetStateOptions {
        persist: persist.unwrap_or(true),
    }
}

/// Inline style for one pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneStyle {
    /// CSS `flex-basis` value, e.g. `"60%"`. Hidden panes get `"0%"`.
    pub flex_basis: String,
    pub hidden: bool,
}

/// Styles for both panes in layout order.
#[must_use]
pub fn pane_styles(state: &LayoutState) -> [PaneStyle; 2] {
    PaneId::ALL.map(|id| {
        let pane = state.pane(id);
        PaneStyle {
            flex_basis: format!("{}%", css_number(pane.effective_width())),
            hidden: !pane.visible,
        }
    })
}

/// Shortest decimal form, rounded to 1/1000 of a percent.
fn css_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let text = format!("{rounded:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// Convert a host `performance.now()` reading to a monotonic duration.
/// Negative or non-finite readings clamp to zero.
#[must_use]
pub fn host_time(now_ms: f64) -> Duration {
    if !now_ms.is_finite() || now_ms <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(now_ms / 1000.0).unwrap_or(Duration::MAX)
}

/// JSON-friendly view of a [`DragDispatch`] for the JS host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragDispatchView {
    pub phase: &'static str,
    pub sequence: Option<u64>,
    pub pointer_id: Option<u32>,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored_reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// `"acquire"` or `"release"`; the host calls set/releasePointerCapture.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture: Option<&'static str>,
}

impl From<&DragDispatch> for DragDispatchView {
    fn from(dispatch: &DragDispatch) -> Self {
        let (outcome, ignored_reason, width) = match dispatch.outcome {
            DragOutcome::Started => ("started", None, None),
            DragOutcome::Restarted => ("restarted", None, None),
            DragOutcome::Proposed { width } => ("proposed", None, Some(width)),
            DragOutcome::Committed => (
                "committed",
                None,
                dispatch.state.map(|state| state.pane_a.width),
            ),
            DragOutcome::Ignored(reason) => ("ignored", Some(ignored_reason_label(reason)), None),
        };
        Self {
            phase: dispatch.phase.as_str(),
            sequence: dispatch.sequence,
            pointer_id: dispatch.pointer_id,
            outcome,
            ignored_reason,
            width,
            capture: dispatch.capture_command.map(|command| match command {
                PointerCaptureCommand::Acquire { .. } => "acquire",
                PointerCaptureCommand::Release { .. } => "release",
            }),
        }
    }
}

/// Classify a failed `localStorage.setItem` by the thrown exception's `name`.
///
/// Only a quota failure becomes [`StorageError::QuotaExceeded`]; anything
/// else (`SecurityError` when storage access is denied, for one) is reported
/// as a backend error carrying `message`.
pub fn storage_write_error(
    name: Option<&str>,
    message: String,
    key: &str,
    bytes: usize,
) -> StorageError {
    match name {
        // Older Firefox builds throw the legacy name.
        Some("QuotaExceededError" | "NS_ERROR_DOM_QUOTA_REACHED") => StorageError::QuotaExceeded {
            key: key.to_owned(),
            bytes,
        },
        _ => StorageError::Backend(message),
    }
}

const fn ignored_reason_label(reason: DragIgnoredReason) -> &'static str {
    match reason {
        DragIgnoredReason::ButtonNotAllowed => "button_not_allowed",
        DragIgnoredReason::HandleHidden => "handle_hidden",
        DragIgnoredReason::DegenerateContainer => "degenerate_container",
        DragIgnoredReason::NoActiveDrag => "no_active_drag",
        DragIgnoredReason::PointerMismatch => "pointer_mismatch",
        DragIgnoredReason::NonFinitePosition => "non_finite_position",
    }
}
