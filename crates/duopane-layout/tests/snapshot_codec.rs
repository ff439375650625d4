//! Property checks for the persisted snapshot format.
//!
//! Export output must always be valid import input, and any width outside
//! `[0, 100]` must be rejected without touching the caller's state.

use duopane_layout::{LayoutState, PaneState, SnapshotError};
use proptest::prelude::*;

fn pane_strategy() -> impl Strategy<Value = PaneState> {
    (0.0f64..=100.0, any::<bool>()).prop_map(|(width, visible)| PaneState::new(width, visible))
}

proptest! {
    #[test]
    fn exported_snapshots_import_unchanged(a in pane_strategy(), b in pane_strategy()) {
        let state = LayoutState::new(a, b);
        let json = state.to_json().expect("valid state encodes");
        let decoded = LayoutState::from_json(&json).expect("exported snapshot decodes");
        prop_assert!(decoded.approx_eq(&state), "{decoded:?} != {state:?}");
    }

    #[test]
    fn out_of_range_widths_are_rejected(width in prop_oneof![-1e6f64..-1e-3, 100.001f64..1e6]) {
        let json = format!(
            r#"{{"paneA":{{"width":{width},"visible":true}},"paneB":{{"width":50,"visible":true}}}}"#
        );
        let result = LayoutState::from_json(&json);
        prop_assert!(matches!(result, Err(SnapshotError::Invalid(_))));
    }
}
