//! Browser tests for the wasm façade.
//!
//! Run:
//!   wasm-pack test --headless --firefox crates/duopane-web

#![cfg(target_arch = "wasm32")]

use duopane_runtime::StorageChannel;
use duopane_web::{DuoPaneLayout, LocalStorageChannel};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn local_storage_round_trips() {
    let mut channel = LocalStorageChannel::new();
    channel
        .set("duopaneWasmTest", r#"{"ok":true}"#)
        .expect("localStorage write");
    assert_eq!(
        channel.get("duopaneWasmTest").expect("localStorage read").as_deref(),
        Some(r#"{"ok":true}"#)
    );
}

#[wasm_bindgen_test]
fn facade_survives_missing_markup() {
    let mut layout = DuoPaneLayout::new(None).expect("default options");
    layout.start(1280.0);
    layout.toggle_pane("paneB");
    let exported = layout.export_state();
    assert!(exported.contains("\"visible\": false"));
    assert!(!layout.import_state("{}"));
    assert!(layout.import_state(&exported));
}

#[wasm_bindgen_test]
fn unknown_controls_are_reported() {
    let mut layout = DuoPaneLayout::new(None).expect("default options");
    layout.start(1280.0);
    assert!(!layout.control("explode", None));
    assert!(layout.control("maximize", Some("paneA".into())));
    assert!(layout.key_down(true, "0"));
    assert!(!layout.key_down(false, "0"));
}
