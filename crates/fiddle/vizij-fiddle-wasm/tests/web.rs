//! Test suite for the Web and headless browsers.
#![cfg(target_arch = "wasm32")]
extern crate wasm_bindgen_test;
use js_sys::Function;
use vizij_fiddle_wasm::{WasmFiddle, WasmPlayerPool};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const TWO_SECTIONS: &str = "// snippet A\ncircle();\n// snippet B\nsquare();";

fn accept_all() -> Function {
    Function::new_with_args("source", "return null;")
}

#[wasm_bindgen_test]
fn pass() {
    assert_eq!(1 + 1, 2);
}

#[wasm_bindgen_test]
fn test_mount_exposes_snippets_and_player() {
    let mut pool = WasmPlayerPool::new(Some(2));
    let mut fiddle = WasmFiddle::new(TWO_SECTIONS, "surface-1", accept_all(), None, None);

    fiddle.mount(&mut pool);

    assert!(fiddle.has_player());
    assert!(!fiddle.is_paused());
    assert_eq!(
        fiddle.snippet_names(),
        vec!["A".to_string(), "B".to_string()]
    );
    assert!(fiddle.error_message().is_none());
    assert_eq!(pool.player_count(), 1);
}

#[wasm_bindgen_test]
fn test_compile_error_surfaces_js_message() {
    let reject = Function::new_with_args(
        "source",
        "return source.includes('!!') ? 'Unexpected token (1:1)' : null;",
    );
    let mut pool = WasmPlayerPool::new(None);
    let mut fiddle = WasmFiddle::new(TWO_SECTIONS, "surface-2", reject, None, None);

    fiddle.mount(&mut pool);
    assert!(fiddle.error_message().is_none());

    fiddle.on_edit("circle();!!");
    fiddle.update(&mut pool);
    assert_eq!(
        fiddle.error_message().as_deref(),
        Some("Unexpected token (1:1)")
    );

    // Editing again clears the error until the next compile.
    fiddle.on_edit("circle();");
    assert!(fiddle.error_message().is_none());
}

#[wasm_bindgen_test]
fn test_error_object_message_is_extracted() {
    let reject = Function::new_with_args("source", "return {message: 'boom'};");
    let mut pool = WasmPlayerPool::new(None);
    let mut fiddle = WasmFiddle::new(TWO_SECTIONS, "surface-3", reject, None, None);

    fiddle.update(&mut pool);
    assert_eq!(fiddle.error_message().as_deref(), Some("boom"));
}

#[wasm_bindgen_test]
fn test_transport_follows_reported_duration() {
    let mut pool = WasmPlayerPool::new(None);
    let mut fiddle = WasmFiddle::new(
        TWO_SECTIONS,
        "surface-4",
        accept_all(),
        Some("code".to_string()),
        Some("16/9".to_string()),
    );

    fiddle.mount(&mut pool);
    assert!(fiddle.is_paused());

    fiddle.report_duration(&mut pool, 10);
    fiddle.next_frame(&mut pool);
    fiddle.next_frame(&mut pool);
    assert!((fiddle.progress() - 0.2).abs() < f64::EPSILON);

    pool.advance(5);
    fiddle.pump(&mut pool);
    // Paused players do not advance.
    assert!((fiddle.progress() - 0.2).abs() < f64::EPSILON);
}

#[wasm_bindgen_test]
fn test_state_serializes_to_js() {
    let mut pool = WasmPlayerPool::new(None);
    let mut fiddle = WasmFiddle::new(TWO_SECTIONS, "surface-5", accept_all(), None, None);
    fiddle.mount(&mut pool);

    let state = fiddle.state().unwrap();
    let selected = js_sys::Reflect::get(&state, &"selected".into()).unwrap();
    assert_eq!(selected.as_f64(), Some(0.0));
    let has_player = js_sys::Reflect::get(&state, &"has_player".into()).unwrap();
    assert_eq!(has_player.as_bool(), Some(true));

    let json = fiddle.state_json().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["mode"], "split");
    assert_eq!(parsed["snippet_names"][1], "B");
}
