//! Browser-side tests: `wasm-pack test --headless --firefox crates/mdlisp-wasm`.

#![cfg(target_arch = "wasm32")]

use mdlisp_wasm::{run, run_with_config};
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

/// Partial config as a host would pass it; omitted fields keep defaults.
#[derive(Serialize)]
struct DepthOnly {
    max_call_depth: usize,
}

const LOOP: &str = "# loop\n* n\n* loop\n  * n\n\n# main\n* loop\n  * `0`";

#[wasm_bindgen_test]
fn run_prints_in_browser() {
    let json = run("# main\n* print\n  * *\n    * `6`\n    * `7`");
    assert!(json.contains("\"42\""));
}

#[wasm_bindgen_test]
fn config_object_limits_depth() {
    let config = serde_wasm_bindgen::to_value(&DepthOnly { max_call_depth: 8 }).unwrap();
    let json = run_with_config(LOOP, config).unwrap();
    assert!(json.contains("maximum call depth of 8"));
}

#[wasm_bindgen_test]
fn undefined_config_uses_defaults() {
    let json = run_with_config(LOOP, JsValue::UNDEFINED).unwrap();
    assert!(json.contains("maximum call depth of 10000"));
}

#[wasm_bindgen_test]
fn deep_recursion_fits_in_browser_stack() {
    let source = "# count\n* n\n* if\n  * n\n  * +\n    * `1`\n    * count\n      * -\n        * n\n        * `1`\n  * `0`\n\n# main\n* print\n  * count\n    * `5000`";
    let json = run(source);
    assert!(json.contains("\"5000\""));
}
