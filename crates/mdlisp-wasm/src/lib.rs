//! mdlisp interpreter as a WASM module for browser environments.
//!
//! This crate exposes the mdlisp pipeline via `wasm-bindgen`, for the
//! browser IDE's editor and console panes.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { parse, run } from 'mdlisp-wasm';
//!
//! await init();
//!
//! const result = JSON.parse(run("# main\n* print\n  * `\"hi\"`"));
//! // { success: true, output: ["hi", "--- Execution Finished ---"], ast: { ... }, ... }
//! ```

use mdlisp::{Diagnostics, EvalConfig, Program};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// JSON shape returned by [`parse`].
#[derive(Serialize)]
struct ParseOutput<'a> {
    ast: &'a Program,
    warnings: &'a Diagnostics,
}

/// Parse mdlisp source into its AST.
///
/// Returns a JSON string:
/// ```json
/// {
///   "ast": { "type": "PROGRAM", "children": [ ... ] },
///   "warnings": { "warnings": [], "total_warnings": 0 }
/// }
/// ```
#[wasm_bindgen]
pub fn parse(source: &str) -> String {
    let result = mdlisp::parse(source);
    let output = ParseOutput {
        ast: &result.program,
        warnings: &result.diagnostics,
    };
    serde_json::to_string(&output).unwrap_or_else(|e| {
        format!(
            r#"{{"ast":null,"warnings":{{"warnings":[{{"message":"Serialization error: {}"}}],"total_warnings":1}}}}"#,
            e
        )
    })
}

/// Run mdlisp source with default limits.
///
/// Returns a JSON string containing a `RunResult`: `success`, the `output`
/// lines (ending with the completion marker or an `Error:` line), the `ast`
/// on success, parser `warnings`, and the `source_hash`.
#[wasm_bindgen]
pub fn run(source: &str) -> String {
    to_json(&mdlisp::run_to_result(source))
}

/// Run mdlisp source with limits given as a JS object, e.g.
/// `{ gas_limit: 10000, max_call_depth: 64 }`. Missing fields keep their
/// defaults.
#[wasm_bindgen]
pub fn run_with_config(source: &str, config: JsValue) -> Result<String, JsValue> {
    let config: EvalConfig = if config.is_undefined() || config.is_null() {
        EvalConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    Ok(to_json(&mdlisp::run_to_result_with_config(source, config)))
}

/// Return the interpreter version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_json(result: &mdlisp::RunResult) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| {
        format!(
            r#"{{"success":false,"output":["Error: Serialization error: {}"],"ast":null,"source_hash":""}}"#,
            e
        )
    })
}
