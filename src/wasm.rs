//! WASM bindings for Numetrify Core.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { run, evaluate } from 'numetrify_core';
//!
//! await init();
//!
//! const report = JSON.parse(run(JSON.stringify({
//!   method: 'newton-raphson',
//!   function: 'x^3 - x - 2',
//!   initialGuess: 1.5,
//! })));
//!
//! evaluate('sin(x)^2', 0.5);
//! ```

use wasm_bindgen::prelude::*;

use crate::expr::{self, RealFunction};
use crate::request::Request;

fn to_js(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Run a JSON request and return the JSON report.
///
/// Invalid requests are thrown as strings; method failures are reported
/// in the report's `message`.
#[wasm_bindgen]
pub fn run(request_json: &str) -> Result<String, JsValue> {
    let request = Request::from_json(request_json).map_err(to_js)?;
    let report = request.run().map_err(to_js)?;
    serde_json::to_string(&report).map_err(to_js)
}

/// Evaluate an expression at a point.
#[wasm_bindgen]
pub fn evaluate(expression: &str, x: f64) -> Result<f64, JsValue> {
    let f = expr::parse(expression).map_err(to_js)?;
    Ok(f.evaluate(x))
}

/// Render the derivative of an expression.
#[wasm_bindgen]
pub fn derivative(expression: &str) -> Result<String, JsValue> {
    let f = expr::parse(expression).map_err(to_js)?;
    Ok(f.ast().derivative().to_string())
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
