//! Framework-neutral WASM <-> JavaScript bridge.

use bloodreport_core::{AnalysisConfig, BloodReport, BloodSample, ReportError, RULES};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

/// Analyze a raw form submission (`{ hemoglobin: "13.2", wbcCount: ..., testDate: ... }`).
#[wasm_bindgen]
pub fn analyze_submission(input: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let submission = from_value::<serde_json::Value>(input)
        .map_err(|err| JsValue::from_str(&format!("Could not read submission: {err}")))?;
    let cfg = read_config(config)?;

    let report = bloodreport_intake::analyze_submission_value(&submission, &cfg)
        .map_err(|err| JsValue::from_str(&format_report_error(err)))?;

    to_value(&report).map_err(|err| JsValue::from_str(&format!("Could not serialize report: {err}")))
}

/// Evaluate an already typed `BloodSample`.
#[wasm_bindgen]
pub fn evaluate_sample(sample: JsValue) -> Result<JsValue, JsValue> {
    let sample: BloodSample = from_value(sample)
        .map_err(|err| JsValue::from_str(&format!("Could not read sample: {err}")))?;

    to_value(&BloodReport::new(&sample))
        .map_err(|err| JsValue::from_str(&format!("Could not serialize report: {err}")))
}

/// The reference-range table, for rendering form hints.
#[wasm_bindgen]
pub fn reference_ranges() -> Result<JsValue, JsValue> {
    to_value(&RULES[..]).map_err(|err| JsValue::from_str(&format!("Could not serialize rules: {err}")))
}

fn read_config(config: Option<JsValue>) -> Result<AnalysisConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => from_value(js_cfg)
            .map_err(|err| JsValue::from_str(&format!("Could not read config: {err}"))),
        _ => Ok(AnalysisConfig::default()),
    }
}

fn format_report_error(err: ReportError) -> String {
    format!("Report error: {err}")
}
