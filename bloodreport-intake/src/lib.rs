//! Form submission (JSON) to `BloodSample` / `BloodReport` conversion.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, warn};

use bloodreport_core::{
    AnalysisConfig, BloodReport, BloodSample, CoercionMode, Gender, Parameter, ReportError,
};

const NAME_KEY: &str = "name";
const AGE_KEY: &str = "age";
const GENDER_KEY: &str = "gender";
const TEST_DATE_KEY: &str = "testDate";

/// Build a report from a JSON form submission.
pub fn analyze_submission_str(
    submission_json: &str,
    config: &AnalysisConfig,
) -> Result<BloodReport, ReportError> {
    let value: Value = serde_json::from_str(submission_json)
        .map_err(|err| ReportError::Parse(err.to_string()))?;
    analyze_submission_value(&value, config)
}

/// Build a report from a `serde_json::Value` form submission.
pub fn analyze_submission_value(
    submission: &Value,
    config: &AnalysisConfig,
) -> Result<BloodReport, ReportError> {
    let sample = sample_from_value(submission, config)?;
    let report = BloodReport::new(&sample);
    debug!(
        abnormal = report.abnormal_count,
        recommendations = report.recommendations.len(),
        "analyzed blood sample"
    );
    Ok(report)
}

/// Coerce the raw form fields into a `BloodSample`.
///
/// Every field may be a JSON string (raw input text) or a JSON number. Missing
/// fields are treated as blank input.
pub fn sample_from_value(
    submission: &Value,
    config: &AnalysisConfig,
) -> Result<BloodSample, ReportError> {
    let fields = submission.as_object().ok_or(ReportError::MissingData)?;
    let text = |key: &str| fields.get(key).and_then(field_text);
    let mode = config.coercion;

    let test_date_raw = text(TEST_DATE_KEY).unwrap_or_default();
    let mut sample = BloodSample {
        name: text(NAME_KEY).unwrap_or_default().trim().to_string(),
        age: coerce_age(text(AGE_KEY).as_deref().unwrap_or_default(), mode)?,
        gender: coerce_gender(text(GENDER_KEY).as_deref().unwrap_or_default(), mode)?,
        test_date: coerce_test_date(&test_date_raw, mode)?,
        hemoglobin: 0.0,
        wbc_count: 0.0,
        rbc_count: 0.0,
        platelets: 0.0,
        hematocrit: 0.0,
        mcv: 0.0,
        mch: 0.0,
        mchc: 0.0,
    };

    for parameter in Parameter::ALL {
        let raw = text(parameter.form_key()).unwrap_or_default();
        *sample.measurement_mut(parameter) = coerce_measurement(parameter, &raw, mode)?;
    }

    Ok(sample)
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => Some(value.to_string()),
        Value::Null => None,
    }
}

/// Turn the text of one measurement input into a number.
///
/// Lenient mode keeps the browser behaviour: a blank or unreadable field reads
/// as 0, which is indistinguishable from a measured 0.
pub fn coerce_measurement(
    parameter: Parameter,
    raw: &str,
    mode: CoercionMode,
) -> Result<f64, ReportError> {
    match mode {
        CoercionMode::Lenient => {
            let value = parse_float_prefix(raw).filter(|v| v.is_finite());
            match value {
                Some(v) if v != 0.0 => Ok(v),
                Some(_) => Ok(0.0),
                None => {
                    if raw.trim().is_empty() {
                        debug!(field = parameter.form_key(), "blank measurement read as 0");
                    } else {
                        warn!(
                            field = parameter.form_key(),
                            input = raw,
                            "unparseable measurement coerced to 0"
                        );
                    }
                    Ok(0.0)
                }
            }
        }
        CoercionMode::Strict => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| ReportError::InvalidMeasurement {
                field: parameter.form_key(),
                input: raw.to_string(),
            }),
    }
}

fn coerce_age(raw: &str, mode: CoercionMode) -> Result<u32, ReportError> {
    match mode {
        CoercionMode::Lenient => Ok(parse_float_prefix(raw)
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.trunc() as u32)
            .unwrap_or(0)),
        CoercionMode::Strict => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ReportError::InvalidAge(raw.to_string())),
    }
}

fn coerce_gender(raw: &str, mode: CoercionMode) -> Result<Gender, ReportError> {
    match (Gender::from_form(raw), mode) {
        (Some(gender), _) => Ok(gender),
        (None, CoercionMode::Lenient) => Ok(Gender::Other),
        (None, CoercionMode::Strict) => Err(ReportError::InvalidGender(raw.to_string())),
    }
}

fn coerce_test_date(raw: &str, mode: CoercionMode) -> Result<Option<NaiveDate>, ReportError> {
    match (NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d"), mode) {
        (Ok(date), _) => Ok(Some(date)),
        (Err(_), CoercionMode::Lenient) => {
            warn!(input = raw, "unreadable test date left empty");
            Ok(None)
        }
        (Err(_), CoercionMode::Strict) => Err(ReportError::InvalidDate(raw.to_string())),
    }
}

/// Read the longest leading decimal number, ignoring leading whitespace and any
/// trailing text (`"12.5abc"` reads as 12.5, `"abc"` reads as nothing).
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if text[end..].starts_with("Infinity") {
        return text[..end + "Infinity".len()].parse().ok();
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse().ok()
}
