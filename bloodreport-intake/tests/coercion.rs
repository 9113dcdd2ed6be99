use bloodreport_core::{AnalysisConfig, CoercionMode, Gender, Parameter, ReportError, Status};
use bloodreport_intake::{
    analyze_submission_value, coerce_measurement, parse_float_prefix, sample_from_value,
};
use serde_json::{json, Value};

fn healthy_submission() -> Value {
    json!({
        "name": "  Sam Lee ",
        "age": "35",
        "gender": "Other",
        "testDate": "2024-05-20",
        "hemoglobin": "13.75",
        "wbcCount": "7500",
        "rbcCount": "5",
        "platelets": "300000",
        "hematocrit": "41",
        "mcv": "90",
        "mch": "29.5",
        "mchc": "34"
    })
}

fn strict() -> AnalysisConfig {
    AnalysisConfig {
        coercion: CoercionMode::Strict,
        ..AnalysisConfig::default()
    }
}

#[test]
fn float_prefix_follows_browser_parsing() {
    assert_eq!(parse_float_prefix("12.5"), Some(12.5));
    assert_eq!(parse_float_prefix("  7"), Some(7.0));
    assert_eq!(parse_float_prefix("12.5g/dL"), Some(12.5));
    assert_eq!(parse_float_prefix(".5"), Some(0.5));
    assert_eq!(parse_float_prefix("-3"), Some(-3.0));
    assert_eq!(parse_float_prefix("1e3"), Some(1000.0));
    assert_eq!(parse_float_prefix("4e"), Some(4.0));
    assert_eq!(parse_float_prefix("abc"), None);
    assert_eq!(parse_float_prefix(""), None);
    assert_eq!(parse_float_prefix("."), None);
    assert_eq!(parse_float_prefix("Infinity"), Some(f64::INFINITY));
}

#[test]
fn lenient_mode_reads_form_text() {
    let sample = sample_from_value(&healthy_submission(), &AnalysisConfig::default())
        .expect("valid submission");

    assert_eq!(sample.name, "Sam Lee");
    assert_eq!(sample.age, 35);
    assert_eq!(sample.gender, Gender::Other);
    assert_eq!(
        sample.test_date.map(|date| date.to_string()).as_deref(),
        Some("2024-05-20")
    );
    assert_eq!(sample.hemoglobin, 13.75);
    assert_eq!(sample.platelets, 300_000.0);
}

// Lenient coercion is lossy: blank and garbage input both read as a measured 0,
// so the report flags them as low instead of missing.
#[test]
fn lenient_coercion_cannot_distinguish_blank_from_zero() {
    let mut submission = healthy_submission();
    submission["hemoglobin"] = json!("");
    submission["mcv"] = json!("not a number");
    submission["mch"] = json!("0");
    submission
        .as_object_mut()
        .expect("object")
        .remove("mchc");

    let report = analyze_submission_value(&submission, &AnalysisConfig::default())
        .expect("lenient mode accepts anything");

    for index in [0, 5, 6, 7] {
        assert_eq!(report.results[index].value, 0.0);
        assert_eq!(report.results[index].status, Status::Low);
    }
    assert_eq!(report.abnormal_count, 4);
}

#[test]
fn lenient_mode_defaults_age_and_gender() {
    let mut submission = healthy_submission();
    submission["age"] = json!("forty");
    submission["gender"] = json!("unknown");

    let sample = sample_from_value(&submission, &AnalysisConfig::default())
        .expect("lenient mode accepts anything");
    assert_eq!(sample.age, 0);
    assert_eq!(sample.gender, Gender::Other);
}

#[test]
fn strict_mode_rejects_blank_measurement() {
    let mut submission = healthy_submission();
    submission["wbcCount"] = json!("");

    let err = sample_from_value(&submission, &strict()).expect_err("blank must be rejected");
    assert_eq!(
        err,
        ReportError::InvalidMeasurement {
            field: "wbcCount",
            input: String::new(),
        }
    );
}

#[test]
fn strict_mode_rejects_negative_and_trailing_text() {
    assert!(coerce_measurement(Parameter::Mcv, "-1", CoercionMode::Strict).is_err());
    assert!(coerce_measurement(Parameter::Mcv, "90fL", CoercionMode::Strict).is_err());
    assert_eq!(
        coerce_measurement(Parameter::Mcv, " 90 ", CoercionMode::Strict),
        Ok(90.0)
    );
    assert_eq!(
        coerce_measurement(Parameter::Mcv, "90fL", CoercionMode::Lenient),
        Ok(90.0)
    );
}

#[test]
fn strict_mode_checks_age_and_gender() {
    let mut submission = healthy_submission();
    submission["age"] = json!("-4");
    assert_eq!(
        sample_from_value(&submission, &strict()),
        Err(ReportError::InvalidAge("-4".to_string()))
    );

    let mut submission = healthy_submission();
    submission["gender"] = json!("x");
    assert_eq!(
        sample_from_value(&submission, &strict()),
        Err(ReportError::InvalidGender("x".to_string()))
    );
}

#[test]
fn strict_mode_accepts_clean_submission() {
    let report = analyze_submission_value(&healthy_submission(), &strict())
        .expect("clean submission");
    assert!(!report.needs_attention());
}

#[test]
fn lenient_mode_reports_without_a_readable_date() {
    let mut submission = healthy_submission();
    submission["testDate"] = json!("15/03/2024");

    let report = analyze_submission_value(&submission, &AnalysisConfig::default())
        .expect("lenient mode still renders a report");
    assert_eq!(report.patient.test_date, None);
    assert_eq!(report.results.len(), 8);

    submission
        .as_object_mut()
        .expect("object")
        .remove("testDate");
    let sample = sample_from_value(&submission, &AnalysisConfig::default())
        .expect("missing date is tolerated");
    assert_eq!(sample.test_date, None);
}

#[test]
fn strict_mode_requires_a_test_date() {
    let mut submission = healthy_submission();
    submission["testDate"] = json!("15/03/2024");

    assert_eq!(
        sample_from_value(&submission, &strict()),
        Err(ReportError::InvalidDate("15/03/2024".to_string()))
    );
}

#[test]
fn lenient_mode_zeroes_non_finite_measurements() {
    for raw in ["1e400", "Infinity", "-Infinity"] {
        assert_eq!(
            coerce_measurement(Parameter::Hemoglobin, raw, CoercionMode::Lenient),
            Ok(0.0),
            "{raw} should read as 0"
        );
    }

    let negative_zero = coerce_measurement(Parameter::Hemoglobin, "-0", CoercionMode::Lenient)
        .expect("lenient never fails");
    assert_eq!(negative_zero, 0.0);
    assert!(negative_zero.is_sign_positive());
}

#[test]
fn strict_mode_rejects_non_finite_measurements() {
    for raw in ["1e400", "Infinity", "NaN"] {
        assert!(coerce_measurement(Parameter::Mch, raw, CoercionMode::Strict).is_err());
    }
}

#[test]
fn non_object_submission_is_missing_data() {
    assert_eq!(
        sample_from_value(&json!([1, 2, 3]), &AnalysisConfig::default()),
        Err(ReportError::MissingData)
    );
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = bloodreport_intake::analyze_submission_str("{", &AnalysisConfig::default())
        .expect_err("malformed json");
    assert!(matches!(err, ReportError::Parse(_)));
}
