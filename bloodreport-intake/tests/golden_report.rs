use std::path::Path;

use bloodreport_core::{AnalysisConfig, BloodReport};
use bloodreport_intake::analyze_submission_str;

fn read_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|err| panic!("cannot read {path:?}: {err}"))
}

#[test]
fn anemic_submission_matches_golden() {
    let submission = read_fixture("anemic_submission.json");
    let mut report = analyze_submission_str(&submission, &AnalysisConfig::default())
        .expect("could not build report");

    let expected: BloodReport =
        serde_json::from_str(&read_fixture("anemic_report.json")).expect("invalid golden report");

    // The clock is the only input the fixture cannot pin.
    assert!(report.generated_at >= expected.generated_at);
    report.generated_at = expected.generated_at;

    assert_eq!(report, expected);
}
