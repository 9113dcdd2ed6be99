use bloodreport_core::{evaluate, rule_for, BloodSample, Gender, Parameter, Status, RULES};
use chrono::NaiveDate;

fn midpoint_sample() -> BloodSample {
    BloodSample {
        name: "Jane Doe".to_string(),
        age: 42,
        gender: Gender::Female,
        test_date: NaiveDate::from_ymd_opt(2024, 3, 15),
        hemoglobin: 13.75,
        wbc_count: 7_500.0,
        rbc_count: 5.0,
        platelets: 300_000.0,
        hematocrit: 41.0,
        mcv: 90.0,
        mch: 29.5,
        mchc: 34.0,
    }
}

#[test]
fn rule_table_follows_parameter_order() {
    let order: Vec<Parameter> = RULES.iter().map(|rule| rule.parameter).collect();
    assert_eq!(order, Parameter::ALL.to_vec());
    for parameter in Parameter::ALL {
        assert_eq!(rule_for(parameter).parameter, parameter);
    }
}

#[test]
fn rule_bounds_are_ordered() {
    for rule in &RULES {
        assert!(rule.low <= rule.high, "{:?} has inverted bounds", rule.parameter);
    }
}

#[test]
fn low_hemoglobin_reads_as_anemia() {
    let sample = BloodSample {
        hemoglobin: 11.0,
        ..midpoint_sample()
    };
    let results = evaluate(&sample);
    let hemoglobin = &results[0];

    assert_eq!(hemoglobin.label, "Hemoglobin");
    assert_eq!(hemoglobin.unit, "g/dL");
    assert_eq!(hemoglobin.status, Status::Low);
    assert_eq!(hemoglobin.interpretation, "May indicate anemia");
    assert_eq!(hemoglobin.normal_range, "12.0-15.5");
}

#[test]
fn hemoglobin_inside_range_is_normal() {
    let sample = BloodSample {
        hemoglobin: 13.0,
        ..midpoint_sample()
    };
    let results = evaluate(&sample);
    assert_eq!(results[0].status, Status::Normal);
    assert_eq!(results[0].interpretation, "Within normal range");
}

#[test]
fn bounds_are_inclusive() {
    let sample = BloodSample {
        hemoglobin: 15.5,
        hematocrit: 36.0,
        ..midpoint_sample()
    };
    let results = evaluate(&sample);
    assert_eq!(results[0].status, Status::Normal);
    assert_eq!(results[4].parameter, Parameter::Hematocrit);
    assert_eq!(results[4].status, Status::Normal);
}

#[test]
fn high_values_pick_high_text() {
    let sample = BloodSample {
        mchc: 37.0,
        wbc_count: 12_000.0,
        ..midpoint_sample()
    };
    let results = evaluate(&sample);
    assert_eq!(results[1].status, Status::High);
    assert_eq!(results[1].interpretation, "May indicate infection or inflammation");
    assert_eq!(results[7].status, Status::High);
    assert_eq!(results[7].interpretation, "May indicate spherocytosis");
}

#[test]
fn midpoints_are_all_normal() {
    let results = evaluate(&midpoint_sample());
    assert_eq!(results.len(), 8);
    assert!(results.iter().all(|r| r.status == Status::Normal));
}

#[test]
fn zero_and_negative_values_are_classified_not_rejected() {
    let sample = BloodSample {
        hemoglobin: 0.0,
        platelets: -5.0,
        ..midpoint_sample()
    };
    let results = evaluate(&sample);
    assert_eq!(results.len(), 8);
    assert_eq!(results[0].status, Status::Low);
    assert_eq!(results[3].status, Status::Low);
    assert_eq!(results[3].value, -5.0);
}
