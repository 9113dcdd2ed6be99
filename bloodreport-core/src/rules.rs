use serde::Serialize;

use crate::{AnalysisResult, Parameter, Status};

const WITHIN_RANGE: &str = "Within normal range";

/// Reference range and canned interpretations for one parameter.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ParameterRule {
    pub parameter: Parameter,
    pub unit: &'static str,
    /// Lowest value still considered normal.
    pub low: f64,
    /// Highest value still considered normal.
    pub high: f64,
    pub normal_range: &'static str,
    pub low_text: &'static str,
    pub high_text: &'static str,
    pub normal_text: &'static str,
}

impl ParameterRule {
    /// Both bounds are inclusive of `Normal`.
    pub fn classify(&self, value: f64) -> Status {
        if value < self.low {
            Status::Low
        } else if value > self.high {
            Status::High
        } else {
            Status::Normal
        }
    }

    pub fn interpretation(&self, status: Status) -> &'static str {
        match status {
            Status::Low => self.low_text,
            Status::High => self.high_text,
            Status::Normal => self.normal_text,
        }
    }

    pub fn evaluate(&self, value: f64) -> AnalysisResult {
        let status = self.classify(value);
        AnalysisResult {
            parameter: self.parameter,
            label: self.parameter.label().to_string(),
            value,
            unit: self.unit.to_string(),
            status,
            normal_range: self.normal_range.to_string(),
            interpretation: self.interpretation(status).to_string(),
        }
    }
}

/// Rule table, indexed in `Parameter::ALL` order.
pub static RULES: [ParameterRule; 8] = [
    ParameterRule {
        parameter: Parameter::Hemoglobin,
        unit: "g/dL",
        low: 12.0,
        high: 15.5,
        normal_range: "12.0-15.5",
        low_text: "May indicate anemia",
        high_text: "May indicate dehydration or polycythemia",
        normal_text: WITHIN_RANGE,
    },
    ParameterRule {
        parameter: Parameter::WbcCount,
        unit: "/µL",
        low: 4_000.0,
        high: 11_000.0,
        normal_range: "4,000-11,000",
        low_text: "May indicate immune system issues",
        high_text: "May indicate infection or inflammation",
        normal_text: WITHIN_RANGE,
    },
    ParameterRule {
        parameter: Parameter::RbcCount,
        unit: "million/µL",
        low: 4.5,
        high: 5.5,
        normal_range: "4.5-5.5",
        low_text: "May indicate anemia",
        high_text: "May indicate dehydration",
        normal_text: WITHIN_RANGE,
    },
    ParameterRule {
        parameter: Parameter::Platelets,
        unit: "/µL",
        low: 150_000.0,
        high: 450_000.0,
        normal_range: "150,000-450,000",
        low_text: "May affect blood clotting",
        high_text: "May increase clotting risk",
        normal_text: WITHIN_RANGE,
    },
    ParameterRule {
        parameter: Parameter::Hematocrit,
        unit: "%",
        low: 36.0,
        high: 46.0,
        normal_range: "36-46",
        low_text: "May indicate anemia",
        high_text: "May indicate dehydration",
        normal_text: WITHIN_RANGE,
    },
    ParameterRule {
        parameter: Parameter::Mcv,
        unit: "fL",
        low: 80.0,
        high: 100.0,
        normal_range: "80-100",
        low_text: "May indicate iron deficiency",
        high_text: "May indicate B12/folate deficiency",
        normal_text: WITHIN_RANGE,
    },
    ParameterRule {
        parameter: Parameter::Mch,
        unit: "pg",
        low: 27.0,
        high: 32.0,
        normal_range: "27-32",
        low_text: "May indicate iron deficiency",
        high_text: "May indicate B12/folate deficiency",
        normal_text: WITHIN_RANGE,
    },
    ParameterRule {
        parameter: Parameter::Mchc,
        unit: "g/dL",
        low: 32.0,
        high: 36.0,
        normal_range: "32-36",
        low_text: "May indicate iron deficiency",
        high_text: "May indicate spherocytosis",
        normal_text: WITHIN_RANGE,
    },
];

pub fn rule_for(parameter: Parameter) -> &'static ParameterRule {
    &RULES[parameter as usize]
}
