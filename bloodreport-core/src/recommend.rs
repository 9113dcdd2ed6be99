use crate::{AnalysisResult, Parameter, Status};

pub const FALLBACK_RECOMMENDATION: &str = "Maintain current health practices - results look good!";

struct Trigger {
    parameter: Parameter,
    status: Status,
    recommendation: &'static str,
}

// Checked in this order; output follows it.
const TRIGGERS: [Trigger; 3] = [
    Trigger {
        parameter: Parameter::Hemoglobin,
        status: Status::Low,
        recommendation: "Consider iron-rich foods and consult about iron supplements",
    },
    Trigger {
        parameter: Parameter::WbcCount,
        status: Status::High,
        recommendation: "Monitor for signs of infection and consider follow-up testing",
    },
    Trigger {
        parameter: Parameter::Platelets,
        status: Status::Low,
        recommendation: "Avoid activities with high bleeding risk",
    },
];

/// Canned advice for the evaluated results. Never empty.
pub fn derive_recommendations(results: &[AnalysisResult]) -> Vec<String> {
    let mut recommendations: Vec<String> = TRIGGERS
        .iter()
        .filter(|trigger| {
            results
                .iter()
                .any(|r| r.parameter == trigger.parameter && r.status == trigger.status)
        })
        .map(|trigger| trigger.recommendation.to_string())
        .collect();

    if recommendations.is_empty() {
        recommendations.push(FALLBACK_RECOMMENDATION.to_string());
    }

    recommendations
}
