//! Core logic for evaluating a blood panel against fixed reference ranges.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

mod recommend;
mod rules;

pub use recommend::{derive_recommendations, FALLBACK_RECOMMENDATION};
pub use rules::{rule_for, ParameterRule, RULES};

/// Fixed text appended to every report.
pub const DISCLAIMER: &str = "This AI analysis is for informational purposes only and should not \
replace professional medical advice. Always consult with qualified healthcare providers for \
proper diagnosis and treatment.";

/// Options controlling intake and presentation. Missing fields take defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// How raw form text is turned into measurements.
    pub coercion: CoercionMode,
    /// Artificial latency (milliseconds) the UI waits before showing a report.
    pub processing_delay_ms: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            coercion: CoercionMode::Lenient,
            processing_delay_ms: 2000,
        }
    }
}

/// Policy for measurement text that is blank or not a number.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CoercionMode {
    /// Unparseable input becomes 0, the way a browser `parseFloat(..) || 0` does.
    #[default]
    Lenient,
    /// Unparseable, negative or non-finite input is rejected.
    Strict,
}

/// The eight measured blood parameters, in report order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Hemoglobin,
    WbcCount,
    RbcCount,
    Platelets,
    Hematocrit,
    Mcv,
    Mch,
    Mchc,
}

impl Parameter {
    pub const ALL: [Parameter; 8] = [
        Parameter::Hemoglobin,
        Parameter::WbcCount,
        Parameter::RbcCount,
        Parameter::Platelets,
        Parameter::Hematocrit,
        Parameter::Mcv,
        Parameter::Mch,
        Parameter::Mchc,
    ];

    /// Display name used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Parameter::Hemoglobin => "Hemoglobin",
            Parameter::WbcCount => "WBC Count",
            Parameter::RbcCount => "RBC Count",
            Parameter::Platelets => "Platelets",
            Parameter::Hematocrit => "Hematocrit",
            Parameter::Mcv => "MCV",
            Parameter::Mch => "MCH",
            Parameter::Mchc => "MCHC",
        }
    }

    /// Field name used by the intake form.
    pub fn form_key(self) -> &'static str {
        match self {
            Parameter::Hemoglobin => "hemoglobin",
            Parameter::WbcCount => "wbcCount",
            Parameter::RbcCount => "rbcCount",
            Parameter::Platelets => "platelets",
            Parameter::Hematocrit => "hematocrit",
            Parameter::Mcv => "mcv",
            Parameter::Mch => "mch",
            Parameter::Mchc => "mchc",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

impl Gender {
    /// Case-insensitive match against the form's option values.
    pub fn from_form(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

/// One submitted blood panel with patient metadata, keyed as the form sends it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BloodSample {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    /// `None` when a lenient submission carried no readable date.
    #[serde(default)]
    pub test_date: Option<NaiveDate>,
    pub hemoglobin: f64,
    pub wbc_count: f64,
    pub rbc_count: f64,
    pub platelets: f64,
    pub hematocrit: f64,
    pub mcv: f64,
    pub mch: f64,
    pub mchc: f64,
}

impl BloodSample {
    pub fn measurement(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Hemoglobin => self.hemoglobin,
            Parameter::WbcCount => self.wbc_count,
            Parameter::RbcCount => self.rbc_count,
            Parameter::Platelets => self.platelets,
            Parameter::Hematocrit => self.hematocrit,
            Parameter::Mcv => self.mcv,
            Parameter::Mch => self.mch,
            Parameter::Mchc => self.mchc,
        }
    }

    pub fn measurement_mut(&mut self, parameter: Parameter) -> &mut f64 {
        match parameter {
            Parameter::Hemoglobin => &mut self.hemoglobin,
            Parameter::WbcCount => &mut self.wbc_count,
            Parameter::RbcCount => &mut self.rbc_count,
            Parameter::Platelets => &mut self.platelets,
            Parameter::Hematocrit => &mut self.hematocrit,
            Parameter::Mcv => &mut self.mcv,
            Parameter::Mch => &mut self.mch,
            Parameter::Mchc => &mut self.mchc,
        }
    }
}

/// Position of a value relative to its reference range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Low,
    Normal,
    High,
}

impl Status {
    pub fn is_normal(self) -> bool {
        self == Status::Normal
    }
}

/// Outcome of comparing one measurement with its rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub parameter: Parameter,
    pub label: String,
    pub value: f64,
    pub unit: String,
    pub status: Status,
    pub normal_range: String,
    pub interpretation: String,
}

/// Evaluate every measurement of the sample, in `Parameter::ALL` order.
pub fn evaluate(sample: &BloodSample) -> Vec<AnalysisResult> {
    RULES
        .iter()
        .map(|rule| rule.evaluate(sample.measurement(rule.parameter)))
        .collect()
}

/// Patient header shown above the results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientInfo {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub test_date: Option<NaiveDate>,
}

/// Complete report handed to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BloodReport {
    pub generated_at: DateTime<Utc>,
    pub patient: PatientInfo,
    pub results: Vec<AnalysisResult>,
    pub abnormal_count: usize,
    pub recommendations: Vec<String>,
    pub disclaimer: String,
}

impl BloodReport {
    /// Run the evaluator and recommendation deriver over a sample.
    pub fn new(sample: &BloodSample) -> Self {
        let results = evaluate(sample);
        let recommendations = derive_recommendations(&results);
        let abnormal_count = results.iter().filter(|r| !r.status.is_normal()).count();

        Self {
            generated_at: Utc::now(),
            patient: PatientInfo {
                name: sample.name.clone(),
                age: sample.age,
                gender: sample.gender,
                test_date: sample.test_date,
            },
            results,
            abnormal_count,
            recommendations,
            disclaimer: DISCLAIMER.to_string(),
        }
    }

    /// Whether any parameter fell outside its reference range.
    pub fn needs_attention(&self) -> bool {
        self.abnormal_count > 0
    }

    pub fn abnormal_results(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.results.iter().filter(|r| !r.status.is_normal())
    }
}

/// Errors raised while turning a submission into a sample.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ReportError {
    #[error("Submission is missing the minimum required data")]
    MissingData,
    #[error("Could not read submission: {0}")]
    Parse(String),
    #[error("Invalid value {input:?} for {field}")]
    InvalidMeasurement { field: &'static str, input: String },
    #[error("Invalid age: {0:?}")]
    InvalidAge(String),
    #[error("Invalid gender: {0:?}")]
    InvalidGender(String),
    #[error("Invalid test date: {0:?}")]
    InvalidDate(String),
}
