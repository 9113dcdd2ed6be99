//! Raw form state, kept as typed text until submission.

use bloodreport_core::Parameter;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub test_date: String,
    /// Input text per parameter, in `Parameter::ALL` order.
    pub measurements: [String; 8],
}

impl FormState {
    pub fn measurement(&self, parameter: Parameter) -> &str {
        &self.measurements[parameter as usize]
    }

    /// Copy of the state with one measurement replaced.
    pub fn with_measurement(&self, parameter: Parameter, text: String) -> Self {
        let mut next = self.clone();
        next.measurements[parameter as usize] = text;
        next
    }

    /// Submission object in the shape the intake crate reads.
    pub fn to_submission(&self) -> Value {
        let mut fields = Map::new();
        fields.insert("name".into(), Value::String(self.name.clone()));
        fields.insert("age".into(), Value::String(self.age.clone()));
        fields.insert("gender".into(), Value::String(self.gender.clone()));
        fields.insert("testDate".into(), Value::String(self.test_date.clone()));
        for parameter in Parameter::ALL {
            fields.insert(
                parameter.form_key().into(),
                Value::String(self.measurement(parameter).to_string()),
            );
        }
        Value::Object(fields)
    }
}
