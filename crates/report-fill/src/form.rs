//! Operator-entered form data
//!
//! Every value arrives as a string exactly as typed; numeric meaning
//! is decided at assembly time, field by field. Unknown keys are
//! carried along and simply never placed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One witness line on the statement form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WitnessEntry {
    /// Witnessing office or agency
    #[serde(default)]
    pub office: String,
    /// Witness position or rank
    #[serde(default)]
    pub position: String,
    /// Witness name
    #[serde(default)]
    pub name: String,
}

/// The full set of operator-entered values for one violation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    /// Field name to entered text, axle slots included
    #[serde(default)]
    pub fields: HashMap<String, String>,
    /// Witness lines in entry order
    #[serde(default)]
    pub witnesses: Vec<WitnessEntry>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value
    pub fn set(&mut self, field: &str, value: &str) {
        self.fields.insert(field.to_string(), value.to_string());
    }

    /// Entered value for a field, if any
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Append a witness line
    pub fn add_witness(&mut self, entry: WitnessEntry) {
        self.witnesses.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_get() {
        let mut form = FormData::new();
        form.set("location", "서울외곽순환선");
        assert_eq!(form.get("location"), Some("서울외곽순환선"));
        assert_eq!(form.get("cargo"), None);
    }

    #[test]
    fn test_deserialize_partial() {
        let json = r#"{ "fields": { "vehicle_number": "12가3456" } }"#;
        let form: FormData = serde_json::from_str(json).unwrap();
        assert_eq!(form.get("vehicle_number"), Some("12가3456"));
        assert!(form.witnesses.is_empty());
    }

    #[test]
    fn test_deserialize_witnesses() {
        let json = r#"{
            "witnesses": [
                { "office": "도로공사", "position": "과장", "name": "김철수" },
                { "name": "이영희" }
            ]
        }"#;
        let form: FormData = serde_json::from_str(json).unwrap();
        assert_eq!(form.witnesses.len(), 2);
        assert_eq!(form.witnesses[0].office, "도로공사");
        assert_eq!(form.witnesses[1].position, "");
    }
}
