//! JSON export of a filled form

use crate::state::FilledForm;

/// Pretty-printed JSON (two-space indent) of `form`
pub fn to_json(form: &FilledForm) -> serde_json::Result<String> {
    serde_json::to_string_pretty(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FieldType, FillSummary, FormField};
    use pretty_assertions::assert_eq;

    fn sample() -> FilledForm {
        FilledForm {
            form_id: "pan_application".to_string(),
            form_name: "PAN Application Form".to_string(),
            department: Some("Income Tax Department".to_string()),
            description: Some("Application for Permanent Account Number".to_string()),
            fields: vec![
                FormField {
                    field_id: "gender".to_string(),
                    field_label: "Gender".to_string(),
                    field_type: FieldType::Select,
                    value: "Female".to_string(),
                    required: true,
                    filled: true,
                    options: vec!["Male".to_string(), "Female".to_string()],
                    confidence: Some(95),
                    matched_source: Some("gender".to_string()),
                },
                FormField {
                    field_id: "address".to_string(),
                    field_label: "Address".to_string(),
                    field_type: FieldType::Textarea,
                    value: "12 Main St\nPune".to_string(),
                    required: true,
                    filled: true,
                    ..Default::default()
                },
            ],
            summary: FillSummary {
                auto_filled: 2,
                manual_required: 0,
                optional_fields: 1,
                confidence_avg: Some(95.0),
            },
        }
    }

    #[test]
    fn test_round_trip() {
        let form = sample();
        let parsed: FilledForm = serde_json::from_str(&to_json(&form).unwrap()).unwrap();
        assert_eq!(parsed, form);
    }

    #[test]
    fn test_uses_wire_field_names() {
        let json = to_json(&sample()).unwrap();
        assert!(json.contains("\"formId\": \"pan_application\""));
        assert!(json.contains("\"fieldType\": \"select\""));
        assert!(json.contains("\"auto_filled\": 2"));
        assert!(json.contains("\n  \"formName\""));
    }
}
