//! Domain types exchanged with the form-filling backend

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Summary of a form template offered by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FormSummary {
    pub form_id: String,
    #[serde(default)]
    pub form_name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub description: String,
}

/// Entities extracted from an uploaded document.
///
/// Values are kept as raw JSON so they are posted back to auto-fill
/// exactly as the extraction service produced them, in the order it
/// produced them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedEntities(Map<String, Value>);

impl ExtractedEntities {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Entries formatted for display: `date_of_birth` becomes `DATE OF BIRTH`,
    /// null or empty values become `N/A`.
    pub fn display_entries(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(key, value)| (display_key(key), display_value(value)))
            .collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ExtractedEntities {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn display_key(key: &str) -> String {
    key.replace('_', " ").to_uppercase()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "N/A".to_string(),
        Value::String(s) if s.is_empty() => "N/A".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(false) => "N/A".to_string(),
        other => other.to_string(),
    }
}

/// Input widget kind for a form field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    Text,
    Date,
    Number,
    Email,
    Select,
    Textarea,
    /// Any type the backend sends that has no dedicated widget
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Date => "date",
            Self::Number => "number",
            Self::Email => "email",
            Self::Select => "select",
            Self::Textarea => "textarea",
            Self::Other(name) => name,
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::Textarea)
    }
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" | "" => Self::Text,
            "date" => Self::Date,
            "number" => Self::Number,
            "email" => Self::Email,
            "select" => Self::Select,
            "textarea" => Self::Textarea,
            _ => Self::Other(value),
        }
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        match value {
            FieldType::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field of a filled form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub field_id: String,
    #[serde(default)]
    pub field_label: String,
    #[serde(default)]
    pub field_type: FieldType,
    #[serde(default, deserialize_with = "value_as_text")]
    pub value: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub filled: bool,
    #[serde(default)]
    pub options: Vec<String>,
    /// Mapping confidence reported by the backend (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u32>,
    /// Entity key the backend matched this field against
    #[serde(default)]
    pub matched_source: Option<String>,
}

impl FormField {
    /// Label to show, falling back to the field id
    pub fn display_label(&self) -> &str {
        if self.field_label.is_empty() {
            &self.field_id
        } else {
            &self.field_label
        }
    }
}

/// Field values are copied from extracted entities, so any JSON value may
/// arrive: strings are kept, null is empty, anything else is its JSON text.
fn value_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Mapping statistics returned alongside a filled form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FillSummary {
    #[serde(default)]
    pub auto_filled: u32,
    #[serde(default)]
    pub manual_required: u32,
    #[serde(default, alias = "optional_empty")]
    pub optional_fields: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_avg: Option<f64>,
}

/// A form template with auto-filled and user-edited values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilledForm {
    pub form_id: String,
    #[serde(default)]
    pub form_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FormField>,
    #[serde(default)]
    pub summary: FillSummary,
}

impl FilledForm {
    #[cfg(test)]
    pub fn field(&self, field_id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.field_id == field_id)
    }

    /// Department, if the backend sent a non-empty one
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref().filter(|d| !d.is_empty())
    }
}

/// Extensions accepted by the file picker (`image/*,.pdf`)
const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "tif", "tiff", "heic", "avif",
];

/// Why a picked path cannot be used for extraction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("unsupported file type (expected an image or PDF): {}", .0.display())]
    Unsupported(PathBuf),
}

/// A document chosen for extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub mime: String,
}

impl SelectedFile {
    /// Resolve a path typed or pasted by the user.
    ///
    /// Accepts quoted paths, backslash-escaped spaces and `file://` URLs,
    /// which is what terminals produce when a file is dropped on them.
    pub fn open(raw: &str) -> Result<Self, FileError> {
        let path = PathBuf::from(normalize_dropped_path(raw));
        if !path.is_file() {
            return Err(FileError::NotFound(path));
        }
        Self::from_path(path.clone()).ok_or(FileError::Unsupported(path))
    }

    /// Build from a path, returning `None` when the extension is neither
    /// an image nor a PDF.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let mime = mime_for(&path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Some(Self { path, name, mime })
    }
}

fn normalize_dropped_path(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = ['\'', '"']
        .iter()
        .find_map(|q| {
            trimmed
                .strip_prefix(*q)
                .and_then(|rest| rest.strip_suffix(*q))
        })
        .unwrap_or(trimmed);
    let path = unquoted.strip_prefix("file://").unwrap_or(unquoted);
    path.replace("\\ ", " ")
}

fn mime_for(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    if ext == "pdf" {
        return Some("application/pdf".to_string());
    }
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        let subtype = match ext.as_str() {
            "jpg" => "jpeg",
            "tif" => "tiff",
            other => other,
        };
        return Some(format!("image/{subtype}"));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_filled_form_from_backend_payload() {
        let payload = json!({
            "formId": "pan_application",
            "formName": "PAN Application Form",
            "department": "Income Tax Department",
            "description": "Application for Permanent Account Number",
            "fields": [
                {
                    "fieldId": "gender",
                    "fieldLabel": "Gender",
                    "fieldType": "select",
                    "value": "",
                    "filled": false,
                    "required": true,
                    "options": ["Male", "Female", "Other"],
                    "confidence": 0,
                    "matchedSource": null
                }
            ],
            "summary": {"auto_filled": 3, "manual_required": 1, "optional_empty": 1, "confidence_avg": 91.67}
        });

        let form: FilledForm = serde_json::from_value(payload).unwrap();
        assert_eq!(form.form_id, "pan_application");
        assert_eq!(form.department(), Some("Income Tax Department"));
        assert_eq!(form.fields[0].field_type, FieldType::Select);
        assert_eq!(form.fields[0].options.len(), 3);
        assert_eq!(form.fields[0].matched_source, None);
        assert_eq!(form.summary.optional_fields, 1);
        assert_eq!(form.summary.confidence_avg, Some(91.67));
    }

    #[test]
    fn test_null_value_decodes_as_empty() {
        let field: FormField =
            serde_json::from_value(json!({"fieldId": "pan", "value": null})).unwrap();
        assert_eq!(field.value, "");
        assert_eq!(field.field_type, FieldType::Text);
    }

    #[test]
    fn test_non_string_values_decode_as_text() {
        let number: FormField =
            serde_json::from_value(json!({"fieldId": "income", "value": 250000})).unwrap();
        assert_eq!(number.value, "250000");

        let object: FormField = serde_json::from_value(
            json!({"fieldId": "address", "value": {"city": "Pune"}}),
        )
        .unwrap();
        assert_eq!(object.value, r#"{"city":"Pune"}"#);

        let flag: FormField =
            serde_json::from_value(json!({"fieldId": "married", "value": true})).unwrap();
        assert_eq!(flag.value, "true");
    }

    #[test]
    fn test_export_keeps_backend_keys() {
        let field: FormField = serde_json::from_value(json!({
            "fieldId": "name",
            "options": [],
            "matchedSource": null
        }))
        .unwrap();
        let back = serde_json::to_value(&field).unwrap();
        assert_eq!(back["options"], json!([]));
        assert!(back.as_object().unwrap().contains_key("matchedSource"));
        assert_eq!(back["matchedSource"], Value::Null);
    }

    #[test]
    fn test_unknown_field_type_is_preserved() {
        let field: FormField =
            serde_json::from_value(json!({"fieldId": "phone", "fieldType": "tel"})).unwrap();
        assert_eq!(field.field_type, FieldType::Other("tel".to_string()));
        let back = serde_json::to_value(&field).unwrap();
        assert_eq!(back["fieldType"], "tel");
    }

    #[test]
    fn test_display_label_falls_back_to_id() {
        let field = FormField {
            field_id: "annual_income".to_string(),
            ..Default::default()
        };
        assert_eq!(field.display_label(), "annual_income");
    }

    #[test]
    fn test_empty_department_is_hidden() {
        let form = FilledForm {
            form_id: "x".to_string(),
            department: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(form.department(), None);
    }

    #[test]
    fn test_entity_display_entries() {
        let entities: ExtractedEntities = [
            ("date_of_birth", json!("1990-01-01")),
            ("pan", Value::Null),
            ("name", json!("")),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            entities.display_entries(),
            vec![
                ("DATE OF BIRTH".to_string(), "1990-01-01".to_string()),
                ("PAN".to_string(), "N/A".to_string()),
                ("NAME".to_string(), "N/A".to_string()),
            ]
        );
    }

    #[test]
    fn test_entities_keep_backend_order() {
        let entities: ExtractedEntities = serde_json::from_str(
            r#"{"name":"Asha","dob":"1990-01-01","gender":"Female","aadhar":"1234","pan":"ABCDE1234F","address":"Pune"}"#,
        )
        .unwrap();
        let keys: Vec<String> = entities.display_entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["NAME", "DOB", "GENDER", "AADHAR", "PAN", "ADDRESS"]);
    }

    #[test]
    fn test_entities_serialize_flat() {
        let entities: ExtractedEntities = [("name", "Asha")].into_iter().collect();
        assert_eq!(serde_json::to_value(&entities).unwrap(), json!({"name": "Asha"}));
    }

    #[test]
    fn test_selected_file_accepts_images_and_pdf() {
        let jpg = SelectedFile::from_path("/tmp/passport.JPG").unwrap();
        assert_eq!(jpg.name, "passport.JPG");
        assert_eq!(jpg.mime, "image/jpeg");

        let pdf = SelectedFile::from_path("scan.pdf").unwrap();
        assert_eq!(pdf.mime, "application/pdf");

        assert!(SelectedFile::from_path("notes.txt").is_none());
        assert!(SelectedFile::from_path("no_extension").is_none());
    }

    #[test]
    fn test_normalize_dropped_path() {
        assert_eq!(normalize_dropped_path("  '/tmp/my scan.pdf' \n"), "/tmp/my scan.pdf");
        assert_eq!(normalize_dropped_path("\"/tmp/a.png\""), "/tmp/a.png");
        assert_eq!(normalize_dropped_path("/tmp/my\\ scan.pdf"), "/tmp/my scan.pdf");
        assert_eq!(normalize_dropped_path("file:///tmp/a.png"), "/tmp/a.png");
    }

    #[test]
    fn test_open_checks_existence_and_type() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("passport.jpg");
        let text = dir.path().join("notes.txt");
        std::fs::write(&image, b"jpeg").unwrap();
        std::fs::write(&text, b"text").unwrap();

        let file = SelectedFile::open(image.to_str().unwrap()).unwrap();
        assert_eq!(file.name, "passport.jpg");

        assert_eq!(
            SelectedFile::open(text.to_str().unwrap()),
            Err(FileError::Unsupported(text.clone()))
        );

        let missing = dir.path().join("missing.pdf");
        assert_eq!(
            SelectedFile::open(missing.to_str().unwrap()),
            Err(FileError::NotFound(missing.clone()))
        );
    }

    #[test]
    fn test_form_summary_defaults() {
        let summary: FormSummary =
            serde_json::from_value(json!({"formId": "caste_certificate"})).unwrap();
        assert_eq!(summary.form_name, "");
        assert_eq!(summary.department, "");
    }
}
