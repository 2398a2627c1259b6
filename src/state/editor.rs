//! Field-level editing of a filled form

use super::model::{FieldType, FilledForm, FormField};

/// Return a copy of `form` where exactly the field `field_id` carries `value`.
///
/// `filled` is recomputed for the edited field. Unknown ids leave the form
/// unchanged.
pub fn edit_field(form: &FilledForm, field_id: &str, value: &str) -> FilledForm {
    let fields = form
        .fields
        .iter()
        .map(|field| {
            if field.field_id == field_id {
                FormField {
                    value: value.to_string(),
                    filled: !value.is_empty(),
                    ..field.clone()
                }
            } else {
                field.clone()
            }
        })
        .collect();

    FilledForm {
        fields,
        ..form.clone()
    }
}

/// Value of `field` after typing `c`.
///
/// Select fields only take values from their option list, so typed
/// characters are ignored for them.
pub fn push_char(field: &FormField, c: char) -> Option<String> {
    match field.field_type {
        FieldType::Select => None,
        _ => {
            let mut value = field.value.clone();
            value.push(c);
            Some(value)
        }
    }
}

/// Value of `field` after a backspace
pub fn pop_char(field: &FormField) -> Option<String> {
    match field.field_type {
        FieldType::Select => None,
        _ => {
            let mut value = field.value.clone();
            value.pop()?;
            Some(value)
        }
    }
}

/// Value of `field` after pressing Enter; only textareas take newlines
pub fn newline(field: &FormField) -> Option<String> {
    field
        .field_type
        .is_multiline()
        .then(|| format!("{}\n", field.value))
}

/// Next value of a select field, cycling through the empty choice
/// ("Select...") followed by each option.
pub fn cycle_option(field: &FormField, forward: bool) -> Option<String> {
    if field.field_type != FieldType::Select {
        return None;
    }

    let choices: Vec<&str> = std::iter::once("")
        .chain(field.options.iter().map(String::as_str))
        .collect();
    let len = choices.len();
    let current = choices
        .iter()
        .position(|choice| *choice == field.value)
        .unwrap_or(0);

    let next = if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    };
    Some(choices[next].to_string())
}

/// Cursor over the fields of the form being edited
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldCursor {
    index: usize,
}

impl FieldCursor {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self, count: usize) {
        if count > 0 {
            self.index = (self.index + 1) % count;
        }
    }

    pub fn prev(&mut self, count: usize) {
        if count > 0 {
            self.index = (self.index + count - 1) % count;
        }
    }

    /// Keep the cursor within a form that may have shrunk
    pub fn clamp(&mut self, count: usize) {
        if self.index >= count {
            self.index = count.saturating_sub(1);
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn current<'a>(&self, form: &'a FilledForm) -> Option<&'a FormField> {
        form.fields.get(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::model::FillSummary;
    use pretty_assertions::assert_eq;

    fn field(id: &str, value: &str) -> FormField {
        FormField {
            field_id: id.to_string(),
            field_label: id.to_uppercase(),
            value: value.to_string(),
            filled: !value.is_empty(),
            ..Default::default()
        }
    }

    fn sample_form() -> FilledForm {
        FilledForm {
            form_id: "F-100".to_string(),
            form_name: "Sample".to_string(),
            department: Some("Revenue".to_string()),
            description: None,
            fields: vec![
                field("name", "Asha"),
                field("dob", "1990-01-01"),
                field("address", ""),
            ],
            summary: FillSummary {
                auto_filled: 2,
                manual_required: 1,
                ..Default::default()
            },
        }
    }

    fn select_field(value: &str) -> FormField {
        FormField {
            field_id: "gender".to_string(),
            field_type: FieldType::Select,
            value: value.to_string(),
            options: vec!["Male".to_string(), "Female".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_edit_sets_value_and_filled() {
        let form = sample_form();
        let edited = edit_field(&form, "address", "12 Main St");

        let address = edited.field("address").unwrap();
        assert_eq!(address.value, "12 Main St");
        assert!(address.filled);
    }

    #[test]
    fn test_edit_leaves_other_fields_untouched() {
        let form = sample_form();
        let edited = edit_field(&form, "address", "12 Main St");

        assert_eq!(edited.fields[0], form.fields[0]);
        assert_eq!(edited.fields[1], form.fields[1]);
        assert_eq!(edited.summary, form.summary);
        assert_eq!(edited.form_name, form.form_name);
    }

    #[test]
    fn test_clearing_a_value_unsets_filled() {
        let edited = edit_field(&sample_form(), "name", "");
        let name = edited.field("name").unwrap();
        assert_eq!(name.value, "");
        assert!(!name.filled);
    }

    #[test]
    fn test_edit_is_idempotent() {
        let form = sample_form();
        let once = edit_field(&form, "dob", "1991-02-02");
        let twice = edit_field(&once, "dob", "1991-02-02");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_edit_unknown_field_is_noop() {
        let form = sample_form();
        assert_eq!(edit_field(&form, "missing", "x"), form);
    }

    #[test]
    fn test_push_and_pop_char() {
        let f = field("name", "Ash");
        assert_eq!(push_char(&f, 'a').as_deref(), Some("Asha"));
        assert_eq!(pop_char(&f).as_deref(), Some("As"));
        assert_eq!(pop_char(&field("name", "")), None);
    }

    #[test]
    fn test_select_ignores_typing() {
        let f = select_field("Male");
        assert_eq!(push_char(&f, 'x'), None);
        assert_eq!(pop_char(&f), None);
    }

    #[test]
    fn test_newline_only_in_textarea() {
        let mut f = field("address", "12 Main St");
        assert_eq!(newline(&f), None);
        f.field_type = FieldType::Textarea;
        assert_eq!(newline(&f).as_deref(), Some("12 Main St\n"));
    }

    #[test]
    fn test_cycle_option_wraps_through_empty_choice() {
        assert_eq!(cycle_option(&select_field(""), true).as_deref(), Some("Male"));
        assert_eq!(
            cycle_option(&select_field("Male"), true).as_deref(),
            Some("Female")
        );
        assert_eq!(cycle_option(&select_field("Female"), true).as_deref(), Some(""));
        assert_eq!(
            cycle_option(&select_field(""), false).as_deref(),
            Some("Female")
        );
        assert_eq!(cycle_option(&field("name", ""), true), None);
    }

    #[test]
    fn test_cycle_option_from_unlisted_value() {
        assert_eq!(
            cycle_option(&select_field("Unknown"), true).as_deref(),
            Some("Male")
        );
    }

    #[test]
    fn test_cursor_wraps() {
        let mut cursor = FieldCursor::default();
        cursor.prev(3);
        assert_eq!(cursor.index(), 2);
        cursor.next(3);
        assert_eq!(cursor.index(), 0);
        cursor.next(0);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_cursor_clamp() {
        let mut cursor = FieldCursor::default();
        cursor.next(5);
        cursor.next(5);
        cursor.clamp(1);
        assert_eq!(cursor.index(), 0);
        assert_eq!(cursor.current(&sample_form()).unwrap().field_id, "name");
    }
}
