//! Page layout for the PDF export
//!
//! Lays the filled form out top-to-bottom in a single column on A4 pages.
//! Coordinates are millimetres measured from the top-left corner of the
//! page; `y` is the text baseline.

use super::measure::{wrap_text, TextMeasure};
use crate::state::FilledForm;

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 10.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
/// Cursor position at the top of every page
pub const TOP: f32 = 15.0;
/// A field starting below `PAGE_HEIGHT - BREAK_THRESHOLD` goes to a new page
pub const BREAK_THRESHOLD: f32 = 15.0;
/// Footer baseline distance from the bottom edge
pub const FOOTER_OFFSET: f32 = 10.0;

const TITLE_SIZE: f32 = 18.0;
const META_SIZE: f32 = 9.0;
const BODY_SIZE: f32 = 10.0;
const FOOTER_SIZE: f32 = 8.0;

const TITLE_ADVANCE: f32 = 10.0;
const META_ADVANCE: f32 = 5.0;
const HEADER_GAP: f32 = 3.0;
const DIVIDER_ADVANCE: f32 = 8.0;
const LABEL_ADVANCE: f32 = 5.0;
const VALUE_LINE_HEIGHT: f32 = 4.0;
const FIELD_SPACING: f32 = 3.0;

/// Placeholder printed for empty values
pub const NOT_FILLED: &str = "(Not filled)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const ACCENT: Rgb = Rgb::new(102, 126, 234);
pub const META_GRAY: Rgb = Rgb::new(100, 100, 100);
pub const DIVIDER_GRAY: Rgb = Rgb::new(200, 200, 200);
pub const FOOTER_GRAY: Rgb = Rgb::new(150, 150, 150);
pub const BLACK: Rgb = Rgb::new(0, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// A single drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Rgb,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPage {
    pub ops: Vec<DrawOp>,
}

#[cfg(test)]
impl LayoutPage {
    /// Text drawn on this page, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Rule { .. } => None,
        })
    }
}

/// A fully laid out document
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub pages: Vec<LayoutPage>,
}

/// Writes ops at a monotonically advancing cursor, starting new pages
struct Cursor {
    pages: Vec<LayoutPage>,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![LayoutPage::default()],
            y: TOP,
        }
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn text(&mut self, text: impl Into<String>, size: f32, weight: FontWeight, color: Rgb) {
        let y = self.y;
        self.text_at(text, y, size, weight, color);
    }

    fn text_at(
        &mut self,
        text: impl Into<String>,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Rgb,
    ) {
        self.push(DrawOp::Text {
            text: text.into(),
            x: MARGIN,
            y,
            size,
            weight,
            color,
        });
    }

    fn advance(&mut self, by: f32) {
        self.y += by;
    }

    fn break_if_past(&mut self, limit: f32) {
        if self.y > limit {
            self.pages.push(LayoutPage::default());
            self.y = TOP;
        }
    }
}

/// Label line for a field: `Label *:` for required fields, `Label:` otherwise
pub fn field_label_line(label: &str, required: bool) -> String {
    format!("{label}{}:", if required { " *" } else { "" })
}

/// Lay out `form`, stamping `generated_at` in the footer of the last page
pub fn layout_form(form: &FilledForm, generated_at: &str, measure: &dyn TextMeasure) -> PdfLayout {
    let title = if form.form_name.is_empty() {
        "Form".to_string()
    } else {
        form.form_name.clone()
    };

    let mut cursor = Cursor::new();

    cursor.text(title.clone(), TITLE_SIZE, FontWeight::Regular, ACCENT);
    cursor.advance(TITLE_ADVANCE);

    cursor.text(
        format!("Form ID: {}", form.form_id),
        META_SIZE,
        FontWeight::Regular,
        META_GRAY,
    );
    cursor.advance(META_ADVANCE);

    if let Some(department) = form.department() {
        cursor.text(
            format!("Department: {department}"),
            META_SIZE,
            FontWeight::Regular,
            META_GRAY,
        );
        cursor.advance(META_ADVANCE);
    }

    cursor.advance(HEADER_GAP);
    let y = cursor.y;
    cursor.push(DrawOp::Rule {
        x1: MARGIN,
        x2: PAGE_WIDTH - MARGIN,
        y,
        color: DIVIDER_GRAY,
    });
    cursor.advance(DIVIDER_ADVANCE);

    for field in &form.fields {
        // Only checked at field boundaries; a long value may run past the margin
        cursor.break_if_past(PAGE_HEIGHT - BREAK_THRESHOLD);

        cursor.text(
            field_label_line(field.display_label(), field.required),
            BODY_SIZE,
            FontWeight::Bold,
            BLACK,
        );
        cursor.advance(LABEL_ADVANCE);

        let value = if field.value.is_empty() {
            NOT_FILLED
        } else {
            field.value.as_str()
        };
        let lines = wrap_text(value, CONTENT_WIDTH, BODY_SIZE, measure);
        let top = cursor.y;
        for (i, line) in lines.iter().enumerate() {
            cursor.text_at(
                line.clone(),
                top + i as f32 * VALUE_LINE_HEIGHT,
                BODY_SIZE,
                FontWeight::Regular,
                BLACK,
            );
        }
        cursor.advance(lines.len() as f32 * VALUE_LINE_HEIGHT + FIELD_SPACING);
    }

    cursor.text_at(
        format!("Generated: {generated_at}"),
        PAGE_HEIGHT - FOOTER_OFFSET,
        FOOTER_SIZE,
        FontWeight::Regular,
        FOOTER_GRAY,
    );

    PdfLayout {
        title,
        width: PAGE_WIDTH,
        height: PAGE_HEIGHT,
        pages: cursor.pages,
    }
}
