//! Render a [`PdfLayout`] to PDF bytes

use super::layout::{DrawOp, FontWeight, PdfLayout, Rgb};
use crate::export::ExportError;
use printpdf::{BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, Point};

/// Stroke width of divider rules in points
const RULE_THICKNESS: f32 = 0.5;

pub fn render_pdf(layout: &PdfLayout) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        layout.title.as_str(),
        Mm(layout.width),
        Mm(layout.height),
        "Layer 1",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    for (index, page) in layout.pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(layout.width), Mm(layout.height), "Layer 1")
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for op in &page.ops {
            match op {
                DrawOp::Text {
                    text,
                    x,
                    y,
                    size,
                    weight,
                    color,
                } => {
                    let font: &IndirectFontRef = match weight {
                        FontWeight::Regular => &regular,
                        FontWeight::Bold => &bold,
                    };
                    layer.set_fill_color(pdf_color(*color));
                    layer.use_text(text.as_str(), *size, Mm(*x), Mm(layout.height - y), font);
                }
                DrawOp::Rule { x1, x2, y, color } => {
                    let y = Mm(layout.height - y);
                    layer.set_outline_color(pdf_color(*color));
                    layer.set_outline_thickness(RULE_THICKNESS);
                    layer.add_line(Line {
                        points: vec![
                            (Point::new(Mm(*x1), y), false),
                            (Point::new(Mm(*x2), y), false),
                        ],
                        is_closed: false,
                    });
                }
            }
        }
    }

    doc.save_to_bytes().map_err(pdf_error)
}

fn pdf_color(color: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
        None,
    ))
}

fn pdf_error(err: printpdf::Error) -> ExportError {
    ExportError::Pdf(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::pdf::{layout_form, HelveticaMetrics};
    use crate::state::{FilledForm, FormField};

    #[test]
    fn test_renders_pdf_bytes() {
        let form = FilledForm {
            form_id: "F-100".to_string(),
            form_name: "Income Certificate Application".to_string(),
            fields: (0..50)
                .map(|i| FormField {
                    field_id: format!("f{i}"),
                    value: "Some value".to_string(),
                    filled: true,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };
        let layout = layout_form(&form, "2026-10-16 09:30:00", &HelveticaMetrics);
        assert!(layout.pages.len() > 1);

        let bytes = render_pdf(&layout).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
