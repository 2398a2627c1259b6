//! Field rendering for the filled form

use crate::state::{FieldType, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Visible rows of a textarea, matching `rows="3"`
const TEXTAREA_ROWS: u16 = 3;

/// Rows a field occupies, borders included
pub fn field_height(field: &FormField) -> u16 {
    match field.field_type {
        FieldType::Textarea => {
            let lines = field.value.lines().count() as u16 + u16::from(field.value.ends_with('\n'));
            lines.max(TEXTAREA_ROWS) + 2
        }
        _ => 3,
    }
}

/// Draw one form field; the widget depends on the field type
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else if field.required && !field.filled {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let cursor = Span::styled(
        if is_active { "▌" } else { "" },
        Style::default().fg(Color::Cyan),
    );

    let content = match &field.field_type {
        FieldType::Select => {
            let (text, style) = if field.value.is_empty() {
                ("Select...", Style::default().fg(Color::DarkGray))
            } else {
                (field.value.as_str(), Style::default())
            };
            let mut spans = vec![Span::styled(text, style)];
            if is_active {
                spans.push(Span::styled(
                    format!("  ◂ ▸ {} options", field.options.len()),
                    Style::default().fg(Color::Cyan),
                ));
            }
            Paragraph::new(Line::from(spans))
        }
        FieldType::Textarea => {
            let mut lines: Vec<Line> = field
                .value
                .split('\n')
                .map(|l| Line::from(l.to_string()))
                .collect();
            if let Some(last) = lines.last_mut() {
                last.spans.push(cursor);
            }
            Paragraph::new(lines)
        }
        FieldType::Text
        | FieldType::Date
        | FieldType::Number
        | FieldType::Email
        | FieldType::Other(_) => {
            let value = if field.value.is_empty() && !is_active {
                Span::styled("(empty)", Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(field.value.as_str())
            };
            Paragraph::new(Line::from(vec![value, cursor]))
        }
    };

    let block = Block::default()
        .title(title(field))
        .borders(Borders::ALL)
        .border_style(border_style);
    let block = match diagnostics(field) {
        Some(line) => block.title(line.right_aligned()),
        None => block,
    };

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// ` Label * ✓ [type] `
fn title(field: &FormField) -> Line<'_> {
    let mut spans = vec![Span::styled(
        format!(" {}", field.display_label()),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if field.required {
        spans.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    if field.filled {
        spans.push(Span::styled(" ✓", Style::default().fg(Color::Green)));
    }
    if !matches!(field.field_type, FieldType::Text | FieldType::Select) {
        spans.push(Span::styled(
            format!(" [{}]", field.field_type),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans.push(Span::raw(" "));
    Line::from(spans)
}

/// Mapping confidence and the entity the value came from, when known
fn diagnostics(field: &FormField) -> Option<Line<'_>> {
    let text = match (field.confidence, field.matched_source.as_deref()) {
        (Some(confidence), Some(source)) => format!(" {confidence}% ← {source} "),
        (Some(confidence), None) => format!(" {confidence}% "),
        (None, Some(source)) => format!(" ← {source} "),
        (None, None) => return None,
    };
    let color = match field.confidence {
        Some(c) if c >= 80 => Color::Green,
        Some(c) if c >= 50 => Color::Yellow,
        Some(_) => Color::Red,
        None => Color::DarkGray,
    };
    Some(Line::from(Span::styled(text, Style::default().fg(color))))
}
