//! Form step: catalog list and the filled form

use super::field_renderer::{draw_field, field_height};
use super::widgets::{inner, render_placeholder, render_scrollable_list};
use crate::app::App;
use crate::state::{FillSummary, FilledForm};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const CATALOG_WIDTH: u16 = 34;
const STAT_CARD_HEIGHT: u16 = 4;

/// Draw the form step
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    if app.state.available_forms.is_empty() {
        let block = Block::default()
            .title(" Select Government Form ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        frame.render_widget(block, area);
        render_placeholder(
            frame,
            inner(area),
            vec![
                Line::from(Span::styled(
                    "No Forms Available",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from("Ensure backend is running: python app.py"),
            ],
            Color::DarkGray,
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(CATALOG_WIDTH), Constraint::Min(0)])
        .split(area);

    draw_catalog(frame, chunks[0], app);

    let state = &app.state;
    if state.is_auto_filling() {
        render_placeholder(
            frame,
            chunks[1],
            vec![Line::from("Auto-filling form...")],
            Color::Yellow,
        );
    } else if let Some(form) = &state.filled_form {
        draw_filled_form(frame, chunks[1], app, form);
    } else {
        render_placeholder(
            frame,
            chunks[1],
            vec![Line::from("Choose a form and press Enter to auto-fill it")],
            Color::DarkGray,
        );
    }
}

/// Form catalog; the chosen form is marked, the highlight follows j/k
fn draw_catalog(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let items: Vec<ListItem> = state
        .available_forms
        .iter()
        .map(|form| {
            let chosen = state.selected_form_id.as_deref() == Some(form.form_id.as_str());
            let marker = if chosen { "● " } else { "  " };
            let mut lines = vec![Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Green)),
                Span::styled(
                    form.form_name.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ])];
            if !form.department.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", form.department),
                    Style::default().fg(Color::Gray),
                )));
            }
            if !form.description.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", form.description),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let border = if state.edit_mode {
        Color::DarkGray
    } else {
        Color::Cyan
    };
    let list = List::new(items)
        .block(
            Block::default()
                .title(" Select Government Form ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    render_scrollable_list(frame, area, list, app.catalog_index);
}

fn draw_filled_form(frame: &mut Frame, area: Rect, app: &App, form: &FilledForm) {
    let edit_mode = app.state.edit_mode;
    let toggle = if edit_mode { " Done (Esc) " } else { " Edit (e) " };
    let block = Block::default()
        .title(Line::from(Span::styled(
            format!(" {} ", form.form_name),
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .title(Line::from(Span::styled(toggle, Style::default().fg(Color::Cyan))).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if edit_mode {
            Color::Cyan
        } else {
            Color::Green
        }));
    frame.render_widget(block, area);
    let inner = inner(area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                // Department / description
            Constraint::Length(STAT_CARD_HEIGHT), // Stats
            Constraint::Min(0),                   // Fields
        ])
        .split(inner);

    let mut meta = vec![];
    if let Some(department) = form.department() {
        meta.push(Span::styled(department, Style::default().fg(Color::Gray)));
    }
    if let Some(description) = form.description.as_deref().filter(|d| !d.is_empty()) {
        if !meta.is_empty() {
            meta.push(Span::raw("  |  "));
        }
        meta.push(Span::styled(description, Style::default().fg(Color::DarkGray)));
    }
    frame.render_widget(Paragraph::new(Line::from(meta)), chunks[0]);

    draw_stats(frame, chunks[1], &form.summary);

    if form.fields.is_empty() {
        render_placeholder(
            frame,
            chunks[2],
            vec![Line::from("No fields available")],
            Color::DarkGray,
        );
        return;
    }
    let active = edit_mode.then(|| app.field_cursor.index());
    draw_fields(frame, chunks[2], form, active);
}

/// Summary cards: auto-filled, manual, optional, and average confidence when present
fn draw_stats(frame: &mut Frame, area: Rect, summary: &FillSummary) {
    let mut cards = vec![
        (summary.auto_filled.to_string(), "Auto-Filled", Color::Green),
        (summary.manual_required.to_string(), "Manual", Color::Yellow),
        (summary.optional_fields.to_string(), "Optional", Color::Blue),
    ];
    if let Some(avg) = summary.confidence_avg {
        cards.push((format!("{avg:.0}%"), "Confidence", Color::Magenta));
    }

    let constraints: Vec<Constraint> = cards
        .iter()
        .map(|_| Constraint::Ratio(1, cards.len() as u32))
        .collect();
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for ((number, label, color), card_area) in cards.into_iter().zip(areas.iter()) {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(
                number,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        frame.render_widget(card, *card_area);
    }
}

/// Stack fields top to bottom, scrolled so the active field is visible
fn draw_fields(frame: &mut Frame, area: Rect, form: &FilledForm, active: Option<usize>) {
    let heights: Vec<u16> = form.fields.iter().map(field_height).collect();
    let start = first_visible(&heights, active.unwrap_or(0), area.height);

    let mut y = area.y;
    let bottom = area.y + area.height;
    for (idx, field) in form.fields.iter().enumerate().skip(start) {
        let height = heights[idx];
        if y + height > bottom {
            break;
        }
        let field_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        };
        draw_field(frame, field_area, field, active == Some(idx));
        y += height;
    }
}

/// Index of the first field to draw so that `target` fits in `available` rows
fn first_visible(heights: &[u16], target: usize, available: u16) -> usize {
    let Some(target_height) = heights.get(target) else {
        return 0;
    };
    let mut used = *target_height;
    let mut start = target;
    while start > 0 && used + heights[start - 1] <= available {
        start -= 1;
        used += heights[start];
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_visible_keeps_target_on_screen() {
        let heights = [3, 3, 5, 3, 3];
        // Everything fits
        assert_eq!(first_visible(&heights, 4, 30), 0);
        // Only the last two fit
        assert_eq!(first_visible(&heights, 4, 6), 3);
        // Target taller than the area is still the first row
        assert_eq!(first_visible(&heights, 2, 4), 2);
        assert_eq!(first_visible(&heights, 9, 10), 0);
    }
}
