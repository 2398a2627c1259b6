//! Upload step: document path input and extracted details

use super::widgets::{inner, render_placeholder};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the upload step
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Upload Your Document ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);
    let inner = inner(area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Path input
            Constraint::Length(2), // Selected file / progress
            Constraint::Min(0),    // Extracted details
        ])
        .split(inner);

    draw_path_input(frame, chunks[0], app);
    draw_selection(frame, chunks[1], app);
    draw_extracted(frame, chunks[2], app);
}

fn draw_path_input(frame: &mut Frame, area: Rect, app: &App) {
    let content = if app.path_input.is_empty() {
        Line::from(vec![
            Span::styled("▌", Style::default().fg(Color::Cyan)),
            Span::styled(
                "Drag & drop your file here, or type its path (image or PDF)",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else {
        Line::from(vec![
            Span::raw(app.path_input.as_str()),
            Span::styled("▌", Style::default().fg(Color::Cyan)),
        ])
    };

    let block = Block::default()
        .title(" File ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn draw_selection(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let mut lines = vec![];

    match &state.selected_file {
        Some(file) => lines.push(Line::from(vec![
            Span::styled(" ✓ ", Style::default().fg(Color::Green)),
            Span::styled(
                file.name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({})", file.mime),
                Style::default().fg(Color::DarkGray),
            ),
        ])),
        None => lines.push(Line::from(Span::styled(
            " No file selected",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let action = if state.is_extracting() {
        Span::styled(" Processing...", Style::default().fg(Color::Yellow))
    } else if state.can_extract() {
        Span::styled(" Press Ctrl+E to extract", Style::default().fg(Color::Cyan))
    } else {
        Span::raw("")
    };
    lines.push(Line::from(action));

    frame.render_widget(Paragraph::new(lines), area);
}

/// Two-column grid of extracted entities
fn draw_extracted(frame: &mut Frame, area: Rect, app: &App) {
    let entries = app.state.extracted.display_entries();
    if entries.is_empty() {
        if app.state.is_extracting() {
            render_placeholder(
                frame,
                area,
                vec![Line::from("Extracting details from the document...")],
                Color::Yellow,
            );
        }
        return;
    }

    let block = Block::default()
        .title(format!(
            " ✓ Extracted Information ({}) ",
            app.state.extracted.len()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(block, area);
    let inner = inner(area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    for (col, column_area) in columns.iter().enumerate() {
        let lines: Vec<Line> = entries
            .iter()
            .skip(col)
            .step_by(2)
            .flat_map(|(label, value)| {
                [
                    Line::from(Span::styled(
                        format!(" {label}"),
                        Style::default().fg(Color::DarkGray),
                    )),
                    Line::from(format!(" {value}")),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), *column_area);
    }

    let proceed = Paragraph::new(Line::from(Span::styled(
        " Proceed to Forms: Ctrl+F ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(proceed, chunks[1]);
}
