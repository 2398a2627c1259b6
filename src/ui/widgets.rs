//! Reusable UI widget helpers

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{List, ListState, Paragraph, Wrap},
    Frame,
};

/// Render a list scrolled so the selected item stays visible
pub fn render_scrollable_list(frame: &mut Frame, area: Rect, list: List, selected_index: usize) {
    let mut list_state = ListState::default().with_selected(Some(selected_index));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Area inside a bordered block
pub fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Centered, dimmed message for empty and loading states
pub fn render_placeholder(frame: &mut Frame, area: Rect, lines: Vec<Line>, color: Color) {
    let top_pad = area.height.saturating_sub(lines.len() as u16) / 2;
    let area = Rect {
        y: area.y + top_pad,
        height: area.height.saturating_sub(top_pad),
        ..area
    };
    let message = Paragraph::new(lines)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(message, area);
}
