//! Layout components (header, notices, tab bar, status bar)

use crate::app::App;
use crate::state::{Notice, NoticeKind, Tab};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Tabs in display order
const TABS: [Tab; 2] = [Tab::Upload, Tab::Forms];

/// Screen regions, top to bottom
pub struct Areas {
    pub header: Rect,
    pub notices: Rect,
    pub tabs: Rect,
    pub content: Rect,
    pub status: Rect,
}

/// Split the screen; the notice region only takes rows while notices are set
pub fn create_layout(area: Rect, app: &App) -> Areas {
    let notice_rows = [app.state.notices.success(), app.state.notices.error()]
        .iter()
        .filter(|n| n.is_some())
        .count() as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Header
            Constraint::Length(notice_rows), // Notices
            Constraint::Length(1),           // Tab bar
            Constraint::Min(0),              // Content
            Constraint::Length(1),           // Status bar
        ])
        .split(area);

    Areas {
        header: chunks[0],
        notices: chunks[1],
        tabs: chunks[2],
        content: chunks[3],
        status: chunks[4],
    }
}

/// Draw the title header
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            " AI Form Filling Assistant ",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Automated Government Form Filling",
            Style::default().fg(Color::Gray),
        ),
    ];
    if !app.backend_url().is_empty() {
        spans.push(Span::styled(
            format!("  |  {}", app.backend_url()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)),
    );
    frame.render_widget(header, area);
}

/// Draw the success and error banners, one row each
pub fn draw_notices(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = [app.state.notices.success(), app.state.notices.error()]
        .into_iter()
        .flatten()
        .map(notice_line)
        .collect();
    if lines.is_empty() {
        return;
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn notice_line(notice: &Notice) -> Line<'_> {
    let (icon, color) = match notice.kind {
        NoticeKind::Success => (" ✓ ", Color::Green),
        NoticeKind::Error => (" ✗ ", Color::Red),
    };
    Line::from(vec![
        Span::styled(icon, Style::default().fg(Color::Black).bg(color)),
        Span::styled(format!(" {}", notice.message), Style::default().fg(color)),
    ])
}

/// Draw the step tabs
pub fn draw_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];
    for (idx, tab) in TABS.iter().enumerate() {
        let style = if *tab == app.state.active_tab {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" F{}  {} ", idx + 1, tab.label()), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Busy indicator
    let busy = if app.state.is_extracting() {
        Some("Processing...")
    } else if app.state.is_auto_filling() {
        Some("Auto-filling...")
    } else {
        None
    };
    spans.push(match busy {
        Some(label) => Span::styled(format!(" ● {label} "), Style::default().fg(Color::Yellow)),
        None => Span::styled(" ○ ", Style::default().fg(Color::Green)),
    });

    spans.push(Span::styled(
        get_view_hints(app),
        Style::default().fg(Color::Gray),
    ));

    let quit_hint = " ^C:quit ";
    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Render quit hint on the right
    let width = quit_hint.len() as u16;
    if area.width > width {
        let quit_area = Rect {
            x: area.x + area.width - width,
            y: area.y,
            width,
            height: area.height,
        };
        let quit_widget =
            Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
        frame.render_widget(quit_widget, quit_area);
    }
}

/// Keyboard hints for the current context
fn get_view_hints(app: &App) -> String {
    let state = &app.state;
    match state.active_tab {
        Tab::Upload if state.extracted.is_empty() => {
            "type/paste path  Enter:select  ^E:extract  Esc:clear  F2:forms".to_string()
        }
        Tab::Upload => "Enter:select  ^E:extract  ^F:proceed to forms  F2:forms".to_string(),
        Tab::Forms if state.edit_mode => {
            "Tab/↑↓:field  ←→:option  Enter:newline/next  Esc:done".to_string()
        }
        Tab::Forms if state.filled_form.is_some() => {
            "j/k:nav  Enter:fill  e:edit  s:json  p:pdf  y:copy  u:upload another".to_string()
        }
        Tab::Forms => "j/k:nav  Enter:fill  u:upload another  F1:upload".to_string(),
    }
}
