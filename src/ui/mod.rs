//! UI module for rendering the TUI

mod field_renderer;
mod forms;
mod layout;
mod upload;
mod widgets;

use crate::app::App;
use crate::state::Tab;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let areas = layout::create_layout(frame.area(), app);

    layout::draw_header(frame, areas.header, app);
    layout::draw_notices(frame, areas.notices, app);
    layout::draw_tabs(frame, areas.tabs, app);

    // Draw main content based on the active step
    match app.state.active_tab {
        Tab::Upload => upload::draw(frame, areas.content, app),
        Tab::Forms => forms::draw(frame, areas.content, app),
    }

    // Draw status bar
    layout::draw_status_bar(frame, areas.status, app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockFormApi;
    use crate::app::ApiEvent;
    use crate::state::{
        FieldType, FillSummary, FilledForm, FormField, FormSummary, RequestKind, WorkflowEvent,
    };
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;
    use std::sync::Arc;

    fn render(app: &App) -> String {
        let backend = TestBackend::new(110, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        App::new(Arc::new(MockFormApi::new()), PathBuf::from("."))
    }

    fn filled_app() -> App {
        let mut app = app();
        app.handle_api_event(ApiEvent::CatalogLoaded(Ok(vec![FormSummary {
            form_id: "pan_application".to_string(),
            form_name: "PAN Application Form".to_string(),
            department: "Income Tax Department".to_string(),
            description: String::new(),
        }])));
        app.state = std::mem::take(&mut app.state).apply(
            WorkflowEvent::AutoFillRequested {
                form_id: "pan_application".to_string(),
            },
            std::time::Instant::now(),
        );
        let request = app.state.in_flight(RequestKind::AutoFill).unwrap();
        app.handle_api_event(ApiEvent::AutoFilled {
            request,
            result: Ok(Some(FilledForm {
                form_id: "pan_application".to_string(),
                form_name: "PAN Application Form".to_string(),
                fields: vec![
                    FormField {
                        field_id: "full_name".to_string(),
                        field_label: "Full Name".to_string(),
                        value: "Asha Rao".to_string(),
                        filled: true,
                        required: true,
                        confidence: Some(92),
                        ..Default::default()
                    },
                    FormField {
                        field_id: "gender".to_string(),
                        field_label: "Gender".to_string(),
                        field_type: FieldType::Select,
                        options: vec!["Male".to_string(), "Female".to_string()],
                        ..Default::default()
                    },
                ],
                summary: FillSummary {
                    auto_filled: 1,
                    manual_required: 1,
                    ..Default::default()
                },
                ..Default::default()
            })),
        });
        app.state.active_tab = Tab::Forms;
        app
    }

    #[test]
    fn test_upload_screen() {
        let screen = render(&app());
        assert!(screen.contains("AI Form Filling Assistant"));
        assert!(screen.contains("Step 1: Upload"));
        assert!(screen.contains("Upload Your Document"));
    }

    #[test]
    fn test_empty_catalog_state() {
        let mut app = app();
        app.state.active_tab = Tab::Forms;
        let screen = render(&app);
        assert!(screen.contains("No Forms Available"));
        assert!(screen.contains("Ensure backend is running"));
    }

    #[test]
    fn test_filled_form_screen() {
        let screen = render(&filled_app());
        assert!(screen.contains("PAN Application Form"));
        assert!(screen.contains("Full Name *"));
        assert!(screen.contains("Asha Rao"));
        assert!(screen.contains("Select..."));
        assert!(screen.contains("92%"));
        assert!(screen.contains("Auto-Filled"));
        assert!(screen.contains("Form auto-filled successfully!"));
    }

    #[test]
    fn test_auto_filling_indicator_hides_form() {
        let mut app = filled_app();
        app.state = std::mem::take(&mut app.state).apply(
            WorkflowEvent::AutoFillRequested {
                form_id: "pan_application".to_string(),
            },
            std::time::Instant::now(),
        );
        let screen = render(&app);
        assert!(screen.contains("Auto-filling form..."));
        assert!(!screen.contains("Asha Rao"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let backend = TestBackend::new(20, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = filled_app();
        terminal.draw(|frame| draw(frame, &app)).unwrap();
    }
}
