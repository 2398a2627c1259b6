//! Application state and core logic

use crate::api::{ApiError, FileUpload, FormApi};
use crate::export;
use crate::state::{
    cycle_option, newline, pop_char, push_char, ExtractedEntities, FieldCursor, FieldType,
    FilledForm, FormField, FormSummary, NoticeKind, RequestId, RequestKind, SelectedFile, Tab,
    WorkflowEvent, WorkflowState,
};
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Outcome of a background backend call
#[derive(Debug)]
pub enum ApiEvent {
    CatalogLoaded(Result<Vec<FormSummary>, ApiError>),
    Extracted {
        request: RequestId,
        result: Result<ExtractedEntities, String>,
    },
    AutoFilled {
        request: RequestId,
        result: Result<Option<FilledForm>, String>,
    },
}

/// Main application struct
pub struct App {
    /// Current workflow state
    pub state: WorkflowState,
    /// Backend client shared with background requests
    api: Arc<dyn FormApi>,
    events_tx: UnboundedSender<ApiEvent>,
    events_rx: UnboundedReceiver<ApiEvent>,
    /// Where exported files are written
    export_dir: PathBuf,
    /// Backend address shown in the header
    backend_url: String,
    /// Path typed or pasted into the upload box
    pub path_input: String,
    /// Highlighted entry in the form catalog
    pub catalog_index: usize,
    /// Field being edited in edit mode
    pub field_cursor: FieldCursor,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(api: Arc<dyn FormApi>, export_dir: PathBuf) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: WorkflowState::default(),
            api,
            events_tx,
            events_rx,
            export_dir,
            backend_url: String::new(),
            path_input: String::new(),
            catalog_index: 0,
            field_cursor: FieldCursor::default(),
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn set_backend_url(&mut self, url: impl Into<String>) {
        self.backend_url = url.into();
    }

    fn dispatch(&mut self, event: WorkflowEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(event, Instant::now());
    }

    fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.dispatch(WorkflowEvent::Notify {
            kind,
            message: message.into(),
        });
    }

    /// Fetch the form catalog in the background
    pub fn load_catalog(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.list_forms().await;
            tx.send(ApiEvent::CatalogLoaded(result)).ok();
        });
    }

    /// Apply finished requests and expire notices; called once per frame
    pub fn tick(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_api_event(event);
        }
        self.dispatch(WorkflowEvent::Tick);
    }

    /// Wait for the next finished background request
    #[cfg(test)]
    pub async fn next_api_event(&mut self) -> Option<ApiEvent> {
        self.events_rx.recv().await
    }

    pub fn handle_api_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::CatalogLoaded(Ok(forms)) => {
                self.catalog_index = 0;
                self.dispatch(WorkflowEvent::CatalogLoaded(forms));
            }
            ApiEvent::CatalogLoaded(Err(err)) => {
                // The forms tab shows its empty state
                tracing::warn!("Error fetching forms: {err}");
            }
            ApiEvent::Extracted { request, result } => match result {
                Ok(entities) => {
                    self.dispatch(WorkflowEvent::ExtractSucceeded { request, entities })
                }
                Err(detail) => self.dispatch(WorkflowEvent::ExtractFailed { request, detail }),
            },
            ApiEvent::AutoFilled { request, result } => match result {
                Ok(form) => {
                    let before = self.state.filled_form.clone();
                    self.dispatch(WorkflowEvent::AutoFillSucceeded { request, form });
                    if self.state.filled_form != before {
                        self.field_cursor.reset();
                    }
                }
                Err(detail) => self.dispatch(WorkflowEvent::AutoFillFailed { request, detail }),
            },
        }
    }

    /// Pick the document at `raw` (typed, pasted, or dropped)
    pub fn select_file_path(&mut self, raw: &str) {
        match SelectedFile::open(raw) {
            Ok(file) => {
                self.path_input = file.path.display().to_string();
                self.dispatch(WorkflowEvent::SelectFile(file));
            }
            Err(err) => {
                tracing::warn!("Rejected file: {err}");
                self.notify(NoticeKind::Error, err.to_string());
            }
        }
    }

    /// Upload the selected file for extraction
    pub fn start_extract(&mut self) {
        self.dispatch(WorkflowEvent::ExtractRequested);
        let (Some(request), Some(file)) = (
            self.state.in_flight(RequestKind::Extract),
            self.state.selected_file.clone(),
        ) else {
            return;
        };

        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = match tokio::fs::read(&file.path).await {
                Ok(bytes) => api
                    .extract(FileUpload {
                        file_name: file.name,
                        mime: file.mime,
                        bytes,
                    })
                    .await
                    .map_err(|e| e.failure().to_string()),
                Err(err) => Err(format!("could not read {}: {err}", file.path.display())),
            };
            tx.send(ApiEvent::Extracted { request, result }).ok();
        });
    }

    /// Auto-fill `form_id` from the extracted entities
    pub fn choose_form(&mut self, form_id: String) {
        self.dispatch(WorkflowEvent::AutoFillRequested {
            form_id: form_id.clone(),
        });
        let Some(request) = self.state.in_flight(RequestKind::AutoFill) else {
            return;
        };

        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        let entities = self.state.extracted.clone();
        tokio::spawn(async move {
            let result = api
                .auto_fill(entities, form_id)
                .await
                .map_err(|e| e.failure().to_string());
            tx.send(ApiEvent::AutoFilled { request, result }).ok();
        });
    }

    /// Start over with a new document
    pub fn reset(&mut self) {
        self.path_input.clear();
        self.field_cursor.reset();
        self.dispatch(WorkflowEvent::Reset);
    }

    pub fn toggle_edit_mode(&mut self) {
        self.dispatch(WorkflowEvent::ToggleEditMode);
    }

    pub fn edit_field(&mut self, field_id: &str, value: String) {
        self.dispatch(WorkflowEvent::EditField {
            field_id: field_id.to_string(),
            value,
        });
    }

    pub fn export_json(&mut self) {
        if self.state.filled_form.is_none() {
            return;
        }
        match export::save_json(self.state.filled_form.as_ref(), &self.export_dir, Local::now()) {
            Ok(path) => self.notify(
                NoticeKind::Success,
                format!("JSON downloaded successfully! ({})", path.display()),
            ),
            Err(err) => {
                tracing::error!("JSON export failed: {err}");
                self.notify(NoticeKind::Error, format!("JSON Error: {err}"));
            }
        }
    }

    pub fn export_pdf(&mut self) {
        if self.state.filled_form.is_none() {
            return;
        }
        match export::save_pdf(self.state.filled_form.as_ref(), &self.export_dir, Local::now()) {
            Ok(path) => self.notify(
                NoticeKind::Success,
                format!("PDF downloaded successfully! ({})", path.display()),
            ),
            Err(err) => {
                tracing::error!("PDF Error: {err}");
                self.notify(NoticeKind::Error, format!("PDF Error: {err}"));
            }
        }
    }

    /// Copy the filled form's JSON to the system clipboard
    pub fn copy_json(&mut self) {
        let Some(form) = self.state.filled_form.as_ref() else {
            return;
        };
        let result = export::to_json(form)
            .map_err(anyhow::Error::from)
            .and_then(|json| copy_to_clipboard(&json));
        match result {
            Ok(()) => self.notify(NoticeKind::Success, "JSON copied to clipboard!"),
            Err(err) => {
                tracing::warn!("Clipboard copy failed: {err}");
                self.notify(NoticeKind::Error, format!("Clipboard Error: {err}"));
            }
        }
    }

    /// Handle text pasted into the terminal; dropping a file pastes its path
    pub fn handle_paste(&mut self, text: &str) {
        match self.state.active_tab {
            Tab::Upload => self.select_file_path(text),
            Tab::Forms if self.state.edit_mode => {
                let Some(field) = self.active_field().cloned() else {
                    return;
                };
                if field.field_type != FieldType::Select {
                    let value = format!("{}{}", field.value, text);
                    self.edit_field(&field.field_id, value);
                }
            }
            Tab::Forms => {}
        }
    }

    /// The field under the edit cursor
    pub fn active_field(&self) -> Option<&FormField> {
        self.state
            .filled_form
            .as_ref()
            .and_then(|form| self.field_cursor.current(form))
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                self.quit = true;
                return;
            }
            KeyCode::F(1) => {
                self.dispatch(WorkflowEvent::SwitchTab(Tab::Upload));
                return;
            }
            KeyCode::F(2) => {
                self.dispatch(WorkflowEvent::SwitchTab(Tab::Forms));
                return;
            }
            _ => {}
        }

        match self.state.active_tab {
            Tab::Upload => self.handle_upload_key(key, ctrl),
            Tab::Forms if self.state.edit_mode => self.handle_edit_key(key, ctrl),
            Tab::Forms => self.handle_forms_key(key),
        }
    }

    /// Handle keys on the upload step
    fn handle_upload_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Char('e') if ctrl => self.start_extract(),
            KeyCode::Char('f') if ctrl => {
                if !self.state.extracted.is_empty() {
                    self.dispatch(WorkflowEvent::SwitchTab(Tab::Forms));
                }
            }
            KeyCode::Char(c) if !ctrl => self.path_input.push(c),
            KeyCode::Backspace => {
                self.path_input.pop();
            }
            KeyCode::Esc => self.path_input.clear(),
            KeyCode::Enter => {
                let input = self.path_input.clone();
                if !input.trim().is_empty() {
                    self.select_file_path(&input);
                }
            }
            _ => {}
        }
    }

    /// Handle keys on the form step outside edit mode
    fn handle_forms_key(&mut self, key: KeyEvent) {
        let count = self.state.available_forms.len();
        match key.code {
            KeyCode::Char('k') | KeyCode::Up => {
                self.catalog_index = self.catalog_index.saturating_sub(1);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if self.catalog_index + 1 < count {
                    self.catalog_index += 1;
                }
            }
            KeyCode::Enter => {
                let form_id = self
                    .state
                    .available_forms
                    .get(self.catalog_index)
                    .map(|f| f.form_id.clone());
                if let Some(form_id) = form_id {
                    self.choose_form(form_id);
                }
            }
            KeyCode::Char('e') => {
                self.field_cursor.reset();
                self.toggle_edit_mode();
            }
            KeyCode::Char('s') => self.export_json(),
            KeyCode::Char('p') => self.export_pdf(),
            KeyCode::Char('y') => self.copy_json(),
            KeyCode::Char('u') => self.reset(),
            _ => {}
        }
    }

    /// Handle keys while editing field values
    fn handle_edit_key(&mut self, key: KeyEvent, ctrl: bool) {
        let count = self
            .state
            .filled_form
            .as_ref()
            .map(|f| f.fields.len())
            .unwrap_or(0);
        self.field_cursor.clamp(count);

        let Some(field) = self.active_field().cloned() else {
            if key.code == KeyCode::Esc {
                self.toggle_edit_mode();
            }
            return;
        };

        let value = match key.code {
            KeyCode::Esc => {
                self.toggle_edit_mode();
                None
            }
            KeyCode::Char('s') if ctrl => {
                self.toggle_edit_mode();
                None
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.field_cursor.prev(count);
                None
            }
            KeyCode::Down | KeyCode::Tab => {
                self.field_cursor.next(count);
                None
            }
            KeyCode::Left => cycle_option(&field, false),
            KeyCode::Right => cycle_option(&field, true),
            KeyCode::Enter => {
                let value = newline(&field);
                if value.is_none() {
                    self.field_cursor.next(count);
                }
                value
            }
            KeyCode::Backspace => pop_char(&field),
            KeyCode::Char(c) if !ctrl => push_char(&field, c),
            _ => None,
        };

        if let Some(value) = value {
            self.edit_field(&field.field_id, value);
        }
    }
}

fn copy_to_clipboard(text: &str) -> anyhow::Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}
