//! Upload → form selection workflow
//!
//! [`WorkflowState`] is the single owner of everything the screens render.
//! It only changes through [`WorkflowState::apply`], which consumes the
//! state and an event and returns the next state.

use super::editor::edit_field;
use super::model::{ExtractedEntities, FilledForm, FormSummary, SelectedFile};
use super::notice::{
    NoticeKind, Notices, ERROR_DURATION, EXTRACT_SUCCESS_DURATION, SUCCESS_DURATION,
};
use std::time::Instant;

/// Workflow step shown in the tab bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Upload,
    Forms,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Upload => "Step 1: Upload",
            Self::Forms => "Step 2: Form",
        }
    }
}

/// Identifier attached to every extract and auto-fill call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Extract,
    AutoFill,
}

/// Tracks the latest request issued per kind.
///
/// Only the latest request of a kind may apply its response; anything
/// older finished after being superseded and is dropped.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    issued: u64,
    extract: Option<RequestId>,
    auto_fill: Option<RequestId>,
}

impl RequestTracker {
    fn issue(&mut self, kind: RequestKind) -> RequestId {
        self.issued += 1;
        let id = RequestId(self.issued);
        *self.slot_mut(kind) = Some(id);
        id
    }

    /// The outstanding request of `kind`, if any
    pub fn in_flight(&self, kind: RequestKind) -> Option<RequestId> {
        match kind {
            RequestKind::Extract => self.extract,
            RequestKind::AutoFill => self.auto_fill,
        }
    }

    /// Mark `id` settled. Returns false if `id` is not the latest request of
    /// its kind, in which case its response must be ignored.
    fn settle(&mut self, kind: RequestKind, id: RequestId) -> bool {
        let slot = self.slot_mut(kind);
        if *slot == Some(id) {
            *slot = None;
            true
        } else {
            false
        }
    }

    fn invalidate_all(&mut self) {
        self.extract = None;
        self.auto_fill = None;
    }

    fn slot_mut(&mut self, kind: RequestKind) -> &mut Option<RequestId> {
        match kind {
            RequestKind::Extract => &mut self.extract,
            RequestKind::AutoFill => &mut self.auto_fill,
        }
    }
}

/// Everything that can happen to the workflow
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    CatalogLoaded(Vec<FormSummary>),
    SelectFile(SelectedFile),
    ExtractRequested,
    ExtractSucceeded {
        request: RequestId,
        entities: ExtractedEntities,
    },
    ExtractFailed {
        request: RequestId,
        detail: String,
    },
    AutoFillRequested {
        form_id: String,
    },
    /// `form` is `None` when the backend answered without a filled form
    AutoFillSucceeded {
        request: RequestId,
        form: Option<FilledForm>,
    },
    AutoFillFailed {
        request: RequestId,
        detail: String,
    },
    Reset,
    SwitchTab(Tab),
    ToggleEditMode,
    EditField {
        field_id: String,
        value: String,
    },
    Notify {
        kind: NoticeKind,
        message: String,
    },
    Tick,
}

/// Workflow state owned by the application
#[derive(Debug, Clone, Default)]
pub struct WorkflowState {
    pub active_tab: Tab,
    pub available_forms: Vec<FormSummary>,
    pub selected_file: Option<SelectedFile>,
    pub extracted: ExtractedEntities,
    pub selected_form_id: Option<String>,
    pub filled_form: Option<FilledForm>,
    pub edit_mode: bool,
    pub notices: Notices,
    requests: RequestTracker,
}

impl WorkflowState {
    /// Apply `event` and return the resulting state
    pub fn apply(mut self, event: WorkflowEvent, now: Instant) -> Self {
        match event {
            WorkflowEvent::CatalogLoaded(forms) => {
                tracing::info!("Loaded {} forms", forms.len());
                self.available_forms = forms;
            }
            WorkflowEvent::SelectFile(file) => {
                tracing::debug!("Selected file {}", file.path.display());
                self.selected_file = Some(file);
            }
            WorkflowEvent::ExtractRequested => {
                if self.can_extract() {
                    let id = self.requests.issue(RequestKind::Extract);
                    tracing::debug!("Extraction request {} issued", id.get());
                    self.notices.clear_all();
                }
            }
            WorkflowEvent::ExtractSucceeded { request, entities } => {
                if self.settle(RequestKind::Extract, request) {
                    self.extracted = entities;
                    self.active_tab = Tab::Forms;
                    self.notices.post(
                        NoticeKind::Success,
                        "Document processed successfully!",
                        EXTRACT_SUCCESS_DURATION,
                        now,
                    );
                }
            }
            WorkflowEvent::ExtractFailed { request, detail } => {
                if self.settle(RequestKind::Extract, request) {
                    tracing::warn!("Extraction failed: {detail}");
                    self.notices.post(
                        NoticeKind::Error,
                        format!("Failed to extract details ({detail})"),
                        ERROR_DURATION,
                        now,
                    );
                }
            }
            WorkflowEvent::AutoFillRequested { form_id } => {
                let id = self.requests.issue(RequestKind::AutoFill);
                tracing::debug!("Auto-fill request {} issued for {form_id}", id.get());
                self.selected_form_id = Some(form_id);
                self.notices.clear(NoticeKind::Error);
            }
            WorkflowEvent::AutoFillSucceeded { request, form } => {
                if self.settle(RequestKind::AutoFill, request) {
                    if let Some(form) = form {
                        self.filled_form = Some(form);
                        self.edit_mode = false;
                        self.notices.post(
                            NoticeKind::Success,
                            "Form auto-filled successfully!",
                            SUCCESS_DURATION,
                            now,
                        );
                    }
                }
            }
            WorkflowEvent::AutoFillFailed { request, detail } => {
                if self.settle(RequestKind::AutoFill, request) {
                    tracing::warn!("Auto-fill failed: {detail}");
                    self.filled_form = None;
                    self.edit_mode = false;
                    self.notices.post(
                        NoticeKind::Error,
                        format!("Failed to auto-fill form ({detail})"),
                        ERROR_DURATION,
                        now,
                    );
                }
            }
            WorkflowEvent::Reset => {
                self.selected_file = None;
                self.extracted = ExtractedEntities::new();
                self.selected_form_id = None;
                self.filled_form = None;
                self.edit_mode = false;
                self.active_tab = Tab::Upload;
                self.requests.invalidate_all();
            }
            WorkflowEvent::SwitchTab(tab) => {
                self.active_tab = tab;
            }
            WorkflowEvent::ToggleEditMode => {
                // Leaving edit mode is always allowed; entering needs a
                // settled form.
                if self.edit_mode {
                    self.edit_mode = false;
                } else if self.filled_form.is_some() && !self.is_auto_filling() {
                    self.edit_mode = true;
                }
            }
            WorkflowEvent::EditField { field_id, value } => {
                if self.edit_mode {
                    if let Some(form) = &self.filled_form {
                        self.filled_form = Some(edit_field(form, &field_id, &value));
                    }
                }
            }
            WorkflowEvent::Notify { kind, message } => {
                let duration = match kind {
                    NoticeKind::Success => SUCCESS_DURATION,
                    NoticeKind::Error => ERROR_DURATION,
                };
                self.notices.post(kind, message, duration, now);
            }
            WorkflowEvent::Tick => {
                self.notices.expire_due(now);
            }
        }
        self
    }

    /// Whether an extraction may start: a file is chosen and none is running
    pub fn can_extract(&self) -> bool {
        self.selected_file.is_some() && !self.is_extracting()
    }

    pub fn is_extracting(&self) -> bool {
        self.requests.in_flight(RequestKind::Extract).is_some()
    }

    pub fn is_auto_filling(&self) -> bool {
        self.requests.in_flight(RequestKind::AutoFill).is_some()
    }

    /// Outstanding request of `kind`, used to tag the network call
    pub fn in_flight(&self, kind: RequestKind) -> Option<RequestId> {
        self.requests.in_flight(kind)
    }

    fn settle(&mut self, kind: RequestKind, request: RequestId) -> bool {
        let current = self.requests.settle(kind, request);
        if !current {
            tracing::debug!("Discarding stale {kind:?} response {}", request.get());
        }
        current
    }
}
