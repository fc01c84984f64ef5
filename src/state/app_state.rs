//! Application state definitions

use super::forms::{ContactForm, FormSettings};
use std::collections::VecDeque;

/// Modal message shown over the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Confirmation text returned by the submit handler
    Submitted(String),
    Error(String),
}

impl Dialog {
    pub fn title(&self) -> &'static str {
        match self {
            Dialog::Submitted(_) => "Odesláno",
            Dialog::Error(_) => "Chyba",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Dialog::Submitted(m) | Dialog::Error(m) => m,
        }
    }
}

/// Everything the UI needs to draw a frame
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub form: ContactForm,
    /// One-line feedback in the status bar
    pub status_message: Option<String>,
    /// Pending dialogs, front is displayed
    pub dialogs: VecDeque<Dialog>,
}

impl AppState {
    pub fn new(settings: FormSettings) -> Self {
        Self {
            form: ContactForm::new(settings),
            ..Default::default()
        }
    }

    pub fn push_dialog(&mut self, dialog: Dialog) {
        self.dialogs.push_back(dialog);
    }

    pub fn push_error(&mut self, message: String) {
        self.push_dialog(Dialog::Error(message));
    }

    pub fn current_dialog(&self) -> Option<&Dialog> {
        self.dialogs.front()
    }

    /// Close the displayed dialog, returns false when none was open
    pub fn dismiss_dialog(&mut self) -> bool {
        self.dialogs.pop_front().is_some()
    }
}
