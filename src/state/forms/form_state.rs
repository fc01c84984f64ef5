//! Contact form state and the submit-gating phase machine

use super::field::{Field, FormField};
use super::validation::{validate, FormData, LanguageOptions, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// When field errors become visible to the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Show errors for each field as soon as it is edited
    #[default]
    OnChange,
    /// Show errors only after the first submit attempt
    OnSubmit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid,
}

/// Where the form is in its edit/submit lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// No field touched yet
    Pristine,
    Editing(Validity),
    /// The submit handler is running; edits and submits are ignored
    Submitting,
    /// The last submit succeeded and nothing changed since
    Submitted,
}

/// Why a submit request did not reach the handler
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRefused {
    #[error("formulář obsahuje chyby ({})", .0.len())]
    Invalid(ValidationErrors),
    #[error("odesílání již probíhá")]
    InProgress,
    #[error("formulář již byl odeslán")]
    AlreadySubmitted,
}

/// Behaviour knobs, usually taken from the config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSettings {
    pub languages: LanguageOptions,
    pub mode: ValidationMode,
    pub reset_after_submit: bool,
    pub allow_resubmit: bool,
}

/// Focus slot of the submit button, after the four fields
pub const SUBMIT_SLOT: usize = 4;

#[derive(Debug, Clone)]
pub struct ContactForm {
    pub name: FormField,
    pub telephone: FormField,
    pub email: FormField,
    pub language: FormField,
    pub active_field_index: usize,
    settings: FormSettings,
    errors: ValidationErrors,
    phase: FormPhase,
    submit_attempted: bool,
    /// Data accepted by the last successful submit
    last_submitted: Option<FormData>,
}

impl ContactForm {
    pub fn new(settings: FormSettings) -> Self {
        let language = settings.languages.default_option().to_string();
        let mut form = Self {
            name: FormField::new(Field::Name),
            telephone: FormField::new(Field::Telephone),
            email: FormField::new(Field::Email),
            language: FormField::with_value(Field::Language, language),
            active_field_index: 0,
            settings,
            errors: ValidationErrors::default(),
            phase: FormPhase::Pristine,
            submit_attempted: false,
            last_submitted: None,
        };
        form.errors = validate(&form.data(), &form.settings.languages);
        form
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn field(&self, field: Field) -> &FormField {
        match field {
            Field::Name => &self.name,
            Field::Telephone => &self.telephone,
            Field::Email => &self.email,
            Field::Language => &self.language,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut FormField {
        match field {
            Field::Name => &mut self.name,
            Field::Telephone => &mut self.telephone,
            Field::Email => &mut self.email,
            Field::Language => &mut self.language,
        }
    }

    /// Snapshot of the current values
    pub fn data(&self) -> FormData {
        FormData {
            name: self.name.value.clone(),
            telephone: self.telephone.value.clone(),
            email: self.email.value.clone(),
            language: self.language.value.clone(),
        }
    }

    /// Field under focus, `None` when the submit button is focused
    pub fn active(&self) -> Option<Field> {
        Field::ALL.get(self.active_field_index).copied()
    }

    pub fn is_submit_focused(&self) -> bool {
        self.active_field_index == SUBMIT_SLOT
    }

    /// Replace a field value and recompute validation from scratch.
    /// Returns false when ignored because a submit is in flight.
    pub fn set_field(&mut self, field: Field, value: String) -> bool {
        if self.phase == FormPhase::Submitting {
            return false;
        }
        self.field_mut(field).set_text(value);
        self.errors = validate(&self.data(), &self.settings.languages);
        self.phase = FormPhase::Editing(self.validity());
        true
    }

    pub fn select_language(&mut self, value: &str) -> bool {
        self.set_field(Field::Language, value.to_string())
    }

    /// Move the language selection one option forward or back
    pub fn cycle_language(&mut self, forward: bool) -> bool {
        let next = self
            .settings
            .languages
            .step(self.language.as_text(), forward)
            .to_string();
        self.select_language(&next)
    }

    /// Append a character to the focused text field
    pub fn input_char(&mut self, c: char) -> bool {
        match self.active() {
            Some(field) if !field.is_select() => {
                let mut value = self.field(field).value.clone();
                value.push(c);
                self.set_field(field, value)
            }
            _ => false,
        }
    }

    /// Remove the last character of the focused text field
    pub fn backspace(&mut self) -> bool {
        match self.active() {
            Some(field) if !field.is_select() => {
                let mut value = self.field(field).value.clone();
                if value.pop().is_none() {
                    return false;
                }
                self.set_field(field, value)
            }
            _ => false,
        }
    }

    pub fn validity(&self) -> Validity {
        if self.errors.is_empty() {
            Validity::Valid
        } else {
            Validity::Invalid
        }
    }

    /// Full validation result, independent of what is shown
    #[cfg(test)]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Errors the user should currently see
    pub fn visible_errors(&self) -> ValidationErrors {
        if self.submit_attempted {
            return self.errors.clone();
        }
        match self.settings.mode {
            ValidationMode::OnChange => self.errors.filtered(|f| self.field(f).touched),
            ValidationMode::OnSubmit => ValidationErrors::default(),
        }
    }

    /// Whether a submit request would reach the handler right now
    pub fn can_submit(&self) -> bool {
        self.errors.is_empty()
            && self.phase != FormPhase::Submitting
            && !self.repeats_last_submit()
    }

    /// The current values equal the last accepted submit and resubmitting is off
    fn repeats_last_submit(&self) -> bool {
        !self.settings.allow_resubmit && self.last_submitted.as_ref() == Some(&self.data())
    }

    /// Gate a submit request. On success the form is latched in `Submitting`
    /// and the returned snapshot must be handed to the submit handler.
    pub fn begin_submit(&mut self) -> Result<FormData, SubmitRefused> {
        if self.phase == FormPhase::Submitting {
            return Err(SubmitRefused::InProgress);
        }
        if self.repeats_last_submit() {
            return Err(SubmitRefused::AlreadySubmitted);
        }

        let data = self.data();
        self.errors = validate(&data, &self.settings.languages);
        if !self.errors.is_empty() {
            self.submit_attempted = true;
            self.phase = FormPhase::Editing(Validity::Invalid);
            return Err(SubmitRefused::Invalid(self.errors.clone()));
        }

        self.phase = FormPhase::Submitting;
        Ok(data)
    }

    /// Release the submit latch once the handler has finished
    pub fn finish_submit(&mut self, succeeded: bool) {
        if self.phase != FormPhase::Submitting {
            return;
        }
        if !succeeded {
            self.phase = FormPhase::Editing(self.validity());
        } else if self.settings.reset_after_submit {
            self.reset();
        } else {
            self.submit_attempted = false;
            self.last_submitted = Some(self.data());
            self.phase = FormPhase::Submitted;
        }
    }

    /// Restore the initial values and go back to `Pristine`
    pub fn reset(&mut self) {
        *self = Self::new(self.settings.clone());
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new(FormSettings::default())
    }
}

impl Form for ContactForm {
    fn field_count(&self) -> usize {
        5 // name, telephone, email, language, submit
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(SUBMIT_SLOT);
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        Field::ALL.get(index).map(|f| self.field(*f))
    }
}
