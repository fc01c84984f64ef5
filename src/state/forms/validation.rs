//! Field rules and the pure validation pass over a form snapshot

use super::field::Field;
use email_address::{EmailAddress, Options};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Optional leading `+`, then 6-15 digits with at most one separator between digits
const PHONE_PATTERN: &str = r"^\+?[0-9](?:[ .\-]?[0-9]){5,14}$";

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern compiles"))
}

/// Whether `value` looks like a phone number
pub fn is_phone(value: &str) -> bool {
    phone_regex().is_match(value)
}

/// A bare `local@domain.tld` address: no display name, no IP literal, no single-label host
pub fn is_email(value: &str) -> bool {
    let options = Options::default()
        .with_minimum_sub_domains(2)
        .without_domain_literal()
        .without_display_text();
    EmailAddress::parse_with_options(value, options).is_ok()
}

/// Snapshot of the form values, also the payload handed to the submit handler
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    pub name: String,
    pub telephone: String,
    pub email: String,
    pub language: String,
}

impl FormData {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Telephone => &self.telephone,
            Field::Email => &self.email,
            Field::Language => &self.language,
        }
    }
}

/// Why a configured language list was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LanguageOptionsError {
    #[error("`languages` must contain at least one option")]
    Empty,
    #[error("`languages` must not contain blank options")]
    Blank,
    #[error("`languages` lists {0:?} more than once")]
    Duplicate(String),
}

/// The closed, ordered set of selectable languages. Never empty, no blank or
/// repeated entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageOptions(Vec<String>);

impl LanguageOptions {
    pub fn new(options: Vec<String>) -> Result<Self, LanguageOptionsError> {
        if options.is_empty() {
            return Err(LanguageOptionsError::Empty);
        }
        for (i, option) in options.iter().enumerate() {
            if option.trim().is_empty() {
                return Err(LanguageOptionsError::Blank);
            }
            if options[..i].contains(option) {
                return Err(LanguageOptionsError::Duplicate(option.clone()));
            }
        }
        Ok(Self(options))
    }

    /// The first option, selected when the form is created
    pub fn default_option(&self) -> &str {
        &self.0[0]
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|o| o == value)
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Step from `current` to the neighbouring option, wrapping around.
    /// An unknown `current` restarts at the first option.
    pub fn step(&self, current: &str, forward: bool) -> &str {
        let count = self.0.len();
        let next = match self.0.iter().position(|o| o == current) {
            None => 0,
            Some(i) if forward => (i + 1) % count,
            Some(0) => count - 1,
            Some(i) => i - 1,
        };
        &self.0[next]
    }
}

impl Default for LanguageOptions {
    fn default() -> Self {
        Self(vec![
            "Čeština".to_string(),
            "Angličtina".to_string(),
            "Slovenčtina".to_string(),
        ])
    }
}

/// A single failed rule on one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The field is empty or whitespace-only
    #[error("{0}")]
    Required(&'static str),
    /// A value is present but has the wrong shape
    #[error("{0}")]
    Format(&'static str),
    /// The value is not one of the allowed options
    #[error("{0}")]
    InvalidOption(&'static str),
}

/// Shape check applied once the required check has passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCheck {
    None,
    Phone(&'static str),
    Email(&'static str),
    OneOf(&'static str),
}

/// Declarative constraint for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: Field,
    /// Message for an empty value; `None` makes the field optional
    pub required: Option<&'static str>,
    pub check: FieldCheck,
}

impl FieldRule {
    /// Evaluate the rule against a single value. Empty optional values pass.
    pub fn evaluate(&self, value: &str, options: &LanguageOptions) -> Option<FieldError> {
        if value.trim().is_empty() {
            return self.required.map(FieldError::Required);
        }

        match self.check {
            FieldCheck::None => None,
            FieldCheck::Phone(msg) => (!is_phone(value)).then_some(FieldError::Format(msg)),
            FieldCheck::Email(msg) => (!is_email(value)).then_some(FieldError::Format(msg)),
            FieldCheck::OneOf(msg) => {
                (!options.contains(value)).then_some(FieldError::InvalidOption(msg))
            }
        }
    }
}

/// Rules for every field of the contact form
pub const RULES: [FieldRule; 4] = [
    FieldRule {
        field: Field::Name,
        required: Some("Pole jméno je povinné"),
        check: FieldCheck::None,
    },
    FieldRule {
        field: Field::Telephone,
        required: Some("Pole telefon je povinné"),
        check: FieldCheck::Phone("Nesprávný formát telefonního čísla"),
    },
    FieldRule {
        field: Field::Email,
        required: Some("Pole Email je povinné"),
        check: FieldCheck::Email("Nesprávný formát emailu"),
    },
    FieldRule {
        field: Field::Language,
        required: Some("Vyberte hlavní jazyk"),
        check: FieldCheck::OneOf("Neznámý jazyk"),
    },
];

/// Per-field errors; empty means the form is valid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    #[cfg(test)]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.0.iter().map(|(f, e)| (*f, e))
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }

    /// Keep only the errors whose field satisfies `keep`
    pub fn filtered(&self, keep: impl Fn(Field) -> bool) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(f, _)| keep(**f))
                .map(|(f, e)| (*f, *e))
                .collect(),
        )
    }
}

/// Run every rule against `data`. Pure: same input, same output.
pub fn validate(data: &FormData, options: &LanguageOptions) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for rule in &RULES {
        if let Some(error) = rule.evaluate(data.get(rule.field), options) {
            errors.insert(rule.field, error);
        }
    }
    errors
}
