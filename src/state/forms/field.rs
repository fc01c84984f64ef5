//! Form field value objects

/// The fixed set of fields on the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Telephone,
    Email,
    Language,
}

impl Field {
    /// All fields in display order
    pub const ALL: [Field; 4] = [Field::Name, Field::Telephone, Field::Email, Field::Language];

    /// Label shown as the field's block title
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Jméno",
            Field::Telephone => "Telefon",
            Field::Email => "Email",
            Field::Language => "Hlavní jazyk",
        }
    }

    /// Whether the field is a selection rather than free text
    pub fn is_select(self) -> bool {
        matches!(self, Field::Language)
    }
}

/// A single form field with its current value and touched flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub field: Field,
    pub value: String,
    /// Set once the user has edited the field
    pub touched: bool,
}

impl FormField {
    /// Create an empty, untouched field
    pub fn new(field: Field) -> Self {
        Self::with_value(field, String::new())
    }

    /// Create an untouched field with an initial value
    pub fn with_value(field: Field, value: String) -> Self {
        Self {
            field,
            value,
            touched: false,
        }
    }

    pub fn label(&self) -> &'static str {
        self.field.label()
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    /// Replace the value and mark the field touched
    pub fn set_text(&mut self, value: String) {
        self.value = value;
        self.touched = true;
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        if self.field.is_select() {
            format!("◀ {} ▶", self.value)
        } else {
            self.value.clone()
        }
    }
}
