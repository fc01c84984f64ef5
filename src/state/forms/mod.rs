//! Form domain layer
//!
//! Field values, the validation rule table and the submit-gating phase
//! machine of the contact form. Nothing in here performs I/O.

mod field;
mod form_state;
mod validation;

pub use field::{Field, FormField};
pub use form_state::{ContactForm, Form, FormPhase, FormSettings, ValidationMode};
pub use validation::{FieldError, FormData, LanguageOptions};

#[cfg(test)]
pub use form_state::{Validity, SUBMIT_SLOT};
