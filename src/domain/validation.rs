//! Registration form validation.
//!
//! Each predicate is exposed on its own so a form can validate a single
//! field on blur, and [`RegistrationForm::validate`] runs all of them
//! together (without short-circuiting) before a registration is attempted.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::EventId;
use super::notice::INVALID_FORM_NOTICE;

/// Minimum registrant name length, in characters, after trimming.
pub const MIN_NAME_CHARS: usize = 2;

/// Exact number of decimal digits in a student id.
pub const STUDENT_ID_DIGITS: usize = 7;

/// Raw registration form input, untrimmed and unchecked.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    /// Selected event id; empty when nothing is selected.
    #[serde(default)]
    pub event_id: String,
    /// Registrant name.
    #[serde(default)]
    pub name: String,
    /// Registrant student id.
    #[serde(default)]
    pub student_id: String,
}

/// Form input that passed every predicate, already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    /// Selected event.
    pub event_id: EventId,
    /// Trimmed registrant name.
    pub name: String,
    /// Trimmed seven-digit student id.
    pub student_id: String,
}

/// Form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    /// Registrant name input.
    Name,
    /// Student id input.
    StudentId,
    /// Event selector.
    EventId,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Offending field.
    pub field: FormField,
    /// Inline message for the field.
    pub message: String,
}

impl FieldError {
    fn new(field: FormField, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Every field-level failure found in one form submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    fields: Vec<FieldError>,
}

impl ValidationErrors {
    /// Returns the individual field errors in form order.
    #[must_use]
    pub fn fields(&self) -> &[FieldError] {
        &self.fields
    }

    /// Returns `true` if the given field failed.
    #[must_use]
    pub fn has(&self, field: FormField) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }

    /// Returns `true` if no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(INVALID_FORM_NOTICE)
    }
}

/// Checks the registrant name.
///
/// # Errors
///
/// Returns the field error when the trimmed name is empty or shorter than
/// [`MIN_NAME_CHARS`] characters.
pub fn validate_name(name: &str) -> Result<String, FieldError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FieldError::new(FormField::Name, "Name is required."));
    }
    if name.chars().count() < MIN_NAME_CHARS {
        return Err(FieldError::new(
            FormField::Name,
            "Name must be at least 2 characters.",
        ));
    }
    Ok(name.to_string())
}

/// Checks the student id.
///
/// # Errors
///
/// Returns the field error when the trimmed id is empty or is not exactly
/// [`STUDENT_ID_DIGITS`] ASCII digits.
pub fn validate_student_id(student_id: &str) -> Result<String, FieldError> {
    let student_id = student_id.trim();
    if student_id.is_empty() {
        return Err(FieldError::new(
            FormField::StudentId,
            "Student ID is required.",
        ));
    }
    if !is_student_id(student_id) {
        return Err(FieldError::new(
            FormField::StudentId,
            "Student ID must be exactly 7 digits.",
        ));
    }
    Ok(student_id.to_string())
}

/// Checks that an event was selected.
///
/// # Errors
///
/// Returns the field error when the selection is empty.
pub fn validate_selection(event_id: &str) -> Result<EventId, FieldError> {
    if event_id.is_empty() {
        return Err(FieldError::new(FormField::EventId, "Please select an event."));
    }
    Ok(EventId::new(event_id))
}

/// Returns `true` for exactly seven ASCII decimal digits.
#[must_use]
pub fn is_student_id(value: &str) -> bool {
    value.len() == STUDENT_ID_DIGITS && value.bytes().all(|b| b.is_ascii_digit())
}

impl RegistrationForm {
    /// Creates a form from its three inputs.
    #[must_use]
    pub fn new(
        event_id: impl Into<String>,
        name: impl Into<String>,
        student_id: impl Into<String>,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            name: name.into(),
            student_id: student_id.into(),
        }
    }

    /// Runs every predicate and collects all failures.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing each failing field.
    pub fn validate(&self) -> Result<ValidRegistration, ValidationErrors> {
        let name = validate_name(&self.name);
        let student_id = validate_student_id(&self.student_id);
        let event_id = validate_selection(&self.event_id);

        match (name, student_id, event_id) {
            (Ok(name), Ok(student_id), Ok(event_id)) => Ok(ValidRegistration {
                event_id,
                name,
                student_id,
            }),
            (name, student_id, event_id) => {
                let fields = [name.err(), student_id.err(), event_id.err()]
                    .into_iter()
                    .flatten()
                    .collect();
                Err(ValidationErrors { fields })
            }
        }
    }
}
