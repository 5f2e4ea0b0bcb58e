//! Registration DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::FieldError;

/// Response body for `POST /registrations/validate`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationResponse {
    /// `true` when every field passed.
    pub valid: bool,
    /// Failing fields with inline messages.
    pub fields: Vec<FieldError>,
}

impl From<Vec<FieldError>> for ValidationResponse {
    fn from(fields: Vec<FieldError>) -> Self {
        Self {
            valid: fields.is_empty(),
            fields,
        }
    }
}
