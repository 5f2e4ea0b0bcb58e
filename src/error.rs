//! Registration error types with HTTP status code mapping.
//!
//! [`RegistrationError`] is the central error type of the crate. Each
//! variant maps to a numeric code, a short `kind` string understood by the
//! UI (`"invalid"`, `"full"`, ...) and an HTTP status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    EventId, FieldError, INVALID_FORM_NOTICE, RegistrationMode, ValidationErrors,
};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4001,
///     "kind": "full",
///     "message": "event e4 is fully booked"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code, kind and message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Short machine-readable category.
    pub kind: String,
    /// Human-readable error message.
    pub message: String,
    /// User-facing notice for registration rejections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    /// Field-level messages for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

/// Error enum for every registration-desk operation.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                |
/// |-----------|-----------------|----------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request            |
/// | 2000–2999 | Not Found       | 404 Not Found              |
/// | 3000–3999 | Server/Storage  | 500 Internal Server Error  |
/// | 4000–4999 | Capacity        | 409 Conflict               |
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    /// One or more form fields failed validation.
    #[error("{0}")]
    Validation(ValidationErrors),

    /// The event is fully booked or does not exist.
    #[error("event {event_id} is fully booked")]
    CapacityExhausted {
        /// Event the slot was requested on.
        event_id: EventId,
    },

    /// Direct lookup of an unknown event.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// Store read or write failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Persisted snapshot is unreadable and reseeding is disabled.
    #[error("corrupt persisted state: {0}")]
    CorruptState(String),

    /// Internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RegistrationError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::EventNotFound(_) => 2001,
            Self::Internal(_) => 3000,
            Self::Persistence(_) => 3001,
            Self::CorruptState(_) => 3002,
            Self::CapacityExhausted { .. } => 4001,
        }
    }

    /// Returns the short category string consumed by the UI.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "invalid",
            Self::CapacityExhausted { .. } => "full",
            Self::EventNotFound(_) => "not_found",
            Self::Persistence(_) | Self::CorruptState(_) => "storage",
            Self::Internal(_) => "internal",
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::EventNotFound(_) => StatusCode::NOT_FOUND,
            Self::CapacityExhausted { .. } => StatusCode::CONFLICT,
            Self::Persistence(_) | Self::CorruptState(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the notice shown to the user when a registration made in
    /// `mode` is rejected with this error.
    #[must_use]
    pub fn notice(&self, mode: RegistrationMode) -> Option<String> {
        match self {
            Self::Validation(_) => Some(INVALID_FORM_NOTICE.to_string()),
            Self::CapacityExhausted { .. } => Some(mode.full_notice().to_string()),
            _ => None,
        }
    }

    /// Builds the JSON error response, attaching the rejection notice for
    /// a registration made in `mode`.
    #[must_use]
    pub fn into_registration_response(self, mode: RegistrationMode) -> Response {
        let notice = self.notice(mode);
        self.into_response_with_notice(notice)
    }

    fn into_response_with_notice(self, notice: Option<String>) -> Response {
        let status = self.status_code();
        let fields = match &self {
            Self::Validation(errors) => Some(errors.fields().to_vec()),
            _ => None,
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                kind: self.kind().to_string(),
                message: self.to_string(),
                notice,
                fields,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

impl From<ValidationErrors> for RegistrationError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl IntoResponse for RegistrationError {
    fn into_response(self) -> Response {
        self.into_response_with_notice(None)
    }
}
