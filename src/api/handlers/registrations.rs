//! Form registration and standalone validation handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::ValidationResponse;
use crate::app_state::AppState;
use crate::domain::{RegistrationForm, RegistrationMode};
use crate::error::ErrorResponse;
use crate::service::Receipt;

/// `POST /registrations`: Register a named student for an event.
#[utoipa::path(
    post,
    path = "/api/v1/registrations",
    tag = "Registrations",
    summary = "Register with details",
    description = "Validates name, student id and event selection, then takes one slot and records the booking.",
    request_body = RegistrationForm,
    responses(
        (status = 201, description = "Registration recorded", body = Receipt),
        (status = 400, description = "Invalid form fields", body = ErrorResponse),
        (status = 409, description = "Event full or unknown", body = ErrorResponse),
        (status = 500, description = "Registration could not be saved", body = ErrorResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegistrationForm>,
) -> Response {
    match state.registration_service.register_with_details(&form).await {
        Ok(receipt) => (StatusCode::CREATED, Json(receipt)).into_response(),
        Err(e) => e.into_registration_response(RegistrationMode::Form),
    }
}

/// `POST /registrations/validate`: Check form fields without registering.
#[utoipa::path(
    post,
    path = "/api/v1/registrations/validate",
    tag = "Registrations",
    summary = "Validate registration form",
    request_body = RegistrationForm,
    responses(
        (status = 200, description = "Field validation result", body = ValidationResponse),
    )
)]
pub async fn validate(
    State(state): State<AppState>,
    Json(form): Json<RegistrationForm>,
) -> impl IntoResponse {
    Json(ValidationResponse::from(
        state.registration_service.validate(&form),
    ))
}

/// Registration routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/registrations", post(register))
        .route("/registrations/validate", post(validate))
}
