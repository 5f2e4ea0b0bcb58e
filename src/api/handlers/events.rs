//! Event handlers: list, detail, and one-click registration.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{EventListResponse, EventView};
use crate::app_state::AppState;
use crate::domain::{EventId, RegistrationMode};
use crate::error::{ErrorResponse, RegistrationError};
use crate::service::Receipt;

/// `GET /events`: List events with remaining capacity.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    summary = "List events",
    description = "Returns every event in display order with remaining slots and badge hints.",
    responses(
        (status = 200, description = "Event list", body = EventListResponse),
    )
)]
pub async fn list_events(State(state): State<AppState>) -> impl IntoResponse {
    let events = state.registration_service.list_events().await;
    Json(EventListResponse::from(events.as_slice()))
}

/// `GET /events/{id}`: Get a single event.
///
/// # Errors
///
/// Returns [`RegistrationError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Get event",
    params(
        ("id" = String, Path, description = "Event id"),
    ),
    responses(
        (status = 200, description = "Event details", body = EventView),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, RegistrationError> {
    let event = state
        .registration_service
        .find_event(&EventId::new(id))
        .await?;
    Ok(Json(EventView::from(&event)))
}

/// `POST /events/{id}/quick-register`: Reserve one slot without details.
#[utoipa::path(
    post,
    path = "/api/v1/events/{id}/quick-register",
    tag = "Registrations",
    summary = "Quick register",
    description = "Takes one slot on the event and records a placeholder booking.",
    params(
        ("id" = String, Path, description = "Event id"),
    ),
    responses(
        (status = 201, description = "Slot reserved", body = Receipt),
        (status = 409, description = "Event full or unknown", body = ErrorResponse),
        (status = 500, description = "Registration could not be saved", body = ErrorResponse),
    )
)]
pub async fn quick_register(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state
        .registration_service
        .register_quick(&EventId::new(id))
        .await
    {
        Ok(receipt) => (StatusCode::CREATED, Json(receipt)).into_response(),
        Err(e) => e.into_registration_response(RegistrationMode::Quick),
    }
}

/// Event routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events))
        .route("/events/{id}", get(get_event))
        .route("/events/{id}/quick-register", post(quick_register))
}
