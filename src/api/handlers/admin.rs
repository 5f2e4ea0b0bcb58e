//! Administrative handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::EventListResponse;
use crate::app_state::AppState;
use crate::error::{ErrorResponse, RegistrationError};

/// `POST /admin/reset`: Clear all bookings and restore the default events.
///
/// # Errors
///
/// Returns [`RegistrationError::Persistence`] if the store cannot be reset.
#[utoipa::path(
    post,
    path = "/api/v1/admin/reset",
    tag = "Admin",
    summary = "Reset to defaults",
    description = "Deletes the stored snapshot, reseeds the default events and empties the booking ledger.",
    responses(
        (status = 200, description = "Seeded event list", body = EventListResponse),
        (status = 500, description = "Store could not be reset", body = ErrorResponse),
    )
)]
pub async fn reset(State(state): State<AppState>) -> Result<impl IntoResponse, RegistrationError> {
    let events = state.registration_service.reset().await?;
    tracing::warn!("desk reset via admin endpoint");
    Ok(Json(EventListResponse::from(events.as_slice())))
}

/// Admin routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/admin/reset", post(reset))
}
