//! Recent bookings handler for the confirmation panel.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{RecentBookingsParams, RecentBookingsResponse};
use crate::app_state::AppState;

/// `GET /bookings/recent`: Latest bookings, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/recent",
    tag = "Bookings",
    summary = "Recent bookings",
    description = "Returns the latest bookings with their event names, most recent first.",
    params(RecentBookingsParams),
    responses(
        (status = 200, description = "Recent bookings", body = RecentBookingsResponse),
    )
)]
pub async fn recent_bookings(
    State(state): State<AppState>,
    Query(params): Query<RecentBookingsParams>,
) -> impl IntoResponse {
    let service = &state.registration_service;
    let limit = params.resolved(service.recent_limit());
    Json(RecentBookingsResponse {
        data: service.list_recent_bookings(limit).await,
    })
}

/// Booking routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/bookings/recent", get(recent_bookings))
}
