//! REST endpoint handlers organized by resource.

pub mod admin;
pub mod bookings;
pub mod events;
pub mod registrations;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(events::routes())
        .merge(registrations::routes())
        .merge(bookings::routes())
        .merge(admin::routes())
}
