//! OpenAPI document for the REST endpoints.

use utoipa::OpenApi;

use super::dto::{EventListResponse, EventView, RecentBookingsResponse, ValidationResponse};
use super::handlers;
use crate::domain::{
    Availability, Booking, BookingId, EventId, FieldError, FormField, RegistrationForm,
};
use crate::error::{ErrorBody, ErrorResponse};
use crate::service::{Confirmation, Receipt};

/// Generated OpenAPI specification.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "event-registration",
        description = "Event listing, capacity-checked registration and recent bookings."
    ),
    paths(
        handlers::system::health_handler,
        handlers::events::list_events,
        handlers::events::get_event,
        handlers::events::quick_register,
        handlers::registrations::register,
        handlers::registrations::validate,
        handlers::bookings::recent_bookings,
        handlers::admin::reset,
    ),
    components(schemas(
        Availability,
        Booking,
        BookingId,
        Confirmation,
        ErrorBody,
        ErrorResponse,
        EventId,
        EventListResponse,
        EventView,
        FieldError,
        FormField,
        Receipt,
        RecentBookingsResponse,
        RegistrationForm,
        ValidationResponse,
    )),
    tags(
        (name = "Events", description = "Event catalog"),
        (name = "Registrations", description = "Slot reservations"),
        (name = "Bookings", description = "Booking ledger views"),
        (name = "Admin", description = "Maintenance operations"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Swagger UI serving [`ApiDoc`] at `/swagger-ui`.
#[cfg(feature = "swagger-ui")]
#[must_use]
pub fn swagger_ui() -> utoipa_swagger_ui::SwaggerUi {
    utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/health",
            "/api/v1/events",
            "/api/v1/events/{id}",
            "/api/v1/events/{id}/quick-register",
            "/api/v1/registrations",
            "/api/v1/registrations/validate",
            "/api/v1/bookings/recent",
            "/api/v1/admin/reset",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected}"
            );
        }
    }
}
