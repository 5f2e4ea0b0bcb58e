//! Recent-bookings DTOs for the confirmation panel.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::service::Confirmation;

/// Largest accepted `limit` for the recent-bookings view.
pub const MAX_RECENT_LIMIT: usize = 50;

/// Query parameters for `GET /bookings/recent`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentBookingsParams {
    /// Number of bookings to return; defaults to the configured limit.
    pub limit: Option<usize>,
}

impl RecentBookingsParams {
    /// Resolves the requested limit, clamped to `1..=MAX_RECENT_LIMIT`.
    #[must_use]
    pub fn resolved(&self, default: usize) -> usize {
        self.limit.unwrap_or(default).clamp(1, MAX_RECENT_LIMIT)
    }
}

/// Response body for `GET /bookings/recent`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecentBookingsResponse {
    /// Bookings, newest first, with event names.
    pub data: Vec<Confirmation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_clamped() {
        assert_eq!(RecentBookingsParams { limit: None }.resolved(5), 5);
        assert_eq!(RecentBookingsParams { limit: Some(0) }.resolved(5), 1);
        assert_eq!(RecentBookingsParams { limit: Some(500) }.resolved(5), 50);
    }
}
