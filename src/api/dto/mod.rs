//! Data Transfer Objects for REST request/response serialization.

pub mod booking_dto;
pub mod event_dto;
pub mod registration_dto;

pub use booking_dto::*;
pub use event_dto::*;
pub use registration_dto::*;
