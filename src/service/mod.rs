//! Service layer: the registration desk and its async façade.
//!
//! [`RegistrationDesk`] owns the state and enforces the
//! decrement → append → save sequence; [`RegistrationService`] serialises
//! access to it and announces committed changes on the
//! [`super::domain::EventBus`].

pub mod desk;
pub mod registration_service;

pub use desk::{Confirmation, CorruptStatePolicy, LoadReport, Receipt, RegistrationDesk};
pub use registration_service::RegistrationService;
