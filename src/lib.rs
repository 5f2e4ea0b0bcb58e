//! # event-registration
//!
//! Campus event registration desk: a fixed catalog of events with finite
//! capacity, one-click and form-based registration, and an append-only
//! booking ledger persisted as a single versioned snapshot.
//!
//! The desk core is synchronous and storage-agnostic. A thin HTTP and
//! WebSocket adapter exposes it to a UI and pushes a notification after
//! every committed change so views can re-render.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── RegistrationService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── RegistrationDesk (service/)
//!     ├── EventCatalog + BookingLedger (domain/)
//!     │
//!     └── SnapshotRepository over a KeyValueStore (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;
