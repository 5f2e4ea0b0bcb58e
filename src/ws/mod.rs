//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` pushes desk notifications so a UI can
//! re-render after registrations and resets.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
