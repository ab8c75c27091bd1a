//! WebSocket layer: live booking feed.
//!
//! The endpoint at `/ws` pushes [`crate::domain::VenueEvent`]s to clients
//! that subscribe to specific fields or to everything with `"*"`.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
