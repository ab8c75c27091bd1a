//! Service layer: business logic orchestration.
//!
//! [`CatalogService`] answers listing, slot, and quote queries and owns
//! admin field actions. [`BookingService`] drives the wizard and the
//! booking ledger. [`AuthService`] handles mock sessions and admin user
//! actions. All three emit events through the [`super::domain::EventBus`].

pub mod auth_service;
pub mod booking_service;
pub mod catalog_service;

pub use auth_service::AuthService;
pub use booking_service::BookingService;
pub use catalog_service::CatalogService;
