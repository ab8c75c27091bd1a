//! Domain layer: court catalog, pricing, availability, bookings, and events.
//!
//! Pure rules (pricing tiers, slot availability, listing filter, wizard
//! steps) live next to the in-memory stores that hold fields, bookings,
//! users, and open wizards.

pub mod availability;
pub mod booking;
pub mod booking_ledger;
pub mod event_bus;
pub mod field;
pub mod field_catalog;
pub mod filter;
pub mod ids;
pub mod pricing;
pub mod review;
pub mod seed;
pub mod user;
pub mod user_directory;
pub mod venue_event;
pub mod wizard;
pub mod wizard_registry;

pub use booking_ledger::BookingLedger;
pub use event_bus::EventBus;
pub use field_catalog::FieldCatalog;
pub use ids::{BookingId, FieldId, UserId, WizardId};
pub use user_directory::UserDirectory;
pub use venue_event::VenueEvent;
pub use wizard_registry::WizardRegistry;
