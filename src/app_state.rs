//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::config::ServiceConfig;
use crate::domain::availability;
use crate::domain::{BookingLedger, EventBus, FieldCatalog, UserDirectory, WizardRegistry, seed};
use crate::service::{AuthService, BookingService, CatalogService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Venue profile, listings, pricing, and field administration.
    pub catalog_service: Arc<CatalogService>,
    /// Wizard flow, booking history, and booking administration.
    pub booking_service: Arc<BookingService>,
    /// Mock sessions and user administration.
    pub auth_service: Arc<AuthService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Wires the seeded stores and services from `config`, using the local
    /// date as the first day of generated availability.
    #[must_use]
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::seeded(config, Local::now().date_naive())
    }

    /// Same as [`AppState::from_config`] with an explicit first day.
    #[must_use]
    pub fn seeded(config: &ServiceConfig, today: NaiveDate) -> Self {
        let mut fields = seed::fields();
        if config.mock_availability {
            let mut rng = rand::thread_rng();
            for field in &mut fields {
                field.availability =
                    availability::generate(&mut rng, today, config.availability_horizon_days);
            }
        }

        let catalog = Arc::new(FieldCatalog::new(fields));
        let ledger = Arc::new(BookingLedger::new(seed::bookings()));
        let users = Arc::new(UserDirectory::new(seed::users()));
        let wizards = Arc::new(WizardRegistry::new());
        let event_bus = EventBus::new(config.event_bus_capacity);

        let catalog_service = Arc::new(CatalogService::new(
            Arc::clone(&catalog),
            seed::venue(),
            seed::reviews(),
            event_bus.clone(),
            config.calendar_days,
        ));
        let booking_service = Arc::new(BookingService::new(
            wizards,
            Arc::clone(&ledger),
            catalog,
            Arc::clone(&users),
            event_bus.clone(),
            config.payment_delay,
        ));
        let auth_service = Arc::new(AuthService::new(
            users,
            ledger,
            event_bus.clone(),
            config.admin_email.clone(),
        ));

        tracing::info!(
            mock_availability = config.mock_availability,
            horizon_days = config.availability_horizon_days,
            "seeded venue state"
        );

        Self {
            catalog_service,
            booking_service,
            auth_service,
            event_bus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldId;

    #[tokio::test]
    async fn seeded_state_serves_catalog() {
        let config = ServiceConfig {
            mock_availability: false,
            ..ServiceConfig::default()
        };
        let state = AppState::from_config(&config);
        let fields = state
            .catalog_service
            .list_fields(&crate::domain::filter::FieldFilter::default())
            .await;
        assert!(!fields.is_empty());
        assert_eq!(state.event_bus.receiver_count(), 0);
    }

    #[tokio::test]
    async fn mock_availability_fills_horizon() {
        let config = ServiceConfig {
            mock_availability: true,
            availability_horizon_days: 5,
            ..ServiceConfig::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap_or_default();
        let state = AppState::seeded(&config, today);
        let field = state
            .catalog_service
            .get_field(&FieldId::new("lapangan-a"))
            .await;
        assert!(matches!(field, Ok(f) if f.availability.len() == 5));
    }
}
