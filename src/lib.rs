//! # futsal-gateway
//!
//! REST API and WebSocket gateway for a single futsal venue: court
//! listings, two-axis hourly pricing, simulated slot availability, a
//! four-step booking wizard, mock sessions, and customer/admin dashboards.
//!
//! All state lives in memory and is seeded at startup.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── CatalogService / BookingService / AuthService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── FieldCatalog, BookingLedger, UserDirectory, WizardRegistry (domain/)
//!     └── Pricing, availability, filter, and wizard rules (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod ws;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::config::ServiceConfig;

/// Builds the full HTTP application: REST routes, `/ws`, the Swagger UI
/// when the `swagger-ui` feature is on, and the tracing, CORS, and
/// timeout layers.
pub fn build_app(state: AppState, config: &ServiceConfig) -> Router {
    let router = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws::handler::ws_handler));

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", api::openapi::ApiDoc::openapi()),
        )
    };

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    config.request_timeout,
                )),
        )
        .with_state(state)
}
