//! OpenAPI document for the REST surface.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::dto;
use super::handlers::{admin, auth, fields, me, system, wizard};
use crate::domain::booking::{Booking, BookingStatus, BookingTally, PaymentMethod};
use crate::domain::user::{Role, User};
use crate::domain::wizard::{ContactInfo, WizardStep};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI specification.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "futsal-gateway",
        description = "Court listings, pricing, availability, and bookings for a single futsal venue."
    ),
    paths(
        system::health_handler,
        fields::get_venue,
        fields::list_fields,
        fields::get_field,
        fields::get_reviews,
        fields::get_availability,
        fields::get_calendar,
        fields::get_quote,
        auth::login,
        auth::register,
        auth::logout,
        auth::me,
        wizard::open_wizard,
        wizard::get_wizard,
        wizard::close_wizard,
        wizard::next_step,
        wizard::submit_contact,
        wizard::back_step,
        wizard::submit_payment,
        me::history,
        me::summary,
        me::cancel_booking,
        me::update_profile,
        me::change_password,
        admin::overview,
        admin::list_bookings,
        admin::booking_stats,
        admin::update_booking_status,
        admin::list_fields,
        admin::field_stats,
        admin::toggle_field,
        admin::delete_field,
        admin::list_users,
        admin::user_stats,
        admin::toggle_role,
    ),
    components(schemas(
        ErrorResponse,
        ErrorBody,
        Booking,
        BookingStatus,
        BookingTally,
        PaymentMethod,
        User,
        Role,
        ContactInfo,
        WizardStep,
        dto::PaginationMeta,
        dto::FieldDto,
        dto::QuoteResponse,
        dto::WizardResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "System", description = "Liveness"),
        (name = "Catalog", description = "Venue profile, fields, availability, and quotes"),
        (name = "Auth", description = "Mock sign-in"),
        (name = "Wizard", description = "Four-step booking flow"),
        (name = "Customer", description = "Signed-in customer dashboard"),
        (name = "Admin", description = "Venue management"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` session scheme referenced by secured paths.
#[derive(Debug)]
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/v1/fields/{id}/quote",
            "/api/v1/fields/{id}/reviews",
            "/api/v1/wizards/{id}/submit",
            "/api/v1/me/bookings/{id}/cancel",
            "/api/v1/me/profile",
            "/api/v1/admin/users/{id}/role",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let has_bearer = doc
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("bearer"));
        assert!(has_bearer);
    }
}
