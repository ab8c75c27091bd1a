//! Service error types with HTTP status code mapping.
//!
//! [`VenueError`] is the central error type. Each variant maps to a specific
//! HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::wizard::WizardStep;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "missing required field: phone",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see [`VenueError`] code ranges).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status                 |
/// |-----------|------------|-----------------------------|
/// | 1000–1999 | Validation | 400 Bad Request             |
/// | 2000–2999 | Not Found  | 404 Not Found               |
/// | 3000–3999 | Server     | 500 Internal Server Error   |
/// | 5000–5999 | Auth       | 401 / 403                   |
/// | 6000–6999 | Workflow   | 409 Conflict / 422          |
#[derive(Debug, thiserror::Error)]
pub enum VenueError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A required input was blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Hour range is empty or runs past midnight.
    #[error("invalid time range {start_hour}..{end_hour}")]
    InvalidTimeRange {
        /// Requested start hour.
        start_hour: u8,
        /// Requested end hour.
        end_hour: u8,
    },

    /// Field with the given slug was not found.
    #[error("field not found: {0}")]
    FieldNotFound(String),

    /// Booking with the given ID was not found.
    #[error("booking not found: {0}")]
    BookingNotFound(uuid::Uuid),

    /// User with the given ID was not found.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// Wizard with the given ID was not found (or was closed).
    #[error("wizard not found: {0}")]
    WizardNotFound(uuid::Uuid),

    /// No valid session token was presented.
    #[error("authentication required")]
    Unauthenticated,

    /// The wizard cannot leave the review step without a signed-in user.
    #[error("login required to continue booking")]
    LoginRequired,

    /// Signed-in user lacks the admin role.
    #[error("admin role required")]
    Forbidden,

    /// Wizard action attempted from the wrong step.
    #[error("wizard is at step {actual:?}, expected {expected:?}")]
    InvalidStep {
        /// Step the action requires.
        expected: WizardStep,
        /// Step the wizard is at.
        actual: WizardStep,
    },

    /// Booking cannot be cancelled by its owner anymore.
    #[error("booking {0} can no longer be cancelled")]
    CancellationClosed(uuid::Uuid),

    /// Booking belongs to another user.
    #[error("booking {0} belongs to another user")]
    NotBookingOwner(uuid::Uuid),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl VenueError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::MissingField(_) => 1002,
            Self::InvalidTimeRange { .. } => 1003,
            Self::FieldNotFound(_) => 2001,
            Self::BookingNotFound(_) => 2002,
            Self::UserNotFound(_) => 2003,
            Self::WizardNotFound(_) => 2004,
            Self::Internal(_) => 3000,
            Self::Unauthenticated => 5001,
            Self::LoginRequired => 5002,
            Self::Forbidden => 5003,
            Self::NotBookingOwner(_) => 5004,
            Self::InvalidStep { .. } => 6001,
            Self::CancellationClosed(_) => 6002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::MissingField(_) | Self::InvalidTimeRange { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::FieldNotFound(_)
            | Self::BookingNotFound(_)
            | Self::UserNotFound(_)
            | Self::WizardNotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthenticated | Self::LoginRequired => StatusCode::UNAUTHORIZED,
            Self::Forbidden | Self::NotBookingOwner(_) => StatusCode::FORBIDDEN,
            Self::InvalidStep { .. } => StatusCode::CONFLICT,
            Self::CancellationClosed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for VenueError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, code = self.error_code(), "request rejected");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_bad_request() {
        assert_eq!(
            VenueError::MissingField("phone").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            VenueError::InvalidTimeRange {
                start_hour: 20,
                end_hour: 19
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn auth_errors_map_to_401_and_403() {
        assert_eq!(
            VenueError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(VenueError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn wizard_step_error_is_conflict() {
        let err = VenueError::InvalidStep {
            expected: WizardStep::Payment,
            actual: WizardStep::Confirmed,
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), 6001);
        assert!(err.to_string().contains("Confirmed"));
    }

    #[test]
    fn into_response_carries_status() {
        let response = VenueError::FieldNotFound("lapangan-z".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
