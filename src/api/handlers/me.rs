//! Customer dashboard handlers. All routes need a session.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Local;

use crate::api::dto::{
    HistoryEntry, HistoryQuery, HistoryResponse, PasswordChangeRequest, ProfileUpdateRequest,
    non_blank,
};
use crate::api::extract::CurrentUser;
use crate::app_state::AppState;
use crate::domain::BookingId;
use crate::domain::booking::Booking;
use crate::domain::user::User;
use crate::error::{ErrorResponse, VenueError};
use crate::service::booking_service::CustomerSummary;

/// `GET /me/bookings`: Booking history, newest first. Each row says
/// whether it can still be cancelled or booked again.
#[utoipa::path(
    get,
    path = "/api/v1/me/bookings",
    tag = "Customer",
    summary = "Booking history",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Bookings", body = HistoryResponse),
        (status = 401, description = "No session", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn history(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<HistoryQuery>,
) -> impl IntoResponse {
    let now = Local::now().naive_local();
    let data: Vec<HistoryEntry> = state
        .booking_service
        .history(&user.id, query.status, non_blank(query.search.as_deref()))
        .await
        .into_iter()
        .map(|booking| HistoryEntry::at(booking, now))
        .collect();
    Json(HistoryResponse {
        total: data.len(),
        data,
    })
}

/// `GET /me/summary`: Totals and upcoming games.
#[utoipa::path(
    get,
    path = "/api/v1/me/summary",
    tag = "Customer",
    summary = "Dashboard summary",
    responses(
        (status = 200, description = "Summary", body = CustomerSummary),
        (status = 401, description = "No session", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn summary(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> impl IntoResponse {
    let today = Local::now().date_naive();
    Json(state.booking_service.summary(&user.id, today).await)
}

/// `POST /me/bookings/{id}/cancel`: Cancel an own confirmed booking
/// more than 24 hours ahead.
///
/// # Errors
///
/// Returns [`VenueError::CancellationClosed`] inside the 24-hour window,
/// or [`VenueError::NotBookingOwner`] for someone else's booking.
#[utoipa::path(
    post,
    path = "/api/v1/me/bookings/{id}/cancel",
    tag = "Customer",
    summary = "Cancel own booking",
    params(("id" = uuid::Uuid, Path, description = "Booking UUID")),
    responses(
        (status = 200, description = "Booking cancelled", body = Booking),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse),
        (status = 422, description = "Too late to cancel", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, VenueError> {
    let booking = state
        .booking_service
        .cancel_own(
            &user.id,
            BookingId::from_uuid(id),
            Local::now().naive_local(),
        )
        .await?;
    Ok(Json(booking))
}

/// `PUT /me/profile`: Edit name, e-mail, and phone.
///
/// # Errors
///
/// Returns [`VenueError::MissingField`] for a blank name or e-mail, or
/// [`VenueError::InvalidRequest`] when the e-mail is taken.
#[utoipa::path(
    put,
    path = "/api/v1/me/profile",
    tag = "Customer",
    summary = "Update profile",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated account", body = User),
        (status = 400, description = "Missing or taken value", body = ErrorResponse),
        (status = 401, description = "No session", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ProfileUpdateRequest>,
) -> Result<impl IntoResponse, VenueError> {
    let user = state
        .auth_service
        .update_profile(&user.id, &req.name, &req.email, req.phone.as_deref())
        .await?;
    Ok(Json(user))
}

/// `POST /me/password`: Change password.
///
/// # Errors
///
/// Returns [`VenueError::MissingField`] for a blank input, or
/// [`VenueError::InvalidRequest`] for a mismatched or short password.
#[utoipa::path(
    post,
    path = "/api/v1/me/password",
    tag = "Customer",
    summary = "Change password",
    description = "Validates the form only. Passwords are never stored.",
    request_body = PasswordChangeRequest,
    responses(
        (status = 204, description = "Password accepted"),
        (status = 400, description = "Invalid form", body = ErrorResponse),
        (status = 401, description = "No session", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<PasswordChangeRequest>,
) -> Result<impl IntoResponse, VenueError> {
    state
        .auth_service
        .change_password(
            &user.id,
            &req.current_password,
            &req.new_password,
            &req.confirm_password,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Customer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me/bookings", get(history))
        .route("/me/summary", get(summary))
        .route("/me/bookings/{id}/cancel", post(cancel_booking))
        .route("/me/profile", put(update_profile))
        .route("/me/password", post(change_password))
}
