//! Admin dashboard handlers. Every route takes an [`AdminUser`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{Local, Utc};

use crate::api::dto::{
    AdminBookingQuery, AdminFieldListResponse, AdminFieldQuery, AdminUserQuery,
    BookingListResponse, FieldDto, StatusUpdateRequest, ToggleFieldResponse,
    UserListResponse, non_blank,
};
use crate::api::extract::AdminUser;
use crate::app_state::AppState;
use crate::domain::booking::{Booking, BookingTally};
use crate::domain::user::User;
use crate::domain::{BookingId, FieldId, UserId};
use crate::error::{ErrorResponse, VenueError};
use crate::service::auth_service::UserStats;
use crate::service::booking_service::AdminOverview;
use crate::service::catalog_service::FieldStats;

/// `GET /admin/overview`: Admin home.
#[utoipa::path(
    get,
    path = "/api/v1/admin/overview",
    tag = "Admin",
    summary = "Overview",
    responses(
        (status = 200, description = "Totals and recent activity", body = AdminOverview),
        (status = 401, description = "No session", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn overview(State(state): State<AppState>, _admin: AdminUser) -> impl IntoResponse {
    Json(state.booking_service.overview().await)
}

/// `GET /admin/bookings`: Joined booking table.
#[utoipa::path(
    get,
    path = "/api/v1/admin/bookings",
    tag = "Admin",
    summary = "List bookings",
    params(AdminBookingQuery),
    responses(
        (status = 200, description = "Bookings, newest first", body = BookingListResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<AdminBookingQuery>,
) -> impl IntoResponse {
    let today = Local::now().date_naive();
    let rows = state
        .booking_service
        .admin_bookings(&query.to_query(), today)
        .await;
    let (data, pagination) = query.pagination().paginate(rows);
    Json(BookingListResponse { data, pagination })
}

/// `GET /admin/bookings/stats`: Counts per status and revenue.
#[utoipa::path(
    get,
    path = "/api/v1/admin/bookings/stats",
    tag = "Admin",
    summary = "Booking stats",
    responses(
        (status = 200, description = "Booking tally", body = BookingTally),
        (status = 403, description = "Not an admin", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn booking_stats(State(state): State<AppState>, _admin: AdminUser) -> impl IntoResponse {
    Json(state.booking_service.booking_stats().await)
}

/// `PUT /admin/bookings/{id}/status`: Overwrite a booking's status.
///
/// # Errors
///
/// Returns [`VenueError::BookingNotFound`] for unknown ids.
#[utoipa::path(
    put,
    path = "/api/v1/admin/bookings/{id}/status",
    tag = "Admin",
    summary = "Set booking status",
    description = "Direct overwrite. Every transition is accepted.",
    params(("id" = uuid::Uuid, Path, description = "Booking UUID")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Updated booking", body = Booking),
        (status = 404, description = "Booking not found", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn update_booking_status(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<impl IntoResponse, VenueError> {
    let booking = state
        .booking_service
        .set_status(BookingId::from_uuid(id), req.status)
        .await?;
    tracing::debug!(admin_id = %admin.id, booking_id = %booking.id, "status set by admin");
    Ok(Json(booking))
}

/// `GET /admin/fields`: Field table, including inactive fields.
#[utoipa::path(
    get,
    path = "/api/v1/admin/fields",
    tag = "Admin",
    summary = "List fields",
    params(AdminFieldQuery),
    responses(
        (status = 200, description = "Fields", body = AdminFieldListResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn list_fields(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<AdminFieldQuery>,
) -> impl IntoResponse {
    let data: Vec<FieldDto> = state
        .catalog_service
        .admin_fields(
            non_blank(query.search.as_deref()),
            query.status.map(|s| s.is_active()),
        )
        .await
        .into_iter()
        .map(FieldDto::from)
        .collect();
    Json(AdminFieldListResponse {
        total: data.len(),
        data,
    })
}

/// `GET /admin/fields/stats`: Catalog aggregates.
#[utoipa::path(
    get,
    path = "/api/v1/admin/fields/stats",
    tag = "Admin",
    summary = "Field stats",
    responses(
        (status = 200, description = "Field aggregates", body = FieldStats),
        (status = 403, description = "Not an admin", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn field_stats(State(state): State<AppState>, _admin: AdminUser) -> impl IntoResponse {
    Json(state.catalog_service.field_stats().await)
}

/// `POST /admin/fields/{id}/toggle`: Flip a field's active flag.
///
/// # Errors
///
/// Returns [`VenueError::FieldNotFound`] for unknown ids.
#[utoipa::path(
    post,
    path = "/api/v1/admin/fields/{id}/toggle",
    tag = "Admin",
    summary = "Toggle field",
    params(("id" = String, Path, description = "Field slug")),
    responses(
        (status = 200, description = "New active flag", body = ToggleFieldResponse),
        (status = 404, description = "Field not found", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn toggle_field(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, VenueError> {
    let field_id = FieldId::new(id);
    let is_active = state.catalog_service.toggle_field(&field_id).await?;
    Ok(Json(ToggleFieldResponse {
        field_id,
        is_active,
    }))
}

/// `DELETE /admin/fields/{id}`: Remove a field.
///
/// # Errors
///
/// Returns [`VenueError::FieldNotFound`] for unknown ids.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/fields/{id}",
    tag = "Admin",
    summary = "Delete field",
    description = "Bookings on the field are kept and report an unknown field afterwards.",
    params(("id" = String, Path, description = "Field slug")),
    responses(
        (status = 204, description = "Field deleted"),
        (status = 404, description = "Field not found", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn delete_field(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, VenueError> {
    state
        .catalog_service
        .delete_field(&FieldId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /admin/users`: Account table with booking totals.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    tag = "Admin",
    summary = "List users",
    params(AdminUserQuery),
    responses(
        (status = 200, description = "Accounts", body = UserListResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<AdminUserQuery>,
) -> impl IntoResponse {
    let rows = state
        .auth_service
        .admin_users(non_blank(query.search.as_deref()), query.role)
        .await;
    let (data, pagination) = query.pagination().paginate(rows);
    Json(UserListResponse { data, pagination })
}

/// `GET /admin/users/stats`: Directory aggregates.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users/stats",
    tag = "Admin",
    summary = "User stats",
    responses(
        (status = 200, description = "User aggregates", body = UserStats),
        (status = 403, description = "Not an admin", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn user_stats(State(state): State<AppState>, _admin: AdminUser) -> impl IntoResponse {
    Json(state.auth_service.user_stats(Utc::now()).await)
}

/// `POST /admin/users/{id}/role`: Flip between user and admin.
///
/// # Errors
///
/// Returns [`VenueError::UserNotFound`] for unknown ids.
#[utoipa::path(
    post,
    path = "/api/v1/admin/users/{id}/role",
    tag = "Admin",
    summary = "Toggle role",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Updated account", body = User),
        (status = 404, description = "User not found", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn toggle_role(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, VenueError> {
    let user = state.auth_service.toggle_role(&UserId::new(id)).await?;
    Ok(Json(user))
}

/// Admin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/overview", get(overview))
        .route("/admin/bookings", get(list_bookings))
        .route("/admin/bookings/stats", get(booking_stats))
        .route("/admin/bookings/{id}/status", put(update_booking_status))
        .route("/admin/fields", get(list_fields))
        .route("/admin/fields/stats", get(field_stats))
        .route("/admin/fields/{id}/toggle", post(toggle_field))
        .route("/admin/fields/{id}", axum::routing::delete(delete_field))
        .route("/admin/users", get(list_users))
        .route("/admin/users/stats", get(user_stats))
        .route("/admin/users/{id}/role", post(toggle_role))
}
