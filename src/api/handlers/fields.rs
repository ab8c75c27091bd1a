//! Public catalog handlers: venue profile, field listing and detail,
//! reviews, hourly slots, calendar, and quotes.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Local;

use crate::api::dto::{
    AvailabilityQuery, AvailabilityResponse, CalendarQuery, CalendarResponse, FieldDto,
    FieldListResponse, FieldQuery, QuoteQuery, QuoteResponse, ReviewListResponse,
};
use crate::app_state::AppState;
use crate::domain::FieldId;
use crate::domain::field::Venue;
use crate::domain::pricing::DayKind;
use crate::error::{ErrorResponse, VenueError};

/// `GET /venue`: Futsal center profile.
#[utoipa::path(
    get,
    path = "/api/v1/venue",
    tag = "Catalog",
    summary = "Venue profile",
    responses(
        (status = 200, description = "Venue profile", body = Venue),
    )
)]
pub async fn get_venue(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.catalog_service.venue().clone())
}

/// `GET /fields`: Active fields, filtered and sorted.
///
/// # Errors
///
/// Returns [`VenueError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/fields",
    tag = "Catalog",
    summary = "List fields",
    description = "Active fields whose price band intersects the requested range, carrying every requested facility, at or above the minimum rating.",
    params(FieldQuery),
    responses(
        (status = 200, description = "Matching fields", body = FieldListResponse),
    )
)]
pub async fn list_fields(
    State(state): State<AppState>,
    Query(query): Query<FieldQuery>,
) -> Result<impl IntoResponse, VenueError> {
    let filter = query.to_filter();
    if filter.price_range.0 > filter.price_range.1 {
        return Err(VenueError::InvalidRequest(
            "min_price must not exceed max_price".to_string(),
        ));
    }
    let data: Vec<FieldDto> = state
        .catalog_service
        .list_fields(&filter)
        .await
        .into_iter()
        .map(FieldDto::from)
        .collect();
    Ok(Json(FieldListResponse {
        total: data.len(),
        data,
    }))
}

/// `GET /fields/{id}`: Field detail.
///
/// # Errors
///
/// Returns [`VenueError::FieldNotFound`] for unknown ids.
#[utoipa::path(
    get,
    path = "/api/v1/fields/{id}",
    tag = "Catalog",
    summary = "Get field",
    params(("id" = String, Path, description = "Field slug")),
    responses(
        (status = 200, description = "Field detail", body = FieldDto),
        (status = 404, description = "Field not found", body = ErrorResponse),
    )
)]
pub async fn get_field(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, VenueError> {
    let field = state.catalog_service.get_field(&FieldId::new(id)).await?;
    Ok(Json(FieldDto::from(field)))
}

/// `GET /fields/{id}/reviews`: Customer reviews, newest first.
///
/// # Errors
///
/// Returns [`VenueError::FieldNotFound`] for unknown ids.
#[utoipa::path(
    get,
    path = "/api/v1/fields/{id}/reviews",
    tag = "Catalog",
    summary = "Field reviews",
    params(("id" = String, Path, description = "Field slug")),
    responses(
        (status = 200, description = "Reviews", body = ReviewListResponse),
        (status = 404, description = "Field not found", body = ErrorResponse),
    )
)]
pub async fn get_reviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, VenueError> {
    let data = state.catalog_service.reviews(&FieldId::new(id)).await?;
    Ok(Json(ReviewListResponse {
        total: data.len(),
        data,
    }))
}

/// `GET /fields/{id}/availability`: Hourly slots for one date.
///
/// # Errors
///
/// Returns [`VenueError::FieldNotFound`] for unknown ids.
#[utoipa::path(
    get,
    path = "/api/v1/fields/{id}/availability",
    tag = "Catalog",
    summary = "Hourly availability",
    params(("id" = String, Path, description = "Field slug"), AvailabilityQuery),
    responses(
        (status = 200, description = "18 hourly slots with prices", body = AvailabilityResponse),
        (status = 404, description = "Field not found", body = ErrorResponse),
    )
)]
pub async fn get_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, VenueError> {
    let field_id = FieldId::new(id);
    let slots = state
        .catalog_service
        .availability(&field_id, query.date)
        .await?;
    Ok(Json(AvailabilityResponse {
        field_id,
        date: query.date,
        day_kind: DayKind::of(query.date),
        slots,
    }))
}

/// `GET /fields/{id}/calendar`: Bookable dates from today.
///
/// # Errors
///
/// Returns [`VenueError::FieldNotFound`] for unknown ids.
#[utoipa::path(
    get,
    path = "/api/v1/fields/{id}/calendar",
    tag = "Catalog",
    summary = "Date picker",
    params(("id" = String, Path, description = "Field slug"), CalendarQuery),
    responses(
        (status = 200, description = "Upcoming dates", body = CalendarResponse),
        (status = 404, description = "Field not found", body = ErrorResponse),
    )
)]
pub async fn get_calendar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<CalendarQuery>,
) -> Result<impl IntoResponse, VenueError> {
    let field_id = FieldId::new(id);
    let today = Local::now().date_naive();
    let days = state
        .catalog_service
        .calendar(&field_id, today, query.days)
        .await?;
    Ok(Json(CalendarResponse { field_id, days }))
}

/// `GET /fields/{id}/quote`: Price for a date and hour range.
///
/// # Errors
///
/// Returns [`VenueError::InvalidTimeRange`] for bad hours, or
/// [`VenueError::FieldNotFound`] for unknown ids.
#[utoipa::path(
    get,
    path = "/api/v1/fields/{id}/quote",
    tag = "Catalog",
    summary = "Price quote",
    description = "The rate at the start hour applies to the whole booking.",
    params(("id" = String, Path, description = "Field slug"), QuoteQuery),
    responses(
        (status = 200, description = "Quote", body = QuoteResponse),
        (status = 400, description = "Invalid hour range", body = ErrorResponse),
        (status = 404, description = "Field not found", body = ErrorResponse),
    )
)]
pub async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<QuoteQuery>,
) -> Result<impl IntoResponse, VenueError> {
    let (field, range, quote) = state
        .catalog_service
        .quote(
            &FieldId::new(id),
            query.date,
            query.start_hour,
            query.end_hour,
        )
        .await?;
    Ok(Json(QuoteResponse::new(&field, query.date, range, quote)))
}

/// Catalog routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/venue", get(get_venue))
        .route("/fields", get(list_fields))
        .route("/fields/{id}", get(get_field))
        .route("/fields/{id}/reviews", get(get_reviews))
        .route("/fields/{id}/availability", get(get_availability))
        .route("/fields/{id}/calendar", get(get_calendar))
        .route("/fields/{id}/quote", get(get_quote))
}
