//! Booking wizard handlers.
//!
//! Opening and inspecting a wizard needs no session. Leaving the review
//! step needs one, and only that account may fill in contact details and
//! pay.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{post, put};
use axum::{Json, Router};

use crate::api::dto::{
    OpenWizardRequest, SubmitPaymentRequest, SubmitPaymentResponse, WizardResponse,
};
use crate::api::extract::{CurrentUser, MaybeUser};
use crate::app_state::AppState;
use crate::domain::WizardId;
use crate::domain::wizard::ContactInfo;
use crate::error::{ErrorResponse, VenueError};

/// `POST /wizards`: Open a wizard at the review step.
///
/// # Errors
///
/// Returns [`VenueError`] for unknown fields, bad hours, or closed slots.
#[utoipa::path(
    post,
    path = "/api/v1/wizards",
    tag = "Wizard",
    summary = "Open booking wizard",
    request_body = OpenWizardRequest,
    responses(
        (status = 201, description = "Wizard opened", body = WizardResponse),
        (status = 400, description = "Invalid selection", body = ErrorResponse),
        (status = 404, description = "Field not found", body = ErrorResponse),
    )
)]
pub async fn open_wizard(
    State(state): State<AppState>,
    Json(req): Json<OpenWizardRequest>,
) -> Result<impl IntoResponse, VenueError> {
    let wizard = state
        .booking_service
        .open_wizard(
            &req.field_id,
            req.date,
            req.start_hour,
            req.end_hour,
            req.players,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(WizardResponse::from(wizard))))
}

/// `GET /wizards/{id}`: Current wizard state.
///
/// # Errors
///
/// Returns [`VenueError::WizardNotFound`] for unknown ids.
#[utoipa::path(
    get,
    path = "/api/v1/wizards/{id}",
    tag = "Wizard",
    summary = "Get wizard",
    params(("id" = uuid::Uuid, Path, description = "Wizard UUID")),
    responses(
        (status = 200, description = "Wizard state", body = WizardResponse),
        (status = 404, description = "Wizard not found", body = ErrorResponse),
    )
)]
pub async fn get_wizard(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, VenueError> {
    let wizard = state
        .booking_service
        .wizard(WizardId::from_uuid(id))
        .await?;
    Ok(Json(WizardResponse::from(wizard)))
}

/// `DELETE /wizards/{id}`: Discard a wizard.
///
/// # Errors
///
/// Returns [`VenueError::WizardNotFound`] for unknown ids.
#[utoipa::path(
    delete,
    path = "/api/v1/wizards/{id}",
    tag = "Wizard",
    summary = "Close wizard",
    params(("id" = uuid::Uuid, Path, description = "Wizard UUID")),
    responses(
        (status = 204, description = "Wizard closed"),
        (status = 404, description = "Wizard not found", body = ErrorResponse),
    )
)]
pub async fn close_wizard(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, VenueError> {
    state
        .booking_service
        .close(WizardId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /wizards/{id}/next`: Review → Contact.
///
/// # Errors
///
/// Returns [`VenueError::LoginRequired`] without a session.
#[utoipa::path(
    post,
    path = "/api/v1/wizards/{id}/next",
    tag = "Wizard",
    summary = "Continue from review",
    description = "Requires a session. Prefills contact details from the account.",
    params(("id" = uuid::Uuid, Path, description = "Wizard UUID")),
    responses(
        (status = 200, description = "Wizard at contact step", body = WizardResponse),
        (status = 401, description = "Login required", body = ErrorResponse),
        (status = 409, description = "Wrong step", body = ErrorResponse),
    ),
    security((), ("bearer" = []))
)]
pub async fn next_step(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, VenueError> {
    let wizard = state
        .booking_service
        .proceed(WizardId::from_uuid(id), user.as_ref())
        .await?;
    Ok(Json(WizardResponse::from(wizard)))
}

/// `PUT /wizards/{id}/contact`: Contact → Payment.
///
/// # Errors
///
/// Returns [`VenueError::MissingField`] when name or phone is blank, or
/// [`VenueError::Forbidden`] for an account other than the wizard's.
#[utoipa::path(
    put,
    path = "/api/v1/wizards/{id}/contact",
    tag = "Wizard",
    summary = "Submit contact details",
    description = "Blank inputs keep the prefilled value. Name and phone are required.",
    params(("id" = uuid::Uuid, Path, description = "Wizard UUID")),
    request_body = ContactInfo,
    responses(
        (status = 200, description = "Wizard at payment step", body = WizardResponse),
        (status = 400, description = "Missing name or phone", body = ErrorResponse),
        (status = 401, description = "No session", body = ErrorResponse),
        (status = 403, description = "Wizard belongs to another account", body = ErrorResponse),
        (status = 409, description = "Wrong step", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<uuid::Uuid>,
    Json(contact): Json<ContactInfo>,
) -> Result<impl IntoResponse, VenueError> {
    let wizard = state
        .booking_service
        .submit_contact(WizardId::from_uuid(id), &user.id, contact)
        .await?;
    Ok(Json(WizardResponse::from(wizard)))
}

/// `POST /wizards/{id}/back`: One step back.
///
/// # Errors
///
/// Returns [`VenueError::InvalidStep`] from review or confirmed.
#[utoipa::path(
    post,
    path = "/api/v1/wizards/{id}/back",
    tag = "Wizard",
    summary = "Step back",
    params(("id" = uuid::Uuid, Path, description = "Wizard UUID")),
    responses(
        (status = 200, description = "Wizard one step back", body = WizardResponse),
        (status = 409, description = "Nothing to go back to", body = ErrorResponse),
    )
)]
pub async fn back_step(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, VenueError> {
    let wizard = state.booking_service.back(WizardId::from_uuid(id)).await?;
    Ok(Json(WizardResponse::from(wizard)))
}

/// `POST /wizards/{id}/submit`: Pay and confirm.
///
/// # Errors
///
/// Returns [`VenueError::MissingField`] without a payment method,
/// [`VenueError::Forbidden`] for an account other than the wizard's, or
/// [`VenueError::InvalidStep`] off the payment step.
#[utoipa::path(
    post,
    path = "/api/v1/wizards/{id}/submit",
    tag = "Wizard",
    summary = "Pay and confirm",
    description = "Waits the configured payment delay, then always succeeds with a confirmed booking.",
    params(("id" = uuid::Uuid, Path, description = "Wizard UUID")),
    request_body = SubmitPaymentRequest,
    responses(
        (status = 201, description = "Booking confirmed", body = SubmitPaymentResponse),
        (status = 400, description = "Missing payment method", body = ErrorResponse),
        (status = 401, description = "No session", body = ErrorResponse),
        (status = 403, description = "Wizard belongs to another account", body = ErrorResponse),
        (status = 409, description = "Wrong step", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn submit_payment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<SubmitPaymentRequest>,
) -> Result<impl IntoResponse, VenueError> {
    let (wizard, booking) = state
        .booking_service
        .submit(WizardId::from_uuid(id), &user.id, req.payment_method)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmitPaymentResponse {
            wizard: WizardResponse::from(wizard),
            booking,
        }),
    ))
}

/// Wizard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wizards", post(open_wizard))
        .route(
            "/wizards/{id}",
            axum::routing::get(get_wizard).delete(close_wizard),
        )
        .route("/wizards/{id}/next", post(next_step))
        .route("/wizards/{id}/contact", put(submit_contact))
        .route("/wizards/{id}/back", post(back_step))
        .route("/wizards/{id}/submit", post(submit_payment))
}
