//! Mock authentication handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{LoginRequest, RegisterRequest};
use crate::api::extract::{BearerToken, CurrentUser};
use crate::app_state::AppState;
use crate::domain::user::User;
use crate::error::{ErrorResponse, VenueError};
use crate::service::auth_service::Session;

/// `POST /auth/login`: Sign in with any non-empty e-mail and password.
///
/// # Errors
///
/// Returns [`VenueError::MissingField`] for blank inputs.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    summary = "Sign in",
    description = "No credential check. The configured admin e-mail signs in as admin.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened", body = Session),
        (status = 400, description = "Blank e-mail or password", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, VenueError> {
    let session = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(session))
}

/// `POST /auth/register`: Create a regular account and sign in.
///
/// # Errors
///
/// Returns [`VenueError::MissingField`] for blank inputs or
/// [`VenueError::InvalidRequest`] when the e-mail is taken.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    summary = "Register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = Session),
        (status = 400, description = "Blank input or taken e-mail", body = ErrorResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, VenueError> {
    let session = state
        .auth_service
        .register(&req.name, &req.email, &req.password)
        .await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// `POST /auth/logout`: End the current session.
///
/// # Errors
///
/// Returns [`VenueError::Unauthenticated`] for missing or unknown tokens.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Auth",
    summary = "Sign out",
    responses(
        (status = 204, description = "Session closed"),
        (status = 401, description = "No session", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse, VenueError> {
    state.auth_service.logout(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /auth/me`: The signed-in account.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    summary = "Current user",
    responses(
        (status = 200, description = "Signed-in user", body = User),
        (status = 401, description = "No session", body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn me(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    Json(user)
}

/// Auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}
