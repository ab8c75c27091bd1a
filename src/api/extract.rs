//! Session extractors.
//!
//! The mock session token travels as `Authorization: Bearer <token>`.
//! [`CurrentUser`] rejects requests without a valid session,
//! [`AdminUser`] additionally requires the admin role, and
//! [`MaybeUser`] never rejects.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::app_state::AppState;
use crate::domain::user::User;
use crate::error::VenueError;

/// Raw bearer token from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// A signed-in user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// A signed-in admin.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

/// The signed-in user, if any.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

fn bearer(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

impl FromRequestParts<AppState> for BearerToken {
    type Rejection = VenueError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        bearer(parts)
            .map(|t| Self(t.to_string()))
            .ok_or(VenueError::Unauthenticated)
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = VenueError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer(parts).ok_or(VenueError::Unauthenticated)?;
        let user = state.auth_service.resolve(token).await?;
        Ok(Self(user))
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = VenueError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            tracing::debug!(user_id = %user.id, "admin route refused");
            return Err(VenueError::Forbidden);
        }
        Ok(Self(user))
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = VenueError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer(parts) else {
            return Ok(Self(None));
        };
        Ok(Self(state.auth_service.resolve(token).await.ok()))
    }
}
