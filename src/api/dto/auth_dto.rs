//! Mock authentication DTOs.

use serde::Deserialize;
use utoipa::ToSchema;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Account e-mail. Any value is accepted.
    #[serde(default)]
    pub email: String,
    /// Password. Any non-empty value is accepted.
    #[serde(default)]
    pub password: String,
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Account e-mail.
    #[serde(default)]
    pub email: String,
    /// Password. Never stored.
    #[serde(default)]
    pub password: String,
}

/// Request body for `PUT /me/profile`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProfileUpdateRequest {
    /// Display name. Required.
    #[serde(default)]
    pub name: String,
    /// Account e-mail. Required and unique.
    #[serde(default)]
    pub email: String,
    /// Phone number. Blank or missing clears it.
    #[serde(default)]
    pub phone: Option<String>,
}

/// Request body for `POST /me/password`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PasswordChangeRequest {
    /// Current password.
    #[serde(default)]
    pub current_password: String,
    /// New password, at least 6 characters.
    #[serde(default)]
    pub new_password: String,
    /// Must equal `new_password`.
    #[serde(default)]
    pub confirm_password: String,
}
