//! User accounts and roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// Dashboard role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Customer dashboard only.
    User,
    /// Customer and admin dashboards.
    Admin,
}

impl Role {
    /// The other role.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::User => Self::Admin,
            Self::Admin => Self::User,
        }
    }
}

/// An account, either seeded or fabricated at login.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct User {
    /// Account identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// E-mail address (also the login handle).
    pub email: String,
    /// Mobile number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Dashboard role.
    pub role: Role,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns `true` for admins.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Case-insensitive match on name and e-mail, substring match on phone.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        let lowered = term.to_lowercase();
        self.name.to_lowercase().contains(&lowered)
            || self.email.to_lowercase().contains(&lowered)
            || self.phone.as_deref().is_some_and(|p| p.contains(term))
    }
}
