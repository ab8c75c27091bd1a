//! Mock authentication and admin user management.
//!
//! No credential is ever checked. Login succeeds for any non-empty e-mail
//! and password, reusing the seeded account when the e-mail matches and
//! fabricating one otherwise.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::booking::BookingTally;
use crate::domain::user::{Role, User};
use crate::domain::user_directory::fabricate_user;
use crate::domain::{BookingLedger, EventBus, UserDirectory, UserId, VenueEvent};
use crate::error::VenueError;

/// Window for "new users" in the admin stats.
const NEW_USER_DAYS: i64 = 30;

/// Shortest accepted new password, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A signed-in session.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Session {
    /// Opaque bearer token.
    pub token: String,
    /// The signed-in account.
    pub user: User,
}

/// An account with its booking totals.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserWithStats {
    /// The account.
    #[serde(flatten)]
    pub user: User,
    /// Bookings made by the account.
    pub total_bookings: usize,
    /// Completed bookings.
    pub completed_bookings: usize,
    /// Spend over confirmed and completed bookings.
    pub total_spent: u64,
}

/// Directory-wide counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserStats {
    /// All accounts.
    pub total: usize,
    /// Admin accounts.
    pub admins: usize,
    /// Regular accounts.
    pub regular: usize,
    /// Accounts created in the last 30 days.
    pub new_this_month: usize,
}

/// Mock sign-in plus the admin user table.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<UserDirectory>,
    ledger: Arc<BookingLedger>,
    event_bus: EventBus,
    admin_email: String,
}

fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str, VenueError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(VenueError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

impl AuthService {
    /// Creates a new `AuthService`.
    #[must_use]
    pub fn new(
        users: Arc<UserDirectory>,
        ledger: Arc<BookingLedger>,
        event_bus: EventBus,
        admin_email: impl Into<String>,
    ) -> Self {
        Self {
            users,
            ledger,
            event_bus,
            admin_email: admin_email.into(),
        }
    }

    /// Signs in with any non-empty e-mail and password.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::MissingField`] when either input is blank.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, VenueError> {
        let email = require(email, "email")?;
        require(password, "password")?;
        let user = self
            .users
            .find_or_insert_with(email, || fabricate_user(email, &self.admin_email))
            .await;
        let token = self.users.open_session(user.id.clone()).await;
        tracing::info!(user_id = %user.id, role = ?user.role, "signed in");
        Ok(Session { token, user })
    }

    /// Creates a `user`-role account and signs it in.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::MissingField`] for blank inputs, or
    /// [`VenueError::InvalidRequest`] when the e-mail is taken.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, VenueError> {
        let name = require(name, "name")?;
        let email = require(email, "email")?;
        require(password, "password")?;
        if self.users.find_by_email(email).await.is_some() {
            return Err(VenueError::InvalidRequest(format!(
                "email {email} is already registered"
            )));
        }
        let user = User {
            id: UserId::generate(),
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            role: Role::User,
            created_at: Utc::now(),
        };
        self.users.insert(user.clone()).await;
        let token = self.users.open_session(user.id.clone()).await;
        tracing::info!(user_id = %user.id, "account registered");
        Ok(Session { token, user })
    }

    /// Ends a session.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::Unauthenticated`] for unknown tokens.
    pub async fn logout(&self, token: &str) -> Result<(), VenueError> {
        if self.users.close_session(token).await {
            tracing::debug!("signed out");
            Ok(())
        } else {
            Err(VenueError::Unauthenticated)
        }
    }

    /// Resolves a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::Unauthenticated`] for unknown tokens.
    pub async fn resolve(&self, token: &str) -> Result<User, VenueError> {
        self.users.resolve_session(token).await
    }

    /// Replaces the signed-in account's name, e-mail, and phone. A blank or
    /// missing phone clears it.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::MissingField`] for a blank name or e-mail, or
    /// [`VenueError::InvalidRequest`] when the e-mail belongs to another
    /// account.
    pub async fn update_profile(
        &self,
        id: &UserId,
        name: &str,
        email: &str,
        phone: Option<&str>,
    ) -> Result<User, VenueError> {
        let name = require(name, "name")?;
        let email = require(email, "email")?;
        let phone = phone
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        let user = self.users.update_profile(id, name, email, phone).await?;
        tracing::info!(user_id = %id, "profile updated");
        Ok(user)
    }

    /// Validates a password change form. Passwords are never stored, so
    /// the current password is only required, not compared.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::MissingField`] for a blank input, or
    /// [`VenueError::InvalidRequest`] when the confirmation differs or the
    /// new password is shorter than [`MIN_PASSWORD_LEN`].
    pub async fn change_password(
        &self,
        id: &UserId,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<(), VenueError> {
        require(current, "current_password")?;
        require(new, "new_password")?;
        require(confirm, "confirm_password")?;
        if new != confirm {
            return Err(VenueError::InvalidRequest(
                "new password and confirmation do not match".to_string(),
            ));
        }
        if new.chars().count() < MIN_PASSWORD_LEN {
            return Err(VenueError::InvalidRequest(format!(
                "new password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        self.users.get(id).await?;
        tracing::info!(user_id = %id, "password changed");
        Ok(())
    }

    /// Admin user table with per-account booking totals.
    pub async fn admin_users(&self, search: Option<&str>, role: Option<Role>) -> Vec<UserWithStats> {
        let bookings = self.ledger.all().await;
        self.users
            .all()
            .await
            .into_iter()
            .filter(|u| search.is_none_or(|term| u.matches_search(term)))
            .filter(|u| role.is_none_or(|r| u.role == r))
            .map(|user| {
                let tally = BookingTally::of(bookings.iter().filter(|b| b.user_id == user.id));
                UserWithStats {
                    total_bookings: tally.total,
                    completed_bookings: tally.completed,
                    total_spent: tally.revenue,
                    user,
                }
            })
            .collect()
    }

    /// Directory-wide counts as of `now`.
    pub async fn user_stats(&self, now: DateTime<Utc>) -> UserStats {
        let users = self.users.all().await;
        let admins = users.iter().filter(|u| u.is_admin()).count();
        let cutoff = now - TimeDelta::days(NEW_USER_DAYS);
        UserStats {
            total: users.len(),
            admins,
            regular: users.len() - admins,
            new_this_month: users.iter().filter(|u| u.created_at >= cutoff).count(),
        }
    }

    /// Flips an account between `user` and `admin`.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::UserNotFound`] for unknown ids.
    pub async fn toggle_role(&self, id: &UserId) -> Result<User, VenueError> {
        let user = self.users.toggle_role(id).await?;
        let _ = self.event_bus.publish(VenueEvent::UserRoleChanged {
            user_id: user.id.clone(),
            role: user.role,
            timestamp: Utc::now(),
        });
        tracing::info!(user_id = %id, role = ?user.role, "role toggled");
        Ok(user)
    }
}
