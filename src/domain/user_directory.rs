//! Accounts and mock sessions.
//!
//! Sessions map an opaque bearer token to a user id. There are no
//! passwords: whoever holds the token is that user. The session table is
//! bounded; once full, the oldest session is dropped.

use std::collections::{HashMap, VecDeque};

use chrono::Utc;
use tokio::sync::RwLock;

use super::UserId;
use super::user::{Role, User};
use crate::error::VenueError;

/// Open sessions kept per account. A further login drops that account's
/// oldest token.
pub const MAX_SESSIONS_PER_USER: usize = 5;

/// Open sessions kept overall. A further login drops the oldest token.
pub const MAX_SESSIONS: usize = 10_000;

/// Token to user map with insertion order for eviction.
#[derive(Debug)]
struct SessionTable {
    tokens: HashMap<String, UserId>,
    order: VecDeque<String>,
    per_user: usize,
    total: usize,
}

impl Default for SessionTable {
    fn default() -> Self {
        Self::with_limits(MAX_SESSIONS_PER_USER, MAX_SESSIONS)
    }
}

impl SessionTable {
    fn with_limits(per_user: usize, total: usize) -> Self {
        Self {
            tokens: HashMap::new(),
            order: VecDeque::new(),
            per_user: per_user.max(1),
            total: total.max(1),
        }
    }

    fn open(&mut self, token: String, user_id: UserId) {
        while self.held_by(&user_id) >= self.per_user {
            let oldest = self
                .order
                .iter()
                .find(|t| self.tokens.get(t.as_str()) == Some(&user_id))
                .cloned();
            let Some(oldest) = oldest else { break };
            self.close(&oldest);
        }
        while self.order.len() >= self.total {
            let Some(oldest) = self.order.pop_front() else { break };
            self.tokens.remove(&oldest);
        }
        self.order.push_back(token.clone());
        self.tokens.insert(token, user_id);
    }

    fn held_by(&self, user_id: &UserId) -> usize {
        self.tokens.values().filter(|id| *id == user_id).count()
    }

    fn get(&self, token: &str) -> Option<&UserId> {
        self.tokens.get(token)
    }

    fn close(&mut self, token: &str) -> bool {
        let removed = self.tokens.remove(token).is_some();
        if removed {
            self.order.retain(|t| t != token);
        }
        removed
    }
}

/// In-memory user list plus active sessions.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: RwLock<Vec<User>>,
    sessions: RwLock<SessionTable>,
}

impl UserDirectory {
    /// Builds a directory from seed users.
    #[must_use]
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
            sessions: RwLock::new(SessionTable::default()),
        }
    }

    /// Snapshot of all users.
    pub async fn all(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    /// Clones one user.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::UserNotFound`] for unknown ids.
    pub async fn get(&self, id: &UserId) -> Result<User, VenueError> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| &u.id == id)
            .cloned()
            .ok_or_else(|| VenueError::UserNotFound(id.to_string()))
    }

    /// Finds a user by e-mail, ignoring case.
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    /// Adds an account.
    pub async fn insert(&self, user: User) {
        self.users.write().await.push(user);
    }

    /// Returns the existing account for `email`, or adds one built by `make`.
    pub async fn find_or_insert_with(&self, email: &str, make: impl FnOnce() -> User) -> User {
        let mut users = self.users.write().await;
        if let Some(user) = users.iter().find(|u| u.email.eq_ignore_ascii_case(email)) {
            return user.clone();
        }
        let user = make();
        users.push(user.clone());
        user
    }

    /// Flips a user's role, returning the updated account.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::UserNotFound`] for unknown ids.
    pub async fn toggle_role(&self, id: &UserId) -> Result<User, VenueError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| VenueError::UserNotFound(id.to_string()))?;
        user.role = user.role.toggled();
        Ok(user.clone())
    }

    /// Replaces an account's name, e-mail, and phone.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::UserNotFound`] for unknown ids, or
    /// [`VenueError::InvalidRequest`] when another account holds `email`.
    pub async fn update_profile(
        &self,
        id: &UserId,
        name: &str,
        email: &str,
        phone: Option<String>,
    ) -> Result<User, VenueError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| &u.id != id && u.email.eq_ignore_ascii_case(email))
        {
            return Err(VenueError::InvalidRequest(format!(
                "email {email} is already registered"
            )));
        }
        let user = users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| VenueError::UserNotFound(id.to_string()))?;
        user.name = name.to_string();
        user.email = email.to_string();
        user.phone = phone;
        Ok(user.clone())
    }

    /// Opens a session for `user_id`, returning its bearer token. May
    /// evict the oldest session when a limit is reached.
    pub async fn open_session(&self, user_id: UserId) -> String {
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.sessions.write().await.open(token.clone(), user_id);
        token
    }

    /// Resolves a bearer token to its user.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::Unauthenticated`] for unknown tokens or
    /// sessions whose user was deleted.
    pub async fn resolve_session(&self, token: &str) -> Result<User, VenueError> {
        let user_id = self
            .sessions
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or(VenueError::Unauthenticated)?;
        self.get(&user_id)
            .await
            .map_err(|_| VenueError::Unauthenticated)
    }

    /// Ends a session. Returns `false` if the token was unknown.
    pub async fn close_session(&self, token: &str) -> bool {
        self.sessions.write().await.close(token)
    }

    /// Number of accounts.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns `true` if there are no accounts.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

/// Builds an account for a login e-mail that matches no seeded user.
#[must_use]
pub fn fabricate_user(email: &str, admin_email: &str) -> User {
    let is_admin = email.eq_ignore_ascii_case(admin_email);
    User {
        id: UserId::generate(),
        name: if is_admin { "Admin" } else { "User" }.to_string(),
        email: email.to_string(),
        phone: None,
        role: if is_admin { Role::Admin } else { Role::User },
        created_at: Utc::now(),
    }
}
