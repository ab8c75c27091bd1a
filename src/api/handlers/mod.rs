//! REST endpoint handlers organized by resource.

pub mod admin;
pub mod auth;
pub mod fields;
pub mod me;
pub mod system;
pub mod wizard;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(fields::routes())
        .merge(auth::routes())
        .merge(wizard::routes())
        .merge(me::routes())
        .merge(admin::routes())
}
