//! Admin field and user table DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::{PaginationMeta, PaginationParams};
use super::field_dto::FieldDto;
use crate::domain::FieldId;
use crate::domain::user::Role;
use crate::service::auth_service::UserWithStats;

/// Active-flag filter for the admin field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatusFilter {
    /// Only active fields.
    Active,
    /// Only inactive fields.
    Inactive,
}

impl FieldStatusFilter {
    /// The `is_active` value this filter selects.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Query for `GET /admin/fields`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminFieldQuery {
    /// Match on name or description.
    pub search: Option<String>,
    /// `active` or `inactive`.
    pub status: Option<FieldStatusFilter>,
}

/// Response for `GET /admin/fields`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminFieldListResponse {
    /// Fields in catalog order.
    pub data: Vec<FieldDto>,
    /// Number of fields returned.
    pub total: usize,
}

/// Response for `POST /admin/fields/{id}/toggle`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ToggleFieldResponse {
    /// Field slug.
    pub field_id: FieldId,
    /// New active flag.
    pub is_active: bool,
}

/// Query for `GET /admin/users`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminUserQuery {
    /// Match on name, e-mail, or phone.
    pub search: Option<String>,
    /// `user` or `admin`.
    pub role: Option<Role>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page (max 100).
    pub per_page: Option<u32>,
}

impl AdminUserQuery {
    /// Page selection.
    #[must_use]
    pub fn pagination(&self) -> PaginationParams {
        let defaults = PaginationParams::default();
        PaginationParams {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        }
    }
}

/// Response for `GET /admin/users`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    /// Accounts with booking totals.
    pub data: Vec<UserWithStats>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
