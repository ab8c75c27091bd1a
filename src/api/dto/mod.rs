//! Data Transfer Objects for REST request/response serialization.
//!
//! Amounts are whole rupiah as JSON integers. Dates are `YYYY-MM-DD`.

pub mod admin_dto;
pub mod auth_dto;
pub mod booking_dto;
pub mod common_dto;
pub mod field_dto;
pub mod wizard_dto;

pub use admin_dto::*;
pub use auth_dto::*;
pub use booking_dto::*;
pub use common_dto::*;
pub use field_dto::*;
pub use wizard_dto::*;
