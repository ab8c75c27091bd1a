//! Booking wizard DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::FieldId;
use crate::domain::booking::{Booking, PaymentMethod};
use crate::domain::pricing::format_rupiah;
use crate::domain::wizard::BookingWizard;

/// Request body for `POST /wizards`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct OpenWizardRequest {
    /// Field slug.
    pub field_id: FieldId,
    /// Play date (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// First hour, inclusive.
    pub start_hour: u8,
    /// Last hour, exclusive.
    pub end_hour: u8,
    /// Expected head count. Defaults to 10.
    #[serde(default = "default_players")]
    pub players: u32,
}

fn default_players() -> u32 {
    10
}

/// Request body for `POST /wizards/{id}/submit`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitPaymentRequest {
    /// Chosen payment channel. Required; a missing value is reported as
    /// a missing field.
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

/// Wizard state with display helpers.
#[derive(Debug, Serialize, ToSchema)]
pub struct WizardResponse {
    /// Wizard state.
    #[serde(flatten)]
    pub wizard: BookingWizard,
    /// Step number, 1 to 4.
    pub step_number: u8,
    /// Quoted total in display form.
    pub total_formatted: String,
}

impl From<BookingWizard> for WizardResponse {
    fn from(wizard: BookingWizard) -> Self {
        Self {
            step_number: wizard.step.number(),
            total_formatted: format_rupiah(wizard.selection.quote.total_price),
            wizard,
        }
    }
}

/// Response for a successful `POST /wizards/{id}/submit`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitPaymentResponse {
    /// Wizard at its confirmed step.
    pub wizard: WizardResponse,
    /// The booking just created.
    pub booking: Booking,
}
