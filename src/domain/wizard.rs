//! Four-step booking wizard.
//!
//! ```text
//! Review ──(signed in)──► Contact ──(name + phone)──► Payment ──(method, submit)──► Confirmed
//!    ▲                       │                           │
//!    └────────── back ───────┴────────── back ───────────┘
//! ```
//!
//! The wizard only tracks local step state and the inputs gathered so far.
//! Submitting from `Payment` is handled by the booking service, which waits
//! a fixed delay, appends the booking, and then calls [`BookingWizard::confirm`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::booking::PaymentMethod;
use super::pricing::{Quote, TimeRange};
use super::user::User;
use super::{BookingId, FieldId, UserId, WizardId};
use crate::error::VenueError;

/// Wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Step 1: selection summary.
    Review,
    /// Step 2: contact details.
    Contact,
    /// Step 3: payment method.
    Payment,
    /// Step 4: booking created.
    Confirmed,
}

impl WizardStep {
    /// 1-based step number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Review => 1,
            Self::Contact => 2,
            Self::Payment => 3,
            Self::Confirmed => 4,
        }
    }
}

/// Field, date, and hours picked in the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Selection {
    /// Chosen field.
    pub field_id: FieldId,
    /// Field name at selection time.
    pub field_name: String,
    /// Play date.
    pub date: NaiveDate,
    /// Chosen hours.
    pub time: TimeRange,
    /// Expected head count.
    pub players: u32,
    /// Price of the selection.
    pub quote: Quote,
}

/// Contact details entered in step 2.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactInfo {
    /// Full name.
    #[serde(default)]
    pub name: String,
    /// Mobile number.
    #[serde(default)]
    pub phone: String,
    /// E-mail address.
    #[serde(default)]
    pub email: String,
}

/// State of one open wizard.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingWizard {
    /// Wizard identifier.
    pub id: WizardId,
    /// Current step.
    pub step: WizardStep,
    /// What is being booked.
    pub selection: Selection,
    /// Signed-in account, captured when leaving step 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Contact details.
    pub contact: ContactInfo,
    /// Chosen payment channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    /// Set once confirmed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<BookingId>,
    /// Open time.
    pub opened_at: DateTime<Utc>,
}

impl BookingWizard {
    /// Opens a wizard at the review step.
    #[must_use]
    pub fn open(selection: Selection) -> Self {
        Self {
            id: WizardId::new(),
            step: WizardStep::Review,
            selection,
            user: None,
            contact: ContactInfo::default(),
            payment_method: None,
            booking_id: None,
            opened_at: Utc::now(),
        }
    }

    fn expect_step(&self, expected: WizardStep) -> Result<(), VenueError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(VenueError::InvalidStep {
                expected,
                actual: self.step,
            })
        }
    }

    /// Review → Contact. Requires a signed-in user; prefills contact name
    /// and e-mail from the account.
    ///
    /// # Errors
    ///
    /// [`VenueError::LoginRequired`] without a user,
    /// [`VenueError::InvalidStep`] outside the review step.
    pub fn proceed_from_review(&mut self, user: Option<&User>) -> Result<(), VenueError> {
        self.expect_step(WizardStep::Review)?;
        let user = user.ok_or(VenueError::LoginRequired)?;
        if self.contact.name.is_empty() {
            self.contact.name.clone_from(&user.name);
        }
        if self.contact.email.is_empty() {
            self.contact.email.clone_from(&user.email);
        }
        if self.contact.phone.is_empty()
            && let Some(phone) = &user.phone
        {
            self.contact.phone.clone_from(phone);
        }
        self.user = Some(user.clone());
        self.step = WizardStep::Contact;
        Ok(())
    }

    /// Contact → Payment. Blank fields in `contact` keep the prefilled
    /// values; name and phone must end up non-empty.
    ///
    /// # Errors
    ///
    /// [`VenueError::MissingField`] for a blank name or phone,
    /// [`VenueError::InvalidStep`] outside the contact step.
    pub fn submit_contact(&mut self, contact: ContactInfo) -> Result<(), VenueError> {
        self.expect_step(WizardStep::Contact)?;
        let merged = ContactInfo {
            name: non_blank_or(contact.name, &self.contact.name),
            phone: non_blank_or(contact.phone, &self.contact.phone),
            email: non_blank_or(contact.email, &self.contact.email),
        };
        if merged.name.is_empty() {
            return Err(VenueError::MissingField("name"));
        }
        if merged.phone.is_empty() {
            return Err(VenueError::MissingField("phone"));
        }
        self.contact = merged;
        self.step = WizardStep::Payment;
        Ok(())
    }

    /// Records the payment channel and checks the wizard can be submitted.
    ///
    /// # Errors
    ///
    /// [`VenueError::InvalidStep`] outside the payment step,
    /// [`VenueError::MissingField`] when no method is given.
    pub fn choose_payment(
        &mut self,
        method: Option<PaymentMethod>,
    ) -> Result<PaymentMethod, VenueError> {
        self.expect_step(WizardStep::Payment)?;
        let method = method.ok_or(VenueError::MissingField("payment_method"))?;
        self.payment_method = Some(method);
        Ok(method)
    }

    /// Checks that `user_id` is the account captured when leaving review.
    ///
    /// # Errors
    ///
    /// [`VenueError::LoginRequired`] before review was passed,
    /// [`VenueError::Forbidden`] for any other account.
    pub fn ensure_owner(&self, user_id: &UserId) -> Result<(), VenueError> {
        match &self.user {
            None => Err(VenueError::LoginRequired),
            Some(owner) if &owner.id == user_id => Ok(()),
            Some(_) => Err(VenueError::Forbidden),
        }
    }

    /// Payment → Confirmed once the booking exists.
    ///
    /// # Errors
    ///
    /// [`VenueError::MissingField`] if no payment method was chosen,
    /// [`VenueError::InvalidStep`] outside the payment step.
    pub fn confirm(&mut self, booking_id: BookingId) -> Result<(), VenueError> {
        self.expect_step(WizardStep::Payment)?;
        if self.payment_method.is_none() {
            return Err(VenueError::MissingField("payment_method"));
        }
        self.booking_id = Some(booking_id);
        self.step = WizardStep::Confirmed;
        Ok(())
    }

    /// Steps back from Contact or Payment.
    ///
    /// # Errors
    ///
    /// [`VenueError::InvalidStep`] from Review or Confirmed.
    pub fn back(&mut self) -> Result<(), VenueError> {
        self.step = match self.step {
            WizardStep::Contact => WizardStep::Review,
            WizardStep::Payment => WizardStep::Contact,
            other => {
                return Err(VenueError::InvalidStep {
                    expected: WizardStep::Contact,
                    actual: other,
                });
            }
        };
        Ok(())
    }
}

fn non_blank_or(value: String, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
