//! Bookings and their lifecycle.
//!
//! A booking's status is overwritten directly by admin actions. No
//! transition table is enforced, so `cancelled → completed` is accepted
//! like any other change. The one guarded path is customer self-cancel,
//! which requires a confirmed booking more than 24 hours out.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::pricing::TimeRange;
use super::{BookingId, FieldId, UserId};

/// Minimum lead time for a customer to cancel their own booking.
pub const SELF_CANCEL_LEAD_HOURS: i64 = 24;

/// Booking status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Awaiting confirmation.
    Pending,
    /// Paid and scheduled.
    Confirmed,
    /// Cancelled by admin or customer.
    Cancelled,
    /// Played.
    Completed,
}

impl BookingStatus {
    /// Whether the booking counts towards revenue and spend totals.
    #[must_use]
    pub const fn is_billable(self) -> bool {
        matches!(self, Self::Confirmed | Self::Completed)
    }
}

/// Payment channel picked in the wizard. No transaction is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// BCA, Mandiri, BNI, BRI.
    BankTransfer,
    /// OVO, GoPay, Dana, LinkAja.
    EWallet,
    /// Visa, Mastercard.
    CreditCard,
}

/// A reservation in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Booking {
    /// Booking identifier.
    pub id: BookingId,
    /// Booked court. May reference a field that no longer exists.
    pub field_id: FieldId,
    /// Owning account.
    pub user_id: UserId,
    /// Field name captured at booking time.
    pub field_name: String,
    /// Calendar date of play.
    pub date: NaiveDate,
    /// Booked hours.
    pub time: TimeRange,
    /// Number of players.
    pub players: u32,
    /// Rate applied to every hour.
    pub price_per_hour: u64,
    /// `price_per_hour * duration`.
    pub total_price: u64,
    /// Current status.
    pub status: BookingStatus,
    /// Ledger append time.
    pub created_at: DateTime<Utc>,
    /// Contact name.
    pub customer_name: String,
    /// Contact phone.
    pub customer_phone: String,
    /// Payment channel, if booked through the wizard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
}

impl Booking {
    /// Local start of play.
    #[must_use]
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        self.date.and_hms_opt(u32::from(self.time.start_hour), 0, 0)
    }

    /// Whether the customer may still cancel at `now`.
    #[must_use]
    pub fn can_self_cancel(&self, now: NaiveDateTime) -> bool {
        if self.status != BookingStatus::Confirmed {
            return false;
        }
        self.starts_at()
            .is_some_and(|start| start - now > TimeDelta::hours(SELF_CANCEL_LEAD_HOURS))
    }

    /// Whether the customer may book the same field again.
    #[must_use]
    pub const fn can_rebook(&self) -> bool {
        matches!(
            self.status,
            BookingStatus::Completed | BookingStatus::Cancelled
        )
    }
}

/// Relative date window used by the admin booking list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DateWindow {
    /// No restriction.
    All,
    /// Play date is today.
    Today,
    /// Play date is tomorrow.
    Tomorrow,
    /// Within the next 7 days, today included.
    Week,
    /// Within the next 30 days, today included.
    Month,
}

impl DateWindow {
    /// Whether `date` falls in the window relative to `today`.
    #[must_use]
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        let diff = date.signed_duration_since(today).num_days();
        match self {
            Self::All => true,
            Self::Today => diff == 0,
            Self::Tomorrow => diff == 1,
            Self::Week => (0..=7).contains(&diff),
            Self::Month => (0..=30).contains(&diff),
        }
    }
}

/// Per-status counts and revenue over a set of bookings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct BookingTally {
    /// Number of bookings.
    pub total: usize,
    /// Pending bookings.
    pub pending: usize,
    /// Confirmed bookings.
    pub confirmed: usize,
    /// Completed bookings.
    pub completed: usize,
    /// Cancelled bookings.
    pub cancelled: usize,
    /// Sum of `total_price` over confirmed and completed bookings.
    pub revenue: u64,
}

impl BookingTally {
    /// Tallies an iterator of bookings.
    pub fn of<'a>(bookings: impl IntoIterator<Item = &'a Booking>) -> Self {
        let mut tally = Self::default();
        for booking in bookings {
            tally.total += 1;
            match booking.status {
                BookingStatus::Pending => tally.pending += 1,
                BookingStatus::Confirmed => tally.confirmed += 1,
                BookingStatus::Completed => tally.completed += 1,
                BookingStatus::Cancelled => tally.cancelled += 1,
            }
            if booking.status.is_billable() {
                tally.revenue = tally.revenue.saturating_add(booking.total_price);
            }
        }
        tally
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        let Some(date) = NaiveDate::from_ymd_opt(y, m, d) else {
            panic!("valid date");
        };
        date
    }

    fn booking(status: BookingStatus, total_price: u64) -> Booking {
        let Ok(time) = TimeRange::new(19, 21) else {
            panic!("valid range");
        };
        Booking {
            id: BookingId::new(),
            field_id: FieldId::new("lapangan-a"),
            user_id: UserId::new("u1"),
            field_name: "Lapangan A".to_string(),
            date: date(2025, 6, 28),
            time,
            players: 10,
            price_per_hour: total_price / 2,
            total_price,
            status,
            created_at: Utc::now(),
            customer_name: "John Doe".to_string(),
            customer_phone: "081234567890".to_string(),
            payment_method: None,
        }
    }

    #[test]
    fn self_cancel_needs_more_than_a_day() {
        let b = booking(BookingStatus::Confirmed, 400_000);
        let Some(start) = b.starts_at() else {
            panic!("valid start");
        };
        assert!(b.can_self_cancel(start - TimeDelta::hours(25)));
        assert!(!b.can_self_cancel(start - TimeDelta::hours(24)));
        assert!(!b.can_self_cancel(start));
    }

    #[test]
    fn self_cancel_only_for_confirmed() {
        let b = booking(BookingStatus::Pending, 400_000);
        let Some(start) = b.starts_at() else {
            panic!("valid start");
        };
        assert!(!b.can_self_cancel(start - TimeDelta::days(10)));
    }

    #[test]
    fn rebook_after_final_states() {
        assert!(booking(BookingStatus::Completed, 1).can_rebook());
        assert!(booking(BookingStatus::Cancelled, 1).can_rebook());
        assert!(!booking(BookingStatus::Confirmed, 1).can_rebook());
    }

    #[test]
    fn tally_counts_revenue_from_billable_only() {
        let bookings = [
            booking(BookingStatus::Confirmed, 400_000),
            booking(BookingStatus::Completed, 240_000),
            booking(BookingStatus::Pending, 400_000),
            booking(BookingStatus::Cancelled, 200_000),
        ];
        let tally = BookingTally::of(&bookings);
        assert_eq!(tally.total, 4);
        assert_eq!(tally.confirmed, 1);
        assert_eq!(tally.completed, 1);
        assert_eq!(tally.pending, 1);
        assert_eq!(tally.cancelled, 1);
        assert_eq!(tally.revenue, 640_000);
    }

    #[test]
    fn date_windows() {
        let today = date(2025, 6, 23);
        assert!(DateWindow::Today.contains(today, today));
        assert!(DateWindow::Tomorrow.contains(date(2025, 6, 24), today));
        assert!(DateWindow::Week.contains(date(2025, 6, 30), today));
        assert!(!DateWindow::Week.contains(date(2025, 7, 1), today));
        assert!(!DateWindow::Month.contains(date(2025, 6, 22), today));
        assert!(DateWindow::Month.contains(date(2025, 7, 23), today));
        assert!(DateWindow::All.contains(date(2020, 1, 1), today));
    }
}
