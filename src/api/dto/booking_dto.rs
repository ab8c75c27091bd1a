//! Customer and admin booking DTOs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::{PaginationMeta, PaginationParams, non_blank};
use crate::domain::booking::{Booking, BookingStatus, DateWindow};
use crate::service::booking_service::{BookingQuery, BookingView};

/// Query for `GET /me/bookings`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// Exact status.
    pub status: Option<BookingStatus>,
    /// Case-insensitive match on the field name.
    pub search: Option<String>,
}

/// One row of the customer history, with the actions the dashboard offers.
#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryEntry {
    /// The booking itself.
    #[serde(flatten)]
    pub booking: Booking,
    /// Confirmed and more than 24 hours before play.
    pub can_cancel: bool,
    /// Completed or cancelled.
    pub can_rebook: bool,
}

impl HistoryEntry {
    /// Evaluates the row actions against local wall-clock `now`.
    #[must_use]
    pub fn at(booking: Booking, now: NaiveDateTime) -> Self {
        Self {
            can_cancel: booking.can_self_cancel(now),
            can_rebook: booking.can_rebook(),
            booking,
        }
    }
}

/// Response for `GET /me/bookings`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryResponse {
    /// Bookings, newest first.
    pub data: Vec<HistoryEntry>,
    /// Number of bookings returned.
    pub total: usize,
}

/// Query for `GET /admin/bookings`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminBookingQuery {
    /// Match on field name, user name, or user e-mail.
    pub search: Option<String>,
    /// Exact status.
    pub status: Option<BookingStatus>,
    /// `all`, `today`, `tomorrow`, `week`, or `month`.
    pub window: Option<DateWindow>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page (max 100).
    pub per_page: Option<u32>,
}

impl AdminBookingQuery {
    /// Service-level filters.
    #[must_use]
    pub fn to_query(&self) -> BookingQuery {
        BookingQuery {
            search: non_blank(self.search.as_deref()).map(str::to_string),
            status: self.status,
            window: self.window,
        }
    }

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

/// Response for `GET /admin/bookings`.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingListResponse {
    /// Joined bookings, newest first.
    pub data: Vec<BookingView>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Request body for `PUT /admin/bookings/{id}/status`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    /// New status. Any value is accepted from any current status.
    pub status: BookingStatus,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::seed;

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        let Some(now) = NaiveDate::from_ymd_opt(y, m, d).and_then(|d| d.and_hms_opt(12, 0, 0))
        else {
            panic!("valid timestamp");
        };
        now
    }

    fn seeded(status: BookingStatus) -> Booking {
        let Some(booking) = seed::bookings().into_iter().find(|b| b.status == status) else {
            panic!("seed has a {status:?} booking");
        };
        booking
    }

    #[test]
    fn history_row_flattens_booking_and_flags_actions() {
        let entry = HistoryEntry::at(seeded(BookingStatus::Confirmed), noon(2025, 6, 20));
        assert!(entry.can_cancel);
        assert!(!entry.can_rebook);

        let Ok(json) = serde_json::to_value(&entry) else {
            panic!("history row serializes");
        };
        assert!(json.get("id").is_some());
        assert_eq!(json.get("status"), Some(&serde_json::json!("confirmed")));
        assert_eq!(json.get("can_cancel"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn cancel_closes_the_day_before_play() {
        let booking = seeded(BookingStatus::Confirmed);
        let play_day = booking.date;
        let Some(eve) = play_day.pred_opt().and_then(|d| d.and_hms_opt(22, 0, 0)) else {
            panic!("valid eve");
        };
        let entry = HistoryEntry::at(booking, eve);
        assert!(!entry.can_cancel);
    }

    #[test]
    fn finished_bookings_offer_rebook_only() {
        let now = noon(2025, 6, 1);
        for status in [BookingStatus::Completed, BookingStatus::Cancelled] {
            let entry = HistoryEntry::at(seeded(status), now);
            assert!(entry.can_rebook);
            assert!(!entry.can_cancel);
        }
    }
}
