//! Append-only booking list.
//!
//! Nothing here checks for overlapping bookings of the same slot.

use chrono::Utc;
use tokio::sync::RwLock;

use super::booking::{Booking, BookingStatus};
use super::{BookingId, UserId};
use crate::error::VenueError;

/// In-memory list of all bookings in append order.
#[derive(Debug, Default)]
pub struct BookingLedger {
    bookings: RwLock<Vec<Booking>>,
}

impl BookingLedger {
    /// Builds a ledger from seed bookings.
    #[must_use]
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self {
            bookings: RwLock::new(bookings),
        }
    }

    /// Appends a booking, stamping `created_at`.
    pub async fn append(&self, mut booking: Booking) -> Booking {
        booking.created_at = Utc::now();
        self.bookings.write().await.push(booking.clone());
        booking
    }

    /// Clones one booking.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::BookingNotFound`] for unknown ids.
    pub async fn get(&self, id: BookingId) -> Result<Booking, VenueError> {
        self.bookings
            .read()
            .await
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(VenueError::BookingNotFound(*id.as_uuid()))
    }

    /// Snapshot of all bookings.
    pub async fn all(&self) -> Vec<Booking> {
        self.bookings.read().await.clone()
    }

    /// Bookings owned by `user_id`.
    pub async fn for_user(&self, user_id: &UserId) -> Vec<Booking> {
        self.bookings
            .read()
            .await
            .iter()
            .filter(|b| &b.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Overwrites the status, returning `(old, updated booking)`.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::BookingNotFound`] for unknown ids.
    pub async fn set_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<(BookingStatus, Booking), VenueError> {
        self.update(id, |booking| {
            let old = booking.status;
            booking.status = status;
            Ok(old)
        })
        .await
    }

    /// Runs `f` on one booking under the write lock. `f` may veto the
    /// change by returning an error, in which case the booking is left as
    /// `f` found it.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::BookingNotFound`] for unknown ids, or whatever
    /// `f` returns.
    pub async fn update<T>(
        &self,
        id: BookingId,
        f: impl FnOnce(&mut Booking) -> Result<T, VenueError>,
    ) -> Result<(T, Booking), VenueError> {
        let mut bookings = self.bookings.write().await;
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(VenueError::BookingNotFound(*id.as_uuid()))?;
        let out = f(booking)?;
        Ok((out, booking.clone()))
    }

    /// Number of bookings.
    pub async fn len(&self) -> usize {
        self.bookings.read().await.len()
    }

    /// Returns `true` if the ledger is empty.
    pub async fn is_empty(&self) -> bool {
        self.bookings.read().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::seed;

    #[tokio::test]
    async fn status_overwrite_has_no_guard() {
        let ledger = BookingLedger::new(seed::bookings());
        let Some(cancelled) = ledger
            .all()
            .await
            .into_iter()
            .find(|b| b.status == BookingStatus::Cancelled)
        else {
            panic!("seed has a cancelled booking");
        };

        let Ok((old, updated)) = ledger
            .set_status(cancelled.id, BookingStatus::Completed)
            .await
        else {
            panic!("status change failed");
        };
        assert_eq!(old, BookingStatus::Cancelled);
        assert_eq!(updated.status, BookingStatus::Completed);
    }

    #[tokio::test]
    async fn append_allows_identical_slots() {
        let ledger = BookingLedger::new(Vec::new());
        let Some(template) = seed::bookings().into_iter().next() else {
            panic!("seed has bookings");
        };
        let mut twin = template.clone();
        twin.id = BookingId::new();

        let _ = ledger.append(template).await;
        let _ = ledger.append(twin).await;
        assert_eq!(ledger.len().await, 2);
    }

    #[tokio::test]
    async fn for_user_filters_by_owner() {
        let ledger = BookingLedger::new(seed::bookings());
        let mine = ledger.for_user(&UserId::new("u1")).await;
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|b| b.user_id.as_str() == "u1"));
    }

    #[tokio::test]
    async fn unknown_booking_errors() {
        let ledger = BookingLedger::new(Vec::new());
        let result = ledger
            .set_status(BookingId::new(), BookingStatus::Confirmed)
            .await;
        assert!(matches!(result, Err(VenueError::BookingNotFound(_))));
    }
}
