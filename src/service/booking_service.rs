//! Booking service: drives the wizard, writes the ledger, answers the
//! customer and admin dashboards, and emits events.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::booking::{Booking, BookingStatus, BookingTally, DateWindow, PaymentMethod};
use crate::domain::pricing;
use crate::domain::user::User;
use crate::domain::wizard::{BookingWizard, ContactInfo, Selection};
use crate::domain::{
    BookingId, BookingLedger, EventBus, FieldCatalog, FieldId, UserDirectory, UserId, VenueEvent,
    WizardId, WizardRegistry,
};
use crate::error::VenueError;
use crate::service::catalog_service::opening_range;

/// Name reported when a booking's field is gone from the catalog.
pub const UNKNOWN_FIELD: &str = "Unknown Field";
/// Name reported when a booking's user is gone from the directory.
pub const UNKNOWN_USER: &str = "Unknown User";

const UPCOMING_LIMIT: usize = 3;
const RECENT_LIMIT: usize = 5;

/// A booking joined with its field and user.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingView {
    /// The booking itself.
    #[serde(flatten)]
    pub booking: Booking,
    /// Current catalog name of the field, or `"Unknown Field"`.
    pub field_display_name: String,
    /// Owner's name, or `"Unknown User"`.
    pub user_name: String,
    /// Owner's e-mail, empty when unknown.
    pub user_email: String,
}

/// Customer dashboard home.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerSummary {
    /// All of the customer's bookings.
    pub total: usize,
    /// Confirmed bookings.
    pub confirmed: usize,
    /// Completed bookings.
    pub completed: usize,
    /// Cancelled bookings.
    pub cancelled: usize,
    /// Spend over confirmed and completed bookings.
    pub total_spent: u64,
    /// Up to three confirmed bookings from today on, soonest first.
    pub upcoming: Vec<Booking>,
}

/// Admin dashboard home.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminOverview {
    /// Revenue over confirmed and completed bookings.
    pub total_revenue: u64,
    /// Total bookings.
    pub total_bookings: usize,
    /// Confirmed bookings.
    pub active_bookings: usize,
    /// Pending bookings.
    pub pending_bookings: usize,
    /// Completed bookings.
    pub completed_bookings: usize,
    /// Cancelled bookings.
    pub cancelled_bookings: usize,
    /// Fields in the catalog.
    pub total_fields: usize,
    /// Registered accounts.
    pub total_users: usize,
    /// Five newest bookings.
    pub recent_bookings: Vec<BookingView>,
    /// Five newest accounts.
    pub recent_users: Vec<User>,
}

/// Admin booking table filters.
#[derive(Debug, Clone, Default)]
pub struct BookingQuery {
    /// Case-insensitive match on field name, user name, or user e-mail.
    pub search: Option<String>,
    /// Exact status.
    pub status: Option<BookingStatus>,
    /// Play-date window relative to today.
    pub window: Option<DateWindow>,
}

/// Orchestration layer for wizards and the booking ledger.
///
/// Stateless coordinator over shared stores. Every mutation follows the
/// pattern: lock → apply domain rule → release → emit event → return.
#[derive(Debug, Clone)]
pub struct BookingService {
    wizards: Arc<WizardRegistry>,
    ledger: Arc<BookingLedger>,
    catalog: Arc<FieldCatalog>,
    users: Arc<UserDirectory>,
    event_bus: EventBus,
    payment_delay: Duration,
}

impl BookingService {
    /// Creates a new `BookingService`.
    #[must_use]
    pub fn new(
        wizards: Arc<WizardRegistry>,
        ledger: Arc<BookingLedger>,
        catalog: Arc<FieldCatalog>,
        users: Arc<UserDirectory>,
        event_bus: EventBus,
        payment_delay: Duration,
    ) -> Self {
        Self {
            wizards,
            ledger,
            catalog,
            users,
            event_bus,
            payment_delay,
        }
    }

    /// Returns the underlying ledger.
    #[must_use]
    pub fn ledger(&self) -> &Arc<BookingLedger> {
        &self.ledger
    }

    /// Returns the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Opens a wizard at the review step for a field, date, and hours.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::FieldNotFound`] for unknown or inactive
    /// fields, [`VenueError::InvalidTimeRange`] for a bad range,
    /// [`VenueError::InvalidRequest`] when a chosen hour is not open or
    /// `players` is zero.
    pub async fn open_wizard(
        &self,
        field_id: &FieldId,
        date: NaiveDate,
        start_hour: u8,
        end_hour: u8,
        players: u32,
    ) -> Result<BookingWizard, VenueError> {
        let time = opening_range(start_hour, end_hour)?;
        if players == 0 {
            return Err(VenueError::InvalidRequest(
                "players must be at least 1".to_string(),
            ));
        }
        let field = self.catalog.get(field_id).await?;
        if !field.is_active {
            return Err(VenueError::FieldNotFound(field_id.to_string()));
        }
        let day = field.availability.day(date);
        if let Some(hour) = (time.start_hour..time.end_hour).find(|h| !day.is_open(*h)) {
            return Err(VenueError::InvalidRequest(format!(
                "slot {hour:02}:00 on {date} is not available"
            )));
        }

        let selection = Selection {
            field_id: field.id.clone(),
            field_name: field.name.clone(),
            date,
            time,
            players,
            quote: pricing::quote(&field.pricing, date, time),
        };
        let wizard = BookingWizard::open(selection);
        let snapshot = wizard.clone();
        let wizard_id = self.wizards.insert(wizard).await?;
        tracing::info!(%wizard_id, %field_id, %date, slot = %time.label(), "wizard opened");
        Ok(snapshot)
    }

    /// Current state of a wizard.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::WizardNotFound`] for unknown ids.
    pub async fn wizard(&self, id: WizardId) -> Result<BookingWizard, VenueError> {
        let lock = self.wizards.get(id).await?;
        let wizard = lock.read().await.clone();
        Ok(wizard)
    }

    async fn step(
        &self,
        id: WizardId,
        f: impl FnOnce(&mut BookingWizard) -> Result<(), VenueError>,
    ) -> Result<BookingWizard, VenueError> {
        let lock = self.wizards.get(id).await?;
        let mut wizard = lock.write().await;
        f(&mut *wizard)?;
        tracing::debug!(wizard_id = %id, step = wizard.step.number(), "wizard advanced");
        Ok(wizard.clone())
    }

    /// Review → Contact. Needs a signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::LoginRequired`] without a user, or
    /// [`VenueError::InvalidStep`] off the review step.
    pub async fn proceed(
        &self,
        id: WizardId,
        user: Option<&User>,
    ) -> Result<BookingWizard, VenueError> {
        self.step(id, |w| w.proceed_from_review(user)).await
    }

    /// Contact → Payment, for the account that passed review.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::MissingField`] when name or phone is blank, or
    /// [`VenueError::Forbidden`] for another account.
    pub async fn submit_contact(
        &self,
        id: WizardId,
        user_id: &UserId,
        contact: ContactInfo,
    ) -> Result<BookingWizard, VenueError> {
        self.step(id, |w| {
            w.ensure_owner(user_id)?;
            w.submit_contact(contact)
        })
        .await
    }

    /// One step back.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::InvalidStep`] from review or confirmed.
    pub async fn back(&self, id: WizardId) -> Result<BookingWizard, VenueError> {
        self.step(id, BookingWizard::back).await
    }

    /// Pays and confirms: waits the fixed payment delay, appends a
    /// confirmed booking, and moves the wizard to its terminal step.
    ///
    /// The wizard stays write-locked across the delay, so a second submit
    /// of the same wizard waits and then fails with `InvalidStep`.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::InvalidStep`] off the payment step,
    /// [`VenueError::MissingField`] without a method, or
    /// [`VenueError::Forbidden`] for an account other than the one that
    /// passed review.
    pub async fn submit(
        &self,
        id: WizardId,
        user_id: &UserId,
        method: Option<PaymentMethod>,
    ) -> Result<(BookingWizard, Booking), VenueError> {
        let lock = self.wizards.get(id).await?;
        let mut wizard = lock.write().await;
        wizard.ensure_owner(user_id)?;
        let method = wizard.choose_payment(method)?;
        let user = wizard.user.clone().ok_or(VenueError::LoginRequired)?;

        if !self.payment_delay.is_zero() {
            tokio::time::sleep(self.payment_delay).await;
        }

        let selection = &wizard.selection;
        let draft = Booking {
            id: BookingId::new(),
            field_id: selection.field_id.clone(),
            user_id: user.id.clone(),
            field_name: selection.field_name.clone(),
            date: selection.date,
            time: selection.time,
            players: selection.players,
            price_per_hour: selection.quote.price_per_hour,
            total_price: selection.quote.total_price,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
            customer_name: wizard.contact.name.clone(),
            customer_phone: wizard.contact.phone.clone(),
            payment_method: Some(method),
        };
        let booking = self.ledger.append(draft).await;
        wizard.confirm(booking.id)?;
        let snapshot = wizard.clone();
        drop(wizard);

        let _ = self.event_bus.publish(VenueEvent::BookingCreated {
            booking_id: booking.id,
            field_id: booking.field_id.clone(),
            user_id: booking.user_id.clone(),
            date: booking.date.to_string(),
            time_slot: booking.time.label(),
            total_price: booking.total_price,
            timestamp: Utc::now(),
        });
        tracing::info!(
            booking_id = %booking.id,
            wizard_id = %id,
            user_id = %booking.user_id,
            total = %pricing::format_rupiah(booking.total_price),
            "booking confirmed"
        );
        Ok((snapshot, booking))
    }

    /// Discards a wizard at any step.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::WizardNotFound`] for unknown ids.
    pub async fn close(&self, id: WizardId) -> Result<BookingWizard, VenueError> {
        let wizard = self.wizards.remove(id).await?;
        tracing::debug!(wizard_id = %id, "wizard closed");
        Ok(wizard)
    }

    /// A customer's bookings, newest first, optionally filtered by status
    /// and a field-name search.
    pub async fn history(
        &self,
        user_id: &UserId,
        status: Option<BookingStatus>,
        search: Option<&str>,
    ) -> Vec<Booking> {
        let needle = search.map(str::to_lowercase);
        let mut bookings: Vec<Booking> = self
            .ledger
            .for_user(user_id)
            .await
            .into_iter()
            .filter(|b| status.is_none_or(|s| b.status == s))
            .filter(|b| {
                needle
                    .as_deref()
                    .is_none_or(|n| b.field_name.to_lowercase().contains(n))
            })
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        bookings
    }

    /// Totals and the next few confirmed games for one customer.
    pub async fn summary(&self, user_id: &UserId, today: NaiveDate) -> CustomerSummary {
        let bookings = self.ledger.for_user(user_id).await;
        let tally = BookingTally::of(&bookings);
        let mut upcoming: Vec<Booking> = bookings
            .into_iter()
            .filter(|b| b.status == BookingStatus::Confirmed && b.date >= today)
            .collect();
        upcoming.sort_by_key(|b| (b.date, b.time.start_hour));
        upcoming.truncate(UPCOMING_LIMIT);
        CustomerSummary {
            total: tally.total,
            confirmed: tally.confirmed,
            completed: tally.completed,
            cancelled: tally.cancelled,
            total_spent: tally.revenue,
            upcoming,
        }
    }

    /// Cancels a customer's own booking.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::NotBookingOwner`] for someone else's booking,
    /// or [`VenueError::CancellationClosed`] unless it is confirmed and
    /// starts more than 24 hours after `now`.
    pub async fn cancel_own(
        &self,
        user_id: &UserId,
        booking_id: BookingId,
        now: NaiveDateTime,
    ) -> Result<Booking, VenueError> {
        let (old_status, booking) = self
            .ledger
            .update(booking_id, |booking| {
                if &booking.user_id != user_id {
                    return Err(VenueError::NotBookingOwner(*booking_id.as_uuid()));
                }
                if !booking.can_self_cancel(now) {
                    return Err(VenueError::CancellationClosed(*booking_id.as_uuid()));
                }
                let old = booking.status;
                booking.status = BookingStatus::Cancelled;
                Ok(old)
            })
            .await?;
        self.publish_status_change(&booking, old_status);
        tracing::info!(%booking_id, %user_id, "booking cancelled by customer");
        Ok(booking)
    }

    /// Admin booking table.
    pub async fn admin_bookings(&self, query: &BookingQuery, today: NaiveDate) -> Vec<BookingView> {
        let needle = query.search.as_deref().map(str::to_lowercase);
        let mut rows: Vec<BookingView> = self
            .join(self.ledger.all().await)
            .await
            .into_iter()
            .filter(|row| query.status.is_none_or(|s| row.booking.status == s))
            .filter(|row| {
                query
                    .window
                    .is_none_or(|w| w.contains(row.booking.date, today))
            })
            .filter(|row| {
                needle.as_deref().is_none_or(|n| {
                    row.field_display_name.to_lowercase().contains(n)
                        || row.booking.field_name.to_lowercase().contains(n)
                        || row.user_name.to_lowercase().contains(n)
                        || row.user_email.to_lowercase().contains(n)
                })
            })
            .collect();
        rows.sort_by(|a, b| b.booking.created_at.cmp(&a.booking.created_at));
        rows
    }

    /// Counts per status plus revenue.
    pub async fn booking_stats(&self) -> BookingTally {
        BookingTally::of(&self.ledger.all().await)
    }

    /// Overwrites a booking's status. Any transition is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::BookingNotFound`] for unknown ids.
    pub async fn set_status(
        &self,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> Result<Booking, VenueError> {
        let (old_status, booking) = self.ledger.set_status(booking_id, status).await?;
        self.publish_status_change(&booking, old_status);
        tracing::info!(%booking_id, ?old_status, new_status = ?status, "booking status overwritten");
        Ok(booking)
    }

    /// Admin home aggregates.
    pub async fn overview(&self) -> AdminOverview {
        let bookings = self.ledger.all().await;
        let tally = BookingTally::of(&bookings);

        let mut recent = self.join(bookings).await;
        recent.sort_by(|a, b| b.booking.created_at.cmp(&a.booking.created_at));
        recent.truncate(RECENT_LIMIT);

        let mut users = self.users.all().await;
        let total_users = users.len();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        users.truncate(RECENT_LIMIT);

        AdminOverview {
            total_revenue: tally.revenue,
            total_bookings: tally.total,
            active_bookings: tally.confirmed,
            pending_bookings: tally.pending,
            completed_bookings: tally.completed,
            cancelled_bookings: tally.cancelled,
            total_fields: self.catalog.len().await,
            total_users,
            recent_bookings: recent,
            recent_users: users,
        }
    }

    async fn join(&self, bookings: Vec<Booking>) -> Vec<BookingView> {
        let fields = self.catalog.all().await;
        let users = self.users.all().await;
        bookings
            .into_iter()
            .map(|booking| {
                let field_display_name = fields
                    .iter()
                    .find(|f| f.id == booking.field_id)
                    .map_or_else(|| UNKNOWN_FIELD.to_string(), |f| f.name.clone());
                let user = users.iter().find(|u| u.id == booking.user_id);
                BookingView {
                    field_display_name,
                    user_name: user.map_or_else(|| UNKNOWN_USER.to_string(), |u| u.name.clone()),
                    user_email: user.map(|u| u.email.clone()).unwrap_or_default(),
                    booking,
                }
            })
            .collect()
    }

    fn publish_status_change(&self, booking: &Booking, old_status: BookingStatus) {
        let _ = self.event_bus.publish(VenueEvent::BookingStatusChanged {
            booking_id: booking.id,
            field_id: booking.field_id.clone(),
            old_status,
            new_status: booking.status,
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::TimeDelta;

    use super::*;
    use crate::domain::seed;
    use crate::domain::wizard::WizardStep;

    fn make_service() -> BookingService {
        BookingService::new(
            Arc::new(WizardRegistry::new()),
            Arc::new(BookingLedger::new(seed::bookings())),
            Arc::new(FieldCatalog::new(seed::fields())),
            Arc::new(UserDirectory::new(seed::users())),
            EventBus::new(64),
            Duration::ZERO,
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        let Some(date) = NaiveDate::from_ymd_opt(y, m, d) else {
            panic!("valid date");
        };
        date
    }

    async fn seeded_user(service: &BookingService, id: &str) -> User {
        let Ok(user) = service.users.get(&UserId::new(id)).await else {
            panic!("seed user {id}");
        };
        user
    }

    fn jane() -> UserId {
        UserId::new("u2")
    }

    async fn wizard_at_payment(service: &BookingService) -> WizardId {
        let Ok(wizard) = service
            .open_wizard(&FieldId::new("lapangan-b"), date(2025, 6, 28), 19, 21, 10)
            .await
        else {
            panic!("open failed");
        };
        let user = seeded_user(service, "u2").await;
        let Ok(_) = service.proceed(wizard.id, Some(&user)).await else {
            panic!("proceed failed");
        };
        let Ok(w) = service
            .submit_contact(wizard.id, &user.id, ContactInfo::default())
            .await
        else {
            panic!("contact failed");
        };
        assert_eq!(w.step, WizardStep::Payment);
        assert_eq!(w.contact.name, "Jane Smith");
        wizard.id
    }

    #[tokio::test]
    async fn open_wizard_quotes_the_selection() {
        let service = make_service();
        let Ok(wizard) = service
            .open_wizard(&FieldId::new("lapangan-b"), date(2025, 6, 28), 19, 21, 10)
            .await
        else {
            panic!("open failed");
        };
        assert_eq!(wizard.step, WizardStep::Review);
        assert_eq!(wizard.selection.quote.price_per_hour, 200_000);
        assert_eq!(wizard.selection.quote.total_price, 400_000);
    }

    #[tokio::test]
    async fn review_without_login_is_rejected() {
        let service = make_service();
        let Ok(wizard) = service
            .open_wizard(&FieldId::new("lapangan-a"), date(2025, 7, 1), 8, 9, 6)
            .await
        else {
            panic!("open failed");
        };
        let result = service.proceed(wizard.id, None).await;
        assert!(matches!(result, Err(VenueError::LoginRequired)));
    }

    #[tokio::test]
    async fn submit_appends_confirmed_booking_and_emits_event() {
        let service = make_service();
        let mut rx = service.event_bus().subscribe();
        let id = wizard_at_payment(&service).await;
        let before = service.ledger().len().await;

        let Ok((wizard, booking)) = service
            .submit(id, &jane(), Some(PaymentMethod::EWallet))
            .await
        else {
            panic!("submit failed");
        };
        assert_eq!(wizard.step, WizardStep::Confirmed);
        assert_eq!(wizard.booking_id, Some(booking.id));
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.total_price, 400_000);
        assert_eq!(booking.players, 10);
        assert_eq!(service.ledger().len().await, before + 1);

        let Ok(event) = rx.recv().await else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "booking_created");

        let again = service
            .submit(id, &jane(), Some(PaymentMethod::EWallet))
            .await;
        assert!(matches!(again, Err(VenueError::InvalidStep { .. })));
    }

    #[tokio::test]
    async fn same_slot_can_be_booked_twice() {
        let service = make_service();
        let first = wizard_at_payment(&service).await;
        let second = wizard_at_payment(&service).await;
        for id in [first, second] {
            let result = service
                .submit(id, &jane(), Some(PaymentMethod::BankTransfer))
                .await;
            assert!(result.is_ok());
        }
    }

    #[tokio::test]
    async fn submit_without_method_books_nothing() {
        let service = make_service();
        let id = wizard_at_payment(&service).await;
        let before = service.ledger().len().await;

        let result = service.submit(id, &jane(), None).await;
        assert!(matches!(
            result,
            Err(VenueError::MissingField("payment_method"))
        ));
        assert_eq!(service.ledger().len().await, before);
        assert!(matches!(service.wizard(id).await, Ok(w) if w.step == WizardStep::Payment));
    }

    #[tokio::test]
    async fn another_account_cannot_finish_the_wizard() {
        let service = make_service();
        let id = wizard_at_payment(&service).await;
        let stranger = UserId::new("u1");

        let result = service
            .submit(id, &stranger, Some(PaymentMethod::BankTransfer))
            .await;
        assert!(matches!(result, Err(VenueError::Forbidden)));

        let _ = service.back(id).await;
        let result = service
            .submit_contact(id, &stranger, ContactInfo::default())
            .await;
        assert!(matches!(result, Err(VenueError::Forbidden)));
    }

    #[tokio::test]
    async fn inactive_field_cannot_be_booked() {
        let service = make_service();
        let id = FieldId::new("lapangan-c");
        let Ok(_) = service.catalog.toggle_active(&id).await else {
            panic!("toggle failed");
        };
        let result = service
            .open_wizard(&id, date(2025, 7, 1), 10, 11, 8)
            .await;
        assert!(matches!(result, Err(VenueError::FieldNotFound(_))));
    }

    #[tokio::test]
    async fn admin_overwrite_has_no_transition_guard() {
        let service = make_service();
        let rows = service
            .admin_bookings(
                &BookingQuery {
                    status: Some(BookingStatus::Cancelled),
                    ..BookingQuery::default()
                },
                date(2025, 6, 20),
            )
            .await;
        let Some(cancelled) = rows.first() else {
            panic!("seeded cancelled booking");
        };
        let Ok(updated) = service
            .set_status(cancelled.booking.id, BookingStatus::Completed)
            .await
        else {
            panic!("overwrite failed");
        };
        assert_eq!(updated.status, BookingStatus::Completed);
    }

    #[tokio::test]
    async fn joins_report_unknown_field() {
        let service = make_service();
        let rows = service
            .admin_bookings(&BookingQuery::default(), date(2025, 6, 20))
            .await;
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.field_display_name == UNKNOWN_FIELD));
        assert!(rows.iter().all(|r| r.user_name != UNKNOWN_USER));
    }

    #[tokio::test]
    async fn admin_search_and_window() {
        let service = make_service();
        let by_email = service
            .admin_bookings(
                &BookingQuery {
                    search: Some("JOHN.DOE".to_string()),
                    ..BookingQuery::default()
                },
                date(2025, 6, 20),
            )
            .await;
        assert_eq!(by_email.len(), 2);

        let this_week = service
            .admin_bookings(
                &BookingQuery {
                    window: Some(DateWindow::Week),
                    ..BookingQuery::default()
                },
                date(2025, 6, 22),
            )
            .await;
        // 22, 25, 28 June fall within 0..=7 days.
        assert_eq!(this_week.len(), 3);
    }

    #[tokio::test]
    async fn summary_counts_billable_spend() {
        let service = make_service();
        let summary = service.summary(&UserId::new("u1"), date(2025, 6, 26)).await;
        assert_eq!(summary.total, 2);
        assert_eq!(summary.confirmed, 2);
        assert_eq!(summary.total_spent, 400_000 + 460_000);
        assert_eq!(summary.upcoming.len(), 1);
    }

    #[tokio::test]
    async fn history_is_newest_first() {
        let service = make_service();
        let history = service.history(&UserId::new("u1"), None, None).await;
        assert_eq!(history.len(), 2);
        assert!(
            history
                .windows(2)
                .all(|w| matches!(w, [a, b] if a.created_at >= b.created_at))
        );
    }

    #[tokio::test]
    async fn self_cancel_window() {
        let service = make_service();
        let history = service
            .history(&UserId::new("u1"), Some(BookingStatus::Confirmed), None)
            .await;
        let Some(booking) = history.first() else {
            panic!("seeded confirmed booking");
        };
        let Some(start) = booking.starts_at() else {
            panic!("valid start");
        };

        let late = service
            .cancel_own(&UserId::new("u1"), booking.id, start - TimeDelta::hours(2))
            .await;
        assert!(matches!(late, Err(VenueError::CancellationClosed(_))));

        let stranger = service
            .cancel_own(&UserId::new("u2"), booking.id, start - TimeDelta::days(3))
            .await;
        assert!(matches!(stranger, Err(VenueError::NotBookingOwner(_))));

        let Ok(cancelled) = service
            .cancel_own(&UserId::new("u1"), booking.id, start - TimeDelta::days(3))
            .await
        else {
            panic!("cancel failed");
        };
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn overview_limits_recent_lists() {
        let service = make_service();
        let overview = service.overview().await;
        assert_eq!(overview.total_bookings, 5);
        assert_eq!(overview.total_revenue, 400_000 + 240_000 + 460_000);
        assert_eq!(overview.total_fields, 3);
        assert_eq!(overview.total_users, 5);
        assert_eq!(overview.recent_bookings.len(), 5);
        assert_eq!(overview.recent_users.len(), 5);
        assert_eq!(
            overview.recent_users.first().map(|u| u.id.as_str()),
            Some("u4")
        );
    }
}
