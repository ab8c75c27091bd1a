//! Catalog service: public listing, slot lookup, quotes, and admin field
//! management.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::availability::{self, HourSlot, OPENING_HOUR};
use crate::domain::field::{Field, Venue};
use crate::domain::filter::FieldFilter;
use crate::domain::pricing::{self, Quote, TimeRange};
use crate::domain::review::{self, Review};
use crate::domain::{EventBus, FieldCatalog, FieldId, VenueEvent};
use crate::error::VenueError;

/// Upper bound for the calendar window.
const MAX_CALENDAR_DAYS: u64 = 60;

/// Aggregates for the admin field table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct FieldStats {
    /// Fields in the catalog.
    pub total: usize,
    /// Fields open for booking.
    pub active: usize,
    /// Mean rating over all fields, `0.0` when empty.
    pub average_rating: f32,
    /// Mean list price over all fields, `0` when empty.
    pub average_price: u64,
}

/// One date offered by the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CalendarDay {
    /// Calendar date.
    pub date: NaiveDate,
    /// Saturday or Sunday.
    pub is_weekend: bool,
    /// Open hourly slots on that date.
    pub open_slots: usize,
}

/// Read and admin operations over the [`FieldCatalog`].
#[derive(Debug, Clone)]
pub struct CatalogService {
    catalog: Arc<FieldCatalog>,
    venue: Arc<Venue>,
    reviews: Arc<Vec<Review>>,
    event_bus: EventBus,
    calendar_days: u64,
}

impl CatalogService {
    /// Creates a new `CatalogService`.
    #[must_use]
    pub fn new(
        catalog: Arc<FieldCatalog>,
        venue: Venue,
        reviews: Vec<Review>,
        event_bus: EventBus,
        calendar_days: u64,
    ) -> Self {
        Self {
            catalog,
            venue: Arc::new(venue),
            reviews: Arc::new(reviews),
            event_bus,
            calendar_days,
        }
    }

    /// Returns the underlying catalog.
    #[must_use]
    pub fn catalog(&self) -> &Arc<FieldCatalog> {
        &self.catalog
    }

    /// The venue profile.
    #[must_use]
    pub fn venue(&self) -> &Venue {
        &self.venue
    }

    /// Active fields passing `filter`, in filter sort order.
    pub async fn list_fields(&self, filter: &FieldFilter) -> Vec<Field> {
        let fields = self.catalog.all().await;
        filter
            .apply(fields.iter().filter(|f| f.is_active))
            .into_iter()
            .cloned()
            .collect()
    }

    /// One field by id, active or not.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::FieldNotFound`] for unknown ids.
    pub async fn get_field(&self, id: &FieldId) -> Result<Field, VenueError> {
        self.catalog.get(id).await
    }

    /// Customer reviews for a field, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::FieldNotFound`] for unknown ids.
    pub async fn reviews(&self, id: &FieldId) -> Result<Vec<Review>, VenueError> {
        self.catalog.get(id).await?;
        Ok(review::for_field(&self.reviews, id))
    }

    /// Hourly slots with their prices for one date.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::FieldNotFound`] for unknown ids.
    pub async fn availability(
        &self,
        id: &FieldId,
        date: NaiveDate,
    ) -> Result<Vec<HourSlot>, VenueError> {
        let field = self.catalog.get(id).await?;
        Ok(availability::hours_for(&field.availability, &field.pricing, date))
    }

    /// Dates offered by the picker, starting today.
    ///
    /// `days` defaults to the configured window and is capped at 60.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::FieldNotFound`] for unknown ids.
    pub async fn calendar(
        &self,
        id: &FieldId,
        today: NaiveDate,
        days: Option<u64>,
    ) -> Result<Vec<CalendarDay>, VenueError> {
        let field = self.catalog.get(id).await?;
        let days = days.unwrap_or(self.calendar_days).min(MAX_CALENDAR_DAYS);
        Ok(availability::upcoming_dates(today, days)
            .into_iter()
            .map(|date| CalendarDay {
                date,
                is_weekend: pricing::is_weekend(date),
                open_slots: field.availability.day(date).open_count(),
            })
            .collect())
    }

    /// Price quote for a field, date, and hour range.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::FieldNotFound`] for unknown ids, or
    /// [`VenueError::InvalidTimeRange`] when the range is empty, past
    /// midnight, or before opening.
    pub async fn quote(
        &self,
        id: &FieldId,
        date: NaiveDate,
        start_hour: u8,
        end_hour: u8,
    ) -> Result<(Field, TimeRange, Quote), VenueError> {
        let range = opening_range(start_hour, end_hour)?;
        let field = self.catalog.get(id).await?;
        let quote = pricing::quote(&field.pricing, date, range);
        Ok((field, range, quote))
    }

    /// Admin field list: optional search on name/description and an
    /// optional active flag.
    pub async fn admin_fields(&self, search: Option<&str>, active: Option<bool>) -> Vec<Field> {
        self.catalog
            .all()
            .await
            .into_iter()
            .filter(|f| search.is_none_or(|term| f.matches_search(term)))
            .filter(|f| active.is_none_or(|flag| f.is_active == flag))
            .collect()
    }

    /// Aggregates over the whole catalog.
    pub async fn field_stats(&self) -> FieldStats {
        let fields = self.catalog.all().await;
        let total = fields.len();
        let active = fields.iter().filter(|f| f.is_active).count();
        if total == 0 {
            return FieldStats {
                total,
                active,
                average_rating: 0.0,
                average_price: 0,
            };
        }
        let rating_sum: f32 = fields.iter().map(|f| f.rating).sum();
        let price_sum: u64 = fields.iter().map(|f| f.price_per_hour).sum();
        #[allow(clippy::cast_precision_loss)]
        let average_rating = rating_sum / total as f32;
        FieldStats {
            total,
            active,
            average_rating,
            average_price: price_sum / total as u64,
        }
    }

    /// Flips a field's active flag and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::FieldNotFound`] for unknown ids.
    pub async fn toggle_field(&self, id: &FieldId) -> Result<bool, VenueError> {
        let is_active = self.catalog.toggle_active(id).await?;
        let _ = self.event_bus.publish(VenueEvent::FieldToggled {
            field_id: id.clone(),
            is_active,
            timestamp: Utc::now(),
        });
        tracing::info!(field_id = %id, is_active, "field toggled");
        Ok(is_active)
    }

    /// Deletes a field. Existing bookings keep their dangling id.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::FieldNotFound`] for unknown ids.
    pub async fn delete_field(&self, id: &FieldId) -> Result<Field, VenueError> {
        let field = self.catalog.remove(id).await?;
        let _ = self.event_bus.publish(VenueEvent::FieldRemoved {
            field_id: id.clone(),
            timestamp: Utc::now(),
        });
        tracing::info!(field_id = %id, "field deleted");
        Ok(field)
    }
}

/// Validates an hour range that must also start at or after opening.
///
/// # Errors
///
/// Returns [`VenueError::InvalidTimeRange`] on an invalid range.
pub fn opening_range(start_hour: u8, end_hour: u8) -> Result<TimeRange, VenueError> {
    if start_hour < OPENING_HOUR {
        return Err(VenueError::InvalidTimeRange {
            start_hour,
            end_hour,
        });
    }
    TimeRange::new(start_hour, end_hour)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::filter::SortKey;
    use crate::domain::seed;

    fn make_service() -> CatalogService {
        CatalogService::new(
            Arc::new(FieldCatalog::new(seed::fields())),
            seed::venue(),
            seed::reviews(),
            EventBus::new(16),
            14,
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        let Some(date) = NaiveDate::from_ymd_opt(y, m, d) else {
            panic!("valid date");
        };
        date
    }

    #[tokio::test]
    async fn listing_hides_inactive_fields() {
        let service = make_service();
        let id = FieldId::new("lapangan-a");
        let Ok(false) = service.toggle_field(&id).await else {
            panic!("toggle should deactivate");
        };

        let listed = service.list_fields(&FieldFilter::default()).await;
        assert!(listed.iter().all(|f| f.id != id));
        assert!(service.get_field(&id).await.is_ok());
    }

    #[tokio::test]
    async fn listing_sorts_by_rating_by_default() {
        let service = make_service();
        let listed = service.list_fields(&FieldFilter::default()).await;
        let ratings: Vec<f32> = listed.iter().map(|f| f.rating).collect();
        assert!(ratings.windows(2).all(|w| matches!(w, [a, b] if a >= b)));

        let by_price = service
            .list_fields(&FieldFilter {
                sort_by: SortKey::PriceAsc,
                ..FieldFilter::default()
            })
            .await;
        assert_eq!(by_price.first().map(|f| f.id.as_str()), Some("lapangan-c"));
    }

    #[tokio::test]
    async fn quote_saturday_night_on_field_b() {
        let service = make_service();
        let Ok((_, range, quote)) = service
            .quote(&FieldId::new("lapangan-b"), date(2025, 6, 28), 19, 21)
            .await
        else {
            panic!("quote failed");
        };
        assert_eq!(range.duration(), 2);
        assert_eq!(quote.price_per_hour, 200_000);
        assert_eq!(quote.total_price, 400_000);
    }

    #[tokio::test]
    async fn quote_rejects_hours_before_opening() {
        let service = make_service();
        let result = service
            .quote(&FieldId::new("lapangan-b"), date(2025, 6, 28), 5, 7)
            .await;
        assert!(matches!(result, Err(VenueError::InvalidTimeRange { .. })));
    }

    #[tokio::test]
    async fn availability_has_eighteen_slots() {
        let service = make_service();
        let Ok(slots) = service
            .availability(&FieldId::new("lapangan-c"), date(2025, 6, 23))
            .await
        else {
            panic!("availability failed");
        };
        assert_eq!(slots.len(), 18);
        assert!(slots.iter().all(|s| s.available));
        assert_eq!(slots.first().map(|s| s.price), Some(100_000));
        assert_eq!(slots.last().map(|s| s.price), Some(140_000));
    }

    #[tokio::test]
    async fn calendar_caps_window() {
        let service = make_service();
        let id = FieldId::new("lapangan-a");
        let today = date(2025, 6, 1);
        let Ok(default_window) = service.calendar(&id, today, None).await else {
            panic!("calendar failed");
        };
        assert_eq!(default_window.len(), 14);
        assert_eq!(default_window.first().map(|d| d.date), Some(today));
        assert!(default_window.iter().all(|d| d.open_slots == 18));

        let Ok(capped) = service.calendar(&id, today, Some(500)).await else {
            panic!("calendar failed");
        };
        assert_eq!(capped.len(), 60);
    }

    #[tokio::test]
    async fn delete_emits_event_and_updates_stats() {
        let service = make_service();
        let mut rx = service.event_bus.subscribe();
        let Ok(removed) = service.delete_field(&FieldId::new("lapangan-c")).await else {
            panic!("delete failed");
        };
        assert_eq!(removed.price_per_hour, 120_000);

        let Ok(event) = rx.recv().await else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "field_removed");

        let stats = service.field_stats().await;
        assert_eq!(stats.total, 2);
        assert_eq!(stats.average_price, 175_000);
        assert!((stats.average_rating - 4.8).abs() < 1e-4);
    }

    #[tokio::test]
    async fn reviews_for_known_and_unknown_fields() {
        let service = make_service();
        let Ok(reviews) = service.reviews(&FieldId::new("lapangan-b")).await else {
            panic!("reviews failed");
        };
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews.first().map(|r| r.rating), Some(5));

        let missing = service.reviews(&FieldId::new("lapangan-z")).await;
        assert!(matches!(missing, Err(VenueError::FieldNotFound(_))));
    }

    #[tokio::test]
    async fn admin_fields_filters_by_search_and_status() {
        let service = make_service();
        let outdoor = service.admin_fields(Some("outdoor"), None).await;
        assert_eq!(outdoor.len(), 1);

        let inactive = service.admin_fields(None, Some(false)).await;
        assert!(inactive.is_empty());
    }
}
