//! Field listing, slot, calendar, and quote DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::split_csv;
use crate::domain::FieldId;
use crate::domain::availability::HourSlot;
use crate::domain::field::{Field, FieldType, Specifications};
use crate::domain::filter::{DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE, FieldFilter, SortKey};
use crate::domain::pricing::{DayKind, HourBand, PricingMatrix, Quote, TimeRange, format_rupiah};
use crate::domain::review::Review;
use crate::service::catalog_service::CalendarDay;

/// Query for `GET /fields`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FieldQuery {
    /// Lower bound of the price band (IDR). Defaults to 50000.
    pub min_price: Option<u64>,
    /// Upper bound of the price band (IDR). Defaults to 300000.
    pub max_price: Option<u64>,
    /// Comma-separated feature tags, all required.
    pub facilities: Option<String>,
    /// Minimum rating.
    pub min_rating: Option<f32>,
    /// `price-asc`, `price-desc`, or `rating-desc` (default).
    pub sort: Option<SortKey>,
}

impl FieldQuery {
    /// Builds the domain filter, filling defaults.
    #[must_use]
    pub fn to_filter(&self) -> FieldFilter {
        FieldFilter {
            price_range: (
                self.min_price.unwrap_or(DEFAULT_MIN_PRICE),
                self.max_price.unwrap_or(DEFAULT_MAX_PRICE),
            ),
            facilities: split_csv(self.facilities.as_deref()),
            min_rating: self.min_rating.unwrap_or(0.0),
            sort_by: self.sort.unwrap_or_default(),
        }
    }
}

/// Lowest and highest of a field's four rates.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct PriceBand {
    /// Cheapest tier.
    pub min: u64,
    /// Most expensive tier.
    pub max: u64,
}

/// Public view of a field.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldDto {
    /// Field slug.
    pub id: FieldId,
    /// Display name.
    pub name: String,
    /// Indoor or outdoor.
    pub field_type: FieldType,
    /// Size label.
    pub size: String,
    /// Marketing description.
    pub description: String,
    /// Image URLs.
    pub images: Vec<String>,
    /// Physical specifications.
    pub specifications: Specifications,
    /// Feature tags.
    pub features: Vec<String>,
    /// Rating, 0.0 to 5.0.
    pub rating: f32,
    /// List price shown on cards.
    pub price_per_hour: u64,
    /// Whether the field takes bookings.
    pub is_active: bool,
    /// Four-tier rate matrix.
    pub pricing: PricingMatrix,
    /// Min and max of `pricing`.
    pub price_band: PriceBand,
}

impl From<Field> for FieldDto {
    fn from(field: Field) -> Self {
        let price_band = PriceBand {
            min: field.pricing.min_rate(),
            max: field.pricing.max_rate(),
        };
        Self {
            id: field.id,
            name: field.name,
            field_type: field.field_type,
            size: field.size,
            description: field.description,
            images: field.images,
            specifications: field.specifications,
            features: field.features,
            rating: field.rating,
            price_per_hour: field.price_per_hour,
            is_active: field.is_active,
            pricing: field.pricing,
            price_band,
        }
    }
}

/// Response for `GET /fields`.
#[derive(Debug, Serialize, ToSchema)]
pub struct FieldListResponse {
    /// Matching fields in sort order.
    pub data: Vec<FieldDto>,
    /// Number of matches.
    pub total: usize,
}

/// Response for `GET /fields/{id}/reviews`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewListResponse {
    /// Reviews, newest first.
    pub data: Vec<Review>,
    /// Number of reviews.
    pub total: usize,
}

/// Query for `GET /fields/{id}/availability`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    /// Calendar date (`YYYY-MM-DD`).
    pub date: NaiveDate,
}

/// Response for `GET /fields/{id}/availability`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    /// Field slug.
    pub field_id: FieldId,
    /// Requested date.
    pub date: NaiveDate,
    /// Weekday or weekend pricing.
    pub day_kind: DayKind,
    /// Eighteen hourly slots, 06:00 to 23:00.
    pub slots: Vec<HourSlot>,
}

/// Query for `GET /fields/{id}/calendar`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CalendarQuery {
    /// Days from today (default from configuration, max 60).
    pub days: Option<u64>,
}

/// Response for `GET /fields/{id}/calendar`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CalendarResponse {
    /// Field slug.
    pub field_id: FieldId,
    /// Upcoming dates.
    pub days: Vec<CalendarDay>,
}

/// Query for `GET /fields/{id}/quote`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuoteQuery {
    /// Play date (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// First hour, inclusive.
    pub start_hour: u8,
    /// Last hour, exclusive.
    pub end_hour: u8,
}

/// Response for `GET /fields/{id}/quote`.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteResponse {
    /// Field slug.
    pub field_id: FieldId,
    /// Field name.
    pub field_name: String,
    /// Play date.
    pub date: NaiveDate,
    /// Hours, e.g. `19:00 - 21:00`.
    pub time_slot: String,
    /// Day tier applied.
    pub day_kind: DayKind,
    /// Hour band of the start hour.
    pub hour_band: HourBand,
    /// Rate at the start hour.
    pub price_per_hour: u64,
    /// Hours booked.
    pub duration: u8,
    /// `price_per_hour × duration`.
    pub total_price: u64,
    /// Total in display form, e.g. `Rp 400.000`.
    pub total_formatted: String,
}

impl QuoteResponse {
    /// Assembles the response from a priced selection.
    #[must_use]
    pub fn new(field: &Field, date: NaiveDate, range: TimeRange, quote: Quote) -> Self {
        Self {
            field_id: field.id.clone(),
            field_name: field.name.clone(),
            date,
            time_slot: range.label(),
            day_kind: DayKind::of(date),
            hour_band: HourBand::of(range.start_hour),
            price_per_hour: quote.price_per_hour,
            duration: quote.duration,
            total_price: quote.total_price,
            total_formatted: format_rupiah(quote.total_price),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_uses_filter_defaults() {
        assert_eq!(FieldQuery::default().to_filter(), FieldFilter::default());
    }

    #[test]
    fn facilities_are_split() {
        let query = FieldQuery {
            facilities: Some("Sound System,Tribun VIP".to_string()),
            sort: Some(SortKey::PriceDesc),
            ..FieldQuery::default()
        };
        let filter = query.to_filter();
        assert_eq!(filter.facilities.len(), 2);
        assert_eq!(filter.sort_by, SortKey::PriceDesc);
    }
}
