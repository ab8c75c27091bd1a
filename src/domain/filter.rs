//! Listing filter and sort.
//!
//! A field passes when its price band intersects the requested range, it
//! carries every requested facility, and its rating meets the minimum.
//! Sorting is stable, so ties keep catalog order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::field::Field;

/// Default lower bound of the price range filter, in IDR.
pub const DEFAULT_MIN_PRICE: u64 = 50_000;
/// Default upper bound of the price range filter, in IDR.
pub const DEFAULT_MAX_PRICE: u64 = 300_000;

/// Listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum SortKey {
    /// Cheapest minimum rate first.
    #[serde(rename = "price-asc")]
    PriceAsc,
    /// Most expensive maximum rate first.
    #[serde(rename = "price-desc")]
    PriceDesc,
    /// Highest rating first.
    #[default]
    #[serde(rename = "rating-desc")]
    RatingDesc,
}

/// Filter criteria for the public listing.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    /// Inclusive `(low, high)` price range in IDR.
    pub price_range: (u64, u64),
    /// Facility tags that must all be present.
    pub facilities: Vec<String>,
    /// Minimum rating.
    pub min_rating: f32,
    /// Result order.
    pub sort_by: SortKey,
}

impl Default for FieldFilter {
    fn default() -> Self {
        Self {
            price_range: (DEFAULT_MIN_PRICE, DEFAULT_MAX_PRICE),
            facilities: Vec::new(),
            min_rating: 0.0,
            sort_by: SortKey::default(),
        }
    }
}

impl FieldFilter {
    /// Whether `field` satisfies the price, facility, and rating criteria.
    #[must_use]
    pub fn matches(&self, field: &Field) -> bool {
        let (low, high) = self.price_range;
        if field.pricing.min_rate() > high || field.pricing.max_rate() < low {
            return false;
        }
        if !field.has_all_features(&self.facilities) {
            return false;
        }
        field.rating >= self.min_rating
    }

    /// Filters and sorts `fields`, preserving input order among ties.
    #[must_use]
    pub fn apply<'a>(&self, fields: impl IntoIterator<Item = &'a Field>) -> Vec<&'a Field> {
        let mut filtered: Vec<&Field> = fields.into_iter().filter(|f| self.matches(f)).collect();
        filtered.sort_by(|a, b| compare(self.sort_by, a, b));
        filtered
    }
}

fn compare(key: SortKey, a: &Field, b: &Field) -> Ordering {
    match key {
        SortKey::PriceAsc => a.pricing.min_rate().cmp(&b.pricing.min_rate()),
        SortKey::PriceDesc => b.pricing.max_rate().cmp(&a.pricing.max_rate()),
        SortKey::RatingDesc => b.rating.total_cmp(&a.rating),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldId;
    use crate::domain::availability::FieldAvailability;
    use crate::domain::field::{FieldType, Specifications};
    use crate::domain::pricing::{BandRates, PricingMatrix};

    fn field(id: &str, low: u64, high: u64, rating: f32, features: &[&str]) -> Field {
        Field {
            id: FieldId::new(id),
            name: id.to_string(),
            field_type: FieldType::Indoor,
            size: String::new(),
            description: String::new(),
            images: vec![],
            specifications: Specifications {
                length: 40,
                width: 20,
                surface: String::new(),
                lighting: String::new(),
                capacity: 10,
            },
            features: features.iter().map(|f| (*f).to_string()).collect(),
            rating,
            price_per_hour: low,
            is_active: true,
            pricing: PricingMatrix {
                weekday: BandRates {
                    morning: low,
                    night: high,
                },
                weekend: BandRates {
                    morning: high,
                    night: high,
                },
            },
            availability: FieldAvailability::new(),
        }
    }

    fn ids(fields: &[&Field]) -> Vec<String> {
        fields.iter().map(|f| f.id.to_string()).collect()
    }

    #[test]
    fn price_band_must_intersect_range() {
        let cheap = field("cheap", 20_000, 40_000, 4.0, &[]);
        let mid = field("mid", 40_000, 60_000, 4.0, &[]);
        let pricey = field("pricey", 310_000, 400_000, 4.0, &[]);
        let all = [cheap, mid, pricey];
        let result = FieldFilter::default().apply(&all);
        assert_eq!(ids(&result), vec!["mid"]);
    }

    #[test]
    fn facilities_use_and_semantics() {
        let a = field("a", 100_000, 150_000, 4.0, &["AC", "Sound System"]);
        let b = field("b", 100_000, 150_000, 4.0, &["AC"]);
        let all = [a, b];
        let filter = FieldFilter {
            facilities: vec!["AC".to_string(), "Sound System".to_string()],
            ..FieldFilter::default()
        };
        assert_eq!(ids(&filter.apply(&all)), vec!["a"]);
    }

    #[test]
    fn min_rating_is_inclusive() {
        let a = field("a", 100_000, 150_000, 4.5, &[]);
        let b = field("b", 100_000, 150_000, 4.4, &[]);
        let all = [a, b];
        let filter = FieldFilter {
            min_rating: 4.5,
            ..FieldFilter::default()
        };
        assert_eq!(ids(&filter.apply(&all)), vec!["a"]);
    }

    #[test]
    fn rating_desc_is_stable_and_non_increasing() {
        let all = [
            field("first", 100_000, 150_000, 4.5, &[]),
            field("top", 100_000, 150_000, 4.9, &[]),
            field("second", 100_000, 150_000, 4.5, &[]),
            field("low", 100_000, 150_000, 3.0, &[]),
        ];
        let result = FieldFilter::default().apply(&all);
        assert_eq!(ids(&result), vec!["top", "first", "second", "low"]);
        assert!(result.windows(2).all(|w| match w {
            [x, y] => x.rating >= y.rating,
            _ => true,
        }));
    }

    #[test]
    fn price_sorts_use_band_edges() {
        let all = [
            field("a", 120_000, 200_000, 4.0, &[]),
            field("b", 100_000, 280_000, 4.0, &[]),
            field("c", 130_000, 160_000, 4.0, &[]),
        ];
        let asc = FieldFilter {
            sort_by: SortKey::PriceAsc,
            ..FieldFilter::default()
        };
        assert_eq!(ids(&asc.apply(&all)), vec!["b", "a", "c"]);

        let desc = FieldFilter {
            sort_by: SortKey::PriceDesc,
            ..FieldFilter::default()
        };
        assert_eq!(ids(&desc.apply(&all)), vec!["b", "a", "c"]);
    }

    #[test]
    fn sort_key_parses_kebab_names() {
        let parsed: Result<SortKey, _> = serde_json::from_str("\"price-desc\"");
        assert_eq!(parsed.ok(), Some(SortKey::PriceDesc));
    }
}
