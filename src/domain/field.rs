//! Rentable futsal courts and the venue profile.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::FieldId;
use super::availability::FieldAvailability;
use super::pricing::PricingMatrix;

/// Indoor or outdoor court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Covered court.
    Indoor,
    /// Open-air court.
    Outdoor,
}

/// Physical characteristics of a court.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Specifications {
    /// Length in metres.
    pub length: u32,
    /// Width in metres.
    pub width: u32,
    /// Playing surface description.
    pub surface: String,
    /// Lighting description.
    pub lighting: String,
    /// Spectator capacity.
    pub capacity: u32,
}

/// A single rentable court.
#[derive(Debug, Clone)]
pub struct Field {
    /// Slug identifier.
    pub id: FieldId,
    /// Display name.
    pub name: String,
    /// Indoor/outdoor.
    pub field_type: FieldType,
    /// Human-readable size label (e.g. `"Standar FIFA (40m x 20m)"`).
    pub size: String,
    /// Marketing description.
    pub description: String,
    /// Gallery image URLs.
    pub images: Vec<String>,
    /// Physical characteristics.
    pub specifications: Specifications,
    /// Facility/feature tags matched by the facility filter.
    pub features: Vec<String>,
    /// Average review rating (0.0–5.0).
    pub rating: f32,
    /// List price shown on cards, in IDR.
    pub price_per_hour: u64,
    /// Hidden from the public listing when `false`.
    pub is_active: bool,
    /// Four-tier hourly pricing.
    pub pricing: PricingMatrix,
    /// Simulated slot availability.
    pub availability: FieldAvailability,
}

impl Field {
    /// Returns `true` if every tag in `required` is among the features.
    #[must_use]
    pub fn has_all_features(&self, required: &[String]) -> bool {
        required.iter().all(|tag| self.features.contains(tag))
    }

    /// Case-insensitive substring match on name and description.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term)
    }
}

/// Public profile of the futsal center that hosts the fields.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Venue {
    /// Venue slug.
    pub id: String,
    /// Venue name.
    pub name: String,
    /// City/region.
    pub location: String,
    /// Street address.
    pub address: String,
    /// Marketing description.
    pub description: String,
    /// Average rating across all reviews.
    pub rating: f32,
    /// Number of reviews.
    pub total_reviews: u32,
    /// Shared facilities (parking, prayer room, ...).
    pub facilities: Vec<String>,
    /// Opening hours label.
    pub operating_hours: String,
    /// Contact channels.
    pub contact: VenueContact,
}

/// Contact channels of the venue.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VenueContact {
    /// Landline.
    pub phone: String,
    /// E-mail address.
    pub email: String,
    /// WhatsApp number.
    pub whatsapp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::BandRates;

    fn field(features: &[&str]) -> Field {
        let rates = BandRates {
            morning: 100_000,
            night: 150_000,
        };
        Field {
            id: FieldId::new("lapangan-x"),
            name: "Lapangan X (Outdoor)".to_string(),
            field_type: FieldType::Outdoor,
            size: "Standar".to_string(),
            description: "Lapangan terbuka".to_string(),
            images: vec![],
            specifications: Specifications {
                length: 40,
                width: 20,
                surface: "Sintetis".to_string(),
                lighting: "LED".to_string(),
                capacity: 40,
            },
            features: features.iter().map(|f| (*f).to_string()).collect(),
            rating: 4.5,
            price_per_hour: 120_000,
            is_active: true,
            pricing: PricingMatrix {
                weekday: rates,
                weekend: rates,
            },
            availability: FieldAvailability::new(),
        }
    }

    #[test]
    fn feature_match_is_conjunctive() {
        let f = field(&["Night Light", "Open Air"]);
        assert!(f.has_all_features(&[]));
        assert!(f.has_all_features(&["Open Air".to_string()]));
        assert!(f.has_all_features(&["Open Air".to_string(), "Night Light".to_string()]));
        assert!(!f.has_all_features(&["Open Air".to_string(), "AC".to_string()]));
    }

    #[test]
    fn search_ignores_case() {
        let f = field(&[]);
        assert!(f.matches_search("outdoor"));
        assert!(f.matches_search("TERBUKA"));
        assert!(!f.matches_search("indoor"));
    }
}
