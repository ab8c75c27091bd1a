//! Simulated hourly availability.
//!
//! Each field keeps a sparse map from calendar date to 18 hourly flags
//! covering 06:00–23:00. A date absent from the map is fully open. The map
//! is random mock data generated at startup; bookings never write to it.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::pricing::PricingMatrix;

/// Hour of the first bookable slot.
pub const OPENING_HOUR: u8 = 6;

/// Number of hourly slots per day (06:00 through 23:00).
pub const SLOTS_PER_DAY: usize = 18;

/// Dates closer than this many days get the busier availability ratio.
const NEAR_TERM_DAYS: u64 = 7;
const NEAR_TERM_OPEN_PROBABILITY: f64 = 0.7;
const FAR_TERM_OPEN_PROBABILITY: f64 = 0.9;

/// Open/closed flags for one day, index 0 being 06:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayAvailability([bool; SLOTS_PER_DAY]);

impl DayAvailability {
    /// Every slot open.
    #[must_use]
    pub const fn all_open() -> Self {
        Self([true; SLOTS_PER_DAY])
    }

    /// Builds from exactly 18 flags.
    #[must_use]
    pub const fn from_slots(slots: [bool; SLOTS_PER_DAY]) -> Self {
        Self(slots)
    }

    /// Whether the slot starting at `hour` is open. Hours outside
    /// 06–23 are never open.
    #[must_use]
    pub fn is_open(&self, hour: u8) -> bool {
        hour.checked_sub(OPENING_HOUR)
            .and_then(|idx| self.0.get(usize::from(idx)))
            .copied()
            .unwrap_or(false)
    }

    /// Number of open slots.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.0.iter().filter(|open| **open).count()
    }

    /// Raw flags.
    #[must_use]
    pub const fn slots(&self) -> &[bool; SLOTS_PER_DAY] {
        &self.0
    }
}

impl Default for DayAvailability {
    fn default() -> Self {
        Self::all_open()
    }
}

/// Sparse per-date availability of a single field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldAvailability(BTreeMap<NaiveDate, DayAvailability>);

impl FieldAvailability {
    /// An empty map: every date fully open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flags for `date`, defaulting to all open.
    #[must_use]
    pub fn day(&self, date: NaiveDate) -> DayAvailability {
        self.0.get(&date).copied().unwrap_or_default()
    }

    /// Overrides the flags for `date`.
    pub fn set_day(&mut self, date: NaiveDate, day: DayAvailability) {
        self.0.insert(date, day);
    }

    /// Number of dates with explicit flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no date has explicit flags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One bookable hour as shown in the slot picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct HourSlot {
    /// Start hour (6–23).
    pub hour: u8,
    /// Whether the slot can be picked.
    pub available: bool,
    /// Tier rate for this hour on the requested date.
    pub price: u64,
}

/// Lists the 18 hourly slots of `date` with their open flag and price.
#[must_use]
pub fn hours_for(
    availability: &FieldAvailability,
    pricing: &PricingMatrix,
    date: NaiveDate,
) -> Vec<HourSlot> {
    let day = availability.day(date);
    (0..SLOTS_PER_DAY as u8)
        .map(|offset| {
            let hour = OPENING_HOUR + offset;
            HourSlot {
                hour,
                available: day.is_open(hour),
                price: pricing.rate_for(date, hour),
            }
        })
        .collect()
}

/// Generates random availability for `horizon_days` days starting at
/// `today`. Slots in the first week are open with probability 0.7, later
/// ones with 0.9.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    today: NaiveDate,
    horizon_days: u64,
) -> FieldAvailability {
    let mut availability = FieldAvailability::new();
    for offset in 0..horizon_days {
        let Some(date) = today.checked_add_days(Days::new(offset)) else {
            break;
        };
        let p = if offset < NEAR_TERM_DAYS {
            NEAR_TERM_OPEN_PROBABILITY
        } else {
            FAR_TERM_OPEN_PROBABILITY
        };
        let mut slots = [true; SLOTS_PER_DAY];
        for slot in &mut slots {
            *slot = rng.gen_bool(p);
        }
        availability.set_day(date, DayAvailability::from_slots(slots));
    }
    availability
}

/// The next `days` calendar dates starting at `today`, for the date picker.
#[must_use]
pub fn upcoming_dates(today: NaiveDate, days: u64) -> Vec<NaiveDate> {
    (0..days)
        .map_while(|offset| today.checked_add_days(Days::new(offset)))
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::pricing::BandRates;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn today() -> NaiveDate {
        let Some(d) = NaiveDate::from_ymd_opt(2025, 6, 23) else {
            panic!("valid date");
        };
        d
    }

    fn pricing() -> PricingMatrix {
        PricingMatrix {
            weekday: BandRates {
                morning: 100_000,
                night: 140_000,
            },
            weekend: BandRates {
                morning: 140_000,
                night: 160_000,
            },
        }
    }

    #[test]
    fn missing_date_is_fully_open() {
        let availability = FieldAvailability::new();
        let slots = hours_for(&availability, &pricing(), today());
        assert_eq!(slots.len(), SLOTS_PER_DAY);
        assert!(slots.iter().all(|s| s.available));
        assert_eq!(slots.first().map(|s| s.hour), Some(6));
        assert_eq!(slots.last().map(|s| s.hour), Some(23));
    }

    #[test]
    fn slot_prices_follow_tiers() {
        let slots = hours_for(&FieldAvailability::new(), &pricing(), today());
        let Some(morning) = slots.iter().find(|s| s.hour == 17) else {
            panic!("17:00 slot missing");
        };
        let Some(night) = slots.iter().find(|s| s.hour == 18) else {
            panic!("18:00 slot missing");
        };
        assert_eq!(morning.price, 100_000);
        assert_eq!(night.price, 140_000);
    }

    #[test]
    fn explicit_closed_slot_is_reported() {
        let mut flags = [true; SLOTS_PER_DAY];
        if let Some(slot) = flags.get_mut(13) {
            *slot = false;
        }
        let mut availability = FieldAvailability::new();
        availability.set_day(today(), DayAvailability::from_slots(flags));

        let slots = hours_for(&availability, &pricing(), today());
        let closed: Vec<u8> = slots.iter().filter(|s| !s.available).map(|s| s.hour).collect();
        assert_eq!(closed, vec![19]);
    }

    #[test]
    fn hours_outside_opening_window_are_closed() {
        let day = DayAvailability::all_open();
        assert!(!day.is_open(5));
        assert!(day.is_open(6));
        assert!(day.is_open(23));
        assert!(!day.is_open(24));
    }

    #[test]
    fn generate_covers_horizon() {
        let mut rng = StdRng::seed_from_u64(7);
        let availability = generate(&mut rng, today(), 30);
        assert_eq!(availability.len(), 30);
        let Some(beyond) = today().checked_add_days(Days::new(30)) else {
            panic!("date overflow");
        };
        assert_eq!(availability.day(beyond), DayAvailability::all_open());
    }

    #[test]
    fn near_term_is_busier_than_far_term() {
        let mut rng = StdRng::seed_from_u64(42);
        let availability = generate(&mut rng, today(), 400);
        let ratio = |from: u64, to: u64| {
            let mut open = 0usize;
            let mut total = 0usize;
            for offset in from..to {
                if let Some(d) = today().checked_add_days(Days::new(offset)) {
                    open += availability.day(d).open_count();
                    total += SLOTS_PER_DAY;
                }
            }
            open as f64 / total as f64
        };
        let near = ratio(0, 7);
        let far = ratio(7, 400);
        assert!((0.5..0.9).contains(&near), "near ratio {near}");
        assert!((0.85..0.95).contains(&far), "far ratio {far}");
    }

    #[test]
    fn upcoming_dates_are_consecutive() {
        let dates = upcoming_dates(today(), 14);
        assert_eq!(dates.len(), 14);
        assert_eq!(dates.first(), Some(&today()));
        for pair in dates.windows(2) {
            if let [a, b] = pair {
                assert_eq!(b.signed_duration_since(*a).num_days(), 1);
            }
        }
    }
}
