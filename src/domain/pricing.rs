//! Tiered hourly pricing.
//!
//! Every field carries a [`PricingMatrix`] of four rates keyed by
//! [`DayKind`] × [`HourBand`]. Saturday and Sunday are weekend days; any
//! hour from 18:00 onwards is night. There is no holiday calendar and no
//! timezone handling: the calendar date is taken as given.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::VenueError;

/// First hour billed at the night rate.
pub const NIGHT_START_HOUR: u8 = 18;

/// Calendar-day tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    /// Monday through Friday.
    Weekday,
    /// Saturday or Sunday.
    Weekend,
}

/// Hour-of-day tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HourBand {
    /// 06:00 to 18:00.
    Morning,
    /// 18:00 to 24:00.
    Night,
}

/// Morning/night rates for one day kind, in IDR per hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BandRates {
    /// Rate before 18:00.
    pub morning: u64,
    /// Rate from 18:00.
    pub night: u64,
}

/// Four-tier price matrix of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PricingMatrix {
    /// Monday–Friday rates.
    pub weekday: BandRates,
    /// Saturday/Sunday rates.
    pub weekend: BandRates,
}

impl PricingMatrix {
    /// Builds a matrix, rejecting zero rates.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::InvalidRequest`] if any rate is zero.
    pub fn new(weekday: BandRates, weekend: BandRates) -> Result<Self, VenueError> {
        let matrix = Self { weekday, weekend };
        if matrix.rates().contains(&0) {
            return Err(VenueError::InvalidRequest(
                "pricing rates must be positive".to_string(),
            ));
        }
        Ok(matrix)
    }

    /// All four rates in weekday-morning, weekday-night, weekend-morning,
    /// weekend-night order.
    #[must_use]
    pub const fn rates(&self) -> [u64; 4] {
        [
            self.weekday.morning,
            self.weekday.night,
            self.weekend.morning,
            self.weekend.night,
        ]
    }

    /// Returns the rate for a day kind and hour band.
    #[must_use]
    pub const fn rate(&self, day: DayKind, band: HourBand) -> u64 {
        let rates = match day {
            DayKind::Weekday => self.weekday,
            DayKind::Weekend => self.weekend,
        };
        match band {
            HourBand::Morning => rates.morning,
            HourBand::Night => rates.night,
        }
    }

    /// Lowest of the four rates.
    #[must_use]
    pub fn min_rate(&self) -> u64 {
        self.rates().into_iter().min().unwrap_or(0)
    }

    /// Highest of the four rates.
    #[must_use]
    pub fn max_rate(&self) -> u64 {
        self.rates().into_iter().max().unwrap_or(0)
    }

    /// Rate charged for `hour` on `date`.
    #[must_use]
    pub fn rate_for(&self, date: NaiveDate, hour: u8) -> u64 {
        self.rate(DayKind::of(date), HourBand::of(hour))
    }
}

impl DayKind {
    /// Classifies a calendar date.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        if is_weekend(date) {
            Self::Weekend
        } else {
            Self::Weekday
        }
    }
}

impl HourBand {
    /// Classifies an hour of the day.
    #[must_use]
    pub const fn of(hour: u8) -> Self {
        if hour >= NIGHT_START_HOUR {
            Self::Night
        } else {
            Self::Morning
        }
    }
}

/// Returns `true` for Saturday and Sunday.
#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Half-open hour range `[start_hour, end_hour)` within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimeRange {
    /// First booked hour (0–23).
    pub start_hour: u8,
    /// Hour the booking ends (1–24, exclusive).
    pub end_hour: u8,
}

impl TimeRange {
    /// Validates and builds a range.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::InvalidTimeRange`] unless
    /// `start_hour < end_hour <= 24`.
    pub fn new(start_hour: u8, end_hour: u8) -> Result<Self, VenueError> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(VenueError::InvalidTimeRange {
                start_hour,
                end_hour,
            });
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    /// Number of booked hours.
    #[must_use]
    pub const fn duration(&self) -> u8 {
        self.end_hour - self.start_hour
    }

    /// `"19:00 - 21:00"` style label.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{:02}:00 - {:02}:00", self.start_hour, self.end_hour)
    }
}

/// Price of a booking selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Quote {
    /// Rate at the start hour, applied to every booked hour.
    pub price_per_hour: u64,
    /// Booked hours.
    pub duration: u8,
    /// `price_per_hour * duration`.
    pub total_price: u64,
}

/// Prices a selection. The whole booking is billed at the start hour's rate.
#[must_use]
pub fn quote(pricing: &PricingMatrix, date: NaiveDate, range: TimeRange) -> Quote {
    let price_per_hour = pricing.rate_for(date, range.start_hour);
    let duration = range.duration();
    Quote {
        price_per_hour,
        duration,
        total_price: price_per_hour.saturating_mul(u64::from(duration)),
    }
}

/// Formats an IDR amount as `Rp 400.000`.
#[must_use]
pub fn format_rupiah(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("Rp {grouped}")
}
