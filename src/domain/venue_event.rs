//! Domain events reflecting booking and catalog mutations.
//!
//! Every state change emits a [`VenueEvent`] through the [`super::EventBus`].
//! Events are broadcast to WebSocket subscribers of the live feed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::booking::BookingStatus;
use super::user::Role;
use super::{BookingId, FieldId, UserId};

/// Domain event emitted after every state mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum VenueEvent {
    /// Emitted when the wizard appends a booking.
    BookingCreated {
        /// New booking.
        booking_id: BookingId,
        /// Booked field.
        field_id: FieldId,
        /// Owning account.
        user_id: UserId,
        /// Play date (ISO-8601 calendar date).
        date: String,
        /// `"19:00 - 21:00"` style label.
        time_slot: String,
        /// Total price in IDR.
        total_price: u64,
        /// Append time.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when an admin or customer changes a booking status.
    BookingStatusChanged {
        /// Affected booking.
        booking_id: BookingId,
        /// Booked field.
        field_id: FieldId,
        /// Status before the change.
        old_status: BookingStatus,
        /// Status after the change.
        new_status: BookingStatus,
        /// Change time.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when an admin flips a field's active flag.
    FieldToggled {
        /// Affected field.
        field_id: FieldId,
        /// New active flag.
        is_active: bool,
        /// Change time.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when an admin deletes a field.
    FieldRemoved {
        /// Removed field.
        field_id: FieldId,
        /// Removal time.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when an admin toggles a user's role.
    UserRoleChanged {
        /// Affected account.
        user_id: UserId,
        /// Role after the change.
        role: Role,
        /// Change time.
        timestamp: DateTime<Utc>,
    },
}

impl VenueEvent {
    /// Returns the field this event concerns, if any.
    #[must_use]
    pub fn field_id(&self) -> Option<&FieldId> {
        match self {
            Self::BookingCreated { field_id, .. }
            | Self::BookingStatusChanged { field_id, .. }
            | Self::FieldToggled { field_id, .. }
            | Self::FieldRemoved { field_id, .. } => Some(field_id),
            Self::UserRoleChanged { .. } => None,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::BookingCreated { .. } => "booking_created",
            Self::BookingStatusChanged { .. } => "booking_status_changed",
            Self::FieldToggled { .. } => "field_toggled",
            Self::FieldRemoved { .. } => "field_removed",
            Self::UserRoleChanged { .. } => "user_role_changed",
        }
    }
}
