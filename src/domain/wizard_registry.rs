//! Open booking wizards with per-wizard locking.
//!
//! [`WizardRegistry`] keeps every open wizard in a `HashMap` whose entries
//! are individually protected by a [`tokio::sync::RwLock`], so one
//! customer's slow payment step never blocks another wizard.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::WizardId;
use super::wizard::BookingWizard;
use crate::error::VenueError;

/// Central store for open wizards.
///
/// # Concurrency
///
/// - Reads of the same wizard run concurrently.
/// - Writes to different wizards run concurrently.
/// - Writes to the same wizard are serialized.
#[derive(Debug)]
pub struct WizardRegistry {
    wizards: RwLock<HashMap<WizardId, Arc<RwLock<BookingWizard>>>>,
}

impl WizardRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            wizards: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts a freshly opened wizard.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::InvalidRequest`] if the id is already taken
    /// (should never happen with UUID v4).
    pub async fn insert(&self, wizard: BookingWizard) -> Result<WizardId, VenueError> {
        let id = wizard.id;
        let mut map = self.wizards.write().await;
        if map.contains_key(&id) {
            return Err(VenueError::InvalidRequest(format!(
                "wizard {id} already exists"
            )));
        }
        map.insert(id, Arc::new(RwLock::new(wizard)));
        Ok(id)
    }

    /// Returns the wizard behind its own lock.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::WizardNotFound`] for unknown ids.
    pub async fn get(&self, id: WizardId) -> Result<Arc<RwLock<BookingWizard>>, VenueError> {
        let map = self.wizards.read().await;
        map.get(&id)
            .cloned()
            .ok_or(VenueError::WizardNotFound(*id.as_uuid()))
    }

    /// Closes a wizard, returning its last state.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::WizardNotFound`] for unknown ids.
    pub async fn remove(&self, id: WizardId) -> Result<BookingWizard, VenueError> {
        let arc = self
            .wizards
            .write()
            .await
            .remove(&id)
            .ok_or(VenueError::WizardNotFound(*id.as_uuid()))?;
        // A handler may still hold a clone of the Arc; read through the lock
        // instead of unwrapping it.
        let wizard = arc.read().await.clone();
        Ok(wizard)
    }

    /// Returns the number of open wizards.
    pub async fn len(&self) -> usize {
        self.wizards.read().await.len()
    }

    /// Returns `true` if no wizard is open.
    pub async fn is_empty(&self) -> bool {
        self.wizards.read().await.is_empty()
    }
}

impl Default for WizardRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::FieldId;
    use crate::domain::pricing::{Quote, TimeRange};
    use crate::domain::wizard::{Selection, WizardStep};
    use chrono::NaiveDate;

    fn make_wizard() -> BookingWizard {
        let Ok(time) = TimeRange::new(8, 10) else {
            panic!("valid range");
        };
        let Some(date) = NaiveDate::from_ymd_opt(2025, 6, 25) else {
            panic!("valid date");
        };
        BookingWizard::open(Selection {
            field_id: FieldId::new("lapangan-c"),
            field_name: "Lapangan C".to_string(),
            date,
            time,
            players: 10,
            quote: Quote {
                price_per_hour: 100_000,
                duration: 2,
                total_price: 200_000,
            },
        })
    }

    #[tokio::test]
    async fn insert_and_get() {
        let registry = WizardRegistry::new();
        let wizard = make_wizard();
        let id = wizard.id;

        let Ok(inserted) = registry.insert(wizard).await else {
            panic!("insert failed");
        };
        assert_eq!(inserted, id);

        let Ok(lock) = registry.get(id).await else {
            panic!("wizard not found");
        };
        assert_eq!(lock.read().await.step, WizardStep::Review);
    }

    #[tokio::test]
    async fn get_unknown_returns_error() {
        let registry = WizardRegistry::new();
        let result = registry.get(WizardId::new()).await;
        assert!(matches!(result, Err(VenueError::WizardNotFound(_))));
    }

    #[tokio::test]
    async fn remove_returns_last_state() {
        let registry = WizardRegistry::new();
        let wizard = make_wizard();
        let id = wizard.id;
        let _ = registry.insert(wizard).await;

        let Ok(removed) = registry.remove(id).await else {
            panic!("remove failed");
        };
        assert_eq!(removed.id, id);
        assert!(registry.get(id).await.is_err());
        assert!(registry.remove(id).await.is_err());
    }

    #[tokio::test]
    async fn len_and_is_empty() {
        let registry = WizardRegistry::new();
        assert!(registry.is_empty().await);
        let _ = registry.insert(make_wizard()).await;
        let _ = registry.insert(make_wizard()).await;
        assert_eq!(registry.len().await, 2);
    }
}
