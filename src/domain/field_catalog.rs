//! In-memory field catalog.
//!
//! Fields are kept in seed order behind a single [`RwLock`]; the listing
//! sort relies on that order to break ties.

use tokio::sync::RwLock;

use super::FieldId;
use super::field::Field;
use crate::error::VenueError;

/// Ordered collection of every court the venue rents.
#[derive(Debug, Default)]
pub struct FieldCatalog {
    fields: RwLock<Vec<Field>>,
}

impl FieldCatalog {
    /// Builds a catalog from seed fields, keeping their order.
    #[must_use]
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields: RwLock::new(fields),
        }
    }

    /// Snapshot of all fields in catalog order.
    pub async fn all(&self) -> Vec<Field> {
        self.fields.read().await.clone()
    }

    /// Clones one field.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::FieldNotFound`] for unknown ids.
    pub async fn get(&self, id: &FieldId) -> Result<Field, VenueError> {
        self.fields
            .read()
            .await
            .iter()
            .find(|f| &f.id == id)
            .cloned()
            .ok_or_else(|| VenueError::FieldNotFound(id.to_string()))
    }

    /// Name of a field, if it exists.
    pub async fn name_of(&self, id: &FieldId) -> Option<String> {
        self.fields
            .read()
            .await
            .iter()
            .find(|f| &f.id == id)
            .map(|f| f.name.clone())
    }

    /// Flips the active flag, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::FieldNotFound`] for unknown ids.
    pub async fn toggle_active(&self, id: &FieldId) -> Result<bool, VenueError> {
        let mut fields = self.fields.write().await;
        let field = fields
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or_else(|| VenueError::FieldNotFound(id.to_string()))?;
        field.is_active = !field.is_active;
        Ok(field.is_active)
    }

    /// Deletes a field. Bookings that reference it are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::FieldNotFound`] for unknown ids.
    pub async fn remove(&self, id: &FieldId) -> Result<Field, VenueError> {
        let mut fields = self.fields.write().await;
        let idx = fields
            .iter()
            .position(|f| &f.id == id)
            .ok_or_else(|| VenueError::FieldNotFound(id.to_string()))?;
        Ok(fields.remove(idx))
    }

    /// Number of fields.
    pub async fn len(&self) -> usize {
        self.fields.read().await.len()
    }

    /// Returns `true` if the catalog is empty.
    pub async fn is_empty(&self) -> bool {
        self.fields.read().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::seed;

    fn catalog() -> FieldCatalog {
        FieldCatalog::new(seed::fields())
    }

    #[tokio::test]
    async fn keeps_seed_order() {
        let ids: Vec<String> = catalog()
            .all()
            .await
            .into_iter()
            .map(|f| f.id.to_string())
            .collect();
        assert_eq!(ids, vec!["lapangan-a", "lapangan-b", "lapangan-c"]);
    }

    #[tokio::test]
    async fn toggle_flips_flag() {
        let catalog = catalog();
        let id = FieldId::new("lapangan-b");
        assert_eq!(catalog.toggle_active(&id).await.ok(), Some(false));
        assert_eq!(catalog.toggle_active(&id).await.ok(), Some(true));
    }

    #[tokio::test]
    async fn remove_then_get_fails() {
        let catalog = catalog();
        let id = FieldId::new("lapangan-a");
        let Ok(removed) = catalog.remove(&id).await else {
            panic!("remove failed");
        };
        assert_eq!(removed.id, id);
        assert!(matches!(
            catalog.get(&id).await,
            Err(VenueError::FieldNotFound(_))
        ));
        assert_eq!(catalog.len().await, 2);
    }

    #[tokio::test]
    async fn unknown_field_errors() {
        let catalog = catalog();
        let id = FieldId::new("lapangan-z");
        assert!(catalog.toggle_active(&id).await.is_err());
        assert!(catalog.name_of(&id).await.is_none());
    }
}
