//! Customer reviews shown on a field's detail page.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::FieldId;

/// A customer's rating and comment for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Review {
    /// Review identifier.
    pub id: String,
    /// Reviewed field.
    pub field_id: FieldId,
    /// Display name of the reviewer.
    pub customer_name: String,
    /// Stars, 1 to 5.
    pub rating: u8,
    /// Free text.
    pub comment: String,
    /// When the review was written.
    pub created_at: DateTime<Utc>,
}

/// Reviews for `field_id`, newest first.
#[must_use]
pub fn for_field(reviews: &[Review], field_id: &FieldId) -> Vec<Review> {
    let mut matching: Vec<Review> = reviews
        .iter()
        .filter(|r| &r.field_id == field_id)
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed;

    #[test]
    fn newest_first_for_one_field() {
        let reviews = for_field(&seed::reviews(), &FieldId::new("lapangan-a"));
        let ids: Vec<&str> = reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r2"]);
    }

    #[test]
    fn field_without_reviews_is_empty() {
        assert!(for_field(&seed::reviews(), &FieldId::new("lapangan-c")).is_empty());
    }
}
