use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName};

/// Named bucket used to classify stored responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Fields that may be changed on an existing [`Category`].
///
/// `None` leaves the current value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryChanges {
    pub name: Option<CategoryName>,
    pub description: Option<String>,
}

impl Category {
    /// Builds a fresh category with a generated id and current timestamps.
    pub fn new(name: CategoryName, description: Option<String>) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: CategoryId::generate(),
            name,
            description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the supplied changes and refreshes `updated_at`, even when
    /// nothing was supplied.
    pub fn update(mut self, changes: CategoryChanges) -> Self {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        self.updated_at = Utc::now().naive_utc();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn sample_category() -> Category {
        Category {
            id: CategoryId::generate(),
            name: CategoryName::new("ML").unwrap(),
            description: Some("machine learning".into()),
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
            updated_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    #[test]
    fn new_category_gets_matching_timestamps() {
        let category = Category::new(CategoryName::new("ML").unwrap(), None);
        assert_eq!(category.created_at, category.updated_at);
        assert!(category.description.is_none());
    }

    #[test]
    fn empty_update_only_touches_updated_at() {
        let original = sample_category();
        let updated = original.clone().update(CategoryChanges::default());

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.name, original.name);
        assert_eq!(updated.description, original.description);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);
    }

    #[test]
    fn update_overwrites_supplied_fields_only() {
        let original = sample_category();
        let updated = original.clone().update(CategoryChanges {
            name: Some(CategoryName::new("Deep Learning").unwrap()),
            description: None,
        });

        assert_eq!(updated.name, "Deep Learning");
        assert_eq!(updated.description.as_deref(), Some("machine learning"));
    }
}
