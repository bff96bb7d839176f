use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::Category as DomainCategory;
use crate::domain::types::{CategoryId, CategoryName, TypeConstraintError};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Category`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Full write-through of the mutable columns; `None` clears the column.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::categories, treat_none_as_null = true)]
pub struct CategoryChangeset {
    pub name: String,
    pub description: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CategoryId::parse(&category.id)?,
            name: CategoryName::new(category.name)?,
            description: category.description,
            created_at: category.created_at,
            updated_at: category.updated_at,
        })
    }
}

impl From<&DomainCategory> for NewCategory {
    fn from(category: &DomainCategory) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.as_str().to_string(),
            description: category.description.clone(),
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

impl From<&DomainCategory> for CategoryChangeset {
    fn from(category: &DomainCategory) -> Self {
        Self {
            name: category.name.as_str().to_string(),
            description: category.description.clone(),
            updated_at: category.updated_at,
        }
    }
}
