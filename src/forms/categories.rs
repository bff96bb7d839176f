use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::CategoryChanges;
use crate::domain::types::{CategoryName, TypeConstraintError};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateCategoryPayload {
    pub name: CategoryName,
    pub description: Option<String>,
}

/// Partial update; omitted or `null` fields stay unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCategoryForm {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("Category form validation failed: {0}")]
    Validation(String),
    #[error("Category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreateCategoryForm> for CreateCategoryPayload {
    type Error = CategoryFormError;

    fn try_from(value: CreateCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: CategoryName::new(value.name)?,
            description: value.description,
        })
    }
}

impl TryFrom<UpdateCategoryForm> for CategoryChanges {
    type Error = CategoryFormError;

    fn try_from(value: UpdateCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: value.name.map(CategoryName::new).transpose()?,
            description: value.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_form_trims_name() {
        let payload: CreateCategoryPayload = CreateCategoryForm {
            name: "  ML ".into(),
            description: None,
        }
        .try_into()
        .unwrap();
        assert_eq!(payload.name, "ML");
    }

    #[test]
    fn create_form_rejects_empty_and_long_names() {
        let empty = CreateCategoryPayload::try_from(CreateCategoryForm {
            name: String::new(),
            description: None,
        });
        assert!(matches!(empty, Err(CategoryFormError::Validation(_))));

        let blank = CreateCategoryPayload::try_from(CreateCategoryForm {
            name: "   ".into(),
            description: None,
        });
        assert!(matches!(blank, Err(CategoryFormError::TypeConstraint(_))));

        let long = CreateCategoryPayload::try_from(CreateCategoryForm {
            name: "x".repeat(256),
            description: None,
        });
        assert!(matches!(long, Err(CategoryFormError::Validation(_))));
    }

    #[test]
    fn empty_update_form_yields_no_changes() {
        let changes = CategoryChanges::try_from(UpdateCategoryForm::default()).unwrap();
        assert_eq!(changes, CategoryChanges::default());
    }
}
