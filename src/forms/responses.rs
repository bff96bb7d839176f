use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::llm_response::{NewLlmResponse, ResponseChanges};
use crate::domain::types::{
    CategoryId, LlmProvider, ModelName, ResponseTitle, StorageLocation, TypeConstraintError,
};
use crate::forms::PaginationParams;
use crate::repository::ResponseSearchQuery;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateResponseForm {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub prompt: String,
    pub content_md: String,
    #[validate(length(min = 1, max = 100))]
    pub model: String,
    pub provider: String,
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub storage_location: Option<String>,
    #[validate(length(max = 500))]
    pub storage_path: Option<String>,
}

/// Partial update; omitted or `null` fields stay unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateResponseForm {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub prompt: Option<String>,
    pub content_md: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,
    pub provider: Option<String>,
    pub category_id: Option<CategoryId>,
    pub tags: Option<Vec<String>>,
    pub summary: Option<String>,
}

/// Search filters decoded from a query string.
///
/// `tags` may repeat (`?tags=a&tags=b`).
#[derive(Debug, Default, PartialEq)]
pub struct SearchResponsesForm {
    pub query: Option<String>,
    pub category_id: Option<CategoryId>,
    pub tags: Vec<String>,
    pub pagination: PaginationParams,
}

#[derive(Debug, Error)]
pub enum ResponseFormError {
    #[error("Response form validation failed: {0}")]
    Validation(String),
    #[error("Response form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ResponseFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ResponseFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

fn normalize_tags(tags: Vec<String>) -> Result<Vec<String>, TypeConstraintError> {
    tags.into_iter()
        .map(|tag| {
            let tag = tag.trim().to_string();
            if tag.is_empty() {
                Err(TypeConstraintError::EmptyString("tag"))
            } else {
                Ok(tag)
            }
        })
        .collect()
}

impl TryFrom<CreateResponseForm> for NewLlmResponse {
    type Error = ResponseFormError;

    fn try_from(value: CreateResponseForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let storage_location = match value.storage_location.as_deref() {
            Some(location) => location.parse::<StorageLocation>()?,
            None => StorageLocation::default(),
        };
        if value.storage_path.is_some() && !storage_location.is_external() {
            return Err(TypeConstraintError::InvalidValue(format!(
                "storage_path is not used with {storage_location} storage"
            ))
            .into());
        }

        Ok(Self {
            title: ResponseTitle::new(value.title)?,
            prompt: value.prompt,
            content_md: value.content_md,
            model: ModelName::new(value.model)?,
            provider: value.provider.parse()?,
            category_id: value.category_id,
            tags: normalize_tags(value.tags)?,
            summary: value.summary,
            storage_location,
            storage_path: value.storage_path,
        })
    }
}

impl TryFrom<UpdateResponseForm> for ResponseChanges {
    type Error = ResponseFormError;

    fn try_from(value: UpdateResponseForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            title: value.title.map(ResponseTitle::new).transpose()?,
            prompt: value.prompt,
            content_md: value.content_md,
            model: value.model.map(ModelName::new).transpose()?,
            provider: value
                .provider
                .as_deref()
                .map(str::parse::<LlmProvider>)
                .transpose()?,
            category_id: value.category_id,
            tags: value.tags.map(normalize_tags).transpose()?,
            summary: value.summary,
        })
    }
}

fn parse_usize(field: &'static str, value: &str) -> Result<usize, TypeConstraintError> {
    value
        .trim()
        .parse()
        .map_err(|_| {
            TypeConstraintError::InvalidValue(format!("{field} must be a non-negative integer"))
        })
}

impl SearchResponsesForm {
    /// Decode `key=value` pairs, keeping every occurrence of `tags`.
    pub fn from_query_pairs<I>(pairs: I) -> Result<Self, ResponseFormError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "query" => form.query = Some(value),
                "category_id" => form.category_id = Some(CategoryId::parse(&value)?),
                "tags" => form.tags.push(value),
                "skip" => form.pagination.skip = parse_usize("skip", &value)?,
                "limit" => form.pagination.limit = parse_usize("limit", &value)?,
                _ => {}
            }
        }
        form.pagination.validate()?;
        form.tags = normalize_tags(form.tags)?;
        Ok(form)
    }
}

impl From<SearchResponsesForm> for ResponseSearchQuery {
    fn from(form: SearchResponsesForm) -> Self {
        let mut query = ResponseSearchQuery::new()
            .tags(form.tags)
            .paginate(form.pagination.skip, form.pagination.limit);
        if let Some(text) = form.query {
            query = query.query(text);
        }
        if let Some(category_id) = form.category_id {
            query = query.category(category_id);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_form() -> CreateResponseForm {
        CreateResponseForm {
            title: "T1".into(),
            prompt: "P1".into(),
            content_md: "X".into(),
            model: "gpt".into(),
            provider: "openai".into(),
            category_id: None,
            tags: vec![" a ".into(), "b".into()],
            summary: None,
            storage_location: None,
            storage_path: None,
        }
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn create_form_builds_new_response() {
        let response = NewLlmResponse::try_from(create_form()).unwrap();
        assert_eq!(response.provider, LlmProvider::Openai);
        assert_eq!(response.tags, vec!["a", "b"]);
        assert_eq!(response.storage_location, StorageLocation::File);
    }

    #[test]
    fn create_form_rejects_unknown_provider() {
        let mut form = create_form();
        form.provider = "mistral".into();
        let result = NewLlmResponse::try_from(form);
        assert!(matches!(result, Err(ResponseFormError::TypeConstraint(_))));
    }

    #[test]
    fn create_form_rejects_storage_path_for_inline_content() {
        let mut form = create_form();
        form.storage_location = Some("inline".into());
        form.storage_path = Some("/tmp/x.md".into());
        assert!(NewLlmResponse::try_from(form).is_err());
    }

    #[test]
    fn create_form_rejects_long_model_names() {
        let mut form = create_form();
        form.model = "m".repeat(101);
        let result = NewLlmResponse::try_from(form);
        assert!(matches!(result, Err(ResponseFormError::Validation(_))));
    }

    #[test]
    fn update_form_keeps_absent_fields_empty() {
        let changes = ResponseChanges::try_from(UpdateResponseForm {
            provider: Some("google".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(changes.provider, Some(LlmProvider::Google));
        assert!(changes.title.is_none());
        assert!(changes.tags.is_none());
    }

    #[test]
    fn search_form_collects_repeated_tags() {
        let category_id = CategoryId::generate();
        let category_text = category_id.to_string();
        let form = SearchResponsesForm::from_query_pairs(pairs(&[
            ("query", "abc"),
            ("tags", "x"),
            ("tags", "y"),
            ("category_id", category_text.as_str()),
            ("skip", "10"),
            ("limit", "5"),
        ]))
        .unwrap();

        assert_eq!(form.query.as_deref(), Some("abc"));
        assert_eq!(form.tags, vec!["x", "y"]);
        assert_eq!(form.category_id, Some(category_id));
        assert_eq!(form.pagination, PaginationParams { skip: 10, limit: 5 });
    }

    #[test]
    fn search_form_rejects_bad_limits_and_ids() {
        assert!(SearchResponsesForm::from_query_pairs(pairs(&[("limit", "0")])).is_err());
        assert!(SearchResponsesForm::from_query_pairs(pairs(&[("limit", "5000")])).is_err());
        assert!(SearchResponsesForm::from_query_pairs(pairs(&[("skip", "-1")])).is_err());
        assert!(
            SearchResponsesForm::from_query_pairs(pairs(&[("category_id", "nope")])).is_err()
        );
    }

    #[test]
    fn empty_query_string_means_no_text_filter() {
        let form = SearchResponsesForm::from_query_pairs(pairs(&[("query", "")])).unwrap();
        let query: ResponseSearchQuery = form.into();
        assert!(query.query.is_none());
    }
}
