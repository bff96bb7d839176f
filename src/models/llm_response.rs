use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::llm_response::LlmResponse as DomainLlmResponse;
use crate::domain::types::{
    CategoryId, ModelName, ResponseId, ResponseTitle, TypeConstraintError,
};

/// Diesel model representing the `llm_responses` table.
///
/// `tags` holds a JSON array of strings.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::llm_responses)]
pub struct LlmResponse {
    pub id: String,
    pub title: String,
    pub prompt: String,
    pub content_md: String,
    pub model: String,
    pub provider: String,
    pub category_id: Option<String>,
    pub tags: String,
    pub summary: Option<String>,
    pub storage_location: String,
    pub storage_path: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`LlmResponse`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::llm_responses)]
pub struct NewLlmResponse {
    pub id: String,
    pub title: String,
    pub prompt: String,
    pub content_md: String,
    pub model: String,
    pub provider: String,
    pub category_id: Option<String>,
    pub tags: String,
    pub summary: Option<String>,
    pub storage_location: String,
    pub storage_path: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Full write-through of the mutable columns; `None` clears the column.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::llm_responses, treat_none_as_null = true)]
pub struct LlmResponseChangeset {
    pub title: String,
    pub prompt: String,
    pub content_md: String,
    pub model: String,
    pub provider: String,
    pub category_id: Option<String>,
    pub tags: String,
    pub summary: Option<String>,
    pub storage_location: String,
    pub storage_path: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<LlmResponse> for DomainLlmResponse {
    type Error = TypeConstraintError;

    fn try_from(response: LlmResponse) -> Result<Self, Self::Error> {
        let tags: Vec<String> = serde_json::from_str(&response.tags)
            .map_err(|e| TypeConstraintError::InvalidValue(format!("tags: {e}")))?;

        Ok(Self {
            id: ResponseId::parse(&response.id)?,
            title: ResponseTitle::new(response.title)?,
            prompt: response.prompt,
            content_md: response.content_md,
            model: ModelName::new(response.model)?,
            provider: response.provider.parse()?,
            category_id: response
                .category_id
                .as_deref()
                .map(CategoryId::parse)
                .transpose()?,
            tags,
            summary: response.summary,
            storage_location: response.storage_location.parse()?,
            storage_path: response.storage_path,
            created_at: response.created_at,
            updated_at: response.updated_at,
        })
    }
}

impl TryFrom<&DomainLlmResponse> for NewLlmResponse {
    type Error = serde_json::Error;

    fn try_from(response: &DomainLlmResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            id: response.id.to_string(),
            title: response.title.as_str().to_string(),
            prompt: response.prompt.clone(),
            content_md: response.content_md.clone(),
            model: response.model.as_str().to_string(),
            provider: response.provider.as_str().to_string(),
            category_id: response.category_id.map(|id| id.to_string()),
            tags: serde_json::to_string(&response.tags)?,
            summary: response.summary.clone(),
            storage_location: response.storage_location.as_str().to_string(),
            storage_path: response.storage_path.clone(),
            created_at: response.created_at,
            updated_at: response.updated_at,
        })
    }
}

impl TryFrom<&DomainLlmResponse> for LlmResponseChangeset {
    type Error = serde_json::Error;

    fn try_from(response: &DomainLlmResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            title: response.title.as_str().to_string(),
            prompt: response.prompt.clone(),
            content_md: response.content_md.clone(),
            model: response.model.as_str().to_string(),
            provider: response.provider.as_str().to_string(),
            category_id: response.category_id.map(|id| id.to_string()),
            tags: serde_json::to_string(&response.tags)?,
            summary: response.summary.clone(),
            storage_location: response.storage_location.as_str().to_string(),
            storage_path: response.storage_path.clone(),
            updated_at: response.updated_at,
        })
    }
}
