use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::llm_response::LlmResponse;
use crate::domain::types::{CategoryId, LlmProvider, ResponseId, StorageLocation};
use crate::dto::categories::CategoryRefDto;
use crate::services::responses::ResponseDetail;

/// Full representation of a stored response.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LlmResponseDto {
    pub id: ResponseId,
    pub title: String,
    pub prompt: String,
    pub content_md: String,
    pub model: String,
    pub provider: LlmProvider,
    pub category_id: Option<CategoryId>,
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub storage_location: StorageLocation,
    pub storage_path: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRefDto>,
}

impl From<LlmResponse> for LlmResponseDto {
    fn from(value: LlmResponse) -> Self {
        Self {
            id: value.id,
            title: value.title.into_inner(),
            prompt: value.prompt,
            content_md: value.content_md,
            model: value.model.into_inner(),
            provider: value.provider,
            category_id: value.category_id,
            tags: value.tags,
            summary: value.summary,
            storage_location: value.storage_location,
            storage_path: value.storage_path,
            created_at: value.created_at,
            updated_at: value.updated_at,
            category: None,
        }
    }
}

impl From<ResponseDetail> for LlmResponseDto {
    fn from(value: ResponseDetail) -> Self {
        let mut dto = Self::from(value.response);
        dto.category = value.category.map(CategoryRefDto::from);
        dto
    }
}

/// List entry; omits the prompt and markdown body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LlmResponseListItemDto {
    pub id: ResponseId,
    pub title: String,
    pub model: String,
    pub provider: LlmProvider,
    pub category_id: Option<CategoryId>,
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<LlmResponse> for LlmResponseListItemDto {
    fn from(value: LlmResponse) -> Self {
        Self {
            id: value.id,
            title: value.title.into_inner(),
            model: value.model.into_inner(),
            provider: value.provider,
            category_id: value.category_id,
            tags: value.tags,
            summary: value.summary,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
