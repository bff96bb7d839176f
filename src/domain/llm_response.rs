use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, LlmProvider, ModelName, ResponseId, ResponseTitle, StorageLocation,
};

/// A stored LLM interaction: the prompt, the markdown answer and metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmResponse {
    pub id: ResponseId,
    pub title: ResponseTitle,
    pub prompt: String,
    pub content_md: String,
    pub model: ModelName,
    pub provider: LlmProvider,
    /// Weak reference to a [`Category`](crate::domain::category::Category).
    pub category_id: Option<CategoryId>,
    /// Insertion-ordered, without duplicates.
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub storage_location: StorageLocation,
    pub storage_path: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to build a new [`LlmResponse`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewLlmResponse {
    pub title: ResponseTitle,
    pub prompt: String,
    pub content_md: String,
    pub model: ModelName,
    pub provider: LlmProvider,
    pub category_id: Option<CategoryId>,
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub storage_location: StorageLocation,
    pub storage_path: Option<String>,
}

/// Fields that may be changed on an existing [`LlmResponse`].
///
/// `None` leaves the current value untouched; `tags` replaces the whole list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseChanges {
    pub title: Option<ResponseTitle>,
    pub prompt: Option<String>,
    pub content_md: Option<String>,
    pub model: Option<ModelName>,
    pub provider: Option<LlmProvider>,
    pub category_id: Option<CategoryId>,
    pub tags: Option<Vec<String>>,
    pub summary: Option<String>,
}

fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !unique.contains(&tag) {
            unique.push(tag);
        }
    }
    unique
}

impl LlmResponse {
    /// Builds a fresh response with a generated id and current timestamps.
    pub fn new(response: NewLlmResponse) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: ResponseId::generate(),
            title: response.title,
            prompt: response.prompt,
            content_md: response.content_md,
            model: response.model,
            provider: response.provider,
            category_id: response.category_id,
            tags: dedup_tags(response.tags),
            summary: response.summary,
            storage_location: response.storage_location,
            storage_path: response.storage_path,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the supplied changes and refreshes `updated_at`, even when
    /// nothing was supplied.
    pub fn update(mut self, changes: ResponseChanges) -> Self {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(prompt) = changes.prompt {
            self.prompt = prompt;
        }
        if let Some(content_md) = changes.content_md {
            self.content_md = content_md;
        }
        if let Some(model) = changes.model {
            self.model = model;
        }
        if let Some(provider) = changes.provider {
            self.provider = provider;
        }
        if let Some(category_id) = changes.category_id {
            self.category_id = Some(category_id);
        }
        if let Some(tags) = changes.tags {
            self.tags = dedup_tags(tags);
        }
        if let Some(summary) = changes.summary {
            self.summary = Some(summary);
        }
        self.touch();
        self
    }

    /// Appends `tag` unless it is already present.
    ///
    /// `updated_at` only moves when the tag list actually changes.
    pub fn add_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
            self.touch();
        }
        self
    }

    /// Removes `tag` if present; absent tags leave the response untouched.
    pub fn remove_tag(mut self, tag: &str) -> Self {
        if let Some(position) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(position);
            self.touch();
        }
        self
    }

    /// Returns `true` if every tag in `required` is attached.
    pub fn has_all_tags<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required
            .iter()
            .all(|tag| self.tags.iter().any(|t| t == tag.as_ref()))
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().naive_utc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn epoch() -> NaiveDateTime {
        DateTime::from_timestamp(0, 0).unwrap().naive_utc()
    }

    fn sample_response() -> LlmResponse {
        LlmResponse {
            id: ResponseId::generate(),
            title: ResponseTitle::new("T1").unwrap(),
            prompt: "P1".into(),
            content_md: "X".into(),
            model: ModelName::new("gpt").unwrap(),
            provider: LlmProvider::Openai,
            category_id: None,
            tags: vec!["a".into(), "b".into()],
            summary: None,
            storage_location: StorageLocation::File,
            storage_path: None,
            created_at: epoch(),
            updated_at: epoch(),
        }
    }

    fn sample_new_response(tags: Vec<&str>) -> NewLlmResponse {
        NewLlmResponse {
            title: ResponseTitle::new("T1").unwrap(),
            prompt: "P1".into(),
            content_md: "X".into(),
            model: ModelName::new("gpt").unwrap(),
            provider: LlmProvider::Openai,
            category_id: None,
            tags: tags.into_iter().map(String::from).collect(),
            summary: None,
            storage_location: StorageLocation::default(),
            storage_path: None,
        }
    }

    #[test]
    fn new_response_suppresses_duplicate_tags() {
        let response = LlmResponse::new(sample_new_response(vec!["a", "b", "a"]));
        assert_eq!(response.tags, vec!["a", "b"]);
        assert_eq!(response.storage_location, StorageLocation::File);
    }

    #[test]
    fn add_tag_appends_once() {
        let response = sample_response().add_tag("c");
        assert_eq!(response.tags, vec!["a", "b", "c"]);
        assert!(response.updated_at > epoch());

        let stamp = response.updated_at;
        let again = response.add_tag("c");
        assert_eq!(again.tags.len(), 3);
        assert_eq!(again.updated_at, stamp);
    }

    #[test]
    fn remove_absent_tag_is_a_no_op() {
        let response = sample_response().remove_tag("zzz");
        assert_eq!(response.tags, vec!["a", "b"]);
        assert_eq!(response.updated_at, epoch());
    }

    #[test]
    fn remove_present_tag_drops_one_occurrence() {
        let response = sample_response().remove_tag("a");
        assert_eq!(response.tags, vec!["b"]);
        assert!(response.updated_at > epoch());
    }

    #[test]
    fn empty_update_only_touches_updated_at() {
        let original = sample_response();
        let updated = original.clone().update(ResponseChanges::default());

        assert_eq!(updated.title, original.title);
        assert_eq!(updated.tags, original.tags);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);
    }

    #[test]
    fn update_merges_present_fields() {
        let category_id = CategoryId::generate();
        let updated = sample_response().update(ResponseChanges {
            provider: Some(LlmProvider::Anthropic),
            category_id: Some(category_id),
            tags: Some(vec!["a".into(), "b".into(), "c".into()]),
            ..Default::default()
        });

        assert_eq!(updated.provider, LlmProvider::Anthropic);
        assert_eq!(updated.category_id, Some(category_id));
        assert_eq!(updated.tags, vec!["a", "b", "c"]);
        assert_eq!(updated.title, "T1");
        assert_eq!(updated.prompt, "P1");
    }

    #[test]
    fn has_all_tags_requires_every_tag() {
        let response = sample_response();
        assert!(response.has_all_tags(&["a", "b"]));
        assert!(!response.has_all_tags(&["a", "c"]));
        assert!(response.has_all_tags::<&str>(&[]));
    }
}
