use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Text};

use crate::domain::llm_response::LlmResponse;
use crate::domain::types::ResponseId;
use crate::models::llm_response::{
    LlmResponse as DbLlmResponse, LlmResponseChangeset, NewLlmResponse as DbNewLlmResponse,
};
use crate::repository::{
    DieselRepository, LlmResponseReader, LlmResponseWriter, RepositoryResult, ResponseListQuery,
    ResponseSearchQuery,
};

const LIKE_ESCAPE: char = '\\';

/// Escape `LIKE` metacharacters so the query matches as a plain substring.
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl LlmResponseReader for DieselRepository {
    fn get_response_by_id(&self, id: ResponseId) -> RepositoryResult<Option<LlmResponse>> {
        use crate::schema::llm_responses;

        let mut conn = self.conn()?;

        let response = llm_responses::table
            .find(id.to_string())
            .first::<DbLlmResponse>(&mut conn)
            .optional()?;

        let response = response.map(TryInto::try_into).transpose()?;
        Ok(response)
    }

    fn list_responses(&self, query: ResponseListQuery) -> RepositoryResult<Vec<LlmResponse>> {
        use crate::schema::llm_responses;

        let mut conn = self.conn()?;

        let items = llm_responses::table
            .order((llm_responses::created_at.desc(), llm_responses::id.desc()))
            .offset(query.pagination.sql_offset())
            .limit(query.pagination.sql_limit())
            .load::<DbLlmResponse>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<LlmResponse>, _>>()?;

        Ok(items)
    }

    fn search_responses(
        &self,
        query: ResponseSearchQuery,
    ) -> RepositoryResult<Vec<LlmResponse>> {
        use crate::schema::llm_responses;

        let mut conn = self.conn()?;

        let mut items = llm_responses::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(text) = &query.query {
            let pattern = like_pattern(text);
            items = items.filter(
                llm_responses::title
                    .like(pattern.clone())
                    .escape(LIKE_ESCAPE)
                    .or(llm_responses::prompt
                        .like(pattern.clone())
                        .escape(LIKE_ESCAPE))
                    .or(llm_responses::content_md.like(pattern).escape(LIKE_ESCAPE)),
            );
        }

        if let Some(category_id) = query.category_id {
            items = items.filter(llm_responses::category_id.eq(Some(category_id.to_string())));
        }

        // Each tag must equal one element of the JSON array.
        for tag in &query.tags {
            items = items.filter(
                sql::<Bool>(
                    "EXISTS (SELECT 1 FROM json_each(llm_responses.tags) WHERE json_each.value = ",
                )
                .bind::<Text, _>(tag.clone())
                .sql(")"),
            );
        }

        let items = items
            .order((llm_responses::created_at.desc(), llm_responses::id.desc()))
            .offset(query.pagination.sql_offset())
            .limit(query.pagination.sql_limit())
            .load::<DbLlmResponse>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<LlmResponse>, _>>()?;

        Ok(items)
    }
}

impl LlmResponseWriter for DieselRepository {
    fn create_response(&self, response: &LlmResponse) -> RepositoryResult<LlmResponse> {
        use crate::schema::llm_responses;

        let mut conn = self.conn()?;
        let db_response = DbNewLlmResponse::try_from(response)?;

        let stored = diesel::insert_into(llm_responses::table)
            .values(&db_response)
            .get_result::<DbLlmResponse>(&mut conn)?;

        Ok(stored.try_into()?)
    }

    fn update_response(&self, response: &LlmResponse) -> RepositoryResult<LlmResponse> {
        use crate::schema::llm_responses;

        let mut conn = self.conn()?;
        let changeset = LlmResponseChangeset::try_from(response)?;

        let stored = diesel::update(llm_responses::table.find(response.id.to_string()))
            .set(&changeset)
            .get_result::<DbLlmResponse>(&mut conn)
            .optional()?;

        match stored {
            Some(row) => Ok(row.try_into()?),
            None => Ok(response.clone()),
        }
    }

    fn delete_response(&self, id: ResponseId) -> RepositoryResult<bool> {
        use crate::schema::llm_responses;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(llm_responses::table.find(id.to_string())).execute(&mut conn)?;

        Ok(affected > 0)
    }
}
