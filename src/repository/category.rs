use diesel::prelude::*;

use crate::domain::category::Category;
use crate::domain::types::CategoryId;
use crate::models::category::{
    Category as DbCategory, CategoryChangeset, NewCategory as DbNewCategory,
};
use crate::repository::{
    CategoryListQuery, CategoryReader, CategoryWriter, DieselRepository, RepositoryResult,
};

impl CategoryReader for DieselRepository {
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .find(id.to_string())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }

    fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let items = categories::table
            .order((categories::created_at.asc(), categories::id.asc()))
            .offset(query.pagination.sql_offset())
            .limit(query.pagination.sql_limit())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &Category) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_category: DbNewCategory = category.into();

        let stored = diesel::insert_into(categories::table)
            .values(&db_category)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(stored.try_into()?)
    }

    fn update_category(&self, category: &Category) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let changeset: CategoryChangeset = category.into();

        let stored = diesel::update(categories::table.find(category.id.to_string()))
            .set(&changeset)
            .get_result::<DbCategory>(&mut conn)
            .optional()?;

        match stored {
            Some(row) => Ok(row.try_into()?),
            None => Ok(category.clone()),
        }
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<bool> {
        use crate::schema::{categories, llm_responses};

        let mut conn = self.conn()?;
        let id = id.to_string();

        let affected = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let affected = diesel::delete(categories::table.find(id.as_str())).execute(conn)?;
            // Responses may reference an id that was never stored; leave them be.
            if affected == 0 {
                return Ok(0);
            }

            let orphans = diesel::delete(
                llm_responses::table.filter(llm_responses::category_id.eq(Some(id.as_str()))),
            )
            .execute(conn)?;
            if orphans > 0 {
                log::debug!("Removed {orphans} responses filed under category {id}");
            }

            Ok(affected)
        })?;

        Ok(affected > 0)
    }
}
