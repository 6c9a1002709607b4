use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::category::{
    Category as DomainCategory, CategoryListQuery, NewCategory as DomainNewCategory,
    UpdateCategory as DomainUpdateCategory,
};
use crate::models::category::{
    Category as DbCategory, NewCategory as DbNewCategory, UpdateCategory as DbUpdateCategory,
};
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository, page_bounds};

impl CategoryReader for DieselRepository {
    fn get_category_by_id(
        &self,
        id: i32,
        location_id: i32,
    ) -> RepositoryResult<Option<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(id))
            .filter(categories::location_id.eq(location_id))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(DomainCategory::from))
    }

    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainCategory>)> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let mut count_query = categories::table
            .filter(categories::location_id.eq(query.location_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if !query.include_inactive {
            count_query = count_query.filter(categories::is_active.eq(true));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(categories::name.like(pattern));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items_query = categories::table
            .filter(categories::location_id.eq(query.location_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if !query.include_inactive {
            items_query = items_query.filter(categories::is_active.eq(true));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items_query = items_query.filter(categories::name.like(pattern));
        }

        items_query = items_query.order(categories::name.asc());

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = page_bounds(pagination.page, pagination.per_page);
            items_query = items_query.offset(offset).limit(limit);
        }

        let categories = items_query.load::<DbCategory>(&mut conn)?;
        let categories = categories.into_iter().map(DomainCategory::from).collect();

        Ok((total, categories))
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(
        &self,
        new_category: &DomainNewCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let insertable = DbNewCategory::from(new_category);

        let created = diesel::insert_into(categories::table)
            .values(&insertable)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.into())
    }

    fn update_category(
        &self,
        id: i32,
        location_id: i32,
        updates: &DomainUpdateCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let changes = DbUpdateCategory::from(updates);

        let target = categories::table
            .filter(categories::id.eq(id))
            .filter(categories::location_id.eq(location_id));

        let updated = diesel::update(target)
            .set(&changes)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(updated.into())
    }
}
