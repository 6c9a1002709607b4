use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::activity::NewActivity;
use crate::domain::menu::{
    Menu as DomainMenu, MenuCategory as DomainMenuCategory, MenuListQuery,
    NewMenu as DomainNewMenu, NewMenuCategory as DomainNewMenuCategory,
    UpdateMenu as DomainUpdateMenu,
};
use crate::models::menu::{
    Menu as DbMenu, MenuCategory as DbMenuCategory, NewMenu as DbNewMenu,
    NewMenuCategory as DbNewMenuCategory, UpdateMenu as DbUpdateMenu,
};
use crate::repository::stock::record_activity;
use crate::repository::{DieselRepository, MenuReader, MenuWriter, page_bounds};

impl MenuReader for DieselRepository {
    fn get_menu_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<DomainMenu>> {
        use crate::schema::menus;

        let mut conn = self.conn()?;
        let menu = menus::table
            .filter(menus::id.eq(id))
            .filter(menus::location_id.eq(location_id))
            .first::<DbMenu>(&mut conn)
            .optional()?;

        Ok(menu.map(DomainMenu::from))
    }

    fn list_menus(&self, query: MenuListQuery) -> RepositoryResult<(usize, Vec<DomainMenu>)> {
        use crate::schema::menus;

        let mut conn = self.conn()?;

        let search_pattern = query.search.as_ref().map(|term| format!("%{}%", term));

        let mut count_query = menus::table
            .filter(menus::location_id.eq(query.location_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = query.menu_category_id {
            count_query = count_query.filter(menus::menu_category_id.eq(category_id));
        }

        if let Some(ref pattern) = search_pattern {
            count_query = count_query.filter(menus::name.like(pattern.clone()));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = menus::table
            .filter(menus::location_id.eq(query.location_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = query.menu_category_id {
            items = items.filter(menus::menu_category_id.eq(category_id));
        }

        if let Some(ref pattern) = search_pattern {
            items = items.filter(menus::name.like(pattern.clone()));
        }

        items = items.order(menus::name.asc());

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = page_bounds(pagination.page, pagination.per_page);
            items = items.offset(offset).limit(limit);
        }

        let menus = items.load::<DbMenu>(&mut conn)?;

        Ok((total, menus.into_iter().map(DomainMenu::from).collect()))
    }

    fn get_menu_category_by_id(
        &self,
        id: i32,
        location_id: i32,
    ) -> RepositoryResult<Option<DomainMenuCategory>> {
        use crate::schema::menu_categories;

        let mut conn = self.conn()?;
        let category = menu_categories::table
            .filter(menu_categories::id.eq(id))
            .filter(menu_categories::location_id.eq(location_id))
            .first::<DbMenuCategory>(&mut conn)
            .optional()?;

        Ok(category.map(DomainMenuCategory::from))
    }

    fn list_menu_categories(&self, location_id: i32) -> RepositoryResult<Vec<DomainMenuCategory>> {
        use crate::schema::menu_categories;

        let mut conn = self.conn()?;
        let categories = menu_categories::table
            .filter(menu_categories::location_id.eq(location_id))
            .order(menu_categories::name.asc())
            .load::<DbMenuCategory>(&mut conn)?;

        Ok(categories.into_iter().map(DomainMenuCategory::from).collect())
    }
}

impl MenuWriter for DieselRepository {
    fn create_menu(
        &self,
        new_menu: &DomainNewMenu,
        activity: &NewActivity,
    ) -> RepositoryResult<DomainMenu> {
        use crate::schema::menus;

        let mut conn = self.conn()?;

        conn.transaction::<DomainMenu, RepositoryError, _>(|conn| {
            let db_new = DbNewMenu::from(new_menu);
            let created = diesel::insert_into(menus::table)
                .values(&db_new)
                .get_result::<DbMenu>(conn)?;

            record_activity(conn, activity, Some(created.id))?;

            Ok(created.into())
        })
    }

    fn update_menu(
        &self,
        id: i32,
        location_id: i32,
        updates: &DomainUpdateMenu,
        activity: &NewActivity,
    ) -> RepositoryResult<DomainMenu> {
        use crate::schema::menus;

        let mut conn = self.conn()?;

        conn.transaction::<DomainMenu, RepositoryError, _>(|conn| {
            let db_updates = DbUpdateMenu::from(updates);
            let target = menus::table
                .filter(menus::id.eq(id))
                .filter(menus::location_id.eq(location_id));

            let updated = diesel::update(target)
                .set(&db_updates)
                .get_result::<DbMenu>(conn)?;

            record_activity(conn, activity, Some(updated.id))?;

            Ok(updated.into())
        })
    }

    fn create_menu_category(
        &self,
        new_category: &DomainNewMenuCategory,
        activity: &NewActivity,
    ) -> RepositoryResult<DomainMenuCategory> {
        use crate::schema::menu_categories;

        let mut conn = self.conn()?;

        conn.transaction::<DomainMenuCategory, RepositoryError, _>(|conn| {
            let db_new = DbNewMenuCategory::from(new_category);
            let created = diesel::insert_into(menu_categories::table)
                .values(&db_new)
                .get_result::<DbMenuCategory>(conn)?;

            record_activity(conn, activity, Some(created.id))?;

            Ok(created.into())
        })
    }
}
