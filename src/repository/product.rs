use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::activity::NewActivity;
use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
    UpdateProduct as DomainUpdateProduct,
};
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
};
use crate::repository::stock::record_activity;
use crate::repository::{DieselRepository, ProductReader, ProductWriter, page_bounds};
use crate::schema::products;

fn filtered(query: &ProductListQuery) -> products::BoxedQuery<'static, Sqlite> {
    let mut items = products::table
        .filter(products::location_id.eq(query.location_id))
        .into_boxed::<Sqlite>();

    if !query.include_archived {
        items = items.filter(products::is_archived.eq(false));
    }

    if let Some(term) = query.search.as_ref() {
        let pattern = format!("%{}%", term);
        items = items.filter(
            products::name
                .like(pattern.clone())
                .or(products::sku.like(pattern)),
        );
    }

    if let Some(ids) = query.ids.as_ref() {
        items = items.filter(products::id.eq_any(ids.clone()));
    }

    items
}

impl ProductReader for DieselRepository {
    fn get_product_by_id(
        &self,
        id: i32,
        location_id: i32,
    ) -> RepositoryResult<Option<DomainProduct>> {
        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .filter(products::location_id.eq(location_id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(DomainProduct::from))
    }

    fn get_product_by_sku(
        &self,
        sku: &str,
        location_id: i32,
    ) -> RepositoryResult<Option<DomainProduct>> {
        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::sku.eq(sku))
            .filter(products::location_id.eq(location_id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(DomainProduct::from))
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        let mut conn = self.conn()?;

        let total = filtered(&query).count().get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered(&query).order((products::is_archived.asc(), products::name.asc()));

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = page_bounds(pagination.page, pagination.per_page);
            items = items.offset(offset).limit(limit);
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;

        Ok((total, db_products.into_iter().map(DomainProduct::from).collect()))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(
        &self,
        new_product: &DomainNewProduct,
        activity: &NewActivity,
    ) -> RepositoryResult<DomainProduct> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let db_new = DbNewProduct::from(new_product);
            let created = diesel::insert_into(products::table)
                .values(&db_new)
                .get_result::<DbProduct>(conn)?;

            record_activity(conn, activity, Some(created.id))?;

            Ok(created.into())
        })
    }

    fn update_product(
        &self,
        id: i32,
        location_id: i32,
        updates: &DomainUpdateProduct,
        activity: &NewActivity,
    ) -> RepositoryResult<DomainProduct> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let db_updates = DbUpdateProduct::from(updates);
            let target = products::table
                .filter(products::id.eq(id))
                .filter(products::location_id.eq(location_id));

            let updated = diesel::update(target)
                .set(&db_updates)
                .get_result::<DbProduct>(conn)?;

            record_activity(conn, activity, Some(updated.id))?;

            Ok(updated.into())
        })
    }

    fn import_products(
        &self,
        new_products: &[DomainNewProduct],
        activity: &NewActivity,
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            let payload: Vec<DbNewProduct> = new_products.iter().map(DbNewProduct::from).collect();

            let inserted = diesel::insert_into(products::table)
                .values(&payload)
                .execute(conn)?;

            record_activity(conn, activity, None)?;

            Ok(inserted)
        })
    }
}
