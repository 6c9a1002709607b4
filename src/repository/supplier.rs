use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::activity::NewActivity;
use crate::domain::supplier::{
    NewSupplier as DomainNewSupplier, Supplier as DomainSupplier, SupplierListQuery,
    UpdateSupplier as DomainUpdateSupplier,
};
use crate::models::supplier::{
    NewSupplier as DbNewSupplier, Supplier as DbSupplier, UpdateSupplier as DbUpdateSupplier,
};
use crate::repository::stock::record_activity;
use crate::repository::{DieselRepository, SupplierReader, SupplierWriter, page_bounds};
use crate::schema::suppliers;

fn filtered(query: &SupplierListQuery) -> suppliers::BoxedQuery<'static, Sqlite> {
    let mut items = suppliers::table
        .filter(suppliers::location_id.eq(query.location_id))
        .into_boxed::<Sqlite>();

    if let Some(term) = query.search.as_ref() {
        let pattern = format!("%{}%", term);
        items = items.filter(
            suppliers::name
                .like(pattern.clone())
                .or(suppliers::contact_person.like(pattern.clone()))
                .or(suppliers::email.like(pattern)),
        );
    }

    items
}

impl SupplierReader for DieselRepository {
    fn get_supplier_by_id(
        &self,
        id: i32,
        location_id: i32,
    ) -> RepositoryResult<Option<DomainSupplier>> {
        let mut conn = self.conn()?;
        let supplier = suppliers::table
            .filter(suppliers::id.eq(id))
            .filter(suppliers::location_id.eq(location_id))
            .first::<DbSupplier>(&mut conn)
            .optional()?;

        Ok(supplier.map(DomainSupplier::from))
    }

    fn list_suppliers(
        &self,
        query: SupplierListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainSupplier>)> {
        let mut conn = self.conn()?;

        let total = filtered(&query).count().get_result::<i64>(&mut conn)? as usize;

        // Preferred suppliers first, then alphabetical.
        let mut items =
            filtered(&query).order((suppliers::is_preferred.desc(), suppliers::name.asc()));

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = page_bounds(pagination.page, pagination.per_page);
            items = items.offset(offset).limit(limit);
        }

        let suppliers = items.load::<DbSupplier>(&mut conn)?;

        Ok((total, suppliers.into_iter().map(DomainSupplier::from).collect()))
    }
}

impl SupplierWriter for DieselRepository {
    fn create_supplier(
        &self,
        new_supplier: &DomainNewSupplier,
        activity: &NewActivity,
    ) -> RepositoryResult<DomainSupplier> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainSupplier, RepositoryError, _>(|conn| {
            let db_new = DbNewSupplier::from(new_supplier);
            let created = diesel::insert_into(suppliers::table)
                .values(&db_new)
                .get_result::<DbSupplier>(conn)?;

            record_activity(conn, activity, Some(created.id))?;

            Ok(created.into())
        })
    }

    fn update_supplier(
        &self,
        id: i32,
        location_id: i32,
        updates: &DomainUpdateSupplier,
        activity: &NewActivity,
    ) -> RepositoryResult<DomainSupplier> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainSupplier, RepositoryError, _>(|conn| {
            let db_updates = DbUpdateSupplier::from(updates);
            let target = suppliers::table
                .filter(suppliers::id.eq(id))
                .filter(suppliers::location_id.eq(location_id));

            let updated = diesel::update(target)
                .set(&db_updates)
                .get_result::<DbSupplier>(conn)?;

            record_activity(conn, activity, Some(updated.id))?;

            Ok(updated.into())
        })
    }
}
