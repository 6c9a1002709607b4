use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::activity::NewActivity;
use crate::domain::customer::{
    Customer as DomainCustomer, CustomerListQuery, NewCustomer as DomainNewCustomer,
    UpdateCustomer as DomainUpdateCustomer,
};
use crate::models::customer::{
    Customer as DbCustomer, NewCustomer as DbNewCustomer, UpdateCustomer as DbUpdateCustomer,
};
use crate::repository::stock::record_activity;
use crate::repository::{CustomerReader, CustomerWriter, DieselRepository, page_bounds};

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(
        &self,
        id: i32,
        location_id: i32,
    ) -> RepositoryResult<Option<DomainCustomer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let customer = customers::table
            .filter(customers::id.eq(id))
            .filter(customers::location_id.eq(location_id))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        Ok(customer.map(DomainCustomer::from))
    }

    fn list_customers(
        &self,
        query: CustomerListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainCustomer>)> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        let search_pattern = query.search.as_ref().map(|term| format!("%{}%", term));

        let mut count_query = customers::table
            .filter(customers::location_id.eq(query.location_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(ref pattern) = search_pattern {
            count_query = count_query.filter(
                customers::name
                    .like(pattern.clone())
                    .or(customers::email.like(pattern.clone()))
                    .or(customers::phone.like(pattern.clone())),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = customers::table
            .filter(customers::location_id.eq(query.location_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(ref pattern) = search_pattern {
            items = items.filter(
                customers::name
                    .like(pattern.clone())
                    .or(customers::email.like(pattern.clone()))
                    .or(customers::phone.like(pattern.clone())),
            );
        }

        items = items.order(customers::name.asc());

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = page_bounds(pagination.page, pagination.per_page);
            items = items.offset(offset).limit(limit);
        }

        let customers = items.load::<DbCustomer>(&mut conn)?;

        Ok((total, customers.into_iter().map(DomainCustomer::from).collect()))
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(
        &self,
        new_customer: &DomainNewCustomer,
        activity: &NewActivity,
    ) -> RepositoryResult<DomainCustomer> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        conn.transaction::<DomainCustomer, RepositoryError, _>(|conn| {
            let db_new = DbNewCustomer::from(new_customer);
            let created = diesel::insert_into(customers::table)
                .values(&db_new)
                .get_result::<DbCustomer>(conn)?;

            record_activity(conn, activity, Some(created.id))?;

            Ok(created.into())
        })
    }

    fn update_customer(
        &self,
        id: i32,
        location_id: i32,
        updates: &DomainUpdateCustomer,
        activity: &NewActivity,
    ) -> RepositoryResult<DomainCustomer> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        conn.transaction::<DomainCustomer, RepositoryError, _>(|conn| {
            let db_updates = DbUpdateCustomer::from(updates);
            let target = customers::table
                .filter(customers::id.eq(id))
                .filter(customers::location_id.eq(location_id));

            let updated = diesel::update(target)
                .set(&db_updates)
                .get_result::<DbCustomer>(conn)?;

            record_activity(conn, activity, Some(updated.id))?;

            Ok(updated.into())
        })
    }
}
