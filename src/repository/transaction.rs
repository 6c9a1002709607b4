use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::transaction::{
    InventoryTransaction as DomainInventoryTransaction, TransactionListQuery,
};
use crate::models::transaction::InventoryTransaction as DbInventoryTransaction;
use crate::repository::{DieselRepository, TransactionReader, page_bounds};
use crate::schema::inventory_transactions;

fn filtered(query: &TransactionListQuery) -> inventory_transactions::BoxedQuery<'static, Sqlite> {
    let mut items = inventory_transactions::table
        .filter(inventory_transactions::location_id.eq(query.location_id))
        .into_boxed::<Sqlite>();

    if let Some(kind) = query.kind {
        items = items.filter(inventory_transactions::kind.eq(<&'static str>::from(kind)));
    }

    if let Some(product_id) = query.product_id {
        items = items.filter(inventory_transactions::product_id.eq(product_id));
    }

    if let Some(from) = query.from {
        items = items.filter(inventory_transactions::created_at.ge(from));
    }

    if let Some(to) = query.to {
        items = items.filter(inventory_transactions::created_at.le(to));
    }

    items
}

impl TransactionReader for DieselRepository {
    fn list_transactions(
        &self,
        query: TransactionListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainInventoryTransaction>)> {
        let mut conn = self.conn()?;

        let total = filtered(&query).count().get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered(&query).order((
            inventory_transactions::created_at.desc(),
            inventory_transactions::id.desc(),
        ));

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = page_bounds(pagination.page, pagination.per_page);
            items = items.offset(offset).limit(limit);
        }

        let rows = items.load::<DbInventoryTransaction>(&mut conn)?;

        Ok((
            total,
            rows.into_iter().map(DomainInventoryTransaction::from).collect(),
        ))
    }
}
