use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::inventory::{
    InventoryItem, InventoryListQuery, InventoryRecord as DomainInventoryRecord,
    NewInventoryRecord as DomainNewInventoryRecord,
    UpdateInventoryRecord as DomainUpdateInventoryRecord,
};
use crate::domain::sync::SyncStatus;
use crate::domain::transaction::{StockMovement, TransactionKind};
use crate::models::inventory::{
    InventoryRecord as DbInventoryRecord, NewInventoryRecord as DbNewInventoryRecord,
    UpdateInventoryRecord as DbUpdateInventoryRecord,
};
use crate::models::transaction::NewInventoryTransaction as DbNewInventoryTransaction;
use crate::repository::{DieselRepository, InventoryReader, InventoryWriter, page_bounds};

impl InventoryReader for DieselRepository {
    fn get_inventory_by_id(
        &self,
        id: i32,
        location_id: i32,
    ) -> RepositoryResult<Option<DomainInventoryRecord>> {
        use crate::schema::inventory_records;

        let mut conn = self.conn()?;
        let record = inventory_records::table
            .filter(inventory_records::id.eq(id))
            .filter(inventory_records::location_id.eq(location_id))
            .first::<DbInventoryRecord>(&mut conn)
            .optional()?;

        Ok(record.map(DomainInventoryRecord::from))
    }

    fn get_inventory_by_product(
        &self,
        product_id: i32,
        location_id: i32,
    ) -> RepositoryResult<Option<DomainInventoryRecord>> {
        use crate::schema::inventory_records;

        let mut conn = self.conn()?;
        let record = inventory_records::table
            .filter(inventory_records::product_id.eq(product_id))
            .filter(inventory_records::location_id.eq(location_id))
            .first::<DbInventoryRecord>(&mut conn)
            .optional()?;

        Ok(record.map(DomainInventoryRecord::from))
    }

    fn list_inventory(
        &self,
        query: InventoryListQuery,
    ) -> RepositoryResult<(usize, Vec<InventoryItem>)> {
        use crate::schema::{inventory_records, products};

        let mut conn = self.conn()?;

        let mut count_query = inventory_records::table
            .filter(inventory_records::location_id.eq(query.location_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if query.low_stock_only {
            count_query =
                count_query.filter(inventory_records::quantity.le(inventory_records::min_quantity));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = inventory_records::table
            .inner_join(products::table)
            .filter(inventory_records::location_id.eq(query.location_id))
            .select((DbInventoryRecord::as_select(), products::name, products::sku))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if query.low_stock_only {
            items = items.filter(inventory_records::quantity.le(inventory_records::min_quantity));
        }

        items = items.order(products::name.asc());

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = page_bounds(pagination.page, pagination.per_page);
            items = items.offset(offset).limit(limit);
        }

        let rows = items.load::<(DbInventoryRecord, String, String)>(&mut conn)?;

        let items = rows
            .into_iter()
            .map(|(record, name, sku)| InventoryItem::new(record.into(), name, sku))
            .collect();

        Ok((total, items))
    }
}

impl InventoryWriter for DieselRepository {
    fn create_inventory(
        &self,
        new_record: &DomainNewInventoryRecord,
    ) -> RepositoryResult<DomainInventoryRecord> {
        use crate::schema::{inventory_records, inventory_transactions, products};

        let mut conn = self.conn()?;

        conn.transaction::<DomainInventoryRecord, RepositoryError, _>(|conn| {
            let price_cents = products::table
                .filter(products::id.eq(new_record.product_id))
                .filter(products::location_id.eq(new_record.location_id))
                .select(products::price_cents)
                .first::<i64>(conn)?;

            let db_new = DbNewInventoryRecord::from(new_record);
            let created = diesel::insert_into(inventory_records::table)
                .values(&db_new)
                .get_result::<DbInventoryRecord>(conn)?;

            if new_record.quantity > 0 {
                let mut opening = StockMovement::new(
                    new_record.product_id,
                    TransactionKind::In,
                    new_record.quantity,
                    price_cents,
                );
                opening.created_at = new_record.updated_at;

                let db_transaction = DbNewInventoryTransaction::from_movement(
                    new_record.location_id,
                    Some(created.id),
                    &opening,
                );
                diesel::insert_into(inventory_transactions::table)
                    .values(&db_transaction)
                    .execute(conn)?;
            }

            Ok(created.into())
        })
    }

    fn update_inventory(
        &self,
        id: i32,
        location_id: i32,
        updates: &DomainUpdateInventoryRecord,
    ) -> RepositoryResult<DomainInventoryRecord> {
        use crate::schema::{inventory_records, inventory_transactions, products};

        let mut conn = self.conn()?;

        conn.transaction::<DomainInventoryRecord, RepositoryError, _>(|conn| {
            let current = inventory_records::table
                .filter(inventory_records::id.eq(id))
                .filter(inventory_records::location_id.eq(location_id))
                .first::<DbInventoryRecord>(conn)?;

            let changes = DbUpdateInventoryRecord {
                quantity: updates.quantity,
                min_quantity: Some(updates.min_quantity),
                sync_status: SyncStatus::Pending.into(),
                updated_at: updates.updated_at,
            };
            let updated = diesel::update(inventory_records::table.find(current.id))
                .set(&changes)
                .get_result::<DbInventoryRecord>(conn)?;

            let delta = updates.quantity - current.quantity;
            if delta != 0 {
                let price_cents = products::table
                    .find(current.product_id)
                    .select(products::price_cents)
                    .first::<i64>(conn)?;
                let kind = if delta > 0 {
                    TransactionKind::In
                } else {
                    TransactionKind::Out
                };
                let mut adjustment =
                    StockMovement::new(current.product_id, kind, delta.abs(), price_cents);
                adjustment.created_at = updates.updated_at;

                let db_transaction = DbNewInventoryTransaction::from_movement(
                    location_id,
                    Some(current.id),
                    &adjustment,
                );
                diesel::insert_into(inventory_transactions::table)
                    .values(&db_transaction)
                    .execute(conn)?;
            }

            Ok(updated.into())
        })
    }
}
