use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::sale::Sale as DomainSale;
use crate::domain::sync::SyncStatus;
use crate::domain::transaction::InventoryTransaction as DomainInventoryTransaction;
use crate::models::sale::Sale as DbSale;
use crate::models::transaction::InventoryTransaction as DbInventoryTransaction;
use crate::repository::sale::with_items;
use crate::repository::{DieselRepository, SyncQueueReader, SyncQueueWriter};

/// Statuses a sync pass still has to push.
fn unsynced() -> [&'static str; 2] {
    [SyncStatus::Pending.into(), SyncStatus::Error.into()]
}

impl SyncQueueReader for DieselRepository {
    fn list_pending_transactions(
        &self,
        location_id: i32,
    ) -> RepositoryResult<Vec<DomainInventoryTransaction>> {
        use crate::schema::inventory_transactions;

        let mut conn = self.conn()?;
        let rows = inventory_transactions::table
            .filter(inventory_transactions::location_id.eq(location_id))
            .filter(inventory_transactions::sync_status.eq_any(unsynced()))
            .order(inventory_transactions::id.asc())
            .load::<DbInventoryTransaction>(&mut conn)?;

        Ok(rows.into_iter().map(DomainInventoryTransaction::from).collect())
    }

    fn list_pending_sales(&self, location_id: i32) -> RepositoryResult<Vec<DomainSale>> {
        use crate::schema::sales;

        let mut conn = self.conn()?;
        let rows = sales::table
            .filter(sales::location_id.eq(location_id))
            .filter(sales::sync_status.eq_any(unsynced()))
            .order(sales::id.asc())
            .load::<DbSale>(&mut conn)?;

        with_items(&mut conn, rows)
    }
}

impl SyncQueueWriter for DieselRepository {
    fn set_transaction_sync_status(&self, id: i32, status: SyncStatus) -> RepositoryResult<()> {
        use crate::schema::inventory_transactions;

        let mut conn = self.conn()?;
        let updated = diesel::update(inventory_transactions::table.find(id))
            .set(inventory_transactions::sync_status.eq(<&'static str>::from(status)))
            .execute(&mut conn)?;

        if updated == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn set_sale_sync_status(&self, id: i32, status: SyncStatus) -> RepositoryResult<()> {
        use crate::schema::sales;

        let mut conn = self.conn()?;
        let updated = diesel::update(sales::table.find(id))
            .set(sales::sync_status.eq(<&'static str>::from(status)))
            .execute(&mut conn)?;

        if updated == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
