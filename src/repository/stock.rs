//! Write helpers shared by every repository that touches stock or the
//! activity log. They take an open connection so callers can run them
//! inside their own transaction.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::activity::NewActivity as DomainNewActivity;
use crate::domain::sync::SyncStatus;
use crate::domain::transaction::StockMovement;
use crate::models::activity::NewActivity as DbNewActivity;
use crate::models::inventory::{
    InventoryRecord as DbInventoryRecord, NewInventoryRecord as DbNewInventoryRecord,
    UpdateInventoryRecord as DbUpdateInventoryRecord,
};
use crate::models::transaction::NewInventoryTransaction as DbNewInventoryTransaction;
use crate::repository::{WriteError, WriteResult};

/// Append `activity`, naming `subject_id` when the activity has no subject yet.
pub(crate) fn record_activity(
    conn: &mut SqliteConnection,
    activity: &DomainNewActivity,
    subject_id: Option<i32>,
) -> RepositoryResult<()> {
    use crate::schema::activities;

    let db_new = DbNewActivity::from_domain(activity, subject_id);
    diesel::insert_into(activities::table)
        .values(&db_new)
        .execute(conn)?;

    Ok(())
}

/// Apply `movement` to the product's inventory record at `location_id` and
/// log it.
///
/// Incoming movements create the record when the product is not tracked yet,
/// using the product's reorder threshold. Outgoing movements require enough
/// stock on the existing record.
pub(crate) fn apply_stock_movement(
    conn: &mut SqliteConnection,
    location_id: i32,
    movement: &StockMovement,
) -> WriteResult<DbInventoryRecord> {
    use crate::schema::{inventory_records, inventory_transactions, products};

    let existing = inventory_records::table
        .filter(inventory_records::location_id.eq(location_id))
        .filter(inventory_records::product_id.eq(movement.product_id))
        .first::<DbInventoryRecord>(conn)
        .optional()?;

    let record = match existing {
        Some(record) => {
            let quantity = record
                .quantity
                .checked_add(movement.kind.signed(movement.quantity))
                .ok_or(WriteError::QuantityOverflow {
                    product_id: movement.product_id,
                })?;
            if quantity < 0 {
                return Err(WriteError::InsufficientStock {
                    product_id: movement.product_id,
                    available: record.quantity,
                    requested: movement.quantity,
                });
            }
            let changes = DbUpdateInventoryRecord {
                quantity,
                min_quantity: None,
                sync_status: SyncStatus::Pending.into(),
                updated_at: movement.created_at,
            };
            diesel::update(inventory_records::table.find(record.id))
                .set(&changes)
                .get_result::<DbInventoryRecord>(conn)?
        }
        None if movement.kind.is_outgoing() => {
            return Err(WriteError::InsufficientStock {
                product_id: movement.product_id,
                available: 0,
                requested: movement.quantity,
            });
        }
        None => {
            let min_quantity = products::table
                .filter(products::id.eq(movement.product_id))
                .filter(products::location_id.eq(location_id))
                .select(products::min_quantity)
                .first::<i32>(conn)?;
            let db_new = DbNewInventoryRecord {
                location_id,
                product_id: movement.product_id,
                quantity: movement.quantity,
                min_quantity,
                updated_at: movement.created_at,
            };
            diesel::insert_into(inventory_records::table)
                .values(&db_new)
                .get_result::<DbInventoryRecord>(conn)?
        }
    };

    let db_transaction =
        DbNewInventoryTransaction::from_movement(location_id, Some(record.id), movement);
    diesel::insert_into(inventory_transactions::table)
        .values(&db_transaction)
        .execute(conn)?;

    Ok(record)
}
