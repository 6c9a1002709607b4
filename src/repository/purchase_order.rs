use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::activity::NewActivity;
use crate::domain::purchase_order::{
    NewPurchaseOrder as DomainNewPurchaseOrder, NewPurchaseOrderItem as DomainNewPurchaseOrderItem,
    PurchaseOrder as DomainPurchaseOrder, PurchaseOrderListQuery, PurchaseOrderStatus,
    ReceivedItem, UpdatePurchaseOrder as DomainUpdatePurchaseOrder,
};
use crate::domain::sync::SyncStatus;
use crate::domain::transaction::{StockMovement, TransactionKind};
use crate::models::purchase_order::{
    NewPurchaseOrder as DbNewPurchaseOrder, NewPurchaseOrderItem as DbNewPurchaseOrderItem,
    PurchaseOrder as DbPurchaseOrder, PurchaseOrderItem as DbPurchaseOrderItem,
    UpdatePurchaseOrder as DbUpdatePurchaseOrder,
    UpdatePurchaseOrderStatus as DbUpdatePurchaseOrderStatus,
};
use crate::repository::stock::{apply_stock_movement, record_activity};
use crate::repository::{
    DieselRepository, PurchaseOrderReader, PurchaseOrderWriter, WriteError, WriteResult,
    page_bounds,
};

fn load_items(
    conn: &mut SqliteConnection,
    order_id: i32,
) -> RepositoryResult<Vec<DbPurchaseOrderItem>> {
    use crate::schema::purchase_order_items;

    Ok(purchase_order_items::table
        .filter(purchase_order_items::purchase_order_id.eq(order_id))
        .order(purchase_order_items::id.asc())
        .load::<DbPurchaseOrderItem>(conn)?)
}

fn insert_items(
    conn: &mut SqliteConnection,
    order_id: i32,
    items: &[DomainNewPurchaseOrderItem],
) -> RepositoryResult<()> {
    use crate::schema::purchase_order_items;

    if items.is_empty() {
        return Ok(());
    }

    let payload: Vec<DbNewPurchaseOrderItem> = items
        .iter()
        .map(|item| DbNewPurchaseOrderItem::from_domain(order_id, item))
        .collect();

    diesel::insert_into(purchase_order_items::table)
        .values(&payload)
        .execute(conn)?;

    Ok(())
}

fn find_order(
    conn: &mut SqliteConnection,
    id: i32,
    location_id: i32,
) -> RepositoryResult<DbPurchaseOrder> {
    use crate::schema::purchase_orders;

    Ok(purchase_orders::table
        .filter(purchase_orders::id.eq(id))
        .filter(purchase_orders::location_id.eq(location_id))
        .first::<DbPurchaseOrder>(conn)?)
}

/// Move the order from `from` to `to`. The update only matches while the
/// order is still in `from`, so of two racing transitions one gets
/// [`WriteError::StatusChanged`].
fn transition_order(
    conn: &mut SqliteConnection,
    id: i32,
    location_id: i32,
    from: PurchaseOrderStatus,
    to: PurchaseOrderStatus,
    updated_at: NaiveDateTime,
) -> WriteResult<DbPurchaseOrder> {
    use crate::schema::purchase_orders;

    let current = find_order(conn, id, location_id)?;
    let changes = DbUpdatePurchaseOrderStatus {
        status: to.into(),
        sync_status: SyncStatus::Pending.into(),
        updated_at,
    };

    diesel::update(
        purchase_orders::table
            .find(current.id)
            .filter(purchase_orders::status.eq(<&'static str>::from(from))),
    )
    .set(&changes)
    .get_result::<DbPurchaseOrder>(conn)
    .optional()?
    .ok_or(WriteError::StatusChanged)
}

impl PurchaseOrderReader for DieselRepository {
    fn get_purchase_order_by_id(
        &self,
        id: i32,
        location_id: i32,
    ) -> RepositoryResult<Option<DomainPurchaseOrder>> {
        use crate::schema::purchase_orders;

        let mut conn = self.conn()?;
        let order = purchase_orders::table
            .filter(purchase_orders::id.eq(id))
            .filter(purchase_orders::location_id.eq(location_id))
            .first::<DbPurchaseOrder>(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = load_items(&mut conn, order.id)?;

        Ok(Some(DomainPurchaseOrder::from((order, items))))
    }

    fn list_purchase_orders(
        &self,
        query: PurchaseOrderListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainPurchaseOrder>)> {
        use crate::schema::purchase_orders;

        let mut conn = self.conn()?;

        let PurchaseOrderListQuery {
            location_id,
            status,
            supplier_id,
            pagination,
        } = query;

        let status_filter: Option<&'static str> = status.map(Into::into);

        let mut count_query = purchase_orders::table
            .filter(purchase_orders::location_id.eq(location_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status_value) = status_filter {
            count_query = count_query.filter(purchase_orders::status.eq(status_value));
        }

        if let Some(supplier) = supplier_id {
            count_query = count_query.filter(purchase_orders::supplier_id.eq(supplier));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = purchase_orders::table
            .filter(purchase_orders::location_id.eq(location_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status_value) = status_filter {
            items = items.filter(purchase_orders::status.eq(status_value));
        }

        if let Some(supplier) = supplier_id {
            items = items.filter(purchase_orders::supplier_id.eq(supplier));
        }

        items = items.order((purchase_orders::created_at.desc(), purchase_orders::id.desc()));

        if let Some(pagination) = pagination {
            let (offset, limit) = page_bounds(pagination.page, pagination.per_page);
            items = items.offset(offset).limit(limit);
        }

        let db_orders = items.load::<DbPurchaseOrder>(&mut conn)?;
        if db_orders.is_empty() {
            return Ok((total, Vec::new()));
        }

        let lines = DbPurchaseOrderItem::belonging_to(&db_orders)
            .order(crate::schema::purchase_order_items::id.asc())
            .load::<DbPurchaseOrderItem>(&mut conn)?
            .grouped_by(&db_orders);

        let orders = db_orders
            .into_iter()
            .zip(lines)
            .map(DomainPurchaseOrder::from)
            .collect();

        Ok((total, orders))
    }
}

impl PurchaseOrderWriter for DieselRepository {
    fn create_purchase_order(
        &self,
        new_order: &DomainNewPurchaseOrder,
        activity: &NewActivity,
    ) -> RepositoryResult<DomainPurchaseOrder> {
        use crate::schema::purchase_orders;

        let mut conn = self.conn()?;

        conn.transaction::<DomainPurchaseOrder, RepositoryError, _>(|conn| {
            let db_new = DbNewPurchaseOrder::from(new_order);
            let created = diesel::insert_into(purchase_orders::table)
                .values(&db_new)
                .get_result::<DbPurchaseOrder>(conn)?;

            insert_items(conn, created.id, &new_order.items)?;
            record_activity(conn, activity, Some(created.id))?;

            let items = load_items(conn, created.id)?;
            Ok(DomainPurchaseOrder::from((created, items)))
        })
    }

    fn update_purchase_order(
        &self,
        id: i32,
        location_id: i32,
        updates: &DomainUpdatePurchaseOrder,
        activity: &NewActivity,
    ) -> WriteResult<DomainPurchaseOrder> {
        use crate::schema::{purchase_order_items, purchase_orders};

        let mut conn = self.conn()?;

        conn.transaction::<DomainPurchaseOrder, WriteError, _>(|conn| {
            let current = find_order(conn, id, location_id)?;

            let db_updates = DbUpdatePurchaseOrder::from(updates);
            let updated = diesel::update(
                purchase_orders::table.find(current.id).filter(
                    purchase_orders::status
                        .eq(<&'static str>::from(PurchaseOrderStatus::Requested)),
                ),
            )
            .set(&db_updates)
            .get_result::<DbPurchaseOrder>(conn)
            .optional()?
            .ok_or(WriteError::StatusChanged)?;

            diesel::delete(
                purchase_order_items::table
                    .filter(purchase_order_items::purchase_order_id.eq(current.id)),
            )
            .execute(conn)?;
            insert_items(conn, current.id, &updates.items)?;

            record_activity(conn, activity, Some(current.id))?;

            let items = load_items(conn, current.id)?;
            Ok(DomainPurchaseOrder::from((updated, items)))
        })
    }

    fn update_purchase_order_status(
        &self,
        id: i32,
        location_id: i32,
        from: PurchaseOrderStatus,
        to: PurchaseOrderStatus,
        activity: &NewActivity,
    ) -> WriteResult<DomainPurchaseOrder> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainPurchaseOrder, WriteError, _>(|conn| {
            let updated = transition_order(conn, id, location_id, from, to, activity.created_at)?;

            record_activity(conn, activity, Some(updated.id))?;

            let items = load_items(conn, updated.id)?;
            Ok(DomainPurchaseOrder::from((updated, items)))
        })
    }

    fn receive_purchase_order(
        &self,
        id: i32,
        location_id: i32,
        received: &[ReceivedItem],
        activity: &NewActivity,
    ) -> WriteResult<DomainPurchaseOrder> {
        use crate::schema::purchase_order_items;

        let mut conn = self.conn()?;

        conn.transaction::<DomainPurchaseOrder, WriteError, _>(|conn| {
            // Claim the order first; a repeated receive stops here.
            let updated = transition_order(
                conn,
                id,
                location_id,
                PurchaseOrderStatus::Approved,
                PurchaseOrderStatus::Received,
                activity.created_at,
            )?;
            let lines = load_items(conn, updated.id)?;
            let reference = format!("PO-{}", updated.id);

            for entry in received {
                let line = lines
                    .iter()
                    .find(|line| line.id == entry.item_id)
                    .ok_or(RepositoryError::NotFound)?;

                diesel::update(purchase_order_items::table.find(line.id))
                    .set(purchase_order_items::quantity_received.eq(entry.quantity_received))
                    .execute(conn)?;

                if entry.quantity_received > 0 {
                    let mut movement = StockMovement::new(
                        line.product_id,
                        TransactionKind::In,
                        entry.quantity_received,
                        line.unit_price_cents,
                    )
                    .with_reference(reference.as_str());
                    movement.created_at = activity.created_at;
                    apply_stock_movement(conn, location_id, &movement)?;
                }
            }

            record_activity(conn, activity, Some(updated.id))?;

            let items = load_items(conn, updated.id)?;
            Ok(DomainPurchaseOrder::from((updated, items)))
        })
    }
}
