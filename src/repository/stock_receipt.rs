use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::stock_receipt::{
    NewStockReceipt as DomainNewStockReceipt, StockReceipt as DomainStockReceipt,
    StockReceiptListQuery,
};
use crate::domain::transaction::{StockMovement, TransactionKind};
use crate::models::stock_receipt::{
    NewStockReceipt as DbNewStockReceipt, NewStockReceiptItem as DbNewStockReceiptItem,
    StockReceipt as DbStockReceipt, StockReceiptItem as DbStockReceiptItem,
};
use crate::repository::stock::apply_stock_movement;
use crate::repository::{
    DieselRepository, StockReceiptReader, StockReceiptWriter, WriteError, WriteResult, page_bounds,
};

impl StockReceiptReader for DieselRepository {
    fn get_stock_receipt_by_id(
        &self,
        id: i32,
        location_id: i32,
    ) -> RepositoryResult<Option<DomainStockReceipt>> {
        use crate::schema::{stock_receipt_items, stock_receipts};

        let mut conn = self.conn()?;
        let receipt = stock_receipts::table
            .filter(stock_receipts::id.eq(id))
            .filter(stock_receipts::location_id.eq(location_id))
            .first::<DbStockReceipt>(&mut conn)
            .optional()?;

        let Some(receipt) = receipt else {
            return Ok(None);
        };

        let items = stock_receipt_items::table
            .filter(stock_receipt_items::stock_receipt_id.eq(receipt.id))
            .order(stock_receipt_items::id.asc())
            .load::<DbStockReceiptItem>(&mut conn)?;

        Ok(Some(receipt.into_domain(items)))
    }

    fn list_stock_receipts(
        &self,
        query: StockReceiptListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainStockReceipt>)> {
        use crate::schema::{stock_receipt_items, stock_receipts};

        let mut conn = self.conn()?;

        let mut count_query = stock_receipts::table
            .filter(stock_receipts::location_id.eq(query.location_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(supplier_id) = query.supplier_id {
            count_query = count_query.filter(stock_receipts::supplier_id.eq(supplier_id));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = stock_receipts::table
            .filter(stock_receipts::location_id.eq(query.location_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(supplier_id) = query.supplier_id {
            items = items.filter(stock_receipts::supplier_id.eq(supplier_id));
        }

        items = items.order((stock_receipts::received_on.desc(), stock_receipts::id.desc()));

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = page_bounds(pagination.page, pagination.per_page);
            items = items.offset(offset).limit(limit);
        }

        let receipts = items.load::<DbStockReceipt>(&mut conn)?;
        if receipts.is_empty() {
            return Ok((total, Vec::new()));
        }

        let lines = DbStockReceiptItem::belonging_to(&receipts)
            .order(stock_receipt_items::id.asc())
            .load::<DbStockReceiptItem>(&mut conn)?
            .grouped_by(&receipts);

        let receipts = receipts
            .into_iter()
            .zip(lines)
            .map(|(receipt, items)| receipt.into_domain(items))
            .collect();

        Ok((total, receipts))
    }
}

impl StockReceiptWriter for DieselRepository {
    fn create_stock_receipt(
        &self,
        new_receipt: &DomainNewStockReceipt,
    ) -> WriteResult<DomainStockReceipt> {
        use crate::schema::{stock_receipt_items, stock_receipts};

        let mut conn = self.conn()?;

        conn.transaction::<DomainStockReceipt, WriteError, _>(|conn| {
            let db_new = DbNewStockReceipt::from(new_receipt);
            let created = diesel::insert_into(stock_receipts::table)
                .values(&db_new)
                .get_result::<DbStockReceipt>(conn)?;

            let payload: Vec<DbNewStockReceiptItem> = new_receipt
                .items
                .iter()
                .map(|item| DbNewStockReceiptItem::from_domain(created.id, item))
                .collect();
            diesel::insert_into(stock_receipt_items::table)
                .values(&payload)
                .execute(conn)?;

            for item in &new_receipt.items {
                let mut movement = StockMovement::new(
                    item.product_id,
                    TransactionKind::In,
                    item.quantity,
                    item.unit_price_cents,
                )
                .with_reference(new_receipt.invoice_number.as_str());
                movement.created_at = new_receipt.created_at;
                apply_stock_movement(conn, new_receipt.location_id, &movement)?;
            }

            let items = stock_receipt_items::table
                .filter(stock_receipt_items::stock_receipt_id.eq(created.id))
                .order(stock_receipt_items::id.asc())
                .load::<DbStockReceiptItem>(conn)?;

            Ok(created.into_domain(items))
        })
    }
}
