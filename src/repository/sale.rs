use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::sale::{
    NewSale as DomainNewSale, Sale as DomainSale, SaleListQuery, sale_reference,
};
use crate::domain::transaction::{StockMovement, TransactionKind};
use crate::models::sale::{
    NewSale as DbNewSale, NewSaleItem as DbNewSaleItem, Sale as DbSale, SaleItem as DbSaleItem,
};
use crate::repository::stock::apply_stock_movement;
use crate::repository::{
    DieselRepository, SaleReader, SaleWriter, WriteError, WriteResult, page_bounds,
};
use crate::schema::{sale_items, sales};

fn filtered(query: &SaleListQuery) -> sales::BoxedQuery<'static, Sqlite> {
    let mut items = sales::table
        .filter(sales::location_id.eq(query.location_id))
        .into_boxed::<Sqlite>();

    if let Some(customer_id) = query.customer_id {
        items = items.filter(sales::customer_id.eq(customer_id));
    }

    if let Some(from) = query.from {
        items = items.filter(sales::created_at.ge(from));
    }

    if let Some(to) = query.to {
        items = items.filter(sales::created_at.le(to));
    }

    items
}

/// Attach the lines of every sale in `db_sales`.
pub(crate) fn with_items(
    conn: &mut SqliteConnection,
    db_sales: Vec<DbSale>,
) -> RepositoryResult<Vec<DomainSale>> {
    if db_sales.is_empty() {
        return Ok(Vec::new());
    }

    let lines = DbSaleItem::belonging_to(&db_sales)
        .order(sale_items::id.asc())
        .load::<DbSaleItem>(conn)?
        .grouped_by(&db_sales);

    Ok(db_sales
        .into_iter()
        .zip(lines)
        .map(DomainSale::from)
        .collect())
}

impl SaleReader for DieselRepository {
    fn get_sale_by_id(&self, id: i32, location_id: i32) -> RepositoryResult<Option<DomainSale>> {
        let mut conn = self.conn()?;
        let sale = sales::table
            .filter(sales::id.eq(id))
            .filter(sales::location_id.eq(location_id))
            .first::<DbSale>(&mut conn)
            .optional()?;

        let Some(sale) = sale else {
            return Ok(None);
        };

        Ok(with_items(&mut conn, vec![sale])?.pop())
    }

    fn list_sales(&self, query: SaleListQuery) -> RepositoryResult<(usize, Vec<DomainSale>)> {
        let mut conn = self.conn()?;

        let total = filtered(&query).count().get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered(&query).order((sales::created_at.desc(), sales::id.desc()));

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = page_bounds(pagination.page, pagination.per_page);
            items = items.offset(offset).limit(limit);
        }

        let db_sales = items.load::<DbSale>(&mut conn)?;

        Ok((total, with_items(&mut conn, db_sales)?))
    }
}

impl SaleWriter for DieselRepository {
    fn create_sale(&self, new_sale: &DomainNewSale) -> WriteResult<DomainSale> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainSale, WriteError, _>(|conn| {
            let db_new = DbNewSale::from(new_sale);
            let created = diesel::insert_into(sales::table)
                .values(&db_new)
                .get_result::<DbSale>(conn)?;

            let payload: Vec<DbNewSaleItem> = new_sale
                .items
                .iter()
                .map(|item| DbNewSaleItem::from_domain(created.id, item))
                .collect();
            diesel::insert_into(sale_items::table)
                .values(&payload)
                .execute(conn)?;

            let reference = sale_reference(created.id);
            for item in &new_sale.items {
                let mut movement = StockMovement::new(
                    item.product_id,
                    TransactionKind::Sale,
                    item.quantity,
                    item.price_cents,
                )
                .with_reference(reference.as_str());
                movement.created_at = new_sale.created_at;
                apply_stock_movement(conn, new_sale.location_id, &movement)?;
            }

            let items = sale_items::table
                .filter(sale_items::sale_id.eq(created.id))
                .order(sale_items::id.asc())
                .load::<DbSaleItem>(conn)?;

            Ok(DomainSale::from((created, items)))
        })
    }
}
