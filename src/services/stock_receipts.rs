use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use serde::Deserialize;

use crate::domain::station::Station;
use crate::domain::stock_receipt::{StockReceipt, StockReceiptListQuery};
use crate::forms::stock_receipts::AddStockReceiptForm;
use crate::repository::{ProductReader, StockReceiptReader, StockReceiptWriter, SupplierReader};
use crate::services::{ServiceError, ServiceResult};

#[derive(Debug, Default, Deserialize)]
pub struct StockReceiptsQuery {
    pub supplier_id: Option<i32>,
    pub page: Option<usize>,
}

pub fn list_stock_receipts<R>(
    repo: &R,
    station: &Station,
    query: StockReceiptsQuery,
) -> ServiceResult<Paginated<StockReceipt>>
where
    R: StockReceiptReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let mut list_query =
        StockReceiptListQuery::new(station.location_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(supplier_id) = query.supplier_id {
        list_query = list_query.supplier_id(supplier_id);
    }

    let (total, receipts) = repo
        .list_stock_receipts(list_query)
        .map_err(ServiceError::from)?;

    Ok(Paginated::new(
        receipts,
        page,
        total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
    ))
}

pub fn get_stock_receipt<R>(
    repo: &R,
    station: &Station,
    receipt_id: i32,
) -> ServiceResult<StockReceipt>
where
    R: StockReceiptReader + ?Sized,
{
    repo.get_stock_receipt_by_id(receipt_id, station.location_id)?
        .ok_or(ServiceError::NotFound)
}

/// Records delivered goods and adds them to inventory.
pub fn create_stock_receipt<R>(
    repo: &R,
    station: &Station,
    form: AddStockReceiptForm,
) -> ServiceResult<StockReceipt>
where
    R: StockReceiptWriter + SupplierReader + ProductReader + ?Sized,
{
    let new_receipt = form
        .into_new_stock_receipt(station.location_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo
        .get_supplier_by_id(new_receipt.supplier_id, station.location_id)?
        .is_none()
    {
        return Err(ServiceError::Form(format!(
            "supplier {} does not exist",
            new_receipt.supplier_id
        )));
    }
    for item in &new_receipt.items {
        if repo
            .get_product_by_id(item.product_id, station.location_id)?
            .is_none()
        {
            return Err(ServiceError::Form(format!(
                "product {} does not exist",
                item.product_id
            )));
        }
    }

    repo.create_stock_receipt(&new_receipt)
        .map_err(ServiceError::from)
}
