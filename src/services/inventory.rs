use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use serde::Deserialize;

use crate::domain::inventory::{InventoryItem, InventoryListQuery, InventoryRecord};
use crate::domain::station::Station;
use crate::forms::inventory::{AddInventoryForm, EditInventoryForm};
use crate::repository::{InventoryReader, InventoryWriter, ProductReader};
use crate::services::{ServiceError, ServiceResult};

#[derive(Debug, Default, Deserialize)]
pub struct InventoryQuery {
    pub page: Option<usize>,
    /// Only records at or below their reorder threshold.
    #[serde(default)]
    pub low_stock_only: bool,
}

pub fn list_inventory<R>(
    repo: &R,
    station: &Station,
    query: InventoryQuery,
) -> ServiceResult<Paginated<InventoryItem>>
where
    R: InventoryReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let mut list_query =
        InventoryListQuery::new(station.location_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if query.low_stock_only {
        list_query = list_query.low_stock_only();
    }

    let (total, items) = repo.list_inventory(list_query).map_err(ServiceError::from)?;

    Ok(Paginated::new(
        items,
        page,
        total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
    ))
}

/// Start tracking a product. The opening quantity is logged as an `in`
/// transaction by the store.
pub fn add_inventory<R>(
    repo: &R,
    station: &Station,
    form: AddInventoryForm,
) -> ServiceResult<InventoryRecord>
where
    R: InventoryReader + InventoryWriter + ProductReader + ?Sized,
{
    let new_record = form
        .into_new_inventory(station.location_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let Some(product) = repo.get_product_by_id(new_record.product_id, station.location_id)? else {
        return Err(ServiceError::Form(format!(
            "product {} does not exist",
            new_record.product_id
        )));
    };

    if repo
        .get_inventory_by_product(product.id, station.location_id)?
        .is_some()
    {
        return Err(ServiceError::Form(format!(
            "`{}` is already in inventory",
            product.name
        )));
    }

    repo.create_inventory(&new_record)
        .map_err(ServiceError::from)
}

/// Correct the counted quantity and reorder threshold of a record.
pub fn update_inventory<R>(
    repo: &R,
    station: &Station,
    inventory_id: i32,
    form: EditInventoryForm,
) -> ServiceResult<InventoryRecord>
where
    R: InventoryReader + InventoryWriter + ?Sized,
{
    let updates = form
        .into_update_inventory()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if updates.quantity < 0 {
        return Err(ServiceError::Form(
            "quantity cannot be negative".to_string(),
        ));
    }

    if repo
        .get_inventory_by_id(inventory_id, station.location_id)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    repo.update_inventory(inventory_id, station.location_id, &updates)
        .map_err(ServiceError::from)
}
