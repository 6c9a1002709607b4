use chrono::{NaiveDate, NaiveTime};
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use serde::Deserialize;

use crate::domain::sale::{Cart, Sale, SaleListQuery};
use crate::domain::station::Station;
use crate::forms::sales::CheckoutForm;
use crate::repository::{CustomerReader, InventoryReader, ProductReader, SaleReader, SaleWriter};
use crate::services::{ServiceError, ServiceResult};

#[derive(Debug, Default, Deserialize)]
pub struct SalesQuery {
    pub from: Option<NaiveDate>,
    /// Inclusive through the end of the day.
    pub to: Option<NaiveDate>,
    pub customer_id: Option<i32>,
    pub page: Option<usize>,
}

/// Sales of the location, newest first.
pub fn list_sales<R>(
    repo: &R,
    station: &Station,
    query: SalesQuery,
) -> ServiceResult<Paginated<Sale>>
where
    R: SaleReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let mut list_query =
        SaleListQuery::new(station.location_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if query.from.is_some() || query.to.is_some() {
        let from = query.from.unwrap_or(NaiveDate::MIN);
        let to = query.to.unwrap_or(NaiveDate::MAX);
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        list_query = list_query.between(from.and_time(NaiveTime::MIN), to.and_time(end_of_day));
    }
    if let Some(customer_id) = query.customer_id {
        list_query = list_query.customer_id(customer_id);
    }

    let (total, sales) = repo.list_sales(list_query).map_err(ServiceError::from)?;

    Ok(Paginated::new(
        sales,
        page,
        total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
    ))
}

pub fn get_sale<R>(repo: &R, station: &Station, sale_id: i32) -> ServiceResult<Sale>
where
    R: SaleReader + ?Sized,
{
    repo.get_sale_by_id(sale_id, station.location_id)?
        .ok_or(ServiceError::NotFound)
}

/// Turns the submitted cart into a sale. Prices are taken from the product
/// records and every line must be covered by the stock on hand.
pub fn checkout<R>(repo: &R, station: &Station, form: CheckoutForm) -> ServiceResult<Sale>
where
    R: SaleWriter + ProductReader + InventoryReader + CustomerReader + ?Sized,
{
    let payload = form
        .into_payload()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if let Some(customer_id) = payload.customer_id
        && repo
            .get_customer_by_id(customer_id, station.location_id)?
            .is_none()
    {
        return Err(ServiceError::Form(format!(
            "customer {customer_id} does not exist"
        )));
    }

    let mut cart = Cart::new();
    for (product_id, quantity) in payload.lines {
        let product = match repo.get_product_by_id(product_id, station.location_id)? {
            Some(product) if !product.is_archived => product,
            _ => {
                return Err(ServiceError::Form(format!(
                    "product {product_id} is not for sale"
                )));
            }
        };

        let available = repo
            .get_inventory_by_product(product_id, station.location_id)?
            .map_or(0, |record| record.quantity);
        if available < quantity {
            return Err(ServiceError::Form(format!(
                "insufficient stock for `{}`: {available} available, {quantity} requested",
                product.name
            )));
        }

        cart.add(&product);
        cart.update_quantity(product_id, quantity);
    }
    cart.customer_id = payload.customer_id;
    cart.payment_method = payload.payment_method;

    let sale = repo
        .create_sale(&cart.to_new_sale(station.location_id))
        .map_err(ServiceError::from)?;
    log::info!("Recorded sale {} totalling {} cents", sale.reference(), sale.total_cents);

    Ok(sale)
}
