use std::collections::HashSet;

use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use serde::Deserialize;

use crate::domain::activity::{ActivityAction, NewActivity};
use crate::domain::product::{Product, ProductListQuery};
use crate::domain::station::Station;
use crate::forms::products::{AddProductForm, EditProductForm, UploadProductsForm};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the products listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Matches product names and SKUs.
    pub search: Option<String>,
    /// Page requested by the UI (1-based).
    pub page: Option<usize>,
    /// Whether archived items should be included in the response.
    #[serde(default)]
    pub show_archived: bool,
}

pub fn list_products<R>(
    repo: &R,
    station: &Station,
    query: ProductsQuery,
) -> ServiceResult<Paginated<Product>>
where
    R: ProductReader + ?Sized,
{
    let ProductsQuery {
        search,
        page,
        show_archived,
    } = query;

    let page = page.unwrap_or(1);
    let mut list_query =
        ProductListQuery::new(station.location_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(term) = search.as_deref().map(str::trim).filter(|term| !term.is_empty()) {
        list_query = list_query.search(term);
    }
    if show_archived {
        list_query = list_query.include_archived();
    }

    let (total, items) = repo.list_products(list_query).map_err(ServiceError::from)?;

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    Ok(Paginated::new(items, page, total_pages))
}

pub fn get_product<R>(repo: &R, station: &Station, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id, station.location_id)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a product after checking its SKU is free at the location.
pub fn create_product<R>(
    repo: &R,
    station: &Station,
    form: AddProductForm,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let new_product = form
        .into_new_product(station.location_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_sku_available(repo, station, &new_product.sku, None)?;

    let activity = NewActivity::new(station, ActivityAction::ProductAdded);
    repo.create_product(&new_product, &activity)
        .map_err(ServiceError::from)
}

pub fn update_product<R>(
    repo: &R,
    station: &Station,
    product_id: i32,
    form: EditProductForm,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let updates = form
        .into_update_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo
        .get_product_by_id(product_id, station.location_id)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }
    ensure_sku_available(repo, station, &updates.sku, Some(product_id))?;

    let activity =
        NewActivity::new(station, ActivityAction::ProductEdited).with_subject(product_id);
    repo.update_product(product_id, station.location_id, &updates, &activity)
        .map_err(ServiceError::from)
}

/// Imports products from an uploaded CSV file. Nothing is stored when any
/// row is invalid or reuses a SKU.
pub fn import_products<R>(
    repo: &R,
    station: &Station,
    mut form: UploadProductsForm,
) -> ServiceResult<usize>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let new_products = form
        .parse(station.location_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let mut seen = HashSet::new();
    for product in &new_products {
        if !seen.insert(product.sku.as_str()) {
            return Err(ServiceError::Form(format!(
                "SKU `{}` appears more than once in the upload",
                product.sku
            )));
        }
        ensure_sku_available(repo, station, &product.sku, None)?;
    }

    let activity = NewActivity::new(station, ActivityAction::ProductsImported);
    let created = repo
        .import_products(&new_products, &activity)
        .map_err(ServiceError::from)?;
    log::info!("Imported {created} products");

    Ok(created)
}

fn ensure_sku_available<R>(
    repo: &R,
    station: &Station,
    sku: &str,
    product_id: Option<i32>,
) -> ServiceResult<()>
where
    R: ProductReader + ?Sized,
{
    match repo.get_product_by_sku(sku, station.location_id)? {
        Some(existing) if Some(existing.id) != product_id => Err(ServiceError::Form(format!(
            "SKU `{sku}` is already used by `{}`",
            existing.name
        ))),
        _ => Ok(()),
    }
}
