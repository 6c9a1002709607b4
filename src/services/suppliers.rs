use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use serde::Deserialize;

use crate::domain::activity::{ActivityAction, NewActivity};
use crate::domain::station::Station;
use crate::domain::supplier::{Supplier, SupplierListQuery};
use crate::forms::suppliers::{AddSupplierForm, EditSupplierForm};
use crate::repository::{SupplierReader, SupplierWriter};
use crate::services::{ServiceError, ServiceResult};

#[derive(Debug, Default, Deserialize)]
pub struct SuppliersQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
}

/// Suppliers of the location, preferred ones first.
pub fn list_suppliers<R>(
    repo: &R,
    station: &Station,
    query: SuppliersQuery,
) -> ServiceResult<Paginated<Supplier>>
where
    R: SupplierReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let mut list_query =
        SupplierListQuery::new(station.location_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = query.search.as_deref().map(str::trim).filter(|term| !term.is_empty()) {
        list_query = list_query.search(term);
    }

    let (total, suppliers) = repo.list_suppliers(list_query).map_err(ServiceError::from)?;

    Ok(Paginated::new(
        suppliers,
        page,
        total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
    ))
}

pub fn get_supplier<R>(repo: &R, station: &Station, supplier_id: i32) -> ServiceResult<Supplier>
where
    R: SupplierReader + ?Sized,
{
    repo.get_supplier_by_id(supplier_id, station.location_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_supplier<R>(
    repo: &R,
    station: &Station,
    form: AddSupplierForm,
) -> ServiceResult<Supplier>
where
    R: SupplierWriter + ?Sized,
{
    let new_supplier = form
        .into_new_supplier(station.location_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let activity = NewActivity::new(station, ActivityAction::SupplierAdded);
    repo.create_supplier(&new_supplier, &activity)
        .map_err(ServiceError::from)
}

pub fn update_supplier<R>(
    repo: &R,
    station: &Station,
    supplier_id: i32,
    form: EditSupplierForm,
) -> ServiceResult<Supplier>
where
    R: SupplierReader + SupplierWriter + ?Sized,
{
    let updates = form
        .into_update_supplier()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    get_supplier(repo, station, supplier_id)?;

    let activity =
        NewActivity::new(station, ActivityAction::SupplierEdited).with_subject(supplier_id);
    repo.update_supplier(supplier_id, station.location_id, &updates, &activity)
        .map_err(ServiceError::from)
}
