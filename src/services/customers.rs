use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use serde::Deserialize;

use crate::domain::activity::{ActivityAction, NewActivity};
use crate::domain::customer::{Customer, CustomerListQuery};
use crate::domain::station::Station;
use crate::forms::customers::{AddCustomerForm, EditCustomerForm};
use crate::repository::{CustomerReader, CustomerWriter};
use crate::services::{ServiceError, ServiceResult};

#[derive(Debug, Default, Deserialize)]
pub struct CustomersQuery {
    /// Matches names, emails and phone numbers.
    pub search: Option<String>,
    pub page: Option<usize>,
}

pub fn list_customers<R>(
    repo: &R,
    station: &Station,
    query: CustomersQuery,
) -> ServiceResult<Paginated<Customer>>
where
    R: CustomerReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let mut list_query =
        CustomerListQuery::new(station.location_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = query.search.as_deref().map(str::trim).filter(|term| !term.is_empty()) {
        list_query = list_query.search(term);
    }

    let (total, customers) = repo.list_customers(list_query).map_err(ServiceError::from)?;

    Ok(Paginated::new(
        customers,
        page,
        total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
    ))
}

pub fn get_customer<R>(repo: &R, station: &Station, customer_id: i32) -> ServiceResult<Customer>
where
    R: CustomerReader + ?Sized,
{
    repo.get_customer_by_id(customer_id, station.location_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_customer<R>(
    repo: &R,
    station: &Station,
    form: AddCustomerForm,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    let new_customer = form
        .into_new_customer(station.location_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let activity = NewActivity::new(station, ActivityAction::CustomerAdded);
    repo.create_customer(&new_customer, &activity)
        .map_err(ServiceError::from)
}

pub fn update_customer<R>(
    repo: &R,
    station: &Station,
    customer_id: i32,
    form: EditCustomerForm,
) -> ServiceResult<Customer>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let updates = form
        .into_update_customer()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    get_customer(repo, station, customer_id)?;

    let activity =
        NewActivity::new(station, ActivityAction::CustomerEdited).with_subject(customer_id);
    repo.update_customer(customer_id, station.location_id, &updates, &activity)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::sync::SyncStatus;
    use crate::repository::mock::MockCustomerRepo;

    fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2024, 1, 1) {
            Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            None => NaiveDateTime::default(),
        }
    }

    fn sample_customer(id: i32, name: &str) -> Customer {
        Customer {
            id,
            location_id: 1,
            name: name.to_string(),
            email: None,
            phone: None,
            is_active: true,
            sync_status: SyncStatus::Pending,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    #[test]
    fn list_customers_passes_search() {
        let mut repo = MockCustomerRepo::new();
        repo.expect_list_customers()
            .times(1)
            .withf(|query| query.location_id == 1 && query.search.as_deref() == Some("ada"))
            .returning(|_| Ok((1, vec![sample_customer(1, "Ada")])));

        let query = CustomersQuery {
            search: Some("ada".to_string()),
            page: None,
        };

        let result = list_customers(&repo, &Station::new(1, ""), query);

        assert!(result.is_ok());
    }

    #[test]
    fn create_customer_logs_activity() {
        let mut repo = MockCustomerRepo::new();
        repo.expect_create_customer()
            .times(1)
            .withf(|customer, activity| {
                customer.name == "Ada Eze" && activity.action == ActivityAction::CustomerAdded
            })
            .returning(|_, _| Ok(sample_customer(5, "Ada Eze")));

        let form = AddCustomerForm {
            name: " Ada  Eze ".to_string(),
            email: None,
            phone: None,
        };

        let customer =
            create_customer(&repo, &Station::new(1, "till"), form).expect("expected success");

        assert_eq!(customer.id, 5);
    }

    #[test]
    fn get_customer_maps_missing_to_not_found() {
        let mut repo = MockCustomerRepo::new();
        repo.expect_get_customer_by_id().returning(|_, _| Ok(None));

        let result = get_customer(&repo, &Station::new(1, ""), 99);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
