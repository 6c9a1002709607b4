use crate::domain::location::{Location, NewLocation};
use crate::forms::locations::{AddLocationForm, EditLocationForm};
use crate::repository::{LocationReader, LocationWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn list_locations<R>(repo: &R) -> ServiceResult<Vec<Location>>
where
    R: LocationReader + ?Sized,
{
    repo.list_locations().map_err(ServiceError::from)
}

pub fn create_location<R>(repo: &R, form: AddLocationForm) -> ServiceResult<Location>
where
    R: LocationWriter + ?Sized,
{
    let new_location = form
        .into_new_location()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_location(&new_location)
        .map_err(ServiceError::from)
}

pub fn update_location<R>(repo: &R, id: i32, form: EditLocationForm) -> ServiceResult<Location>
where
    R: LocationReader + LocationWriter + ?Sized,
{
    let updates = form
        .into_update_location()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo.get_location_by_id(id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    repo.update_location(id, &updates)
        .map_err(ServiceError::from)
}

/// Resolve the location the station runs at.
///
/// Returns the location with `location_id` when it exists. A fresh store gets
/// a first location named `name`, whose id may differ from `location_id`.
/// A store that has other locations but not the configured one is an error.
pub fn ensure_station_location<R>(repo: &R, location_id: i32, name: &str) -> ServiceResult<Location>
where
    R: LocationReader + LocationWriter + ?Sized,
{
    if let Some(location) = repo.get_location_by_id(location_id)? {
        return Ok(location);
    }

    if !repo.list_locations()?.is_empty() {
        log::error!("Configured location {location_id} does not exist");
        return Err(ServiceError::NotFound);
    }

    let location = repo
        .create_location(&NewLocation::new(name))
        .map_err(ServiceError::from)?;
    log::info!("Created location {} `{}`", location.id, location.name);

    Ok(location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::sync::SyncStatus;
    use crate::repository::mock::MockLocationRepo;

    fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2024, 1, 1) {
            Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            None => NaiveDateTime::default(),
        }
    }

    fn sample_location(id: i32, name: &str) -> Location {
        Location {
            id,
            name: name.to_string(),
            email: None,
            is_active: true,
            sync_status: SyncStatus::Pending,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    #[test]
    fn ensure_station_location_returns_existing() {
        let mut repo = MockLocationRepo::new();
        repo.expect_get_location_by_id()
            .withf(|id| *id == 3)
            .returning(|_| Ok(Some(sample_location(3, "Shop"))));
        repo.expect_create_location().never();

        let location = ensure_station_location(&repo, 3, "Main").expect("expected success");

        assert_eq!(location.id, 3);
    }

    #[test]
    fn ensure_station_location_seeds_empty_store() {
        let mut repo = MockLocationRepo::new();
        repo.expect_get_location_by_id().returning(|_| Ok(None));
        repo.expect_list_locations().returning(|| Ok(vec![]));
        repo.expect_create_location()
            .times(1)
            .withf(|new_location| new_location.name == "Main")
            .returning(|_| Ok(sample_location(1, "Main")));

        let location = ensure_station_location(&repo, 1, "Main").expect("expected success");

        assert_eq!(location.name, "Main");
    }

    #[test]
    fn ensure_station_location_rejects_unknown_id_in_used_store() {
        let mut repo = MockLocationRepo::new();
        repo.expect_get_location_by_id().returning(|_| Ok(None));
        repo.expect_list_locations()
            .returning(|| Ok(vec![sample_location(1, "Other")]));
        repo.expect_create_location().never();

        let result = ensure_station_location(&repo, 7, "Main");

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn update_location_requires_existing_record() {
        let mut repo = MockLocationRepo::new();
        repo.expect_get_location_by_id().returning(|_| Ok(None));
        repo.expect_update_location().never();

        let form = EditLocationForm {
            name: "Main".to_string(),
            email: None,
            is_active: true,
        };

        let result = update_location(&repo, 5, form);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
