use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use serde::Deserialize;

use crate::domain::activity::{Activity, ActivityListQuery};
use crate::domain::station::Station;
use crate::repository::ActivityReader;
use crate::services::{ServiceError, ServiceResult};

#[derive(Debug, Default, Deserialize)]
pub struct ActivitiesQuery {
    pub page: Option<usize>,
}

/// Activity log of the location, newest first.
pub fn list_activities<R>(
    repo: &R,
    station: &Station,
    query: ActivitiesQuery,
) -> ServiceResult<Paginated<Activity>>
where
    R: ActivityReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let list_query =
        ActivityListQuery::new(station.location_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let (total, activities) = repo
        .list_activities(list_query)
        .map_err(ServiceError::from)?;

    Ok(Paginated::new(
        activities,
        page,
        total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
    ))
}
