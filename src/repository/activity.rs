use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::activity::{Activity as DomainActivity, ActivityListQuery};
use crate::models::activity::Activity as DbActivity;
use crate::repository::{ActivityReader, DieselRepository, page_bounds};

impl ActivityReader for DieselRepository {
    fn list_activities(
        &self,
        query: ActivityListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainActivity>)> {
        use crate::schema::activities;

        let mut conn = self.conn()?;

        let total = activities::table
            .filter(activities::location_id.eq(query.location_id))
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = activities::table
            .filter(activities::location_id.eq(query.location_id))
            .order((activities::created_at.desc(), activities::id.desc()))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = page_bounds(pagination.page, pagination.per_page);
            items = items.offset(offset).limit(limit);
        }

        let rows = items.load::<DbActivity>(&mut conn)?;

        Ok((total, rows.into_iter().map(DomainActivity::from).collect()))
    }
}
