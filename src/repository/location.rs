use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::location::{
    Location as DomainLocation, NewLocation as DomainNewLocation,
    UpdateLocation as DomainUpdateLocation,
};
use crate::models::location::{
    Location as DbLocation, NewLocation as DbNewLocation, UpdateLocation as DbUpdateLocation,
};
use crate::repository::{DieselRepository, LocationReader, LocationWriter};

impl LocationReader for DieselRepository {
    fn get_location_by_id(&self, id: i32) -> RepositoryResult<Option<DomainLocation>> {
        use crate::schema::locations;

        let mut conn = self.conn()?;
        let location = locations::table
            .find(id)
            .first::<DbLocation>(&mut conn)
            .optional()?;

        Ok(location.map(DomainLocation::from))
    }

    fn list_locations(&self) -> RepositoryResult<Vec<DomainLocation>> {
        use crate::schema::locations;

        let mut conn = self.conn()?;
        let items = locations::table
            .order(locations::name.asc())
            .load::<DbLocation>(&mut conn)?;

        Ok(items.into_iter().map(DomainLocation::from).collect())
    }
}

impl LocationWriter for DieselRepository {
    fn create_location(
        &self,
        new_location: &DomainNewLocation,
    ) -> RepositoryResult<DomainLocation> {
        use crate::schema::locations;

        let mut conn = self.conn()?;
        let db_new = DbNewLocation::from(new_location);

        let created = diesel::insert_into(locations::table)
            .values(&db_new)
            .get_result::<DbLocation>(&mut conn)?;

        Ok(created.into())
    }

    fn update_location(
        &self,
        id: i32,
        updates: &DomainUpdateLocation,
    ) -> RepositoryResult<DomainLocation> {
        use crate::schema::locations;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateLocation::from(updates);

        let updated = diesel::update(locations::table.find(id))
            .set(&db_updates)
            .get_result::<DbLocation>(&mut conn)?;

        Ok(updated.into())
    }
}
