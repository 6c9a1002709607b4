use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::location::{
    Location as DomainLocation, NewLocation as DomainNewLocation,
    UpdateLocation as DomainUpdateLocation,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::locations)]
pub struct Location {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub is_active: bool,
    pub sync_status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::locations)]
pub struct NewLocation<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::locations)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateLocation<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl From<Location> for DomainLocation {
    fn from(value: Location) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            is_active: value.is_active,
            sync_status: value.sync_status.as_str().into(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewLocation> for NewLocation<'a> {
    fn from(value: &'a DomainNewLocation) -> Self {
        Self {
            name: value.name.as_str(),
            email: value.email.as_deref(),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateLocation> for UpdateLocation<'a> {
    fn from(value: &'a DomainUpdateLocation) -> Self {
        Self {
            name: value.name.as_str(),
            email: value.email.as_deref(),
            is_active: value.is_active,
            updated_at: value.updated_at,
        }
    }
}
