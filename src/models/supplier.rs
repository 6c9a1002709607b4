use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::supplier::{
    NewSupplier as DomainNewSupplier, Supplier as DomainSupplier,
    UpdateSupplier as DomainUpdateSupplier,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::suppliers)]
pub struct Supplier {
    pub id: i32,
    pub location_id: i32,
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub website: Option<String>,
    pub payment_terms: String,
    pub is_preferred: bool,
    pub is_active: bool,
    pub sync_status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::suppliers)]
pub struct NewSupplier<'a> {
    pub location_id: i32,
    pub name: &'a str,
    pub contact_person: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub website: Option<&'a str>,
    pub payment_terms: &'static str,
    pub is_preferred: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::suppliers)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateSupplier<'a> {
    pub name: &'a str,
    pub contact_person: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub website: Option<&'a str>,
    pub payment_terms: &'static str,
    pub is_preferred: bool,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl From<Supplier> for DomainSupplier {
    fn from(value: Supplier) -> Self {
        Self {
            id: value.id,
            location_id: value.location_id,
            name: value.name,
            contact_person: value.contact_person,
            email: value.email,
            phone: value.phone,
            address: value.address,
            website: value.website,
            payment_terms: value.payment_terms.as_str().into(),
            is_preferred: value.is_preferred,
            is_active: value.is_active,
            sync_status: value.sync_status.as_str().into(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewSupplier> for NewSupplier<'a> {
    fn from(value: &'a DomainNewSupplier) -> Self {
        let details = &value.details;
        Self {
            location_id: value.location_id,
            name: details.name.as_str(),
            contact_person: details.contact_person.as_str(),
            email: details.email.as_str(),
            phone: details.phone.as_str(),
            address: details.address.as_str(),
            website: details.website.as_deref(),
            payment_terms: details.payment_terms.label(),
            is_preferred: details.is_preferred,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateSupplier> for UpdateSupplier<'a> {
    fn from(value: &'a DomainUpdateSupplier) -> Self {
        let details = &value.details;
        Self {
            name: details.name.as_str(),
            contact_person: details.contact_person.as_str(),
            email: details.email.as_str(),
            phone: details.phone.as_str(),
            address: details.address.as_str(),
            website: details.website.as_deref(),
            payment_terms: details.payment_terms.label(),
            is_preferred: details.is_preferred,
            is_active: value.is_active,
            updated_at: value.updated_at,
        }
    }
}
