use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::activity::{Activity as DomainActivity, NewActivity as DomainNewActivity};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::activities)]
pub struct Activity {
    pub id: i32,
    pub location_id: i32,
    pub action: String,
    pub subject_id: Option<i32>,
    pub actioned_by: String,
    pub sync_status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::activities)]
pub struct NewActivity<'a> {
    pub location_id: i32,
    pub action: &'a str,
    pub subject_id: Option<i32>,
    pub actioned_by: &'a str,
    pub created_at: NaiveDateTime,
}

impl<'a> NewActivity<'a> {
    /// Build the insert payload, falling back to `subject_id` when the
    /// activity does not name its subject yet.
    pub fn from_domain(value: &'a DomainNewActivity, subject_id: Option<i32>) -> Self {
        Self {
            location_id: value.location_id,
            action: value.action.as_str(),
            subject_id: value.subject_id.or(subject_id),
            actioned_by: value.actioned_by.as_str(),
            created_at: value.created_at,
        }
    }
}

impl From<Activity> for DomainActivity {
    fn from(value: Activity) -> Self {
        Self {
            id: value.id,
            location_id: value.location_id,
            action: value.action.as_str().into(),
            subject_id: value.subject_id,
            actioned_by: value.actioned_by,
            sync_status: value.sync_status.as_str().into(),
            created_at: value.created_at,
        }
    }
}
