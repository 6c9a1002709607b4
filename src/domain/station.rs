use serde::Serialize;

/// The point-of-sale station the application is running on.
///
/// Every record is scoped to the station's location and every activity is
/// attributed to its operator.
#[derive(Debug, Clone, Serialize)]
pub struct Station {
    /// Location all reads and writes are scoped to.
    pub location_id: i32,
    /// Name recorded as `actioned_by` on activity entries. May be empty.
    pub operator: String,
}

impl Station {
    pub fn new(location_id: i32, operator: impl Into<String>) -> Self {
        Self {
            location_id,
            operator: operator.into(),
        }
    }
}
