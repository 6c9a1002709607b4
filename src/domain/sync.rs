use serde::{Deserialize, Serialize};

/// Replication state of a locally stored record.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Written locally and not yet pushed.
    #[default]
    Pending,
    /// Accepted by the remote API.
    Synced,
    /// The last push attempt failed.
    Error,
}

impl From<&str> for SyncStatus {
    fn from(value: &str) -> Self {
        match value {
            "synced" => Self::Synced,
            "error" => Self::Error,
            _ => Self::Pending,
        }
    }
}

impl From<SyncStatus> for &'static str {
    fn from(value: SyncStatus) -> Self {
        match value {
            SyncStatus::Pending => "pending",
            SyncStatus::Synced => "synced",
            SyncStatus::Error => "error",
        }
    }
}

impl From<SyncStatus> for String {
    fn from(value: SyncStatus) -> Self {
        <&'static str>::from(value).to_string()
    }
}
