//! Best-effort replication of locally written records to a remote API.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::domain::sale::Sale;
use crate::domain::transaction::InventoryTransaction;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("sync endpoint responded with status {status}")]
    Rejected { status: u16 },
    #[error("sync request failed: {0}")]
    Transport(String),
}

impl From<ureq::Error> for SyncError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, _) => Self::Rejected { status },
            ureq::Error::Transport(transport) => Self::Transport(transport.to_string()),
        }
    }
}

/// Connectivity and replication flags shared by every worker.
#[derive(Debug, Default)]
pub struct SyncState {
    online: AtomicBool,
    syncing: AtomicBool,
    dirty: AtomicBool,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SyncSnapshot {
    pub online: bool,
    pub syncing: bool,
    pub dirty: bool,
}

impl SyncState {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
            ..Self::default()
        }
    }

    /// Called after every successful local write.
    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    /// Clear the flag and return whether it was set.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Returns the previous value.
    pub fn set_online(&self, online: bool) -> bool {
        self.online.swap(online, Ordering::SeqCst)
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    /// Claim the single sync slot. `None` while another pass is running.
    pub fn begin_sync(&self) -> Option<SyncGuard<'_>> {
        self.syncing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| SyncGuard { state: self })
    }

    pub fn snapshot(&self) -> SyncSnapshot {
        SyncSnapshot {
            online: self.is_online(),
            syncing: self.syncing.load(Ordering::SeqCst),
            dirty: self.is_dirty(),
        }
    }
}

/// Releases the sync slot when dropped.
#[derive(Debug)]
pub struct SyncGuard<'a> {
    state: &'a SyncState,
}

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        self.state.syncing.store(false, Ordering::SeqCst);
    }
}

/// Body of a single push.
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "record", rename_all = "snake_case")]
pub enum SyncRecord<'a> {
    Transaction(&'a InventoryTransaction),
    Sale(&'a Sale),
}

pub trait SyncTransport: Send + Sync {
    fn push(&self, record: &SyncRecord<'_>) -> Result<(), SyncError>;
}

/// Posts every record as JSON to `{base_url}/sync`.
pub struct HttpSyncTransport {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpSyncTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: format!("{}/sync", base_url.trim_end_matches('/')),
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SyncTransport for HttpSyncTransport {
    fn push(&self, record: &SyncRecord<'_>) -> Result<(), SyncError> {
        self.agent.post(&self.endpoint).send_json(record)?;
        Ok(())
    }
}
