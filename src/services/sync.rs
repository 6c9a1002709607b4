use serde::Serialize;

use crate::domain::station::Station;
use crate::domain::sync::SyncStatus;
use crate::repository::{SyncQueueReader, SyncQueueWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::sync::{SyncRecord, SyncState, SyncTransport};

/// Why a sync pass did nothing.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Offline,
    AlreadySyncing,
    NothingToSync,
    NotConfigured,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    Skipped { reason: SkipReason },
    Completed { synced: usize, failed: usize },
}

/// Push every unsynced transaction and sale of the station's location.
///
/// Each record is marked `synced` or `error` individually; `error` records are
/// pushed again by the next pass. The dirty flag is taken when the pass starts,
/// so a write landing mid-pass leaves it set. It is set again when a push
/// fails or the queue cannot be read.
pub fn run_sync_pass<R>(
    repo: &R,
    station: &Station,
    state: &SyncState,
    transport: Option<&dyn SyncTransport>,
) -> ServiceResult<SyncOutcome>
where
    R: SyncQueueReader + SyncQueueWriter + ?Sized,
{
    if !state.is_online() {
        return Ok(skipped(SkipReason::Offline));
    }
    let Some(transport) = transport else {
        return Ok(skipped(SkipReason::NotConfigured));
    };
    if !state.is_dirty() {
        return Ok(skipped(SkipReason::NothingToSync));
    }
    let Some(_guard) = state.begin_sync() else {
        return Ok(skipped(SkipReason::AlreadySyncing));
    };
    state.take_dirty();

    let outcome = push_unsynced(repo, station, transport);
    match &outcome {
        Ok(SyncOutcome::Completed { failed: 0, .. }) => {}
        _ => state.mark_dirty(),
    }
    outcome
}

/// Mark `state` dirty when the store still holds unsynced records.
///
/// Run once at start-up so records left over from a previous run are pushed.
pub fn restore_dirty_flag<R>(
    repo: &R,
    station: &Station,
    state: &SyncState,
) -> ServiceResult<bool>
where
    R: SyncQueueReader + ?Sized,
{
    let waiting = !repo.list_pending_transactions(station.location_id)?.is_empty()
        || !repo.list_pending_sales(station.location_id)?.is_empty();
    if waiting {
        state.mark_dirty();
    }
    Ok(waiting)
}

fn push_unsynced<R>(
    repo: &R,
    station: &Station,
    transport: &dyn SyncTransport,
) -> ServiceResult<SyncOutcome>
where
    R: SyncQueueReader + SyncQueueWriter + ?Sized,
{
    let transactions = repo
        .list_pending_transactions(station.location_id)
        .map_err(ServiceError::from)?;
    let sales = repo
        .list_pending_sales(station.location_id)
        .map_err(ServiceError::from)?;

    let mut synced = 0;
    let mut failed = 0;

    for transaction in &transactions {
        let status = match transport.push(&SyncRecord::Transaction(transaction)) {
            Ok(()) => SyncStatus::Synced,
            Err(err) => {
                log::warn!("Failed to sync transaction {}: {err}", transaction.id);
                SyncStatus::Error
            }
        };
        repo.set_transaction_sync_status(transaction.id, status)?;
        tally(status, &mut synced, &mut failed);
    }

    for sale in &sales {
        let status = match transport.push(&SyncRecord::Sale(sale)) {
            Ok(()) => SyncStatus::Synced,
            Err(err) => {
                log::warn!("Failed to sync sale {}: {err}", sale.reference());
                SyncStatus::Error
            }
        };
        repo.set_sale_sync_status(sale.id, status)?;
        tally(status, &mut synced, &mut failed);
    }

    log::info!("Sync pass finished: {synced} synced, {failed} failed");

    Ok(SyncOutcome::Completed { synced, failed })
}

fn skipped(reason: SkipReason) -> SyncOutcome {
    log::info!("Sync pass skipped: {reason:?}");
    SyncOutcome::Skipped { reason }
}

fn tally(status: SyncStatus, synced: &mut usize, failed: &mut usize) {
    if status == SyncStatus::Synced {
        *synced += 1;
    } else {
        *failed += 1;
    }
}
