// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The `SQLite` offline queue adapter and one-shot replay.

use async_trait::async_trait;
use field_status_domain::{QueuedStatusChange, SubmissionRecord, SubmissionTimestamps};
use field_status_persistence::{OfflineQueueStore, QueuedEntry};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{ApiError, CollaboratorError};
use crate::ports::{Clock, OfflineQueue, StatusTransport};

/// [`OfflineQueue`] backed by an [`OfflineQueueStore`].
#[derive(Debug, Clone)]
pub struct SqliteOfflineQueue {
    store: Arc<Mutex<OfflineQueueStore>>,
}

impl SqliteOfflineQueue {
    /// Wraps a shared store.
    #[must_use]
    pub const fn new(store: Arc<Mutex<OfflineQueueStore>>) -> Self {
        Self { store }
    }

    /// The underlying store, for replay and inspection.
    #[must_use]
    pub fn store(&self) -> Arc<Mutex<OfflineQueueStore>> {
        Arc::clone(&self.store)
    }
}

#[async_trait]
impl OfflineQueue for SqliteOfflineQueue {
    async fn enqueue_for_later_delivery(
        &self,
        change: QueuedStatusChange,
    ) -> Result<(), CollaboratorError> {
        let queue_id: i64 = self
            .store
            .lock()
            .await
            .enqueue(&change)
            .map_err(|e| CollaboratorError::new("offline queue", e.to_string()))?;
        debug!(queue_id, "Status change stored in offline queue");
        Ok(())
    }
}

/// Result of one replay pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Entries delivered and removed.
    pub delivered: usize,
    /// Entries still queued.
    pub remaining: usize,
    /// The failure that stopped the pass, if any.
    pub failure: Option<CollaboratorError>,
}

/// Delivers queued changes once, oldest first.
///
/// Stops at the first failed delivery so later changes never overtake an
/// earlier one. The failure is recorded on the entry. Entries queued without
/// timestamps are stamped with the replay time.
///
/// # Errors
///
/// Returns an error if the store cannot be read or updated.
pub async fn replay_pending(
    store: &Mutex<OfflineQueueStore>,
    transport: &dyn StatusTransport,
    clock: &dyn Clock,
) -> Result<ReplaySummary, ApiError> {
    let pending: Vec<QueuedEntry> = store.lock().await.list_pending()?;
    let total: usize = pending.len();
    let mut summary: ReplaySummary = ReplaySummary::default();

    info!(pending = total, "Replaying offline queue");

    for entry in pending {
        let fallback: SubmissionTimestamps =
            SubmissionTimestamps::format(clock.now_utc(), clock.local_offset())?;
        let record: SubmissionRecord = entry.change.into_record(&fallback);

        match transport.deliver_status_change(&record).await {
            Ok(()) => {
                store.lock().await.mark_delivered(entry.queue_id)?;
                summary.delivered += 1;
            }
            Err(e) => {
                warn!(
                    queue_id = entry.queue_id,
                    error = %e,
                    "Replay stopped at undeliverable status change"
                );
                store
                    .lock()
                    .await
                    .record_attempt_failure(entry.queue_id, &e.to_string())?;
                summary.failure = Some(e);
                break;
            }
        }
    }

    summary.remaining = total - summary.delivered;
    info!(
        delivered = summary.delivered,
        remaining = summary.remaining,
        "Offline queue replay finished"
    );

    Ok(summary)
}
