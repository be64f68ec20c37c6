// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The submission pipeline: deliver once, fall back to the offline queue.

use field_status_domain::{QueuedStatusChange, SubmissionRecord};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, warn};

use crate::error::{ApiError, CollaboratorError};
use crate::ports::{Collaborators, NotificationKind};
use crate::reconcile::spawn_reconciliation;

/// How a submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The remote service accepted the change.
    Delivered,
    /// Delivery failed; the change is in the offline queue.
    Queued,
    /// Another submission from this session is in flight; nothing was done.
    AlreadySubmitting,
}

impl SubmitOutcome {
    /// Whether the change was accepted, now or for later delivery.
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Delivered | Self::Queued)
    }
}

/// Clears the submitting flag when dropped, on every exit path.
#[derive(Debug)]
pub struct SubmissionGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Delivers status changes for one session.
///
/// Owns the submitting flag, so at most one delivery from the session is in
/// flight at a time.
#[derive(Debug)]
pub struct SubmissionPipeline {
    collaborators: Collaborators,
    submitting: AtomicBool,
}

impl SubmissionPipeline {
    /// Creates a pipeline over the given collaborators.
    #[must_use]
    pub const fn new(collaborators: Collaborators) -> Self {
        Self {
            collaborators,
            submitting: AtomicBool::new(false),
        }
    }

    /// Whether a submission is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Sets the submitting flag, or returns `None` if it is already set.
    pub fn try_begin(&self) -> Option<SubmissionGuard<'_>> {
        self.submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmissionGuard {
                flag: &self.submitting,
            })
    }

    /// Makes one delivery attempt, queueing the record if it fails.
    ///
    /// Emits the user notification for every outcome.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryFailed` when delivery fails and no queue is
    /// configured, and `QueueingFailed` when the queue also refuses it.
    pub async fn deliver(&self, record: SubmissionRecord) -> Result<SubmitOutcome, ApiError> {
        let delivery: CollaboratorError = match self
            .collaborators
            .transport
            .deliver_status_change(&record)
            .await
        {
            Ok(()) => {
                info!(
                    unit_id = %record.unit_id,
                    status_id = %record.status_type_id,
                    "Status change delivered"
                );
                self.notify(NotificationKind::Success, "Status updated");
                return Ok(SubmitOutcome::Delivered);
            }
            Err(e) => e,
        };

        warn!(
            unit_id = %record.unit_id,
            status_id = %record.status_type_id,
            error = %delivery,
            "Status change delivery failed"
        );

        let Some(queue) = self.collaborators.queue.as_ref() else {
            self.notify(NotificationKind::Error, "Failed to update status");
            return Err(ApiError::DeliveryFailed(delivery));
        };

        match queue
            .enqueue_for_later_delivery(QueuedStatusChange::from_record(&record))
            .await
        {
            Ok(()) => {
                info!(
                    unit_id = %record.unit_id,
                    status_id = %record.status_type_id,
                    "Status change queued for later delivery"
                );
                self.notify(
                    NotificationKind::Success,
                    "Status change queued; it will be sent when the connection returns",
                );
                Ok(SubmitOutcome::Queued)
            }
            Err(queue_error) => {
                error!(
                    unit_id = %record.unit_id,
                    status_id = %record.status_type_id,
                    error = %queue_error,
                    "Status change could not be queued"
                );
                self.notify(NotificationKind::Error, "Failed to update status");
                Err(ApiError::QueueingFailed {
                    delivery,
                    queue: queue_error,
                })
            }
        }
    }

    /// Marks `call_id` active when it differs from the current active call.
    ///
    /// Only called after an accepted submission. Failures are logged.
    pub fn update_active_call(&self, unit_id: &str, call_id: Option<&str>) {
        let Some(call_id) = call_id else {
            return;
        };
        let current: Option<String> = self.collaborators.unit.active_call_id();
        if current.as_deref() == Some(call_id) {
            debug!(unit_id, call_id, "Call already active");
            return;
        }
        match self.collaborators.active_call.set_active_call(unit_id, call_id) {
            Ok(()) => info!(unit_id, call_id, "Active call updated"),
            Err(e) => warn!(unit_id, call_id, error = %e, "Failed to update active call"),
        }
    }

    /// Starts background reconciliation of the unit record.
    pub fn reconcile(&self, unit_id: &str) {
        drop(spawn_reconciliation(
            self.collaborators.reconciler.clone(),
            unit_id.to_string(),
        ));
    }

    fn notify(&self, kind: NotificationKind, message: &str) {
        self.collaborators.notifier.notify(kind, message);
    }
}
