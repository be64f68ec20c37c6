// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collaborator ports.
//!
//! Everything the session reads from or writes to the outside world goes
//! through one of these traits. Ambient context (active unit, active call,
//! location, roles) is read-only here; the single write to it is
//! [`ActiveCallCommand::set_active_call`].

use async_trait::async_trait;
use field_status_domain::{
    CallCandidate, QueuedStatusChange, RoleAssignment, StationCandidate, SubmissionRecord,
    Telemetry,
};
use std::sync::Arc;
use time::{OffsetDateTime, UtcOffset};

use crate::error::CollaboratorError;

/// Supplies destination candidates for a unit's department.
#[async_trait]
pub trait DestinationProvider: Send + Sync {
    /// Fetches open calls, in display order.
    async fn fetch_calls(&self, unit_id: &str) -> Result<Vec<CallCandidate>, CollaboratorError>;

    /// Fetches stations, in display order.
    async fn fetch_stations(
        &self,
        unit_id: &str,
    ) -> Result<Vec<StationCandidate>, CollaboratorError>;
}

/// Delivers status changes to the remote service.
#[async_trait]
pub trait StatusTransport: Send + Sync {
    /// Makes one delivery attempt. The transport applies its own timeout.
    async fn deliver_status_change(&self, record: &SubmissionRecord)
    -> Result<(), CollaboratorError>;
}

/// Durable store-and-forward fallback for undelivered changes.
#[async_trait]
pub trait OfflineQueue: Send + Sync {
    /// Stores the change for later delivery.
    async fn enqueue_for_later_delivery(
        &self,
        change: QueuedStatusChange,
    ) -> Result<(), CollaboratorError>;
}

/// The device's last known position.
pub trait TelemetrySource: Send + Sync {
    /// Returns the current fix, or [`Telemetry::unavailable`].
    fn current_telemetry(&self) -> Telemetry;
}

/// Role-to-user assignments for a unit.
pub trait RoleAssignmentSource: Send + Sync {
    /// Returns assignments in source order.
    fn role_assignments(&self, unit_id: &str) -> Vec<RoleAssignment>;
}

/// Read-only view of the ambient unit context.
pub trait UnitContext: Send + Sync {
    /// The unit whose status is being changed.
    fn active_unit_id(&self) -> Option<String>;

    /// The call the unit is currently assigned to, if any.
    fn active_call_id(&self) -> Option<String>;
}

/// Marks a call as the unit's active call.
pub trait ActiveCallCommand: Send + Sync {
    /// Sets the active call.
    ///
    /// # Errors
    ///
    /// Returns an error if the ambient context rejects the update.
    fn set_active_call(&self, unit_id: &str, call_id: &str) -> Result<(), CollaboratorError>;
}

/// Refreshes the authoritative unit record after a status change.
#[async_trait]
pub trait Reconciler: Send + Sync {
    /// Re-fetches the unit record.
    async fn refresh_active_unit(&self, unit_id: &str) -> Result<(), CollaboratorError>;
}

/// Kind of user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// The change was delivered or queued.
    Success,
    /// The change was not accepted.
    Error,
}

/// Shows notifications to the user.
pub trait Notifier: Send + Sync {
    /// Emits one notification.
    fn notify(&self, kind: NotificationKind, message: &str);
}

/// Source of submission timestamps.
pub trait Clock: Send + Sync {
    /// The current instant in UTC.
    fn now_utc(&self) -> OffsetDateTime;

    /// The device's local UTC offset.
    fn local_offset(&self) -> UtcOffset;
}

/// Wall clock. Falls back to UTC when the local offset cannot be determined.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    fn local_offset(&self) -> UtcOffset {
        UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
    }
}

/// The full set of collaborators a session needs.
///
/// `queue` is optional; without it a failed delivery is reported as an error
/// instead of being queued.
#[derive(Clone)]
pub struct Collaborators {
    pub destinations: Arc<dyn DestinationProvider>,
    pub transport: Arc<dyn StatusTransport>,
    pub queue: Option<Arc<dyn OfflineQueue>>,
    pub telemetry: Arc<dyn TelemetrySource>,
    pub roles: Arc<dyn RoleAssignmentSource>,
    pub unit: Arc<dyn UnitContext>,
    pub active_call: Arc<dyn ActiveCallCommand>,
    pub reconciler: Arc<dyn Reconciler>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("queue", &self.queue.is_some())
            .finish_non_exhaustive()
    }
}
