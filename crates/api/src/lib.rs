// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session boundary for field unit status changes.
//!
//! This crate connects the pure wizard state machine to the outside world.
//! It is responsible for:
//! - Declaring the collaborator ports the wizard depends on
//! - Fetching destination candidates concurrently
//! - Building the outgoing record at submission time
//! - Delivering it once, falling back to the offline queue
//! - Triggering best-effort reconciliation after an accepted change
//!
//! Only a failure to queue an undeliverable change propagates as a
//! critical error; every other collaborator failure is handled here.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod destinations;
mod error;
mod ports;
mod queue;
mod reconcile;
mod record;
mod session;
mod submit;

#[cfg(test)]
mod tests;

pub use destinations::{DestinationLoadReport, fetch_destinations};
pub use error::{ApiError, CollaboratorError};
pub use ports::{
    ActiveCallCommand, Clock, Collaborators, DestinationProvider, NotificationKind, Notifier,
    OfflineQueue, Reconciler, RoleAssignmentSource, StatusTransport, SystemClock,
    TelemetrySource, UnitContext,
};
pub use queue::{ReplaySummary, SqliteOfflineQueue, replay_pending};
pub use reconcile::spawn_reconciliation;
pub use record::{
    SubmissionDraft, build_submission_record, filled_role_assignments, resolve_position,
};
pub use session::{Progression, StatusChangeSession};
pub use submit::{SubmissionGuard, SubmissionPipeline, SubmitOutcome};
