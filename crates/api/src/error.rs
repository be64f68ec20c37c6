// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the session boundary.

use field_status::CoreError;
use field_status_domain::DomainError;
use field_status_persistence::PersistenceError;
use thiserror::Error;

/// A failure reported by an external collaborator.
///
/// Timeouts, network errors and server errors are not distinguished.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{collaborator} failed: {message}")]
pub struct CollaboratorError {
    /// Which collaborator failed.
    pub collaborator: &'static str,
    /// What it reported.
    pub message: String,
}

impl CollaboratorError {
    /// Creates a new collaborator error.
    #[must_use]
    pub fn new(collaborator: &'static str, message: impl Into<String>) -> Self {
        Self {
            collaborator,
            message: message.into(),
        }
    }
}

/// Errors surfaced by a status change session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No unit is active, so there is nothing to change.
    #[error("No active unit")]
    NoActiveUnit,
    /// The wizard is not open.
    #[error("The status change wizard is not open")]
    WizardClosed,
    /// The wizard refused the action; state is unchanged.
    #[error("Rejected: {0}")]
    Rejected(#[source] CoreError),
    /// The outgoing record could not be built.
    #[error("Failed to build status change: {0}")]
    Record(#[from] DomainError),
    /// Delivery failed and no offline queue is available.
    #[error("Status change was not delivered: {0}")]
    DeliveryFailed(#[source] CollaboratorError),
    /// Delivery failed and the offline queue refused the change.
    #[error("Status change was neither delivered ({delivery}) nor queued ({queue})")]
    QueueingFailed {
        /// Why delivery failed.
        delivery: CollaboratorError,
        /// Why queueing failed.
        #[source]
        queue: CollaboratorError,
    },
    /// The offline queue storage failed outside a submission.
    #[error("Offline queue storage error: {0}")]
    Storage(#[from] PersistenceError),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::WizardClosed => Self::WizardClosed,
            other => Self::Rejected(other),
        }
    }
}
