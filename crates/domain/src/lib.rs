// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod destination;
mod error;
mod record;
mod telemetry;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use destination::{CallCandidate, DestinationType, StationCandidate};
pub use error::DomainError;
pub use record::{
    PositionFields, QueuedStatusChange, RoleAssignment, SubmissionRecord, SubmissionTimestamps,
};
pub use telemetry::Telemetry;
pub use types::{DestinationLevel, NoteRequirement, StatusDefinition};
pub use validation::{validate_identifier, validate_note};
