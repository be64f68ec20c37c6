// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::telemetry::Telemetry;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

/// A role on the unit and the user currently filling it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignment {
    /// Unit role identifier.
    pub role_id: String,
    /// Assigned user identifier. Blank when the role is unfilled.
    pub user_id: String,
}

impl RoleAssignment {
    /// Creates a role assignment.
    #[must_use]
    pub fn new(role_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            role_id: role_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Whether a user is actually assigned.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        !self.user_id.trim().is_empty()
    }
}

/// Position and motion attached to a status change.
///
/// Unknown values are empty strings, never absent, so the record shape
/// stays stable for the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PositionFields {
    /// Latitude.
    pub latitude: String,
    /// Longitude.
    pub longitude: String,
    /// Accuracy.
    pub accuracy: String,
    /// Altitude.
    pub altitude: String,
    /// Speed.
    pub speed: String,
    /// Heading.
    pub heading: String,
}

fn format_optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl PositionFields {
    /// Converts telemetry into record strings.
    #[must_use]
    pub fn from_telemetry(telemetry: &Telemetry) -> Self {
        Self {
            latitude: format_optional(telemetry.latitude),
            longitude: format_optional(telemetry.longitude),
            accuracy: format_optional(telemetry.accuracy),
            altitude: format_optional(telemetry.altitude),
            speed: format_optional(telemetry.speed),
            heading: format_optional(telemetry.heading),
        }
    }

    /// Whether latitude and longitude are both non-empty.
    #[must_use]
    pub fn has_position(&self) -> bool {
        !self.latitude.trim().is_empty() && !self.longitude.trim().is_empty()
    }
}

/// Local and UTC representations of the submission instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionTimestamps {
    /// RFC 3339 in the device's local offset.
    pub local: String,
    /// RFC 3339 in UTC.
    pub utc: String,
}

impl SubmissionTimestamps {
    /// Formats `instant` in both the given local offset and UTC.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TimestampFormat` if formatting fails.
    pub fn format(instant: OffsetDateTime, local_offset: UtcOffset) -> Result<Self, DomainError> {
        let local: String = instant
            .to_offset(local_offset)
            .format(&Rfc3339)
            .map_err(|e| DomainError::TimestampFormat(e.to_string()))?;
        let utc: String = instant
            .to_offset(UtcOffset::UTC)
            .format(&Rfc3339)
            .map_err(|e| DomainError::TimestampFormat(e.to_string()))?;
        Ok(Self { local, utc })
    }
}

/// The outgoing status change, built once at the moment of submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    /// Unit whose status changes.
    pub unit_id: String,
    /// New status type.
    pub status_type_id: String,
    /// Free-text note; empty when none.
    pub note: String,
    /// Call or station identifier; empty when no destination.
    pub responding_to_id: String,
    /// Device position, empty strings when unavailable.
    #[serde(flatten)]
    pub position: PositionFields,
    /// Submission time in the device's local offset.
    pub timestamp_local: String,
    /// Submission time in UTC.
    pub timestamp_utc: String,
    /// Role assignments in source order.
    pub role_assignments: Vec<RoleAssignment>,
}

/// A status change held for later delivery.
///
/// Carries the same logical fields as [`SubmissionRecord`]; timestamps and
/// position are optional at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedStatusChange {
    /// Unit whose status changes.
    pub unit_id: String,
    /// New status type.
    pub status_type_id: String,
    /// Free-text note.
    pub note: String,
    /// Call or station identifier; empty when no destination.
    pub responding_to_id: String,
    /// Role assignments in source order.
    pub role_assignments: Vec<RoleAssignment>,
    /// Original local timestamp, if known.
    pub timestamp_local: Option<String>,
    /// Original UTC timestamp, if known.
    pub timestamp_utc: Option<String>,
    /// Position captured at submission, if any.
    pub position: Option<PositionFields>,
}

impl QueuedStatusChange {
    /// Captures a record that could not be delivered.
    #[must_use]
    pub fn from_record(record: &SubmissionRecord) -> Self {
        Self {
            unit_id: record.unit_id.clone(),
            status_type_id: record.status_type_id.clone(),
            note: record.note.clone(),
            responding_to_id: record.responding_to_id.clone(),
            role_assignments: record.role_assignments.clone(),
            timestamp_local: Some(record.timestamp_local.clone()),
            timestamp_utc: Some(record.timestamp_utc.clone()),
            position: Some(record.position.clone()),
        }
    }

    /// Rebuilds a deliverable record, using `fallback` for missing timestamps.
    #[must_use]
    pub fn into_record(self, fallback: &SubmissionTimestamps) -> SubmissionRecord {
        SubmissionRecord {
            unit_id: self.unit_id,
            status_type_id: self.status_type_id,
            note: self.note,
            responding_to_id: self.responding_to_id,
            position: self.position.unwrap_or_default(),
            timestamp_local: self
                .timestamp_local
                .unwrap_or_else(|| fallback.local.clone()),
            timestamp_utc: self.timestamp_utc.unwrap_or_else(|| fallback.utc.clone()),
            role_assignments: self.role_assignments,
        }
    }
}
