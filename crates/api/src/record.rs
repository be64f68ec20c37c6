// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Building the outgoing record.

use field_status::{CoreError, WizardState, validate_submission};
use field_status_domain::{
    DestinationType, PositionFields, RoleAssignment, StatusDefinition, SubmissionRecord,
    SubmissionTimestamps,
};

use crate::error::ApiError;
use crate::ports::{Clock, RoleAssignmentSource, TelemetrySource};

/// The parts of a submission taken from wizard state.
///
/// Captured under the state lock; telemetry, roles and timestamps are added
/// afterwards by [`build_submission_record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub unit_id: String,
    pub status_type_id: String,
    pub note: String,
    pub responding_to_id: String,
    /// The call to mark active on success, when the destination is a call.
    pub call_id: Option<String>,
}

impl SubmissionDraft {
    /// Captures a draft from an open wizard.
    ///
    /// # Errors
    ///
    /// Returns an error if the wizard is closed, no status is selected, or
    /// the note requirement is not met.
    pub fn from_state(unit_id: &str, state: &WizardState) -> Result<Self, CoreError> {
        let status: &StatusDefinition = validate_submission(state)?;
        let responding_to_id: String = state
            .destination()
            .responding_to_id()
            .unwrap_or_default()
            .to_string();
        let call_id: Option<String> = (state.destination_type() == DestinationType::Call
            && !responding_to_id.is_empty())
        .then(|| responding_to_id.clone());

        Ok(Self {
            unit_id: unit_id.to_string(),
            status_type_id: status.id.clone(),
            note: state.note().to_string(),
            responding_to_id,
            call_id,
        })
    }
}

/// Uses the caller's position when it has coordinates, otherwise reads the
/// telemetry source. Missing values stay empty strings.
#[must_use]
pub fn resolve_position(
    provided: Option<PositionFields>,
    telemetry: &dyn TelemetrySource,
) -> PositionFields {
    match provided {
        Some(position) if position.has_position() => position,
        _ => PositionFields::from_telemetry(&telemetry.current_telemetry()),
    }
}

/// Role assignments with a user filled in, in source order.
#[must_use]
pub fn filled_role_assignments(
    roles: &dyn RoleAssignmentSource,
    unit_id: &str,
) -> Vec<RoleAssignment> {
    roles
        .role_assignments(unit_id)
        .into_iter()
        .filter(RoleAssignment::is_filled)
        .collect()
}

/// Builds the record at submission time.
///
/// # Errors
///
/// Returns an error if the timestamps cannot be formatted.
pub fn build_submission_record(
    draft: &SubmissionDraft,
    provided_position: Option<PositionFields>,
    telemetry: &dyn TelemetrySource,
    roles: &dyn RoleAssignmentSource,
    clock: &dyn Clock,
) -> Result<SubmissionRecord, ApiError> {
    let timestamps: SubmissionTimestamps =
        SubmissionTimestamps::format(clock.now_utc(), clock.local_offset())?;

    Ok(SubmissionRecord {
        unit_id: draft.unit_id.clone(),
        status_type_id: draft.status_type_id.clone(),
        note: draft.note.clone(),
        responding_to_id: draft.responding_to_id.clone(),
        position: resolve_position(provided_position, telemetry),
        timestamp_local: timestamps.local,
        timestamp_utc: timestamps.utc,
        role_assignments: filled_role_assignments(roles, &draft.unit_id),
    })
}
