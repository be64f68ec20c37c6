// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::{WizardState, WizardStep};
use field_status_domain::StatusDefinition;

/// Step numbering shown to the user, e.g. "Step 2 of 3".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepProgress {
    /// One-based number of the active step.
    pub current: u8,
    /// Number of visible steps.
    pub total: u8,
}

/// The stages counted for a status, in order.
const fn stages(
    entered_via_status_selection: bool,
    status: Option<&StatusDefinition>,
) -> [bool; 3] {
    match status {
        Some(status) => [
            entered_via_status_selection,
            status.destination_level.has_step(),
            status.note_requirement.has_step(),
        ],
        None => [entered_via_status_selection, false, false],
    }
}

const fn count(stages: &[bool]) -> u8 {
    let mut total: u8 = 0;
    let mut i: usize = 0;
    while i < stages.len() {
        if stages[i] {
            total += 1;
        }
        i += 1;
    }
    total
}

const fn at_least_one(value: u8) -> u8 {
    if value == 0 { 1 } else { value }
}

/// Computes the step numbering for a state.
///
/// The total counts the status step (only when the wizard was entered via
/// status selection), the destination step (destination level above 0) and
/// the note step (note requirement above 0), with a minimum of 1. The
/// current number counts the same stages up to and including the active one.
#[must_use]
pub fn step_progress(state: &WizardState) -> StepProgress {
    let stages: [bool; 3] = stages(
        state.entered_via_status_selection,
        state.selected_status.as_ref(),
    );

    let upto: usize = match state.step {
        WizardStep::SelectStatus => 1,
        WizardStep::SelectDestination => 2,
        WizardStep::AddNote => 3,
    };

    let total: u8 = at_least_one(count(&stages));
    let current: u8 = at_least_one(count(&stages[..upto])).min(total);

    StepProgress { current, total }
}

/// Total visible steps for a status under a given entry mode.
#[must_use]
pub const fn total_steps(entered_via_status_selection: bool, status: &StatusDefinition) -> u8 {
    at_least_one(count(&stages(entered_via_status_selection, Some(status))))
}
