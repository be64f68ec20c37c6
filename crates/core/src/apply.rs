// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::WizardCommand;
use crate::error::CoreError;
use crate::preselect::reconcile_preselection;
use crate::state::{
    DestinationSelection, Preselection, SessionId, TransitionOutcome, TransitionResult,
    WizardState, WizardStep,
};
use field_status_domain::{DomainError, StatusDefinition, validate_note};

/// Applies a command to the wizard state, producing a new state and the
/// outcome the caller must act on.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. A validation failure (for example a missing required
/// note) is an `Err` and leaves the state untouched.
///
/// # Errors
///
/// Returns an error if:
/// - The wizard is closed (for every command except `Open` and `Close`)
/// - The command is not valid on the current step
/// - A domain rule is violated
pub fn apply(state: &WizardState, command: WizardCommand) -> Result<TransitionResult, CoreError> {
    match command {
        WizardCommand::Open {
            session,
            status,
            active_call_id,
        } => open(state, session, status, active_call_id),
        WizardCommand::Close => Ok(TransitionResult {
            new_state: WizardState::default(),
            outcome: TransitionOutcome::Closed,
        }),
        WizardCommand::DestinationsLoading { session } => {
            if !state.is_live(session) {
                return Ok(discarded(state));
            }
            let mut new_state: WizardState = state.clone();
            new_state.is_loading_destinations = true;
            reconcile_preselection(&mut new_state);
            Ok(updated(new_state))
        }
        WizardCommand::DestinationsLoaded {
            session,
            calls,
            stations,
        } => {
            if !state.is_live(session) {
                return Ok(discarded(state));
            }
            let mut new_state: WizardState = state.clone();
            new_state.available_calls = calls;
            new_state.available_stations = stations;
            new_state.is_loading_destinations = false;
            new_state.destinations_loaded = true;
            reconcile_preselection(&mut new_state);
            Ok(updated(new_state))
        }
        other => {
            if !state.is_open {
                return Err(CoreError::WizardClosed);
            }
            apply_open(state, other)
        }
    }
}

fn open(
    state: &WizardState,
    session: SessionId,
    status: Option<StatusDefinition>,
    active_call_id: Option<String>,
) -> Result<TransitionResult, CoreError> {
    if state.is_open {
        return Err(CoreError::WizardAlreadyOpen);
    }

    let mut new_state: WizardState = WizardState {
        session: Some(session),
        is_open: true,
        entered_via_status_selection: status.is_none(),
        active_call_id,
        ..WizardState::default()
    };

    let outcome: TransitionOutcome = match status {
        None => TransitionOutcome::StepChanged(WizardStep::SelectStatus),
        Some(status) => {
            let next: Option<WizardStep> = step_after_status(&status);
            new_state.selected_status = Some(status);
            match next {
                Some(step) => {
                    new_state.step = step;
                    TransitionOutcome::StepChanged(step)
                }
                None => TransitionOutcome::SubmitRequested,
            }
        }
    };

    reconcile_preselection(&mut new_state);

    Ok(TransitionResult { new_state, outcome })
}

fn apply_open(state: &WizardState, command: WizardCommand) -> Result<TransitionResult, CoreError> {
    let name: &'static str = command.name();
    match command {
        WizardCommand::SelectStatus(status) => {
            if state.step != WizardStep::SelectStatus {
                return Err(wrong_step(name, state));
            }
            let mut new_state: WizardState = state.clone();
            let changed: bool = new_state
                .selected_status
                .as_ref()
                .is_none_or(|current| current.id != status.id);
            if changed {
                // A different status may not accept the previous destination.
                if !new_state.destination_chosen_by_user {
                    new_state.preselection = Preselection::Idle;
                }
                new_state.destination = DestinationSelection::None;
            }
            new_state.selected_status = Some(status);
            reconcile_preselection(&mut new_state);
            Ok(updated(new_state))
        }
        WizardCommand::SelectCall(call) => {
            if let Some(status) = &state.selected_status
                && !status.destination_level.allows_calls()
            {
                return Err(CoreError::DomainViolation(
                    DomainError::DestinationNotAllowed {
                        status_id: status.id.clone(),
                        destination: "call",
                    },
                ));
            }
            let mut new_state: WizardState = state.clone();
            new_state.destination = DestinationSelection::Call(call);
            new_state.destination_chosen_by_user = true;
            Ok(updated(new_state))
        }
        WizardCommand::SelectStation(station) => {
            if let Some(status) = &state.selected_status
                && !status.destination_level.allows_stations()
            {
                return Err(CoreError::DomainViolation(
                    DomainError::DestinationNotAllowed {
                        status_id: status.id.clone(),
                        destination: "station",
                    },
                ));
            }
            let mut new_state: WizardState = state.clone();
            new_state.destination = DestinationSelection::Station(station);
            new_state.destination_chosen_by_user = true;
            Ok(updated(new_state))
        }
        WizardCommand::SelectNoDestination => {
            let mut new_state: WizardState = state.clone();
            new_state.destination = DestinationSelection::None;
            new_state.destination_chosen_by_user = true;
            Ok(updated(new_state))
        }
        WizardCommand::SetNote(note) => {
            let mut new_state: WizardState = state.clone();
            new_state.note = note;
            Ok(updated(new_state))
        }
        WizardCommand::Advance => advance(state),
        WizardCommand::Retreat => retreat(state),
        WizardCommand::ActiveCallObserved { active_call_id } => {
            let mut new_state: WizardState = state.clone();
            if new_state.active_call_id != active_call_id
                && new_state.destination == DestinationSelection::None
                && !new_state.destination_chosen_by_user
            {
                new_state.preselection = Preselection::Idle;
            }
            new_state.active_call_id = active_call_id;
            reconcile_preselection(&mut new_state);
            Ok(updated(new_state))
        }
        WizardCommand::Open { .. }
        | WizardCommand::Close
        | WizardCommand::DestinationsLoading { .. }
        | WizardCommand::DestinationsLoaded { .. } => Err(wrong_step(name, state)),
    }
}

fn advance(state: &WizardState) -> Result<TransitionResult, CoreError> {
    let status: &StatusDefinition = state
        .selected_status
        .as_ref()
        .ok_or(CoreError::NoStatusSelected)?;

    let next: Option<WizardStep> = match state.step {
        WizardStep::SelectStatus => step_after_status(status),
        WizardStep::SelectDestination => {
            status.note_requirement.has_step().then_some(WizardStep::AddNote)
        }
        WizardStep::AddNote => {
            validate_note(status, &state.note)?;
            None
        }
    };

    match next {
        Some(step) => {
            let mut new_state: WizardState = state.clone();
            new_state.step = step;
            Ok(TransitionResult {
                new_state,
                outcome: TransitionOutcome::StepChanged(step),
            })
        }
        None => Ok(TransitionResult {
            new_state: state.clone(),
            outcome: TransitionOutcome::SubmitRequested,
        }),
    }
}

fn retreat(state: &WizardState) -> Result<TransitionResult, CoreError> {
    let previous: WizardStep = match state.step {
        WizardStep::SelectStatus => return Err(CoreError::NoPreviousStep),
        WizardStep::SelectDestination => WizardStep::SelectStatus,
        WizardStep::AddNote => {
            let has_destination: bool = state
                .selected_status
                .as_ref()
                .is_some_and(|status| status.destination_level.has_step());
            if has_destination {
                WizardStep::SelectDestination
            } else {
                WizardStep::SelectStatus
            }
        }
    };

    let mut new_state: WizardState = state.clone();
    new_state.step = previous;
    Ok(TransitionResult {
        new_state,
        outcome: TransitionOutcome::StepChanged(previous),
    })
}

/// The first step after a status is known, or `None` when the status
/// needs no further input.
const fn step_after_status(status: &StatusDefinition) -> Option<WizardStep> {
    if status.is_immediate() {
        None
    } else if status.destination_level.has_step() {
        Some(WizardStep::SelectDestination)
    } else {
        Some(WizardStep::AddNote)
    }
}

/// Whether `Advance` would succeed from the current state.
///
/// The UI uses this to disable the next/submit action instead of letting
/// the user trigger a validation error.
#[must_use]
pub fn can_advance(state: &WizardState) -> bool {
    if !state.is_open {
        return false;
    }
    let Some(status) = state.selected_status.as_ref() else {
        return false;
    };
    match state.step {
        WizardStep::AddNote => validate_note(status, &state.note).is_ok(),
        WizardStep::SelectStatus | WizardStep::SelectDestination => true,
    }
}

/// Checks that the state can be turned into a submission.
///
/// # Errors
///
/// Returns an error if the wizard is closed, no status is selected, or the
/// note requirement is not met.
pub fn validate_submission(state: &WizardState) -> Result<&StatusDefinition, CoreError> {
    if !state.is_open {
        return Err(CoreError::WizardClosed);
    }
    let status: &StatusDefinition = state
        .selected_status
        .as_ref()
        .ok_or(CoreError::NoStatusSelected)?;
    validate_note(status, &state.note)?;
    Ok(status)
}

fn updated(new_state: WizardState) -> TransitionResult {
    TransitionResult {
        new_state,
        outcome: TransitionOutcome::Updated,
    }
}

fn discarded(state: &WizardState) -> TransitionResult {
    TransitionResult {
        new_state: state.clone(),
        outcome: TransitionOutcome::Discarded,
    }
}

const fn wrong_step(command: &'static str, state: &WizardState) -> CoreError {
    CoreError::WrongStep {
        command,
        step: state.step,
    }
}
