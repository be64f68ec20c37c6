// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    SESSION, create_test_call, create_test_station, create_test_status, load, open_with, step,
    transition,
};
use crate::{
    CoreError, DestinationSelection, SessionId, TransitionOutcome, TransitionResult,
    WizardCommand, WizardState, WizardStep, apply,
};
use field_status_domain::{DestinationType, DomainError};

#[test]
fn test_open_without_status_starts_at_status_step() {
    let result: TransitionResult = transition(
        &WizardState::new(),
        WizardCommand::Open {
            session: SESSION,
            status: None,
            active_call_id: None,
        },
    );

    assert_eq!(
        result.outcome,
        TransitionOutcome::StepChanged(WizardStep::SelectStatus)
    );
    assert!(result.new_state.is_open());
    assert!(result.new_state.entered_via_status_selection());
    assert_eq!(result.new_state.session(), Some(SESSION));
}

#[test]
fn test_open_with_destination_status_starts_at_destination_step() {
    let state: WizardState = open_with(Some(create_test_status(3, 1)), None);
    assert_eq!(state.step(), WizardStep::SelectDestination);
    assert!(!state.entered_via_status_selection());
}

#[test]
fn test_open_with_note_only_status_starts_at_note_step() {
    let state: WizardState = open_with(Some(create_test_status(0, 2)), None);
    assert_eq!(state.step(), WizardStep::AddNote);
}

#[test]
fn test_open_with_immediate_status_requests_submission() {
    let result: TransitionResult = transition(
        &WizardState::new(),
        WizardCommand::Open {
            session: SESSION,
            status: Some(create_test_status(0, 0)),
            active_call_id: None,
        },
    );
    assert_eq!(result.outcome, TransitionOutcome::SubmitRequested);
    assert!(result.new_state.is_open());
}

#[test]
fn test_open_twice_is_rejected() {
    let state: WizardState = open_with(None, None);
    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        WizardCommand::Open {
            session: SessionId::new(2),
            status: None,
            active_call_id: None,
        },
    );
    assert_eq!(result.unwrap_err(), CoreError::WizardAlreadyOpen);
}

#[test]
fn test_commands_on_closed_wizard_are_rejected() {
    let result = apply(&WizardState::new(), WizardCommand::Advance);
    assert_eq!(result.unwrap_err(), CoreError::WizardClosed);

    let result = apply(&WizardState::new(), WizardCommand::SelectNoDestination);
    assert_eq!(result.unwrap_err(), CoreError::WizardClosed);
}

#[test]
fn test_select_call_clears_station() {
    let state: WizardState = open_with(Some(create_test_status(3, 0)), None);
    let state: WizardState = step(
        &state,
        WizardCommand::SelectStation(create_test_station("g-1")),
    );
    assert_eq!(state.destination_type(), DestinationType::Station);

    let state: WizardState = step(&state, WizardCommand::SelectCall(create_test_call("c-1")));
    assert_eq!(state.destination_type(), DestinationType::Call);
    assert_eq!(state.selected_call().unwrap().id, "c-1");
    assert!(state.selected_station().is_none());
}

#[test]
fn test_select_station_clears_call() {
    let state: WizardState = open_with(Some(create_test_status(3, 0)), None);
    let state: WizardState = step(&state, WizardCommand::SelectCall(create_test_call("c-1")));
    let state: WizardState = step(
        &state,
        WizardCommand::SelectStation(create_test_station("g-1")),
    );
    assert_eq!(state.destination_type(), DestinationType::Station);
    assert!(state.selected_call().is_none());
    assert_eq!(state.selected_station().unwrap().id, "g-1");
}

#[test]
fn test_select_no_destination_clears_both() {
    let state: WizardState = open_with(Some(create_test_status(3, 0)), None);
    let state: WizardState = step(&state, WizardCommand::SelectCall(create_test_call("c-1")));
    let state: WizardState = step(&state, WizardCommand::SelectNoDestination);
    assert_eq!(state.destination(), &DestinationSelection::None);
    assert!(state.selected_call().is_none());
    assert!(state.selected_station().is_none());
}

#[test]
fn test_station_only_status_rejects_call() {
    let state: WizardState = open_with(Some(create_test_status(1, 0)), None);
    let result = apply(&state, WizardCommand::SelectCall(create_test_call("c-1")));
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::DestinationNotAllowed {
            destination: "call",
            ..
        })
    ));
}

#[test]
fn test_call_only_status_rejects_station() {
    let state: WizardState = open_with(Some(create_test_status(2, 0)), None);
    let result = apply(
        &state,
        WizardCommand::SelectStation(create_test_station("g-1")),
    );
    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::DestinationNotAllowed { .. })
    ));
}

#[test]
fn test_select_status_only_on_status_step() {
    let state: WizardState = open_with(Some(create_test_status(3, 0)), None);
    let result = apply(&state, WizardCommand::SelectStatus(create_test_status(0, 0)));
    assert_eq!(
        result.unwrap_err(),
        CoreError::WrongStep {
            command: "SelectStatus",
            step: WizardStep::SelectDestination,
        }
    );
}

#[test]
fn test_changing_status_clears_destination() {
    let state: WizardState = open_with(None, None);
    let state: WizardState = step(&state, WizardCommand::SelectStatus(create_test_status(3, 0)));
    let state: WizardState = step(&state, WizardCommand::Advance);
    let state: WizardState = step(&state, WizardCommand::SelectCall(create_test_call("c-1")));
    let state: WizardState = step(&state, WizardCommand::Retreat);

    let state: WizardState = step(&state, WizardCommand::SelectStatus(create_test_status(1, 0)));
    assert_eq!(state.destination(), &DestinationSelection::None);

    // Re-selecting the same status keeps the choice.
    let state: WizardState = step(&state, WizardCommand::Advance);
    let state: WizardState = step(
        &state,
        WizardCommand::SelectStation(create_test_station("g-1")),
    );
    let state: WizardState = step(&state, WizardCommand::Retreat);
    let state: WizardState = step(&state, WizardCommand::SelectStatus(create_test_status(1, 0)));
    assert_eq!(state.selected_station().unwrap().id, "g-1");
}

#[test]
fn test_set_note_replaces_text() {
    let state: WizardState = open_with(Some(create_test_status(0, 1)), None);
    let state: WizardState = step(&state, WizardCommand::SetNote(String::from("first")));
    let state: WizardState = step(&state, WizardCommand::SetNote(String::from("second")));
    assert_eq!(state.note(), "second");
}

#[test]
fn test_destinations_loaded_populates_lists() {
    let state: WizardState = open_with(Some(create_test_status(3, 0)), None);
    let state: WizardState = step(
        &state,
        WizardCommand::DestinationsLoading { session: SESSION },
    );
    assert!(state.is_loading_destinations());

    let state: WizardState = load(
        &state,
        vec![create_test_call("c-1"), create_test_call("c-2")],
        vec![create_test_station("g-1")],
    );
    assert!(!state.is_loading_destinations());
    assert!(state.destinations_loaded());
    assert_eq!(state.available_calls().len(), 2);
    assert_eq!(state.available_calls()[1].id, "c-2");
    assert_eq!(state.available_stations().len(), 1);
}

#[test]
fn test_stale_destination_results_are_discarded() {
    let state: WizardState = open_with(Some(create_test_status(3, 0)), None);
    let result: TransitionResult = transition(
        &state,
        WizardCommand::DestinationsLoaded {
            session: SessionId::new(99),
            calls: vec![create_test_call("c-1")],
            stations: Vec::new(),
        },
    );
    assert_eq!(result.outcome, TransitionOutcome::Discarded);
    assert!(result.new_state.available_calls().is_empty());
    assert!(!result.new_state.destinations_loaded());
}

#[test]
fn test_results_after_close_are_discarded() {
    let state: WizardState = open_with(Some(create_test_status(3, 0)), None);
    let closed: WizardState = step(&state, WizardCommand::Close);
    let result: TransitionResult = transition(
        &closed,
        WizardCommand::DestinationsLoaded {
            session: SESSION,
            calls: vec![create_test_call("c-1")],
            stations: Vec::new(),
        },
    );
    assert_eq!(result.outcome, TransitionOutcome::Discarded);
    assert_eq!(result.new_state, WizardState::default());
}

#[test]
fn test_needs_destinations_once_status_known() {
    let state: WizardState = open_with(None, None);
    assert!(!state.needs_destinations());

    let state: WizardState = step(&state, WizardCommand::SelectStatus(create_test_status(0, 1)));
    assert!(state.needs_destinations());

    let state: WizardState = step(
        &state,
        WizardCommand::DestinationsLoading { session: SESSION },
    );
    assert!(!state.needs_destinations());

    let state: WizardState = load(&state, Vec::new(), Vec::new());
    assert!(!state.needs_destinations());
}
