// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{SessionId, TransitionResult, WizardCommand, WizardState, apply};
use field_status_domain::{
    CallCandidate, DestinationLevel, NoteRequirement, StationCandidate, StatusDefinition,
};

pub const SESSION: SessionId = SessionId::new(1);

pub fn create_test_status(destination: u8, note: u8) -> StatusDefinition {
    StatusDefinition::new(
        format!("st-{destination}{note}"),
        "Test Status",
        DestinationLevel::from_code(destination).unwrap(),
        NoteRequirement::from_code(note).unwrap(),
    )
}

pub fn create_test_call(id: &str) -> CallCandidate {
    CallCandidate::new(id, format!("C{id}"), "Structure Fire", "1 Main St")
}

pub fn create_test_station(id: &str) -> StationCandidate {
    StationCandidate::new(id, "Station 1", "10 Station Rd", "Station")
}

/// Applies a command and returns the new state, panicking on error.
pub fn step(state: &WizardState, command: WizardCommand) -> WizardState {
    apply(state, command).unwrap().new_state
}

/// Applies a command and returns the full transition, panicking on error.
pub fn transition(state: &WizardState, command: WizardCommand) -> TransitionResult {
    apply(state, command).unwrap()
}

pub fn open_with(status: Option<StatusDefinition>, active_call_id: Option<&str>) -> WizardState {
    step(
        &WizardState::new(),
        WizardCommand::Open {
            session: SESSION,
            status,
            active_call_id: active_call_id.map(ToString::to_string),
        },
    )
}

pub fn load(
    state: &WizardState,
    calls: Vec<CallCandidate>,
    stations: Vec<StationCandidate>,
) -> WizardState {
    step(
        state,
        WizardCommand::DestinationsLoaded {
            session: SESSION,
            calls,
            stations,
        },
    )
}
