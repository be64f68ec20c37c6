// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::WizardState;
use field_status_domain::{CallCandidate, DestinationType, StationCandidate};

/// What the destination line of the wizard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationDisplay<'a> {
    /// An explicitly selected call.
    Call(&'a CallCandidate),
    /// An explicitly selected station.
    Station(&'a StationCandidate),
    /// The active call is pre-selected but its candidate has not loaded.
    Loading,
    /// No destination.
    NoDestination,
}

/// Resolves the destination to display.
///
/// Precedence is fixed: a concrete call or station first, then the loading
/// placeholder (call type chosen, active call set, no call object yet),
/// then "no destination". A pending pre-selection therefore never looks
/// like an explicit "none".
#[must_use]
pub fn resolve_destination_display(state: &WizardState) -> DestinationDisplay<'_> {
    if let Some(call) = state.selected_call() {
        return DestinationDisplay::Call(call);
    }
    if let Some(station) = state.selected_station() {
        return DestinationDisplay::Station(station);
    }
    if state.destination_type() == DestinationType::Call && state.active_call_id().is_some() {
        return DestinationDisplay::Loading;
    }
    DestinationDisplay::NoDestination
}
