// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Active-call pre-selection.
//!
//! When a unit already has an active call and the chosen status accepts a
//! call destination, that call is the obvious default. This module chooses
//! it without user action, at most once per status selection, and never
//! after the user has picked a destination (including "no destination").
//!
//! While candidates are still loading the selection is set to
//! [`DestinationSelection::PendingCall`] so "no destination" never appears
//! selected in the meantime.

use crate::state::{DestinationSelection, Preselection, WizardState};

/// Re-evaluates the pre-selection against the current state.
///
/// Idempotent: safe to call after any change of status, active call, or
/// destination candidates.
pub(crate) fn reconcile_preselection(state: &mut WizardState) {
    if !state.is_open
        || state.destination_chosen_by_user
        || state.preselection == Preselection::Spent
    {
        return;
    }

    let allows_calls: bool = state
        .selected_status
        .as_ref()
        .is_some_and(|status| status.destination_level.allows_calls());

    let active_call_id: Option<String> = state
        .active_call_id
        .clone()
        .filter(|id| !id.trim().is_empty());

    let (true, Some(active_call_id)) = (allows_calls, active_call_id) else {
        // The condition no longer holds; drop an optimistic placeholder.
        if state.destination.is_pending() {
            state.destination = DestinationSelection::None;
            state.preselection = Preselection::Idle;
        }
        return;
    };

    if !matches!(
        state.destination,
        DestinationSelection::None | DestinationSelection::PendingCall { .. }
    ) {
        return;
    }

    if state.destinations_loaded && !state.is_loading_destinations {
        if let Some(call) = state
            .available_calls
            .iter()
            .find(|call| call.id == active_call_id)
        {
            state.destination = DestinationSelection::Call(call.clone());
        } else {
            state.destination = DestinationSelection::None;
        }
        state.preselection = Preselection::Spent;
    } else {
        state.destination = DestinationSelection::PendingCall {
            call_id: active_call_id,
        };
        state.preselection = Preselection::Pending;
    }
}
