// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::SessionId;
use field_status_domain::{CallCandidate, StationCandidate, StatusDefinition};

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request wizard state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardCommand {
    /// Open a new wizard session.
    Open {
        /// Identifier for the new session. Asynchronous results must carry it.
        session: SessionId,
        /// A pre-chosen status, or `None` to start at status selection.
        status: Option<StatusDefinition>,
        /// The unit's active call at open time.
        active_call_id: Option<String>,
    },
    /// Choose the status while on the status step.
    SelectStatus(StatusDefinition),
    /// Choose a call as destination.
    SelectCall(CallCandidate),
    /// Choose a station as destination.
    SelectStation(StationCandidate),
    /// Explicitly choose no destination.
    SelectNoDestination,
    /// Replace the note text.
    SetNote(String),
    /// Move to the next step, or request submission from the last one.
    Advance,
    /// Move to the previous step.
    Retreat,
    /// Destination candidates are being fetched for `session`.
    DestinationsLoading {
        /// The session the fetch was issued for.
        session: SessionId,
    },
    /// Destination candidates arrived for `session`.
    DestinationsLoaded {
        /// The session the fetch was issued for.
        session: SessionId,
        /// Calls, in provider order. Empty when the fetch failed.
        calls: Vec<CallCandidate>,
        /// Stations, in provider order. Empty when the fetch failed.
        stations: Vec<StationCandidate>,
    },
    /// The ambient active call changed.
    ActiveCallObserved {
        /// The new active call, if any.
        active_call_id: Option<String>,
    },
    /// Close the wizard and clear every field.
    Close,
}

impl WizardCommand {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Open { .. } => "Open",
            Self::SelectStatus(_) => "SelectStatus",
            Self::SelectCall(_) => "SelectCall",
            Self::SelectStation(_) => "SelectStation",
            Self::SelectNoDestination => "SelectNoDestination",
            Self::SetNote(_) => "SetNote",
            Self::Advance => "Advance",
            Self::Retreat => "Retreat",
            Self::DestinationsLoading { .. } => "DestinationsLoading",
            Self::DestinationsLoaded { .. } => "DestinationsLoaded",
            Self::ActiveCallObserved { .. } => "ActiveCallObserved",
            Self::Close => "Close",
        }
    }
}
