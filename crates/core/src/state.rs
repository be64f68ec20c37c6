// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use field_status_domain::{CallCandidate, DestinationType, StationCandidate, StatusDefinition};

/// Identifies one wizard session, from open to close.
///
/// Allocated by the caller; must not repeat within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    /// Wraps a raw session number.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw session number.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A visible wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WizardStep {
    /// Pick a status.
    #[default]
    SelectStatus,
    /// Pick a call, a station, or no destination.
    SelectDestination,
    /// Enter a note.
    AddNote,
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelectStatus => write!(f, "SelectStatus"),
            Self::SelectDestination => write!(f, "SelectDestination"),
            Self::AddNote => write!(f, "AddNote"),
        }
    }
}

/// The destination currently chosen.
///
/// Calls and stations are mutually exclusive by construction.
/// `PendingCall` is the optimistic pre-selection of the unit's active call
/// while candidates are still loading: it reports `DestinationType::Call`
/// but has no concrete call yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DestinationSelection {
    /// No destination.
    #[default]
    None,
    /// A concrete call.
    Call(CallCandidate),
    /// A concrete station.
    Station(StationCandidate),
    /// The active call, awaiting its candidate.
    PendingCall {
        /// The active call identifier being waited on.
        call_id: String,
    },
}

impl DestinationSelection {
    /// The destination kind.
    #[must_use]
    pub const fn destination_type(&self) -> DestinationType {
        match self {
            Self::None => DestinationType::None,
            Self::Call(_) | Self::PendingCall { .. } => DestinationType::Call,
            Self::Station(_) => DestinationType::Station,
        }
    }

    /// The concrete call, if one is selected.
    #[must_use]
    pub const fn selected_call(&self) -> Option<&CallCandidate> {
        match self {
            Self::Call(call) => Some(call),
            _ => None,
        }
    }

    /// The concrete station, if one is selected.
    #[must_use]
    pub const fn selected_station(&self) -> Option<&StationCandidate> {
        match self {
            Self::Station(station) => Some(station),
            _ => None,
        }
    }

    /// Whether this is the optimistic pre-selection.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::PendingCall { .. })
    }

    /// The identifier sent as `respondingToId`; `None` for no destination.
    ///
    /// A pending call still names the active call it stands for.
    #[must_use]
    pub fn responding_to_id(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Call(call) => Some(call.id.as_str()),
            Self::Station(station) => Some(station.id.as_str()),
            Self::PendingCall { call_id } => Some(call_id.as_str()),
        }
    }
}

/// Progress of the active-call pre-selection within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preselection {
    /// Not attempted yet.
    #[default]
    Idle,
    /// A `PendingCall` was placed and waits for candidates.
    Pending,
    /// Resolved or abandoned; never runs again for this status.
    Spent,
}

/// The wizard state, scoped to one open session.
///
/// `WizardState::default()` is the closed state; closing always returns to it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WizardState {
    pub(crate) session: Option<SessionId>,
    pub(crate) is_open: bool,
    pub(crate) step: WizardStep,
    pub(crate) entered_via_status_selection: bool,
    pub(crate) selected_status: Option<StatusDefinition>,
    pub(crate) destination: DestinationSelection,
    pub(crate) note: String,
    pub(crate) available_calls: Vec<CallCandidate>,
    pub(crate) available_stations: Vec<StationCandidate>,
    pub(crate) is_loading_destinations: bool,
    pub(crate) destinations_loaded: bool,
    pub(crate) active_call_id: Option<String>,
    pub(crate) preselection: Preselection,
    pub(crate) destination_chosen_by_user: bool,
}

impl WizardState {
    /// Creates a closed wizard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The open session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<SessionId> {
        self.session
    }

    /// Whether the wizard is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// The current step.
    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.step
    }

    /// Whether the session began without a pre-chosen status.
    #[must_use]
    pub const fn entered_via_status_selection(&self) -> bool {
        self.entered_via_status_selection
    }

    /// The selected status.
    #[must_use]
    pub const fn selected_status(&self) -> Option<&StatusDefinition> {
        self.selected_status.as_ref()
    }

    /// The destination selection.
    #[must_use]
    pub const fn destination(&self) -> &DestinationSelection {
        &self.destination
    }

    /// The destination kind.
    #[must_use]
    pub const fn destination_type(&self) -> DestinationType {
        self.destination.destination_type()
    }

    /// The selected call.
    #[must_use]
    pub const fn selected_call(&self) -> Option<&CallCandidate> {
        self.destination.selected_call()
    }

    /// The selected station.
    #[must_use]
    pub const fn selected_station(&self) -> Option<&StationCandidate> {
        self.destination.selected_station()
    }

    /// The note text.
    #[must_use]
    pub fn note(&self) -> &str {
        &self.note
    }

    /// Calls loaded for this session.
    #[must_use]
    pub fn available_calls(&self) -> &[CallCandidate] {
        &self.available_calls
    }

    /// Stations loaded for this session.
    #[must_use]
    pub fn available_stations(&self) -> &[StationCandidate] {
        &self.available_stations
    }

    /// Whether destination candidates are being fetched.
    #[must_use]
    pub const fn is_loading_destinations(&self) -> bool {
        self.is_loading_destinations
    }

    /// Whether a destination fetch has completed for this session.
    #[must_use]
    pub const fn destinations_loaded(&self) -> bool {
        self.destinations_loaded
    }

    /// The ambient active call seen by this session.
    #[must_use]
    pub fn active_call_id(&self) -> Option<&str> {
        self.active_call_id.as_deref()
    }

    /// Pre-selection progress.
    #[must_use]
    pub const fn preselection(&self) -> Preselection {
        self.preselection
    }

    /// Whether destination candidates should be fetched now: open, a status
    /// is known, and no fetch has started or finished.
    #[must_use]
    pub const fn needs_destinations(&self) -> bool {
        self.is_open
            && self.selected_status.is_some()
            && !self.is_loading_destinations
            && !self.destinations_loaded
    }

    /// Whether `session` is the session currently open.
    #[must_use]
    pub fn is_live(&self, session: SessionId) -> bool {
        self.is_open && self.session == Some(session)
    }
}

/// The result of a successful wizard transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: WizardState,
    /// What the caller must do next.
    pub outcome: TransitionOutcome,
}

/// What a transition means for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// State changed in place; same step.
    Updated,
    /// The wizard moved to a new step.
    StepChanged(WizardStep),
    /// No further step: the caller must submit now.
    SubmitRequested,
    /// The command belonged to a stale session and was ignored.
    Discarded,
    /// The wizard closed and was cleared.
    Closed,
}
