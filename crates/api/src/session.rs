// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The status change session.
//!
//! Drives the pure wizard state machine from UI actions, fetches
//! destinations, and hands finished wizards to the submission pipeline.
//! The state lock is never held across a collaborator call; results that
//! arrive after the session changed are discarded by the core.

use field_status::{
    SessionId, StepProgress, TransitionOutcome, TransitionResult, WizardCommand, WizardState,
    WizardStep, apply, can_advance, step_progress,
};
use field_status_domain::{
    CallCandidate, PositionFields, StationCandidate, StatusDefinition, SubmissionRecord,
};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::destinations::{DestinationLoadReport, fetch_destinations};
use crate::error::ApiError;
use crate::ports::Collaborators;
use crate::record::{SubmissionDraft, build_submission_record};
use crate::submit::{SubmissionPipeline, SubmitOutcome};

/// Where the wizard ended up after a navigation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progression {
    /// The wizard is showing this step.
    Step(WizardStep),
    /// There was no further step and a submission ran.
    Submitted(SubmitOutcome),
}

/// One status change wizard bound to its collaborators.
#[derive(Debug)]
pub struct StatusChangeSession {
    state: Mutex<WizardState>,
    pipeline: SubmissionPipeline,
    collaborators: Collaborators,
    next_session: AtomicU64,
}

impl StatusChangeSession {
    /// Creates a closed session.
    #[must_use]
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            state: Mutex::new(WizardState::new()),
            pipeline: SubmissionPipeline::new(collaborators.clone()),
            collaborators,
            next_session: AtomicU64::new(1),
        }
    }

    /// Opens the wizard, optionally with a status already chosen.
    ///
    /// Opening with a status that needs no steps submits immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if no unit is active, the wizard is already open,
    /// or the immediate submission fails.
    pub async fn open(&self, status: Option<StatusDefinition>) -> Result<Progression, ApiError> {
        let unit_id: String = self.active_unit_id()?;
        let session: SessionId =
            SessionId::new(self.next_session.fetch_add(1, Ordering::SeqCst));
        let active_call_id: Option<String> = self.collaborators.unit.active_call_id();

        info!(
            unit_id = %unit_id,
            session = %session,
            status_id = status.as_ref().map_or("", |s| s.id.as_str()),
            "Opening status change wizard"
        );

        let outcome: TransitionOutcome = self
            .transition(WizardCommand::Open {
                session,
                status,
                active_call_id,
            })
            .await?;

        self.follow(outcome).await
    }

    /// Chooses a status on the status step.
    ///
    /// # Errors
    ///
    /// Returns an error if the wizard is closed or not on the status step.
    pub async fn select_status(&self, status: StatusDefinition) -> Result<(), ApiError> {
        self.transition(WizardCommand::SelectStatus(status)).await?;
        self.load_destinations().await?;
        Ok(())
    }

    /// Chooses a call destination.
    ///
    /// Never changes the unit's active call.
    ///
    /// # Errors
    ///
    /// Returns an error if the wizard is closed or the status does not
    /// allow calls.
    pub async fn select_call(&self, call: CallCandidate) -> Result<(), ApiError> {
        self.transition(WizardCommand::SelectCall(call)).await?;
        Ok(())
    }

    /// Chooses a station destination.
    ///
    /// # Errors
    ///
    /// Returns an error if the wizard is closed or the status does not
    /// allow stations.
    pub async fn select_station(&self, station: StationCandidate) -> Result<(), ApiError> {
        self.transition(WizardCommand::SelectStation(station)).await?;
        Ok(())
    }

    /// Chooses no destination.
    ///
    /// # Errors
    ///
    /// Returns an error if the wizard is closed.
    pub async fn select_no_destination(&self) -> Result<(), ApiError> {
        self.transition(WizardCommand::SelectNoDestination).await?;
        Ok(())
    }

    /// Replaces the note.
    ///
    /// # Errors
    ///
    /// Returns an error if the wizard is closed.
    pub async fn set_note(&self, note: impl Into<String>) -> Result<(), ApiError> {
        self.transition(WizardCommand::SetNote(note.into())).await?;
        Ok(())
    }

    /// Moves to the next step, submitting when there is none.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` when the current step is incomplete (state is
    /// unchanged), or the submission error.
    pub async fn advance(&self) -> Result<Progression, ApiError> {
        let outcome: TransitionOutcome = self.transition(WizardCommand::Advance).await?;
        self.follow(outcome).await
    }

    /// Moves to the previous step.
    ///
    /// # Errors
    ///
    /// Returns an error if the wizard is closed or on the first step.
    pub async fn retreat(&self) -> Result<WizardStep, ApiError> {
        self.transition(WizardCommand::Retreat).await?;
        Ok(self.state.lock().await.step())
    }

    /// Closes the wizard and clears its state.
    pub async fn cancel(&self) {
        let mut state = self.state.lock().await;
        if state.is_open() {
            info!("Status change wizard cancelled");
        }
        *state = WizardState::default();
    }

    /// Re-reads the active call from the unit context.
    ///
    /// Re-runs the call pre-selection when the active call changed. Does
    /// nothing while the wizard is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is rejected.
    pub async fn refresh_active_call(&self) -> Result<(), ApiError> {
        let active_call_id: Option<String> = self.collaborators.unit.active_call_id();
        let mut state = self.state.lock().await;
        if !state.is_open() {
            return Ok(());
        }
        let result: TransitionResult =
            apply(&state, WizardCommand::ActiveCallObserved { active_call_id })?;
        *state = result.new_state;
        Ok(())
    }

    /// Fetches destinations if the open wizard needs them.
    ///
    /// Returns `None` when no fetch was needed. Results for a session that
    /// was closed or replaced meanwhile are discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if no unit is active.
    pub async fn load_destinations(&self) -> Result<Option<DestinationLoadReport>, ApiError> {
        let unit_id: String = self.active_unit_id()?;
        let session: SessionId = {
            let mut state = self.state.lock().await;
            let Some(session) = state.session().filter(|_| state.needs_destinations()) else {
                return Ok(None);
            };
            let result: TransitionResult =
                apply(&state, WizardCommand::DestinationsLoading { session })?;
            *state = result.new_state;
            session
        };

        let report: DestinationLoadReport =
            fetch_destinations(self.collaborators.destinations.as_ref(), &unit_id).await;

        let outcome: TransitionOutcome = self
            .transition(WizardCommand::DestinationsLoaded {
                session,
                calls: report.calls.clone(),
                stations: report.stations.clone(),
            })
            .await?;
        if outcome == TransitionOutcome::Discarded {
            debug!(session = %session, "Discarded destinations for a stale session");
        } else if !report.is_complete() {
            info!(
                session = %session,
                calls = report.calls.len(),
                stations = report.stations.len(),
                "Destinations partially loaded; no destination remains available"
            );
        }

        Ok(Some(report))
    }

    /// Submits the open wizard using ambient telemetry.
    ///
    /// # Errors
    ///
    /// See [`Self::submit_with_position`].
    pub async fn submit(&self) -> Result<SubmitOutcome, ApiError> {
        self.submit_with_position(None).await
    }

    /// Submits the open wizard.
    ///
    /// A position with coordinates is used as-is; otherwise the telemetry
    /// source is read. Returns `AlreadySubmitting` without doing anything
    /// while another submission is in flight. On a delivered or queued
    /// change the wizard closes and reconciliation starts; on failure the
    /// wizard stays open.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` if the wizard is incomplete, `DeliveryFailed` or
    /// `QueueingFailed` if the change was not accepted.
    pub async fn submit_with_position(
        &self,
        position: Option<PositionFields>,
    ) -> Result<SubmitOutcome, ApiError> {
        let Some(_guard) = self.pipeline.try_begin() else {
            debug!("Submission already in flight; ignoring");
            return Ok(SubmitOutcome::AlreadySubmitting);
        };

        let (session, draft): (Option<SessionId>, SubmissionDraft) = {
            let state = self.state.lock().await;
            let unit_id: String = self.active_unit_id()?;
            (state.session(), SubmissionDraft::from_state(&unit_id, &state)?)
        };

        let record: SubmissionRecord = build_submission_record(
            &draft,
            position,
            self.collaborators.telemetry.as_ref(),
            self.collaborators.roles.as_ref(),
            self.collaborators.clock.as_ref(),
        )?;

        let outcome: SubmitOutcome = self.pipeline.deliver(record).await?;

        self.pipeline
            .update_active_call(&draft.unit_id, draft.call_id.as_deref());

        {
            let mut state = self.state.lock().await;
            if session.is_some_and(|session| state.is_live(session)) {
                *state = WizardState::default();
            }
        }

        self.pipeline.reconcile(&draft.unit_id);

        Ok(outcome)
    }

    /// A copy of the current wizard state.
    pub async fn snapshot(&self) -> WizardState {
        self.state.lock().await.clone()
    }

    /// Step numbering for the open wizard.
    pub async fn progress(&self) -> StepProgress {
        step_progress(&*self.state.lock().await)
    }

    /// Whether the next/submit action is enabled.
    pub async fn can_advance(&self) -> bool {
        can_advance(&*self.state.lock().await)
    }

    /// Whether a submission is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.pipeline.is_submitting()
    }

    async fn transition(&self, command: WizardCommand) -> Result<TransitionOutcome, ApiError> {
        let mut state = self.state.lock().await;
        let result: TransitionResult = apply(&state, command)?;
        *state = result.new_state;
        Ok(result.outcome)
    }

    async fn follow(&self, outcome: TransitionOutcome) -> Result<Progression, ApiError> {
        if outcome == TransitionOutcome::SubmitRequested {
            return self.submit().await.map(Progression::Submitted);
        }
        self.load_destinations().await?;
        Ok(Progression::Step(self.state.lock().await.step()))
    }

    fn active_unit_id(&self) -> Result<String, ApiError> {
        self.collaborators
            .unit
            .active_unit_id()
            .filter(|id| !id.trim().is_empty())
            .ok_or(ApiError::NoActiveUnit)
    }
}
