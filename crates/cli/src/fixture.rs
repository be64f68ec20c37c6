// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collaborators backed by a [`Fixture`] and the local terminal.

use async_trait::async_trait;
use field_status_api::{
    ActiveCallCommand, CollaboratorError, Collaborators, DestinationProvider, NotificationKind,
    Notifier, OfflineQueue, Reconciler, RoleAssignmentSource, StatusTransport, SystemClock,
    TelemetrySource, UnitContext,
};
use field_status_domain::{
    CallCandidate, RoleAssignment, StationCandidate, SubmissionRecord, Telemetry,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{error, info};

use crate::config::Fixture;

/// Serves destinations from the fixture.
#[derive(Debug)]
pub struct FixtureDestinations {
    calls: Vec<CallCandidate>,
    stations: Vec<StationCandidate>,
}

#[async_trait]
impl DestinationProvider for FixtureDestinations {
    async fn fetch_calls(&self, _unit_id: &str) -> Result<Vec<CallCandidate>, CollaboratorError> {
        Ok(self.calls.clone())
    }

    async fn fetch_stations(
        &self,
        _unit_id: &str,
    ) -> Result<Vec<StationCandidate>, CollaboratorError> {
        Ok(self.stations.clone())
    }
}

/// Prints delivered records as JSON. In offline mode every delivery fails.
#[derive(Debug, Clone, Copy)]
pub struct StdoutTransport {
    pub offline: bool,
}

#[async_trait]
impl StatusTransport for StdoutTransport {
    async fn deliver_status_change(
        &self,
        record: &SubmissionRecord,
    ) -> Result<(), CollaboratorError> {
        if self.offline {
            return Err(CollaboratorError::new("transport", "offline mode"));
        }
        let json: String = serde_json::to_string_pretty(record)
            .map_err(|e| CollaboratorError::new("transport", e.to_string()))?;
        println!("{json}");
        Ok(())
    }
}

/// The fixture's fixed position, if any.
#[derive(Debug)]
pub struct FixtureTelemetry(Option<Telemetry>);

impl TelemetrySource for FixtureTelemetry {
    fn current_telemetry(&self) -> Telemetry {
        self.0.clone().unwrap_or_default()
    }
}

/// The fixture's role assignments.
#[derive(Debug)]
pub struct FixtureRoles(Vec<RoleAssignment>);

impl RoleAssignmentSource for FixtureRoles {
    fn role_assignments(&self, _unit_id: &str) -> Vec<RoleAssignment> {
        self.0.clone()
    }
}

/// Ambient unit context for one run.
#[derive(Debug)]
pub struct FixtureUnit {
    unit_id: String,
    active_call_id: Mutex<Option<String>>,
}

impl FixtureUnit {
    fn active_call(&self) -> MutexGuard<'_, Option<String>> {
        self.active_call_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl UnitContext for FixtureUnit {
    fn active_unit_id(&self) -> Option<String> {
        Some(self.unit_id.clone())
    }

    fn active_call_id(&self) -> Option<String> {
        self.active_call().clone()
    }
}

impl ActiveCallCommand for FixtureUnit {
    fn set_active_call(&self, unit_id: &str, call_id: &str) -> Result<(), CollaboratorError> {
        *self.active_call() = Some(call_id.to_string());
        println!("Active call for {unit_id} is now {call_id}");
        Ok(())
    }
}

/// Nothing to refresh locally; records that reconciliation was requested.
#[derive(Debug)]
pub struct LoggingReconciler;

#[async_trait]
impl Reconciler for LoggingReconciler {
    async fn refresh_active_unit(&self, unit_id: &str) -> Result<(), CollaboratorError> {
        info!(unit_id, "Reconciliation requested");
        Ok(())
    }
}

/// Writes notifications to the terminal.
#[derive(Debug)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Success => println!("{message}"),
            NotificationKind::Error => {
                error!(message, "Status change failed");
                eprintln!("{message}");
            }
        }
    }
}

/// Builds the collaborator set for a fixture.
pub fn collaborators(
    fixture: &Fixture,
    transport: StdoutTransport,
    queue: Option<Arc<dyn OfflineQueue>>,
) -> Collaborators {
    let unit: Arc<FixtureUnit> = Arc::new(FixtureUnit {
        unit_id: fixture.unit_id.clone(),
        active_call_id: Mutex::new(fixture.active_call_id.clone()),
    });

    Collaborators {
        destinations: Arc::new(FixtureDestinations {
            calls: fixture.calls.clone(),
            stations: fixture.stations.clone(),
        }),
        transport: Arc::new(transport),
        queue,
        telemetry: Arc::new(FixtureTelemetry(fixture.telemetry.clone())),
        roles: Arc::new(FixtureRoles(fixture.roles.clone())),
        unit: unit.clone(),
        active_call: unit,
        reconciler: Arc::new(LoggingReconciler),
        notifier: Arc::new(TerminalNotifier),
        clock: Arc::new(SystemClock),
    }
}
