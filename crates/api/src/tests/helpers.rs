// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory collaborators for session tests.

use async_trait::async_trait;
use field_status_domain::{
    CallCandidate, DestinationLevel, NoteRequirement, QueuedStatusChange, RoleAssignment,
    StationCandidate, StatusDefinition, SubmissionRecord, Telemetry,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use time::macros::{datetime, offset};
use time::{OffsetDateTime, UtcOffset};
use tokio::sync::{Notify, mpsc};

use crate::{
    ActiveCallCommand, Clock, CollaboratorError, Collaborators, DestinationProvider,
    NotificationKind, Notifier, OfflineQueue, Reconciler, RoleAssignmentSource,
    StatusChangeSession, StatusTransport, TelemetrySource, UnitContext,
};

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

#[derive(Default)]
pub struct FakeDestinations {
    pub calls: Mutex<Vec<CallCandidate>>,
    pub stations: Mutex<Vec<StationCandidate>>,
    pub fail_calls: AtomicBool,
    pub fail_stations: AtomicBool,
    pub fetches: AtomicUsize,
    pub gate: Option<Arc<Notify>>,
}

#[async_trait]
impl DestinationProvider for FakeDestinations {
    async fn fetch_calls(&self, _unit_id: &str) -> Result<Vec<CallCandidate>, CollaboratorError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail_calls.load(Ordering::SeqCst) {
            return Err(CollaboratorError::new("calls", "timeout"));
        }
        Ok(self.calls.lock().unwrap().clone())
    }

    async fn fetch_stations(
        &self,
        _unit_id: &str,
    ) -> Result<Vec<StationCandidate>, CollaboratorError> {
        if self.fail_stations.load(Ordering::SeqCst) {
            return Err(CollaboratorError::new("stations", "server error"));
        }
        Ok(self.stations.lock().unwrap().clone())
    }
}

/// Records deliveries; can fail or hold each delivery until released.
#[derive(Default)]
pub struct FakeTransport {
    pub delivered: Mutex<Vec<SubmissionRecord>>,
    pub attempts: AtomicUsize,
    pub fail: AtomicBool,
    pub gate: Option<Arc<Notify>>,
}

#[async_trait]
impl StatusTransport for FakeTransport {
    async fn deliver_status_change(
        &self,
        record: &SubmissionRecord,
    ) -> Result<(), CollaboratorError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(CollaboratorError::new("transport", "network unreachable"));
        }
        self.delivered.lock().unwrap().push(record.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeQueue {
    pub queued: Mutex<Vec<QueuedStatusChange>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl OfflineQueue for FakeQueue {
    async fn enqueue_for_later_delivery(
        &self,
        change: QueuedStatusChange,
    ) -> Result<(), CollaboratorError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CollaboratorError::new("offline queue", "disk full"));
        }
        self.queued.lock().unwrap().push(change);
        Ok(())
    }
}

pub struct FakeTelemetry(pub Mutex<Telemetry>);

impl TelemetrySource for FakeTelemetry {
    fn current_telemetry(&self) -> Telemetry {
        self.0.lock().unwrap().clone()
    }
}

pub struct FakeRoles(pub Vec<RoleAssignment>);

impl RoleAssignmentSource for FakeRoles {
    fn role_assignments(&self, _unit_id: &str) -> Vec<RoleAssignment> {
        self.0.clone()
    }
}

/// Ambient unit context that also records active call writes.
#[derive(Default)]
pub struct FakeUnitContext {
    pub unit_id: Mutex<Option<String>>,
    pub active_call_id: Mutex<Option<String>>,
    pub set_calls: Mutex<Vec<(String, String)>>,
}

impl UnitContext for FakeUnitContext {
    fn active_unit_id(&self) -> Option<String> {
        self.unit_id.lock().unwrap().clone()
    }

    fn active_call_id(&self) -> Option<String> {
        self.active_call_id.lock().unwrap().clone()
    }
}

impl ActiveCallCommand for FakeUnitContext {
    fn set_active_call(&self, unit_id: &str, call_id: &str) -> Result<(), CollaboratorError> {
        self.set_calls
            .lock()
            .unwrap()
            .push((unit_id.to_string(), call_id.to_string()));
        *self.active_call_id.lock().unwrap() = Some(call_id.to_string());
        Ok(())
    }
}

pub struct FakeReconciler {
    pub tx: mpsc::UnboundedSender<String>,
    pub fail: AtomicBool,
}

#[async_trait]
impl Reconciler for FakeReconciler {
    async fn refresh_active_unit(&self, unit_id: &str) -> Result<(), CollaboratorError> {
        let _ = self.tx.send(unit_id.to_string());
        if self.fail.load(Ordering::SeqCst) {
            return Err(CollaboratorError::new("reconciler", "offline"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notifications: Mutex<Vec<(NotificationKind, String)>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        self.notifications
            .lock()
            .unwrap()
            .push((kind, message.to_string()));
    }
}

pub const TEST_NOW: OffsetDateTime = datetime!(2026-03-01 15:30:00 UTC);

pub struct FixedClock;

impl Clock for FixedClock {
    fn now_utc(&self) -> OffsetDateTime {
        TEST_NOW
    }

    fn local_offset(&self) -> UtcOffset {
        offset!(-5)
    }
}

/// All fakes for one session, with handles kept for assertions.
pub struct Harness {
    pub destinations: Arc<FakeDestinations>,
    pub transport: Arc<FakeTransport>,
    pub queue: Arc<FakeQueue>,
    pub telemetry: Arc<FakeTelemetry>,
    pub unit: Arc<FakeUnitContext>,
    pub reconciler: Arc<FakeReconciler>,
    pub notifier: Arc<RecordingNotifier>,
    pub roles: Vec<RoleAssignment>,
    pub with_queue: bool,
    pub reconciled: mpsc::UnboundedReceiver<String>,
}

impl Harness {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let destinations: FakeDestinations = FakeDestinations::default();
        *destinations.calls.lock().unwrap() =
            vec![create_test_call("call-1"), create_test_call("call-2")];
        *destinations.stations.lock().unwrap() = vec![create_test_station("station-1")];
        let unit: FakeUnitContext = FakeUnitContext::default();
        *unit.unit_id.lock().unwrap() = Some(String::from("unit-7"));

        Self {
            destinations: Arc::new(destinations),
            transport: Arc::new(FakeTransport::default()),
            queue: Arc::new(FakeQueue::default()),
            telemetry: Arc::new(FakeTelemetry(Mutex::new(Telemetry::unavailable()))),
            unit: Arc::new(unit),
            reconciler: Arc::new(FakeReconciler {
                tx,
                fail: AtomicBool::new(false),
            }),
            notifier: Arc::new(RecordingNotifier::default()),
            roles: vec![
                RoleAssignment::new("driver", "user-1"),
                RoleAssignment::new("medic", ""),
                RoleAssignment::new("officer", "user-3"),
            ],
            with_queue: true,
            reconciled: rx,
        }
    }

    pub fn with_active_call(self, call_id: &str) -> Self {
        *self.unit.active_call_id.lock().unwrap() = Some(call_id.to_string());
        self
    }

    pub fn with_gated_transport(mut self, gate: Arc<Notify>) -> Self {
        self.transport = Arc::new(FakeTransport {
            gate: Some(gate),
            ..FakeTransport::default()
        });
        self
    }

    pub fn with_gated_destinations(mut self, gate: Arc<Notify>) -> Self {
        let destinations: FakeDestinations = FakeDestinations {
            gate: Some(gate),
            ..FakeDestinations::default()
        };
        *destinations.calls.lock().unwrap() = self.destinations.calls.lock().unwrap().clone();
        *destinations.stations.lock().unwrap() =
            self.destinations.stations.lock().unwrap().clone();
        self.destinations = Arc::new(destinations);
        self
    }

    pub fn without_queue(mut self) -> Self {
        self.with_queue = false;
        self
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            destinations: self.destinations.clone(),
            transport: self.transport.clone(),
            queue: self
                .with_queue
                .then(|| self.queue.clone() as Arc<dyn OfflineQueue>),
            telemetry: self.telemetry.clone(),
            roles: Arc::new(FakeRoles(self.roles.clone())),
            unit: self.unit.clone(),
            active_call: self.unit.clone(),
            reconciler: self.reconciler.clone(),
            notifier: self.notifier.clone(),
            clock: Arc::new(FixedClock),
        }
    }

    pub fn session(&self) -> StatusChangeSession {
        StatusChangeSession::new(self.collaborators())
    }

    pub fn delivered(&self) -> Vec<SubmissionRecord> {
        self.transport.delivered.lock().unwrap().clone()
    }

    pub fn queued(&self) -> Vec<QueuedStatusChange> {
        self.queue.queued.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<(NotificationKind, String)> {
        self.notifier.notifications.lock().unwrap().clone()
    }

    pub fn active_call_writes(&self) -> Vec<(String, String)> {
        self.unit.set_calls.lock().unwrap().clone()
    }

    /// Waits for the next reconciliation request.
    pub async fn next_reconciliation(&mut self) -> String {
        tokio::time::timeout(std::time::Duration::from_secs(5), self.reconciled.recv())
            .await
            .expect("reconciliation was not requested")
            .expect("reconciler channel closed")
    }
}
