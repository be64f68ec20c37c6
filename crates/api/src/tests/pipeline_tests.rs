// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Delivery, queue fallback and the re-entrancy guard.

use field_status::WizardState;
use field_status_domain::{PositionFields, QueuedStatusChange, Telemetry};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::sync::Notify;

use crate::tests::helpers::{Harness, create_test_call, create_test_status};
use crate::{ApiError, NotificationKind, Progression, StatusChangeSession, SubmitOutcome};

#[tokio::test]
async fn test_rapid_repeated_submit_delivers_once() {
    let gate: Arc<Notify> = Arc::new(Notify::new());
    let harness: Harness = Harness::new().with_gated_transport(gate.clone());
    let session: StatusChangeSession = harness.session();

    session.open(Some(create_test_status(0, 1))).await.unwrap();

    let (first, (second, third)) = tokio::join!(session.submit(), async {
        tokio::task::yield_now().await;
        let second = session.submit().await;
        let third = session.submit().await;
        gate.notify_one();
        (second, third)
    });

    assert_eq!(first.unwrap(), SubmitOutcome::Delivered);
    assert_eq!(second.unwrap(), SubmitOutcome::AlreadySubmitting);
    assert_eq!(third.unwrap(), SubmitOutcome::AlreadySubmitting);
    assert_eq!(harness.transport.attempts.load(Ordering::SeqCst), 1);
    assert_eq!(harness.delivered().len(), 1);
    assert!(!session.is_submitting());
}

#[tokio::test]
async fn test_delivery_failure_queues_change_and_closes() {
    let mut harness: Harness = Harness::new();
    harness.transport.fail.store(true, Ordering::SeqCst);
    let session: StatusChangeSession = harness.session();

    session.open(Some(create_test_status(2, 1))).await.unwrap();
    session.select_call(create_test_call("call-2")).await.unwrap();
    session.set_note("en route").await.unwrap();
    session.advance().await.unwrap();

    assert_eq!(session.submit().await.unwrap(), SubmitOutcome::Queued);

    let queued: Vec<QueuedStatusChange> = harness.queued();
    assert_eq!(queued.len(), 1);
    assert_eq!(queued[0].status_type_id, "st-21");
    assert_eq!(queued[0].responding_to_id, "call-2");
    assert_eq!(queued[0].note, "en route");
    assert_eq!(
        queued[0].timestamp_utc.as_deref(),
        Some("2026-03-01T15:30:00Z")
    );
    assert!(harness.delivered().is_empty());

    assert_eq!(session.snapshot().await, WizardState::default());
    assert_eq!(
        harness.active_call_writes(),
        vec![(String::from("unit-7"), String::from("call-2"))]
    );
    assert_eq!(harness.notifications()[0].0, NotificationKind::Success);
    assert_eq!(harness.next_reconciliation().await, "unit-7");
}

#[tokio::test]
async fn test_delivery_failure_without_queue_keeps_wizard_open() {
    let mut harness: Harness = Harness::new().without_queue();
    harness.transport.fail.store(true, Ordering::SeqCst);
    let session: StatusChangeSession = harness.session();

    session.open(Some(create_test_status(0, 1))).await.unwrap();
    session.set_note("at hydrant").await.unwrap();

    let result: Result<SubmitOutcome, ApiError> = session.submit().await;
    assert!(matches!(result, Err(ApiError::DeliveryFailed(_))));

    let state: WizardState = session.snapshot().await;
    assert!(state.is_open());
    assert_eq!(state.note(), "at hydrant");
    assert!(!session.is_submitting());
    assert_eq!(
        harness.notifications(),
        vec![(NotificationKind::Error, String::from("Failed to update status"))]
    );
    assert!(harness.reconciled.try_recv().is_err());

    harness.transport.fail.store(false, Ordering::SeqCst);
    assert_eq!(session.submit().await.unwrap(), SubmitOutcome::Delivered);
    assert_eq!(harness.transport.attempts.load(Ordering::SeqCst), 2);
    assert_eq!(harness.next_reconciliation().await, "unit-7");
}

#[tokio::test]
async fn test_queueing_failure_is_critical_and_keeps_wizard_open() {
    let mut harness: Harness = Harness::new();
    harness.transport.fail.store(true, Ordering::SeqCst);
    harness.queue.fail.store(true, Ordering::SeqCst);
    let session: StatusChangeSession = harness.session();

    session.open(Some(create_test_status(2, 0))).await.unwrap();
    session.select_call(create_test_call("call-1")).await.unwrap();

    let result: Result<SubmitOutcome, ApiError> = session.submit().await;
    match result {
        Err(ApiError::QueueingFailed { delivery, queue }) => {
            assert_eq!(delivery.collaborator, "transport");
            assert_eq!(queue.collaborator, "offline queue");
        }
        other => panic!("expected a queueing failure, got {other:?}"),
    }

    assert!(session.snapshot().await.is_open());
    assert!(harness.active_call_writes().is_empty());
    assert_eq!(harness.notifications()[0].0, NotificationKind::Error);
    assert!(harness.reconciled.try_recv().is_err());
}

#[tokio::test]
async fn test_reconciliation_failure_does_not_reopen_wizard() {
    let mut harness: Harness = Harness::new();
    harness.reconciler.fail.store(true, Ordering::SeqCst);
    let session: StatusChangeSession = harness.session();

    let outcome: Progression = session.open(Some(create_test_status(0, 0))).await.unwrap();

    assert_eq!(outcome, Progression::Submitted(SubmitOutcome::Delivered));
    assert_eq!(harness.next_reconciliation().await, "unit-7");
    assert_eq!(session.snapshot().await, WizardState::default());
    assert_eq!(
        harness.notifications(),
        vec![(NotificationKind::Success, String::from("Status updated"))]
    );
}

#[tokio::test]
async fn test_provided_position_overrides_telemetry() {
    let harness: Harness = Harness::new();
    *harness.telemetry.0.lock().unwrap() = Telemetry::at(1.0, 2.0);
    let session: StatusChangeSession = harness.session();

    session.open(Some(create_test_status(0, 1))).await.unwrap();

    let provided: PositionFields = PositionFields {
        latitude: String::from("40.1"),
        longitude: String::from("-105.2"),
        ..PositionFields::default()
    };
    session
        .submit_with_position(Some(provided.clone()))
        .await
        .unwrap();

    assert_eq!(harness.delivered()[0].position, provided);
}
