//! Unit tests for the check-in scanner reducer.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

use super::*;
use crate::capabilities::{Camera, CameraError, FakeCamera};
use crate::checkin::{CheckInError, CheckInResult, CodeValidator, Feedback};
use campus_ui_core::{Effect, Reducer};
use campus_ui_testing::{ManualClock, ReducerTest, assertions, fixtures, test_time};
use futures::StreamExt;
use futures::future::BoxFuture;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct RecordingValidator {
    codes: Mutex<Vec<String>>,
}

impl RecordingValidator {
    fn codes(&self) -> Vec<String> {
        self.codes.lock().unwrap().clone()
    }
}

impl CodeValidator for RecordingValidator {
    fn validate(&self, code: String) -> BoxFuture<'static, CheckInResult> {
        self.codes.lock().unwrap().push(code);
        Box::pin(async { Err(CheckInError::UnknownCode) })
    }
}

struct Harness {
    camera: FakeCamera,
    validator: Arc<RecordingValidator>,
    clock: ManualClock,
    env: ProductionScannerEnvironment,
}

fn harness_with(camera: FakeCamera) -> Harness {
    let validator = Arc::new(RecordingValidator::default());
    let clock = ManualClock::new(test_time());
    let env = ProductionScannerEnvironment::new(
        Arc::new(camera.clone()),
        validator.clone(),
        Arc::new(clock.clone()),
        Duration::from_secs(2),
    );
    Harness {
        camera,
        validator,
        clock,
        env,
    }
}

fn harness() -> Harness {
    harness_with(FakeCamera::new())
}

fn scanning() -> ScannerState {
    ScannerState {
        scanning: true,
        ..ScannerState::default()
    }
}

// ============================================================================
// Camera session
// ============================================================================

#[test]
fn test_start_opens_cancellable_session() {
    let h = harness();

    ReducerTest::new(ScannerReducer::new())
        .with_env(h.env.clone())
        .given_state(ScannerState::default())
        .when_action(ScannerAction::Start)
        .then_state(|state| {
            assert!(state.starting);
            assert!(!state.scanning);
        })
        .then_effects(|effects| assertions::assert_has_cancellable(effects, SCANNER_SESSION))
        .run();

    assert_eq!(h.camera.starts(), 1);
}

#[test]
fn test_start_is_ignored_while_active() {
    let h = harness();

    ReducerTest::new(ScannerReducer::new())
        .with_env(h.env.clone())
        .given_state(scanning())
        .when_action(ScannerAction::Start)
        .then_effects(assertions::assert_no_effects)
        .run();

    assert_eq!(h.camera.starts(), 0);
}

#[tokio::test]
async fn test_session_stream_follows_camera() {
    let h = harness();
    let mut state = ScannerState::default();

    let mut effects = ScannerReducer::new().reduce(&mut state, ScannerAction::Start, &h.env);
    let Some(Effect::Cancellable { effect, .. }) = effects.pop() else {
        unreachable!("cancellable session expected");
    };
    let Effect::Stream(mut session) = *effect else {
        unreachable!("stream expected");
    };

    assert_eq!(session.next().await, Some(ScannerAction::Started));
    assert!(h.camera.decode("payload"));
    assert_eq!(
        session.next().await,
        Some(ScannerAction::Decoded("payload".to_string()))
    );
    h.camera.stop().await;
    assert_eq!(session.next().await, Some(ScannerAction::CameraClosed));
    assert_eq!(session.next().await, None);
}

#[tokio::test]
async fn test_failed_start_yields_error() {
    let h = harness_with(FakeCamera::failing(CameraError::PermissionDenied));
    let mut state = ScannerState::default();

    let mut effects = ScannerReducer::new().reduce(&mut state, ScannerAction::Start, &h.env);
    let Some(Effect::Cancellable { effect, .. }) = effects.pop() else {
        unreachable!("cancellable session expected");
    };
    let Effect::Stream(session) = *effect else {
        unreachable!("stream expected");
    };

    let actions: Vec<ScannerAction> = session.collect().await;
    assert_eq!(
        actions,
        vec![ScannerAction::StartFailed(CameraError::PermissionDenied)]
    );
}

#[test]
fn test_start_failure_is_persistent_and_not_retried() {
    ReducerTest::new(ScannerReducer::new())
        .with_env(harness().env)
        .given_state(ScannerState {
            starting: true,
            ..ScannerState::default()
        })
        .when_action(ScannerAction::StartFailed(CameraError::NotFound))
        .then_state(|state| {
            assert!(!state.scanning);
            let view = view(state);
            assert!(view.can_start);
            assert_eq!(view.error_banner.as_deref(), Some("Nenhuma câmera encontrada"));
        })
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[test]
fn test_stop_cancels_session_and_releases_camera() {
    let h = harness();

    ReducerTest::new(ScannerReducer::new())
        .with_env(h.env.clone())
        .given_state(scanning())
        .when_action(ScannerAction::Stop)
        .then_state(|state| assert!(!state.scanning))
        .then_effects(|effects| {
            assertions::assert_cancels(effects, SCANNER_SESSION);
            assertions::assert_has_future_effect(effects);
        })
        .run();

    assert_eq!(h.camera.stops(), 1);
}

#[test]
fn test_disappear_releases_camera_even_when_idle() {
    let h = harness();

    ReducerTest::new(ScannerReducer::new())
        .with_env(h.env.clone())
        .given_state(ScannerState::default())
        .when_action(ScannerAction::Disappeared)
        .then_effects(|effects| assertions::assert_cancels(effects, SCANNER_SESSION))
        .run();

    assert_eq!(h.camera.stops(), 1);
}

// ============================================================================
// Decode filtering
// ============================================================================

#[test]
fn test_same_payload_within_cooldown_validated_once() {
    let h = harness();
    let reducer = ScannerReducer::new();
    let mut state = scanning();
    let payload = fixtures::VALIDATION_CODE.to_string();

    let first = reducer.reduce(&mut state, ScannerAction::Decoded(payload.clone()), &h.env);
    assert_eq!(first.len(), 1);
    let _ = reducer.reduce(
        &mut state,
        ScannerAction::ValidationFinished(Err(CheckInError::UnknownCode)),
        &h.env,
    );

    h.clock.advance(Duration::from_millis(1500));
    let second = reducer.reduce(&mut state, ScannerAction::Decoded(payload.clone()), &h.env);
    assert!(second.is_empty());

    h.clock.advance(Duration::from_millis(500));
    let third = reducer.reduce(&mut state, ScannerAction::Decoded(payload.clone()), &h.env);
    assert_eq!(third.len(), 1);

    assert_eq!(h.validator.codes(), vec![payload.clone(), payload]);
}

#[test]
fn test_different_payload_within_cooldown_is_forwarded() {
    let h = harness();
    let reducer = ScannerReducer::new();
    let mut state = scanning();

    let _ = reducer.reduce(&mut state, ScannerAction::Decoded("first".to_string()), &h.env);
    let _ = reducer.reduce(
        &mut state,
        ScannerAction::ValidationFinished(Err(CheckInError::UnknownCode)),
        &h.env,
    );
    let effects = reducer.reduce(&mut state, ScannerAction::Decoded("second".to_string()), &h.env);

    assert_eq!(effects.len(), 1);
    assert_eq!(h.validator.codes(), vec!["first", "second"]);
}

#[test]
fn test_decode_while_pending_is_dropped() {
    let h = harness();

    ReducerTest::new(ScannerReducer::new())
        .with_env(h.env.clone())
        .given_state(scanning())
        .when_actions(vec![
            ScannerAction::Decoded("first".to_string()),
            ScannerAction::Decoded("second".to_string()),
        ])
        .then_state(|state| {
            assert!(state.pending);
            assert_eq!(
                state.last_decoded.as_ref().map(|last| last.text.as_str()),
                Some("first")
            );
        })
        .then_effects(assertions::assert_no_effects)
        .run();

    assert_eq!(h.validator.codes(), vec!["first"]);
}

#[test]
fn test_payload_is_forwarded_verbatim() {
    let h = harness();
    let raw = " A1B2C3D4E5F67890ABCDEF1234567890 ".to_string();

    let _ = ScannerReducer::new().reduce(&mut scanning(), ScannerAction::Decoded(raw.clone()), &h.env);

    assert_eq!(h.validator.codes(), vec![raw]);
}

#[test]
fn test_validation_result_is_shown() {
    ReducerTest::new(ScannerReducer::new())
        .with_env(harness().env)
        .given_state(ScannerState {
            pending: true,
            ..scanning()
        })
        .when_action(ScannerAction::ValidationFinished(Err(
            CheckInError::AlreadyUsed { used_at: None },
        )))
        .then_state(|state| {
            assert!(!state.pending);
            assert_eq!(
                view(state).feedback,
                Some(Feedback::Failure("Ingresso já utilizado".to_string()))
            );
        })
        .run();
}
