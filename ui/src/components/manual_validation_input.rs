//! Typed check-in code entry
//!
//! The operator types (or pastes) a code; it is normalised on every change
//! and submit is only enabled for well-formed codes. Enter submits, Escape
//! clears. The field is locked while a code is being checked; a successful
//! check-in clears it and asks the host to refocus it so the next code can
//! be typed right away.

use crate::capabilities::{Clipboard, ClipboardError};
use crate::checkin::{
    self, CheckInResult, CodeFormatError, CodeValidator, Feedback, ValidationCode,
};
use campus_ui_core::{Effect, Reducer, SmallVec, smallvec};
use std::sync::Arc;

/// Keys the input reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Submit
    Enter,
    /// Clear
    Escape,
    /// Anything else
    Other,
}

/// Input state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualInputState {
    /// Text as typed
    pub input: String,
    /// A submission is in flight
    pub submitting: bool,
    /// Why the last submit attempt was refused locally
    pub format_error: Option<CodeFormatError>,
    /// Outcome of the last submission
    pub last_outcome: Option<CheckInResult>,
    /// Clipboard failure, if the last paste failed
    pub paste_error: Option<ClipboardError>,
    /// Bumped every time the host should focus the field
    pub focus_requests: u64,
}

/// Input actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ManualInputAction {
    /// Field content changed
    InputChanged(String),
    /// Key pressed in the field
    KeyPressed(Key),
    /// Submit button pressed
    Submit,
    /// Paste button pressed
    PasteRequested,
    /// Clipboard read finished
    Pasted(Result<String, ClipboardError>),
    /// Validator answered
    ValidationFinished(CheckInResult),
}

/// Input dependencies
#[derive(Clone)]
pub struct ManualInputEnvironment {
    /// Code validator shared with the scanner
    pub validator: Arc<dyn CodeValidator>,
    /// Clipboard access for paste
    pub clipboard: Arc<dyn Clipboard>,
}

/// Input reducer
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualInputReducer;

impl ManualInputReducer {
    fn submit(
        state: &mut ManualInputState,
        env: &ManualInputEnvironment,
    ) -> SmallVec<[Effect<ManualInputAction>; 4]> {
        if state.submitting {
            return SmallVec::new();
        }

        let code = match ValidationCode::parse(&state.input) {
            Ok(code) => code,
            Err(error) => {
                state.format_error = Some(error);
                return SmallVec::new();
            },
        };

        state.submitting = true;
        state.format_error = None;
        tracing::debug!(code = %code, "Submitting typed code");

        let validation = env.validator.validate(code.as_str().to_string());
        smallvec![Effect::future(async move {
            Some(ManualInputAction::ValidationFinished(validation.await))
        })]
    }
}

impl Reducer for ManualInputReducer {
    type State = ManualInputState;
    type Action = ManualInputAction;
    type Environment = ManualInputEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ManualInputAction::InputChanged(input) => {
                // Field is locked until the submitted code is answered
                if state.submitting {
                    return SmallVec::new();
                }
                state.input = input;
                state.format_error = None;
                SmallVec::new()
            },

            ManualInputAction::KeyPressed(Key::Enter) | ManualInputAction::Submit => {
                Self::submit(state, env)
            },

            ManualInputAction::KeyPressed(Key::Escape) => {
                if !state.submitting {
                    state.input.clear();
                    state.format_error = None;
                }
                SmallVec::new()
            },

            ManualInputAction::KeyPressed(Key::Other) => SmallVec::new(),

            ManualInputAction::PasteRequested => {
                let read = env.clipboard.read_text();
                smallvec![Effect::future(async move {
                    Some(ManualInputAction::Pasted(read.await))
                })]
            },

            ManualInputAction::Pasted(Ok(text)) => {
                state.paste_error = None;
                self.reduce(state, ManualInputAction::InputChanged(text), env)
            },

            ManualInputAction::Pasted(Err(error)) => {
                tracing::warn!(%error, "Clipboard read failed");
                state.paste_error = Some(error);
                SmallVec::new()
            },

            ManualInputAction::ValidationFinished(result) => {
                state.submitting = false;
                match &result {
                    Ok(summary) => {
                        tracing::info!(ticket_id = %summary.ticket_id, "Typed code checked in");
                        state.input.clear();
                        state.focus_requests += 1;
                    },
                    Err(error) => {
                        tracing::warn!(%error, "Typed code refused");
                    },
                }
                state.last_outcome = Some(result);
                SmallVec::new()
            },
        }
    }
}

/// Render-ready input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManualInputView {
    /// Field content
    pub input: String,
    /// Normalised content, as it will be submitted
    pub normalized: String,
    /// Submit button enabled
    pub can_submit: bool,
    /// Spinner shown
    pub submitting: bool,
    /// Inline hint under the field
    pub hint: Option<String>,
    /// Outcome banner
    pub feedback: Option<Feedback>,
}

/// Render the input
#[must_use]
pub fn view(state: &ManualInputState) -> ManualInputView {
    let well_formed = ValidationCode::parse(&state.input).is_ok();

    let hint = state
        .format_error
        .map(|error| error.to_string())
        .or_else(|| state.paste_error.as_ref().map(ToString::to_string));

    let feedback = state.last_outcome.as_ref().map(Feedback::from);

    ManualInputView {
        input: state.input.clone(),
        normalized: checkin::normalize(&state.input),
        can_submit: well_formed && !state.submitting,
        submitting: state.submitting,
        hint,
        feedback,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::capabilities::FakeClipboard;
    use crate::checkin::{CheckInError, CheckInSummary};
    use campus_ui_testing::{ReducerTest, assertions, fixtures, test_time};
    use futures::future::BoxFuture;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingValidator {
        codes: Mutex<Vec<String>>,
    }

    impl CodeValidator for RecordingValidator {
        fn validate(&self, code: String) -> BoxFuture<'static, CheckInResult> {
            self.codes.lock().unwrap().push(code);
            Box::pin(async { Err(CheckInError::UnknownCode) })
        }
    }

    fn env_with(validator: Arc<RecordingValidator>, clipboard: FakeClipboard) -> ManualInputEnvironment {
        ManualInputEnvironment {
            validator,
            clipboard: Arc::new(clipboard),
        }
    }

    fn env() -> ManualInputEnvironment {
        env_with(Arc::default(), FakeClipboard::unavailable())
    }

    fn summary() -> CheckInSummary {
        CheckInSummary {
            ticket_id: "tkt-1".to_string(),
            participant_name: Some("Ana Souza".to_string()),
            event_title: None,
            validated_at: test_time(),
            message: "Check-in realizado".to_string(),
        }
    }

    #[test]
    fn test_enter_submits_normalized_code() {
        let validator = Arc::new(RecordingValidator::default());

        ReducerTest::new(ManualInputReducer)
            .with_env(env_with(Arc::clone(&validator), FakeClipboard::unavailable()))
            .given_state(ManualInputState::default())
            .when_actions(vec![
                ManualInputAction::InputChanged(" A1B2C3D4-E5F6-7890-ABCD-EF12345 67890 ".to_string()),
                ManualInputAction::KeyPressed(Key::Enter),
            ])
            .then_state(|state| assert!(state.submitting))
            .then_effects(assertions::assert_has_future_effect)
            .run();

        assert_eq!(
            *validator.codes.lock().unwrap(),
            vec![fixtures::VALIDATION_CODE.to_string()]
        );
    }

    #[test]
    fn test_malformed_code_is_refused_locally() {
        let validator = Arc::new(RecordingValidator::default());

        ReducerTest::new(ManualInputReducer)
            .with_env(env_with(Arc::clone(&validator), FakeClipboard::unavailable()))
            .given_state(ManualInputState::default())
            .when_actions(vec![
                ManualInputAction::InputChanged("1234".to_string()),
                ManualInputAction::Submit,
            ])
            .then_state(|state| {
                assert!(!state.submitting);
                assert_eq!(state.format_error, Some(CodeFormatError::Malformed));
            })
            .then_effects(assertions::assert_no_effects)
            .run();

        assert!(validator.codes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_second_submit_while_pending_is_ignored() {
        ReducerTest::new(ManualInputReducer)
            .with_env(env())
            .given_state(ManualInputState {
                input: fixtures::VALIDATION_CODE.to_string(),
                submitting: true,
                ..ManualInputState::default()
            })
            .when_action(ManualInputAction::KeyPressed(Key::Enter))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_typing_while_pending_is_ignored() {
        ReducerTest::new(ManualInputReducer)
            .with_env(env())
            .given_state(ManualInputState {
                input: fixtures::VALIDATION_CODE.to_string(),
                submitting: true,
                ..ManualInputState::default()
            })
            .when_actions(vec![
                ManualInputAction::InputChanged("0f0e".to_string()),
                ManualInputAction::Pasted(Ok("0f0e0d0c".to_string())),
            ])
            .then_state(|state| {
                assert_eq!(state.input, fixtures::VALIDATION_CODE);
                assert!(state.submitting);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_success_clears_and_requests_focus() {
        ReducerTest::new(ManualInputReducer)
            .with_env(env())
            .given_state(ManualInputState {
                input: fixtures::VALIDATION_CODE.to_string(),
                submitting: true,
                ..ManualInputState::default()
            })
            .when_action(ManualInputAction::ValidationFinished(Ok(summary())))
            .then_state(|state| {
                assert!(state.input.is_empty());
                assert!(!state.submitting);
                assert_eq!(state.focus_requests, 1);
                assert_eq!(
                    view(state).feedback,
                    Some(Feedback::Success("Check-in realizado: Ana Souza".to_string()))
                );
            })
            .run();
    }

    #[test]
    fn test_failure_keeps_input() {
        ReducerTest::new(ManualInputReducer)
            .with_env(env())
            .given_state(ManualInputState {
                input: fixtures::VALIDATION_CODE.to_string(),
                submitting: true,
                ..ManualInputState::default()
            })
            .when_action(ManualInputAction::ValidationFinished(Err(
                CheckInError::TicketCancelled,
            )))
            .then_state(|state| {
                assert_eq!(state.input, fixtures::VALIDATION_CODE);
                assert_eq!(state.focus_requests, 0);
                let view = view(state);
                assert!(view.can_submit);
                assert_eq!(
                    view.feedback,
                    Some(Feedback::Failure("Ingresso cancelado".to_string()))
                );
            })
            .run();
    }

    #[test]
    fn test_escape_clears() {
        ReducerTest::new(ManualInputReducer)
            .with_env(env())
            .given_state(ManualInputState {
                input: "abc".to_string(),
                format_error: Some(CodeFormatError::Malformed),
                ..ManualInputState::default()
            })
            .when_action(ManualInputAction::KeyPressed(Key::Escape))
            .then_state(|state| {
                assert!(state.input.is_empty());
                assert_eq!(state.format_error, None);
            })
            .run();
    }

    #[tokio::test]
    async fn test_paste_feeds_input() {
        let env = env_with(
            Arc::default(),
            FakeClipboard::with_text(fixtures::VALIDATION_CODE),
        );
        let mut state = ManualInputState::default();

        let mut effects = ManualInputReducer.reduce(&mut state, ManualInputAction::PasteRequested, &env);
        let Some(Effect::Future(read)) = effects.pop() else {
            unreachable!("clipboard read expected");
        };
        let pasted = read.await.unwrap();
        let _ = ManualInputReducer.reduce(&mut state, pasted, &env);

        assert_eq!(state.input, fixtures::VALIDATION_CODE);
        assert!(view(&state).can_submit);
    }

    #[test]
    fn test_paste_failure_is_shown() {
        ReducerTest::new(ManualInputReducer)
            .with_env(env())
            .given_state(ManualInputState::default())
            .when_action(ManualInputAction::Pasted(Err(ClipboardError::Unavailable)))
            .then_state(|state| {
                assert_eq!(
                    view(state).hint.as_deref(),
                    Some("Área de transferência indisponível")
                );
            })
            .run();
    }

    #[test]
    fn test_view_enables_submit_only_for_well_formed() {
        let mut state = ManualInputState {
            input: "a1b2".to_string(),
            ..ManualInputState::default()
        };
        assert!(!view(&state).can_submit);

        state.input = "A1B2C3D4E5F67890ABCDEF1234567890".to_string();
        let rendered = view(&state);
        assert!(rendered.can_submit);
        assert_eq!(rendered.normalized, "a1b2c3d4e5f67890abcdef1234567890");
    }
}
