//! Reducer for the check-in scanner.

use crate::components::qr_scanner::{
    LastDecode, ProductionScannerEnvironment, ScannerAction, ScannerEnvironment, ScannerState,
};
use campus_ui_core::{Effect, EffectId, Reducer, SmallVec, smallvec};
use futures::StreamExt;

/// Cancellation key of the camera decode session.
pub const SCANNER_SESSION: EffectId = EffectId::new("qr_scanner.session");

/// Reducer driving the camera session and forwarding decoded payloads.
///
/// At most one payload is validated at a time; repeated payloads inside the
/// cooldown window are ignored.
pub struct ScannerReducer;

impl ScannerReducer {
    /// Create a new scanner reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn release(
        state: &mut ScannerState,
        env: &ProductionScannerEnvironment,
    ) -> SmallVec<[Effect<ScannerAction>; 4]> {
        state.scanning = false;
        state.starting = false;

        smallvec![
            Effect::Cancel(SCANNER_SESSION),
            Effect::fire_and_forget(env.camera().stop()),
        ]
    }
}

impl Default for ScannerReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for ScannerReducer {
    type State = ScannerState;
    type Action = ScannerAction;
    type Environment = ProductionScannerEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ScannerAction::Start => {
                if state.scanning || state.starting {
                    return SmallVec::new();
                }
                state.starting = true;
                state.camera_error = None;

                let start = env.camera().start();
                let session = async_stream::stream! {
                    match start.await {
                        Ok(mut decodes) => {
                            yield ScannerAction::Started;
                            while let Some(text) = decodes.next().await {
                                yield ScannerAction::Decoded(text);
                            }
                            yield ScannerAction::CameraClosed;
                        },
                        Err(error) => yield ScannerAction::StartFailed(error),
                    }
                };

                smallvec![Effect::stream(session).cancellable(SCANNER_SESSION)]
            },

            ScannerAction::Started => {
                if state.starting {
                    tracing::info!("Camera started");
                    state.starting = false;
                    state.scanning = true;
                }
                SmallVec::new()
            },

            ScannerAction::StartFailed(error) => {
                tracing::warn!(%error, "Camera failed to start");
                state.starting = false;
                state.scanning = false;
                state.camera_error = Some(error);
                SmallVec::new()
            },

            ScannerAction::Decoded(text) => {
                if !state.scanning {
                    return SmallVec::new();
                }
                if state.pending {
                    tracing::debug!("Decode dropped, validation pending");
                    return SmallVec::new();
                }

                let now = env.clock().now();
                if state
                    .last_decoded
                    .as_ref()
                    .is_some_and(|last| last.suppresses(&text, now, env.cooldown()))
                {
                    tracing::debug!("Decode dropped, repeated within cooldown");
                    return SmallVec::new();
                }

                state.pending = true;
                state.last_decoded = Some(LastDecode {
                    text: text.clone(),
                    at: now,
                });

                let validation = env.validator().validate(text);
                smallvec![Effect::future(async move {
                    Some(ScannerAction::ValidationFinished(validation.await))
                })]
            },

            ScannerAction::ValidationFinished(result) => {
                state.pending = false;
                match &result {
                    Ok(summary) => {
                        tracing::info!(ticket_id = %summary.ticket_id, "Scanned code checked in");
                    },
                    Err(error) => tracing::warn!(%error, "Scanned code refused"),
                }
                state.last_outcome = Some(result);
                SmallVec::new()
            },

            ScannerAction::CameraClosed => {
                tracing::debug!("Decode stream ended");
                state.scanning = false;
                state.starting = false;
                SmallVec::new()
            },

            ScannerAction::Stop | ScannerAction::Disappeared => Self::release(state, env),
        }
    }
}
