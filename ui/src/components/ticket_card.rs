//! Issued ticket with its QR payload and a PDF download

use crate::format;
use crate::status::{self, StatusPresentation};
use campus_api::types::{EventTicket, TicketStatus};
use campus_api::{ApiResult, TicketApi};
use campus_ui_core::{Effect, Reducer, SmallVec, smallvec};
use chrono::FixedOffset;
use std::sync::Arc;

/// A downloaded ticket document
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicketDocument {
    /// Suggested file name
    pub file_name: String,
    /// PDF bytes
    pub bytes: Arc<[u8]>,
}

/// Card state
#[derive(Clone, Debug, PartialEq)]
pub struct TicketCardState {
    /// The ticket
    pub ticket: EventTicket,
    /// Download in flight
    pub downloading: bool,
    /// Last downloaded document, for the host to save
    pub document: Option<TicketDocument>,
    /// Last failure
    pub error: Option<String>,
}

impl TicketCardState {
    /// Card for `ticket`
    #[must_use]
    pub const fn new(ticket: EventTicket) -> Self {
        Self {
            ticket,
            downloading: false,
            document: None,
            error: None,
        }
    }
}

/// Card actions
#[derive(Clone, Debug, PartialEq)]
pub enum TicketCardAction {
    /// Download button pressed
    DownloadPressed,
    /// Download finished
    Downloaded(ApiResult<Vec<u8>>),
    /// Host saved the document
    DocumentSaved,
}

/// Card dependencies
#[derive(Clone)]
pub struct TicketCardEnvironment {
    /// Ticket endpoints
    pub tickets: Arc<dyn TicketApi>,
}

/// Card reducer
#[derive(Clone, Copy, Debug, Default)]
pub struct TicketCardReducer;

impl Reducer for TicketCardReducer {
    type State = TicketCardState;
    type Action = TicketCardAction;
    type Environment = TicketCardEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TicketCardAction::DownloadPressed => {
                if state.downloading {
                    return SmallVec::new();
                }
                state.downloading = true;
                state.error = None;

                let download = env.tickets.download_ticket(&state.ticket.ticket_id);
                smallvec![Effect::future(async move {
                    Some(TicketCardAction::Downloaded(download.await))
                })]
            },

            TicketCardAction::Downloaded(Ok(bytes)) => {
                state.downloading = false;
                tracing::info!(
                    ticket_id = %state.ticket.ticket_id,
                    size = bytes.len(),
                    "Ticket downloaded"
                );
                state.document = Some(TicketDocument {
                    file_name: format!("ingresso-{}.pdf", state.ticket.ticket_id),
                    bytes: Arc::from(bytes),
                });
                SmallVec::new()
            },

            TicketCardAction::Downloaded(Err(error)) => {
                state.downloading = false;
                tracing::warn!(ticket_id = %state.ticket.ticket_id, %error, "Ticket download failed");
                state.error = Some(error.user_message());
                SmallVec::new()
            },

            TicketCardAction::DocumentSaved => {
                state.document = None;
                SmallVec::new()
            },
        }
    }
}

/// Render-ready ticket card
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicketCardView {
    /// Event title
    pub title: String,
    /// Holder
    pub participant: Option<String>,
    /// Status badge
    pub status: StatusPresentation,
    /// Payload to encode as QR
    pub qr_code_data: String,
    /// Code for manual entry
    pub validation_code: String,
    /// Issue date
    pub issued_at: String,
    /// Check-in time, for used tickets
    pub used_at: Option<String>,
    /// QR shown (hidden for voided tickets)
    pub show_qr: bool,
    /// Download button enabled
    pub can_download: bool,
    /// Last failure
    pub error: Option<String>,
}

/// Render the card
#[must_use]
pub fn view(state: &TicketCardState, offset: FixedOffset) -> TicketCardView {
    let ticket = &state.ticket;
    let show_qr = match ticket.ticket_status {
        TicketStatus::Valid | TicketStatus::Used => true,
        TicketStatus::Cancelled => false,
    };

    TicketCardView {
        title: ticket
            .event_title
            .clone()
            .unwrap_or_else(|| format!("Ingresso {}", ticket.ticket_id)),
        participant: ticket.participant_name.clone(),
        status: status::ticket_status(ticket.ticket_status),
        qr_code_data: ticket.qr_code_data.clone(),
        validation_code: ticket.validation_code.clone(),
        issued_at: format::date(ticket.issued_at, offset),
        used_at: ticket.used_at.map(|at| format::date_time(at, offset)),
        show_qr,
        can_download: show_qr && !state.downloading,
        error: state.error.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use campus_api::ApiError;
    use campus_ui_testing::{ApiCall, MockApi, ReducerTest, assertions, fixtures};

    fn env(api: &MockApi) -> TicketCardEnvironment {
        TicketCardEnvironment {
            tickets: Arc::new(api.clone()),
        }
    }

    #[tokio::test]
    async fn test_download_produces_named_document() {
        let api = MockApi::new();
        api.respond_download(Ok(b"%PDF-1.7".to_vec()));
        let env = env(&api);
        let mut state = TicketCardState::new(fixtures::ticket(TicketStatus::Valid));

        let mut effects = TicketCardReducer.reduce(&mut state, TicketCardAction::DownloadPressed, &env);
        assert!(state.downloading);
        let Some(Effect::Future(download)) = effects.pop() else {
            unreachable!("download future expected");
        };
        let finished = download.await.unwrap();
        let _ = TicketCardReducer.reduce(&mut state, finished, &env);

        let document = state.document.unwrap();
        assert_eq!(document.file_name, "ingresso-tkt-1.pdf");
        assert_eq!(&*document.bytes, b"%PDF-1.7");
        assert_eq!(api.calls(), vec![ApiCall::DownloadTicket("tkt-1".to_string())]);
    }

    #[test]
    fn test_download_not_repeated_while_in_flight() {
        let api = MockApi::new();

        ReducerTest::new(TicketCardReducer)
            .with_env(env(&api))
            .given_state(TicketCardState {
                downloading: true,
                ..TicketCardState::new(fixtures::ticket(TicketStatus::Valid))
            })
            .when_action(TicketCardAction::DownloadPressed)
            .then_effects(assertions::assert_no_effects)
            .run();

        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_download_failure_is_retryable() {
        ReducerTest::new(TicketCardReducer)
            .with_env(env(&MockApi::new()))
            .given_state(TicketCardState {
                downloading: true,
                ..TicketCardState::new(fixtures::ticket(TicketStatus::Valid))
            })
            .when_action(TicketCardAction::Downloaded(Err(ApiError::Unauthorized)))
            .then_state(|state| {
                let view = view(state, crate::format::utc_offset(-180));
                assert!(view.can_download);
                assert!(view.error.is_some());
            })
            .run();
    }

    #[test]
    fn test_cancelled_ticket_hides_qr() {
        let state = TicketCardState::new(fixtures::ticket(TicketStatus::Cancelled));
        let view = view(&state, crate::format::utc_offset(-180));

        assert!(!view.show_qr);
        assert!(!view.can_download);
        assert_eq!(view.status.label, "Cancelado");
    }
}
