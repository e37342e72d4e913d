//! Admin dialog deciding a payment proof
//!
//! Approve takes optional notes and needs a proof to look at; reject needs a
//! non-blank reason. One decision is sent per dialog session: the dialog
//! closes on success and stays open with the error on failure.

use crate::format;
use campus_api::types::{TicketOrder, ValidateOrderRequest};
use campus_api::{ApiResult, OrderApi};
use campus_ui_core::{Effect, Reducer, SmallVec, smallvec};
use chrono::FixedOffset;
use std::sync::Arc;

/// Which decision is being sent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Approving
    Approve,
    /// Rejecting
    Reject,
}

/// Dialog state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationModalState {
    /// Order under review, `None` when closed
    pub order: Option<TicketOrder>,
    /// Internal notes
    pub notes: String,
    /// Rejection reason
    pub reason: String,
    /// Decision in flight
    pub submitting: Option<Decision>,
    /// Local or remote failure
    pub error: Option<String>,
    /// Order returned by the last successful decision
    pub decided: Option<TicketOrder>,
}

impl ValidationModalState {
    /// Whether the dialog is shown
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.order.is_some()
    }
}

/// Dialog actions
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationModalAction {
    /// Review `order`
    Open(TicketOrder),
    /// Notes field changed
    NotesChanged(String),
    /// Reason field changed
    ReasonChanged(String),
    /// Approve pressed
    ApprovePressed,
    /// Reject pressed
    RejectPressed,
    /// Decision answered
    DecisionFinished(ApiResult<TicketOrder>),
    /// Dialog dismissed
    Close,
}

/// Dialog dependencies
#[derive(Clone)]
pub struct ValidationModalEnvironment {
    /// Order endpoints
    pub orders: Arc<dyn OrderApi>,
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Dialog reducer
#[derive(Clone, Copy, Debug, Default)]
pub struct ValidationModalReducer;

impl ValidationModalReducer {
    fn decide(
        state: &mut ValidationModalState,
        env: &ValidationModalEnvironment,
        decision: Decision,
    ) -> SmallVec<[Effect<ValidationModalAction>; 4]> {
        let Some((order_id, has_proof)) = state
            .order
            .as_ref()
            .map(|order| (order.order_id.clone(), has_proof(order)))
        else {
            return SmallVec::new();
        };
        if state.submitting.is_some() {
            return SmallVec::new();
        }

        let request = match decision {
            Decision::Approve => {
                if !has_proof {
                    return SmallVec::new();
                }
                ValidateOrderRequest::approve(non_blank(&state.notes))
            },
            Decision::Reject => match non_blank(&state.reason) {
                Some(reason) => ValidateOrderRequest::reject(reason),
                None => {
                    state.error = Some("Informe o motivo da rejeição".to_string());
                    return SmallVec::new();
                },
            },
        };

        tracing::info!(%order_id, ?decision, "Sending payment decision");
        let validation = env.orders.validate_order(&order_id, request);
        state.submitting = Some(decision);
        state.error = None;

        smallvec![Effect::future(async move {
            Some(ValidationModalAction::DecisionFinished(validation.await))
        })]
    }
}

impl Reducer for ValidationModalReducer {
    type State = ValidationModalState;
    type Action = ValidationModalAction;
    type Environment = ValidationModalEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ValidationModalAction::Open(order) => {
                if state.submitting.is_none() {
                    *state = ValidationModalState {
                        order: Some(order),
                        ..ValidationModalState::default()
                    };
                }
                SmallVec::new()
            },

            ValidationModalAction::NotesChanged(notes) => {
                state.notes = notes;
                SmallVec::new()
            },

            ValidationModalAction::ReasonChanged(reason) => {
                state.reason = reason;
                if non_blank(&state.reason).is_some() {
                    state.error = None;
                }
                SmallVec::new()
            },

            ValidationModalAction::ApprovePressed => Self::decide(state, env, Decision::Approve),

            ValidationModalAction::RejectPressed => Self::decide(state, env, Decision::Reject),

            ValidationModalAction::DecisionFinished(Ok(order)) => {
                tracing::info!(order_id = %order.order_id, status = ?order.order_status, "Payment decided");
                *state = ValidationModalState {
                    decided: Some(order),
                    ..ValidationModalState::default()
                };
                SmallVec::new()
            },

            ValidationModalAction::DecisionFinished(Err(error)) => {
                tracing::warn!(%error, "Payment decision failed");
                state.submitting = None;
                state.error = Some(error.user_message());
                SmallVec::new()
            },

            ValidationModalAction::Close => {
                if state.submitting.is_none() {
                    state.order = None;
                    state.notes.clear();
                    state.reason.clear();
                    state.error = None;
                }
                SmallVec::new()
            },
        }
    }
}

/// Render-ready dialog
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)] // One flag per control
pub struct ValidationModalView {
    /// Buyer name
    pub buyer: String,
    /// Event title
    pub event_title: String,
    /// Amount due
    pub amount: String,
    /// Order creation
    pub created_at: String,
    /// Proof to inspect
    pub payment_proof_url: Option<String>,
    /// Coupon applied
    pub coupon_code: Option<String>,
    /// Approve enabled
    pub can_approve: bool,
    /// Reject enabled
    pub can_reject: bool,
    /// Approve spinner
    pub approving: bool,
    /// Reject spinner
    pub rejecting: bool,
    /// Error banner
    pub error: Option<String>,
}

/// Whether the order carries a usable proof link
fn has_proof(order: &TicketOrder) -> bool {
    order
        .payment_proof_url
        .as_deref()
        .is_some_and(|url| !url.trim().is_empty())
}

/// Render the dialog, `None` when closed
#[must_use]
pub fn view(state: &ValidationModalState, offset: FixedOffset) -> Option<ValidationModalView> {
    let order = state.order.as_ref()?;
    let idle = state.submitting.is_none();

    Some(ValidationModalView {
        buyer: order
            .user_name
            .clone()
            .unwrap_or_else(|| order.user_id.clone()),
        event_title: order
            .event_title
            .clone()
            .unwrap_or_else(|| order.event_id.clone()),
        amount: format::brl(order.total_amount),
        created_at: format::date_time(order.created_at, offset),
        payment_proof_url: order.payment_proof_url.clone().filter(|url| !url.trim().is_empty()),
        coupon_code: order.coupon_code.clone(),
        can_approve: idle && has_proof(order),
        can_reject: idle && non_blank(&state.reason).is_some(),
        approving: state.submitting == Some(Decision::Approve),
        rejecting: state.submitting == Some(Decision::Reject),
        error: state.error.clone(),
    })
}
