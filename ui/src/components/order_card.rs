//! One purchase order, with its status, amount and the buttons its status allows
//!
//! Cancelling goes through an embedded [`confirmation_modal`](super::confirmation_modal).
//! The card never changes the order status itself: it only replaces its copy
//! with the authoritative order returned by the API.

use super::confirmation_modal::{
    ConfirmationAction, ConfirmationReducer, ConfirmationRequest, ConfirmationState,
    ConfirmationVariant,
};
use crate::format;
use crate::status::{self, OrderActions, StatusPresentation};
use campus_api::types::{OrderStatus, TicketOrder};
use campus_api::{ApiResult, OrderApi};
use campus_ui_core::composition::{ScopedReducer, scope};
use campus_ui_core::{Effect, Reducer, SmallVec, smallvec};
use chrono::FixedOffset;
use std::sync::Arc;

/// Navigation the card asks its host to perform
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderIntent {
    /// Open the payment proof upload for this order
    UploadProof {
        /// Order to pay
        order_id: String,
    },
    /// Open the issued ticket
    ViewTicket {
        /// Approved order
        order_id: String,
        /// Issued ticket, when the order carries it
        ticket_id: Option<String>,
    },
}

/// Card state
#[derive(Clone, Debug, PartialEq)]
pub struct OrderCardState {
    /// Authoritative copy of the order
    pub order: TicketOrder,
    /// A cancel request is in flight
    pub cancelling: bool,
    /// Last failure, shown under the buttons
    pub error: Option<String>,
    /// Embedded cancel confirmation
    pub confirmation: ConfirmationState,
    /// Pending navigation for the host
    pub intent: Option<OrderIntent>,
}

impl OrderCardState {
    /// Card for `order`
    #[must_use]
    pub fn new(order: TicketOrder) -> Self {
        Self {
            order,
            cancelling: false,
            error: None,
            confirmation: ConfirmationState::default(),
            intent: None,
        }
    }
}

/// Card actions
#[derive(Clone, Debug, PartialEq)]
pub enum OrderCardAction {
    /// Cancel button pressed; asks for confirmation
    CancelPressed,
    /// Embedded confirmation dialog
    Confirmation(ConfirmationAction),
    /// Cancel request resolved
    CancelFinished(ApiResult<TicketOrder>),
    /// Upload button pressed
    UploadProofPressed,
    /// View ticket button pressed
    ViewTicketPressed,
    /// Host performed the pending navigation
    IntentHandled,
    /// A newer copy of the order arrived (e.g. after a proof upload)
    OrderUpdated(TicketOrder),
}

/// Card dependencies
#[derive(Clone)]
pub struct OrderCardEnvironment {
    /// Order endpoints
    pub orders: Arc<dyn OrderApi>,
    /// Display offset
    pub offset: FixedOffset,
}

fn confirmation_state(state: &mut OrderCardState) -> &mut ConfirmationState {
    &mut state.confirmation
}

fn extract_confirmation(action: OrderCardAction) -> Option<ConfirmationAction> {
    match action {
        OrderCardAction::Confirmation(action) => Some(action),
        _ => None,
    }
}

const fn no_environment(_: &OrderCardEnvironment) -> &() {
    &()
}

/// Card reducer
pub struct OrderCardReducer {
    confirmation:
        ScopedReducer<OrderCardState, OrderCardAction, OrderCardEnvironment, ConfirmationReducer>,
}

impl OrderCardReducer {
    /// Create the reducer
    #[must_use]
    pub fn new() -> Self {
        Self {
            confirmation: scope(
                ConfirmationReducer,
                confirmation_state,
                extract_confirmation,
                OrderCardAction::Confirmation,
                no_environment,
            ),
        }
    }
}

impl Default for OrderCardReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for OrderCardReducer {
    type State = OrderCardState;
    type Action = OrderCardAction;
    type Environment = OrderCardEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let available = status::order_actions(state.order.order_status);

        match action {
            OrderCardAction::CancelPressed => {
                if !available.cancel || state.cancelling {
                    return SmallVec::new();
                }
                let request = ConfirmationRequest::new(
                    "Cancelar pedido",
                    "Tem certeza que deseja cancelar este pedido? Esta ação não pode ser desfeita.",
                    ConfirmationVariant::Danger,
                )
                .confirm_label("Cancelar pedido");
                self.confirmation.reduce(
                    state,
                    OrderCardAction::Confirmation(ConfirmationAction::Open(request)),
                    env,
                )
            },

            OrderCardAction::Confirmation(ConfirmationAction::Confirm) => {
                if !state.confirmation.is_open() || state.cancelling || !available.cancel {
                    return SmallVec::new();
                }
                state.cancelling = true;
                state.confirmation.busy = true;
                state.error = None;

                let cancel = env.orders.cancel_order(&state.order.order_id);
                smallvec![Effect::future(async move {
                    Some(OrderCardAction::CancelFinished(cancel.await))
                })]
            },

            action @ OrderCardAction::Confirmation(_) => self.confirmation.reduce(state, action, env),

            OrderCardAction::CancelFinished(result) => {
                state.cancelling = false;
                state.confirmation = ConfirmationState::default();
                match result {
                    Ok(order) => {
                        tracing::info!(order_id = %order.order_id, "Order cancelled");
                        state.order = order;
                    },
                    Err(error) => {
                        tracing::warn!(order_id = %state.order.order_id, %error, "Cancel failed");
                        state.error = Some(error.user_message());
                    },
                }
                SmallVec::new()
            },

            OrderCardAction::UploadProofPressed => {
                if available.upload_proof && !state.cancelling {
                    state.intent = Some(OrderIntent::UploadProof {
                        order_id: state.order.order_id.clone(),
                    });
                }
                SmallVec::new()
            },

            OrderCardAction::ViewTicketPressed => {
                if available.view_ticket {
                    state.intent = Some(OrderIntent::ViewTicket {
                        order_id: state.order.order_id.clone(),
                        ticket_id: state.order.ticket_id.clone(),
                    });
                }
                SmallVec::new()
            },

            OrderCardAction::IntentHandled => {
                state.intent = None;
                SmallVec::new()
            },

            OrderCardAction::OrderUpdated(order) => {
                if order.order_id == state.order.order_id {
                    state.order = order;
                    state.error = None;
                }
                SmallVec::new()
            },
        }
    }
}

/// Render-ready card
#[derive(Clone, Debug, PartialEq)]
pub struct OrderCardView {
    /// Event title
    pub title: String,
    /// Amount in reais
    pub amount: String,
    /// Status badge
    pub status: StatusPresentation,
    /// Creation date
    pub created_at: String,
    /// Buttons shown
    pub actions: OrderActions,
    /// Buttons disabled
    pub busy: bool,
    /// Rejection reason, verbatim, for rejected orders
    pub rejection_reason: Option<String>,
    /// Uploaded proof
    pub payment_proof_url: Option<String>,
    /// Coupon applied
    pub coupon_code: Option<String>,
    /// Last failure
    pub error: Option<String>,
    /// Cancel confirmation shown
    pub confirming_cancel: bool,
}

/// Render the card
#[must_use]
pub fn view(state: &OrderCardState, offset: FixedOffset) -> OrderCardView {
    let order = &state.order;

    let rejection_reason = match order.order_status {
        OrderStatus::Rejected => order
            .rejection_reason
            .clone()
            .filter(|reason| !reason.is_empty()),
        OrderStatus::PendingPayment
        | OrderStatus::AwaitingValidation
        | OrderStatus::Approved
        | OrderStatus::Cancelled => None,
    };

    OrderCardView {
        title: order
            .event_title
            .clone()
            .unwrap_or_else(|| format!("Pedido {}", order.order_id)),
        amount: format::brl(order.total_amount),
        status: status::order_status(order.order_status),
        created_at: format::date_time(order.created_at, offset),
        actions: status::order_actions(order.order_status),
        busy: state.cancelling,
        rejection_reason,
        payment_proof_url: order.payment_proof_url.clone(),
        coupon_code: order.coupon_code.clone(),
        error: state.error.clone(),
        confirming_cancel: state.confirmation.is_open(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use campus_api::ApiError;
    use campus_ui_testing::{ApiCall, MockApi, ReducerTest, assertions, fixtures};

    fn env(api: &MockApi) -> OrderCardEnvironment {
        OrderCardEnvironment {
            orders: Arc::new(api.clone()),
            offset: crate::format::utc_offset(-180),
        }
    }

    #[test]
    fn test_cancel_asks_for_confirmation_first() {
        let api = MockApi::new();
        ReducerTest::new(OrderCardReducer::new())
            .with_env(env(&api))
            .given_state(OrderCardState::new(fixtures::order(
                "ord-1",
                OrderStatus::PendingPayment,
            )))
            .when_action(OrderCardAction::CancelPressed)
            .then_state(|state| {
                assert!(state.confirmation.is_open());
                assert!(!state.cancelling);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_approved_order_cannot_be_cancelled() {
        ReducerTest::new(OrderCardReducer::new())
            .with_env(env(&MockApi::new()))
            .given_state(OrderCardState::new(fixtures::order(
                "ord-1",
                OrderStatus::Approved,
            )))
            .when_actions(vec![
                OrderCardAction::CancelPressed,
                OrderCardAction::Confirmation(ConfirmationAction::Confirm),
                OrderCardAction::UploadProofPressed,
            ])
            .then_state(|state| {
                assert!(!state.confirmation.is_open());
                assert!(!state.cancelling);
                assert_eq!(state.intent, None);
            })
            .run();
    }

    #[tokio::test]
    async fn test_confirm_cancels_and_replaces_order() {
        let api = MockApi::new();
        api.respond_cancel_order(Ok(fixtures::order("ord-1", OrderStatus::Cancelled)));
        let env = env(&api);
        let reducer = OrderCardReducer::new();
        let mut state = OrderCardState::new(fixtures::order("ord-1", OrderStatus::AwaitingValidation));

        let _ = reducer.reduce(&mut state, OrderCardAction::CancelPressed, &env);
        let mut effects = reducer.reduce(
            &mut state,
            OrderCardAction::Confirmation(ConfirmationAction::Confirm),
            &env,
        );
        assert!(state.cancelling);
        assert!(state.confirmation.busy);

        let Some(Effect::Future(cancel)) = effects.pop() else {
            unreachable!("cancel future expected");
        };
        let finished = cancel.await.unwrap();
        let _ = reducer.reduce(&mut state, finished, &env);

        assert_eq!(state.order.order_status, OrderStatus::Cancelled);
        assert!(!state.cancelling);
        assert!(!state.confirmation.is_open());
        assert_eq!(api.calls(), vec![ApiCall::CancelOrder("ord-1".to_string())]);
    }

    #[test]
    fn test_cancel_failure_keeps_order_and_shows_error() {
        let mut order = fixtures::order("ord-1", OrderStatus::PendingPayment);
        order.notes = Some("original".to_string());

        ReducerTest::new(OrderCardReducer::new())
            .with_env(env(&MockApi::new()))
            .given_state(OrderCardState {
                cancelling: true,
                ..OrderCardState::new(order)
            })
            .when_action(OrderCardAction::CancelFinished(Err(ApiError::Api {
                status: 409,
                message: "Pedido já em validação".to_string(),
            })))
            .then_state(|state| {
                assert_eq!(state.order.order_status, OrderStatus::PendingPayment);
                assert_eq!(state.error.as_deref(), Some("Pedido já em validação"));
                assert!(!state.cancelling);
            })
            .run();
    }

    #[test]
    fn test_view_ticket_intent() {
        let mut order = fixtures::order("ord-1", OrderStatus::Approved);
        order.ticket_id = Some("tkt-1".to_string());

        ReducerTest::new(OrderCardReducer::new())
            .with_env(env(&MockApi::new()))
            .given_state(OrderCardState::new(order))
            .when_action(OrderCardAction::ViewTicketPressed)
            .then_state(|state| {
                assert_eq!(
                    state.intent,
                    Some(OrderIntent::ViewTicket {
                        order_id: "ord-1".to_string(),
                        ticket_id: Some("tkt-1".to_string()),
                    })
                );
            })
            .run();
    }

    #[test]
    fn test_rejection_reason_rendered_verbatim() {
        let mut order = fixtures::order("ord-1", OrderStatus::Rejected);
        order.rejection_reason = Some("  Comprovante ilegível, envie novamente.".to_string());

        let view = view(&OrderCardState::new(order), crate::format::utc_offset(-180));

        assert_eq!(
            view.rejection_reason.as_deref(),
            Some("  Comprovante ilegível, envie novamente.")
        );
        assert!(view.actions.upload_proof);
        assert!(!view.actions.cancel);
        assert_eq!(view.status.label, "Rejeitado");
    }

    #[test]
    fn test_view_hides_reason_for_other_statuses() {
        let mut order = fixtures::order("ord-1", OrderStatus::Approved);
        order.rejection_reason = Some("stale".to_string());

        let view = view(&OrderCardState::new(order), crate::format::utc_offset(-180));

        assert_eq!(view.rejection_reason, None);
        assert!(!view.actions.upload_proof);
        assert!(!view.actions.cancel);
        assert!(view.actions.view_ticket);
        assert_eq!(view.amount, "R$ 25,00");
    }
}
