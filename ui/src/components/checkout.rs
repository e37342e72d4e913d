//! Ticket purchase for one event, with an optional coupon
//!
//! A coupon is only sent with the order after the API has confirmed it for
//! this event. Free events come back already approved; the checkout only
//! reflects whatever status the created order has.

use crate::format;
use crate::status::{self, StatusPresentation};
use campus_api::types::{
    CouponValidation, CreateOrderRequest, Event, OrderStatus, TicketOrder, ValidateCouponRequest,
};
use campus_api::{ApiResult, CouponApi, OrderApi};
use campus_ui_core::{Effect, Reducer, SmallVec, smallvec};
use std::sync::Arc;

/// A coupon the API accepted
#[derive(Clone, Debug, PartialEq)]
pub struct AppliedCoupon {
    /// Code as confirmed
    pub code: String,
    /// Discount and final amount
    pub validation: CouponValidation,
}

/// Checkout state
#[derive(Clone, Debug, PartialEq)]
pub struct CheckoutState {
    /// Event being purchased
    pub event: Event,
    /// Coupon field
    pub coupon_input: String,
    /// Confirmed coupon
    pub coupon: Option<AppliedCoupon>,
    /// Why the coupon was refused
    pub coupon_error: Option<String>,
    /// Coupon check in flight
    pub validating_coupon: bool,
    /// Order creation in flight
    pub purchasing: bool,
    /// Created order
    pub order: Option<TicketOrder>,
    /// Purchase failure
    pub error: Option<String>,
}

impl CheckoutState {
    /// Checkout for `event`
    #[must_use]
    pub const fn new(event: Event) -> Self {
        Self {
            event,
            coupon_input: String::new(),
            coupon: None,
            coupon_error: None,
            validating_coupon: false,
            purchasing: false,
            order: None,
            error: None,
        }
    }
}

/// Checkout actions
#[derive(Clone, Debug, PartialEq)]
pub enum CheckoutAction {
    /// Coupon field changed
    CouponChanged(String),
    /// Apply coupon pressed
    ApplyCouponPressed,
    /// Coupon check answered
    CouponValidated {
        /// Code checked
        code: String,
        /// Answer
        result: ApiResult<CouponValidation>,
    },
    /// Remove the applied coupon
    RemoveCoupon,
    /// Buy pressed
    PurchasePressed,
    /// Order creation answered
    OrderCreated(ApiResult<TicketOrder>),
}

/// Checkout dependencies
#[derive(Clone)]
pub struct CheckoutEnvironment {
    /// Coupon endpoints
    pub coupons: Arc<dyn CouponApi>,
    /// Order endpoints
    pub orders: Arc<dyn OrderApi>,
}

/// Checkout reducer
#[derive(Clone, Copy, Debug, Default)]
pub struct CheckoutReducer;

impl Reducer for CheckoutReducer {
    type State = CheckoutState;
    type Action = CheckoutAction;
    type Environment = CheckoutEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CheckoutAction::CouponChanged(input) => {
                state.coupon_input = input;
                state.coupon = None;
                state.coupon_error = None;
                SmallVec::new()
            },

            CheckoutAction::ApplyCouponPressed => {
                if state.validating_coupon || state.purchasing {
                    return SmallVec::new();
                }
                let code = state.coupon_input.trim().to_uppercase();
                if code.is_empty() {
                    state.coupon_error = Some("Informe um cupom".to_string());
                    return SmallVec::new();
                }
                state.validating_coupon = true;
                state.coupon_error = None;

                let check = env.coupons.validate_coupon(ValidateCouponRequest {
                    code: code.clone(),
                    event_id: state.event.id.clone(),
                });
                smallvec![Effect::future(async move {
                    Some(CheckoutAction::CouponValidated {
                        code,
                        result: check.await,
                    })
                })]
            },

            CheckoutAction::CouponValidated { code, result } => {
                state.validating_coupon = false;
                if code != state.coupon_input.trim().to_uppercase() {
                    tracing::debug!(%code, "Coupon edited while checking, result discarded");
                    return SmallVec::new();
                }
                match result {
                    Ok(validation) if validation.valid => {
                        tracing::debug!(%code, discount = validation.discount_amount, "Coupon applied");
                        state.coupon = Some(AppliedCoupon { code, validation });
                    },
                    Ok(validation) => {
                        state.coupon_error = Some(
                            validation
                                .message
                                .unwrap_or_else(|| "Cupom inválido".to_string()),
                        );
                    },
                    Err(error) => {
                        tracing::warn!(%code, %error, "Coupon check failed");
                        state.coupon_error = Some(error.user_message());
                    },
                }
                SmallVec::new()
            },

            CheckoutAction::RemoveCoupon => {
                if !state.purchasing {
                    state.coupon = None;
                    state.coupon_input.clear();
                }
                SmallVec::new()
            },

            CheckoutAction::PurchasePressed => {
                if state.purchasing
                    || state.validating_coupon
                    || state.order.is_some()
                    || state.event.is_sold_out()
                {
                    return SmallVec::new();
                }
                state.purchasing = true;
                state.error = None;
                tracing::info!(event_id = %state.event.id, "Creating order");

                let create = env.orders.create_order(CreateOrderRequest {
                    event_id: state.event.id.clone(),
                    coupon_code: state.coupon.as_ref().map(|coupon| coupon.code.clone()),
                });
                smallvec![Effect::future(async move {
                    Some(CheckoutAction::OrderCreated(create.await))
                })]
            },

            CheckoutAction::OrderCreated(Ok(order)) => {
                state.purchasing = false;
                tracing::info!(order_id = %order.order_id, status = ?order.order_status, "Order created");
                state.order = Some(order);
                SmallVec::new()
            },

            CheckoutAction::OrderCreated(Err(error)) => {
                state.purchasing = false;
                tracing::warn!(event_id = %state.event.id, %error, "Order creation failed");
                state.error = Some(error.user_message());
                SmallVec::new()
            },
        }
    }
}

/// What the buyer should do after purchasing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextStep {
    /// Upload the PIX proof
    UploadProof,
    /// Ticket already issued
    ViewTicket,
    /// Nothing left to do
    Done,
}

/// Render-ready checkout
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutView {
    /// Event title
    pub title: String,
    /// Full price
    pub price: String,
    /// Discount line, with an applied coupon
    pub discount: Option<String>,
    /// Amount due
    pub total: String,
    /// Buy button enabled
    pub can_purchase: bool,
    /// Apply coupon button enabled
    pub can_apply_coupon: bool,
    /// Coupon error
    pub coupon_error: Option<String>,
    /// Purchase error
    pub error: Option<String>,
    /// Created order status
    pub order_status: Option<StatusPresentation>,
    /// What to do next
    pub next_step: Option<NextStep>,
}

/// Render the checkout
#[must_use]
pub fn view(state: &CheckoutState) -> CheckoutView {
    let event = &state.event;
    let total = match (&state.order, &state.coupon) {
        (Some(order), _) => order.total_amount,
        (None, Some(coupon)) => coupon.validation.final_amount,
        (None, None) => event.price,
    };

    let next_step = state.order.as_ref().map(|order| {
        if status::order_actions(order.order_status).upload_proof {
            NextStep::UploadProof
        } else if order.order_status == OrderStatus::Approved {
            NextStep::ViewTicket
        } else {
            NextStep::Done
        }
    });

    CheckoutView {
        title: event.title.clone(),
        price: if event.is_free() {
            "Gratuito".to_string()
        } else {
            format::brl(event.price)
        },
        discount: state
            .coupon
            .as_ref()
            .map(|coupon| format!("-{}", format::brl(coupon.validation.discount_amount))),
        total: format::brl(total),
        can_purchase: !state.purchasing
            && !state.validating_coupon
            && state.order.is_none()
            && !event.is_sold_out(),
        can_apply_coupon: !state.validating_coupon
            && !state.purchasing
            && !state.coupon_input.trim().is_empty(),
        coupon_error: state.coupon_error.clone(),
        error: state.error.clone(),
        order_status: state
            .order
            .as_ref()
            .map(|order| status::order_status(order.order_status)),
        next_step,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use campus_api::ApiError;
    use campus_ui_testing::{ApiCall, MockApi, ReducerTest, assertions, fixtures, test_time};

    fn env(api: &MockApi) -> CheckoutEnvironment {
        CheckoutEnvironment {
            coupons: Arc::new(api.clone()),
            orders: Arc::new(api.clone()),
        }
    }

    fn checkout() -> CheckoutState {
        CheckoutState::new(fixtures::event("evt-1", test_time()))
    }

    fn valid_coupon() -> CouponValidation {
        CouponValidation {
            valid: true,
            coupon: None,
            discount_amount: 5.0,
            final_amount: 20.0,
            message: None,
        }
    }

    #[test]
    fn test_apply_coupon_sends_normalized_code() {
        let api = MockApi::new();

        ReducerTest::new(CheckoutReducer)
            .with_env(env(&api))
            .given_state(checkout())
            .when_actions(vec![
                CheckoutAction::CouponChanged(" semana10 ".to_string()),
                CheckoutAction::ApplyCouponPressed,
            ])
            .then_state(|state| assert!(state.validating_coupon))
            .then_effects(assertions::assert_has_future_effect)
            .run();

        assert_eq!(
            api.calls(),
            vec![ApiCall::ValidateCoupon(ValidateCouponRequest {
                code: "SEMANA10".to_string(),
                event_id: "evt-1".to_string(),
            })]
        );
    }

    #[test]
    fn test_valid_coupon_updates_total() {
        ReducerTest::new(CheckoutReducer)
            .with_env(env(&MockApi::new()))
            .given_state(CheckoutState {
                coupon_input: "semana10".to_string(),
                validating_coupon: true,
                ..checkout()
            })
            .when_action(CheckoutAction::CouponValidated {
                code: "SEMANA10".to_string(),
                result: Ok(valid_coupon()),
            })
            .then_state(|state| {
                let view = view(state);
                assert_eq!(view.price, "R$ 25,00");
                assert_eq!(view.discount.as_deref(), Some("-R$ 5,00"));
                assert_eq!(view.total, "R$ 20,00");
            })
            .run();
    }

    #[test]
    fn test_invalid_coupon_shows_server_message() {
        ReducerTest::new(CheckoutReducer)
            .with_env(env(&MockApi::new()))
            .given_state(CheckoutState {
                coupon_input: "VELHO".to_string(),
                validating_coupon: true,
                ..checkout()
            })
            .when_action(CheckoutAction::CouponValidated {
                code: "VELHO".to_string(),
                result: Ok(CouponValidation {
                    valid: false,
                    message: Some("Cupom expirado".to_string()),
                    ..valid_coupon()
                }),
            })
            .then_state(|state| {
                assert!(state.coupon.is_none());
                assert_eq!(state.coupon_error.as_deref(), Some("Cupom expirado"));
            })
            .run();
    }

    #[test]
    fn test_coupon_edited_during_check_is_not_applied() {
        let api = MockApi::new();

        ReducerTest::new(CheckoutReducer)
            .with_env(env(&api))
            .given_state(checkout())
            .when_actions(vec![
                CheckoutAction::CouponChanged("SEMANA10".to_string()),
                CheckoutAction::ApplyCouponPressed,
                CheckoutAction::CouponChanged("OUTRO".to_string()),
                CheckoutAction::CouponValidated {
                    code: "SEMANA10".to_string(),
                    result: Ok(valid_coupon()),
                },
                CheckoutAction::PurchasePressed,
            ])
            .then_state(|state| {
                assert_eq!(state.coupon_input, "OUTRO");
                assert!(state.coupon.is_none());
                assert!(!state.validating_coupon);
            })
            .run();

        assert_eq!(
            api.calls().last(),
            Some(&ApiCall::CreateOrder(CreateOrderRequest {
                event_id: "evt-1".to_string(),
                coupon_code: None,
            }))
        );
    }

    #[test]
    fn test_purchase_sends_confirmed_coupon_only() {
        let api = MockApi::new();

        ReducerTest::new(CheckoutReducer)
            .with_env(env(&api))
            .given_state(CheckoutState {
                coupon_input: "SEMANA10".to_string(),
                coupon: Some(AppliedCoupon {
                    code: "SEMANA10".to_string(),
                    validation: valid_coupon(),
                }),
                ..checkout()
            })
            .when_actions(vec![
                CheckoutAction::PurchasePressed,
                CheckoutAction::PurchasePressed,
            ])
            .then_state(|state| assert!(state.purchasing))
            .then_effects(assertions::assert_no_effects)
            .run();

        assert_eq!(
            api.calls(),
            vec![ApiCall::CreateOrder(CreateOrderRequest {
                event_id: "evt-1".to_string(),
                coupon_code: Some("SEMANA10".to_string()),
            })]
        );
    }

    #[test]
    fn test_sold_out_event_cannot_be_purchased() {
        let api = MockApi::new();
        let mut event = fixtures::event("evt-1", test_time());
        event.registered_count = 50;

        ReducerTest::new(CheckoutReducer)
            .with_env(env(&api))
            .given_state(CheckoutState::new(event))
            .when_action(CheckoutAction::PurchasePressed)
            .then_state(|state| assert!(!view(state).can_purchase))
            .then_effects(assertions::assert_no_effects)
            .run();

        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_created_order_drives_next_step() {
        let mut free = fixtures::order("ord-1", OrderStatus::Approved);
        free.total_amount = 0.0;

        ReducerTest::new(CheckoutReducer)
            .with_env(env(&MockApi::new()))
            .given_state(CheckoutState {
                purchasing: true,
                ..checkout()
            })
            .when_action(CheckoutAction::OrderCreated(Ok(free)))
            .then_state(|state| {
                let view = view(state);
                assert_eq!(view.next_step, Some(NextStep::ViewTicket));
                assert_eq!(view.total, "R$ 0,00");
                assert!(!view.can_purchase);
            })
            .run();

        ReducerTest::new(CheckoutReducer)
            .with_env(env(&MockApi::new()))
            .given_state(checkout())
            .when_action(CheckoutAction::OrderCreated(Ok(fixtures::order(
                "ord-2",
                OrderStatus::PendingPayment,
            ))))
            .then_state(|state| assert_eq!(view(state).next_step, Some(NextStep::UploadProof)))
            .run();
    }

    #[test]
    fn test_purchase_failure_is_retryable() {
        ReducerTest::new(CheckoutReducer)
            .with_env(env(&MockApi::new()))
            .given_state(CheckoutState {
                purchasing: true,
                ..checkout()
            })
            .when_action(CheckoutAction::OrderCreated(Err(ApiError::Api {
                status: 409,
                message: "Você já possui um pedido para este evento".to_string(),
            })))
            .then_state(|state| {
                let view = view(state);
                assert!(view.can_purchase);
                assert_eq!(
                    view.error.as_deref(),
                    Some("Você já possui um pedido para este evento")
                );
            })
            .run();
    }
}
