//! Scripted fake for the API ports
//!
//! Responses are configured per operation and cloned on every call. An
//! operation without a scripted response fails with `ApiError::NotFound`.
//! Every call is recorded so tests can assert on what a component sent.

use campus_api::ports::{
    AchievementApi, CouponApi, EventApi, NotificationApi, OrderApi, ParticipationApi, ProofFile,
    TicketApi,
};
use campus_api::types::{
    Badge, Certificate, CheckInResponse, CouponValidation, CreateOrderRequest, Event,
    EventTicket, Participation, TicketOrder, UnreadCount, ValidateCouponRequest,
    ValidateOrderRequest,
};
use campus_api::{ApiError, ApiResult};
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// A recorded call to the fake
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiCall {
    /// `unread_count`
    UnreadCount,
    /// `list_events`
    ListEvents,
    /// `event_by_id`
    EventById(String),
    /// `participations_by_user`
    ParticipationsByUser(String),
    /// `create_order`
    CreateOrder(CreateOrderRequest),
    /// `my_orders`
    MyOrders,
    /// `pending_validation_orders`
    PendingValidationOrders,
    /// `upload_proof`
    UploadProof {
        /// Order the proof belongs to
        order_id: String,
        /// Uploaded file name
        file_name: String,
        /// Uploaded size in bytes
        size: usize,
    },
    /// `cancel_order`
    CancelOrder(String),
    /// `validate_order`
    ValidateOrder {
        /// Order decided
        order_id: String,
        /// Decision sent
        request: ValidateOrderRequest,
    },
    /// `ticket_by_validation_code`
    TicketByValidationCode(String),
    /// `download_ticket`
    DownloadTicket(String),
    /// `check_in`
    CheckIn(String),
    /// `validate_coupon`
    ValidateCoupon(ValidateCouponRequest),
    /// `my_badges`
    MyBadges,
    /// `my_certificates`
    MyCertificates,
}

#[derive(Default)]
struct Script {
    unread_count: Option<ApiResult<UnreadCount>>,
    events: HashMap<String, ApiResult<Event>>,
    participations: Option<ApiResult<Vec<Participation>>>,
    create_order: Option<ApiResult<TicketOrder>>,
    my_orders: Option<ApiResult<Vec<TicketOrder>>>,
    pending_orders: Option<ApiResult<Vec<TicketOrder>>>,
    upload_proof: Option<ApiResult<String>>,
    cancel_order: Option<ApiResult<TicketOrder>>,
    validate_order: Option<ApiResult<TicketOrder>>,
    ticket: Option<ApiResult<EventTicket>>,
    download: Option<ApiResult<Vec<u8>>>,
    check_in: Option<ApiResult<CheckInResponse>>,
    coupon: Option<ApiResult<CouponValidation>>,
    badges: Option<ApiResult<Vec<Badge>>>,
    certificates: Option<ApiResult<Vec<Certificate>>>,
}

/// In-memory implementation of every API port
///
/// Clones share the script and the call log.
#[derive(Clone, Default)]
pub struct MockApi {
    script: Arc<Mutex<Script>>,
    calls: Arc<Mutex<Vec<ApiCall>>>,
    latency: Option<Duration>,
}

fn unscripted<T>(operation: &str) -> ApiResult<T> {
    Err(ApiError::NotFound(format!("no scripted response for {operation}")))
}

impl MockApi {
    /// Create a fake with nothing scripted
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every response (use with paused tokio time)
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    fn script(&self, f: impl FnOnce(&mut Script)) {
        f(&mut self.script.lock().unwrap_or_else(PoisonError::into_inner));
    }

    fn record<T>(
        &self,
        call: ApiCall,
        response: impl FnOnce(&Script) -> ApiResult<T>,
    ) -> BoxFuture<'static, ApiResult<T>>
    where
        T: Send + 'static,
    {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
        let result = response(&self.script.lock().unwrap_or_else(PoisonError::into_inner));
        let latency = self.latency;

        Box::pin(async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            result
        })
    }

    /// Every call made so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of calls matching `predicate`
    #[must_use]
    pub fn call_count(&self, predicate: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|call| predicate(call))
            .count()
    }

    /// Script `unread_count`
    pub fn respond_unread_count(&self, result: ApiResult<UnreadCount>) {
        self.script(|s| s.unread_count = Some(result));
    }

    /// Script `event_by_id` for one event
    pub fn respond_event(&self, event_id: &str, result: ApiResult<Event>) {
        self.script(|s| {
            s.events.insert(event_id.to_string(), result);
        });
    }

    /// Script `event_by_id` and `list_events` with a known event
    pub fn add_event(&self, event: Event) {
        self.respond_event(&event.id.clone(), Ok(event));
    }

    /// Script `participations_by_user`
    pub fn respond_participations(&self, result: ApiResult<Vec<Participation>>) {
        self.script(|s| s.participations = Some(result));
    }

    /// Script `create_order`
    pub fn respond_create_order(&self, result: ApiResult<TicketOrder>) {
        self.script(|s| s.create_order = Some(result));
    }

    /// Script `my_orders`
    pub fn respond_my_orders(&self, result: ApiResult<Vec<TicketOrder>>) {
        self.script(|s| s.my_orders = Some(result));
    }

    /// Script `pending_validation_orders`
    pub fn respond_pending_orders(&self, result: ApiResult<Vec<TicketOrder>>) {
        self.script(|s| s.pending_orders = Some(result));
    }

    /// Script `upload_proof`
    pub fn respond_upload_proof(&self, result: ApiResult<String>) {
        self.script(|s| s.upload_proof = Some(result));
    }

    /// Script `cancel_order`
    pub fn respond_cancel_order(&self, result: ApiResult<TicketOrder>) {
        self.script(|s| s.cancel_order = Some(result));
    }

    /// Script `validate_order`
    pub fn respond_validate_order(&self, result: ApiResult<TicketOrder>) {
        self.script(|s| s.validate_order = Some(result));
    }

    /// Script `ticket_by_validation_code`
    pub fn respond_ticket(&self, result: ApiResult<EventTicket>) {
        self.script(|s| s.ticket = Some(result));
    }

    /// Script `download_ticket`
    pub fn respond_download(&self, result: ApiResult<Vec<u8>>) {
        self.script(|s| s.download = Some(result));
    }

    /// Script `check_in`
    pub fn respond_check_in(&self, result: ApiResult<CheckInResponse>) {
        self.script(|s| s.check_in = Some(result));
    }

    /// Script `validate_coupon`
    pub fn respond_coupon(&self, result: ApiResult<CouponValidation>) {
        self.script(|s| s.coupon = Some(result));
    }

    /// Script `my_badges`
    pub fn respond_badges(&self, result: ApiResult<Vec<Badge>>) {
        self.script(|s| s.badges = Some(result));
    }

    /// Script `my_certificates`
    pub fn respond_certificates(&self, result: ApiResult<Vec<Certificate>>) {
        self.script(|s| s.certificates = Some(result));
    }
}

impl NotificationApi for MockApi {
    fn unread_count(&self) -> BoxFuture<'static, ApiResult<UnreadCount>> {
        self.record(ApiCall::UnreadCount, |s| {
            s.unread_count.clone().unwrap_or_else(|| unscripted("unread_count"))
        })
    }
}

impl EventApi for MockApi {
    fn list_events(&self) -> BoxFuture<'static, ApiResult<Vec<Event>>> {
        self.record(ApiCall::ListEvents, |s| {
            let mut events: Vec<Event> = s
                .events
                .values()
                .filter_map(|result| result.clone().ok())
                .collect();
            events.sort_by_key(|event| event.start_date);
            Ok(events)
        })
    }

    fn event_by_id(&self, event_id: &str) -> BoxFuture<'static, ApiResult<Event>> {
        self.record(ApiCall::EventById(event_id.to_string()), |s| {
            s.events
                .get(event_id)
                .cloned()
                .unwrap_or_else(|| Err(ApiError::NotFound(format!("/events/{event_id}"))))
        })
    }
}

impl ParticipationApi for MockApi {
    fn participations_by_user(
        &self,
        user_id: &str,
    ) -> BoxFuture<'static, ApiResult<Vec<Participation>>> {
        self.record(ApiCall::ParticipationsByUser(user_id.to_string()), |s| {
            s.participations
                .clone()
                .unwrap_or_else(|| unscripted("participations_by_user"))
        })
    }
}

impl OrderApi for MockApi {
    fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> BoxFuture<'static, ApiResult<TicketOrder>> {
        self.record(ApiCall::CreateOrder(request), |s| {
            s.create_order.clone().unwrap_or_else(|| unscripted("create_order"))
        })
    }

    fn my_orders(&self) -> BoxFuture<'static, ApiResult<Vec<TicketOrder>>> {
        self.record(ApiCall::MyOrders, |s| {
            s.my_orders.clone().unwrap_or_else(|| unscripted("my_orders"))
        })
    }

    fn pending_validation_orders(&self) -> BoxFuture<'static, ApiResult<Vec<TicketOrder>>> {
        self.record(ApiCall::PendingValidationOrders, |s| {
            s.pending_orders
                .clone()
                .unwrap_or_else(|| unscripted("pending_validation_orders"))
        })
    }

    fn upload_proof(
        &self,
        order_id: &str,
        file: ProofFile,
    ) -> BoxFuture<'static, ApiResult<String>> {
        let call = ApiCall::UploadProof {
            order_id: order_id.to_string(),
            file_name: file.file_name.clone(),
            size: file.len(),
        };
        self.record(call, |s| {
            s.upload_proof.clone().unwrap_or_else(|| unscripted("upload_proof"))
        })
    }

    fn cancel_order(&self, order_id: &str) -> BoxFuture<'static, ApiResult<TicketOrder>> {
        self.record(ApiCall::CancelOrder(order_id.to_string()), |s| {
            s.cancel_order.clone().unwrap_or_else(|| unscripted("cancel_order"))
        })
    }

    fn validate_order(
        &self,
        order_id: &str,
        request: ValidateOrderRequest,
    ) -> BoxFuture<'static, ApiResult<TicketOrder>> {
        let call = ApiCall::ValidateOrder {
            order_id: order_id.to_string(),
            request,
        };
        self.record(call, |s| {
            s.validate_order.clone().unwrap_or_else(|| unscripted("validate_order"))
        })
    }
}

impl TicketApi for MockApi {
    fn ticket_by_validation_code(
        &self,
        code: &str,
    ) -> BoxFuture<'static, ApiResult<EventTicket>> {
        self.record(ApiCall::TicketByValidationCode(code.to_string()), |s| {
            s.ticket
                .clone()
                .unwrap_or_else(|| unscripted("ticket_by_validation_code"))
        })
    }

    fn download_ticket(&self, ticket_id: &str) -> BoxFuture<'static, ApiResult<Vec<u8>>> {
        self.record(ApiCall::DownloadTicket(ticket_id.to_string()), |s| {
            s.download.clone().unwrap_or_else(|| unscripted("download_ticket"))
        })
    }

    fn check_in(&self, validation_code: &str) -> BoxFuture<'static, ApiResult<CheckInResponse>> {
        self.record(ApiCall::CheckIn(validation_code.to_string()), |s| {
            s.check_in.clone().unwrap_or_else(|| unscripted("check_in"))
        })
    }
}

impl CouponApi for MockApi {
    fn validate_coupon(
        &self,
        request: ValidateCouponRequest,
    ) -> BoxFuture<'static, ApiResult<CouponValidation>> {
        self.record(ApiCall::ValidateCoupon(request), |s| {
            s.coupon.clone().unwrap_or_else(|| unscripted("validate_coupon"))
        })
    }
}

impl AchievementApi for MockApi {
    fn my_badges(&self) -> BoxFuture<'static, ApiResult<Vec<Badge>>> {
        self.record(ApiCall::MyBadges, |s| {
            s.badges.clone().unwrap_or_else(|| unscripted("my_badges"))
        })
    }

    fn my_certificates(&self) -> BoxFuture<'static, ApiResult<Vec<Certificate>>> {
        self.record(ApiCall::MyCertificates, |s| {
            s.certificates.clone().unwrap_or_else(|| unscripted("my_certificates"))
        })
    }
}
