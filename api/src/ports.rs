//! Async ports to the Campus Events API
//!
//! Components depend on these narrow traits, never on the HTTP client, so
//! reducers can be exercised against in-memory fakes. Every operation
//! returns a `'static` boxed future so it can be moved into an effect.

use crate::error::ApiResult;
use crate::types::{
    Badge, Certificate, CheckInResponse, CouponValidation, CreateOrderRequest, Event,
    EventTicket, Participation, TicketOrder, UnreadCount, ValidateCouponRequest,
    ValidateOrderRequest,
};
use futures::future::BoxFuture;
use std::sync::Arc;

/// A file picked by the user for upload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofFile {
    /// Original file name
    pub file_name: String,
    /// MIME type reported by the host
    pub content_type: String,
    /// File contents
    pub bytes: Arc<[u8]>,
}

impl ProofFile {
    /// Size in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the MIME type is an image type
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("image/")
    }
}

/// Notification endpoints
pub trait NotificationApi: Send + Sync {
    /// `GET /notifications/unread-count`
    fn unread_count(&self) -> BoxFuture<'static, ApiResult<UnreadCount>>;
}

/// Event endpoints
pub trait EventApi: Send + Sync {
    /// `GET /events`
    fn list_events(&self) -> BoxFuture<'static, ApiResult<Vec<Event>>>;

    /// `GET /events/{id}`
    fn event_by_id(&self, event_id: &str) -> BoxFuture<'static, ApiResult<Event>>;
}

/// Participation endpoints
pub trait ParticipationApi: Send + Sync {
    /// `GET /participations/user/{userId}`
    fn participations_by_user(
        &self,
        user_id: &str,
    ) -> BoxFuture<'static, ApiResult<Vec<Participation>>>;
}

/// Order lifecycle endpoints
pub trait OrderApi: Send + Sync {
    /// `POST /orders`
    fn create_order(&self, request: CreateOrderRequest)
    -> BoxFuture<'static, ApiResult<TicketOrder>>;

    /// `GET /orders/my`
    fn my_orders(&self) -> BoxFuture<'static, ApiResult<Vec<TicketOrder>>>;

    /// `GET /orders/pending-validation`
    fn pending_validation_orders(&self) -> BoxFuture<'static, ApiResult<Vec<TicketOrder>>>;

    /// `POST /orders/{id}/payment-proof`, returns the stored proof URL
    fn upload_proof(&self, order_id: &str, file: ProofFile)
    -> BoxFuture<'static, ApiResult<String>>;

    /// `POST /orders/{id}/cancel`
    fn cancel_order(&self, order_id: &str) -> BoxFuture<'static, ApiResult<TicketOrder>>;

    /// `POST /orders/{id}/validate`
    fn validate_order(
        &self,
        order_id: &str,
        request: ValidateOrderRequest,
    ) -> BoxFuture<'static, ApiResult<TicketOrder>>;
}

/// Ticket endpoints
pub trait TicketApi: Send + Sync {
    /// `GET /tickets/validation/{code}`
    fn ticket_by_validation_code(&self, code: &str)
    -> BoxFuture<'static, ApiResult<EventTicket>>;

    /// `GET /tickets/{id}/download`
    fn download_ticket(&self, ticket_id: &str) -> BoxFuture<'static, ApiResult<Vec<u8>>>;

    /// `POST /tickets/check-in`
    fn check_in(&self, validation_code: &str) -> BoxFuture<'static, ApiResult<CheckInResponse>>;
}

/// Coupon endpoints
pub trait CouponApi: Send + Sync {
    /// `POST /coupons/validate`
    fn validate_coupon(
        &self,
        request: ValidateCouponRequest,
    ) -> BoxFuture<'static, ApiResult<CouponValidation>>;
}

/// Badge and certificate endpoints
pub trait AchievementApi: Send + Sync {
    /// `GET /badges/my`
    fn my_badges(&self) -> BoxFuture<'static, ApiResult<Vec<Badge>>>;

    /// `GET /certificates/my`
    fn my_certificates(&self) -> BoxFuture<'static, ApiResult<Vec<Certificate>>>;
}

/// Every port at once, for hosts wiring a single client
pub trait CampusApi:
    NotificationApi
    + EventApi
    + ParticipationApi
    + OrderApi
    + TicketApi
    + CouponApi
    + AchievementApi
{
}

impl<T> CampusApi for T where
    T: NotificationApi
        + EventApi
        + ParticipationApi
        + OrderApi
        + TicketApi
        + CouponApi
        + AchievementApi
{
}
