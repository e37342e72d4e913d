//! API payload types
//!
//! Shapes of the request and response bodies exchanged with the Campus
//! Events API. Field names are camelCase on the wire and enum values are
//! SCREAMING_SNAKE_CASE.

pub mod auth;
pub mod badge;
pub mod certificate;
pub mod coupon;
pub mod event;
pub mod notification;
pub mod participant;
pub mod ticket;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest, User, UserRole};
pub use badge::Badge;
pub use certificate::Certificate;
pub use coupon::{Coupon, CouponValidation, DiscountType, ValidateCouponRequest};
pub use event::{Event, EventType};
pub use notification::{Notification, NotificationType, UnreadCount};
pub use participant::{Participant, Participation, ParticipationStatus};
pub use ticket::{
    CheckInRequest, CheckInResponse, CreateOrderRequest, EventTicket, OrderStatus,
    PaymentProofUploadResponse, TicketOrder, TicketStatus, TicketValidation,
    ValidateOrderRequest,
};
