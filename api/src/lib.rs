//! # Campus API
//!
//! Payload types, narrow async ports and the HTTP client for the Campus
//! Events backend.
//!
//! Components never talk to HTTP directly: they receive the port traits in
//! their environment. [`ApiClient`] implements every port over `reqwest`.
//!
//! ## Example
//!
//! ```ignore
//! use campus_api::{ApiClient, NotificationApi};
//!
//! let client = ApiClient::new("http://localhost:8080/api", Duration::from_secs(15))?
//!     .with_token(token);
//! let unread = client.unread_count().await?;
//! ```

pub mod client;
pub mod error;
pub mod ports;
pub mod types;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use ports::{
    AchievementApi, CampusApi, CouponApi, EventApi, NotificationApi, OrderApi, ParticipationApi,
    ProofFile, TicketApi,
};
