//! Notification payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notification category
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// Order status changed
    Order,
    /// Ticket issued or used
    Ticket,
    /// Event updated or about to start
    Event,
    /// Badge or certificate granted
    Achievement,
    /// Platform announcement
    System,
}

/// A user notification
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Notification id
    pub id: String,
    /// Headline
    pub title: String,
    /// Body text
    pub message: String,
    /// Category
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// Whether the user has seen it
    #[serde(default)]
    pub read: bool,
    /// Optional in-app link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// `GET /notifications/unread-count` response
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnreadCount {
    /// Number of unread notifications
    pub count: u64,
}
