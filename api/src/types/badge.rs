//! Badge payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A badge earned by attending events
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    /// Badge id
    pub id: String,
    /// Badge name
    pub name: String,
    /// What the badge is awarded for
    #[serde(default)]
    pub description: String,
    /// Badge artwork
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Event that granted the badge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Title of that event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_title: Option<String>,
    /// When the badge was earned
    pub earned_at: DateTime<Utc>,
}
