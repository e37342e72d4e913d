//! Participation payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of a user's registration in an event
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipationStatus {
    /// Registered, not yet attended
    Registered,
    /// Checked in
    Attended,
    /// Registration withdrawn
    Cancelled,
}

/// A user's registration in an event
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    /// Participation id
    pub id: String,
    /// Registered user
    pub user_id: String,
    /// Event registered for
    pub event_id: String,
    /// Registration state
    pub status: ParticipationStatus,
    /// Registration time
    pub registered_at: DateTime<Utc>,
}

/// A participant as listed to organizers
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// User id
    pub user_id: String,
    /// Display name
    pub name: String,
    /// Contact e-mail
    pub email: String,
    /// Institution or course
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    /// Registration state in the listed event
    pub status: ParticipationStatus,
}
