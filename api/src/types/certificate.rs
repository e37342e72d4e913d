//! Certificate payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Certificate of attendance
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    /// Certificate id
    pub id: String,
    /// Holder
    pub user_id: String,
    /// Name printed on the certificate
    pub participant_name: String,
    /// Event attended
    pub event_id: String,
    /// Title of the event attended
    pub event_title: String,
    /// Workload in hours
    pub workload_hours: u32,
    /// Issue time
    pub issued_at: DateTime<Utc>,
    /// Public authenticity code
    pub validation_code: String,
    /// Where the rendered document can be downloaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}
