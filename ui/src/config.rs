//! Configuration management for the Campus Events UI.
//!
//! Loads configuration from environment variables with sensible defaults.

use campus_api::{ApiClient, ApiResult};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// UI configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Backend API configuration
    pub api: ApiConfig,
    /// Navigation shell polling
    pub polling: PollingConfig,
    /// Check-in tooling
    pub checkin: CheckInConfig,
    /// Payment proof upload limits
    pub upload: UploadConfig,
    /// Date and time display
    pub display: DisplayConfig,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL, e.g. `http://localhost:8080/api`
    pub base_url: String,
    /// Bearer token attached to every request
    pub token: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Polling intervals of the navigation shell
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PollingConfig {
    /// Unread-notification count interval in seconds
    pub notifications_secs: u64,
    /// Upcoming-events count interval in seconds
    pub events_secs: u64,
}

/// Check-in tooling configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckInConfig {
    /// Window in which an identical scan is ignored, in milliseconds
    pub scan_cooldown_ms: u64,
}

/// Payment proof upload configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadConfig {
    /// Largest accepted image in bytes
    pub max_proof_bytes: usize,
}

/// Date and time display configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Offset used to display and bucket dates (UTC-3 is -180)
    pub utc_offset_minutes: i32,
    /// Days ahead counted as "upcoming" in the sidebar
    pub upcoming_window_days: u32,
}

fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Like [`parsed`], but zero also falls back to the default
fn positive(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    match parsed(lookup, key, default) {
        0 => default,
        value => value,
    }
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Missing or unparsable values fall back to their defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: lookup("CAMPUS_API_URL")
                    .unwrap_or_else(|| "http://localhost:8080/api".to_string()),
                token: lookup("CAMPUS_API_TOKEN").filter(|token| !token.trim().is_empty()),
                timeout_secs: positive(&lookup, "CAMPUS_API_TIMEOUT_SECS", 15),
            },
            polling: PollingConfig {
                notifications_secs: positive(&lookup, "CAMPUS_NOTIFICATIONS_POLL_SECS", 30),
                events_secs: positive(&lookup, "CAMPUS_EVENTS_POLL_SECS", 60),
            },
            checkin: CheckInConfig {
                scan_cooldown_ms: parsed(&lookup, "CAMPUS_SCAN_COOLDOWN_MS", 2000),
            },
            upload: UploadConfig {
                max_proof_bytes: parsed(&lookup, "CAMPUS_MAX_PROOF_BYTES", 5 * 1024 * 1024),
            },
            display: DisplayConfig {
                utc_offset_minutes: parsed(&lookup, "CAMPUS_UTC_OFFSET_MINUTES", -180),
                upcoming_window_days: parsed(&lookup, "CAMPUS_UPCOMING_WINDOW_DAYS", 30),
            },
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }

    /// Build the HTTP client described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn api_client(&self) -> ApiResult<ApiClient> {
        let client = ApiClient::new(
            self.api.base_url.clone(),
            Duration::from_secs(self.api.timeout_secs),
        )?;

        Ok(match &self.api.token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        })
    }

    /// Display offset
    #[must_use]
    pub fn utc_offset(&self) -> FixedOffset {
        crate::format::utc_offset(self.display.utc_offset_minutes)
    }
}

impl PollingConfig {
    /// Unread-notification interval
    #[must_use]
    pub const fn notifications_interval(&self) -> Duration {
        Duration::from_secs(self.notifications_secs)
    }

    /// Upcoming-events interval
    #[must_use]
    pub const fn events_interval(&self) -> Duration {
        Duration::from_secs(self.events_secs)
    }
}

impl CheckInConfig {
    /// Scan cooldown
    #[must_use]
    pub const fn scan_cooldown(&self) -> Duration {
        Duration::from_millis(self.scan_cooldown_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
