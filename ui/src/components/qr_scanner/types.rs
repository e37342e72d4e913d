//! State and view model of the check-in scanner.

use crate::capabilities::CameraError;
use crate::checkin::{CheckInResult, Feedback};
use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;

/// The last payload forwarded to the validator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LastDecode {
    /// Payload as decoded
    pub text: String,
    /// When it was forwarded
    pub at: DateTime<Utc>,
}

impl LastDecode {
    /// Whether `text` repeats this payload less than `cooldown` after it.
    #[must_use]
    pub fn suppresses(&self, text: &str, now: DateTime<Utc>, cooldown: Duration) -> bool {
        let cooldown = TimeDelta::from_std(cooldown).unwrap_or(TimeDelta::MAX);
        self.text == text && now.signed_duration_since(self.at) < cooldown
    }
}

/// Scanner state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScannerState {
    /// Camera acquired and decoding
    pub scanning: bool,
    /// Waiting for the camera
    pub starting: bool,
    /// Persistent start failure
    pub camera_error: Option<CameraError>,
    /// A payload is being validated
    pub pending: bool,
    /// Last payload forwarded
    pub last_decoded: Option<LastDecode>,
    /// Result of the last validation
    pub last_outcome: Option<CheckInResult>,
}

/// Render-ready scanner.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)] // One flag per control
pub struct ScannerView {
    /// Show the live preview
    pub scanning: bool,
    /// Show the start button
    pub can_start: bool,
    /// Show the stop button
    pub can_stop: bool,
    /// Spinner over the preview
    pub validating: bool,
    /// Persistent camera error banner
    pub error_banner: Option<String>,
    /// Outcome banner
    pub feedback: Option<Feedback>,
}

/// Render the scanner.
#[must_use]
pub fn view(state: &ScannerState) -> ScannerView {
    ScannerView {
        scanning: state.scanning,
        can_start: !state.scanning && !state.starting,
        can_stop: state.scanning || state.starting,
        validating: state.pending,
        error_banner: state.camera_error.as_ref().map(ToString::to_string),
        feedback: state.last_outcome.as_ref().map(Feedback::from),
    }
}
