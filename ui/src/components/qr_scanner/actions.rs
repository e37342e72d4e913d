//! Actions for the check-in scanner.

use crate::capabilities::CameraError;
use crate::checkin::CheckInResult;

/// Scanner actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScannerAction {
    /// Operator asked to start scanning
    Start,

    /// Camera acquired, decoding
    Started,

    /// Camera could not be acquired
    StartFailed(CameraError),

    /// The camera decoded a QR payload
    Decoded(String),

    /// The decode stream ended on its own
    CameraClosed,

    /// Operator asked to stop scanning
    Stop,

    /// The scanner left the screen
    Disappeared,

    /// Validator answered for the last forwarded payload
    ValidationFinished(CheckInResult),
}
