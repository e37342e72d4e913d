//! Camera-based check-in scanner
//!
//! ```text
//! Start ──► Camera::start ──► Started ──► Decoded(text) ... ──► CameraClosed
//!                 │                          │
//!                 └─► StartFailed            ├─ dropped while a submission is pending
//!                                            ├─ dropped if same text within the cooldown
//!                                            └─► CodeValidator::validate ──► ValidationFinished
//! ```
//!
//! The decode session runs as a cancellable stream effect. `Stop` and
//! `Disappeared` cancel it and always release the camera. A failed start
//! leaves a persistent error and is never retried automatically.

pub mod actions;
pub mod environment;
pub mod reducer;
#[cfg(test)]
mod tests;
pub mod types;

pub use actions::ScannerAction;
pub use environment::{ProductionScannerEnvironment, ScannerEnvironment};
pub use reducer::{SCANNER_SESSION, ScannerReducer};
pub use types::{LastDecode, ScannerState, ScannerView, view};
