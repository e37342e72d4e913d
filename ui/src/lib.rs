//! Headless UI for the Campus Events platform
//!
//! The web pages of the platform (event listing, checkout, orders, tickets,
//! achievements, staff payment validation and check-in) are expressed as
//! composable components: pure reducers driven by a [`Store`], plus `view`
//! functions that turn state into render-ready data.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      Renderer (web, terminal, ...)      │  ← draws views, forwards input
//! ├─────────────────────────────────────────┤
//! │      Store (campus-ui-runtime)          │  ← runs effects, feeds actions back
//! ├─────────────────────────────────────────┤
//! │      Components (this crate)            │
//! │  - reducers: state + action → effects   │  ← no I/O, tested at memory speed
//! │  - views: state → display data          │
//! ├─────────────────────────────────────────┤
//! │      Ports (campus-api)                 │  ← HTTP client or test doubles
//! └─────────────────────────────────────────┘
//! ```
//!
//! Devices the browser would provide (camera, clipboard) are abstracted in
//! [`capabilities`]. The `checkin-station` binary drives the manual check-in
//! component from a terminal.
//!
//! [`Store`]: campus_ui_runtime::Store

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod capabilities;
pub mod checkin;
pub mod components;
pub mod config;
pub mod format;
pub mod status;
pub mod telemetry;

pub use checkin::{CheckInResult, CheckInValidator, CodeValidator, Feedback, ValidationCode};
pub use config::Config;
