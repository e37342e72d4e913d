//! # Campus UI Testing
//!
//! Testing utilities for Campus Events UI components.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given/When/Then harness for reducers
//! - Deterministic clocks ([`FixedClock`], [`ManualClock`])
//! - [`MockApi`]: scripted implementation of every API port that records calls
//! - Fixtures and proptest strategies for domain values
//!
//! ## Example
//!
//! ```ignore
//! use campus_ui_testing::{MockApi, ApiCall, test_clock};
//! use campus_ui_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_forbidden_unread_count_shows_zero() {
//!     let api = MockApi::new();
//!     api.respond_unread_count(Err(ApiError::Forbidden));
//!
//!     let store = Store::new(SidebarState::default(), SidebarReducer, env(&api));
//!     store.send(SidebarAction::Appeared).await?.wait().await;
//!
//!     assert_eq!(store.state(|s| s.unread_count).await, 0);
//! }
//! ```

use chrono::{DateTime, Utc};
use campus_ui_core::environment::Clock;

mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use chrono::TimeDelta;
    use std::sync::{Arc, Mutex, PoisonError};
    use std::time::Duration;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use campus_ui_testing::mocks::FixedClock;
    /// use campus_ui_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that only moves when told to
    ///
    /// Clones share the same time, so a test can keep one handle and give
    /// another to the component environment.
    ///
    /// ```
    /// use campus_ui_testing::mocks::{ManualClock, test_time};
    /// use campus_ui_core::environment::Clock;
    /// use std::time::Duration;
    ///
    /// let clock = ManualClock::new(test_time());
    /// let shared = clock.clone();
    /// clock.advance(Duration::from_secs(2));
    /// assert_eq!((shared.now() - test_time()).num_seconds(), 2);
    /// ```
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        time: Arc<Mutex<DateTime<Utc>>>,
    }

    impl ManualClock {
        /// Create a clock stopped at `time`
        #[must_use]
        pub fn new(time: DateTime<Utc>) -> Self {
            Self {
                time: Arc::new(Mutex::new(time)),
            }
        }

        /// Move the clock forward
        pub fn advance(&self, by: Duration) {
            let delta = TimeDelta::from_std(by).unwrap_or(TimeDelta::MAX);
            let mut time = self.time.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(advanced) = time.checked_add_signed(delta) {
                *time = advanced;
            }
        }

        /// Jump to `time`
        pub fn set(&self, time: DateTime<Utc>) {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner) = time;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// Reference instant used across tests (2025-03-01 12:00:00 UTC)
    #[must_use]
    pub fn test_time() -> DateTime<Utc> {
        DateTime::from_timestamp(1_740_830_400, 0).unwrap_or_default()
    }

    /// Create a default fixed clock for tests (2025-03-01 12:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(test_time())
    }
}

pub mod api;
pub mod fixtures;

/// Property-based testing utilities
///
/// Strategies for check-in codes, shared by the format-check property tests.
pub mod properties {
    use proptest::prelude::*;

    /// Hex digits in either case
    fn hex_group(len: usize) -> impl Strategy<Value = String> {
        proptest::collection::vec(
            prop_oneof![
                proptest::char::range('0', '9'),
                proptest::char::range('a', 'f'),
                proptest::char::range('A', 'F'),
            ],
            len,
        )
        .prop_map(|chars| chars.into_iter().collect())
    }

    /// Well-formed codes: 8-4-4-4-12 hex groups, each hyphen optional
    pub fn validation_code() -> impl Strategy<Value = String> {
        (
            hex_group(8),
            hex_group(4),
            hex_group(4),
            hex_group(4),
            hex_group(12),
            proptest::collection::vec(any::<bool>(), 4),
        )
            .prop_map(|(a, b, c, d, e, hyphens)| {
                let separator = |i: usize| if hyphens[i] { "-" } else { "" };
                format!(
                    "{a}{}{b}{}{c}{}{d}{}{e}",
                    separator(0),
                    separator(1),
                    separator(2),
                    separator(3)
                )
            })
    }

    /// Codes with one group a digit short or long
    pub fn misgrouped_code() -> impl Strategy<Value = String> {
        (
            hex_group(8),
            hex_group(4),
            hex_group(4),
            hex_group(4),
            prop_oneof![hex_group(11), hex_group(13)],
        )
            .prop_map(|(a, b, c, d, e)| format!("{a}-{b}-{c}-{d}-{e}"))
    }
}

// Re-export commonly used items
pub use api::{ApiCall, MockApi};
pub use mocks::{FixedClock, ManualClock, test_clock, test_time};
