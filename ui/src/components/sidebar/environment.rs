//! Environment for the navigation sidebar reducer.

use campus_api::ports::{EventApi, NotificationApi, ParticipationApi};
use campus_ui_core::environment::Clock;
use chrono::FixedOffset;
use std::sync::Arc;
use std::time::Duration;

/// Dependencies of the sidebar reducer.
pub trait SidebarEnvironment: Send + Sync {
    /// Notification endpoints.
    fn notifications(&self) -> &dyn NotificationApi;

    /// Event endpoints.
    fn events(&self) -> &dyn EventApi;

    /// Participation endpoints.
    fn participations(&self) -> &dyn ParticipationApi;

    /// Clock deciding what "today" is.
    fn clock(&self) -> &dyn Clock;

    /// Offset in which "today" starts.
    fn offset(&self) -> FixedOffset;

    /// Unread-count polling interval.
    fn notifications_interval(&self) -> Duration;

    /// Upcoming-events polling interval.
    fn events_interval(&self) -> Duration;

    /// Days ahead counted as upcoming.
    fn upcoming_window_days(&self) -> u32;
}

/// Production environment for the sidebar.
#[derive(Clone)]
pub struct ProductionSidebarEnvironment {
    notifications: Arc<dyn NotificationApi>,
    events: Arc<dyn EventApi>,
    participations: Arc<dyn ParticipationApi>,
    clock: Arc<dyn Clock>,
    offset: FixedOffset,
    notifications_interval: Duration,
    events_interval: Duration,
    upcoming_window_days: u32,
}

impl ProductionSidebarEnvironment {
    /// Create a sidebar environment polling every 30 s (notifications) and
    /// 60 s (events), counting events in the next 30 days in `offset`.
    #[must_use]
    pub fn new(
        notifications: Arc<dyn NotificationApi>,
        events: Arc<dyn EventApi>,
        participations: Arc<dyn ParticipationApi>,
        clock: Arc<dyn Clock>,
        offset: FixedOffset,
    ) -> Self {
        Self {
            notifications,
            events,
            participations,
            clock,
            offset,
            notifications_interval: Duration::from_secs(30),
            events_interval: Duration::from_secs(60),
            upcoming_window_days: 30,
        }
    }

    /// Override the polling intervals.
    #[must_use]
    pub const fn with_intervals(mut self, notifications: Duration, events: Duration) -> Self {
        self.notifications_interval = notifications;
        self.events_interval = events;
        self
    }

    /// Override the upcoming window.
    #[must_use]
    pub const fn with_window_days(mut self, days: u32) -> Self {
        self.upcoming_window_days = days;
        self
    }
}

impl SidebarEnvironment for ProductionSidebarEnvironment {
    fn notifications(&self) -> &dyn NotificationApi {
        self.notifications.as_ref()
    }

    fn events(&self) -> &dyn EventApi {
        self.events.as_ref()
    }

    fn participations(&self) -> &dyn ParticipationApi {
        self.participations.as_ref()
    }

    fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }

    fn notifications_interval(&self) -> Duration {
        self.notifications_interval
    }

    fn events_interval(&self) -> Duration {
        self.events_interval
    }

    fn upcoming_window_days(&self) -> u32 {
        self.upcoming_window_days
    }
}
