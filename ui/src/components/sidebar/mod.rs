//! Navigation sidebar of the signed-in area
//!
//! While visible the sidebar polls two counters, each on its own
//! cancellable delay chain:
//!
//! ```text
//! Appeared ─┬─► PollNotifications ──► unread_count ──► UnreadCountLoaded
//!           │        └──── Delay(30 s) ──► PollNotifications ...
//!           │
//!           └─► PollUpcomingEvents ──► participations ──► ParticipationsLoaded
//!                    │                       └──► event_by_id × N ──► UpcomingEventsLoaded
//!                    └──── Delay(60 s) ──► PollUpcomingEvents ...
//! ```
//!
//! `Disappeared` cancels both chains. A 403 on the unread count shows 0.
//! Participation and event results carry the user they were fetched for
//! and are discarded once another user is signed in.

pub mod actions;
pub mod environment;
pub mod reducer;
pub mod types;

pub use actions::SidebarAction;
pub use environment::{ProductionSidebarEnvironment, SidebarEnvironment};
pub use reducer::{NOTIFICATIONS_POLL, SidebarReducer, UPCOMING_EVENTS_POLL, count_upcoming};
pub use types::{NavLink, SidebarState, SidebarView, view};
