//! Actions for the navigation sidebar.

use campus_api::ApiResult;
use campus_api::types::{Event, Participation, UnreadCount, User};

/// Sidebar actions
#[derive(Clone, Debug, PartialEq)]
pub enum SidebarAction {
    /// Sidebar mounted; starts both polling chains
    Appeared,

    /// Sidebar unmounted; stops both polling chains
    Disappeared,

    /// Signed-in user changed
    UserChanged(Option<User>),

    /// Fetch the unread-notification count
    PollNotifications,

    /// Unread count fetched
    UnreadCountLoaded(ApiResult<UnreadCount>),

    /// Fetch the user's upcoming events
    PollUpcomingEvents,

    /// Participations of `user_id` fetched
    ParticipationsLoaded {
        /// User the fetch was made for
        user_id: String,
        /// Participations or the failure
        result: ApiResult<Vec<Participation>>,
    },

    /// Events of those participations fetched (failures already skipped)
    UpcomingEventsLoaded {
        /// User the fetch was made for
        user_id: String,
        /// Fetched events
        events: Vec<Event>,
    },

    /// Hamburger button pressed
    Toggle,

    /// Backdrop pressed
    Close,

    /// A navigation link was followed
    Navigated(String),
}
