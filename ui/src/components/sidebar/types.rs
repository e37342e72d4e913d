//! State and view model of the navigation sidebar.

use campus_api::types::{User, UserRole};

/// Sidebar state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SidebarState {
    /// Drawer open (mobile)
    pub open: bool,
    /// Polling chains running
    pub polling: bool,
    /// Unread notifications
    pub unread_count: u64,
    /// Registered events starting inside the upcoming window
    pub upcoming_events: usize,
    /// Signed-in user
    pub user: Option<User>,
    /// Current route
    pub active_path: String,
}

/// One navigation entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    /// Link text
    pub label: &'static str,
    /// Route
    pub path: &'static str,
    /// Counter bubble
    pub badge: Option<u64>,
    /// Current route is this link or below it
    pub active: bool,
}

/// Render-ready sidebar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarView {
    /// Drawer open
    pub open: bool,
    /// Signed-in user name
    pub user_name: Option<String>,
    /// Role shown under the name
    pub role_label: Option<&'static str>,
    /// Navigation entries in display order
    pub links: Vec<NavLink>,
    /// Upcoming events summary
    pub upcoming_label: String,
}

const PARTICIPANT_LINKS: [(&str, &str); 5] = [
    ("Eventos", "/events"),
    ("Meus pedidos", "/orders"),
    ("Meus ingressos", "/tickets"),
    ("Conquistas", "/achievements"),
    ("Notificações", "/notifications"),
];

const STAFF_LINKS: [(&str, &str); 2] = [
    ("Validar pagamentos", "/admin/payments"),
    ("Check-in", "/admin/checkin"),
];

const fn role_label(role: UserRole) -> &'static str {
    match role {
        UserRole::Participant => "Participante",
        UserRole::Organizer => "Organizador",
        UserRole::Admin => "Administrador",
    }
}

fn is_active(active_path: &str, path: &str) -> bool {
    active_path == path
        || active_path
            .strip_prefix(path)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Render the sidebar.
#[must_use]
pub fn view(state: &SidebarState, window_days: u32) -> SidebarView {
    let staff = state.user.as_ref().is_some_and(|user| user.role.is_staff());

    let links = PARTICIPANT_LINKS
        .iter()
        .chain(STAFF_LINKS.iter().filter(|_| staff))
        .map(|&(label, path)| NavLink {
            label,
            path,
            badge: (path == "/notifications" && state.unread_count > 0)
                .then_some(state.unread_count),
            active: is_active(&state.active_path, path),
        })
        .collect();

    let upcoming_label = match state.upcoming_events {
        0 => format!("Nenhum evento nos próximos {window_days} dias"),
        1 => format!("1 evento nos próximos {window_days} dias"),
        n => format!("{n} eventos nos próximos {window_days} dias"),
    };

    SidebarView {
        open: state.open,
        user_name: state.user.as_ref().map(|user| user.name.clone()),
        role_label: state.user.as_ref().map(|user| role_label(user.role)),
        links,
        upcoming_label,
    }
}
