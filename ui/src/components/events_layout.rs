//! Shell of the signed-in area: sidebar, top bar and content slot
//!
//! The sidebar is embedded with [`scope`]; the layout only translates its
//! own buttons into sidebar actions.

use super::sidebar::{
    ProductionSidebarEnvironment, SidebarAction, SidebarReducer, SidebarState, SidebarView,
};
use campus_ui_core::composition::{ScopedReducer, scope};
use campus_ui_core::{Effect, Reducer, SmallVec};

/// Layout state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventsLayoutState {
    /// Embedded sidebar
    pub sidebar: SidebarState,
}

/// Layout actions
#[derive(Clone, Debug, PartialEq)]
pub enum EventsLayoutAction {
    /// Embedded sidebar
    Sidebar(SidebarAction),
    /// Top-bar hamburger pressed
    MenuButtonPressed,
    /// Route changed
    Navigated(String),
}

/// Layout dependencies
#[derive(Clone)]
pub struct EventsLayoutEnvironment {
    /// Sidebar dependencies
    pub sidebar: ProductionSidebarEnvironment,
    /// Days counted as upcoming, for the sidebar summary
    pub upcoming_window_days: u32,
}

fn sidebar_state(state: &mut EventsLayoutState) -> &mut SidebarState {
    &mut state.sidebar
}

fn extract_sidebar(action: EventsLayoutAction) -> Option<SidebarAction> {
    match action {
        EventsLayoutAction::Sidebar(action) => Some(action),
        _ => None,
    }
}

const fn sidebar_environment(env: &EventsLayoutEnvironment) -> &ProductionSidebarEnvironment {
    &env.sidebar
}

/// Layout reducer
pub struct EventsLayoutReducer {
    sidebar: ScopedReducer<
        EventsLayoutState,
        EventsLayoutAction,
        EventsLayoutEnvironment,
        SidebarReducer,
    >,
}

impl EventsLayoutReducer {
    /// Create the reducer
    #[must_use]
    pub fn new() -> Self {
        Self {
            sidebar: scope(
                SidebarReducer::new(),
                sidebar_state,
                extract_sidebar,
                EventsLayoutAction::Sidebar,
                sidebar_environment,
            ),
        }
    }
}

impl Default for EventsLayoutReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for EventsLayoutReducer {
    type State = EventsLayoutState;
    type Action = EventsLayoutAction;
    type Environment = EventsLayoutEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let forwarded = match action {
            EventsLayoutAction::Sidebar(action) => action,
            EventsLayoutAction::MenuButtonPressed => SidebarAction::Toggle,
            EventsLayoutAction::Navigated(path) => {
                tracing::debug!(%path, "Navigated");
                SidebarAction::Navigated(path)
            },
        };
        self.sidebar
            .reduce(state, EventsLayoutAction::Sidebar(forwarded), env)
    }
}

/// Render-ready layout
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventsLayoutView {
    /// Sidebar
    pub sidebar: SidebarView,
    /// Dim the content behind the open drawer
    pub show_backdrop: bool,
    /// Top-bar title, from the active link
    pub title: &'static str,
}

/// Render the layout
#[must_use]
pub fn view(state: &EventsLayoutState, env: &EventsLayoutEnvironment) -> EventsLayoutView {
    let sidebar = super::sidebar::view(&state.sidebar, env.upcoming_window_days);
    let title = sidebar
        .links
        .iter()
        .find(|link| link.active)
        .map_or("Campus Events", |link| link.label);

    EventsLayoutView {
        show_backdrop: sidebar.open,
        title,
        sidebar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::sidebar::NOTIFICATIONS_POLL;
    use campus_ui_testing::{MockApi, ReducerTest, assertions, test_clock};
    use std::sync::Arc;

    fn env() -> EventsLayoutEnvironment {
        let api = MockApi::new();
        EventsLayoutEnvironment {
            sidebar: ProductionSidebarEnvironment::new(
                Arc::new(api.clone()),
                Arc::new(api.clone()),
                Arc::new(api),
                Arc::new(test_clock()),
                crate::format::utc_offset(-180),
            ),
            upcoming_window_days: 30,
        }
    }

    #[test]
    fn test_menu_button_toggles_sidebar() {
        ReducerTest::new(EventsLayoutReducer::new())
            .with_env(env())
            .given_state(EventsLayoutState::default())
            .when_action(EventsLayoutAction::MenuButtonPressed)
            .then_state(|state| {
                assert!(state.sidebar.open);
                assert!(view(state, &env()).show_backdrop);
            })
            .run();
    }

    #[test]
    fn test_navigation_sets_title_and_closes_drawer() {
        ReducerTest::new(EventsLayoutReducer::new())
            .with_env(env())
            .given_state(EventsLayoutState::default())
            .when_actions(vec![
                EventsLayoutAction::MenuButtonPressed,
                EventsLayoutAction::Navigated("/tickets".to_string()),
            ])
            .then_state(|state| {
                let view = view(state, &env());
                assert!(!view.show_backdrop);
                assert_eq!(view.title, "Meus ingressos");
            })
            .run();
    }

    #[test]
    fn test_sidebar_effects_are_lifted() {
        ReducerTest::new(EventsLayoutReducer::new())
            .with_env(env())
            .given_state(EventsLayoutState::default())
            .when_action(EventsLayoutAction::Sidebar(SidebarAction::Appeared))
            .then_effects(|effects| assertions::assert_has_cancellable(effects, NOTIFICATIONS_POLL))
            .run();
    }
}
