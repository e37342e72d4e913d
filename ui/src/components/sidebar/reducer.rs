//! Reducer for the navigation sidebar.

use crate::components::sidebar::{
    ProductionSidebarEnvironment, SidebarAction, SidebarEnvironment, SidebarState,
};
use campus_api::types::{Event, ParticipationStatus};
use campus_ui_core::{Effect, EffectId, Reducer, SmallVec, smallvec};
use chrono::{DateTime, FixedOffset, NaiveTime, TimeDelta, TimeZone, Utc};
use std::collections::BTreeSet;

/// Cancellation key of the unread-count polling chain.
pub const NOTIFICATIONS_POLL: EffectId = EffectId::new("sidebar.notifications_poll");

/// Cancellation key of the upcoming-events polling chain.
pub const UPCOMING_EVENTS_POLL: EffectId = EffectId::new("sidebar.upcoming_events_poll");

/// Count events starting between the start of today (in `offset`) and
/// `window_days` days later, both ends inclusive.
#[must_use]
pub fn count_upcoming(
    events: &[Event],
    now: DateTime<Utc>,
    offset: FixedOffset,
    window_days: u32,
) -> usize {
    let midnight = now
        .with_timezone(&offset)
        .date_naive()
        .and_time(NaiveTime::MIN);
    let today = offset
        .from_local_datetime(&midnight)
        .single()
        .map_or(now, |start| start.with_timezone(&Utc));
    let until = today + TimeDelta::days(i64::from(window_days));

    events
        .iter()
        .filter(|event| event.start_date >= today && event.start_date <= until)
        .count()
}

/// Reducer owning both polling chains and the drawer state.
pub struct SidebarReducer;

impl SidebarReducer {
    /// Create a new sidebar reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn is_current_user(state: &SidebarState, user_id: &str) -> bool {
        state.user.as_ref().is_some_and(|user| user.id == user_id)
    }
}

impl Default for SidebarReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for SidebarReducer {
    type State = SidebarState;
    type Action = SidebarAction;
    type Environment = ProductionSidebarEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SidebarAction::Appeared => {
                if state.polling {
                    return SmallVec::new();
                }
                state.polling = true;
                tracing::debug!("Sidebar polling started");

                let mut effects = self.reduce(state, SidebarAction::PollNotifications, env);
                effects.extend(self.reduce(state, SidebarAction::PollUpcomingEvents, env));
                effects
            },

            SidebarAction::Disappeared => {
                state.polling = false;
                tracing::debug!("Sidebar polling stopped");
                smallvec![
                    Effect::Cancel(NOTIFICATIONS_POLL),
                    Effect::Cancel(UPCOMING_EVENTS_POLL),
                ]
            },

            SidebarAction::UserChanged(user) => {
                let changed = state.user.as_ref().map(|u| &u.id) != user.as_ref().map(|u| &u.id);
                state.user = user;
                if changed {
                    state.upcoming_events = 0;
                    if state.polling {
                        // Restart the chain so only one stays scheduled
                        let mut effects: SmallVec<[Effect<SidebarAction>; 4]> =
                            smallvec![Effect::Cancel(UPCOMING_EVENTS_POLL)];
                        effects.extend(self.reduce(state, SidebarAction::PollUpcomingEvents, env));
                        return effects;
                    }
                }
                SmallVec::new()
            },

            SidebarAction::PollNotifications => {
                if !state.polling {
                    return SmallVec::new();
                }
                let fetch = env.notifications().unread_count();

                smallvec![
                    Effect::merge(vec![
                        Effect::future(async move {
                            Some(SidebarAction::UnreadCountLoaded(fetch.await))
                        }),
                        Effect::Delay {
                            duration: env.notifications_interval(),
                            action: Box::new(SidebarAction::PollNotifications),
                        },
                    ])
                    .cancellable(NOTIFICATIONS_POLL)
                ]
            },

            SidebarAction::UnreadCountLoaded(result) => {
                match result {
                    Ok(unread) => state.unread_count = unread.count,
                    Err(error) if error.is_forbidden() => {
                        tracing::debug!("Unread count forbidden, showing 0");
                        state.unread_count = 0;
                    },
                    Err(error) => tracing::warn!(%error, "Failed to load unread count"),
                }
                SmallVec::new()
            },

            SidebarAction::PollUpcomingEvents => {
                if !state.polling {
                    return SmallVec::new();
                }
                let delay = Effect::Delay {
                    duration: env.events_interval(),
                    action: Box::new(SidebarAction::PollUpcomingEvents),
                };

                let Some(user) = &state.user else {
                    return smallvec![delay.cancellable(UPCOMING_EVENTS_POLL)];
                };
                let fetch = env.participations().participations_by_user(&user.id);
                let user_id = user.id.clone();

                smallvec![
                    Effect::merge(vec![
                        Effect::future(async move {
                            Some(SidebarAction::ParticipationsLoaded {
                                user_id,
                                result: fetch.await,
                            })
                        }),
                        delay,
                    ])
                    .cancellable(UPCOMING_EVENTS_POLL)
                ]
            },

            SidebarAction::ParticipationsLoaded { user_id, result } => {
                if !Self::is_current_user(state, &user_id) {
                    tracing::debug!(%user_id, "Discarding participations of a previous user");
                    return SmallVec::new();
                }
                let participations = match result {
                    Ok(participations) => participations,
                    Err(error) => {
                        tracing::warn!(%error, "Failed to load participations");
                        return SmallVec::new();
                    },
                };

                let event_ids: BTreeSet<String> = participations
                    .into_iter()
                    .filter(|p| p.status != ParticipationStatus::Cancelled)
                    .map(|p| p.event_id)
                    .collect();

                let fetches: Vec<_> = event_ids
                    .iter()
                    .map(|id| env.events().event_by_id(id))
                    .collect();

                smallvec![
                    Effect::future(async move {
                        let mut events = Vec::with_capacity(fetches.len());
                        for result in futures::future::join_all(fetches).await {
                            match result {
                                Ok(event) => events.push(event),
                                Err(error) => {
                                    tracing::debug!(%error, "Skipping event that failed to load");
                                },
                            }
                        }
                        Some(SidebarAction::UpcomingEventsLoaded { user_id, events })
                    })
                    .cancellable(UPCOMING_EVENTS_POLL)
                ]
            },

            SidebarAction::UpcomingEventsLoaded { user_id, events } => {
                if !Self::is_current_user(state, &user_id) {
                    tracing::debug!(%user_id, "Discarding events of a previous user");
                    return SmallVec::new();
                }
                state.upcoming_events = count_upcoming(
                    &events,
                    env.clock().now(),
                    env.offset(),
                    env.upcoming_window_days(),
                );
                SmallVec::new()
            },

            SidebarAction::Toggle => {
                state.open = !state.open;
                SmallVec::new()
            },

            SidebarAction::Close => {
                state.open = false;
                SmallVec::new()
            },

            SidebarAction::Navigated(path) => {
                state.active_path = path;
                state.open = false;
                SmallVec::new()
            },
        }
    }
}
