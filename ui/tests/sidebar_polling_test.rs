//! Sidebar polling under a live `Store` with paused time

#![allow(clippy::unwrap_used)] // Test code can use unwrap

use campus_api::ApiError;
use campus_api::types::{User, UserRole};
use campus_ui::components::sidebar::{
    ProductionSidebarEnvironment, SidebarAction, SidebarReducer, SidebarState,
};
use campus_ui::format::utc_offset;
use campus_ui_runtime::Store;
use campus_ui_testing::{ApiCall, MockApi, fixtures, test_clock, test_time};
use chrono::TimeDelta;
use std::sync::Arc;
use std::time::Duration;

fn participant() -> User {
    User {
        id: "usr-1".to_string(),
        name: "Ana Souza".to_string(),
        email: "ana@campus.dev".to_string(),
        role: UserRole::Participant,
        avatar_url: None,
        created_at: None,
    }
}

fn sidebar_store(
    api: &MockApi,
    state: SidebarState,
) -> Store<SidebarState, SidebarAction, ProductionSidebarEnvironment, SidebarReducer> {
    let env = ProductionSidebarEnvironment::new(
        Arc::new(api.clone()),
        Arc::new(api.clone()),
        Arc::new(api.clone()),
        Arc::new(test_clock()),
        utc_offset(-180),
    )
    .with_intervals(Duration::from_secs(30), Duration::from_secs(60));
    Store::new(state, SidebarReducer::new(), env)
}

fn count(api: &MockApi, predicate: impl Fn(&ApiCall) -> bool) -> usize {
    api.call_count(predicate)
}

#[tokio::test(start_paused = true)]
async fn test_polls_on_each_interval_until_disappeared() {
    let api = MockApi::new();
    api.respond_unread_count(Err(ApiError::Forbidden));
    api.respond_participations(Ok(vec![fixtures::participation("usr-1", "evt-1")]));
    api.add_event(fixtures::event("evt-1", test_time() + TimeDelta::days(2)));

    let store = sidebar_store(
        &api,
        SidebarState {
            user: Some(participant()),
            unread_count: 5,
            ..SidebarState::default()
        },
    );

    store.send(SidebarAction::Appeared).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    store
        .state(|state| {
            assert!(state.polling);
            assert_eq!(state.unread_count, 0);
            assert_eq!(state.upcoming_events, 1);
        })
        .await;
    assert_eq!(count(&api, |call| *call == ApiCall::UnreadCount), 1);
    assert_eq!(
        count(&api, |call| matches!(call, ApiCall::ParticipationsByUser(_))),
        1
    );

    tokio::time::sleep(Duration::from_secs(31)).await;
    assert_eq!(count(&api, |call| *call == ApiCall::UnreadCount), 2);
    assert_eq!(
        count(&api, |call| matches!(call, ApiCall::ParticipationsByUser(_))),
        1
    );

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(count(&api, |call| *call == ApiCall::UnreadCount), 3);
    assert_eq!(
        count(&api, |call| matches!(call, ApiCall::ParticipationsByUser(_))),
        2
    );

    store.send(SidebarAction::Disappeared).await.unwrap();
    let calls = api.calls().len();
    tokio::time::sleep(Duration::from_secs(300)).await;

    assert_eq!(api.calls().len(), calls);
    store.unmount();
}

#[tokio::test(start_paused = true)]
async fn test_unmount_stops_polling() {
    let api = MockApi::new();
    let store = sidebar_store(&api, SidebarState::default());

    store.send(SidebarAction::Appeared).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    store.unmount();
    let calls = api.calls().len();

    tokio::time::sleep(Duration::from_secs(300)).await;

    assert!(!store.is_mounted());
    assert_eq!(api.calls().len(), calls);
}

#[tokio::test(start_paused = true)]
async fn test_user_change_keeps_a_single_chain() {
    let api = MockApi::new();
    api.respond_participations(Ok(Vec::new()));
    let store = sidebar_store(
        &api,
        SidebarState {
            user: Some(participant()),
            ..SidebarState::default()
        },
    );

    store.send(SidebarAction::Appeared).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    store
        .send(SidebarAction::UserChanged(Some(User {
            id: "usr-2".to_string(),
            ..participant()
        })))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    tokio::time::sleep(Duration::from_secs(61)).await;

    // Initial poll, re-poll on user change, then exactly one scheduled poll
    assert_eq!(
        count(&api, |call| matches!(call, ApiCall::ParticipationsByUser(_))),
        3
    );
    store.unmount();
}
