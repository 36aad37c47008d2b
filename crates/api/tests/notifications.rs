//! Integration tests for the event-to-WebSocket notification path.
//!
//! Wires a real `EventBus` into a `NotificationRouter` backed by a
//! `WsManager` with fake connections, then publishes domain events and
//! asserts on what each connection receives. No database involved.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::Message;
use devquest_api::notifications::NotificationRouter;
use devquest_api::ws::WsManager;
use devquest_events::bus::DomainEvent;
use devquest_events::{types as event_types, EventBus};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

async fn recv_json(
    rx: &mut tokio::sync::mpsc::UnboundedReceiver<Message>,
) -> serde_json::Value {
    let msg = tokio::time::timeout(RECV_TIMEOUT, rx.recv())
        .await
        .expect("timed out waiting for WebSocket message")
        .expect("channel closed before a message arrived");
    match msg {
        Message::Text(text) => serde_json::from_str(&text).expect("message should be JSON"),
        other => panic!("expected Text frame, got: {other:?}"),
    }
}

#[tokio::test]
async fn targeted_event_reaches_only_its_user() {
    let ws_manager = Arc::new(WsManager::new());
    let bus = EventBus::default();

    let mut rx_owner = ws_manager.add("conn-owner".to_string(), Some(1)).await;
    let rx_other = ws_manager.add("conn-other".to_string(), Some(2)).await;

    let router = NotificationRouter::new(Arc::clone(&ws_manager));
    let handle = tokio::spawn(router.run(bus.subscribe()));

    bus.publish(
        DomainEvent::new(event_types::TASK_COMPLETED)
            .for_user(1)
            .with_payload(serde_json::json!({ "xp_awarded": 50 })),
    );

    let received = recv_json(&mut rx_owner).await;
    assert_eq!(received["type"], "task.completed");
    assert_eq!(received["payload"]["xp_awarded"], 50);

    // The other user's connection stays silent. Shut the router down and
    // drain: dropping the bus closes the loop, dropping the manager closes
    // the channels.
    drop(bus);
    let _ = tokio::time::timeout(RECV_TIMEOUT, handle).await;
    drop(ws_manager);
    let mut rx_other = rx_other;
    assert!(
        rx_other.recv().await.is_none(),
        "user 2 must not see user 1's completion"
    );
}

#[tokio::test]
async fn broadcast_event_reaches_every_connection() {
    let ws_manager = Arc::new(WsManager::new());
    let bus = EventBus::default();

    let mut rx_user = ws_manager.add("conn-user".to_string(), Some(1)).await;
    let mut rx_anon = ws_manager.add("conn-anon".to_string(), None).await;

    let router = NotificationRouter::new(Arc::clone(&ws_manager));
    let _handle = tokio::spawn(router.run(bus.subscribe()));

    bus.publish(
        DomainEvent::new(event_types::LEADERBOARD_UPDATED)
            .with_payload(serde_json::json!({ "user_id": 1, "xp": 510 })),
    );

    let seen_by_user = recv_json(&mut rx_user).await;
    let seen_by_anon = recv_json(&mut rx_anon).await;

    assert_eq!(seen_by_user["type"], "leaderboard.updated");
    assert_eq!(seen_by_anon["type"], "leaderboard.updated");
    assert_eq!(seen_by_anon["payload"]["xp"], 510);
}

#[tokio::test]
async fn router_shuts_down_when_bus_is_dropped() {
    let ws_manager = Arc::new(WsManager::new());
    let bus = EventBus::default();

    let router = NotificationRouter::new(Arc::clone(&ws_manager));
    let handle = tokio::spawn(router.run(bus.subscribe()));

    drop(bus);

    tokio::time::timeout(RECV_TIMEOUT, handle)
        .await
        .expect("router should exit once the bus closes")
        .expect("router task should not panic");
}
