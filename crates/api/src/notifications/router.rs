//! Event-to-notification routing.
//!
//! [`NotificationRouter`] subscribes to the domain event bus and pushes each
//! event to WebSocket clients: events carrying a `user_id` go to that user's
//! connections, events without one (leaderboard changes) go to everyone.

use std::sync::Arc;

use axum::extract::ws::Message;
use devquest_events::bus::DomainEvent;
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Routes domain events to WebSocket clients.
pub struct NotificationRouter {
    ws_manager: Arc<WsManager>,
}

impl NotificationRouter {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the main routing loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](devquest_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.route_event(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    /// Deliver a single event: targeted when it names a user, broadcast
    /// otherwise. Delivery is fire-and-forget; a disconnected client simply
    /// misses the push and reconciles on its next fetch.
    async fn route_event(&self, event: &DomainEvent) {
        let msg = serde_json::json!({
            "type": event.event_type,
            "payload": event.payload,
            "timestamp": event.timestamp,
        });
        let ws_msg = Message::Text(msg.to_string().into());

        match event.user_id {
            Some(user_id) => {
                let delivered = self.ws_manager.send_to_user(user_id, ws_msg).await;
                tracing::debug!(
                    event_type = %event.event_type,
                    user_id,
                    delivered,
                    "Routed event to user connections"
                );
            }
            None => {
                self.ws_manager.broadcast(ws_msg).await;
                tracing::debug!(event_type = %event.event_type, "Broadcast event to all connections");
            }
        }
    }
}
