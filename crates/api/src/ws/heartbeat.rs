//! Keepalive pings for live WebSocket connections.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::ws::manager::WsManager;

/// How often every connection is pinged.
const PING_INTERVAL: Duration = Duration::from_secs(30);

/// Spawn the keepalive loop.
///
/// Pings every registered connection on a fixed interval so intermediaries
/// keep idle sockets open. The loop never exits on its own; the caller
/// aborts the returned handle at shutdown.
pub fn start_heartbeat(manager: Arc<WsManager>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(run(manager, PING_INTERVAL))
}

async fn run(manager: Arc<WsManager>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let connections = manager.connection_count().await;
        if connections == 0 {
            continue;
        }
        tracing::debug!(connections, "pinging live WebSocket connections");
        manager.ping_all().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::ws::Message;

    #[tokio::test]
    async fn registered_connection_receives_pings() {
        let manager = Arc::new(WsManager::new());
        let mut rx = manager.add("conn-1".to_string(), Some(1)).await;

        let loop_handle = tokio::spawn(run(Arc::clone(&manager), Duration::from_millis(10)));

        let message = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("ping should arrive within the timeout")
            .expect("channel should stay open");
        assert!(matches!(message, Message::Ping(_)));

        loop_handle.abort();
    }
}
