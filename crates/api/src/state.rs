use std::sync::Arc;

use crate::config::ServerConfig;
use crate::progression::ProgressionEngine;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: devquest_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Centralized event bus carrying domain events to the notification router.
    pub event_bus: Arc<devquest_events::EventBus>,
    /// Progression engine: completions, rewards, streaks, achievements.
    pub progression: Arc<ProgressionEngine>,
    /// Client for AI challenge / learning-resource generation.
    pub ai_client: Arc<devquest_ai::AiClient>,
}
