//! WebSocket support: connection management, upgrade handling, heartbeat.

pub mod handler;
pub mod heartbeat;
pub mod manager;

pub use manager::WsManager;
