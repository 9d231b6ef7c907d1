//! Broadcast chat relay library.
//!
//! Clients connect over WebSocket, join with a display name, and every
//! JOIN / CHAT / LEAVE event is fanned out to all joined connections on a
//! single public topic.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::run as run_server;
