//! WebSocket chat relay server: gateway, lifecycle and transport.

pub mod gateway;
mod handler;
pub mod lifecycle;
mod runner;
mod signal;
pub mod state;

pub use runner::{WEBSOCKET_PATH, build_router, run, serve};
