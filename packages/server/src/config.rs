//! Server configuration parsed from the command line.

use clap::Parser;

use crate::domain::DEFAULT_OUTBOUND_CAPACITY;

/// Broadcast chat relay over WebSocket.
#[derive(Debug, Clone, Parser)]
#[command(name = "plaza-server", version, about)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind (0 picks a free port)
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Frames buffered per connection before a slow client is dropped
    #[arg(long, default_value_t = DEFAULT_OUTBOUND_CAPACITY)]
    pub outbound_capacity: usize,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            outbound_capacity: DEFAULT_OUTBOUND_CAPACITY,
            log_level: "info".to_string(),
        }
    }
}
