mod utils;
mod handshake;
mod server;
mod client;

// Re-export commonly used types at crate root
pub use utils::*;
pub use handshake::*;

// Server exports
pub use server::{bind_server, HandshakeServer, ServerConfig, ServerConfigBuilder};

// Client exports
pub use client::{fetch_shared_key, HandshakeClient, ClientConfig, ClientConfigBuilder};
