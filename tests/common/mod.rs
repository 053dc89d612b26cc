// Common test utilities and helper functions
//
// Shared by the integration and property tests

#![allow(dead_code)]

use playfair::{HandshakeSecrets, HandshakeServer, RequestHeaders, ServerConfig, NONCE_HEADER, USER_AGENT_HEADER};
use std::sync::Arc;
use std::time::Duration;

/// User-Agent used by the custom test secrets
pub const TEST_USER_AGENT: &str = "playfair-test/1.0 (integration)";

/// Secrets that differ from the built-in defaults
pub fn test_secrets() -> HandshakeSecrets {
    HandshakeSecrets::builder()
        .shared_key("integration-key")
        .hmac_key("integration-hmac")
        .user_agent(TEST_USER_AGENT)
        .build()
        .expect("Failed to build test secrets")
}

/// Create a simple test server configuration for testing
pub fn test_server_config(port: u16) -> ServerConfig {
    ServerConfig::builder()
        .host("127.0.0.1")
        .port(port)
        .shared_key(test_secrets().shared_key())
        .hmac_key(test_secrets().hmac_key())
        .user_agent(TEST_USER_AGENT)
        .build()
        .expect("Failed to create test server config")
}

/// Start a server in the background and wait until it accepts connections
pub async fn start_server(port: u16) -> (Arc<HandshakeServer>, tokio::task::JoinHandle<playfair::Result<()>>) {
    let server = Arc::new(HandshakeServer::new(test_server_config(port)));

    let server_clone = server.clone();
    let handle = tokio::spawn(async move { server_clone.listen().await });

    assert!(wait_for_server(port, 50).await, "Server did not start on port {}", port);
    (server, handle)
}

/// Helper function to wait for server to start
pub async fn wait_for_server(port: u16, max_attempts: u32) -> bool {
    for _ in 0..max_attempts {
        if tokio::net::TcpStream::connect(format!("127.0.0.1:{}", port))
            .await
            .is_ok()
        {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    false
}

/// Build a header mapping with both handshake headers
pub fn handshake_headers(user_agent: &str, nonce: &str) -> RequestHeaders {
    [(USER_AGENT_HEADER, user_agent), (NONCE_HEADER, nonce)]
        .into_iter()
        .collect()
}
