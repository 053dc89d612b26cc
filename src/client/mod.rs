mod client;
mod config;

pub use client::HandshakeClient;
pub use config::{ClientConfig, ClientConfigBuilder};

use crate::Result;

/// One-shot helper: fetch the shared key from `url`
pub async fn fetch_shared_key(url: &str, user_agent: &str, hmac_key: &[u8]) -> Result<Vec<u8>> {
    let config = ClientConfig::builder()
        .url(url)
        .user_agent(user_agent)
        .hmac_key(hmac_key)
        .build()?;

    HandshakeClient::with_config(config)?.fetch_key().await
}
