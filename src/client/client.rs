use std::sync::Arc;
use log::debug;
use reqwest::header::USER_AGENT;
use crate::{Error, Result};
use crate::client::config::ClientConfig;
use crate::handshake::{verify_response, Nonce, NONCE_HEADER};

/// Native-client side of the handshake
pub struct HandshakeClient {
    /// Client configuration
    config: Arc<ClientConfig>,

    /// Reused HTTP connection pool
    http: reqwest::Client,
}

impl HandshakeClient {
    /// Create client with default config
    pub fn new() -> Result<Self> {
        HandshakeClient::with_config(ClientConfig::default())
    }

    /// Create client with config
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(HandshakeClient {
            config: Arc::new(config),
            http,
        })
    }

    /// Get client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run one handshake with a fresh random nonce and return the shared key
    pub async fn fetch_key(&self) -> Result<Vec<u8>> {
        self.fetch_key_with_nonce(&Nonce::random()).await
    }

    /// Run one handshake with the given nonce and return the shared key
    pub async fn fetch_key_with_nonce(&self, nonce: &Nonce) -> Result<Vec<u8>> {
        let body = self.request(nonce).await?;
        verify_response(&body, nonce, &self.config.hmac_key)
    }

    /// Send the handshake request and return the raw body
    pub async fn request(&self, nonce: &Nonce) -> Result<String> {
        debug!("Handshake request to {}", self.config.url);

        let response = self
            .http
            .get(self.config.url.clone())
            .header(USER_AGENT, &self.config.user_agent)
            .header(NONCE_HEADER, nonce.to_hex())
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        if body.is_empty() {
            return Err(Error::handshake("Empty response"));
        }

        Ok(body)
    }
}
