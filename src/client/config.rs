use std::time::Duration;
use url::Url;
use crate::{Error, Result};
use crate::handshake::{DEFAULT_HMAC_KEY, DEFAULT_USER_AGENT};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Handshake endpoint
    pub url: Url,

    /// User-Agent presented to the server
    pub user_agent: String,

    /// HMAC secret used to check the reply
    pub hmac_key: Vec<u8>,

    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            url: Url::parse("http://localhost:5100/").expect("static URL is valid"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            hmac_key: DEFAULT_HMAC_KEY.as_bytes().to_vec(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Create config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        match self.url.scheme() {
            "http" | "https" => {}
            scheme => return Err(Error::config(format!("Unsupported scheme: {}", scheme))),
        }

        if self.url.host_str().is_none() {
            return Err(Error::config("Missing host in URL"));
        }

        if self.user_agent.is_empty() {
            return Err(Error::config("User-Agent must not be empty"));
        }

        if self.hmac_key.is_empty() {
            return Err(Error::config("HMAC key must not be empty"));
        }

        if self.timeout.is_zero() {
            return Err(Error::config("Timeout must be non-zero"));
        }

        Ok(())
    }
}

/// Builder for ClientConfig
pub struct ClientConfigBuilder {
    config: ClientConfig,
    url: Option<String>,
}

impl ClientConfigBuilder {
    /// Create new builder
    pub fn new() -> Self {
        ClientConfigBuilder {
            config: ClientConfig::default(),
            url: None,
        }
    }

    /// Set endpoint URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set User-Agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set HMAC secret
    pub fn hmac_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.config.hmac_key = key.into();
        self
    }

    /// Set request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build configuration
    pub fn build(mut self) -> Result<ClientConfig> {
        if let Some(url) = self.url {
            self.config.url = Url::parse(&url)
                .map_err(|e| Error::config(format!("Invalid URL: {}", e)))?;
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
