use std::env;
use crate::{Error, Result};
use crate::handshake::{HandshakeSecrets, HandshakeSecretsBuilder};

/// Environment variable names read by [`ServerConfig::from_env`]
pub const ENV_HOST: &str = "PLAYFAIR_HOST";
pub const ENV_PORT: &str = "PLAYFAIR_PORT";
pub const ENV_SHARED_KEY: &str = "PLAYFAIR_KEY";
pub const ENV_HMAC_KEY: &str = "PLAYFAIR_HMAC_KEY";
pub const ENV_USER_AGENT: &str = "PLAYFAIR_USER_AGENT";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind
    pub host: String,

    /// Port to bind
    pub port: u16,

    /// Handshake secrets
    pub secrets: HandshakeSecrets,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5100,
            secrets: HandshakeSecrets::default(),
        }
    }
}

impl ServerConfig {
    /// Create config builder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::new()
    }

    /// Load configuration from `PLAYFAIR_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = ServerConfigBuilder::new();

        if let Some(host) = lookup(ENV_HOST) {
            builder = builder.host(host);
        }

        if let Some(port) = lookup(ENV_PORT) {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| Error::config(format!("Invalid {} {:?}: {}", ENV_PORT, port, e)))?;
            builder = builder.port(port);
        }

        if let Some(key) = lookup(ENV_SHARED_KEY) {
            builder = builder.shared_key(key);
        }

        if let Some(key) = lookup(ENV_HMAC_KEY) {
            builder = builder.hmac_key(key);
        }

        if let Some(user_agent) = lookup(ENV_USER_AGENT) {
            builder = builder.user_agent(user_agent);
        }

        builder.build()
    }

    /// Socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(Error::config("Host must not be empty"));
        }

        if self.port == 0 {
            return Err(Error::config("Invalid port: 0"));
        }

        self.secrets.validate()
    }
}

/// Builder for ServerConfig
pub struct ServerConfigBuilder {
    host: String,
    port: u16,
    secrets: HandshakeSecretsBuilder,
}

impl ServerConfigBuilder {
    /// Create new builder
    pub fn new() -> Self {
        let defaults = ServerConfig::default();
        ServerConfigBuilder {
            host: defaults.host,
            port: defaults.port,
            secrets: HandshakeSecrets::builder(),
        }
    }

    /// Set host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set port
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set shared secret
    pub fn shared_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.secrets = self.secrets.shared_key(key);
        self
    }

    /// Set HMAC secret
    pub fn hmac_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.secrets = self.secrets.hmac_key(key);
        self
    }

    /// Set expected User-Agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.secrets = self.secrets.user_agent(user_agent);
        self
    }

    /// Build configuration
    pub fn build(self) -> Result<ServerConfig> {
        let config = ServerConfig {
            host: self.host,
            port: self.port,
            secrets: self.secrets.build()?,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for ServerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
