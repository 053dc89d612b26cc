use std::fmt;
use crate::{Error, Result};

/// Shared secret the reference native client ships with
pub const DEFAULT_SHARED_KEY: &str = "fair";

/// HMAC secret the reference native client ships with
pub const DEFAULT_HMAC_KEY: &str = "FAIR";

/// User-Agent the reference native client sends
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows; Windows NT 6.2;) AppleWebKit/601.34 (KHTML, like Gecko) Chrome/52.0.2897.196 Safari/535.0 Edge/13.33431";

/// Process-wide handshake material.
///
/// Built once at startup and never mutated. Both secrets must match what the
/// native client embeds.
#[derive(Clone, PartialEq, Eq)]
pub struct HandshakeSecrets {
    shared_key: Vec<u8>,
    hmac_key: Vec<u8>,
    user_agent: String,
}

impl HandshakeSecrets {
    /// Create and validate secrets
    pub fn new(
        shared_key: impl Into<Vec<u8>>,
        hmac_key: impl Into<Vec<u8>>,
        user_agent: impl Into<String>,
    ) -> Result<Self> {
        let secrets = HandshakeSecrets {
            shared_key: shared_key.into(),
            hmac_key: hmac_key.into(),
            user_agent: user_agent.into(),
        };
        secrets.validate()?;
        Ok(secrets)
    }

    /// Create secrets builder
    pub fn builder() -> HandshakeSecretsBuilder {
        HandshakeSecretsBuilder::new()
    }

    /// Shared secret `K`
    pub fn shared_key(&self) -> &[u8] {
        &self.shared_key
    }

    /// HMAC secret `H`
    pub fn hmac_key(&self) -> &[u8] {
        &self.hmac_key
    }

    /// Expected User-Agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Whether these are the publicly known defaults
    pub fn is_default(&self) -> bool {
        *self == HandshakeSecrets::default()
    }

    /// Validate secrets
    pub fn validate(&self) -> Result<()> {
        if self.shared_key.is_empty() {
            return Err(Error::config("Shared key must not be empty"));
        }

        if self.hmac_key.is_empty() {
            return Err(Error::config("HMAC key must not be empty"));
        }

        if self.user_agent.is_empty() {
            return Err(Error::config("User-Agent must not be empty"));
        }

        // HTTP parsers strip surrounding whitespace and reject control bytes,
        // so such a value could never match an incoming header
        if self.user_agent.trim() != self.user_agent {
            return Err(Error::config("User-Agent must not have leading or trailing whitespace"));
        }

        if !self.user_agent.bytes().all(|b| (0x20..0x7f).contains(&b)) {
            return Err(Error::config("User-Agent must be printable ASCII"));
        }

        Ok(())
    }
}

impl Default for HandshakeSecrets {
    fn default() -> Self {
        HandshakeSecrets {
            shared_key: DEFAULT_SHARED_KEY.as_bytes().to_vec(),
            hmac_key: DEFAULT_HMAC_KEY.as_bytes().to_vec(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl fmt::Debug for HandshakeSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandshakeSecrets")
            .field("shared_key", &format_args!("<{} bytes>", self.shared_key.len()))
            .field("hmac_key", &format_args!("<{} bytes>", self.hmac_key.len()))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Builder for HandshakeSecrets
pub struct HandshakeSecretsBuilder {
    secrets: HandshakeSecrets,
}

impl HandshakeSecretsBuilder {
    /// Create new builder seeded with the defaults
    pub fn new() -> Self {
        HandshakeSecretsBuilder {
            secrets: HandshakeSecrets::default(),
        }
    }

    /// Set shared secret
    pub fn shared_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.secrets.shared_key = key.into();
        self
    }

    /// Set HMAC secret
    pub fn hmac_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.secrets.hmac_key = key.into();
        self
    }

    /// Set expected User-Agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.secrets.user_agent = user_agent.into();
        self
    }

    /// Build secrets
    pub fn build(self) -> Result<HandshakeSecrets> {
        self.secrets.validate()?;
        Ok(self.secrets)
    }
}

impl Default for HandshakeSecretsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let secrets = HandshakeSecrets::default();
        assert!(secrets.validate().is_ok());
        assert!(secrets.is_default());
        assert_eq!(secrets.shared_key(), b"fair");
        assert_eq!(secrets.hmac_key(), b"FAIR");
    }

    #[test]
    fn test_builder_overrides() {
        let secrets = HandshakeSecrets::builder()
            .shared_key("k3y!")
            .hmac_key(vec![1, 2, 3])
            .user_agent("agent/1.0")
            .build()
            .unwrap();

        assert_eq!(secrets.shared_key(), b"k3y!");
        assert_eq!(secrets.hmac_key(), &[1, 2, 3]);
        assert_eq!(secrets.user_agent(), "agent/1.0");
        assert!(!secrets.is_default());
    }

    #[test]
    fn test_validation() {
        assert!(HandshakeSecrets::new("", "FAIR", "agent").is_err());
        assert!(HandshakeSecrets::new("fair", "", "agent").is_err());
        assert!(HandshakeSecrets::new("fair", "FAIR", "").is_err());
        assert!(HandshakeSecrets::new("fair", "FAIR", " agent").is_err());
        assert!(HandshakeSecrets::new("fair", "FAIR", "agent\n").is_err());
        assert!(HandshakeSecrets::new("fair", "FAIR", "agënt").is_err());
        assert!(HandshakeSecrets::new("fair", "FAIR", "agent (x; y)").is_ok());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let secrets = HandshakeSecrets::new("topsecret", "hmacsecret", "agent").unwrap();
        let debug = format!("{:?}", secrets);
        assert!(!debug.contains("topsecret"));
        assert!(!debug.contains("hmacsecret"));
        assert!(debug.contains("<9 bytes>"));
        assert!(debug.contains("agent"));
    }
}
