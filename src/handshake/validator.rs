use log::{debug, warn};
use thiserror::Error;
use crate::handshake::headers::{RequestHeaders, NONCE_HEADER, USER_AGENT_HEADER};
use crate::handshake::nonce::Nonce;
use crate::handshake::response::HandshakeResponse;
use crate::handshake::secrets::HandshakeSecrets;
use crate::utils::{calculate_hmac_sha256, constant_time_eq, xor_cyclic};

/// Result of evaluating one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Handshake accepted; carries the response body
    Accepted(String),

    /// Handshake rejected, cause deliberately withheld
    Rejected,
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    pub fn into_response(self) -> Option<String> {
        match self {
            Outcome::Accepted(body) => Some(body),
            Outcome::Rejected => None,
        }
    }
}

/// Why a request was rejected. Logged only, never sent to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("missing header: {0}")]
    MissingHeader(&'static str),

    #[error("client identity mismatch")]
    IdentityMismatch,

    #[error("malformed nonce: {0}")]
    MalformedNonce(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Stateless challenge-response validator.
///
/// Holds only the immutable secrets, so one instance can be shared across
/// any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct HandshakeValidator {
    secrets: HandshakeSecrets,
}

impl HandshakeValidator {
    pub fn new(secrets: HandshakeSecrets) -> Self {
        HandshakeValidator { secrets }
    }

    pub fn secrets(&self) -> &HandshakeSecrets {
        &self.secrets
    }

    /// Length of every accepted response body
    pub fn response_len(&self) -> usize {
        self.secrets.shared_key().len() * 2 + 64
    }

    /// Validate request headers, collapsing every failure into `Rejected`
    pub fn validate(&self, headers: &RequestHeaders) -> Outcome {
        match self.evaluate(headers) {
            Ok(response) => Outcome::Accepted(response),
            Err(RejectReason::Internal(e)) => {
                warn!("Handshake internal error: {}", e);
                Outcome::Rejected
            }
            Err(reason) => {
                debug!("Handshake rejected: {}", reason);
                Outcome::Rejected
            }
        }
    }

    /// Validate request headers, keeping the rejection cause.
    ///
    /// Use for diagnostics only; callers facing the network must go through
    /// [`HandshakeValidator::validate`].
    pub fn evaluate(&self, headers: &RequestHeaders) -> Result<String, RejectReason> {
        let user_agent = headers
            .get(USER_AGENT_HEADER)
            .ok_or(RejectReason::MissingHeader(USER_AGENT_HEADER))?;
        let nonce = headers
            .get(NONCE_HEADER)
            .ok_or(RejectReason::MissingHeader(NONCE_HEADER))?;

        if !constant_time_eq(user_agent.as_bytes(), self.secrets.user_agent().as_bytes()) {
            return Err(RejectReason::IdentityMismatch);
        }

        let nonce = Nonce::parse(nonce)
            .map_err(|e| RejectReason::MalformedNonce(e.to_string()))?;

        self.respond(&nonce)
            .map_err(|e| RejectReason::Internal(e.to_string()))
    }

    /// Compute `HEX(K xor N) || HEX(HMAC-SHA256(H, N))`
    pub fn respond(&self, nonce: &Nonce) -> crate::Result<String> {
        let response = HandshakeResponse {
            encoded_key: xor_cyclic(self.secrets.shared_key(), nonce.as_bytes()),
            digest: calculate_hmac_sha256(self.secrets.hmac_key(), nonce.as_bytes())?,
        };
        Ok(response.encode())
    }
}
