use std::fmt;
use std::str::FromStr;
use crate::{Error, Result};
use crate::utils::{generate_nonce, NONCE_SIZE};

/// Length of the nonce on the wire (hex characters)
pub const NONCE_HEX_LEN: usize = NONCE_SIZE * 2;

/// Client-supplied 16-byte challenge
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nonce([u8; NONCE_SIZE]);

impl Nonce {
    pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        Nonce(bytes)
    }

    /// Create a random nonce (client side)
    pub fn random() -> Self {
        Nonce(generate_nonce())
    }

    /// Parse a nonce from exactly 32 hex digits, either case
    pub fn parse(hex_str: &str) -> Result<Self> {
        if hex_str.len() != NONCE_HEX_LEN {
            return Err(Error::handshake(format!(
                "Nonce has {} characters, expected {}",
                hex_str.len(),
                NONCE_HEX_LEN
            )));
        }

        let mut bytes = [0u8; NONCE_SIZE];
        hex::decode_to_slice(hex_str, &mut bytes)?;
        Ok(Nonce(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }

    /// Uppercase hex, as the native client sends it
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl FromStr for Nonce {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Nonce::parse(s)
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nonce({})", self.to_hex())
    }
}
