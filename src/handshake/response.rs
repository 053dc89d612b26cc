use crate::{Error, Result};
use crate::handshake::nonce::Nonce;
use crate::utils::{verify_hmac_sha256, xor_cyclic, DIGEST_SIZE};

/// Hex length of the trailing digest segment
pub const DIGEST_HEX_LEN: usize = DIGEST_SIZE * 2;

/// Server reply as seen by the native client: `<encoded key><digest>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeResponse {
    /// Shared key XORed with the nonce
    pub encoded_key: Vec<u8>,

    /// HMAC-SHA256 over the nonce
    pub digest: [u8; DIGEST_SIZE],
}

impl HandshakeResponse {
    /// Parse a response body
    pub fn parse(text: &str) -> Result<Self> {
        if text.len() <= DIGEST_HEX_LEN {
            return Err(Error::handshake(format!(
                "Response too short: {} characters",
                text.len()
            )));
        }

        if !text.is_ascii() {
            return Err(Error::handshake("Response is not ASCII"));
        }

        let (key_hex, digest_hex) = text.split_at(text.len() - DIGEST_HEX_LEN);

        let mut digest = [0u8; DIGEST_SIZE];
        hex::decode_to_slice(digest_hex, &mut digest)?;
        let encoded_key = hex::decode(key_hex)?;

        Ok(HandshakeResponse { encoded_key, digest })
    }

    /// Check the digest against our own HMAC of the nonce, in constant time
    pub fn verify(&self, nonce: &Nonce, hmac_key: &[u8]) -> Result<()> {
        verify_hmac_sha256(hmac_key, nonce.as_bytes(), &self.digest)
            .map_err(|_| Error::verification("Response digest does not match nonce"))
    }

    /// Verify the response and undo the XOR to get the shared key back
    pub fn recover_key(&self, nonce: &Nonce, hmac_key: &[u8]) -> Result<Vec<u8>> {
        self.verify(nonce, hmac_key)?;
        Ok(xor_cyclic(&self.encoded_key, nonce.as_bytes()))
    }

    /// Encode to the wire format, uppercase hex
    pub fn encode(&self) -> String {
        let mut text = String::with_capacity(self.encoded_key.len() * 2 + DIGEST_HEX_LEN);
        text.push_str(&hex::encode_upper(&self.encoded_key));
        text.push_str(&hex::encode_upper(self.digest));
        text
    }
}
