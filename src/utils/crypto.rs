use hmac::{Hmac, KeyInit, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use crate::Result;

/// Nonce length in raw bytes
pub const NONCE_SIZE: usize = 16;

/// HMAC-SHA256 digest length in raw bytes
pub const DIGEST_SIZE: usize = 32;

type HmacSha256 = Hmac<Sha256>;

/// Generate a fresh random nonce
pub fn generate_nonce() -> [u8; NONCE_SIZE] {
    let mut bytes = [0u8; NONCE_SIZE];
    rand::fill(&mut bytes[..]);
    bytes
}

/// Calculate HMAC-SHA256
pub fn calculate_hmac_sha256(key: &[u8], data: &[u8]) -> Result<[u8; DIGEST_SIZE]> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| crate::Error::handshake(format!("Invalid HMAC key: {}", e)))?;
    mac.update(data);

    let mut output = [0u8; DIGEST_SIZE];
    output.copy_from_slice(&mac.finalize().into_bytes());
    Ok(output)
}

/// Verify an HMAC-SHA256 tag in constant time
pub fn verify_hmac_sha256(key: &[u8], data: &[u8], tag: &[u8]) -> Result<()> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| crate::Error::handshake(format!("Invalid HMAC key: {}", e)))?;
    mac.update(data);
    mac.verify_slice(tag)?;
    Ok(())
}

/// XOR `data` against `key`, repeating `key` as needed.
///
/// The output has the length of `data`. An empty `key` leaves `data` as is.
pub fn xor_cyclic(data: &[u8], key: &[u8]) -> Vec<u8> {
    if key.is_empty() {
        return data.to_vec();
    }

    data.iter()
        .enumerate()
        .map(|(i, &byte)| byte ^ key[i % key.len()])
        .collect()
}

/// Byte equality that does not short-circuit on the first difference
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonce_length() {
        let nonce = generate_nonce();
        assert_eq!(nonce.len(), NONCE_SIZE);
    }

    #[test]
    fn test_nonce_uniqueness() {
        let nonce1 = generate_nonce();
        let nonce2 = generate_nonce();
        // Very unlikely to be equal
        assert_ne!(nonce1, nonce2);
    }

    #[test]
    fn test_hmac_sha256() {
        let key = b"key";
        let data = b"The quick brown fox jumps over the lazy dog";
        let hmac = calculate_hmac_sha256(key, data).unwrap();

        // Known test vector
        let expected = [
            0xf7, 0xbc, 0x83, 0xf4, 0x30, 0x53, 0x84, 0x24,
            0xb1, 0x32, 0x98, 0xe6, 0xaa, 0x6f, 0xb1, 0x43,
            0xef, 0x4d, 0x59, 0xa1, 0x49, 0x46, 0x17, 0x59,
            0x97, 0x47, 0x9d, 0xbc, 0x2d, 0x1a, 0x3c, 0xd8
        ];

        assert_eq!(hmac, expected);
    }

    #[test]
    fn test_verify_hmac_sha256() {
        let tag = calculate_hmac_sha256(b"FAIR", &[0u8; 16]).unwrap();
        assert!(verify_hmac_sha256(b"FAIR", &[0u8; 16], &tag).is_ok());
        assert!(verify_hmac_sha256(b"fair", &[0u8; 16], &tag).is_err());
        assert!(verify_hmac_sha256(b"FAIR", &[0u8; 16], &tag[..31]).is_err());
    }

    #[test]
    fn test_xor_cyclic() {
        assert_eq!(xor_cyclic(b"fair", &[0u8; 16]), b"fair".to_vec());
        assert_eq!(xor_cyclic(&[0xff, 0x0f, 0xf0], &[0x0f]), vec![0xf0, 0x00, 0xff]);

        // Key shorter than data wraps around
        assert_eq!(xor_cyclic(&[1, 2, 3, 4, 5], &[1, 2]), vec![0, 0, 2, 6, 4]);

        // Applying twice restores the input
        let nonce = [0x5a; 16];
        assert_eq!(xor_cyclic(&xor_cyclic(b"secret", &nonce), &nonce), b"secret".to_vec());
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"agent", b"agent"));
        assert!(!constant_time_eq(b"agent", b"Agent"));
        assert!(!constant_time_eq(b"agent", b"agent "));
        assert!(!constant_time_eq(b"", b"a"));
    }
}
