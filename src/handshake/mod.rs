mod secrets;
mod headers;
mod nonce;
mod validator;
mod response;

pub use secrets::*;
pub use headers::*;
pub use nonce::*;
pub use validator::*;
pub use response::*;

use crate::Result;

/// Run the validator on a header map
pub fn validate_headers(validator: &HandshakeValidator, headers: &axum::http::HeaderMap) -> Outcome {
    validator.validate(&RequestHeaders::from(headers))
}

/// Client-side check of a server reply; returns the shared key
pub fn verify_response(body: &str, nonce: &Nonce, hmac_key: &[u8]) -> Result<Vec<u8>> {
    // Parse reply
    let response = HandshakeResponse::parse(body)?;

    // Check digest, then undo the XOR
    response.recover_key(nonce, hmac_key)
}
