mod error;
mod crypto;

pub use error::*;
pub use crypto::*;
