//! CSPRNG access.

use crate::error::CryptoError;
use crate::types::KEY_LENGTH;

/// Fill `buf` with cryptographically secure random bytes.
pub fn fill_random(buf: &mut [u8]) -> Result<(), CryptoError> {
    getrandom::getrandom(buf).map_err(|e| CryptoError::RngFailed(e.to_string()))
}

/// Generate a random 256-bit key.
pub fn random_key() -> Result<[u8; KEY_LENGTH], CryptoError> {
    let mut key = [0u8; KEY_LENGTH];
    fill_random(&mut key)?;
    Ok(key)
}
