//! RFC 3394 AES Key Wrap for content-encryption keys.
//!
//! Wraps a 32-byte key (4 x 64-bit blocks) under a 32-byte KEK to a
//! 40-byte blob. Unwrap verifies the RFC 3394 integrity check value.

use aes_kw::Kek;
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::types::{KEY_LENGTH, WRAPPED_KEY_LENGTH};

/// Wrap a 32-byte key with a 32-byte KEK using AES-KW.
pub fn wrap_key(kek: &[u8], key: &[u8]) -> Result<[u8; WRAPPED_KEY_LENGTH], CryptoError> {
    let kek_array = check_kek(kek)?;
    if key.len() != KEY_LENGTH {
        return Err(CryptoError::InvalidKeyLength {
            expected: KEY_LENGTH,
            got: key.len(),
        });
    }

    let kek = Kek::from(kek_array);
    let mut wrapped = [0u8; WRAPPED_KEY_LENGTH];
    kek.wrap(key, &mut wrapped)
        .map_err(|e| CryptoError::WrapFailed(format!("{:?}", e)))?;
    Ok(wrapped)
}

/// Unwrap a 40-byte AES-KW blob back to the 32-byte key.
///
/// An integrity-check failure is reported as `UnwrapFailed` with no
/// further detail.
pub fn unwrap_key(
    kek: &[u8],
    wrapped: &[u8],
) -> Result<Zeroizing<[u8; KEY_LENGTH]>, CryptoError> {
    let kek_array = check_kek(kek)?;
    if wrapped.len() != WRAPPED_KEY_LENGTH {
        return Err(CryptoError::InvalidWrappedKeyLength {
            expected: WRAPPED_KEY_LENGTH,
            got: wrapped.len(),
        });
    }

    let kek = Kek::from(kek_array);
    let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
    kek.unwrap(wrapped, &mut *key)
        .map_err(|_| CryptoError::UnwrapFailed)?;
    Ok(key)
}

fn check_kek(kek: &[u8]) -> Result<[u8; KEY_LENGTH], CryptoError> {
    kek.try_into().map_err(|_| CryptoError::InvalidKeyLength {
        expected: KEY_LENGTH,
        got: kek.len(),
    })
}
