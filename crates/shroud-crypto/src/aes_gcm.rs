//! AES-256-GCM seal/open with a detached tag.
//!
//! The JOSE wire format carries `ciphertext` and `tag` as separate fields,
//! so `seal` splits the tag off the combined AEAD output and `open` joins
//! it back before handing the buffer to the cipher.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::error::CryptoError;
use crate::types::{AES_GCM_IV_LENGTH, KEY_LENGTH, TAG_LENGTH};

/// Encrypt with AES-256-GCM.
///
/// # Arguments
/// * `key` - 32-byte key
/// * `iv` - 12-byte nonce
/// * `aad` - additional authenticated data
/// * `plaintext` - data to encrypt
///
/// # Returns
/// `(ciphertext, tag)` with the 16-byte tag detached.
pub fn aes_gcm_seal(
    key: &[u8],
    iv: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
    check_key_iv(key, iv)?;

    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
    let nonce = Nonce::from_slice(iv);

    let mut sealed = cipher
        .encrypt(
            nonce,
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let tag = sealed.split_off(sealed.len() - TAG_LENGTH);
    Ok((sealed, tag))
}

/// Decrypt with AES-256-GCM. The tag is re-attached before the AEAD call.
pub fn aes_gcm_open(
    key: &[u8],
    iv: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    check_key_iv(key, iv)?;
    if tag.len() != TAG_LENGTH {
        return Err(CryptoError::InvalidTagLength {
            expected: TAG_LENGTH,
            got: tag.len(),
        });
    }

    let cipher =
        Aes256Gcm::new_from_slice(key).map_err(|_| CryptoError::DecryptionFailed)?;
    let nonce = Nonce::from_slice(iv);

    let mut sealed = Vec::with_capacity(ciphertext.len() + tag.len());
    sealed.extend_from_slice(ciphertext);
    sealed.extend_from_slice(tag);

    cipher
        .decrypt(
            nonce,
            Payload {
                msg: &sealed,
                aad,
            },
        )
        .map_err(|_| CryptoError::DecryptionFailed)
}

fn check_key_iv(key: &[u8], iv: &[u8]) -> Result<(), CryptoError> {
    if key.len() != KEY_LENGTH {
        return Err(CryptoError::InvalidKeyLength {
            expected: KEY_LENGTH,
            got: key.len(),
        });
    }
    if iv.len() != AES_GCM_IV_LENGTH {
        return Err(CryptoError::InvalidIvLength {
            expected: AES_GCM_IV_LENGTH,
            got: iv.len(),
        });
    }
    Ok(())
}
