//! XChaCha20-Poly1305 seal/open with a detached tag.
//!
//! Same call shape as the AES-GCM module; the only differences are the
//! 24-byte nonce and the underlying cipher.

use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};

use crate::error::CryptoError;
use crate::types::{KEY_LENGTH, TAG_LENGTH, XCHACHA_IV_LENGTH};

/// Encrypt with XChaCha20-Poly1305.
///
/// # Arguments
/// * `key` - 32-byte key
/// * `iv` - 24-byte nonce
/// * `aad` - additional authenticated data
/// * `plaintext` - data to encrypt
///
/// # Returns
/// `(ciphertext, tag)` with the 16-byte tag detached.
pub fn xchacha_seal(
    key: &[u8],
    iv: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
    check_key_iv(key, iv)?;

    let cipher = XChaCha20Poly1305::new_from_slice(key)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
    let nonce = XNonce::from_slice(iv);

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

/// Decrypt with XChaCha20-Poly1305. The tag is re-attached before the AEAD call.
pub fn xchacha_open(
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
        XChaCha20Poly1305::new_from_slice(key).map_err(|_| CryptoError::DecryptionFailed)?;
    let nonce = XNonce::from_slice(iv);

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
    if iv.len() != XCHACHA_IV_LENGTH {
        return Err(CryptoError::InvalidIvLength {
            expected: XCHACHA_IV_LENGTH,
            got: iv.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::random_key;

    fn random_iv() -> [u8; XCHACHA_IV_LENGTH] {
        let mut iv = [0u8; XCHACHA_IV_LENGTH];
        getrandom::getrandom(&mut iv).unwrap();
        iv
    }

    #[test]
    fn seal_open_round_trip() {
        let key = random_key().unwrap();
        let iv = random_iv();
        let (ct, tag) = xchacha_seal(&key, &iv, b"aad", b"hello").unwrap();
        let pt = xchacha_open(&key, &iv, b"aad", &ct, &tag).unwrap();
        assert_eq!(pt, b"hello");
    }

    #[test]
    fn tag_is_16_bytes() {
        let key = random_key().unwrap();
        let iv = random_iv();
        let (_, tag) = xchacha_seal(&key, &iv, b"", b"data").unwrap();
        assert_eq!(tag.len(), TAG_LENGTH);
    }

    #[test]
    fn requires_24_byte_nonce() {
        let key = random_key().unwrap();
        assert!(matches!(
            xchacha_seal(&key, &[0u8; 12], b"", b"x"),
            Err(CryptoError::InvalidIvLength { expected: 24, .. })
        ));
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let key = random_key().unwrap();
        let iv = random_iv();
        let (mut ct, tag) = xchacha_seal(&key, &iv, b"", b"secret").unwrap();
        ct[0] ^= 0xff;
        assert!(xchacha_open(&key, &iv, b"", &ct, &tag).is_err());
    }

    #[test]
    fn wrong_aad_fails() {
        let key = random_key().unwrap();
        let iv = random_iv();
        let (ct, tag) = xchacha_seal(&key, &iv, b"aad-1", b"secret").unwrap();
        assert!(xchacha_open(&key, &iv, b"aad-2", &ct, &tag).is_err());
    }

    #[test]
    fn wrong_key_fails() {
        let key1 = random_key().unwrap();
        let key2 = random_key().unwrap();
        let iv = random_iv();
        let (ct, tag) = xchacha_seal(&key1, &iv, b"", b"secret").unwrap();
        assert!(xchacha_open(&key2, &iv, b"", &ct, &tag).is_err());
    }

    #[test]
    fn empty_plaintext_round_trips() {
        let key = random_key().unwrap();
        let iv = random_iv();
        let (ct, tag) = xchacha_seal(&key, &iv, b"aad", b"").unwrap();
        assert!(ct.is_empty());
        assert!(xchacha_open(&key, &iv, b"aad", &ct, &tag).unwrap().is_empty());
    }
}
