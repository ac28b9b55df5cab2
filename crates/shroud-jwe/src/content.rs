//! Content-encryption profiles.
//!
//! Two fixed AEAD profiles with identical call shape, selected by the
//! `enc` value of the protected header:
//!
//! - `C20P` — XChaCha20-Poly1305, 24-byte nonce. The wide nonce makes
//!   random generation collision-resistant without caller-side limits.
//! - `A256GCM` — AES-256-GCM, 12-byte nonce. NIST SP 800-38D message
//!   limits apply at the caller level.

use zeroize::Zeroizing;

use shroud_crypto::{
    aes_gcm_open, aes_gcm_seal, fill_random, random_key, xchacha_open, xchacha_seal,
    AES_GCM_IV_LENGTH, KEY_LENGTH, TAG_LENGTH, XCHACHA_IV_LENGTH,
};

use crate::error::JweError;

/// AEAD profile for the payload, fixed at `Cipher` construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentAlgorithm {
    /// XChaCha20-Poly1305 ("C20P").
    XChaCha20Poly1305,
    /// AES-256-GCM ("A256GCM").
    Aes256Gcm,
}

impl ContentAlgorithm {
    /// The `enc` value carried in the protected header.
    pub fn enc_name(self) -> &'static str {
        match self {
            Self::XChaCha20Poly1305 => "C20P",
            Self::Aes256Gcm => "A256GCM",
        }
    }

    /// Map an `enc` value back to a profile.
    pub fn from_enc_name(enc: &str) -> Result<Self, JweError> {
        match enc {
            "C20P" => Ok(Self::XChaCha20Poly1305),
            "A256GCM" => Ok(Self::Aes256Gcm),
            other => Err(JweError::UnsupportedAlgorithm(format!("enc: {other}"))),
        }
    }

    /// Nonce length for this profile in bytes.
    pub fn iv_length(self) -> usize {
        match self {
            Self::XChaCha20Poly1305 => XCHACHA_IV_LENGTH,
            Self::Aes256Gcm => AES_GCM_IV_LENGTH,
        }
    }
}

/// Output of one content encryption: detached iv/ciphertext/tag.
pub(crate) struct EncryptedContent {
    pub iv: Vec<u8>,
    pub ciphertext: Vec<u8>,
    pub tag: Vec<u8>,
}

/// Generate a fresh 32-byte content encryption key.
pub(crate) fn generate_cek() -> Result<Zeroizing<[u8; KEY_LENGTH]>, JweError> {
    random_key()
        .map(Zeroizing::new)
        .map_err(|e| JweError::EncryptionFailed(e.to_string()))
}

/// Seal `plaintext` under `cek` with a fresh random nonce.
pub(crate) fn encrypt_content(
    algorithm: ContentAlgorithm,
    cek: &[u8; KEY_LENGTH],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<EncryptedContent, JweError> {
    let mut iv = vec![0u8; algorithm.iv_length()];
    fill_random(&mut iv).map_err(|e| JweError::EncryptionFailed(e.to_string()))?;

    let (ciphertext, tag) = match algorithm {
        ContentAlgorithm::XChaCha20Poly1305 => xchacha_seal(cek, &iv, aad, plaintext),
        ContentAlgorithm::Aes256Gcm => aes_gcm_seal(cek, &iv, aad, plaintext),
    }
    .map_err(|e| JweError::EncryptionFailed(e.to_string()))?;

    Ok(EncryptedContent {
        iv,
        ciphertext,
        tag,
    })
}

/// Open `ciphertext` with the detached `tag`. Lengths are validated before
/// any cryptographic work; every post-validation failure is the uniform
/// `DecryptionFailed`.
pub(crate) fn decrypt_content(
    algorithm: ContentAlgorithm,
    cek: &[u8; KEY_LENGTH],
    iv: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>, JweError> {
    if iv.len() != algorithm.iv_length() {
        return Err(JweError::InvalidArgument(format!(
            "invalid iv length: expected {} bytes, got {}",
            algorithm.iv_length(),
            iv.len()
        )));
    }
    if tag.len() != TAG_LENGTH {
        return Err(JweError::InvalidArgument(format!(
            "invalid tag length: expected {TAG_LENGTH} bytes, got {}",
            tag.len()
        )));
    }

    match algorithm {
        ContentAlgorithm::XChaCha20Poly1305 => xchacha_open(cek, iv, aad, ciphertext, tag),
        ContentAlgorithm::Aes256Gcm => aes_gcm_open(cek, iv, aad, ciphertext, tag),
    }
    .map_err(|_| JweError::DecryptionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enc_names_round_trip() {
        for algorithm in [ContentAlgorithm::XChaCha20Poly1305, ContentAlgorithm::Aes256Gcm] {
            assert_eq!(
                ContentAlgorithm::from_enc_name(algorithm.enc_name()).unwrap(),
                algorithm
            );
        }
    }

    #[test]
    fn unknown_enc_is_unsupported() {
        let err = ContentAlgorithm::from_enc_name("A128CBC-HS256").unwrap_err();
        assert!(matches!(err, JweError::UnsupportedAlgorithm(_)));
    }

    #[test]
    fn iv_lengths() {
        assert_eq!(ContentAlgorithm::XChaCha20Poly1305.iv_length(), 24);
        assert_eq!(ContentAlgorithm::Aes256Gcm.iv_length(), 12);
    }

    #[test]
    fn cek_is_32_bytes() {
        assert_eq!(generate_cek().unwrap().len(), 32);
    }

    #[test]
    fn round_trip_both_profiles() {
        for algorithm in [ContentAlgorithm::XChaCha20Poly1305, ContentAlgorithm::Aes256Gcm] {
            let cek = generate_cek().unwrap();
            let sealed = encrypt_content(algorithm, &cek, b"aad", b"payload").unwrap();
            assert_eq!(sealed.iv.len(), algorithm.iv_length());
            assert_eq!(sealed.tag.len(), TAG_LENGTH);

            let opened = decrypt_content(
                algorithm,
                &cek,
                &sealed.iv,
                b"aad",
                &sealed.ciphertext,
                &sealed.tag,
            )
            .unwrap();
            assert_eq!(opened, b"payload");
        }
    }

    #[test]
    fn fresh_iv_per_encryption() {
        let cek = generate_cek().unwrap();
        let a = encrypt_content(ContentAlgorithm::XChaCha20Poly1305, &cek, b"", b"x").unwrap();
        let b = encrypt_content(ContentAlgorithm::XChaCha20Poly1305, &cek, b"", b"x").unwrap();
        assert_ne!(a.iv, b.iv);
    }

    #[test]
    fn wrong_length_iv_rejected_before_crypto() {
        let cek = generate_cek().unwrap();
        let err = decrypt_content(
            ContentAlgorithm::Aes256Gcm,
            &cek,
            &[0u8; 24],
            b"",
            b"",
            &[0u8; 16],
        )
        .unwrap_err();
        assert!(matches!(err, JweError::InvalidArgument(_)));
    }

    #[test]
    fn bad_tag_is_uniform_failure() {
        let cek = generate_cek().unwrap();
        let sealed = encrypt_content(ContentAlgorithm::Aes256Gcm, &cek, b"", b"data").unwrap();
        let err = decrypt_content(
            ContentAlgorithm::Aes256Gcm,
            &cek,
            &sealed.iv,
            b"",
            &sealed.ciphertext,
            &[0u8; 16],
        )
        .unwrap_err();
        assert!(matches!(err, JweError::DecryptionFailed));
    }
}
