//! Encrypt/decrypt facade.

use serde::de::DeserializeOwned;
use serde::Serialize;

use shroud_crypto::base64url_encode;

use crate::content::{self, ContentAlgorithm};
use crate::document::{self, JweDocument};
use crate::error::JweError;
use crate::keys::{KeyAgreementKey, KeyResolver};
use crate::recipient::{self, RecipientTemplate};

/// Cipher suite selector.
///
/// `Recommended` uses XChaCha20-Poly1305 (`C20P`); `Fips` uses AES-256-GCM
/// (`A256GCM`). Key wrapping is ECDH-ES+A256KW in both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Version {
    #[default]
    Recommended,
    Fips,
}

impl Version {
    fn content_algorithm(self) -> ContentAlgorithm {
        match self {
            Self::Recommended => ContentAlgorithm::XChaCha20Poly1305,
            Self::Fips => ContentAlgorithm::Aes256Gcm,
        }
    }
}

/// JWE encryption/decryption for one or more recipients.
///
/// Each call is self-contained: the CEK, per-recipient ephemeral keys and
/// intermediate secrets live only for the duration of the call and are
/// zeroised on every exit path. Concurrent calls share nothing but the
/// process CSPRNG.
#[derive(Clone, Copy, Debug)]
pub struct Cipher {
    algorithm: ContentAlgorithm,
}

impl Default for Cipher {
    fn default() -> Self {
        Self::new(Version::default())
    }
}

impl Cipher {
    pub fn new(version: Version) -> Self {
        Self {
            algorithm: version.content_algorithm(),
        }
    }

    /// Encrypt `data` to every recipient in `templates`.
    ///
    /// Resolution and assembly run sequentially; the first failing
    /// recipient aborts the operation and no partial document is emitted.
    pub async fn encrypt(
        &self,
        data: &[u8],
        templates: &[RecipientTemplate],
        resolver: &dyn KeyResolver,
    ) -> Result<JweDocument, JweError> {
        if templates.is_empty() {
            return Err(JweError::InvalidArgument(
                "at least one recipient is required".into(),
            ));
        }

        let cek = content::generate_cek()?;

        let protected = document::build_protected(self.algorithm)?;
        let sealed =
            content::encrypt_content(self.algorithm, &cek, protected.as_bytes(), data)?;

        let recipients = recipient::assemble_recipients(&cek, templates, resolver).await?;

        Ok(JweDocument {
            protected,
            recipients,
            iv: base64url_encode(&sealed.iv),
            ciphertext: base64url_encode(&sealed.ciphertext),
            tag: base64url_encode(&sealed.tag),
        })
    }

    /// JSON-serialize `object` to UTF-8 and encrypt the bytes.
    pub async fn encrypt_object<T: Serialize + Sync + ?Sized>(
        &self,
        object: &T,
        templates: &[RecipientTemplate],
        resolver: &dyn KeyResolver,
    ) -> Result<JweDocument, JweError> {
        let data = serde_json::to_vec(object)
            .map_err(|e| JweError::InvalidArgument(format!("unserializable object: {e}")))?;
        self.encrypt(&data, templates, resolver).await
    }

    /// Decrypt a document with the local key-agreement key.
    ///
    /// The content profile comes from the document's `enc`; unknown values
    /// are rejected before any recipient work.
    pub async fn decrypt(
        &self,
        document: &JweDocument,
        key: &dyn KeyAgreementKey,
    ) -> Result<Vec<u8>, JweError> {
        let algorithm = document::parse_protected(document)?;
        if document.recipients.is_empty() {
            return Err(JweError::MalformedDocument(
                "recipients must be non-empty".into(),
            ));
        }
        let (iv, ciphertext, tag) = document::decode_segments(document, algorithm)?;

        let selected = recipient::select_recipient(document, key.id())?;
        let cek = recipient::unwrap_cek(selected, key).await?;

        content::decrypt_content(algorithm, &cek, &iv, document.aad(), &ciphertext, &tag)
    }

    /// Decrypt and parse the payload as JSON.
    pub async fn decrypt_object<T: DeserializeOwned>(
        &self,
        document: &JweDocument,
        key: &dyn KeyAgreementKey,
    ) -> Result<T, JweError> {
        let plaintext = self.decrypt(document, key).await?;
        serde_json::from_slice(&plaintext)
            .map_err(|e| JweError::InvalidArgument(format!("payload is not valid JSON: {e}")))
    }
}
