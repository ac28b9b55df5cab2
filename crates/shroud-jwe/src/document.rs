//! JWE general JSON serialization (RFC 7516 §7.2).
//!
//! The protected header is the AAD anchor: its base64url string is fed to
//! the AEAD as additional data byte-for-byte. On parse the original
//! string is retained and never re-serialized, so a document round-trips
//! even if a re-encoding would order keys differently.

use serde::{Deserialize, Serialize};

use shroud_crypto::{
    base64url_decode, base64url_decode_array, base64url_encode, KEY_LENGTH, TAG_LENGTH,
};

use crate::content::ContentAlgorithm;
use crate::error::JweError;

/// Protected-header payload: `{"enc": ...}`.
#[derive(Debug, Serialize, Deserialize)]
struct ProtectedHeader {
    enc: String,
}

/// Ephemeral public key as carried in a recipient header (JWK form).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EphemeralPublicKey {
    pub kty: String,
    pub crv: String,
    pub x: String,
}

impl EphemeralPublicKey {
    /// Encode raw X25519 public key bytes as an OKP JWK.
    pub fn from_raw(bytes: &[u8; KEY_LENGTH]) -> Self {
        Self {
            kty: "OKP".to_string(),
            crv: "X25519".to_string(),
            x: base64url_encode(bytes),
        }
    }

    /// Decode back to raw bytes, validating the JWK shape.
    pub fn to_raw(&self) -> Result<[u8; KEY_LENGTH], JweError> {
        if self.kty != "OKP" || self.crv != "X25519" {
            return Err(JweError::MalformedDocument(format!(
                "epk is not an OKP/X25519 key (kty={}, crv={})",
                self.kty, self.crv
            )));
        }
        base64url_decode_array(&self.x)
            .map_err(|_| JweError::MalformedDocument("invalid epk x encoding".into()))
    }
}

/// Per-recipient unprotected header.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipientHeader {
    pub kid: String,
    pub alg: String,
    pub epk: EphemeralPublicKey,
}

/// One recipient slot: header plus the AES-KW-wrapped CEK.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JweRecipient {
    pub header: RecipientHeader,
    pub encrypted_key: String,
}

/// A JWE in the general JSON serialization.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JweDocument {
    pub protected: String,
    pub recipients: Vec<JweRecipient>,
    pub iv: String,
    pub ciphertext: String,
    pub tag: String,
}

impl JweDocument {
    /// Parse from a JSON string. Missing or non-string fields are
    /// malformed documents.
    pub fn from_json_str(json: &str) -> Result<Self, JweError> {
        serde_json::from_str(json).map_err(|e| JweError::MalformedDocument(e.to_string()))
    }

    /// Serialize to a JSON string.
    pub fn to_json_string(&self) -> Result<String, JweError> {
        serde_json::to_string(self).map_err(|e| JweError::MalformedDocument(e.to_string()))
    }

    /// The AEAD additional data: the protected string's ASCII bytes,
    /// exactly as they appear on the wire.
    pub fn aad(&self) -> &[u8] {
        self.protected.as_bytes()
    }
}

/// Build the base64url protected header for a content algorithm.
pub(crate) fn build_protected(algorithm: ContentAlgorithm) -> Result<String, JweError> {
    let header = ProtectedHeader {
        enc: algorithm.enc_name().to_string(),
    };
    let json = serde_json::to_string(&header)
        .map_err(|e| JweError::EncryptionFailed(e.to_string()))?;
    Ok(base64url_encode(json.as_bytes()))
}

/// Decode the protected header and map its `enc` to a profile.
pub(crate) fn parse_protected(document: &JweDocument) -> Result<ContentAlgorithm, JweError> {
    let bytes = base64url_decode(&document.protected)
        .map_err(|_| JweError::MalformedDocument("protected is not base64url".into()))?;
    let header: ProtectedHeader = serde_json::from_slice(&bytes)
        .map_err(|e| JweError::MalformedDocument(format!("invalid protected header: {e}")))?;
    ContentAlgorithm::from_enc_name(&header.enc)
}

/// Decode iv/ciphertext/tag, enforcing the length invariants for `enc`.
pub(crate) fn decode_segments(
    document: &JweDocument,
    algorithm: ContentAlgorithm,
) -> Result<(Vec<u8>, Vec<u8>, Vec<u8>), JweError> {
    let iv = decode_field(&document.iv, "iv")?;
    if iv.len() != algorithm.iv_length() {
        return Err(JweError::MalformedDocument(format!(
            "iv must be {} bytes for {}, got {}",
            algorithm.iv_length(),
            algorithm.enc_name(),
            iv.len()
        )));
    }

    let ciphertext = decode_field(&document.ciphertext, "ciphertext")?;

    let tag = decode_field(&document.tag, "tag")?;
    if tag.len() != TAG_LENGTH {
        return Err(JweError::MalformedDocument(format!(
            "tag must be {TAG_LENGTH} bytes, got {}",
            tag.len()
        )));
    }

    Ok((iv, ciphertext, tag))
}

fn decode_field(value: &str, field: &str) -> Result<Vec<u8>, JweError> {
    base64url_decode(value)
        .map_err(|_| JweError::MalformedDocument(format!("{field} is not base64url")))
}
