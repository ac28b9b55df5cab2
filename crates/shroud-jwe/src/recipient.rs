//! Per-recipient key wrapping and selection.
//!
//! Encrypt: resolve each kid, run an independent ephemeral agreement and
//! wrap the shared CEK. Decrypt: pick the first header matching the local
//! key id and unwrap; later matches are never tried, so a failed unwrap
//! cannot be retried against sibling slots as an oracle.

use zeroize::Zeroizing;

use shroud_crypto::{
    base64url_decode, base64url_encode, unwrap_key, wrap_key, KEY_LENGTH, WRAPPED_KEY_LENGTH,
};

use crate::agreement;
use crate::document::{EphemeralPublicKey, JweDocument, JweRecipient, RecipientHeader};
use crate::error::JweError;
use crate::kdf::ECDH_ES_A256KW;
use crate::keys::{KeyAgreementKey, KeyResolver};

/// A recipient slot requested by the caller: the key id to encrypt to
/// plus the (fixed) key-wrapping algorithm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipientTemplate {
    pub kid: String,
    pub alg: String,
}

impl RecipientTemplate {
    pub fn new(kid: impl Into<String>) -> Self {
        Self {
            kid: kid.into(),
            alg: ECDH_ES_A256KW.to_string(),
        }
    }
}

/// Assemble one wire recipient per template, sequentially. The first
/// failing template aborts the whole operation.
pub(crate) async fn assemble_recipients(
    cek: &[u8; KEY_LENGTH],
    templates: &[RecipientTemplate],
    resolver: &dyn KeyResolver,
) -> Result<Vec<JweRecipient>, JweError> {
    let mut recipients = Vec::with_capacity(templates.len());

    for template in templates {
        if template.alg != ECDH_ES_A256KW {
            return Err(JweError::UnsupportedAlgorithm(format!(
                "alg: {}",
                template.alg
            )));
        }

        let public_key = resolver
            .resolve(&template.kid)
            .await?
            .into_public_key()?;

        let agreement = agreement::ephemeral_agreement(&public_key.bytes)?;
        let wrapped = wrap_key(&*agreement.kwk, cek)
            .map_err(|e| JweError::EncryptionFailed(e.to_string()))?;

        recipients.push(JweRecipient {
            header: RecipientHeader {
                kid: template.kid.clone(),
                alg: ECDH_ES_A256KW.to_string(),
                epk: EphemeralPublicKey::from_raw(&agreement.epk),
            },
            encrypted_key: base64url_encode(&wrapped),
        });
    }

    Ok(recipients)
}

/// Select the first recipient whose header matches the local key.
pub(crate) fn select_recipient<'a>(
    document: &'a JweDocument,
    own_id: &str,
) -> Result<&'a JweRecipient, JweError> {
    document
        .recipients
        .iter()
        .find(|r| r.header.kid == own_id && r.header.alg == ECDH_ES_A256KW)
        .ok_or(JweError::NoMatchingRecipient)
}

/// Unwrap the selected recipient's CEK.
///
/// Malformed slot contents (bad epk, bad base64url, wrong blob size) are
/// `MalformedDocument`; everything after that — agreement, KDF, AES-KW
/// integrity — collapses to the uniform `DecryptionFailed`.
pub(crate) async fn unwrap_cek(
    recipient: &JweRecipient,
    key: &dyn KeyAgreementKey,
) -> Result<Zeroizing<[u8; KEY_LENGTH]>, JweError> {
    let epk = recipient.header.epk.to_raw()?;

    let encrypted_key = base64url_decode(&recipient.encrypted_key)
        .map_err(|_| JweError::MalformedDocument("encrypted_key is not base64url".into()))?;
    if encrypted_key.len() != WRAPPED_KEY_LENGTH {
        return Err(JweError::MalformedDocument(format!(
            "encrypted_key must be {WRAPPED_KEY_LENGTH} bytes, got {}",
            encrypted_key.len()
        )));
    }

    let kwk = agreement::recipient_agreement(key, &epk)
        .await
        .map_err(|_| JweError::DecryptionFailed)?;

    unwrap_key(&*kwk, &encrypted_key).map_err(|_| JweError::DecryptionFailed)
}
