//! ECDH-ES over X25519 for recipient key wrapping.
//!
//! Encrypt side: one fresh ephemeral keypair per recipient, never reused.
//! The shared secret Z and the ephemeral secret live in `Zeroizing`
//! buffers and are scrubbed on every exit path, including errors.

use zeroize::Zeroizing;

use shroud_crypto::{x25519, KEY_LENGTH};

use crate::error::JweError;
use crate::kdf;
use crate::keys::KeyAgreementKey;

/// Result of one ephemeral-static agreement: the ephemeral public key for
/// the recipient header and the derived key-wrapping key.
#[derive(Debug)]
pub(crate) struct EphemeralAgreement {
    pub epk: [u8; KEY_LENGTH],
    pub kwk: Zeroizing<[u8; KEY_LENGTH]>,
}

/// Encrypt side: generate an ephemeral keypair and derive the KWK against
/// the recipient's static public key.
pub(crate) fn ephemeral_agreement(
    recipient_public: &[u8; KEY_LENGTH],
) -> Result<EphemeralAgreement, JweError> {
    let (ephemeral_secret, epk) =
        x25519::generate_keypair().map_err(|e| JweError::EncryptionFailed(e.to_string()))?;

    let z = x25519::derive_shared_secret(&ephemeral_secret, recipient_public)
        .map_err(|e| JweError::InvalidArgument(e.to_string()))?;
    let kwk = kdf::derive_kwk(&z);

    // ephemeral_secret and z zeroise on drop here
    Ok(EphemeralAgreement { epk, kwk })
}

/// Decrypt side: re-derive the KWK from the local key-agreement key and
/// the sender's ephemeral public key.
pub(crate) async fn recipient_agreement(
    key: &dyn KeyAgreementKey,
    epk: &[u8; KEY_LENGTH],
) -> Result<Zeroizing<[u8; KEY_LENGTH]>, JweError> {
    let z = key.derive_secret(epk).await?;
    Ok(kdf::derive_kwk(&z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::LocalKeyAgreementKey;

    #[tokio::test]
    async fn both_sides_derive_the_same_kwk() {
        let recipient = LocalKeyAgreementKey::generate("did:example:bob#key-1").unwrap();

        let agreement = ephemeral_agreement(&recipient.public_key().bytes).unwrap();
        let kwk = recipient_agreement(&recipient, &agreement.epk).await.unwrap();
        assert_eq!(*agreement.kwk, *kwk);
    }

    #[test]
    fn ephemeral_keys_are_unique() {
        let recipient = LocalKeyAgreementKey::generate("k").unwrap();
        let a = ephemeral_agreement(&recipient.public_key().bytes).unwrap();
        let b = ephemeral_agreement(&recipient.public_key().bytes).unwrap();
        assert_ne!(a.epk, b.epk);
        assert_ne!(*a.kwk, *b.kwk);
    }

    #[test]
    fn zero_point_recipient_is_rejected() {
        let err = ephemeral_agreement(&[0u8; KEY_LENGTH]).unwrap_err();
        assert!(matches!(err, JweError::InvalidArgument(_)));
    }
}
