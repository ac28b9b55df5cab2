//! X25519 key agreement primitives.
//!
//! Secrets are plain 32-byte buffers wrapped in `Zeroizing` so they are
//! scrubbed on every exit path; `x25519-dalek` clamps scalars internally.

use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::rng;
use crate::types::KEY_LENGTH;

/// Generate an X25519 keypair.
///
/// # Returns
/// `(secret, public)` raw key bytes; the secret is zeroised on drop.
pub fn generate_keypair() -> Result<(Zeroizing<[u8; KEY_LENGTH]>, [u8; KEY_LENGTH]), CryptoError> {
    let secret = Zeroizing::new(rng::random_key()?);
    let public = public_key_for(&secret);
    Ok((secret, public))
}

/// Compute the public key for a raw X25519 secret.
pub fn public_key_for(secret: &[u8; KEY_LENGTH]) -> [u8; KEY_LENGTH] {
    let secret = StaticSecret::from(*secret);
    *PublicKey::from(&secret).as_bytes()
}

/// X25519 Diffie-Hellman.
///
/// Fails with `NonContributorySecret` when the peer key is a low-order
/// point and the shared secret would be all zeros.
pub fn derive_shared_secret(
    secret: &[u8; KEY_LENGTH],
    public: &[u8; KEY_LENGTH],
) -> Result<Zeroizing<[u8; KEY_LENGTH]>, CryptoError> {
    let secret = StaticSecret::from(*secret);
    let public = PublicKey::from(*public);

    let shared = secret.diffie_hellman(&public);
    if !shared.was_contributory() {
        return Err(CryptoError::NonContributorySecret);
    }
    Ok(Zeroizing::new(*shared.as_bytes()))
}
