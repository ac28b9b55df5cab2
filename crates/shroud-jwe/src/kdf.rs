//! Concat KDF (NIST SP 800-56A §5.8.1) for ECDH-ES key wrapping.
//!
//! For ECDH-ES+A256KW:
//!   KWK = SHA-256(00000001 || Z || algID || partyUInfo || partyVInfo || suppPubInfo)
//!
//! Where:
//!   algID = [len("ECDH-ES+A256KW"):4 BE]["ECDH-ES+A256KW"]
//!   partyUInfo = [0:4 BE] (empty)
//!   partyVInfo = [0:4 BE] (empty)
//!   suppPubInfo = [256:4 BE] (keydatalen in bits)
//!
//! One round suffices: the output is exactly one SHA-256 block.

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Key-wrapping algorithm identifier, bound into the KDF transcript and
/// carried in every recipient header.
pub const ECDH_ES_A256KW: &str = "ECDH-ES+A256KW";

/// Derived key length in bits (suppPubInfo).
const KEY_DATA_LENGTH_BITS: u32 = 256;

/// Derive a 256-bit key-wrapping key from an ECDH shared secret.
pub(crate) fn derive_kwk(z: &[u8; 32]) -> Zeroizing<[u8; 32]> {
    let mut hasher = Sha256::new();

    // Round counter (always 1 for a single-block output)
    hasher.update(1u32.to_be_bytes());

    // Shared secret Z
    hasher.update(z);

    // AlgorithmID: length-prefixed algorithm name
    hasher.update((ECDH_ES_A256KW.len() as u32).to_be_bytes());
    hasher.update(ECDH_ES_A256KW.as_bytes());

    // PartyUInfo: empty (length 0)
    hasher.update(0u32.to_be_bytes());

    // PartyVInfo: empty (length 0)
    hasher.update(0u32.to_be_bytes());

    // SuppPubInfo: key data length in bits
    hasher.update(KEY_DATA_LENGTH_BITS.to_be_bytes());

    Zeroizing::new(hasher.finalize().into())
}
