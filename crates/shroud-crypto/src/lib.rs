//! Cryptographic primitives for the Shroud envelope-encryption stack.
//!
//! This crate is the byte-oriented layer: AEAD seal/open for the two
//! supported content ciphers, X25519 key agreement, RFC 3394 AES Key Wrap,
//! base64url, and CSPRNG access. Everything takes and returns raw bytes;
//! JOSE framing lives in `shroud-jwe`.

pub mod aes_gcm;
pub mod base64url;
pub mod error;
pub mod keywrap;
pub mod rng;
pub mod types;
pub mod x25519;
pub mod xchacha;

pub use aes_gcm::{aes_gcm_open, aes_gcm_seal};
pub use base64url::{base64url_decode, base64url_decode_array, base64url_encode};
pub use error::CryptoError;
pub use keywrap::{unwrap_key, wrap_key};
pub use rng::{fill_random, random_key};
pub use types::{
    AES_GCM_IV_LENGTH, KEY_LENGTH, TAG_LENGTH, WRAPPED_KEY_LENGTH, XCHACHA_IV_LENGTH,
};
pub use x25519::{derive_shared_secret, generate_keypair, public_key_for};
pub use xchacha::{xchacha_open, xchacha_seal};
