//! JWE (JSON Web Encryption) in the general JSON serialization (RFC 7516)
//! for the Shroud envelope-encryption stack.
//!
//! A payload is sealed once under a random content encryption key (CEK)
//! with one of two AEAD profiles, then the CEK is wrapped independently
//! for each recipient:
//! - Key agreement: ECDH-ES over X25519 with Concat KDF
//!   (NIST SP 800-56A §5.8.1) to a 256-bit key-wrapping key
//! - Key wrapping: A256KW (RFC 3394)
//! - Content encryption: XChaCha20-Poly1305 (`C20P`, recommended) or
//!   AES-256-GCM (`A256GCM`, FIPS)
//!
//! Key resolution and the local agreement secret sit behind async traits
//! ([`KeyResolver`], [`KeyAgreementKey`]) so HSM- or DID-backed providers
//! can plug in without exposing key material.

mod agreement;
mod cipher;
mod content;
mod document;
mod error;
mod kdf;
mod keys;
mod recipient;

pub use cipher::{Cipher, Version};
pub use content::ContentAlgorithm;
pub use document::{EphemeralPublicKey, JweDocument, JweRecipient, RecipientHeader};
pub use error::JweError;
pub use kdf::ECDH_ES_A256KW;
pub use keys::{
    KeyAgreementKey, KeyDescription, KeyResolver, LocalKeyAgreementKey, PublicKey,
    StaticResolver, X25519_KEY_TYPE,
};
pub use recipient::RecipientTemplate;
