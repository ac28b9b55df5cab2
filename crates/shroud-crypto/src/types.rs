//! Length constants shared across the stack.

/// AES-256 / XChaCha20 / X25519 key length in bytes.
pub const KEY_LENGTH: usize = 32;

/// AES-GCM nonce length in bytes (96 bits per NIST SP 800-38D).
pub const AES_GCM_IV_LENGTH: usize = 12;

/// XChaCha20-Poly1305 nonce length in bytes (192 bits).
pub const XCHACHA_IV_LENGTH: usize = 24;

/// GCM / Poly1305 authentication tag length in bytes.
pub const TAG_LENGTH: usize = 16;

/// AES-KW output for a 32-byte key: 32 + 8 = 40 bytes.
pub const WRAPPED_KEY_LENGTH: usize = 40;
