use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("Invalid IV length: expected {expected} bytes, got {got}")]
    InvalidIvLength { expected: usize, got: usize },

    #[error("Invalid tag length: expected {expected} bytes, got {got}")]
    InvalidTagLength { expected: usize, got: usize },

    #[error("Invalid wrapped key length: expected {expected} bytes, got {got}")]
    InvalidWrappedKeyLength { expected: usize, got: usize },

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    // No detail: bad tag, bad AAD and wrong key must stay indistinguishable.
    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("AES-KW wrap failed: {0}")]
    WrapFailed(String),

    #[error("AES-KW unwrap failed")]
    UnwrapFailed,

    #[error("Non-contributory shared secret (low-order public key)")]
    NonContributorySecret,

    #[error("Random number generation failed: {0}")]
    RngFailed(String),
}
