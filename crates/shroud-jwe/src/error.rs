use thiserror::Error;

#[derive(Debug, Error)]
pub enum JweError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("No key found for \"{0}\"")]
    UnknownKey(String),

    #[error("No recipient matches the provided key agreement key")]
    NoMatchingRecipient,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    // Single uniform failure for everything after recipient selection:
    // unwrap, key agreement and AEAD open must not be distinguishable.
    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("Key provider error: {0}")]
    KeyProvider(String),
}
