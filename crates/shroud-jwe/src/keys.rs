//! Key-agreement key material and resolution.
//!
//! Recipients are identified by a `kid` (typically a DID URL) that a
//! caller-supplied [`KeyResolver`] maps to public key material. The local
//! side of an agreement is a [`KeyAgreementKey`]: either the software
//! [`LocalKeyAgreementKey`] or a caller implementation backed by an HSM,
//! in which case secret material never crosses the trait boundary.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use shroud_crypto::{base64url_decode_array, base64url_encode, x25519, KEY_LENGTH};

use crate::error::JweError;

/// Declared type for X25519 key-agreement keys.
pub const X25519_KEY_TYPE: &str = "X25519KeyAgreementKey2020";

/// Multicodec prefix for an X25519 public key (0xec as unsigned varint).
const X25519_PUB_PREFIX: [u8; 2] = [0xec, 0x01];

/// An X25519 public key bound to a key identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub kid: String,
    pub bytes: [u8; KEY_LENGTH],
}

impl PublicKey {
    pub fn new(kid: impl Into<String>, bytes: [u8; KEY_LENGTH]) -> Self {
        Self {
            kid: kid.into(),
            bytes,
        }
    }

    /// Decode from a multibase string (z-base58btc, multicodec-prefixed).
    pub fn from_multibase(kid: impl Into<String>, multibase_key: &str) -> Result<Self, JweError> {
        let (_, raw) = multibase::decode(multibase_key)
            .map_err(|e| JweError::InvalidArgument(format!("invalid multibase key: {e}")))?;
        let Some(key) = raw.strip_prefix(&X25519_PUB_PREFIX[..]) else {
            return Err(JweError::InvalidArgument(
                "multibase key is not an X25519 public key".into(),
            ));
        };
        let bytes: [u8; KEY_LENGTH] = key.try_into().map_err(|_| {
            JweError::InvalidArgument(format!(
                "invalid X25519 key length: expected {KEY_LENGTH} bytes, got {}",
                key.len()
            ))
        })?;
        Ok(Self::new(kid, bytes))
    }

    /// Decode from an OKP/X25519 JWK.
    pub fn from_jwk(kid: impl Into<String>, jwk: &serde_json::Value) -> Result<Self, JweError> {
        if jwk["kty"] != "OKP" || jwk["crv"] != "X25519" {
            return Err(JweError::InvalidArgument(
                "JWK is not an OKP/X25519 key".into(),
            ));
        }
        let x = jwk["x"]
            .as_str()
            .ok_or_else(|| JweError::InvalidArgument("JWK missing x".into()))?;
        let bytes = base64url_decode_array(x)
            .map_err(|_| JweError::InvalidArgument("invalid JWK x encoding".into()))?;
        Ok(Self::new(kid, bytes))
    }

    /// Encode as multibase (z-base58btc with the X25519 multicodec prefix).
    pub fn to_multibase(&self) -> String {
        let mut prefixed = Vec::with_capacity(2 + KEY_LENGTH);
        prefixed.extend_from_slice(&X25519_PUB_PREFIX);
        prefixed.extend_from_slice(&self.bytes);
        multibase::encode(multibase::Base::Base58Btc, prefixed)
    }

    /// Encode as an OKP/X25519 JWK value.
    pub fn to_jwk(&self) -> serde_json::Value {
        serde_json::json!({
            "kty": "OKP",
            "crv": "X25519",
            "x": base64url_encode(&self.bytes),
        })
    }
}

/// Key description returned by a resolver.
///
/// Either `public_key_multibase` or `public_key_jwk` must be present;
/// other encodings are not accepted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeyDescription {
    pub id: String,
    #[serde(rename = "type")]
    pub key_type: String,
    #[serde(rename = "publicKeyMultibase", skip_serializing_if = "Option::is_none")]
    pub public_key_multibase: Option<String>,
    #[serde(rename = "publicKeyJwk", skip_serializing_if = "Option::is_none")]
    pub public_key_jwk: Option<serde_json::Value>,
}

impl KeyDescription {
    /// Decode whichever public-key encoding is present to raw bytes.
    pub fn into_public_key(self) -> Result<PublicKey, JweError> {
        if let Some(mb) = &self.public_key_multibase {
            return PublicKey::from_multibase(self.id, mb);
        }
        if let Some(jwk) = &self.public_key_jwk {
            return PublicKey::from_jwk(self.id, jwk);
        }
        Err(JweError::InvalidArgument(format!(
            "key \"{}\" has neither publicKeyMultibase nor publicKeyJwk",
            self.id
        )))
    }
}

/// Maps a key identifier to public key material.
///
/// Implementations typically call out to a DID resolver or key directory
/// and may suspend.
#[async_trait]
pub trait KeyResolver: Send + Sync {
    async fn resolve(&self, kid: &str) -> Result<KeyDescription, JweError>;
}

/// The local side of an ECDH-ES key agreement.
///
/// `derive_secret` performs X25519 on the caller's behalf; an HSM-backed
/// implementation keeps the static secret inside the provider.
#[async_trait]
pub trait KeyAgreementKey: Send + Sync {
    /// Key identifier matched against recipient headers.
    fn id(&self) -> &str;

    /// Declared key type, e.g. `X25519KeyAgreementKey2020`.
    fn key_type(&self) -> &str;

    /// X25519 Diffie-Hellman between this key and `public_key`.
    async fn derive_secret(
        &self,
        public_key: &[u8; KEY_LENGTH],
    ) -> Result<Zeroizing<[u8; KEY_LENGTH]>, JweError>;
}

/// Software [`KeyAgreementKey`] backed by an in-memory X25519 secret.
pub struct LocalKeyAgreementKey {
    id: String,
    secret: Zeroizing<[u8; KEY_LENGTH]>,
    public: [u8; KEY_LENGTH],
}

impl LocalKeyAgreementKey {
    /// Generate a fresh key under the given identifier.
    pub fn generate(id: impl Into<String>) -> Result<Self, JweError> {
        let (secret, public) = x25519::generate_keypair()
            .map_err(|e| JweError::KeyProvider(e.to_string()))?;
        Ok(Self {
            id: id.into(),
            secret,
            public,
        })
    }

    /// Reconstruct from raw secret bytes.
    pub fn from_secret_bytes(id: impl Into<String>, secret: [u8; KEY_LENGTH]) -> Self {
        let secret = Zeroizing::new(secret);
        let public = x25519::public_key_for(&secret);
        Self {
            id: id.into(),
            secret,
            public,
        }
    }

    /// The public half, bound to this key's identifier.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::new(self.id.clone(), self.public)
    }
}

#[async_trait]
impl KeyAgreementKey for LocalKeyAgreementKey {
    fn id(&self) -> &str {
        &self.id
    }

    fn key_type(&self) -> &str {
        X25519_KEY_TYPE
    }

    async fn derive_secret(
        &self,
        public_key: &[u8; KEY_LENGTH],
    ) -> Result<Zeroizing<[u8; KEY_LENGTH]>, JweError> {
        x25519::derive_shared_secret(&self.secret, public_key)
            .map_err(|e| JweError::InvalidArgument(e.to_string()))
    }
}

/// In-memory kid → key resolver for tests and embedders without a
/// resolution service.
#[derive(Default)]
pub struct StaticResolver {
    keys: HashMap<String, PublicKey>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: PublicKey) {
        self.keys.insert(key.kid.clone(), key);
    }
}

impl FromIterator<PublicKey> for StaticResolver {
    fn from_iter<I: IntoIterator<Item = PublicKey>>(iter: I) -> Self {
        let mut resolver = Self::new();
        for key in iter {
            resolver.insert(key);
        }
        resolver
    }
}

#[async_trait]
impl KeyResolver for StaticResolver {
    async fn resolve(&self, kid: &str) -> Result<KeyDescription, JweError> {
        let key = self
            .keys
            .get(kid)
            .ok_or_else(|| JweError::UnknownKey(kid.to_string()))?;
        Ok(KeyDescription {
            id: key.kid.clone(),
            key_type: X25519_KEY_TYPE.to_string(),
            public_key_multibase: Some(key.to_multibase()),
            public_key_jwk: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multibase_round_trip() {
        let key = LocalKeyAgreementKey::generate("did:example:alice#key-1")
            .unwrap()
            .public_key();
        let encoded = key.to_multibase();
        assert!(encoded.starts_with('z'));
        let decoded = PublicKey::from_multibase(key.kid.clone(), &encoded).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn jwk_round_trip() {
        let key = LocalKeyAgreementKey::generate("did:example:alice#key-1")
            .unwrap()
            .public_key();
        let jwk = key.to_jwk();
        assert_eq!(jwk["kty"], "OKP");
        assert_eq!(jwk["crv"], "X25519");
        let decoded = PublicKey::from_jwk(key.kid.clone(), &jwk).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn rejects_non_okp_jwk() {
        let jwk = serde_json::json!({"kty": "EC", "crv": "P-256", "x": "AA"});
        assert!(PublicKey::from_jwk("kid", &jwk).is_err());
    }

    #[test]
    fn rejects_wrong_multicodec_prefix() {
        // Ed25519 prefix (0xed 0x01) instead of X25519
        let mut prefixed = vec![0xed, 0x01];
        prefixed.extend_from_slice(&[0u8; 32]);
        let encoded = multibase::encode(multibase::Base::Base58Btc, prefixed);
        assert!(PublicKey::from_multibase("kid", &encoded).is_err());
    }

    #[test]
    fn description_requires_some_encoding() {
        let desc = KeyDescription {
            id: "did:example:bob#key-1".into(),
            key_type: X25519_KEY_TYPE.into(),
            public_key_multibase: None,
            public_key_jwk: None,
        };
        assert!(desc.into_public_key().is_err());
    }

    #[test]
    fn from_secret_bytes_is_stable() {
        let secret = [9u8; 32];
        let a = LocalKeyAgreementKey::from_secret_bytes("k", secret);
        let b = LocalKeyAgreementKey::from_secret_bytes("k", secret);
        assert_eq!(a.public_key(), b.public_key());
    }

    #[tokio::test]
    async fn static_resolver_resolves_inserted_keys() {
        let key = LocalKeyAgreementKey::generate("did:example:carol#key-1")
            .unwrap()
            .public_key();
        let resolver: StaticResolver = [key.clone()].into_iter().collect();

        let resolved = resolver
            .resolve("did:example:carol#key-1")
            .await
            .unwrap()
            .into_public_key()
            .unwrap();
        assert_eq!(resolved, key);

        let err = resolver.resolve("did:example:nobody#key-1").await.unwrap_err();
        assert!(matches!(err, JweError::UnknownKey(_)));
    }

    #[test]
    fn local_key_declares_its_identity() {
        let key = LocalKeyAgreementKey::generate("did:example:alice#key-1").unwrap();
        assert_eq!(key.id(), "did:example:alice#key-1");
        assert_eq!(key.key_type(), X25519_KEY_TYPE);
    }

    #[tokio::test]
    async fn local_keys_agree() {
        let alice = LocalKeyAgreementKey::generate("a").unwrap();
        let bob = LocalKeyAgreementKey::generate("b").unwrap();

        let z_a = alice.derive_secret(&bob.public_key().bytes).await.unwrap();
        let z_b = bob.derive_secret(&alice.public_key().bytes).await.unwrap();
        assert_eq!(*z_a, *z_b);
    }
}
