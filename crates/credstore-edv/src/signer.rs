//! # Capability Invocation Signers
//!
//! A signer is the opaque `{id, sign}` capability object that authorizes a
//! request to the vault. The credential store holds one per instance and
//! passes it to every collaborator call without inspecting it.
//!
//! [`Ed25519Signer`] is the local implementation used by the CLI. Key
//! material never appears in `Debug` output and is not serializable.

use ed25519_dalek::Signer as _;
use zeroize::Zeroizing;

/// Errors produced while signing an invocation.
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    /// Seed material was malformed.
    #[error("invalid signer key: {0}")]
    InvalidKey(String),
    /// The signer refused or failed to sign.
    #[error("signing failed: {0}")]
    SigningFailed(String),
}

/// Identity plus signing capability authorizing vault requests.
pub trait InvocationSigner: Send + Sync {
    /// Identifier of the invoking key (a DID URL or URN).
    fn id(&self) -> &str;

    /// Sign an invocation payload.
    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, SignerError>;
}

/// Ed25519 invocation signer.
pub struct Ed25519Signer {
    id: String,
    signing_key: ed25519_dalek::SigningKey,
}

impl Ed25519Signer {
    /// Wrap an existing signing key.
    pub fn new(id: impl Into<String>, signing_key: ed25519_dalek::SigningKey) -> Self {
        Self {
            id: id.into(),
            signing_key,
        }
    }

    /// Generate a fresh key from the OS RNG.
    pub fn generate(id: impl Into<String>) -> Self {
        let signing_key = ed25519_dalek::SigningKey::generate(&mut rand::rngs::OsRng);
        Self::new(id, signing_key)
    }

    /// Derive the key from a 32-byte seed.
    pub fn from_seed(id: impl Into<String>, seed: &[u8; 32]) -> Self {
        Self::new(id, ed25519_dalek::SigningKey::from_bytes(seed))
    }

    /// Derive the key from a 64-character hex seed.
    pub fn from_seed_hex(id: impl Into<String>, seed_hex: &str) -> Result<Self, SignerError> {
        let bytes = Zeroizing::new(
            hex::decode(seed_hex.trim()).map_err(|e| SignerError::InvalidKey(e.to_string()))?,
        );
        let seed: Zeroizing<[u8; 32]> = Zeroizing::new(bytes.as_slice().try_into().map_err(|_| {
            SignerError::InvalidKey(format!("seed must be 32 bytes, got {}", bytes.len()))
        })?);
        Ok(Self::from_seed(id, &seed))
    }

    /// Hex-encoded Ed25519 public key.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.signing_key.verifying_key().as_bytes())
    }

    pub fn verifying_key(&self) -> ed25519_dalek::VerifyingKey {
        self.signing_key.verifying_key()
    }
}

impl InvocationSigner for Ed25519Signer {
    fn id(&self) -> &str {
        &self.id
    }

    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, SignerError> {
        Ok(self.signing_key.sign(payload).to_bytes().to_vec())
    }
}

impl std::fmt::Debug for Ed25519Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519Signer")
            .field("id", &self.id)
            .field("public_key", &self.public_key_hex())
            .finish()
    }
}
