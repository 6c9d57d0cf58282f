//! CLI configuration.
//!
//! Resolved from environment variables, then overridden by command-line
//! flags. The signer seed is secret: it is held in [`Zeroizing`] storage
//! and redacted from `Debug` output.

use std::path::PathBuf;

use credstore_edv::Ed25519Signer;
use zeroize::Zeroizing;

/// Snapshot file used when `CREDSTORE_VAULT_PATH` is unset.
pub const DEFAULT_VAULT_PATH: &str = "credstore-vault.json";
/// Invoker id used when `CREDSTORE_CONTROLLER` is unset.
pub const DEFAULT_CONTROLLER: &str = "urn:credstore:local";

/// Resolved CLI configuration.
#[derive(Clone)]
pub struct CliConfig {
    /// Vault snapshot file.
    pub vault_path: PathBuf,
    /// Vault controller, also used as the signer id.
    pub controller: String,
    /// Hex-encoded Ed25519 seed. A fresh key is generated when absent.
    pub signer_seed: Option<Zeroizing<String>>,
}

impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("vault_path", &self.vault_path)
            .field("controller", &self.controller)
            .field(
                "signer_seed",
                &self.signer_seed.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CREDSTORE_VAULT_PATH` (default: `credstore-vault.json`)
    /// - `CREDSTORE_CONTROLLER` (default: `urn:credstore:local`)
    /// - `CREDSTORE_SIGNER_SEED` (optional, 64 hex characters)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vault_path = lookup("CREDSTORE_VAULT_PATH")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_VAULT_PATH));
        let controller = lookup("CREDSTORE_CONTROLLER")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTROLLER.to_string());
        let signer_seed = match lookup("CREDSTORE_SIGNER_SEED") {
            Some(raw) if !raw.trim().is_empty() => {
                let seed = Zeroizing::new(raw.trim().to_string());
                validate_seed(&seed)?;
                Some(seed)
            }
            _ => None,
        };
        Ok(Self {
            vault_path,
            controller,
            signer_seed,
        })
    }

    /// Apply `--vault` and `--controller` overrides.
    pub fn with_overrides(mut self, vault: Option<PathBuf>, controller: Option<String>) -> Self {
        if let Some(vault) = vault {
            self.vault_path = vault;
        }
        if let Some(controller) = controller {
            self.controller = controller;
        }
        self
    }

    /// Build the invocation signer for this configuration.
    pub fn signer(&self) -> Result<Ed25519Signer, ConfigError> {
        match &self.signer_seed {
            Some(seed) => Ed25519Signer::from_seed_hex(self.controller.clone(), seed)
                .map_err(|e| ConfigError::InvalidSeed(e.to_string())),
            None => {
                tracing::debug!("no signer seed configured; generating an ephemeral key");
                Ok(Ed25519Signer::generate(self.controller.clone()))
            }
        }
    }
}

fn validate_seed(seed: &str) -> Result<(), ConfigError> {
    let bytes = Zeroizing::new(
        hex::decode(seed).map_err(|e| ConfigError::InvalidSeed(e.to_string()))?,
    );
    if bytes.len() != 32 {
        return Err(ConfigError::InvalidSeed(format!(
            "expected 32 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CREDSTORE_SIGNER_SEED is invalid: {0}")]
    InvalidSeed(String),
}
