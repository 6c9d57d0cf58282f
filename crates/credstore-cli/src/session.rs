//! A credential store bound to the snapshot vault for one CLI invocation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use credstore::CredentialStore;
use credstore_edv::MemoryVault;

use crate::config::CliConfig;

/// Open vault, signer, and store for the duration of a command.
#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    vault: Arc<MemoryVault>,
    store: CredentialStore,
}

impl Session {
    /// Load the snapshot, bind the signer, and declare the store indexes.
    pub async fn open(config: &CliConfig) -> Result<Self> {
        let vault = MemoryVault::open(&config.vault_path)
            .with_context(|| format!("opening vault snapshot {}", config.vault_path.display()))?
            .with_controller(config.controller.clone());
        let vault = Arc::new(vault);
        let signer = Arc::new(config.signer()?);
        let store = CredentialStore::new(vault.clone(), signer);
        store
            .initialize()
            .await
            .context("declaring credential indexes")?;
        Ok(Self {
            path: config.vault_path.clone(),
            vault,
            store,
        })
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of documents currently in the vault.
    pub fn document_count(&self) -> usize {
        self.vault.len()
    }

    /// Persist the vault state back to the snapshot file.
    pub fn commit(&self) -> Result<()> {
        self.vault
            .save(&self.path)
            .with_context(|| format!("writing vault snapshot {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), documents = self.vault.len(), "saved vault");
        Ok(())
    }
}
