//! # In-Memory Reference Vault
//!
//! A [`DocumentStore`] that keeps documents in process, in insertion order,
//! behind a `parking_lot::RwLock`. It reproduces the vault behaviours the
//! credential store relies on:
//!
//! - OR-across-clauses / AND-within-clause `find`, one hit per document;
//! - unique indexes enforced on insert once declared via `ensure_index`;
//! - 404 on deleting an absent document;
//! - optional controller check on the invoking signer (403 on mismatch).
//!
//! The whole state (documents and declared indexes) can be written to and
//! read from a JSON snapshot file, which is how the CLI persists between
//! invocations. No encryption is applied to snapshots.

use std::path::Path;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::DocumentStore;
use crate::document::{EqualityClause, FindResult, IndexSpec, NewDocument, VaultDocument};
use crate::error::EdvError;
use crate::signer::InvocationSigner;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    indexes: Vec<IndexSpec>,
    #[serde(default)]
    documents: Vec<VaultDocument>,
}

/// In-process document vault.
#[derive(Debug, Default)]
pub struct MemoryVault {
    state: RwLock<Snapshot>,
    controller: Option<String>,
}

impl MemoryVault {
    /// An empty vault accepting any invoker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict invocations to signers whose id equals `controller`.
    pub fn with_controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    /// Load a vault from a snapshot file. A missing file yields an empty vault.
    pub fn open(path: &Path) -> Result<Self, EdvError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no vault snapshot; starting empty");
            return Ok(Self::new());
        }
        let raw = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&raw)?;
        tracing::debug!(
            path = %path.display(),
            documents = snapshot.documents.len(),
            indexes = snapshot.indexes.len(),
            "loaded vault snapshot"
        );
        Ok(Self {
            state: RwLock::new(snapshot),
            controller: None,
        })
    }

    /// Write the current state to a snapshot file.
    pub fn save(&self, path: &Path) -> Result<(), EdvError> {
        let json = {
            let state = self.state.read();
            serde_json::to_string_pretty(&*state)?
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.state.read().documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Indexes declared so far, in declaration order.
    pub fn indexes(&self) -> Vec<IndexSpec> {
        self.state.read().indexes.clone()
    }

    fn authorize(
        &self,
        operation: &str,
        target: &str,
        signer: &dyn InvocationSigner,
    ) -> Result<(), EdvError> {
        if let Some(controller) = &self.controller {
            if signer.id() != controller {
                return Err(EdvError::status_error(
                    operation,
                    403,
                    format!("invoker {} is not the vault controller", signer.id()),
                ));
            }
        }
        signer.sign(format!("{operation}:{target}").as_bytes())?;
        Ok(())
    }
}

/// Values of `index` on `doc`, or `None` if any attribute is absent.
fn index_key(index: &IndexSpec, doc: &VaultDocument) -> Option<Vec<Value>> {
    index
        .attributes()
        .iter()
        .map(|path| doc.lookup(path))
        .collect()
}

fn render_key(key: &[Value]) -> String {
    key.iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn check_unique(
    index: &IndexSpec,
    candidate: &VaultDocument,
    existing: &[VaultDocument],
) -> Result<(), EdvError> {
    let Some(key) = index_key(index, candidate) else {
        return Ok(());
    };
    let clash = existing
        .iter()
        .filter(|doc| doc.id != candidate.id)
        .any(|doc| index_key(index, doc).as_deref() == Some(key.as_slice()));
    if clash {
        return Err(EdvError::Duplicate {
            attribute: index.attributes().join(","),
            value: render_key(&key),
        });
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for MemoryVault {
    async fn ensure_index(&self, index: IndexSpec) -> Result<(), EdvError> {
        let mut state = self.state.write();
        if state.indexes.contains(&index) {
            return Ok(());
        }
        if index.unique {
            for doc in &state.documents {
                check_unique(&index, doc, &state.documents).map_err(|e| {
                    EdvError::status_error(
                        "ensure_index",
                        409,
                        format!("existing documents violate unique index: {e}"),
                    )
                })?;
            }
        }
        tracing::debug!(attributes = ?index.attributes(), unique = index.unique, "declared index");
        state.indexes.push(index);
        Ok(())
    }

    async fn find(
        &self,
        equals: &[EqualityClause],
        signer: &dyn InvocationSigner,
    ) -> Result<FindResult, EdvError> {
        self.authorize("find", "query", signer)?;
        let state = self.state.read();
        let documents: Vec<VaultDocument> = state
            .documents
            .iter()
            .filter(|doc| equals.iter().any(|clause| clause.matches(doc)))
            .cloned()
            .collect();
        tracing::trace!(clauses = equals.len(), hits = documents.len(), "vault find");
        Ok(FindResult { documents })
    }

    async fn insert(
        &self,
        doc: NewDocument,
        signer: &dyn InvocationSigner,
    ) -> Result<VaultDocument, EdvError> {
        let id = doc
            .id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        self.authorize("insert", &id, signer)?;

        let stored = VaultDocument {
            id,
            meta: doc.meta,
            content: doc.content,
        };

        let mut state = self.state.write();
        if state.documents.iter().any(|d| d.id == stored.id) {
            return Err(EdvError::Duplicate {
                attribute: "id".to_string(),
                value: stored.id,
            });
        }
        for index in state.indexes.iter().filter(|i| i.unique) {
            check_unique(index, &stored, &state.documents)?;
        }
        tracing::debug!(doc_id = %stored.id, "vault insert");
        state.documents.push(stored.clone());
        Ok(stored)
    }

    async fn delete(
        &self,
        doc: &VaultDocument,
        signer: &dyn InvocationSigner,
    ) -> Result<bool, EdvError> {
        self.authorize("delete", &doc.id, signer)?;
        let mut state = self.state.write();
        let Some(position) = state.documents.iter().position(|d| d.id == doc.id) else {
            return Err(EdvError::status_error(
                "delete",
                404,
                format!("document {} not found", doc.id),
            ));
        };
        state.documents.remove(position);
        tracing::debug!(doc_id = %doc.id, "vault delete");
        Ok(true)
    }
}
