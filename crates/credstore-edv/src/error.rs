//! Vault collaborator error types.

use crate::signer::SignerError;

/// Errors surfaced by a [`DocumentStore`](crate::DocumentStore) backend.
///
/// Every variant maps to an HTTP-like status via [`EdvError::status`] so
/// callers can classify failures the same way regardless of backend.
#[derive(Debug, thiserror::Error)]
pub enum EdvError {
    /// The vault rejected the request with a status code.
    #[error("vault {operation} returned {status}: {message}")]
    Status {
        operation: String,
        status: u16,
        message: String,
    },
    /// A unique index already holds this value.
    #[error("duplicate document: {attribute} = {value} is already indexed")]
    Duplicate { attribute: String, value: String },
    /// The invocation signer could not produce a signature.
    #[error("invocation signing failed: {0}")]
    Signer(#[from] SignerError),
    /// Snapshot file I/O failed.
    #[error("vault snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Snapshot (de)serialization failed.
    #[error("vault snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EdvError {
    /// Build a [`EdvError::Status`] error.
    pub fn status_error(operation: &str, status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            operation: operation.to_string(),
            status,
            message: message.into(),
        }
    }

    /// HTTP-like status classification, when the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Duplicate { .. } => Some(409),
            Self::Signer(_) => Some(401),
            Self::Io(_) | Self::Json(_) => None,
        }
    }

    /// `true` when the vault reported the target as absent (404).
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// `true` when the vault rejected a write as a duplicate (409).
    pub fn is_duplicate(&self) -> bool {
        self.status() == Some(409)
    }
}
