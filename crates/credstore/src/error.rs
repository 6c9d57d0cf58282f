//! # Credential Store Errors
//!
//! One closed enum covers every failure the store reports. Configuration,
//! validation, and not-supported errors are raised before any vault call;
//! collaborator errors pass through unchanged.

use credstore_core::ValidationError;
use credstore_edv::EdvError;
use thiserror::Error;

/// Errors returned by [`CredentialStore`](crate::CredentialStore) operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Malformed or missing query input.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Credential content violates the issuer-shape invariant.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Structurally valid input the store does not support, such as a
    /// trusted issuer without an `id`.
    #[error("not supported: {0}")]
    NotSupported(String),

    /// A single-credential lookup found nothing.
    #[error("credential not found: {id}")]
    NotFound {
        /// The `content.id` that was looked up.
        id: String,
    },

    /// Failure surfaced unmodified from the document vault.
    #[error(transparent)]
    Collaborator(#[from] EdvError),
}
