//! # Document Store Client Trait
//!
//! Abstracts over the encrypted document vault the credential store talks
//! to. Backends own encryption, transport, authentication, durable storage,
//! and index maintenance; callers only shape requests and read responses.
//!
//! Every call receives the caller's [`InvocationSigner`], which backends
//! use to authorize the request. Callers pass it through unmodified.
//!
//! Implementations must be `Send + Sync` so one backend can be shared via
//! `Arc` across async tasks. The trait is object-safe.

use async_trait::async_trait;

use crate::document::{EqualityClause, FindResult, IndexSpec, NewDocument, VaultDocument};
use crate::error::EdvError;
use crate::signer::InvocationSigner;

/// An encrypted, indexed document vault.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Declare an index over one or more attribute paths.
    ///
    /// Declaring the same index twice is not an error.
    async fn ensure_index(&self, index: IndexSpec) -> Result<(), EdvError>;

    /// Return every document satisfying at least one clause in `equals`.
    async fn find(
        &self,
        equals: &[EqualityClause],
        signer: &dyn InvocationSigner,
    ) -> Result<FindResult, EdvError>;

    /// Store a new document and return it with its assigned id.
    ///
    /// Fails with a duplicate error when a unique index already holds one
    /// of the document's indexed values.
    async fn insert(
        &self,
        doc: NewDocument,
        signer: &dyn InvocationSigner,
    ) -> Result<VaultDocument, EdvError>;

    /// Remove a document. May fail with a 404-status error when the
    /// document is already absent.
    async fn delete(
        &self,
        doc: &VaultDocument,
        signer: &dyn InvocationSigner,
    ) -> Result<bool, EdvError>;
}
