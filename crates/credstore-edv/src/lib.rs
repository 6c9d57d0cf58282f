//! # credstore-edv: Encrypted Data Vault collaborator contract
//!
//! The credential store never encrypts, persists, or authenticates anything
//! itself. It shapes requests to a document-store collaborator and maps the
//! responses back. This crate defines that boundary:
//!
//! - **[`DocumentStore`]**: the async trait every vault backend implements:
//!   `ensure_index`, `find`, `insert`, `delete`.
//! - **Documents and queries** ([`document`]): [`NewDocument`],
//!   [`VaultDocument`], [`EqualityClause`], [`IndexSpec`], [`FindResult`].
//! - **Invocation signers** ([`signer`]): the opaque capability object
//!   passed through unmodified to every vault call, with an Ed25519
//!   implementation.
//! - **[`MemoryVault`]**: an in-process reference backend with unique-index
//!   enforcement and JSON snapshot persistence, used by the CLI and tests.
//!
//! ## Query Semantics
//!
//! `find` receives a list of equality clauses. A document matches if it
//! satisfies at least one clause (OR across the list); within one clause
//! every attribute must match (AND across fields).

pub mod client;
pub mod document;
pub mod error;
pub mod memory;
pub mod signer;

pub use client::DocumentStore;
pub use document::{EqualityClause, FindResult, IndexSpec, NewDocument, VaultDocument};
pub use error::EdvError;
pub use memory::MemoryVault;
pub use signer::{Ed25519Signer, InvocationSigner, SignerError};
