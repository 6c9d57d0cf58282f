//! # credstore: Verifiable Credential Store
//!
//! Stores verifiable credentials in an encrypted document vault and finds
//! them again by type, issuer, and display flag.
//!
//! - **Store** ([`store`]): [`CredentialStore`] with `initialize`, `get`,
//!   `find`, `match_query`, `insert`, and `delete`.
//! - **Query by example** ([`query`]): parses `QueryByExample` documents
//!   and expands each clause into the type × trusted-issuer filter set.
//! - **Records** ([`record`]): [`CredentialRecord`] and [`FilterSpec`].
//!
//! The vault is reached only through [`credstore_edv::DocumentStore`]; the
//! store never encrypts, persists, or retries on its own.
//!
//! ```ignore
//! let store = CredentialStore::new(Arc::new(MemoryVault::new()), Arc::new(signer));
//! store.initialize().await?;
//! store.insert(credential, None, None).await?;
//! let alumni = store
//!     .match_query(&json!({
//!         "type": "QueryByExample",
//!         "credentialQuery": {"example": {"type": "AlumniCredential"}}
//!     }))
//!     .await?;
//! ```

pub mod error;
pub mod query;
pub mod record;
pub mod store;

pub use credstore_core::OneOrMany;
pub use error::StoreError;
pub use query::{Example, ExampleClause, ExampleQuery, Query, TrustedIssuer, QUERY_BY_EXAMPLE};
pub use record::{CredentialRecord, FilterSpec};
pub use store::CredentialStore;
