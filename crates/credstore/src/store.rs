//! # Credential Store Facade
//!
//! [`CredentialStore`] maps verifiable credentials onto vault documents:
//!
//! - `content` holds the credential payload,
//! - `meta.issuer` holds the canonical issuer id derived on insert,
//! - `meta.displayable` and other caller metadata ride alongside.
//!
//! The store binds exactly one vault and one invocation signer at
//! construction and holds no other state. Every read goes to the vault.
//! Input errors are raised before any vault call; vault errors propagate
//! unchanged except a 404 on delete, which reads as "already absent".

use std::sync::Arc;

use credstore_core::{derive_issuer_id, OneOrMany};
use credstore_edv::{
    DocumentStore, EqualityClause, IndexSpec, InvocationSigner, NewDocument, VaultDocument,
};
use futures::future::try_join_all;
use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::query::{ExampleQuery, Query};
use crate::record::{
    CredentialRecord, FilterSpec, CONTENT_ID, CONTENT_TYPE, META_DISPLAYABLE, META_ISSUER,
};

/// Credential CRUD and matching over one vault.
#[derive(Clone)]
pub struct CredentialStore {
    vault: Arc<dyn DocumentStore>,
    signer: Arc<dyn InvocationSigner>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("signer", &self.signer.id())
            .finish_non_exhaustive()
    }
}

impl CredentialStore {
    /// Bind a store to one vault and the signer that authorizes its calls.
    pub fn new(vault: Arc<dyn DocumentStore>, signer: Arc<dyn InvocationSigner>) -> Self {
        Self { vault, signer }
    }

    /// Declare the indexes the store relies on:
    /// `(meta.issuer, meta.displayable, content.type)` and a unique index
    /// over `content.id`.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        self.vault
            .ensure_index(IndexSpec::new(vec![
                META_ISSUER.to_string(),
                META_DISPLAYABLE.to_string(),
                CONTENT_TYPE.to_string(),
            ]))
            .await?;
        self.vault
            .ensure_index(IndexSpec::unique(CONTENT_ID.to_string()))
            .await?;
        tracing::debug!("credential store indexes declared");
        Ok(())
    }

    /// Fetch the credential whose `content.id` is `id`.
    pub async fn get(&self, id: &str) -> Result<CredentialRecord, StoreError> {
        self.get_document(id).await.map(CredentialRecord::from)
    }

    /// Return every credential matching at least one filter.
    ///
    /// Each filter becomes one equality clause and all clauses go out in a
    /// single vault request. An empty filter list is rejected as a missing
    /// query.
    pub async fn find(
        &self,
        query: impl Into<OneOrMany<FilterSpec>>,
    ) -> Result<Vec<CredentialRecord>, StoreError> {
        let filters = query.into().into_vec();
        if filters.is_empty() {
            return Err(StoreError::Configuration(
                "find requires at least one filter".into(),
            ));
        }
        let clauses: Vec<EqualityClause> = filters.iter().map(FilterSpec::to_clause).collect();
        self.find_clauses(&clauses).await
    }

    /// Run a JSON `match` query and return the matching records.
    pub async fn match_query(&self, query: &Value) -> Result<Vec<CredentialRecord>, StoreError> {
        self.match_with(query, std::convert::identity).await
    }

    /// Run a JSON `match` query, mapping each record through `transform`.
    pub async fn match_with<T, F>(&self, query: &Value, transform: F) -> Result<Vec<T>, StoreError>
    where
        F: Fn(CredentialRecord) -> T,
    {
        let records = match Query::from_value(query)? {
            Query::ByExample(example) => self.match_example(&example).await?,
        };
        Ok(records.into_iter().map(transform).collect())
    }

    /// Run a typed query-by-example.
    ///
    /// Clauses are looked up concurrently and their results concatenated in
    /// clause order. Documents matching several clauses appear once per
    /// clause; no de-duplication is applied.
    pub async fn match_example(
        &self,
        query: &ExampleQuery,
    ) -> Result<Vec<CredentialRecord>, StoreError> {
        let per_clause = query.expand()?;
        tracing::debug!(
            clauses = per_clause.len(),
            criteria = per_clause.iter().map(Vec::len).sum::<usize>(),
            "expanded query by example"
        );

        let lookups = per_clause.into_iter().map(|filters| {
            let clauses: Vec<EqualityClause> =
                filters.iter().map(FilterSpec::to_clause).collect();
            async move { self.find_clauses(&clauses).await }
        });
        let results = try_join_all(lookups).await?;
        Ok(results.into_iter().flatten().collect())
    }

    /// Store a credential.
    ///
    /// `meta.issuer` is always overwritten with the issuer id derived from
    /// `credential`. Returns the stored record including its metadata.
    pub async fn insert(
        &self,
        credential: Value,
        meta: Option<Map<String, Value>>,
        doc_id: Option<String>,
    ) -> Result<CredentialRecord, StoreError> {
        let issuer = derive_issuer_id(&credential)?;
        let mut meta = meta.unwrap_or_default();
        meta.insert("issuer".to_string(), Value::String(issuer));

        let doc = NewDocument {
            id: doc_id,
            meta,
            content: credential,
        };
        let stored = self.vault.insert(doc, self.signer.as_ref()).await?;
        tracing::debug!(doc_id = %stored.id, "stored credential");
        Ok(stored.into())
    }

    /// Remove the credential whose `content.id` is `id`.
    ///
    /// Returns `false` when nothing was stored under `id`, including when
    /// the vault reports the document gone (404) between lookup and delete.
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let doc = match self.get_document(id).await {
            Ok(doc) => doc,
            Err(StoreError::NotFound { .. }) => return Ok(false),
            Err(e) => return Err(e),
        };
        match self.vault.delete(&doc, self.signer.as_ref()).await {
            Ok(deleted) => {
                tracing::debug!(doc_id = %doc.id, deleted, "deleted credential");
                Ok(deleted)
            }
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_document(&self, id: &str) -> Result<VaultDocument, StoreError> {
        let clause = EqualityClause::new().with(CONTENT_ID, id);
        let result = self
            .vault
            .find(std::slice::from_ref(&clause), self.signer.as_ref())
            .await?;
        // content.id is uniquely indexed; the first hit is the only one.
        result
            .documents
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    async fn find_clauses(
        &self,
        clauses: &[EqualityClause],
    ) -> Result<Vec<CredentialRecord>, StoreError> {
        let result = self.vault.find(clauses, self.signer.as_ref()).await?;
        Ok(result
            .documents
            .into_iter()
            .map(CredentialRecord::from)
            .collect())
    }
}
