//! # Query by Example
//!
//! Translates declarative "query by example" requests into the flat
//! equality filters the vault understands.
//!
//! ## Expansion
//!
//! Each [`ExampleClause`] names one or more credential types and zero or
//! more trusted issuers. It expands to the cross product:
//!
//! | types      | trusted issuers | filters                    |
//! |------------|-----------------|----------------------------|
//! | `A`        | none            | `{A}`                      |
//! | `[A, B]`   | `[x, y]`        | `{A,x} {A,y} {B,x} {B,y}`  |
//!
//! A clause with no trusted issuers matches its types across any issuer.
//! Every clause becomes one vault request; the store dispatches them
//! concurrently and concatenates results in clause order.

use credstore_core::OneOrMany;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::record::FilterSpec;

/// The only supported outer query `type`.
pub const QUERY_BY_EXAMPLE: &str = "QueryByExample";

/// A parsed `match` query.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// `{"type": "QueryByExample", "credentialQuery": ...}`.
    ByExample(ExampleQuery),
}

impl Query {
    /// Parse a JSON query document.
    ///
    /// Fails with [`StoreError::Configuration`] when `type` is missing or
    /// not `"QueryByExample"`, or when `credentialQuery` is missing, is not
    /// an object or array, or does not have the clause shape.
    pub fn from_value(value: &Value) -> Result<Self, StoreError> {
        let obj = value
            .as_object()
            .ok_or_else(|| StoreError::Configuration("query must be a JSON object".into()))?;

        match obj.get("type") {
            Some(Value::String(t)) if t == QUERY_BY_EXAMPLE => {}
            Some(Value::String(t)) => {
                return Err(StoreError::Configuration(format!(
                    "unsupported query type \"{t}\""
                )))
            }
            Some(other) => {
                return Err(StoreError::Configuration(format!(
                    "unsupported query type {other}"
                )))
            }
            None => {
                return Err(StoreError::Configuration(
                    "query \"type\" is required".into(),
                ))
            }
        }

        Ok(Self::ByExample(ExampleQuery::from_credential_query(
            obj.get("credentialQuery"),
        )?))
    }
}

/// `credentialQuery` of a `QueryByExample` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleQuery {
    /// The clauses, each looked up separately.
    pub credential_query: OneOrMany<ExampleClause>,
}

impl ExampleQuery {
    /// A query over one clause or a list of clauses.
    pub fn new(clauses: impl Into<OneOrMany<ExampleClause>>) -> Self {
        Self {
            credential_query: clauses.into(),
        }
    }

    fn from_credential_query(raw: Option<&Value>) -> Result<Self, StoreError> {
        let raw = match raw {
            None | Some(Value::Null) => {
                return Err(StoreError::Configuration(
                    "\"credentialQuery\" is required".into(),
                ))
            }
            Some(v @ (Value::Object(_) | Value::Array(_))) => v,
            Some(_) => {
                return Err(StoreError::Configuration(
                    "\"credentialQuery\" must be an object or an array".into(),
                ))
            }
        };
        let credential_query = serde_json::from_value(raw.clone()).map_err(|e| {
            StoreError::Configuration(format!("invalid \"credentialQuery\": {e}"))
        })?;
        Ok(Self { credential_query })
    }

    /// Expand every clause into its filter list, in clause order.
    ///
    /// All clauses are validated before anything is returned, so a bad
    /// clause anywhere fails the whole query.
    pub fn expand(&self) -> Result<Vec<Vec<FilterSpec>>, StoreError> {
        self.credential_query
            .iter()
            .map(ExampleClause::criteria)
            .collect()
    }
}

/// One `{example, trustedIssuer?}` entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleClause {
    /// The credential shape to match.
    #[serde(default)]
    pub example: Example,
    /// Issuers to accept. Absent or empty accepts any issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_issuer: Option<OneOrMany<TrustedIssuer>>,
}

impl ExampleClause {
    /// A clause matching `types` from any issuer.
    pub fn of_type(types: impl Into<OneOrMany<String>>) -> Self {
        Self {
            example: Example {
                credential_type: Some(types.into()),
                extra: Map::new(),
            },
            trusted_issuer: None,
        }
    }

    /// Restrict the clause to the given issuer ids.
    pub fn trusting<I, S>(mut self, issuers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let issuers: Vec<TrustedIssuer> = issuers.into_iter().map(TrustedIssuer::new).collect();
        self.trusted_issuer = Some(OneOrMany::Many(issuers));
        self
    }

    /// The type × issuer cross product for this clause.
    pub fn criteria(&self) -> Result<Vec<FilterSpec>, StoreError> {
        let types: Vec<&String> = match &self.example.credential_type {
            Some(types) if !types.is_empty() => types.iter().collect(),
            _ => {
                return Err(StoreError::Configuration(
                    "\"example.type\" is required".into(),
                ))
            }
        };

        let issuers = self
            .trusted_issuer
            .iter()
            .flatten()
            .map(|issuer| {
                issuer.id().ok_or_else(|| {
                    StoreError::NotSupported(format!(
                        "trusted issuer without a string \"id\": {}",
                        issuer.as_value()
                    ))
                })
            })
            .collect::<Result<Vec<&str>, _>>()?;

        let mut criteria = Vec::with_capacity(types.len() * issuers.len().max(1));
        for t in types {
            if issuers.is_empty() {
                criteria.push(FilterSpec::by_type(t.as_str()));
            } else {
                criteria.extend(
                    issuers
                        .iter()
                        .map(|issuer| FilterSpec::by_type(t.as_str()).with_issuer(*issuer)),
                );
            }
        }
        Ok(criteria)
    }
}

/// The `example` shape. Only `type` participates in matching; other fields
/// (`@context`, `credentialSubject`, ...) are kept but ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Example {
    /// One or more credential types.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub credential_type: Option<OneOrMany<String>>,
    /// Remaining example fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An entry of `trustedIssuer`.
///
/// Held as raw JSON so that entries without a string `id` survive parsing
/// and are reported as [`StoreError::NotSupported`] during expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedIssuer(Value);

impl TrustedIssuer {
    /// A trusted issuer entry `{"id": id}`.
    pub fn new(id: impl Into<String>) -> Self {
        let id: String = id.into();
        Self(serde_json::json!({ "id": id }))
    }

    /// The issuer id, when present and a string.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// The entry as written in the query.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}
