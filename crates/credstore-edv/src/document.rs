//! Documents, equality queries, and index declarations.
//!
//! A vault document is `{id, meta, content}`. Attributes are addressed by
//! dotted paths rooted at the document (`content.type`, `meta.issuer`,
//! `content.id`).

use std::collections::BTreeMap;

use credstore_core::OneOrMany;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// -- Documents ----------------------------------------------------------------

/// A document submitted for insertion. `id` is optional; the vault assigns
/// one when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub meta: Map<String, Value>,
    pub content: Value,
}

/// A stored document as returned by the vault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultDocument {
    pub id: String,
    #[serde(default)]
    pub meta: Map<String, Value>,
    pub content: Value,
}

impl VaultDocument {
    /// Resolve a dotted attribute path against this document.
    ///
    /// `"id"` addresses the document id, `"meta.<path>"` and
    /// `"content.<path>"` walk nested objects. Any other root is absent.
    pub fn lookup(&self, path: &str) -> Option<Value> {
        let (root, rest) = match path.split_once('.') {
            Some((root, rest)) => (root, Some(rest)),
            None => (path, None),
        };
        match (root, rest) {
            ("id", None) => Some(Value::String(self.id.clone())),
            ("meta", Some(rest)) => walk_map(&self.meta, rest).cloned(),
            ("content", Some(rest)) => walk(&self.content, rest).cloned(),
            ("content", None) => Some(self.content.clone()),
            _ => None,
        }
    }
}

fn walk_map<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let (head, tail) = match path.split_once('.') {
        Some((head, tail)) => (head, Some(tail)),
        None => (path, None),
    };
    let next = map.get(head)?;
    match tail {
        Some(tail) => walk(next, tail),
        None => Some(next),
    }
}

fn walk<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    value.as_object().and_then(|map| walk_map(map, path))
}

// -- Queries ------------------------------------------------------------------

/// A conjunction of attribute equalities.
///
/// Keys are dotted attribute paths; values are the literals to match. An
/// empty clause matches every document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EqualityClause(BTreeMap<String, Value>);

impl EqualityClause {
    /// An empty clause.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(path.into(), value.into());
        self
    }

    /// Insert or replace one attribute constraint.
    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(path.into(), value.into());
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.0.get(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `doc` satisfies every constraint in this clause.
    ///
    /// A stored array matches when any of its elements equals the literal,
    /// so `content.type = "X"` matches `["VerifiableCredential", "X"]`.
    pub fn matches(&self, doc: &VaultDocument) -> bool {
        self.0.iter().all(|(path, expected)| match doc.lookup(path) {
            Some(Value::Array(items)) if !expected.is_array() => items.contains(expected),
            Some(actual) => &actual == expected,
            None => false,
        })
    }
}

/// Response of a `find` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FindResult {
    pub documents: Vec<VaultDocument>,
}

// -- Indexes ------------------------------------------------------------------

/// An index declaration over one or more attribute paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSpec {
    pub attribute: OneOrMany<String>,
    #[serde(default)]
    pub unique: bool,
}

impl IndexSpec {
    /// A non-unique index.
    pub fn new(attribute: impl Into<OneOrMany<String>>) -> Self {
        Self {
            attribute: attribute.into(),
            unique: false,
        }
    }

    /// A uniqueness-enforcing index.
    pub fn unique(attribute: impl Into<OneOrMany<String>>) -> Self {
        Self {
            attribute: attribute.into(),
            unique: true,
        }
    }

    pub fn attributes(&self) -> &[String] {
        self.attribute.as_slice()
    }
}
