//! Credential records and filter specs.
//!
//! A [`CredentialRecord`] is the caller's view of a vault document:
//! `{content, meta, documentId}`. A [`FilterSpec`] is one conjunctive
//! filter over the indexed attributes, mapped to a vault equality clause.

use credstore_edv::{EqualityClause, VaultDocument};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute path of the credential identifier (unique index).
pub const CONTENT_ID: &str = "content.id";
/// Attribute path of the credential type.
pub const CONTENT_TYPE: &str = "content.type";
/// Attribute path of the canonical issuer identifier.
pub const META_ISSUER: &str = "meta.issuer";
/// Attribute path of the displayable flag.
pub const META_DISPLAYABLE: &str = "meta.displayable";

/// A stored credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    /// The credential payload as supplied on insert.
    pub content: Value,
    /// Caller metadata plus the derived `issuer`.
    pub meta: Map<String, Value>,
    /// Identifier of the underlying vault document.
    pub document_id: String,
}

impl CredentialRecord {
    /// The derived issuer identifier, if present in `meta`.
    pub fn issuer(&self) -> Option<&str> {
        self.meta.get("issuer").and_then(Value::as_str)
    }
}

impl From<VaultDocument> for CredentialRecord {
    fn from(doc: VaultDocument) -> Self {
        Self {
            content: doc.content,
            meta: doc.meta,
            document_id: doc.id,
        }
    }
}

/// One filter over `type`, `issuer`, and `displayable`. Only present
/// fields constrain the match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Matched against `content.type`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub credential_type: Option<String>,
    /// Matched against `meta.issuer`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// Matched against `meta.displayable`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayable: Option<bool>,
}

impl FilterSpec {
    /// Filter on `content.type` only.
    pub fn by_type(credential_type: impl Into<String>) -> Self {
        Self {
            credential_type: Some(credential_type.into()),
            ..Self::default()
        }
    }

    /// Filter on `meta.issuer` only.
    pub fn by_issuer(issuer: impl Into<String>) -> Self {
        Self {
            issuer: Some(issuer.into()),
            ..Self::default()
        }
    }

    /// Add a `meta.issuer` constraint.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Add a `meta.displayable` constraint.
    pub fn with_displayable(mut self, displayable: bool) -> Self {
        self.displayable = Some(displayable);
        self
    }

    /// The vault equality clause for this filter.
    pub fn to_clause(&self) -> EqualityClause {
        let mut clause = EqualityClause::new();
        if let Some(t) = &self.credential_type {
            clause.insert(CONTENT_TYPE, t.as_str());
        }
        if let Some(issuer) = &self.issuer {
            clause.insert(META_ISSUER, issuer.as_str());
        }
        if let Some(displayable) = self.displayable {
            clause.insert(META_DISPLAYABLE, displayable);
        }
        clause
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_present_fields_become_constraints() {
        let clause = FilterSpec::by_type("AlumniCredential").to_clause();
        assert_eq!(clause.len(), 1);
        assert_eq!(clause.get(CONTENT_TYPE), Some(&json!("AlumniCredential")));

        let full = FilterSpec::by_type("A")
            .with_issuer("did:example:u")
            .with_displayable(false)
            .to_clause();
        assert_eq!(
            serde_json::to_value(&full).unwrap(),
            json!({"content.type": "A", "meta.issuer": "did:example:u", "meta.displayable": false})
        );
    }

    #[test]
    fn filter_spec_parses_wire_names() {
        let spec: FilterSpec =
            serde_json::from_value(json!({"type": "A", "displayable": true})).unwrap();
        assert_eq!(spec.credential_type.as_deref(), Some("A"));
        assert_eq!(spec.issuer, None);
        assert_eq!(spec.displayable, Some(true));
    }

    #[test]
    fn record_serializes_document_id_in_camel_case() {
        let record = CredentialRecord::from(VaultDocument {
            id: "doc-1".into(),
            meta: Map::new(),
            content: json!({"id": "urn:1"}),
        });
        let v = serde_json::to_value(&record).unwrap();
        assert_eq!(v["documentId"], "doc-1");
        assert_eq!(v["content"]["id"], "urn:1");
    }
}
