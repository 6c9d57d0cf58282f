//! # Issuer Validation
//!
//! A Verifiable Credential carries a mandatory `issuer` that is either a
//! URI string or an object whose `id` is a URI string. The store indexes
//! every credential by that canonical identifier (`meta.issuer`), so it
//! must be derivable before a document is submitted.

use serde_json::Value;

use crate::error::ValidationError;

/// Extract the canonical issuer identifier from a credential payload.
///
/// - `"issuer": "did:example:123"` yields `did:example:123`.
/// - `"issuer": {"id": "did:example:123", ...}` yields `did:example:123`.
///
/// An absent, `null`, or empty-string issuer is reported as
/// [`ValidationError::MissingIssuer`]; every other shape as
/// [`ValidationError::InvalidIssuer`].
pub fn derive_issuer_id(credential: &Value) -> Result<String, ValidationError> {
    let issuer = match credential.get("issuer") {
        None | Some(Value::Null) => return Err(ValidationError::MissingIssuer),
        Some(Value::String(s)) if s.is_empty() => return Err(ValidationError::MissingIssuer),
        Some(issuer) => issuer,
    };

    match issuer {
        Value::String(id) => Ok(id.clone()),
        Value::Object(map) => match map.get("id") {
            Some(Value::String(id)) => Ok(id.clone()),
            Some(other) => Err(ValidationError::InvalidIssuer {
                found: format!("object with {} id", json_kind(other)),
            }),
            None => Err(ValidationError::InvalidIssuer {
                found: "object without id".to_string(),
            }),
        },
        other => Err(ValidationError::InvalidIssuer {
            found: json_kind(other).to_string(),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
