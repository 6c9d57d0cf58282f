//! # Validation Errors
//!
//! Structured errors for credential content that violates the issuer-shape
//! invariant. Raised before any collaborator call is attempted.

use thiserror::Error;

/// Credential content failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The credential has no `issuer` field.
    #[error("credential is missing the required \"issuer\" field")]
    MissingIssuer,

    /// The `issuer` field is neither a string nor an object with a string `id`.
    #[error("credential \"issuer\" must be a string or an object with a string \"id\"; found {found}")]
    InvalidIssuer {
        /// JSON kind of the offending value (e.g. "number", "object without id").
        found: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_issuer_display() {
        let msg = format!("{}", ValidationError::MissingIssuer);
        assert!(msg.contains("issuer"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn invalid_issuer_display_names_found_kind() {
        let err = ValidationError::InvalidIssuer {
            found: "number".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("number"));
        assert!(msg.contains("string \"id\""));
    }
}
