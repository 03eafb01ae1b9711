//! # Error Types — Validation and Token Parsing
//!
//! Construction-time validation errors for domain primitives and the
//! token-parsing errors produced at the assembly boundary. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Errors from domain-primitive construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Document identifiers are the join key across all per-document maps
    /// and must be non-empty.
    #[error("document id must be non-empty")]
    EmptyDocumentId,
}

/// Errors from parsing free-text wire tokens into closed enums.
///
/// A token error is non-fatal at the assembly layer — the affected
/// document is excluded from the corresponding output map and the
/// exclusion is reported as a diagnostic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The data-format token names no known document encoding.
    #[error("unrecognized data format token: {0:?}")]
    UnknownDataFormat(String),

    /// The document-type token names no known document type.
    #[error("unrecognized document type token: {0:?}")]
    UnknownDocType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_error_display_includes_token() {
        let err = TokenError::UnknownDataFormat("mdoc+weird".to_string());
        assert!(format!("{err}").contains("mdoc+weird"));

        let err = TokenError::UnknownDocType("org.example.unknown".to_string());
        assert!(format!("{err}").contains("org.example.unknown"));
    }

    #[test]
    fn validation_error_display() {
        let err = ValidationError::EmptyDocumentId;
        assert!(format!("{err}").contains("non-empty"));
    }
}
