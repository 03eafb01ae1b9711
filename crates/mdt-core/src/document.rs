//! # Document Identifiers and Wire Tokens
//!
//! The per-document vocabulary of a presentation transfer: the opaque
//! [`DocumentId`] join key, the closed token enums ([`DataFormat`],
//! [`DocType`], [`DeviceAuthMethod`]) parsed from free-text wire tokens,
//! and the display-name structure carried alongside a document's payload.
//!
//! ## Token Parsing
//!
//! Wire tokens arrive as free text from loosely-typed external records.
//! [`DataFormat`] and [`DocType`] parse fallibly — an unrecognized token
//! is a [`TokenError`] the caller turns into a per-document exclusion.
//! [`DeviceAuthMethod`] instead resolves infallibly: an unknown token
//! falls back to [`DeviceAuthMethod::Mac`], the documented default.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{TokenError, ValidationError};

/// A namespace within a document (e.g. `org.iso.18013.5.1`).
pub type NameSpace = String;

/// A data-element identifier within a namespace (e.g. `family_name`).
pub type DataElementIdentifier = String;

/// Display names for a document's data elements, keyed by namespace and
/// then by data-element identifier.
pub type DisplayNames = HashMap<NameSpace, HashMap<DataElementIdentifier, String>>;

// ---------------------------------------------------------------------------
// DocumentId
// ---------------------------------------------------------------------------

/// An opaque identifier for one document within a presentation session.
///
/// The document id is the join key across every per-document map of a
/// transfer request. It is caller-supplied and opaque — this layer only
/// requires that it is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create a document id from a string, validating non-emptiness.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyDocumentId`] for the empty string.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.is_empty() {
            return Err(ValidationError::EmptyDocumentId);
        }
        Ok(Self(s))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DocumentId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ---------------------------------------------------------------------------
// DataFormat
// ---------------------------------------------------------------------------

/// The encoding of a document's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    /// ISO 18013-5 `mso_mdoc` CBOR encoding.
    Cbor,
    /// IETF SD-JWT VC encoding.
    SdJwt,
}

impl DataFormat {
    /// Parse a data-format wire token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::UnknownDataFormat`] for unrecognized tokens.
    pub fn parse_token(token: &str) -> Result<Self, TokenError> {
        match token {
            "cbor" => Ok(Self::Cbor),
            "sdjwt" => Ok(Self::SdJwt),
            other => Err(TokenError::UnknownDataFormat(other.to_string())),
        }
    }

    /// The wire token for this format.
    pub fn as_token(&self) -> &'static str {
        match self {
            Self::Cbor => "cbor",
            Self::SdJwt => "sdjwt",
        }
    }
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

impl std::str::FromStr for DataFormat {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_token(s)
    }
}

// ---------------------------------------------------------------------------
// DocType
// ---------------------------------------------------------------------------

/// The type of a document offered for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocType {
    /// ISO 18013-5 mobile driving licence (`org.iso.18013.5.1.mDL`).
    IsoMdl,
    /// EUDI person identification data (`eu.europa.ec.eudi.pid.1`).
    EuPid,
}

impl DocType {
    /// Parse a document-type wire token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::UnknownDocType`] for unrecognized tokens.
    pub fn parse_token(token: &str) -> Result<Self, TokenError> {
        match token {
            "org.iso.18013.5.1.mDL" => Ok(Self::IsoMdl),
            "eu.europa.ec.eudi.pid.1" => Ok(Self::EuPid),
            other => Err(TokenError::UnknownDocType(other.to_string())),
        }
    }

    /// The wire token for this document type.
    pub fn as_token(&self) -> &'static str {
        match self {
            Self::IsoMdl => "org.iso.18013.5.1.mDL",
            Self::EuPid => "eu.europa.ec.eudi.pid.1",
        }
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

impl std::str::FromStr for DocType {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_token(s)
    }
}

// ---------------------------------------------------------------------------
// DeviceAuthMethod
// ---------------------------------------------------------------------------

/// The mechanism by which the holder's device authenticates a
/// presentation session (ISO 18013-5 §9.1.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceAuthMethod {
    /// Device MAC over the session transcript (ECKA-DH derived key).
    Mac,
    /// Device signature over the session transcript.
    Signature,
}

impl DeviceAuthMethod {
    /// Resolve a device-auth-method wire token.
    ///
    /// Unknown tokens resolve to [`DeviceAuthMethod::Mac`] — the
    /// documented default, never an error.
    pub fn resolve_token(token: &str) -> Self {
        match token {
            "deviceSignature" => Self::Signature,
            "deviceMac" => Self::Mac,
            _ => Self::Mac,
        }
    }

    /// The wire token for this method.
    pub fn as_token(&self) -> &'static str {
        match self {
            Self::Mac => "deviceMac",
            Self::Signature => "deviceSignature",
        }
    }
}

impl std::fmt::Display for DeviceAuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}
