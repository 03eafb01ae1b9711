//! # Cryptographic Error Types
//!
//! Structured errors for secure-area operations and trust-anchor parsing.
//! Uses `thiserror` for derive-based `Display` and `Error` implementations
//! with diagnostic context.

use thiserror::Error;

/// Errors from secure-area operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// No secure area is registered under the requested name.
    #[error("no secure area registered under name {0:?}")]
    UnknownSecureArea(String),

    /// The secure area holds no key at the requested slot.
    #[error("secure area {area:?} has no key at slot {slot}")]
    SlotNotFound {
        /// Name of the secure area.
        area: String,
        /// The requested key slot.
        slot: u32,
    },

    /// Key material could not be imported or interpreted.
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// A public key could not be parsed or encoded.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// The signing operation itself failed.
    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// The backend does not support the requested operation.
    #[error("not implemented: {0}")]
    NotImplemented(String),
}

/// Errors from parsing a trust-anchor certificate blob.
///
/// A single malformed blob invalidates an entire assembly — callers must
/// not produce partial output on certificate failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CertificateError {
    /// The certificate data is empty.
    #[error("certificate data is empty")]
    Empty,

    /// The outermost DER element is not a SEQUENCE.
    #[error("expected DER SEQUENCE tag 0x30, found {0:#04x}")]
    UnexpectedTag(u8),

    /// The DER length header is cut short.
    #[error("truncated DER length header")]
    TruncatedHeader,

    /// Indefinite lengths are BER-only and invalid in DER.
    #[error("indefinite length encoding is not valid in DER")]
    IndefiniteLength,

    /// The length field is wider than this parser supports.
    #[error("DER length field of {0} bytes exceeds supported range")]
    OversizedLength(usize),

    /// The declared content length does not span the buffer exactly.
    #[error("declared DER length {declared} does not match {actual} content bytes")]
    LengthMismatch {
        /// Content length declared by the DER header.
        declared: usize,
        /// Content bytes actually present after the header.
        actual: usize,
    },
}
