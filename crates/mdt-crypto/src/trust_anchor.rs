//! # Trust Anchors and Certificate Parsing
//!
//! The fallible seam from raw DER bytes to a [`TrustAnchor`] handle used
//! by the session layer to validate issuer chains.
//!
//! [`DerCertificateParser`] validates the outer DER framing only — the
//! SEQUENCE tag and a definite length spanning the buffer exactly. Full
//! X.509 field parsing and chain building belong to the verification
//! component behind the [`CertificateParser`] trait.

use sha2::{Digest, Sha256};

use crate::error::CertificateError;

// ---------------------------------------------------------------------------
// TrustAnchor
// ---------------------------------------------------------------------------

/// A parsed trust-anchor certificate handle.
///
/// Holds the validated DER encoding. Two anchors are equal when their DER
/// bytes are equal.
#[derive(Clone, PartialEq, Eq)]
pub struct TrustAnchor {
    der: Vec<u8>,
}

impl TrustAnchor {
    /// The DER encoding of the certificate.
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    /// SHA-256 fingerprint of the DER encoding, lowercase hex.
    pub fn fingerprint_hex(&self) -> String {
        let digest = Sha256::digest(&self.der);
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Debug for TrustAnchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TrustAnchor({} bytes, {}…)",
            self.der.len(),
            &self.fingerprint_hex()[..8]
        )
    }
}

// ---------------------------------------------------------------------------
// CertificateParser
// ---------------------------------------------------------------------------

/// Fallible parser from DER bytes to a [`TrustAnchor`].
///
/// The trait is the extension point for a full X.509 implementation; the
/// assembly layer only requires that malformed input fails loudly.
pub trait CertificateParser: Send + Sync {
    /// Parse one DER-encoded certificate.
    fn parse(&self, der: &[u8]) -> Result<TrustAnchor, CertificateError>;
}

/// Validates the outer DER framing of a certificate blob.
///
/// Accepts a definite-length SEQUENCE whose declared length spans the
/// buffer exactly; rejects empty input, wrong tags, BER indefinite
/// lengths, and truncated or trailing bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DerCertificateParser;

impl DerCertificateParser {
    /// Create a parser.
    pub fn new() -> Self {
        Self
    }
}

impl CertificateParser for DerCertificateParser {
    fn parse(&self, der: &[u8]) -> Result<TrustAnchor, CertificateError> {
        let (&tag, after_tag) = der.split_first().ok_or(CertificateError::Empty)?;
        if tag != 0x30 {
            return Err(CertificateError::UnexpectedTag(tag));
        }

        let (&first_len, after_len) = after_tag
            .split_first()
            .ok_or(CertificateError::TruncatedHeader)?;
        let (declared, header_len) = match first_len {
            0x80 => return Err(CertificateError::IndefiniteLength),
            short if short < 0x80 => (short as usize, 2),
            long => {
                let width = (long & 0x7f) as usize;
                if width > 4 {
                    return Err(CertificateError::OversizedLength(width));
                }
                if after_len.len() < width {
                    return Err(CertificateError::TruncatedHeader);
                }
                let mut value = 0usize;
                for byte in &after_len[..width] {
                    value = (value << 8) | usize::from(*byte);
                }
                (value, 2 + width)
            }
        };

        let actual = der.len() - header_len;
        if declared != actual {
            return Err(CertificateError::LengthMismatch { declared, actual });
        }

        Ok(TrustAnchor { der: der.to_vec() })
    }
}
