//! # TransferAssembler
//!
//! Joins the independently-keyed maps of a [`RawTransferRequest`] into a
//! validated [`TransferContext`].
//!
//! ## Failure Policy
//!
//! - **Fatal**: a malformed trust-anchor blob aborts the whole assembly.
//!   No partial context is produced.
//! - **Per-document**: an unrecognized format or doc-type token, or
//!   unresolvable key material, excludes the document from that output
//!   map only. Every exclusion is recorded as a [`SkippedEntry`] so the
//!   caller can tell why a document is missing from a map.
//! - **Defaulted**: an unknown device-auth-method token resolves to MAC.
//!
//! Assembly is synchronous, CPU-only, and deterministic given identical
//! inputs and secure-area registry contents. Per-document maps are
//! processed in document-id order so diagnostics are stably ordered.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use thiserror::Error;

use mdt_core::{DataFormat, DeviceAuthMethod, DocType, DocumentId};
use mdt_crypto::{CertificateError, CertificateParser, DerCertificateParser, SecureAreaRegistry};

use crate::context::TransferContext;
use crate::key_material::KeyMaterialResolver;
use crate::request::RawTransferRequest;

/// Fatal assembly errors.
#[derive(Error, Debug)]
pub enum AssemblyError {
    /// A trust-anchor blob failed certificate parsing. The whole
    /// assembly is invalid; no partial context is produced.
    #[error("malformed trust anchor at index {index}: {source}")]
    MalformedTrustAnchor {
        /// Position of the offending blob in the trust-anchor list.
        index: usize,
        /// The underlying parse failure.
        source: CertificateError,
    },
}

/// The output map a document was excluded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffectedMap {
    /// The data-format map.
    Format,
    /// The document-type map.
    DocType,
    /// The private-key map.
    PrivateKey,
}

impl std::fmt::Display for AffectedMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format => f.write_str("format"),
            Self::DocType => f.write_str("doc-type"),
            Self::PrivateKey => f.write_str("private-key"),
        }
    }
}

/// One per-document exclusion, surfaced alongside the assembled context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// The excluded document.
    pub document_id: DocumentId,
    /// The map the document was excluded from.
    pub map: AffectedMap,
    /// Human-readable reason, for operator diagnostics.
    pub reason: String,
}

/// A successful assembly: the validated context plus the list of
/// per-document exclusions applied while building it.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// The validated transfer context.
    pub context: TransferContext,
    /// Per-document exclusions, in document-id order per map.
    pub skipped: Vec<SkippedEntry>,
}

/// Assembles raw transfer requests into validated transfer contexts.
///
/// Holds read-only collaborators: the key-material resolver (over the
/// shared secure-area registry) and the certificate parser. Independent
/// `assemble` calls share no mutable state and may run in parallel.
pub struct TransferAssembler {
    resolver: KeyMaterialResolver,
    certificate_parser: Box<dyn CertificateParser>,
}

impl TransferAssembler {
    /// Create an assembler over a shared secure-area registry, using the
    /// DER framing validator for trust anchors.
    pub fn new(secure_areas: Arc<SecureAreaRegistry>) -> Self {
        Self {
            resolver: KeyMaterialResolver::new(secure_areas),
            certificate_parser: Box::new(DerCertificateParser::new()),
        }
    }

    /// Replace the certificate parser (e.g. with a full X.509
    /// implementation).
    pub fn with_certificate_parser(mut self, parser: Box<dyn CertificateParser>) -> Self {
        self.certificate_parser = parser;
        self
    }

    /// Assemble one raw request into a validated context.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::MalformedTrustAnchor`] on the first
    /// trust-anchor blob that fails parsing; per-document problems are
    /// never errors — they exclude the document from the affected map
    /// and appear in [`Assembly::skipped`].
    pub fn assemble(&self, raw: &RawTransferRequest) -> Result<Assembly, AssemblyError> {
        let mut skipped = Vec::new();

        // Trust anchors: all-or-nothing.
        let mut trust_anchors = Vec::with_capacity(raw.trust_anchors_der.len());
        for (index, der) in raw.trust_anchors_der.iter().enumerate() {
            let anchor = self
                .certificate_parser
                .parse(der)
                .map_err(|source| AssemblyError::MalformedTrustAnchor { index, source })?;
            trust_anchors.push(anchor);
        }

        // Format tokens: unrecognized tokens drop the id from this map only.
        let mut data_formats = HashMap::new();
        for (id, token) in sorted(&raw.data_formats) {
            match DataFormat::parse_token(token) {
                Ok(format) => {
                    data_formats.insert(id.clone(), format);
                }
                Err(err) => exclude(&mut skipped, id, AffectedMap::Format, &err),
            }
        }

        // Doc-type tokens: same partial-exclusion policy as formats.
        let mut doc_types = HashMap::new();
        for (id, token) in sorted(&raw.doc_types) {
            match DocType::parse_token(token) {
                Ok(doc_type) => {
                    doc_types.insert(id.clone(), doc_type);
                }
                Err(err) => exclude(&mut skipped, id, AffectedMap::DocType, &err),
            }
        }

        // Key material: a document is a candidate if either input map
        // mentions it; both must be present and resolvable.
        let mut key_candidates: BTreeSet<&DocumentId> = raw.doc_key_descriptors.keys().collect();
        key_candidates.extend(raw.document_key_indexes.keys());

        let mut private_keys = HashMap::new();
        for id in key_candidates {
            let descriptor_bytes = raw
                .doc_key_descriptors
                .get(id)
                .and_then(|maybe| maybe.as_deref());
            let index = raw.document_key_indexes.get(id).copied();
            match self.resolver.resolve(id, descriptor_bytes, index) {
                Ok(handle) => {
                    private_keys.insert(id.clone(), handle);
                }
                Err(err) => exclude(&mut skipped, id, AffectedMap::PrivateKey, &err),
            }
        }

        // Nested-optional metadata and display names collapse to
        // present-or-omitted.
        let doc_metadata = raw
            .doc_metadata
            .iter()
            .filter_map(|(id, maybe)| maybe.as_ref().map(|bytes| (id.clone(), bytes.clone())))
            .collect();
        let doc_display_names = raw
            .doc_display_names
            .iter()
            .filter_map(|(id, maybe)| maybe.as_ref().map(|names| (id.clone(), names.clone())))
            .collect();

        let device_auth_method = DeviceAuthMethod::resolve_token(&raw.device_auth_method);

        let context = TransferContext {
            data_formats,
            documents: raw.document_data.clone(),
            doc_metadata,
            doc_display_names,
            private_keys,
            trust_anchors,
            device_auth_method,
            doc_types,
            hashing_algs: raw.hashing_algs.clone(),
            zk_registry: raw.zk_registry.clone(),
        };

        tracing::debug!(
            documents = context.documents.len(),
            signable = context.private_keys.len(),
            trust_anchors = context.trust_anchors.len(),
            skipped = skipped.len(),
            device_auth = %context.device_auth_method,
            "assembled transfer context"
        );
        Ok(Assembly { context, skipped })
    }
}

impl std::fmt::Debug for TransferAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferAssembler")
            .field("resolver", &self.resolver)
            .finish()
    }
}

/// Record one per-document exclusion and log it.
fn exclude(
    skipped: &mut Vec<SkippedEntry>,
    id: &DocumentId,
    map: AffectedMap,
    reason: &dyn std::fmt::Display,
) {
    tracing::warn!(document_id = %id, map = %map, reason = %reason, "document excluded from output map");
    skipped.push(SkippedEntry {
        document_id: id.clone(),
        map,
        reason: reason.to_string(),
    });
}

/// Map entries in document-id order, for deterministic processing.
fn sorted<'a, V>(map: &'a HashMap<DocumentId, V>) -> Vec<(&'a DocumentId, &'a V)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}
