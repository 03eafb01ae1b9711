//! # RawTransferRequest
//!
//! The loosely-typed input of one presentation request, exactly as the
//! wallet storage layer delivers it: per-document maps keyed
//! independently by document id, plus session-global fields.
//!
//! The maps are not required to share an identical id set — a document
//! may have payload bytes but no key material, or a format token but no
//! metadata. The assembler treats each map as an optional field per id.

use std::collections::HashMap;
use std::sync::Arc;

use mdt_core::{DisplayNames, DocumentId};
use mdt_zkp::ZkSystemRegistry;

/// One presentation request's raw materials.
///
/// Created once per request, immutable, and discarded after assembly.
/// Tokens are free text; byte fields are opaque at this layer.
#[derive(Debug, Clone, Default)]
pub struct RawTransferRequest {
    /// Document id → data-format token (e.g. `"cbor"`, `"sdjwt"`).
    pub data_formats: HashMap<DocumentId, String>,
    /// Document id → encoded document payload.
    pub document_data: HashMap<DocumentId, Vec<u8>>,
    /// Document id → key slot index within the document's secure area.
    pub document_key_indexes: HashMap<DocumentId, u32>,
    /// Document id → optional issuer metadata bytes.
    pub doc_metadata: HashMap<DocumentId, Option<Vec<u8>>>,
    /// Document id → optional display names for the document's fields.
    pub doc_display_names: HashMap<DocumentId, Option<DisplayNames>>,
    /// Document id → optional key-descriptor bytes (versioned record
    /// naming the secure area holding the document's private key).
    pub doc_key_descriptors: HashMap<DocumentId, Option<Vec<u8>>>,
    /// DER-encoded trust-anchor certificates.
    pub trust_anchors_der: Vec<Vec<u8>>,
    /// Device-auth-method token; unknown tokens resolve to MAC.
    pub device_auth_method: String,
    /// Document id → document-type token.
    pub doc_types: HashMap<DocumentId, String>,
    /// Document id → hashing-algorithm name (e.g. `"SHA-256"`).
    pub hashing_algs: HashMap<DocumentId, String>,
    /// Proof systems available for selective disclosure, if any.
    pub zk_registry: Option<Arc<ZkSystemRegistry>>,
}
