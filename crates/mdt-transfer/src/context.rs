//! # TransferContext
//!
//! The validated output of assembly: everything the session layer needs
//! to run one presentation exchange. Produced once, consumed for the
//! lifetime of the exchange, then discarded.

use std::collections::HashMap;
use std::sync::Arc;

use mdt_core::{DataFormat, DeviceAuthMethod, DisplayNames, DocType, DocumentId};
use mdt_crypto::TrustAnchor;
use mdt_zkp::ZkSystemRegistry;

use crate::key_material::PrivateKeyHandle;

/// The validated bundle for one presentation session.
///
/// Per-document maps share the document-id key space of the raw request
/// but are individually partial: a document excluded from one map by the
/// assembly policy still appears in the others. Optional inputs that
/// were absent are omitted from their map rather than stored as empty
/// values.
#[derive(Debug, Clone)]
pub struct TransferContext {
    /// Document id → resolved payload encoding.
    pub data_formats: HashMap<DocumentId, DataFormat>,
    /// Document id → encoded document payload.
    pub documents: HashMap<DocumentId, Vec<u8>>,
    /// Document id → issuer metadata (present entries only).
    pub doc_metadata: HashMap<DocumentId, Vec<u8>>,
    /// Document id → field display names (present entries only).
    pub doc_display_names: HashMap<DocumentId, DisplayNames>,
    /// Document id → non-extractable private-key handle. A document
    /// absent here is present but unusable for device authentication.
    pub private_keys: HashMap<DocumentId, PrivateKeyHandle>,
    /// Trust anchors for issuer-chain validation; every entry parsed.
    pub trust_anchors: Vec<TrustAnchor>,
    /// How the holder's device authenticates the session.
    pub device_auth_method: DeviceAuthMethod,
    /// Document id → resolved document type.
    pub doc_types: HashMap<DocumentId, DocType>,
    /// Document id → hashing-algorithm name.
    pub hashing_algs: HashMap<DocumentId, String>,
    /// Proof systems available for selective disclosure. The assembler
    /// carries the reference through without querying it.
    pub zk_registry: Option<Arc<ZkSystemRegistry>>,
}

impl TransferContext {
    /// Ids of documents usable for device authentication.
    pub fn signable_documents(&self) -> Vec<&DocumentId> {
        self.private_keys.keys().collect()
    }

    /// Number of documents carrying a payload.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }
}
