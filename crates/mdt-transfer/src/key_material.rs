//! # Key Material Resolution
//!
//! Turns a per-document key descriptor and slot index into a
//! [`PrivateKeyHandle`] bound to a registered secure area.
//!
//! ## Security Invariants
//!
//! - Raw private key bytes never appear in this module. The handle is an
//!   indirect, non-extractable reference: all use goes through the
//!   secure area's sign / key-agreement capability.
//! - The secure area is resolved eagerly at assembly time, so a
//!   misconfigured backend name surfaces as a diagnostic during assembly
//!   instead of a failure on first signature.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use mdt_core::DocumentId;
use mdt_crypto::{CryptoError, SecureArea, SecureAreaRegistry};

/// The key-descriptor record version this crate understands.
pub const KEY_DESCRIPTOR_VERSION: u32 = 1;

/// Errors from resolving a document's key material.
///
/// Non-fatal at the assembly layer: a resolution error excludes the
/// document from the private-key map only, and is reported as a
/// diagnostic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyResolutionError {
    /// The document has no key-descriptor bytes.
    #[error("no key descriptor present")]
    MissingDescriptor,

    /// The document has no key index.
    #[error("no key index present")]
    MissingKeyIndex,

    /// The descriptor bytes are not a well-formed record.
    #[error("malformed key descriptor: {0}")]
    MalformedDescriptor(String),

    /// The descriptor record version is not supported.
    #[error("unsupported key descriptor version {0}")]
    UnsupportedVersion(u32),

    /// The descriptor names a secure area this process never registered.
    #[error("unknown secure area {0:?}")]
    UnknownSecureArea(String),
}

// ---------------------------------------------------------------------------
// KeyDescriptor
// ---------------------------------------------------------------------------

/// Versioned record naming the secure-area implementation (and
/// parameters) responsible for a document's private key.
///
/// Produced by the issuance layer, consumed only here. The wire form is
/// a JSON record:
///
/// ```json
/// { "version": 1, "secure_area": "software", "params": { "curve": "P-256" } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDescriptor {
    /// Record version; only [`KEY_DESCRIPTOR_VERSION`] is accepted.
    pub version: u32,
    /// Registry name of the secure area holding the key.
    pub secure_area: String,
    /// Backend-specific parameters, passed through opaquely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

impl KeyDescriptor {
    /// Create a current-version descriptor for a secure area.
    pub fn new(secure_area: impl Into<String>) -> Self {
        Self {
            version: KEY_DESCRIPTOR_VERSION,
            secure_area: secure_area.into(),
            params: None,
        }
    }

    /// Parse descriptor bytes, rejecting corrupt records and
    /// unrecognized versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyResolutionError> {
        let descriptor: Self = serde_json::from_slice(bytes)
            .map_err(|e| KeyResolutionError::MalformedDescriptor(e.to_string()))?;
        if descriptor.version != KEY_DESCRIPTOR_VERSION {
            return Err(KeyResolutionError::UnsupportedVersion(descriptor.version));
        }
        Ok(descriptor)
    }

    /// Serialize to the wire form.
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("descriptor serialization is infallible")
    }
}

// ---------------------------------------------------------------------------
// PrivateKeyHandle
// ---------------------------------------------------------------------------

/// An indirect, non-extractable reference to a document's private key.
///
/// Binds the document id and slot index to the resolved secure area.
/// Sign and key-agreement operations delegate to the backend; the key
/// itself never leaves it.
#[derive(Clone)]
pub struct PrivateKeyHandle {
    document_id: DocumentId,
    slot_index: u32,
    secure_area: Arc<dyn SecureArea>,
}

impl PrivateKeyHandle {
    /// The document this key belongs to.
    pub fn document_id(&self) -> &DocumentId {
        &self.document_id
    }

    /// The key's slot index within its secure area.
    pub fn slot_index(&self) -> u32 {
        self.slot_index
    }

    /// The registry name of the bound secure area.
    pub fn secure_area_name(&self) -> &str {
        self.secure_area.name()
    }

    /// The public key bytes for this document's key.
    pub fn public_key(&self) -> Result<Vec<u8>, CryptoError> {
        self.secure_area.public_key(self.slot_index)
    }

    /// Sign `data` with this document's key.
    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.secure_area.sign(self.slot_index, data)
    }

    /// Perform key agreement with a peer public key, for MAC device
    /// authentication.
    pub fn key_agreement(&self, peer_public_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.secure_area.key_agreement(self.slot_index, peer_public_key)
    }
}

impl std::fmt::Debug for PrivateKeyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKeyHandle")
            .field("document_id", &self.document_id)
            .field("slot_index", &self.slot_index)
            .field("secure_area", &self.secure_area.name())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// KeyMaterialResolver
// ---------------------------------------------------------------------------

/// Resolves per-document key material against the secure-area registry.
#[derive(Debug, Clone)]
pub struct KeyMaterialResolver {
    secure_areas: Arc<SecureAreaRegistry>,
}

impl KeyMaterialResolver {
    /// Create a resolver over a shared secure-area registry.
    pub fn new(secure_areas: Arc<SecureAreaRegistry>) -> Self {
        Self { secure_areas }
    }

    /// Resolve a document's key material into a [`PrivateKeyHandle`].
    ///
    /// Requires both descriptor bytes and a key index; parses the
    /// versioned record and resolves the named secure area eagerly.
    ///
    /// # Errors
    ///
    /// Returns the reason the document's key material is unusable —
    /// callers exclude the document from the private-key map and surface
    /// the reason as a diagnostic.
    pub fn resolve(
        &self,
        id: &DocumentId,
        descriptor_bytes: Option<&[u8]>,
        index: Option<u32>,
    ) -> Result<PrivateKeyHandle, KeyResolutionError> {
        let bytes = descriptor_bytes.ok_or(KeyResolutionError::MissingDescriptor)?;
        let slot_index = index.ok_or(KeyResolutionError::MissingKeyIndex)?;
        let descriptor = KeyDescriptor::from_bytes(bytes)?;
        let secure_area = self
            .secure_areas
            .get(&descriptor.secure_area)
            .ok_or_else(|| KeyResolutionError::UnknownSecureArea(descriptor.secure_area.clone()))?;

        tracing::debug!(
            document_id = %id,
            secure_area = %descriptor.secure_area,
            slot_index,
            "resolved private key handle"
        );
        Ok(PrivateKeyHandle {
            document_id: id.clone(),
            slot_index,
            secure_area,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdt_crypto::SoftwareSecureArea;

    fn registry_with_software() -> Arc<SecureAreaRegistry> {
        let registry = SecureAreaRegistry::new();
        registry.register(Arc::new(SoftwareSecureArea::new()));
        Arc::new(registry)
    }

    fn doc(id: &str) -> DocumentId {
        DocumentId::new(id).unwrap()
    }

    #[test]
    fn descriptor_roundtrip() {
        let descriptor = KeyDescriptor::new("software");
        let bytes = descriptor.to_bytes();
        let back = KeyDescriptor::from_bytes(&bytes).unwrap();
        assert_eq!(descriptor, back);
    }

    #[test]
    fn descriptor_rejects_corrupt_bytes() {
        assert!(matches!(
            KeyDescriptor::from_bytes(b"not json"),
            Err(KeyResolutionError::MalformedDescriptor(_))
        ));
        assert!(matches!(
            KeyDescriptor::from_bytes(b"{}"),
            Err(KeyResolutionError::MalformedDescriptor(_))
        ));
    }

    #[test]
    fn descriptor_rejects_unknown_version() {
        let bytes = br#"{"version": 2, "secure_area": "software"}"#;
        assert_eq!(
            KeyDescriptor::from_bytes(bytes),
            Err(KeyResolutionError::UnsupportedVersion(2))
        );
    }

    #[test]
    fn descriptor_preserves_params() {
        let bytes = br#"{"version": 1, "secure_area": "software", "params": {"curve": "P-256"}}"#;
        let descriptor = KeyDescriptor::from_bytes(bytes).unwrap();
        assert_eq!(descriptor.params.unwrap()["curve"], "P-256");
    }

    #[test]
    fn resolve_success() {
        let resolver = KeyMaterialResolver::new(registry_with_software());
        let descriptor = KeyDescriptor::new("software").to_bytes();
        let handle = resolver
            .resolve(&doc("doc-1"), Some(descriptor.as_slice()), Some(3))
            .unwrap();
        assert_eq!(handle.document_id().as_str(), "doc-1");
        assert_eq!(handle.slot_index(), 3);
        assert_eq!(handle.secure_area_name(), "software");
    }

    #[test]
    fn resolve_requires_descriptor() {
        let resolver = KeyMaterialResolver::new(registry_with_software());
        assert_eq!(
            resolver.resolve(&doc("d"), None, Some(0)).unwrap_err(),
            KeyResolutionError::MissingDescriptor
        );
    }

    #[test]
    fn resolve_requires_index() {
        let resolver = KeyMaterialResolver::new(registry_with_software());
        let descriptor = KeyDescriptor::new("software").to_bytes();
        assert_eq!(
            resolver.resolve(&doc("d"), Some(descriptor.as_slice()), None).unwrap_err(),
            KeyResolutionError::MissingKeyIndex
        );
    }

    #[test]
    fn resolve_unknown_secure_area() {
        let resolver = KeyMaterialResolver::new(registry_with_software());
        let descriptor = KeyDescriptor::new("enclave").to_bytes();
        assert_eq!(
            resolver
                .resolve(&doc("d"), Some(descriptor.as_slice()), Some(0))
                .unwrap_err(),
            KeyResolutionError::UnknownSecureArea("enclave".to_string())
        );
    }

    #[test]
    fn handle_signs_through_secure_area() {
        let area = SoftwareSecureArea::new();
        let public = area.import_key(5, &[42u8; 32]).unwrap();
        let registry = SecureAreaRegistry::new();
        registry.register(Arc::new(area));

        let resolver = KeyMaterialResolver::new(Arc::new(registry));
        let descriptor = KeyDescriptor::new("software").to_bytes();
        let handle = resolver
            .resolve(&doc("doc-1"), Some(descriptor.as_slice()), Some(5))
            .unwrap();

        assert_eq!(handle.public_key().unwrap(), public);
        let signature = handle.sign(b"session transcript").unwrap();
        assert_eq!(signature.len(), 64);
    }

    #[test]
    fn handle_debug_shows_binding_not_keys() {
        let resolver = KeyMaterialResolver::new(registry_with_software());
        let descriptor = KeyDescriptor::new("software").to_bytes();
        let handle = resolver
            .resolve(&doc("doc-1"), Some(descriptor.as_slice()), Some(0))
            .unwrap();
        let debug = format!("{handle:?}");
        assert!(debug.contains("doc-1"));
        assert!(debug.contains("software"));
    }
}
