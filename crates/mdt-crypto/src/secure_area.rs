//! # SecureArea Trait and Registry
//!
//! The capability interface over key-storage backends and the shared
//! registry that resolves backend names to handles.
//!
//! ## Design Principles
//!
//! 1. **Private keys never leave the backend.** The trait exposes `sign`,
//!    `key_agreement` and `public_key` but no key-export operation.
//! 2. **Keys are slot-indexed.** A document's key material names its
//!    backend plus a slot; the backend maps the slot to its internal
//!    representation (keychain tag, PKCS#11 handle, in-memory entry).
//! 3. **The registry is constructed at the composition root** and shared
//!    by `Arc` with the components that resolve key material. There is no
//!    process-global instance.

use std::sync::Arc;

use dashmap::DashMap;

use crate::error::CryptoError;

// ---------------------------------------------------------------------------
// SecureArea trait
// ---------------------------------------------------------------------------

/// Capability interface over a key-storage backend.
///
/// Implementations MUST:
/// - Never expose raw private key bytes through this trait.
/// - Zeroize any in-memory key material on drop.
/// - Return [`CryptoError`] with diagnostic context on failure.
///
/// The trait is object-safe for use with `Arc<dyn SecureArea>`.
pub trait SecureArea: Send + Sync {
    /// The registry name of this backend.
    fn name(&self) -> &str;

    /// The public key bytes for the key at `slot`.
    fn public_key(&self, slot: u32) -> Result<Vec<u8>, CryptoError>;

    /// Sign `data` with the key at `slot`, returning the raw signature.
    fn sign(&self, slot: u32, data: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Perform key agreement between the key at `slot` and a peer public
    /// key, returning the shared-secret bytes.
    ///
    /// Used for the MAC device-authentication mode, where the session key
    /// is derived from an ECKA-DH exchange with the reader.
    fn key_agreement(&self, slot: u32, peer_public_key: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

// ---------------------------------------------------------------------------
// SecureAreaRegistry
// ---------------------------------------------------------------------------

/// Registry of secure-area backends, keyed by backend name.
///
/// Cheap to share: hold it in an `Arc` and clone the `Arc` into every
/// component that resolves key material. A lookup miss is a normal
/// outcome — a key descriptor may name a backend that this process never
/// configured.
pub struct SecureAreaRegistry {
    areas: DashMap<String, Arc<dyn SecureArea>>,
}

impl SecureAreaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            areas: DashMap::new(),
        }
    }

    /// Register a backend under its own name, replacing any previous
    /// backend with that name.
    pub fn register(&self, area: Arc<dyn SecureArea>) {
        let name = area.name().to_string();
        tracing::info!(secure_area = %name, "registered secure area");
        self.areas.insert(name, area);
    }

    /// Resolve a backend by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn SecureArea>> {
        self.areas.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Names of all registered backends.
    pub fn names(&self) -> Vec<String> {
        self.areas.iter().map(|e| e.key().clone()).collect()
    }

    /// Number of registered backends.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Whether no backend is registered.
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

impl Default for SecureAreaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SecureAreaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureAreaRegistry")
            .field("names", &self.names())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Environment-based backend selection
// ---------------------------------------------------------------------------

/// Select a secure-area backend from environment configuration.
///
/// Reads the `MDT_SECURE_AREA` environment variable:
/// - `"software"` (default): in-process Ed25519 keys for dev/test.
/// - `"hardware"`: reserved for a platform keystore backend.
pub fn create_secure_area_from_env() -> Result<Arc<dyn SecureArea>, CryptoError> {
    let backend = std::env::var("MDT_SECURE_AREA").unwrap_or_else(|_| "software".into());
    match backend.as_str() {
        "software" => Ok(Arc::new(crate::software::SoftwareSecureArea::new())),
        "hardware" => Err(CryptoError::NotImplemented(
            "hardware secure area requires a platform keystore integration".into(),
        )),
        other => Err(CryptoError::UnknownSecureArea(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::software::SoftwareSecureArea;

    #[test]
    fn registry_register_and_get() {
        let registry = SecureAreaRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(SoftwareSecureArea::new()));
        assert_eq!(registry.len(), 1);

        let area = registry.get("software").expect("registered");
        assert_eq!(area.name(), "software");
    }

    #[test]
    fn registry_miss_is_none() {
        let registry = SecureAreaRegistry::new();
        assert!(registry.get("enclave").is_none());
    }

    #[test]
    fn registry_replaces_same_name() {
        let registry = SecureAreaRegistry::new();
        registry.register(Arc::new(SoftwareSecureArea::new()));
        registry.register(Arc::new(SoftwareSecureArea::new()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registry_names() {
        let registry = SecureAreaRegistry::new();
        registry.register(Arc::new(SoftwareSecureArea::with_name("a")));
        registry.register(Arc::new(SoftwareSecureArea::with_name("b")));
        let mut names = registry.names();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SecureAreaRegistry>();
    }

    // Single test: the cases share one environment variable and must
    // not interleave with each other on parallel test threads.
    #[test]
    fn from_env_backend_selection() {
        std::env::remove_var("MDT_SECURE_AREA");
        let area = create_secure_area_from_env().expect("default backend");
        assert_eq!(area.name(), "software");

        std::env::set_var("MDT_SECURE_AREA", "hardware");
        assert!(matches!(
            create_secure_area_from_env(),
            Err(CryptoError::NotImplemented(_))
        ));

        std::env::set_var("MDT_SECURE_AREA", "magic-enclave");
        assert!(matches!(
            create_secure_area_from_env(),
            Err(CryptoError::UnknownSecureArea(_))
        ));
        std::env::remove_var("MDT_SECURE_AREA");
    }
}
