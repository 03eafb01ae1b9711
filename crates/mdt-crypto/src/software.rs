//! # Software Secure Area
//!
//! In-process [`SecureArea`] backend holding slot-indexed Ed25519 keys,
//! suitable for development and testing. Production deployments use a
//! platform keystore behind the same trait.
//!
//! ## Security
//!
//! - Key material lives in process memory, protected by OS isolation only.
//! - Every slot entry is zeroized on drop.
//! - `Debug` prints slot numbers, never key bytes.

use dashmap::DashMap;
use ed25519_dalek::Signer;
use zeroize::Zeroize;

use crate::error::CryptoError;
use crate::secure_area::SecureArea;

/// A slot entry with zeroize-on-drop.
///
/// `SigningKey` implements `ZeroizeOnDrop` (under the `zeroize` feature),
/// so its secret bytes are wiped automatically when a `SlotEntry` drops.
struct SlotEntry {
    signing_key: ed25519_dalek::SigningKey,
}

/// In-process secure area using `ed25519-dalek`.
///
/// Keys are indexed by slot number. Slots are populated with
/// [`generate_key`](SoftwareSecureArea::generate_key) or
/// [`import_key`](SoftwareSecureArea::import_key); the [`SecureArea`]
/// capability surface then signs with them without ever exposing the
/// private bytes.
pub struct SoftwareSecureArea {
    name: String,
    slots: DashMap<u32, SlotEntry>,
}

impl SoftwareSecureArea {
    /// The default registry name for the software backend.
    pub const DEFAULT_NAME: &'static str = "software";

    /// Create an empty software secure area named
    /// [`DEFAULT_NAME`](Self::DEFAULT_NAME).
    pub fn new() -> Self {
        Self::with_name(Self::DEFAULT_NAME)
    }

    /// Create an empty software secure area with a custom registry name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: DashMap::new(),
        }
    }

    /// Generate a new Ed25519 key at `slot`, replacing any existing key,
    /// and return its public key bytes.
    pub fn generate_key(&self, slot: u32) -> Vec<u8> {
        let mut rng = rand_core::OsRng;
        let signing_key = ed25519_dalek::SigningKey::generate(&mut rng);
        let public = signing_key.verifying_key().to_bytes().to_vec();
        self.slots.insert(slot, SlotEntry { signing_key });
        public
    }

    /// Import a 32-byte Ed25519 seed into `slot` and return the public
    /// key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyMaterial`] if the seed is not
    /// exactly 32 bytes.
    pub fn import_key(&self, slot: u32, seed: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if seed.len() != 32 {
            return Err(CryptoError::InvalidKeyMaterial(format!(
                "Ed25519 seed must be 32 bytes, got {}",
                seed.len()
            )));
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(seed);
        let signing_key = ed25519_dalek::SigningKey::from_bytes(&bytes);
        bytes.zeroize();
        let public = signing_key.verifying_key().to_bytes().to_vec();
        self.slots.insert(slot, SlotEntry { signing_key });
        Ok(public)
    }

    /// Slots currently holding a key.
    pub fn occupied_slots(&self) -> Vec<u32> {
        self.slots.iter().map(|e| *e.key()).collect()
    }

    fn slot_not_found(&self, slot: u32) -> CryptoError {
        CryptoError::SlotNotFound {
            area: self.name.clone(),
            slot,
        }
    }
}

impl Default for SoftwareSecureArea {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SoftwareSecureArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftwareSecureArea")
            .field("name", &self.name)
            .field("slot_count", &self.slots.len())
            .finish()
    }
}

impl SecureArea for SoftwareSecureArea {
    fn name(&self) -> &str {
        &self.name
    }

    fn public_key(&self, slot: u32) -> Result<Vec<u8>, CryptoError> {
        let entry = self.slots.get(&slot).ok_or_else(|| self.slot_not_found(slot))?;
        Ok(entry.signing_key.verifying_key().to_bytes().to_vec())
    }

    fn sign(&self, slot: u32, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let entry = self.slots.get(&slot).ok_or_else(|| self.slot_not_found(slot))?;
        let signature = entry.signing_key.sign(data);
        Ok(signature.to_bytes().to_vec())
    }

    fn key_agreement(&self, slot: u32, _peer_public_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        // Ed25519 is a signature scheme, not an ECDH key. An agreement-
        // capable backend (P-256) plugs in behind the same trait.
        self.slots.get(&slot).ok_or_else(|| self.slot_not_found(slot))?;
        Err(CryptoError::NotImplemented(
            "key agreement requires an ECDH-capable secure area backend".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::Verifier;

    #[test]
    fn generate_and_sign() {
        let area = SoftwareSecureArea::new();
        let public = area.generate_key(0);
        assert_eq!(public.len(), 32);

        let sig = area.sign(0, b"session transcript").expect("sign");
        assert_eq!(sig.len(), 64);

        let vk = ed25519_dalek::VerifyingKey::from_bytes(&public.try_into().unwrap()).unwrap();
        let sig = ed25519_dalek::Signature::from_slice(&sig).unwrap();
        assert!(vk.verify(b"session transcript", &sig).is_ok());
    }

    #[test]
    fn import_deterministic() {
        let seed = [7u8; 32];
        let a = SoftwareSecureArea::new();
        let b = SoftwareSecureArea::new();
        let pk_a = a.import_key(3, &seed).expect("import");
        let pk_b = b.import_key(9, &seed).expect("import");
        assert_eq!(pk_a, pk_b);

        let sig_a = a.sign(3, b"msg").unwrap();
        let sig_b = b.sign(9, b"msg").unwrap();
        assert_eq!(sig_a, sig_b);
    }

    #[test]
    fn import_rejects_wrong_length() {
        let area = SoftwareSecureArea::new();
        assert!(area.import_key(0, &[0u8; 16]).is_err());
        assert!(area.import_key(0, &[0u8; 33]).is_err());
    }

    #[test]
    fn sign_empty_slot_fails() {
        let area = SoftwareSecureArea::new();
        let err = area.sign(42, b"data").unwrap_err();
        assert!(matches!(err, CryptoError::SlotNotFound { slot: 42, .. }));
    }

    #[test]
    fn public_key_empty_slot_fails() {
        let area = SoftwareSecureArea::new();
        assert!(area.public_key(1).is_err());
    }

    #[test]
    fn key_agreement_not_implemented() {
        let area = SoftwareSecureArea::new();
        area.generate_key(0);
        let err = area.key_agreement(0, &[0u8; 32]).unwrap_err();
        assert!(matches!(err, CryptoError::NotImplemented(_)));
    }

    #[test]
    fn key_agreement_empty_slot_reports_slot() {
        let area = SoftwareSecureArea::new();
        let err = area.key_agreement(5, &[0u8; 32]).unwrap_err();
        assert!(matches!(err, CryptoError::SlotNotFound { slot: 5, .. }));
    }

    #[test]
    fn occupied_slots() {
        let area = SoftwareSecureArea::new();
        area.generate_key(0);
        area.generate_key(4);
        let mut slots = area.occupied_slots();
        slots.sort_unstable();
        assert_eq!(slots, vec![0, 4]);
    }

    #[test]
    fn debug_does_not_leak_key_material() {
        let seed = [0xaa_u8; 32];
        let area = SoftwareSecureArea::new();
        area.import_key(0, &seed).unwrap();
        let debug = format!("{area:?}");
        assert!(debug.contains("SoftwareSecureArea"));
        assert!(!debug.contains("aaaa"));
    }

    #[test]
    fn custom_name() {
        let area = SoftwareSecureArea::with_name("test-area");
        assert_eq!(area.name(), "test-area");
    }
}
