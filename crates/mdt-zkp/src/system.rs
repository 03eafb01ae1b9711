//! # Proof-System Capability Interface
//!
//! A zero-knowledge proof system advertises what it can prove through
//! [`ZkSystemSpec`] values; the [`ZkSystem`] trait is the seam between
//! the negotiation layer and concrete implementations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One concrete proof capability offered by a proof system.
///
/// A spec names the algorithm family and carries the parameters a
/// verifier needs to select it during capability negotiation (curve,
/// circuit identifier, hash choice, …). Parameters are an ordered map so
/// the serialized form — and therefore [`fingerprint_hex`](Self::fingerprint_hex)
/// — is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZkSystemSpec {
    /// Unique identifier of this spec within the advertising system.
    pub id: String,
    /// Algorithm family (e.g. `groth16`, `bulletproofs`).
    pub system: String,
    /// Negotiation parameters, keyed by parameter name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, serde_json::Value>,
}

impl ZkSystemSpec {
    /// Create a spec with no parameters.
    pub fn new(id: impl Into<String>, system: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            system: system.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add a negotiation parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// SHA-256 fingerprint of the serialized spec, lowercase hex.
    ///
    /// Stable across processes: `params` is a `BTreeMap`, so the JSON
    /// serialization is key-ordered.
    pub fn fingerprint_hex(&self) -> String {
        let bytes = serde_json::to_vec(self).expect("spec serialization is infallible");
        let digest = Sha256::digest(&bytes);
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// Capability interface implemented by a pluggable proof system.
///
/// The negotiation layer treats implementations uniformly: a name for
/// selection and the specs the system can satisfy. `Send + Sync` bounds
/// allow registry handles to cross thread boundaries.
pub trait ZkSystem: Send + Sync {
    /// The system's registry name.
    fn name(&self) -> &str;

    /// The proof capabilities this system offers, in advertisement order.
    fn specs(&self) -> &[ZkSystemSpec];
}

/// A data-backed [`ZkSystem`] whose capabilities are known up front.
///
/// Most proof systems register through this type; implementations that
/// compute their spec list dynamically implement [`ZkSystem`] directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZkSystemDescriptor {
    name: String,
    specs: Vec<ZkSystemSpec>,
}

impl ZkSystemDescriptor {
    /// Create a descriptor from a name and its ordered spec list.
    pub fn new(name: impl Into<String>, specs: Vec<ZkSystemSpec>) -> Self {
        Self {
            name: name.into(),
            specs,
        }
    }
}

impl ZkSystem for ZkSystemDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn specs(&self) -> &[ZkSystemSpec] {
        &self.specs
    }
}
