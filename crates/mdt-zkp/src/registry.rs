//! # ZkSystemRegistry
//!
//! Ordered, append-only collection of pluggable proof systems.
//!
//! The registry is populated during an initialization phase at process
//! start-up and read by the negotiation layer for the rest of the process
//! lifetime. Registration order is significant: it is the tie-break
//! precedence for `lookup` and the advertisement order for `all_specs`.
//! The list lives behind a `parking_lot::RwLock` so a registration that
//! slips past the start-up phase cannot tear a concurrent read.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::system::{ZkSystem, ZkSystemSpec};

/// Registry of pluggable zero-knowledge proof systems.
///
/// Share it with `Arc`: the assembly layer carries a reference into its
/// transfer context without reading it, and the negotiation layer
/// queries it during session setup.
///
/// Duplicate names are permitted — `lookup` returns the first
/// registration, so earlier systems take precedence.
pub struct ZkSystemRegistry {
    systems: RwLock<Vec<Arc<dyn ZkSystem>>>,
}

impl ZkSystemRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            systems: RwLock::new(Vec::new()),
        }
    }

    /// Append a proof system. Registration order is preserved; duplicate
    /// names are not deduplicated. Returns `&self` for chaining.
    pub fn add(&self, system: Arc<dyn ZkSystem>) -> &Self {
        tracing::info!(zk_system = %system.name(), specs = system.specs().len(), "registered zk system");
        self.systems.write().push(system);
        self
    }

    /// First system whose name matches exactly, in registration order.
    ///
    /// A miss is a normal outcome — the peer may request a system this
    /// process never registered.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn ZkSystem>> {
        self.systems
            .read()
            .iter()
            .find(|system| system.name() == name)
            .map(Arc::clone)
    }

    /// All specs of all systems, concatenated in registration order.
    ///
    /// This is the capability list advertised to the peer during session
    /// negotiation.
    pub fn all_specs(&self) -> Vec<ZkSystemSpec> {
        self.systems
            .read()
            .iter()
            .flat_map(|system| system.specs().to_vec())
            .collect()
    }

    /// Number of registered systems (counting duplicates).
    pub fn len(&self) -> usize {
        self.systems.read().len()
    }

    /// Whether no system is registered.
    pub fn is_empty(&self) -> bool {
        self.systems.read().is_empty()
    }
}

impl Default for ZkSystemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ZkSystemRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self
            .systems
            .read()
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        f.debug_struct("ZkSystemRegistry")
            .field("systems", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::ZkSystemDescriptor;

    fn groth16() -> Arc<dyn ZkSystem> {
        Arc::new(ZkSystemDescriptor::new(
            "groth16",
            vec![ZkSystemSpec::new("s1", "groth16")],
        ))
    }

    fn bulletproofs() -> Arc<dyn ZkSystem> {
        Arc::new(ZkSystemDescriptor::new(
            "bulletproofs",
            vec![
                ZkSystemSpec::new("s2", "bulletproofs"),
                ZkSystemSpec::new("s3", "bulletproofs"),
            ],
        ))
    }

    #[test]
    fn lookup_finds_registered_systems() {
        let registry = ZkSystemRegistry::new();
        let a = groth16();
        let b = bulletproofs();
        registry.add(Arc::clone(&a)).add(Arc::clone(&b));

        let found_a = registry.lookup("groth16").expect("groth16 registered");
        assert!(Arc::ptr_eq(&found_a, &a));

        let found_b = registry.lookup("bulletproofs").expect("registered");
        assert!(Arc::ptr_eq(&found_b, &b));
    }

    #[test]
    fn lookup_miss_is_none() {
        let registry = ZkSystemRegistry::new();
        registry.add(groth16());
        assert!(registry.lookup("missing").is_none());
    }

    #[test]
    fn all_specs_concatenates_in_registration_order() {
        let registry = ZkSystemRegistry::new();
        registry.add(groth16()).add(bulletproofs());

        let specs = registry.all_specs();
        let ids: Vec<&str> = specs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2", "s3"]);
    }

    #[test]
    fn duplicate_names_first_registration_wins() {
        let registry = ZkSystemRegistry::new();
        let first = Arc::new(ZkSystemDescriptor::new(
            "groth16",
            vec![ZkSystemSpec::new("first", "groth16")],
        ));
        let second = Arc::new(ZkSystemDescriptor::new(
            "groth16",
            vec![ZkSystemSpec::new("second", "groth16")],
        ));
        registry.add(first).add(second);

        assert_eq!(registry.len(), 2);
        let found = registry.lookup("groth16").unwrap();
        assert_eq!(found.specs()[0].id, "first");
    }

    #[test]
    fn empty_registry() {
        let registry = ZkSystemRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.all_specs().is_empty());
        assert!(registry.lookup("anything").is_none());
    }

    #[test]
    fn add_chains() {
        let registry = ZkSystemRegistry::new();
        registry.add(groth16()).add(bulletproofs()).add(groth16());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn concurrent_reads_after_startup() {
        let registry = Arc::new(ZkSystemRegistry::new());
        registry.add(groth16()).add(bulletproofs());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        assert!(registry.lookup("groth16").is_some());
                        assert_eq!(registry.all_specs().len(), 3);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
