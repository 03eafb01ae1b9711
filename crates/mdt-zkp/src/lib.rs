//! # mdt-zkp — Zero-Knowledge Proof-System Plumbing
//!
//! Defines the capability interface that pluggable zero-knowledge proof
//! systems implement, and the registry the session layer queries during
//! capability negotiation.
//!
//! ## Architecture
//!
//! - **Capability interface** (`system.rs`): the [`ZkSystem`] trait
//!   exposes a system's name and the [`ZkSystemSpec`]s it can satisfy.
//!   Proof computation itself happens inside the implementations, outside
//!   this crate.
//! - **Descriptor** (`system.rs`): [`ZkSystemDescriptor`] is the plain
//!   data-backed implementation for systems whose capabilities are known
//!   up front.
//! - **Registry** (`registry.rs`): [`ZkSystemRegistry`] is an ordered,
//!   append-only collection populated at application start-up and read by
//!   the negotiation layer for the rest of the process lifetime.
//!
//! ## Crate Policy
//!
//! - No proof generation or verification in this crate.
//! - Registry reads are lock-guarded so a late registration cannot tear
//!   a concurrent `lookup` or `all_specs`.

pub mod registry;
pub mod system;

pub use registry::ZkSystemRegistry;
pub use system::{ZkSystem, ZkSystemDescriptor, ZkSystemSpec};
