//! # mdt-crypto — Secure-Area Capability Abstraction
//!
//! Abstracts key storage and device-key operations behind a trait so that
//! multiple backends can serve one presentation session:
//!
//! - **Trait** (`secure_area.rs`): [`SecureArea`] exposes `sign` and
//!   `key_agreement` over slot-indexed keys. Raw private key bytes never
//!   cross this interface — hardware backends enforce that physically,
//!   the software backend enforces it by API contract.
//! - **Registry** (`secure_area.rs`): [`SecureAreaRegistry`] maps backend
//!   names to shared [`SecureArea`] handles. Constructed explicitly at the
//!   composition root and passed by `Arc` — no ambient global lookup.
//! - **Software backend** (`software.rs`): [`SoftwareSecureArea`] holds
//!   slot-indexed Ed25519 keys in process memory for development and
//!   testing. Key material is zeroized on drop.
//! - **Trust anchors** (`trust_anchor.rs`): [`CertificateParser`] is the
//!   fallible seam from DER bytes to a [`TrustAnchor`] handle;
//!   [`DerCertificateParser`] validates the outer DER framing.
//!
//! ## Security Invariants
//!
//! - No trait method returns private key bytes.
//! - `Debug` implementations never print key material.
//! - All in-memory key material is zeroized on drop.

pub mod error;
pub mod secure_area;
pub mod software;
pub mod trust_anchor;

pub use error::{CertificateError, CryptoError};
pub use secure_area::{create_secure_area_from_env, SecureArea, SecureAreaRegistry};
pub use software::SoftwareSecureArea;
pub use trust_anchor::{CertificateParser, DerCertificateParser, TrustAnchor};
