//! # mdt-transfer — Transfer-Session Assembly
//!
//! Assembles, from loosely-typed external records, the validated set of
//! cryptographic and descriptive materials needed to start one secure
//! document-presentation session (an ISO 18013-5 mdoc exchange).
//!
//! ## Architecture
//!
//! - **Input** (`request.rs`): [`RawTransferRequest`] — five
//!   independently-keyed per-document maps plus session-global fields,
//!   exactly as delivered by the wallet storage layer.
//! - **Key material** (`key_material.rs`): [`KeyMaterialResolver`] turns
//!   a versioned [`KeyDescriptor`] record and a key index into a
//!   [`PrivateKeyHandle`] bound to a registered secure area. Raw key
//!   bytes never appear in this crate.
//! - **Assembly** (`assembler.rs`): [`TransferAssembler`] joins the maps,
//!   parses wire tokens, resolves key material, parses trust anchors, and
//!   produces an [`Assembly`] — the validated [`TransferContext`]
//!   together with diagnostics for every per-document exclusion.
//! - **Output** (`context.rs`): [`TransferContext`] — the immutable
//!   bundle consumed by the session layer for the lifetime of one
//!   presentation exchange.
//!
//! ## Failure Policy
//!
//! A malformed trust anchor fails the whole assembly — no partial
//! context. Everything per-document degrades instead: an unrecognized
//! token or unresolvable key material excludes that document from the
//! affected output map only, and the exclusion is reported in
//! [`Assembly::skipped`] so operators can see why a document is
//! unsignable.

pub mod assembler;
pub mod context;
pub mod key_material;
pub mod request;

pub use assembler::{AffectedMap, Assembly, AssemblyError, SkippedEntry, TransferAssembler};
pub use context::TransferContext;
pub use key_material::{
    KeyDescriptor, KeyMaterialResolver, KeyResolutionError, PrivateKeyHandle,
    KEY_DESCRIPTOR_VERSION,
};
pub use request::RawTransferRequest;
