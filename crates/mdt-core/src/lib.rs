//! # mdt-core — Foundational Types for the MDT Stack
//!
//! Domain-primitive types shared by every crate in the workspace:
//!
//! - **Identifiers** (`document.rs`): [`DocumentId`] — the opaque join key
//!   across all per-document maps of a transfer request.
//! - **Tokens** (`document.rs`): [`DataFormat`], [`DocType`] and
//!   [`DeviceAuthMethod`] — free-text wire tokens parsed into closed enums
//!   at the assembly boundary.
//! - **Display names** (`document.rs`): the namespace → data-element →
//!   display-text structure carried alongside a document.
//! - **Errors** (`error.rs`): construction-time validation and
//!   token-parsing errors.
//!
//! ## Crate Policy
//!
//! - No cryptography, no I/O, no interior mutability.
//! - Every identifier validates at construction; invalid values are
//!   rejected at deserialization time, never silently accepted.

pub mod document;
pub mod error;

pub use document::{
    DataElementIdentifier, DataFormat, DeviceAuthMethod, DisplayNames, DocType, DocumentId,
    NameSpace,
};
pub use error::{TokenError, ValidationError};
