//! Foundation types for the Resource State Merger (RSM).
//!
//! This crate provides the vocabulary shared by the merge engine and its
//! front ends: the reserved OData field names, small helpers over
//! `serde_json::Value` documents, and the versioned `@odata.type` identifier.
//!
//! # Key Types
//!
//! - [`VersionedTypeId`] — Parsed `#Namespace.vMAJOR_MINOR_PATCH.TypeName` tag
//! - [`ValueKind`] — Per-occurrence shape classification of a JSON value
//! - [`TypeError`] — Errors from identifier comparison and conversion

pub mod document;
pub mod error;
pub mod odata;
pub mod type_id;

pub use document::{is_absent, pointer_push, ValueKind};
pub use error::TypeError;
pub use odata::{identity_of, is_collection, MEMBERS, MEMBERS_COUNT, ODATA_ID, ODATA_TYPE, UNKNOWN_TYPE};
pub use type_id::VersionedTypeId;
