//! Merge engine for the Resource State Merger.
//!
//! Several agents may describe the same pooled-hardware resource, each with
//! its own JSON document. This crate folds those documents, in order, into one
//! canonical representation.
//!
//! # Rules
//!
//! - Scalars: the first non-null value wins; a later `null` never erases one.
//! - Objects: merged recursively.
//! - Arrays: unioned by structural equality, preserving order.
//! - `@odata.type`: the higher version wins; types that cannot be ordered
//!   degrade to `#UNKNOWN`.
//! - Collections: after the fold, `Members` is deduplicated by `@odata.id` and
//!   `Members@odata.count` is recomputed.
//!
//! # Key Types
//!
//! - [`merge_documents`] / [`merge_documents_with_report`] — Entry points
//! - [`FieldRule`] — Per-field dispatch table
//! - [`MergeReport`] / [`TypeConflict`] — What the merge absorbed
//! - [`normalize_collections`] — Collection post-pass

pub mod collection;
pub mod merger;
pub mod report;
pub mod rules;

pub use collection::{normalize_collections, CollectionStats};
pub use merger::{merge_documents, merge_documents_with_report};
pub use report::{MergeOutcome, MergeReport, TypeConflict};
pub use rules::FieldRule;
