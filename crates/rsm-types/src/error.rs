use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// Two identifiers name different namespaces or types and cannot be ordered.
    #[error("incomparable type identifiers: {left} vs {right}")]
    IncomparableIdentifiers { left: String, right: String },

    #[error("not a versioned type identifier: {0}")]
    InvalidIdentifier(String),
}
