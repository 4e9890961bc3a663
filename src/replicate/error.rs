//! Errors raised while replicating an expression.

use thiserror::Error;

use super::path::ExprPath;
use crate::core::ExprError;

/// Errors that can occur during replication.
///
/// A replication either fully succeeds or fails with one of these; no
/// partial result is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplicateError {
    /// A leaf whose kind has no rebuild rule
    #[error("Unsupported type: {kind} at {path}")]
    UnsupportedType { kind: &'static str, path: ExprPath },

    #[error("Expression nesting depth exceeds maximum limit of {limit}")]
    MaxDepthExceeded { limit: usize },

    #[error("Expression size exceeds maximum node count limit of {limit}")]
    MaxNodesExceeded { limit: usize },

    /// A constructor rejected its arguments; passed through unchanged.
    ///
    /// Leaves are rebuilt without a fallible constructor and `Pow` nodes
    /// always carry two children, so the pipeline only reaches this through
    /// a head whose arity differs from its traced children.
    #[error(transparent)]
    Construct(#[from] ExprError),

    /// Internal invariant violation
    #[error("internal error: {0}")]
    Internal(String),
}
