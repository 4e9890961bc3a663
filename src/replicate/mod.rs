//! Structure-preserving replication of expression trees.
//!
//! A replication runs in three stages over a [`TraceTree`]:
//!
//! 1. **Trace** - mirror the input into an arena of bookkeeping nodes.
//! 2. **Leaves** - classify every leaf and rebuild it with its own constructor.
//! 3. **Propagate** - rebuild internal nodes bottom-up from their children's
//!    fragments, always with `evaluate = false`.
//!
//! The result is structurally equal to the input but shares no node with it.
//! Unevaluated forms such as `Add(2, 3)` come back unevaluated.
//!
//! # Example
//! ```
//! use symb_replica::{Expr, replicate};
//!
//! let e = Expr::add_unevaluated(vec![Expr::integer(2), Expr::integer(3)]);
//! let copy = replicate(&e).unwrap();
//! assert_eq!(copy, e);
//! assert_eq!(copy.to_string(), "2 + 3");
//! assert!(copy.is_disjoint_from(&e));
//! ```

mod error;
pub(crate) mod leaf;
mod namespace;
mod path;
mod propagate;
mod trace;

use std::sync::Arc;

use tracing::debug;

use crate::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES, Expr};

pub use error::ReplicateError;
pub use leaf::{LeafClass, classify};
pub use namespace::Namespace;
pub use path::ExprPath;
pub use trace::{NodeDisplay, NodeKey, TraceNode, TraceTree};

/// Size limits applied while tracing an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum path length from the root
    pub max_depth: usize,
    /// Maximum number of node occurrences
    pub max_nodes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

/// Node counts of one replication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplicaStats {
    /// Node occurrences traced
    pub nodes: usize,
    /// Leaves rebuilt
    pub leaves: usize,
    /// Internal nodes rebuilt
    pub internal: usize,
}

/// A replicated expression together with what it took to build it.
#[derive(Debug, Clone)]
pub struct Replica {
    /// The rebuilt expression
    pub expr: Expr,
    /// Constructor modules used by the rebuild
    pub namespace: Namespace,
    /// Node counts of the run
    pub stats: ReplicaStats,
}

/// Builder for replication runs.
///
/// # Example
/// ```
/// use symb_replica::{Expr, Replicator};
///
/// let x = Expr::symbol("x");
/// let e = Expr::pow_unevaluated(x, Expr::integer(2));
/// let replica = Replicator::new().max_depth(64).replicate_traced(&e).unwrap();
/// assert_eq!(replica.expr, e);
/// assert!(replica.namespace.contains_module("core.power"));
/// assert_eq!(replica.stats.leaves, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Replicator {
    limits: Limits,
}

impl Replicator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum tree depth.
    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.limits.max_depth = depth;
        self
    }

    /// Set the maximum node count.
    #[must_use]
    pub const fn max_nodes(mut self, nodes: usize) -> Self {
        self.limits.max_nodes = nodes;
        self
    }

    #[must_use]
    pub const fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub const fn current_limits(&self) -> Limits {
        self.limits
    }

    /// Replicate `expr`, returning only the new expression.
    ///
    /// # Errors
    /// See [`Replicator::replicate_traced`].
    pub fn replicate(&self, expr: &Expr) -> Result<Expr, ReplicateError> {
        self.replicate_traced(expr).map(|replica| replica.expr)
    }

    /// Replicate `expr`, returning the new expression with its namespace and
    /// node counts.
    ///
    /// # Errors
    /// - `UnsupportedType` if a leaf has no rebuild rule
    /// - `MaxDepthExceeded` / `MaxNodesExceeded` if the input is too large
    /// - `Construct` if a constructor rejects its arguments. Every head
    ///   accepts the children it was traced with, so a well-formed tree
    ///   never produces this.
    pub fn replicate_traced(&self, expr: &Expr) -> Result<Replica, ReplicateError> {
        self.run(expr)
            .inspect_err(|e| debug!(error = %e, "replication aborted"))
    }

    fn run(&self, expr: &Expr) -> Result<Replica, ReplicateError> {
        let tree = TraceTree::build(expr, self.limits)?;
        debug!(nodes = tree.len(), "replicating expression");

        let mut namespace = Namespace::new();
        let leaves = leaf::rebuild_leaves(&tree, &mut namespace)?;
        let internal = propagate::propagate(&tree, &mut namespace)?;
        let stats = ReplicaStats {
            nodes: tree.len(),
            leaves,
            internal,
        };

        let root = tree.into_root_fragment().ok_or_else(|| {
            ReplicateError::Internal("root has no fragment after propagation".to_owned())
        })?;
        debug!(
            nodes = stats.nodes,
            leaves = stats.leaves,
            internal = stats.internal,
            namespace = %namespace,
            "replication finished"
        );
        Ok(Replica {
            expr: Arc::unwrap_or_clone(root),
            namespace,
            stats,
        })
    }
}

/// Replicate `expr` with default limits.
///
/// # Errors
/// See [`Replicator::replicate_traced`].
pub fn replicate(expr: &Expr) -> Result<Expr, ReplicateError> {
    Replicator::new().replicate(expr)
}

impl Expr {
    /// Structurally equal copy of this expression built from fresh nodes.
    ///
    /// # Errors
    /// See [`Replicator::replicate_traced`].
    pub fn replicate(&self) -> Result<Self, ReplicateError> {
        replicate(self)
    }
}
