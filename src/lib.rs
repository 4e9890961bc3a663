//! Structure-Preserving Expression Replication
//!
//! Builds an independent copy of a symbolic expression tree without letting
//! any automatic simplification run, so an unevaluated `2 + 3` stays `2 + 3`.
//!
//! # Features
//! - Small symbolic expression model with `evaluate` switches on its constructors
//! - Replication through each node's own constructor, bottom-up
//! - Symbol assumptions, exact rationals and named constants are carried over
//! - Constructor namespace and node counts reported per run
//! - Depth and node-count limits for untrusted input
//! - Parallel batch replication (`parallel` feature)
//!
//! # Usage
//!
//! ```
//! use symb_replica::{Assumption, Assumptions, Expr};
//!
//! let n = Expr::symbol_with("n", Assumptions::new().with(Assumption::Positive, true));
//! let e = Expr::mul_unevaluated(vec![Expr::integer(2), Expr::integer(3), n]);
//!
//! let copy = e.replicate().unwrap();
//! assert_eq!(copy, e);
//! assert_eq!(copy.to_string(), "2*3*n");
//! ```
//!
//! Leaves with no rebuild rule fail the whole run:
//!
//! ```
//! use symb_replica::{Expr, ReplicateError, Singleton, replicate};
//!
//! let e = Expr::add_unevaluated(vec![Expr::singleton(Singleton::Pi), Expr::one()]);
//! assert!(matches!(replicate(&e), Err(ReplicateError::UnsupportedType { .. })));
//! ```

mod core;
pub mod replicate;

#[cfg(feature = "parallel")]
pub mod parallel;


// Re-export key types for easier usage
pub use crate::core::{
    Assumption, Assumptions, Constructor, Expr, ExprError, ExprKind, Head, Literal, Singleton,
    SingletonFamily, Symbol, compute_expr_hash,
};
pub use replicate::{
    ExprPath, Limits, Namespace, Replica, ReplicaStats, ReplicateError, Replicator, replicate,
};

/// Default maximum tree depth
pub const DEFAULT_MAX_DEPTH: usize = 10_000;
/// Default maximum node count
pub const DEFAULT_MAX_NODES: usize = 1_000_000;
