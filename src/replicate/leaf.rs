//! Leaf classification and rebuild.
//!
//! A childless node is classified with a first-match dispatch, in this order:
//!
//! 1. plain host literal
//! 2. integer-constant, rational-constant or infinity singleton
//! 3. generic integer
//! 4. generic float
//! 5. named symbol (with its assumptions)
//! 6. generic rational
//!
//! Anything else is unsupported. The order is part of the contract: earlier
//! classes win even where a later one could also apply.

use std::sync::Arc;

use num_bigint::BigInt;
use num_rational::BigRational;
use tracing::debug;

use super::error::ReplicateError;
use super::namespace::Namespace;
use super::path::ExprPath;
use super::trace::TraceTree;
use crate::core::{Literal, Singleton, SingletonFamily, Symbol};
use crate::{Expr, ExprKind};

/// Recognized leaf kinds, borrowing their payload from the source node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LeafClass<'e> {
    Literal(Literal),
    Constant(Singleton),
    Integer(&'e BigInt),
    Float(f64),
    Symbol(&'e Symbol),
    Rational(&'e BigRational),
}

/// Classify a leaf expression.
///
/// # Errors
/// Returns `ReplicateError::UnsupportedType` if no class matches.
pub fn classify<'e>(expr: &'e Expr, path: &ExprPath) -> Result<LeafClass<'e>, ReplicateError> {
    let class = match expr.kind() {
        ExprKind::Literal(lit) => LeafClass::Literal(*lit),
        ExprKind::Singleton(s) if s.family() != SingletonFamily::Other => LeafClass::Constant(*s),
        ExprKind::Integer(n) => LeafClass::Integer(n),
        ExprKind::Float(x) => LeafClass::Float(*x),
        ExprKind::Symbol(sym) => LeafClass::Symbol(sym),
        ExprKind::Rational(r) => LeafClass::Rational(r),
        other => {
            return Err(ReplicateError::UnsupportedType {
                kind: other.kind_name(),
                path: path.clone(),
            });
        }
    };
    Ok(class)
}

impl LeafClass<'_> {
    /// Rebuild the leaf as the same variant it came from.
    ///
    /// Numbers bypass the canonicalizing constructors, so a hand-built
    /// `Integer(0)` or `Rational(5, 1)` comes back unchanged.
    #[must_use]
    pub fn rebuild(&self) -> Expr {
        match *self {
            Self::Literal(lit) => Expr::literal(lit),
            Self::Constant(s) => Expr::singleton(s),
            Self::Integer(n) => Expr::new(ExprKind::Integer(n.clone())),
            Self::Float(x) => Expr::new(ExprKind::Float(x)),
            Self::Symbol(sym) => Expr::symbol_with(sym.name(), sym.assumptions().iter().collect()),
            Self::Rational(r) => Expr::new(ExprKind::Rational(r.clone())),
        }
    }
}

/// Rebuild every leaf of `tree`, recording the constructors used.
///
/// All leaves are classified before any of them is rebuilt, so an
/// unsupported leaf leaves every fragment unset.
pub(crate) fn rebuild_leaves(
    tree: &TraceTree<'_>,
    namespace: &mut Namespace,
) -> Result<usize, ReplicateError> {
    let classified = tree
        .leaves()
        .map(|key| {
            let node = &tree[key];
            classify(node.expr(), node.path()).map(|class| (key, class))
        })
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|e| debug!(error = %e, "leaf classification failed"))?;

    for (key, class) in &classified {
        let node = &tree[*key];
        let rebuilt = class.rebuild();
        if let Some(ctor) = node.expr().constructor() {
            namespace.record(ctor);
        }
        node.set_fragment(Arc::new(rebuilt))?;
    }
    Ok(classified.len())
}
