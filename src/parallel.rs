//! Parallel batch replication using Rayon
//!
//! Each expression is replicated independently on the Rayon pool; runs share
//! no state beyond the global node id counter.
//!
//! Enable with the `parallel` feature:
//! ```toml
//! symb_replica = { version = "0.1", features = ["parallel"] }
//! ```

use rayon::prelude::*;

use crate::Expr;
use crate::replicate::{ReplicateError, Replicator};

/// Replicate every expression in `exprs` with default limits.
///
/// Results keep the input order. One failure does not affect the others.
#[must_use]
pub fn replicate_batch(exprs: &[Expr]) -> Vec<Result<Expr, ReplicateError>> {
    Replicator::new().replicate_batch(exprs)
}

impl Replicator {
    /// Replicate a batch in parallel with this configuration.
    #[must_use]
    pub fn replicate_batch(&self, exprs: &[Expr]) -> Vec<Result<Expr, ReplicateError>> {
        exprs.par_iter().map(|e| self.replicate(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Singleton;

    #[test]
    fn test_batch_preserves_order() {
        let exprs: Vec<Expr> = (0..32)
            .map(|i| Expr::add_unevaluated(vec![Expr::integer(i + 2), Expr::symbol("x")]))
            .collect();
        let results = replicate_batch(&exprs);
        assert_eq!(results.len(), exprs.len());
        for (original, result) in exprs.iter().zip(&results) {
            let copy = result.as_ref().unwrap();
            assert_eq!(copy, original);
            assert!(copy.is_disjoint_from(original));
        }
    }

    #[test]
    fn test_batch_isolates_failures() {
        let exprs = vec![
            Expr::symbol("x"),
            Expr::mul_unevaluated(vec![Expr::singleton(Singleton::Pi), Expr::symbol("r")]),
            Expr::integer(7),
        ];
        let results = replicate_batch(&exprs);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(ReplicateError::UnsupportedType { kind: "Pi", .. })
        ));
        assert_eq!(results[2].as_ref().unwrap(), &Expr::integer(7));
    }

    #[test]
    fn test_batch_uses_limits() {
        let deep = Expr::function("f", vec![Expr::function("g", vec![Expr::symbol("x")])]);
        let results = Replicator::new().max_depth(1).replicate_batch(&[deep]);
        assert_eq!(
            results[0],
            Err(ReplicateError::MaxDepthExceeded { limit: 1 })
        );
    }
}
