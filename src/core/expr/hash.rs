//! Structural hashing.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use super::ExprKind;
use crate::core::number::Literal;

/// Compute the structural hash of a kind.
///
/// Children contribute their own cached hash, in order, so hashing a node is
/// O(arity) rather than O(tree).
#[must_use]
pub fn compute_expr_hash(kind: &ExprKind) -> u64 {
    let mut h = FxHasher::default();
    match kind {
        ExprKind::Literal(Literal::Int(n)) => {
            h.write_u8(b'l');
            h.write_i64(*n);
        }
        ExprKind::Literal(Literal::Float(x)) => {
            h.write_u8(b'L');
            h.write_u64(x.to_bits());
        }
        ExprKind::Singleton(s) => {
            h.write_u8(b'c');
            s.hash(&mut h);
        }
        ExprKind::Integer(n) => {
            h.write_u8(b'i');
            n.hash(&mut h);
        }
        ExprKind::Rational(r) => {
            h.write_u8(b'q');
            r.hash(&mut h);
        }
        ExprKind::Float(x) => {
            h.write_u8(b'f');
            h.write_u64(x.to_bits());
        }
        ExprKind::Symbol(s) => {
            h.write_u8(b's');
            s.hash(&mut h);
        }
        ExprKind::Add(args) => {
            h.write_u8(b'+');
            for a in args {
                h.write_u64(a.hash);
            }
        }
        ExprKind::Mul(args) => {
            h.write_u8(b'*');
            for a in args {
                h.write_u64(a.hash);
            }
        }
        ExprKind::Pow([base, exp]) => {
            h.write_u8(b'^');
            h.write_u64(base.hash);
            h.write_u64(exp.hash);
        }
        ExprKind::Function { name, args } => {
            h.write_u8(b'F');
            name.hash(&mut h);
            h.write_usize(args.len());
            for a in args {
                h.write_u64(a.hash);
            }
        }
    }
    h.finish()
}
