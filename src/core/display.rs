//! Display implementations for expressions.
//!
//! Two output formats are provided:
//!
//! ## Standard Display (`to_string()` / `{}`)
//! Human-readable notation: `x + 1`, `2*x`, `x**2`, `f(x, y)`, `oo`.
//! Unevaluated nodes print exactly as stored, so `Add(2, 3)` prints `2 + 3`.
//!
//! ## Structural form (`srepr()`)
//! Every node is written as the constructor call that rebuilds it:
//! `Add(Integer(2), Symbol('x', commutative=True))`. Two trees with equal
//! `srepr` output are structurally equal.

use std::fmt::{self, Write};
use std::sync::Arc;

use num_traits::Signed;

use crate::core::number::{Literal, Singleton};
use crate::{Expr, ExprKind};

const PREC_ADD: u8 = 10;
const PREC_MUL: u8 = 20;
const PREC_POW: u8 = 30;
const PREC_ATOM: u8 = 100;

fn precedence(e: &Expr) -> u8 {
    match e.kind() {
        ExprKind::Add(_) => PREC_ADD,
        ExprKind::Mul(_) => PREC_MUL,
        ExprKind::Pow(_) => PREC_POW,
        ExprKind::Literal(Literal::Int(n)) if *n < 0 => PREC_ADD,
        ExprKind::Literal(Literal::Float(x)) if *x < 0.0 => PREC_ADD,
        ExprKind::Integer(n) if n.is_negative() => PREC_ADD,
        ExprKind::Float(x) if *x < 0.0 => PREC_ADD,
        ExprKind::Singleton(Singleton::NegativeOne | Singleton::NegativeInfinity) => PREC_ADD,
        ExprKind::Rational(_) | ExprKind::Singleton(Singleton::Half) => PREC_MUL,
        _ => PREC_ATOM,
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, e: &Expr, strict_below: u8) -> fmt::Result {
    if precedence(e) < strict_below {
        write!(f, "({e})")
    } else {
        write!(f, "{e}")
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    args: &[Arc<Expr>],
    sep: &str,
    prec: u8,
) -> fmt::Result {
    for (i, a) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write_operand(f, a, prec)?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ExprKind::Literal(lit) => write!(f, "{lit}"),
            ExprKind::Singleton(s) => write!(f, "{s}"),
            ExprKind::Integer(n) => write!(f, "{n}"),
            ExprKind::Rational(r) => write!(f, "{}/{}", r.numer(), r.denom()),
            ExprKind::Float(x) => write!(f, "{x:?}"),
            ExprKind::Symbol(s) => f.write_str(s.name()),
            // Only an unevaluated node can be empty
            ExprKind::Add(args) if args.is_empty() => f.write_str("Add()"),
            ExprKind::Mul(args) if args.is_empty() => f.write_str("Mul()"),
            ExprKind::Add(args) => write_joined(f, args, " + ", PREC_ADD),
            ExprKind::Mul(args) => write_joined(f, args, "*", PREC_MUL),
            ExprKind::Pow([base, exp]) => {
                // Pow is right-associative: parenthesize a power base, not a power exponent
                write_operand(f, base, PREC_POW + 1)?;
                f.write_str("**")?;
                write_operand(f, exp, PREC_POW)
            }
            ExprKind::Function { name, args } => {
                write!(f, "{name}(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{a}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl Expr {
    /// Structural representation: the constructor call that rebuilds this tree.
    #[must_use]
    pub fn srepr(&self) -> String {
        Srepr(self).to_string()
    }
}

/// Display adapter printing the structural representation.
struct Srepr<'a>(&'a Expr);

impl fmt::Display for Srepr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.kind() {
            ExprKind::Literal(lit) => write!(f, "{lit}"),
            ExprKind::Singleton(s) => write!(f, "{}()", s.name()),
            ExprKind::Integer(n) => write!(f, "Integer({n})"),
            ExprKind::Rational(r) => write!(f, "Rational({}, {})", r.numer(), r.denom()),
            ExprKind::Float(x) => write!(f, "Float({x:?})"),
            ExprKind::Symbol(s) => {
                write!(f, "Symbol('{}'", s.name())?;
                for (key, value) in s.assumptions().iter() {
                    write!(f, ", {key}={}", if value { "True" } else { "False" })?;
                }
                f.write_char(')')
            }
            ExprKind::Add(args) => write_call(f, "Add", args),
            ExprKind::Mul(args) => write_call(f, "Mul", args),
            ExprKind::Pow(pair) => write_call(f, "Pow", pair),
            ExprKind::Function { name, args } => {
                write!(f, "Function('{name}')")?;
                write_call(f, "", args)
            }
        }
    }
}

fn write_call(f: &mut fmt::Formatter<'_>, head: &str, args: &[Arc<Expr>]) -> fmt::Result {
    write!(f, "{head}(")?;
    for (i, a) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", Srepr(a))?;
    }
    f.write_char(')')
}

#[cfg(test)]
mod tests {
    use crate::core::assumptions::Assumption;
    use crate::{Assumptions, Expr};

    #[test]
    fn test_display_unevaluated_sum() {
        let e = Expr::add_unevaluated(vec![Expr::integer(2), Expr::integer(3)]);
        assert_eq!(e.to_string(), "2 + 3");
    }

    #[test]
    fn test_display_precedence() {
        let x = Expr::symbol("x");
        let sum = Expr::add_unevaluated(vec![x.clone(), Expr::one()]);
        let prod = Expr::mul_unevaluated(vec![Expr::integer(2), sum.clone()]);
        assert_eq!(prod.to_string(), "2*(x + 1)");
        let pow = Expr::pow_unevaluated(sum, Expr::half());
        assert_eq!(pow.to_string(), "(x + 1)**(1/2)");
        let neg = Expr::pow_unevaluated(Expr::integer(-2), x);
        assert_eq!(neg.to_string(), "(-2)**x");
    }

    #[test]
    fn test_display_function_and_constants() {
        let f = Expr::function("f", vec![Expr::symbol("x"), Expr::infinity()]);
        assert_eq!(f.to_string(), "f(x, oo)");
        assert_eq!(Expr::rational(-3, 4).unwrap().to_string(), "-3/4");
        assert_eq!(Expr::float(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_display_empty_unevaluated() {
        assert_eq!(Expr::add_unevaluated(vec![]).to_string(), "Add()");
        assert_eq!(Expr::mul_unevaluated(vec![]).srepr(), "Mul()");
    }

    #[test]
    fn test_srepr() {
        let x = Expr::symbol_with("x", Assumptions::new().with(Assumption::Positive, true));
        let e = Expr::add_unevaluated(vec![Expr::integer(2), x, Expr::half()]);
        assert_eq!(
            e.srepr(),
            "Add(Integer(2), Symbol('x', commutative=True, positive=True), Half())"
        );
        let f = Expr::function("g", vec![Expr::literal(3_i64)]);
        assert_eq!(f.srepr(), "Function('g')(3)");
    }
}
