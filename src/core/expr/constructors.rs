//! Expression constructors.
//!
//! Number and symbol constructors always canonicalize (`Integer(0)` is the
//! `Zero` singleton, `Rational(2, 4)` is `Half`). Internal constructors take an
//! `evaluate` switch: when on, they apply the model's automatic
//! simplification; when off, the arguments are stored exactly as given.

use std::sync::Arc;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::{Expr, ExprKind, Head, Symbol, compute_expr_hash, next_id};
use crate::core::assumptions::Assumptions;
use crate::core::error::ExprError;
use crate::core::number::{Literal, Number, Singleton};

impl Expr {
    /// Create a new expression with fresh ID
    #[must_use]
    pub fn new(kind: ExprKind) -> Self {
        let hash = compute_expr_hash(&kind);
        Self {
            id: next_id(),
            hash,
            kind,
        }
    }

    // -------------------------------------------------------------------------
    // Leaf constructors
    // -------------------------------------------------------------------------

    /// Plain host literal (`3`, `2.5`), not a library number.
    #[must_use]
    pub fn literal(lit: impl Into<Literal>) -> Self {
        Self::new(ExprKind::Literal(lit.into()))
    }

    #[must_use]
    pub fn singleton(s: Singleton) -> Self {
        Self::new(ExprKind::Singleton(s))
    }

    #[must_use]
    pub fn zero() -> Self {
        Self::singleton(Singleton::Zero)
    }

    #[must_use]
    pub fn one() -> Self {
        Self::singleton(Singleton::One)
    }

    #[must_use]
    pub fn neg_one() -> Self {
        Self::singleton(Singleton::NegativeOne)
    }

    #[must_use]
    pub fn half() -> Self {
        Self::singleton(Singleton::Half)
    }

    #[must_use]
    pub fn infinity() -> Self {
        Self::singleton(Singleton::Infinity)
    }

    /// Integer; 0, 1 and -1 come back as their singletons.
    #[must_use]
    pub fn integer(n: impl Into<BigInt>) -> Self {
        let n = n.into();
        if n.is_zero() {
            Self::zero()
        } else if n.is_one() {
            Self::one()
        } else if n == -BigInt::one() {
            Self::neg_one()
        } else {
            Self::new(ExprKind::Integer(n))
        }
    }

    /// Rational `p/q`, reduced to lowest terms.
    ///
    /// # Errors
    /// Returns `ExprError::ZeroDenominator` if `q` is zero.
    pub fn rational(p: impl Into<BigInt>, q: impl Into<BigInt>) -> Result<Self, ExprError> {
        let q = q.into();
        if q.is_zero() {
            return Err(ExprError::ZeroDenominator);
        }
        Ok(Self::from_rational(BigRational::new(p.into(), q)))
    }

    pub(crate) fn from_rational(r: BigRational) -> Self {
        if r.is_integer() {
            return Self::integer(r.to_integer());
        }
        if *r.numer() == BigInt::one() && *r.denom() == BigInt::from(2) {
            return Self::half();
        }
        Self::new(ExprKind::Rational(r))
    }

    #[must_use]
    pub fn float(x: f64) -> Self {
        Self::new(ExprKind::Float(x))
    }

    pub(crate) fn from_number(n: Number) -> Self {
        match n {
            Number::Exact(r) => Self::from_rational(r),
            Number::Float(x) => Self::float(x),
        }
    }

    /// Symbol with default assumptions (`commutative=true`).
    pub fn symbol(name: impl AsRef<str>) -> Self {
        Self::symbol_with(name, Assumptions::default())
    }

    pub fn symbol_with(name: impl AsRef<str>, assumptions: Assumptions) -> Self {
        Self::new(ExprKind::Symbol(Symbol {
            name: Arc::from(name.as_ref()),
            assumptions,
        }))
    }

    /// Symbol with keyword-style assumptions, e.g. `[("positive", true)]`.
    ///
    /// # Errors
    /// Returns `ExprError::UnknownAssumption` for an unrecognized keyword.
    pub fn symbol_kw<'a, I>(name: impl AsRef<str>, flags: I) -> Result<Self, ExprError>
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        Ok(Self::symbol_with(name, Assumptions::from_pairs(flags)?))
    }

    // -------------------------------------------------------------------------
    // Internal node constructors
    // -------------------------------------------------------------------------

    /// Sum with automatic simplification.
    #[must_use]
    pub fn add(terms: Vec<Self>) -> Self {
        build_add(wrap(terms), true)
    }

    /// Sum kept exactly as given.
    #[must_use]
    pub fn add_unevaluated(terms: Vec<Self>) -> Self {
        build_add(wrap(terms), false)
    }

    /// Product with automatic simplification.
    #[must_use]
    pub fn mul(factors: Vec<Self>) -> Self {
        build_mul(wrap(factors), true)
    }

    /// Product kept exactly as given.
    #[must_use]
    pub fn mul_unevaluated(factors: Vec<Self>) -> Self {
        build_mul(wrap(factors), false)
    }

    /// Power with automatic simplification.
    #[must_use]
    pub fn pow(base: Self, exp: Self) -> Self {
        build_pow(Arc::new(base), Arc::new(exp), true)
    }

    /// Power kept exactly as given.
    #[must_use]
    pub fn pow_unevaluated(base: Self, exp: Self) -> Self {
        build_pow(Arc::new(base), Arc::new(exp), false)
    }

    /// Applied undefined function `name(args...)`.
    pub fn function(name: impl AsRef<str>, args: Vec<Self>) -> Self {
        Self::new(ExprKind::Function {
            name: Arc::from(name.as_ref()),
            args: wrap(args),
        })
    }
}

impl Head {
    /// Invoke this head's constructor on already-built arguments.
    ///
    /// # Errors
    /// Returns `ExprError::Arity` when `Pow` does not get exactly two arguments.
    pub fn build(&self, args: Vec<Arc<Expr>>, evaluate: bool) -> Result<Expr, ExprError> {
        match self {
            Self::Add => Ok(build_add(args, evaluate)),
            Self::Mul => Ok(build_mul(args, evaluate)),
            Self::Pow => {
                let [base, exp]: [Arc<Expr>; 2] =
                    args.try_into().map_err(|rest: Vec<Arc<Expr>>| ExprError::Arity {
                        head: "Pow",
                        expected: 2,
                        got: rest.len(),
                    })?;
                Ok(build_pow(base, exp, evaluate))
            }
            Self::Function(name) => Ok(Expr::new(ExprKind::Function {
                name: Arc::clone(name),
                args,
            })),
        }
    }
}

fn wrap(exprs: Vec<Expr>) -> Vec<Arc<Expr>> {
    exprs.into_iter().map(Arc::new).collect()
}

/// Numeric value of a finite number leaf.
fn numeric_value(e: &Expr) -> Option<Number> {
    match &e.kind {
        ExprKind::Literal(lit) => Some(Number::from(*lit)),
        ExprKind::Singleton(s) => s.to_rational().map(Number::Exact),
        ExprKind::Integer(n) => Some(Number::Exact(BigRational::from_integer(n.clone()))),
        ExprKind::Rational(r) => Some(Number::Exact(r.clone())),
        ExprKind::Float(x) => Some(Number::Float(*x)),
        _ => None,
    }
}

fn integer_value(e: &Expr) -> Option<BigInt> {
    match &e.kind {
        ExprKind::Literal(Literal::Int(n)) => Some(BigInt::from(*n)),
        ExprKind::Singleton(Singleton::Zero) => Some(BigInt::zero()),
        ExprKind::Singleton(Singleton::One) => Some(BigInt::one()),
        ExprKind::Singleton(Singleton::NegativeOne) => Some(-BigInt::one()),
        ExprKind::Integer(n) => Some(n.clone()),
        _ => None,
    }
}

/// Identity for no arguments, the argument itself for one, otherwise the node.
fn collapse(
    mut args: Vec<Arc<Expr>>,
    identity: Singleton,
    make: fn(Vec<Arc<Expr>>) -> ExprKind,
) -> Expr {
    match args.len() {
        0 => Expr::singleton(identity),
        1 => args.pop().map_or_else(|| Expr::singleton(identity), Arc::unwrap_or_clone),
        _ => Expr::new(make(args)),
    }
}

/// Splice the arguments of nested nodes of the same kind.
fn flatten(
    args: Vec<Arc<Expr>>,
    same_kind: fn(&ExprKind) -> Option<&Vec<Arc<Expr>>>,
) -> Vec<Arc<Expr>> {
    let mut out = Vec::with_capacity(args.len());
    for a in args {
        match same_kind(&a.kind) {
            Some(inner) => out.extend(inner.iter().cloned()),
            None => out.push(a),
        }
    }
    out
}

fn add_args(kind: &ExprKind) -> Option<&Vec<Arc<Expr>>> {
    match kind {
        ExprKind::Add(inner) => Some(inner),
        _ => None,
    }
}

fn mul_args(kind: &ExprKind) -> Option<&Vec<Arc<Expr>>> {
    match kind {
        ExprKind::Mul(inner) => Some(inner),
        _ => None,
    }
}

/// Split numeric leaves from the rest, folding the numbers with `fold`.
fn fold_numbers(
    args: Vec<Arc<Expr>>,
    fold: fn(Number, Number) -> Number,
) -> (Option<Number>, Vec<Arc<Expr>>) {
    let mut coeff: Option<Number> = None;
    let mut rest = Vec::with_capacity(args.len());
    for a in args {
        match (numeric_value(&a), coeff.take()) {
            (Some(n), Some(c)) => coeff = Some(fold(c, n)),
            (Some(n), None) => coeff = Some(n),
            (None, c) => {
                coeff = c;
                rest.push(a);
            }
        }
    }
    (coeff, rest)
}

fn build_add(args: Vec<Arc<Expr>>, evaluate: bool) -> Expr {
    if !evaluate {
        return Expr::new(ExprKind::Add(args));
    }
    let flat = flatten(args, add_args);
    let (coeff, mut terms) = fold_numbers(flat, Number::plus);
    if let Some(c) = coeff
        && !c.is_zero()
    {
        terms.insert(0, Arc::new(Expr::from_number(c)));
    }
    collapse(terms, Singleton::Zero, ExprKind::Add)
}

fn build_mul(args: Vec<Arc<Expr>>, evaluate: bool) -> Expr {
    if !evaluate {
        return Expr::new(ExprKind::Mul(args));
    }
    let flat = flatten(args, mul_args);
    let (coeff, mut factors) = fold_numbers(flat, Number::times);
    if let Some(c) = coeff {
        if c.is_zero() {
            return Expr::from_number(c);
        }
        if !c.is_one() {
            factors.insert(0, Arc::new(Expr::from_number(c)));
        }
    }
    collapse(factors, Singleton::One, ExprKind::Mul)
}

fn build_pow(base: Arc<Expr>, exp: Arc<Expr>, evaluate: bool) -> Expr {
    if evaluate {
        let exp_is = |s: Singleton| matches!(exp.kind, ExprKind::Singleton(k) if k == s);
        if exp_is(Singleton::Zero) || matches!(base.kind, ExprKind::Singleton(Singleton::One)) {
            return Expr::one();
        }
        if exp_is(Singleton::One) {
            return Arc::unwrap_or_clone(base);
        }
        if let (Some(b), Some(e)) = (numeric_value(&base), integer_value(&exp))
            && let Some(value) = b.powi(&e)
        {
            return Expr::from_number(value);
        }
    }
    Expr::new(ExprKind::Pow([base, exp]))
}
