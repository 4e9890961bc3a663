//! Numeric leaves of the expression model.
//!
//! Two families of numbers live here:
//! - [`Literal`] - plain host numbers (`i64` / `f64`) embedded directly in a tree
//! - [`Singleton`] - the named numeric constants (`0`, `1`, `-1`, `1/2`, `oo`, `pi`, ...)
//!
//! Generic integers, rationals and floats are stored directly on
//! [`ExprKind`](super::ExprKind). The [`Number`] helper type is the common
//! currency used by evaluating constructors when they fold numeric terms.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};

/// A plain host numeric literal.
///
/// Literals are not library numbers: they carry no constructor and rebuild
/// as themselves. Floats compare by bit pattern, so `NaN` equals itself.
#[derive(Debug, Clone, Copy)]
pub enum Literal {
    Int(i64),
    Float(f64),
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Literal {}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x:?}"),
        }
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Literal {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

/// Named numeric constants. Each exists as a single canonical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Singleton {
    Zero,
    One,
    NegativeOne,
    Half,
    Infinity,
    NegativeInfinity,
    ComplexInfinity,
    NaN,
    Pi,
    E,
    ImaginaryUnit,
}

/// Constructor family of a [`Singleton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingletonFamily {
    IntegerConstant,
    RationalConstant,
    Infinity,
    Other,
}

impl Singleton {
    /// Constructor name of this singleton.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zero => "Zero",
            Self::One => "One",
            Self::NegativeOne => "NegativeOne",
            Self::Half => "Half",
            Self::Infinity => "Infinity",
            Self::NegativeInfinity => "NegativeInfinity",
            Self::ComplexInfinity => "ComplexInfinity",
            Self::NaN => "NaN",
            Self::Pi => "Pi",
            Self::E => "Exp1",
            Self::ImaginaryUnit => "ImaginaryUnit",
        }
    }

    /// Short printed form (`0`, `oo`, `pi`, ...).
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::One => "1",
            Self::NegativeOne => "-1",
            Self::Half => "1/2",
            Self::Infinity => "oo",
            Self::NegativeInfinity => "-oo",
            Self::ComplexInfinity => "zoo",
            Self::NaN => "nan",
            Self::Pi => "pi",
            Self::E => "E",
            Self::ImaginaryUnit => "I",
        }
    }

    #[must_use]
    pub const fn family(self) -> SingletonFamily {
        match self {
            Self::Zero | Self::One | Self::NegativeOne => SingletonFamily::IntegerConstant,
            Self::Half => SingletonFamily::RationalConstant,
            Self::Infinity => SingletonFamily::Infinity,
            _ => SingletonFamily::Other,
        }
    }

    /// Exact value of the rational singletons, `None` for the rest.
    #[must_use]
    pub fn to_rational(self) -> Option<BigRational> {
        match self {
            Self::Zero => Some(BigRational::zero()),
            Self::One => Some(BigRational::one()),
            Self::NegativeOne => Some(-BigRational::one()),
            Self::Half => Some(BigRational::new(BigInt::one(), BigInt::from(2))),
            _ => None,
        }
    }
}

impl fmt::Display for Singleton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A finite numeric value, used while folding numeric terms.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Number {
    Exact(BigRational),
    Float(f64),
}

impl Number {
    pub(crate) fn plus(self, other: Self) -> Self {
        match (self, other) {
            (Self::Exact(a), Self::Exact(b)) => Self::Exact(a + b),
            (a, b) => Self::Float(a.to_f64() + b.to_f64()),
        }
    }

    pub(crate) fn times(self, other: Self) -> Self {
        match (self, other) {
            (Self::Exact(a), Self::Exact(b)) => Self::Exact(a * b),
            (a, b) => Self::Float(a.to_f64() * b.to_f64()),
        }
    }

    /// Raise to an integer power. `None` when the result is undefined
    /// (zero to a negative power) or the exponent does not fit in `i32`.
    pub(crate) fn powi(&self, exp: &BigInt) -> Option<Self> {
        let e = exp.to_i32()?;
        match self {
            Self::Exact(base) => {
                if base.is_zero() && e < 0 {
                    return None;
                }
                Some(Self::Exact(base.pow(e)))
            }
            Self::Float(x) => Some(Self::Float(x.powi(e))),
        }
    }

    pub(crate) fn is_zero(&self) -> bool {
        match self {
            Self::Exact(r) => r.is_zero(),
            Self::Float(x) => *x == 0.0,
        }
    }

    pub(crate) fn is_one(&self) -> bool {
        match self {
            Self::Exact(r) => r.is_one(),
            Self::Float(x) => *x == 1.0,
        }
    }

    pub(crate) fn to_f64(&self) -> f64 {
        match self {
            Self::Exact(r) => r.to_f64().unwrap_or(f64::NAN),
            Self::Float(x) => *x,
        }
    }
}

impl From<Literal> for Number {
    fn from(lit: Literal) -> Self {
        match lit {
            Literal::Int(n) => Self::Exact(BigRational::from_integer(BigInt::from(n))),
            Literal::Float(x) => Self::Float(x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_float_bitwise_eq() {
        assert_eq!(Literal::Float(f64::NAN), Literal::Float(f64::NAN));
        assert_ne!(Literal::Float(0.0), Literal::Float(-0.0));
        assert_ne!(Literal::Int(1), Literal::Float(1.0));
    }

    #[test]
    fn test_singleton_families() {
        assert_eq!(Singleton::Zero.family(), SingletonFamily::IntegerConstant);
        assert_eq!(Singleton::NegativeOne.family(), SingletonFamily::IntegerConstant);
        assert_eq!(Singleton::Half.family(), SingletonFamily::RationalConstant);
        assert_eq!(Singleton::Infinity.family(), SingletonFamily::Infinity);
        assert_eq!(Singleton::NegativeInfinity.family(), SingletonFamily::Other);
        assert_eq!(Singleton::Pi.family(), SingletonFamily::Other);
    }

    #[test]
    fn test_exact_folding_stays_exact() {
        let half = Number::Exact(Singleton::Half.to_rational().unwrap());
        let sum = half.clone().plus(half);
        assert!(sum.is_one());
        assert!(matches!(sum, Number::Exact(_)));
    }

    #[test]
    fn test_float_contaminates() {
        let n = Number::from(Literal::Int(2)).times(Number::Float(0.5));
        assert_eq!(n, Number::Float(1.0));
    }

    #[test]
    fn test_powi_zero_negative_is_undefined() {
        let zero = Number::Exact(BigRational::zero());
        assert!(zero.powi(&BigInt::from(-1)).is_none());
        let two = Number::from(Literal::Int(2));
        assert_eq!(
            two.powi(&BigInt::from(-2)),
            Some(Number::Exact(BigRational::new(BigInt::one(), BigInt::from(4))))
        );
    }
}
