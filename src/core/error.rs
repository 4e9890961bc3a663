//! Errors raised by expression constructors.

use thiserror::Error;

/// Errors that can occur while constructing an expression node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// A constructor received the wrong number of arguments
    #[error("{head} takes exactly {expected} arguments ({got} given)")]
    Arity {
        head: &'static str,
        expected: usize,
        got: usize,
    },

    /// Rational with a zero denominator
    #[error("rational denominator cannot be zero")]
    ZeroDenominator,

    /// Assumption keyword that is not recognized
    #[error("unknown assumption '{0}'")]
    UnknownAssumption(String),
}
