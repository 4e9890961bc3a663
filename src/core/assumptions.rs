//! Symbol assumptions.
//!
//! Assumptions are declarative boolean facts attached to a symbol
//! (`positive`, `real`, `integer`, ...). They are stored exactly as given;
//! no inference between facts is performed. Every symbol is `commutative`
//! unless told otherwise.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::error::ExprError;

/// A single assumption key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Assumption {
    Commutative,
    Complex,
    Even,
    Finite,
    Imaginary,
    Infinite,
    Integer,
    Negative,
    Nonnegative,
    Nonpositive,
    Nonzero,
    Odd,
    Positive,
    Prime,
    Rational,
    Real,
    Zero,
}

impl Assumption {
    pub const ALL: [Self; 17] = [
        Self::Commutative,
        Self::Complex,
        Self::Even,
        Self::Finite,
        Self::Imaginary,
        Self::Infinite,
        Self::Integer,
        Self::Negative,
        Self::Nonnegative,
        Self::Nonpositive,
        Self::Nonzero,
        Self::Odd,
        Self::Positive,
        Self::Prime,
        Self::Rational,
        Self::Real,
        Self::Zero,
    ];

    /// Keyword name, e.g. `"positive"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Commutative => "commutative",
            Self::Complex => "complex",
            Self::Even => "even",
            Self::Finite => "finite",
            Self::Imaginary => "imaginary",
            Self::Infinite => "infinite",
            Self::Integer => "integer",
            Self::Negative => "negative",
            Self::Nonnegative => "nonnegative",
            Self::Nonpositive => "nonpositive",
            Self::Nonzero => "nonzero",
            Self::Odd => "odd",
            Self::Positive => "positive",
            Self::Prime => "prime",
            Self::Rational => "rational",
            Self::Real => "real",
            Self::Zero => "zero",
        }
    }
}

impl fmt::Display for Assumption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Assumption {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ExprError::UnknownAssumption(s.to_owned()))
    }
}

/// The assumption dictionary of a symbol, ordered by key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assumptions {
    flags: BTreeMap<Assumption, bool>,
}

impl Default for Assumptions {
    fn default() -> Self {
        let mut flags = BTreeMap::new();
        flags.insert(Assumption::Commutative, true);
        Self { flags }
    }
}

impl Assumptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, key: Assumption, value: bool) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: Assumption, value: bool) {
        self.flags.insert(key, value);
    }

    #[must_use]
    pub fn get(&self, key: Assumption) -> Option<bool> {
        self.flags.get(&key).copied()
    }

    /// Build from keyword pairs such as `[("positive", true)]`.
    ///
    /// # Errors
    /// Returns `ExprError::UnknownAssumption` for an unrecognized keyword.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, ExprError>
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut out = Self::default();
        for (key, value) in pairs {
            out.set(key.parse()?, value);
        }
        Ok(out)
    }

    /// Flags in key order.
    pub fn iter(&self) -> impl Iterator<Item = (Assumption, bool)> + '_ {
        self.flags.iter().map(|(k, v)| (*k, *v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl FromIterator<(Assumption, bool)> for Assumptions {
    fn from_iter<T: IntoIterator<Item = (Assumption, bool)>>(iter: T) -> Self {
        let mut out = Self::default();
        for (k, v) in iter {
            out.set(k, v);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_commutative() {
        let a = Assumptions::new();
        assert_eq!(a.get(Assumption::Commutative), Some(true));
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_from_pairs() {
        let a = Assumptions::from_pairs([("positive", true), ("real", true)]).unwrap();
        assert_eq!(a.get(Assumption::Positive), Some(true));
        assert_eq!(a.get(Assumption::Real), Some(true));
        assert_eq!(a.get(Assumption::Integer), None);
    }

    #[test]
    fn test_unknown_keyword() {
        let err = Assumptions::from_pairs([("shiny", true)]).unwrap_err();
        assert_eq!(err, ExprError::UnknownAssumption("shiny".to_string()));
    }

    #[test]
    fn test_commutative_can_be_overridden() {
        let a = Assumptions::new().with(Assumption::Commutative, false);
        assert_eq!(a.get(Assumption::Commutative), Some(false));
    }

    #[test]
    fn test_iteration_is_key_ordered() {
        let a = Assumptions::new()
            .with(Assumption::Real, true)
            .with(Assumption::Even, false);
        let keys: Vec<_> = a.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["commutative", "even", "real"]);
    }
}
