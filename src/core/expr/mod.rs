//! Expression model.
//!
//! This module defines:
//! - `Expr` - the expression node (unique id + structural hash + kind)
//! - `ExprKind` - the node variants (numbers, symbols, sums, products, powers, functions)
//! - `Head` - the originating constructor of an internal node
//! - `Constructor` - module path and name of the constructor that produced a node
//!
//! # Structural equality
//!
//! Equality compares structure only: two nodes are equal when their kinds are
//! equal, whatever their ids. Argument order is significant, since an
//! unevaluated `Add(1, x)` and `Add(x, 1)` are different trees. Each `Expr`
//! carries a pre-computed hash for fast rejection.
//!
//! # Identity
//!
//! Every constructed node gets a fresh `id`. Two structurally equal trees built
//! independently have different ids at every node.

mod constructors;
mod hash;

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use num_bigint::BigInt;
use num_rational::BigRational;

use super::assumptions::Assumptions;
use super::number::{Literal, Singleton};

pub use hash::compute_expr_hash;

static EXPR_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    EXPR_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A symbolic expression node.
#[derive(Debug, Clone)]
pub struct Expr {
    /// Unique ID (not used in equality comparisons)
    pub(crate) id: u64,
    /// Structural hash for O(1) equality rejection
    pub(crate) hash: u64,
    pub(crate) kind: ExprKind,
}

impl Deref for Expr {
    type Target = ExprKind;
    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

impl PartialEq for Expr {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        if self.hash != other.hash {
            return false;
        }
        self.kind == other.kind
    }
}

impl Eq for Expr {}

impl std::hash::Hash for Expr {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

/// A named symbol and its assumptions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub(crate) name: Arc<str>,
    pub(crate) assumptions: Assumptions,
}

impl Symbol {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }
}

/// The kind (structure) of an expression node.
///
/// Float payloads compare by bit pattern, matching the structural hash.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Plain host numeric literal
    Literal(Literal),
    /// Named numeric constant (`0`, `1`, `-1`, `1/2`, `oo`, `pi`, ...)
    Singleton(Singleton),
    /// Integer other than 0, 1 and -1
    Integer(BigInt),
    /// Reduced rational with denominator > 1, other than 1/2
    Rational(BigRational),
    /// Floating point number
    Float(f64),
    Symbol(Symbol),
    /// N-ary sum, arguments in construction order
    Add(Vec<Arc<Expr>>),
    /// N-ary product, arguments in construction order
    Mul(Vec<Arc<Expr>>),
    /// `[base, exponent]`
    Pow([Arc<Expr>; 2]),
    /// Applied undefined function `name(args...)`
    Function {
        name: Arc<str>,
        args: Vec<Arc<Expr>>,
    },
}

impl PartialEq for ExprKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Singleton(a), Self::Singleton(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Rational(a), Self::Rational(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Symbol(a), Self::Symbol(b)) => a == b,
            (Self::Add(a), Self::Add(b)) | (Self::Mul(a), Self::Mul(b)) => a == b,
            (Self::Pow(a), Self::Pow(b)) => a == b,
            (
                Self::Function { name: n1, args: a1 },
                Self::Function { name: n2, args: a2 },
            ) => n1 == n2 && a1 == a2,
            _ => false,
        }
    }
}

impl Eq for ExprKind {}

impl ExprKind {
    /// Short name of the kind, used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Literal(Literal::Int(_)) => "int",
            Self::Literal(Literal::Float(_)) => "float",
            Self::Singleton(s) => s.name(),
            Self::Integer(_) => "Integer",
            Self::Rational(_) => "Rational",
            Self::Float(_) => "Float",
            Self::Symbol(_) => "Symbol",
            Self::Add(_) => "Add",
            Self::Mul(_) => "Mul",
            Self::Pow(_) => "Pow",
            Self::Function { .. } => "Function",
        }
    }
}

/// Originating constructor of an internal (argument-carrying) node kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Head {
    Add,
    Mul,
    Pow,
    Function(Arc<str>),
}

impl Head {
    #[must_use]
    pub const fn module(&self) -> &'static str {
        match self {
            Self::Add => "core.add",
            Self::Mul => "core.mul",
            Self::Pow => "core.power",
            Self::Function(_) => "core.function",
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Add => "Add",
            Self::Mul => "Mul",
            Self::Pow => "Pow",
            Self::Function(name) => name,
        }
    }

    #[must_use]
    pub fn constructor(&self) -> Constructor<'_> {
        Constructor {
            module: self.module(),
            name: self.name(),
        }
    }
}

/// Module path and name of the constructor that produces a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constructor<'a> {
    pub module: &'static str,
    pub name: &'a str,
}

impl fmt::Display for Constructor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}

impl Expr {
    /// Get the unique ID of the expression
    #[inline]
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Get the structural hash of the expression
    #[inline]
    #[must_use]
    pub const fn structural_hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &ExprKind {
        &self.kind
    }

    /// Ordered child expressions. Empty for leaves.
    #[must_use]
    pub fn args(&self) -> &[Arc<Self>] {
        match &self.kind {
            ExprKind::Add(args) | ExprKind::Mul(args) | ExprKind::Function { args, .. } => args,
            ExprKind::Pow(pair) => pair,
            _ => &[],
        }
    }

    /// True when the node has no sub-expression arguments.
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.args().is_empty()
    }

    /// Head of an internal node kind; `None` for number and symbol kinds.
    #[must_use]
    pub fn head(&self) -> Option<Head> {
        match &self.kind {
            ExprKind::Add(_) => Some(Head::Add),
            ExprKind::Mul(_) => Some(Head::Mul),
            ExprKind::Pow(_) => Some(Head::Pow),
            ExprKind::Function { name, .. } => Some(Head::Function(Arc::clone(name))),
            _ => None,
        }
    }

    /// Constructor that produced this node. Plain literals have none.
    #[must_use]
    pub fn constructor(&self) -> Option<Constructor<'_>> {
        let (module, name) = match &self.kind {
            ExprKind::Literal(_) => return None,
            ExprKind::Singleton(s) => ("core.numbers", s.name()),
            ExprKind::Integer(_) => ("core.numbers", "Integer"),
            ExprKind::Rational(_) => ("core.numbers", "Rational"),
            ExprKind::Float(_) => ("core.numbers", "Float"),
            ExprKind::Symbol(_) => ("core.symbol", "Symbol"),
            ExprKind::Add(_) => ("core.add", "Add"),
            ExprKind::Mul(_) => ("core.mul", "Mul"),
            ExprKind::Pow(_) => ("core.power", "Pow"),
            ExprKind::Function { name, .. } => ("core.function", &**name),
        };
        Some(Constructor { module, name })
    }

    #[must_use]
    pub const fn as_symbol(&self) -> Option<&Symbol> {
        match &self.kind {
            ExprKind::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Total number of nodes in the tree (each occurrence counted).
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(e) = stack.pop() {
            count += 1;
            stack.extend(e.args().iter().map(AsRef::as_ref));
        }
        count
    }

    /// Depth of the tree; a lone leaf has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((e, d)) = stack.pop() {
            max_depth = max_depth.max(d);
            stack.extend(e.args().iter().map(|a| (a.as_ref(), d + 1)));
        }
        max_depth
    }

    /// True if `self` and `other` share no node identity anywhere in the tree.
    #[must_use]
    pub fn is_disjoint_from(&self, other: &Self) -> bool {
        let mut ids = rustc_hash::FxHashSet::default();
        let mut stack = vec![self];
        while let Some(e) = stack.pop() {
            ids.insert(e.id);
            stack.extend(e.args().iter().map(AsRef::as_ref));
        }
        let mut stack = vec![other];
        while let Some(e) = stack.pop() {
            if ids.contains(&e.id) {
                return false;
            }
            stack.extend(e.args().iter().map(AsRef::as_ref));
        }
        true
    }
}
