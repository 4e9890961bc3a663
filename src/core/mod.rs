//! Core expression model
//!
//! This module contains the fundamental types:
//! - `Expr` / `ExprKind` - Expression tree nodes
//! - `Head` / `Constructor` - Originating constructor metadata
//! - `Literal` / `Singleton` - Numeric leaves
//! - `Assumptions` - Symbol assumption dictionaries
//! - `ExprError` - Constructor errors
//! - Display formatting (`to_string`, `srepr`)

mod display;
pub(crate) mod assumptions;
pub(crate) mod error;
pub(crate) mod expr;
pub(crate) mod number;

pub use assumptions::{Assumption, Assumptions};
pub use error::ExprError;
pub use expr::{Constructor, Expr, ExprKind, Head, Symbol, compute_expr_hash};
pub use number::{Literal, Singleton, SingletonFamily};
