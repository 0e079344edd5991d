//! Execution engine for the Weft interpolation language.
//!
//! Trees produced by the parser and validated by the type checker are
//! executed here: an [`Engine`] runs optional semantic checks, then an
//! [`Evaluator`] walks the tree in post-order with an explicit value stack,
//! resolving variables and functions against a read-only [`Scope`], and
//! produces one final `(Value, Type)` pair or the first error encountered.

mod engine;
mod error;
mod evaluator;
mod scope;

pub use engine::{Engine, SemanticCheck};
pub use error::{BoxError, Error};
pub use evaluator::Evaluator;
pub use scope::{Callback, Function, Scope, Variable};

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
