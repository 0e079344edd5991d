//! Syntax tree and runtime value model for the Weft interpolation language.
//!
//! This crate is the leaf dependency of the workspace: the parser produces
//! [`Node`] trees, the type checker annotates them, and the evaluation core
//! consumes them together with [`Value`]/[`Type`] pairs.

mod node;
mod value;

pub use node::{Arith, ArithOp, Call, Concat, Literal, Node, VariableAccess};
pub use value::{Type, Value};
