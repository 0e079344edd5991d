//! The execution engine: the public entry point for running a tree.

use tracing::debug;
use weft_ast::{Node, Type, Value};

use crate::error::{BoxError, Error};
use crate::evaluator::Evaluator;
use crate::scope::Scope;
use crate::Result;

/// A semantic check run against the root node before execution.
///
/// The type checker, identifier checker, etc. are expected to have run
/// upstream; these are additional host-supplied validations. The first one
/// to fail aborts the execution.
pub type SemanticCheck = Box<dyn Fn(&Node) -> std::result::Result<(), BoxError> + Send + Sync>;

/// The execution engine. Configure it prior to calling
/// [`execute`](Engine::execute).
#[derive(Default)]
pub struct Engine {
    /// The global scope of execution for this engine. `None` behaves as an
    /// empty scope.
    pub global_scope: Option<Scope>,

    /// Semantic checks run on the tree prior to executing it, in
    /// registration order.
    pub semantic_checks: Vec<SemanticCheck>,
}

impl Engine {
    /// An engine with the given global scope and no semantic checks.
    pub fn new(global_scope: Scope) -> Engine {
        Engine {
            global_scope: Some(global_scope),
            semantic_checks: Vec::new(),
        }
    }

    /// Register a semantic check. Checks run in registration order.
    pub fn add_semantic_check(
        &mut self,
        check: impl Fn(&Node) -> std::result::Result<(), BoxError> + Send + Sync + 'static,
    ) {
        self.semantic_checks.push(Box::new(check));
    }

    /// Execute the given tree and return its final value and type.
    ///
    /// Semantic checks run first; if any fails, evaluation never starts and
    /// that failure is returned. Any failure is terminal for this call —
    /// retrying is the caller's decision.
    pub fn execute(&self, root: &Node) -> Result<(Value, Type)> {
        debug!(checks = self.semantic_checks.len(), "executing tree");

        for check in &self.semantic_checks {
            check(root).map_err(|source| Error::SemanticCheck { source })?;
        }

        let evaluator = Evaluator::new(self.global_scope.as_ref());
        evaluator.visit(root)
    }
}
