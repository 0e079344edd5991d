//! Error types for the execution engine.

/// Opaque failure produced across the callback and semantic-check
/// boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while executing a tree.
///
/// Every error is fatal to the enclosing `execute`/`visit` call: no partial
/// results, no retry. At most one error is produced per call, the first one
/// encountered in post-order traversal.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A variable access referenced a name absent from the active scope.
    #[error("unknown variable accessed: {0}")]
    UnknownVariable(String),

    /// A call referenced a function name absent from the active scope.
    #[error("unknown function called: {0}")]
    UnknownFunction(String),

    /// A function's callback failed; the function name is attached as
    /// context.
    #[error("{name}: {source}")]
    FunctionCall {
        name: String,
        #[source]
        source: BoxError,
    },

    /// The traversal encountered a node kind it does not evaluate. This is
    /// a defect in the tree producer, surfaced rather than ignored.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// A pre-execution semantic check rejected the tree.
    #[error("semantic check failed: {source}")]
    SemanticCheck {
        #[source]
        source: BoxError,
    },
}
