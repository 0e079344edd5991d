//! Syntax tree nodes.
//!
//! A tree is a strict DAG by construction: the parser only ever builds
//! finite trees, so the evaluation core performs no cycle detection.

use crate::value::{Type, Value};

/// A syntax tree node for one interpolation expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A leaf carrying a concrete value and its type.
    Literal(Literal),
    /// A variable reference, resolved against the active scope at
    /// execution time.
    Variable(VariableAccess),
    /// A function call with ordered argument sub-trees.
    Call(Call),
    /// Ordered sub-trees whose string results are concatenated.
    Concat(Concat),
    /// Binary arithmetic. The parser produces these, but the execution core
    /// does not implement operator semantics and rejects them.
    Arith(Arith),
}

/// A leaf literal: a concrete value paired with its type.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: Value,
    pub ty: Type,
}

/// A variable reference by name.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableAccess {
    pub name: String,
}

/// A function call: `func(args...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub func: String,
    pub args: Vec<Node>,
}

/// String concatenation of the results of `exprs`, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Concat {
    pub exprs: Vec<Node>,
}

/// A binary arithmetic operation over two sub-expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Arith {
    pub op: ArithOp,
    pub exprs: Vec<Node>,
}

/// Arithmetic operator kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl Node {
    /// A literal node, with the type inferred from the value.
    pub fn literal(value: impl Into<Value>) -> Node {
        let value = value.into();
        let ty = value.ty();
        Node::Literal(Literal { value, ty })
    }

    /// A string literal node.
    pub fn string(s: impl Into<String>) -> Node {
        Node::literal(Value::String(s.into()))
    }

    /// A variable access node.
    pub fn variable(name: impl Into<String>) -> Node {
        Node::Variable(VariableAccess { name: name.into() })
    }

    /// A call node with ordered arguments.
    pub fn call(func: impl Into<String>, args: Vec<Node>) -> Node {
        Node::Call(Call {
            func: func.into(),
            args,
        })
    }

    /// A concatenation node over ordered sub-expressions.
    pub fn concat(exprs: Vec<Node>) -> Node {
        Node::Concat(Concat { exprs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_infers_type() {
        match Node::string("hello") {
            Node::Literal(lit) => {
                assert_eq!(lit.value, Value::from("hello"));
                assert_eq!(lit.ty, Type::String);
            }
            other => panic!("Expected literal, got {:?}", other),
        }

        match Node::literal(Value::Int(3)) {
            Node::Literal(lit) => assert_eq!(lit.ty, Type::Int),
            other => panic!("Expected literal, got {:?}", other),
        }
    }

    #[test]
    fn test_call_preserves_argument_order() {
        let node = Node::call("join", vec![Node::string("a"), Node::string("b")]);
        match node {
            Node::Call(call) => {
                assert_eq!(call.func, "join");
                assert_eq!(call.args.len(), 2);
                assert_eq!(call.args[0], Node::string("a"));
                assert_eq!(call.args[1], Node::string("b"));
            }
            other => panic!("Expected call, got {:?}", other),
        }
    }
}
