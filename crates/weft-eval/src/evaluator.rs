//! The stack-machine evaluator.
//!
//! Trees are walked in post-order with an explicit value stack: literals
//! push their result, composite nodes pop the results of their children.
//! Because children are pushed in visitation order, the most recently
//! visited child is on top, so composite nodes pop exactly as many values
//! as they have children and reverse them to recover the original
//! left-to-right order. Callbacks observe that order; changing it would be
//! an observable behavior change.

use std::sync::Mutex;

use tracing::trace;
use weft_ast::{Call, Concat, Node, Type, Value, VariableAccess};

use crate::error::Error;
use crate::scope::Scope;
use crate::Result;

/// Executes a syntax tree against a scope, producing one `(Value, Type)`
/// pair or the first error encountered in post-order.
///
/// At this point the tree is assumed to have passed type checking and
/// identifier resolution upstream.
///
/// One instance may be shared across threads: a lock serializes whole
/// [`visit`](Evaluator::visit) calls, so concurrent executions never
/// interleave. The scratch state is reset at the end of every call, making
/// the instance reusable for independent executions.
pub struct Evaluator<'a> {
    scope: Option<&'a Scope>,
    state: Mutex<EvalState>,
}

/// Scratch state for one execution: the operand stack and the error slot.
#[derive(Default)]
struct EvalState {
    stack: Vec<(Value, Type)>,
    err: Option<Error>,
}

impl EvalState {
    fn push(&mut self, value: Value, ty: Type) {
        self.stack.push((value, ty));
    }

    fn pop(&mut self) -> (Value, Type) {
        // Underflow means the tree producer handed us a malformed tree;
        // trees built from the weft-ast constructors cannot trigger this.
        self.stack.pop().expect("value stack underflow")
    }

    fn fail(&mut self, err: Error) {
        self.err = Some(err);
    }
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator bound to the given scope. `None` behaves as a
    /// scope with no variables or functions.
    pub fn new(scope: Option<&'a Scope>) -> Evaluator<'a> {
        Evaluator {
            scope,
            state: Mutex::new(EvalState::default()),
        }
    }

    /// Execute the tree rooted at `root`.
    ///
    /// Returns the final value and type, or the first error encountered in
    /// post-order. An empty result (nothing was pushed) yields the zero
    /// value `(Value::Null, Type::Invalid)`.
    pub fn visit(&self, root: &Node) -> Result<(Value, Type)> {
        // Hold the lock for the whole call: traversal, extraction, reset.
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        self.walk(&mut state, root);

        let result = state.stack.pop().unwrap_or_default();
        let err = state.err.take();
        state.stack.clear();

        match err {
            Some(err) => {
                trace!(error = %err, "evaluation failed");
                Err(err)
            }
            None => Ok(result),
        }
    }

    /// Post-order walk. Once the error slot is set, every subsequent visit
    /// is a no-op, so the stack is never touched after a failure and the
    /// first error in traversal order is the one surfaced.
    fn walk(&self, state: &mut EvalState, node: &Node) {
        if state.err.is_some() {
            return;
        }

        match node {
            Node::Literal(lit) => state.push(lit.value.clone(), lit.ty),
            Node::Variable(var) => self.eval_variable(state, var),
            Node::Call(call) => {
                for arg in &call.args {
                    self.walk(state, arg);
                }
                if state.err.is_none() {
                    self.eval_call(state, call);
                }
            }
            Node::Concat(concat) => {
                for expr in &concat.exprs {
                    self.walk(state, expr);
                }
                if state.err.is_none() {
                    self.eval_concat(state, concat);
                }
            }
            Node::Arith(arith) => {
                // Arithmetic is parsed upstream but not evaluated here.
                state.fail(Error::UnknownNode(format!("{:?}", arith)));
            }
        }
    }

    fn eval_variable(&self, state: &mut EvalState, var: &VariableAccess) {
        match self.scope.and_then(|s| s.lookup_variable(&var.name)) {
            Some(variable) => state.push(variable.value.clone(), variable.ty),
            None => state.fail(Error::UnknownVariable(var.name.clone())),
        }
    }

    fn eval_call(&self, state: &mut EvalState, call: &Call) {
        let Some(function) = self.scope.and_then(|s| s.lookup_function(&call.func)) else {
            state.fail(Error::UnknownFunction(call.func.clone()));
            return;
        };

        // The arguments are on the stack in reverse order; pop and reverse
        // to recover the original left-to-right order.
        let mut args: Vec<Value> = (0..call.args.len()).map(|_| state.pop().0).collect();
        args.reverse();

        match function.callback.call(&args) {
            Ok(value) => state.push(value, function.return_type),
            Err(source) => state.fail(Error::FunctionCall {
                name: call.func.clone(),
                source,
            }),
        }
    }

    fn eval_concat(&self, state: &mut EvalState, concat: &Concat) {
        let operands: Vec<(Value, Type)> =
            (0..concat.exprs.len()).map(|_| state.pop()).collect();

        let mut out = String::new();
        for (value, _) in operands.iter().rev() {
            match value {
                Value::String(s) => out.push_str(s),
                // The type checker guarantees string operands; a violation
                // is an upstream defect, not a runtime condition.
                other => panic!("concat operand is not a string: {:?}", other),
            }
        }

        state.push(Value::String(out), Type::String);
    }
}
