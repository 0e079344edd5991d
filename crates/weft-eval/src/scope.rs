//! Lookup scope for execution: variables and functions by name.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use weft_ast::{Type, Value};

use crate::error::BoxError;

/// A variable value given as input to the engine, together with its type.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub value: Value,
    pub ty: Type,
}

/// The capability boundary for function implementations.
///
/// A callback receives the already-evaluated arguments in their original
/// left-to-right order and returns either a result value or a descriptive
/// failure. The evaluator imposes no calling convention beyond ordered
/// positional arguments.
pub trait Callback: Send + Sync {
    fn call(&self, args: &[Value]) -> Result<Value, BoxError>;
}

impl<F> Callback for F
where
    F: Fn(&[Value]) -> Result<Value, BoxError> + Send + Sync,
{
    fn call(&self, args: &[Value]) -> Result<Value, BoxError> {
        self(args)
    }
}

/// A function that can be executed by the engine.
///
/// `arg_types` is metadata produced by the external type-checking pass; the
/// evaluator does not re-validate argument types at call time. The declared
/// `return_type` tags the callback's result.
#[derive(Clone)]
pub struct Function {
    pub arg_types: Vec<Type>,
    pub return_type: Type,
    pub callback: Arc<dyn Callback>,
}

impl Function {
    pub fn new<F>(arg_types: Vec<Type>, return_type: Type, callback: F) -> Function
    where
        F: Fn(&[Value]) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Function {
            arg_types,
            return_type,
            callback: Arc::new(callback),
        }
    }

    /// Wrap an existing [`Callback`] implementation.
    pub fn from_callback(
        arg_types: Vec<Type>,
        return_type: Type,
        callback: Arc<dyn Callback>,
    ) -> Function {
        Function {
            arg_types,
            return_type,
            callback,
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("arg_types", &self.arg_types)
            .field("return_type", &self.return_type)
            .finish_non_exhaustive()
    }
}

/// A lookup scope for execution.
///
/// Constructed by the caller before execution and read-only for the duration
/// of an `execute` call. The evaluator holds an `Option<&Scope>`: an absent
/// scope behaves as "no variables or functions known", never a fault.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    pub variables: HashMap<String, Variable>,
    pub functions: HashMap<String, Function>,
}

impl Scope {
    pub fn new() -> Scope {
        Scope::default()
    }

    /// Look up a variable by name.
    pub fn lookup_variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Look up a function by name.
    pub fn lookup_function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// Define a variable, inferring its type from the value.
    pub fn define_variable(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let value = value.into();
        let ty = value.ty();
        self.variables.insert(name.into(), Variable { value, ty });
    }

    /// Define a function.
    pub fn define_function(&mut self, name: impl Into<String>, function: Function) {
        self.functions.insert(name.into(), function);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_variable() {
        let mut scope = Scope::new();
        scope.define_variable("name", "world");

        let var = scope.lookup_variable("name").expect("variable defined");
        assert_eq!(var.value, Value::from("world"));
        assert_eq!(var.ty, Type::String);

        assert!(scope.lookup_variable("missing").is_none());
    }

    #[test]
    fn test_lookup_function() {
        let mut scope = Scope::new();
        scope.define_function(
            "id",
            Function::new(vec![Type::String], Type::String, |args| Ok(args[0].clone())),
        );

        let func = scope.lookup_function("id").expect("function defined");
        assert_eq!(func.arg_types, vec![Type::String]);
        assert_eq!(func.return_type, Type::String);
        assert!(scope.lookup_function("absent").is_none());
    }

    #[test]
    fn test_redefinition_replaces() {
        let mut scope = Scope::new();
        scope.define_variable("x", "first");
        scope.define_variable("x", "second");
        assert_eq!(
            scope.lookup_variable("x").unwrap().value,
            Value::from("second")
        );
    }
}
