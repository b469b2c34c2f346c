//! Named scalar functions callable from queries
//!
//! The registry is an explicit value: build it, register into it, then hand
//! it to the engine. Functions are called with the already-evaluated argument
//! values.

use crate::error::{EvalError, EvalResult};
use cql2_types::Value;
use indexmap::IndexMap;
use std::sync::Arc;

/// Type alias for function implementations
pub type ScalarFn = Arc<dyn Fn(&[Value]) -> EvalResult<Value> + Send + Sync>;

/// Name to implementation mapping, in registration order
#[derive(Default, Clone)]
pub struct FunctionRegistry {
    functions: IndexMap<String, ScalarFn>,
}

impl FunctionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in functions
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("avg", avg);
        registry.register("Buffer", |_: &[Value]| {
            Err(EvalError::unsupported("function Buffer"))
        });
        registry.register("related_bins", |_: &[Value]| {
            Err(EvalError::unsupported("function related_bins"))
        });
        registry
    }

    /// Register a function. Registering a name again replaces the earlier
    /// implementation.
    pub fn register<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(&[Value]) -> EvalResult<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.functions.contains_key(&name) {
            log::warn!("Function {name} is registered again, replacing the previous one");
        }
        self.functions.insert(name, Arc::new(function));
    }

    /// Get a function by name
    pub fn get(&self, name: &str) -> Option<&ScalarFn> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Arithmetic mean of one array argument.
///
/// All elements must share one numeric variant. An empty array averages to
/// null.
pub fn avg(args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(EvalError::arity_mismatch("avg", 1, args.len()));
    }
    let Some(elements) = args[0].as_array() else {
        return Err(EvalError::type_mismatch(
            "avg",
            format!("expect 1 argument with type array but get {}", args[0].type_name()),
        ));
    };
    let Some(first) = elements.first() else {
        return Ok(Value::Null);
    };
    if elements.iter().any(|e| e.tag() != first.tag()) {
        return Err(EvalError::type_mismatch(
            "avg",
            "type mismatched between arguments of avg",
        ));
    }

    let mut sum = 0.0;
    for element in elements {
        match element {
            Value::Int64(_) | Value::UInt64(_) | Value::Double(_) => {
                sum += element.as_f64().unwrap_or_default();
            }
            other => {
                return Err(EvalError::type_mismatch(
                    "avg",
                    format!(
                        "can only calculate average for double and int values, got {}",
                        other.type_name()
                    ),
                ));
            }
        }
    }
    Ok(Value::Double(sum / elements.len() as f64))
}
