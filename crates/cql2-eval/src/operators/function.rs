//! Function calls
//!
//! A Function node has a name literal and an optional ArgumentList child.
//! The argument list evaluates to an array, which is unwrapped into the
//! argument vector of the call.

use crate::error::{EvalError, EvalResult};
use crate::functions::FunctionRegistry;
use crate::registry::{DispatchTable, OperatorModule};
use cql2_ast::{NodeType, Operator};
use cql2_types::Value;
use std::sync::Arc;

/// Function × NullOp and ArgumentList × NullOp, backed by a registry
#[derive(Debug, Clone)]
pub struct FunctionCalls {
    functions: Arc<FunctionRegistry>,
}

impl FunctionCalls {
    pub fn new(functions: Arc<FunctionRegistry>) -> Self {
        Self { functions }
    }
}

impl OperatorModule for FunctionCalls {
    fn name(&self) -> &'static str {
        "function"
    }

    fn register(&self, table: &mut DispatchTable) {
        let functions = Arc::clone(&self.functions);
        table.register(NodeType::Function, Operator::NullOp, move |_, values, _| {
            call(&functions, values)
        });
        table.register(NodeType::ArgumentList, Operator::NullOp, |_, values, _| {
            Ok(Value::Array(values.to_vec()))
        });
    }
}

/// Invoke the function named by the first value.
///
/// The name is resolved before the argument list is inspected.
pub fn call(functions: &FunctionRegistry, values: &[Value]) -> EvalResult<Value> {
    let (name, args) = match values {
        [name] => (name, None),
        [name, args] => (name, Some(args)),
        _ => {
            return Err(EvalError::arity_mismatch(
                "Function",
                "1 or 2 (name and argument list)",
                values.len(),
            ));
        }
    };

    let name = name.as_str().ok_or_else(|| {
        EvalError::type_mismatch(
            "Function",
            format!("function name is {} but should be string", name.type_name()),
        )
    })?;
    let function = functions
        .get(name)
        .ok_or_else(|| EvalError::unknown_function(name))?;

    let args = match args {
        None => &[][..],
        Some(args) => args.as_array().ok_or_else(|| {
            EvalError::type_mismatch(
                "Function",
                format!("argument list is {} but should be array", args.type_name()),
            )
        })?,
    };
    function(args)
}
