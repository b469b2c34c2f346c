//! Record filtering helpers

use cql2_ast::AstNode;
use cql2_eval::{Cql2Engine, EvalError, EvalResult, EvaluationContext, FeatureSource};
use cql2_types::Value;

/// Evaluate a query that must produce a Bool
pub fn matches(engine: &Cql2Engine, root: &AstNode, ctx: &EvaluationContext<'_>) -> EvalResult<bool> {
    match engine.evaluate(root, ctx)? {
        Value::Bool(b) => Ok(b),
        other => Err(EvalError::type_mismatch(
            "query",
            format!("result is {} but should be bool", other.type_name()),
        )),
    }
}

/// Keep the records for which the query is true.
///
/// Records whose evaluation fails or yields anything but a Bool are logged
/// and dropped.
pub fn filter<'a, S>(
    engine: &Cql2Engine,
    root: &AstNode,
    records: impl IntoIterator<Item = &'a S>,
) -> Vec<&'a S>
where
    S: FeatureSource + 'a,
{
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let ctx = EvaluationContext::new(record);
            match matches(engine, root, &ctx) {
                Ok(true) => Some(record),
                Ok(false) => None,
                Err(e) => {
                    log::error!("Skipping record {index}: {e}");
                    None
                }
            }
        })
        .collect()
}
