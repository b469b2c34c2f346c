//! Evaluation Tests
//!
//! End-to-end tests over built trees:
//! - Boolean queries against JSON records
//! - Negated operators and their positive counterparts
//! - Function calls through the registry
//! - Spatial predicates against GeoJSON features
//! - Evaluation order and the per-call cache

use cql2_ast::{AstBuilder, AstNode, NodeType, Operator};
use cql2_eval::{
    Cql2Engine, DispatchTable, EvalError, EvaluationCache, EvaluationContext, FeatureSource,
    FunctionRegistry, GeoJsonFeatureSource, JsonFeatureSource, OperatorModule,
};
use cql2_types::Value;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

// ============================================================================
// Test Helpers
// ============================================================================

fn engine() -> Cql2Engine {
    Cql2Engine::new()
}

fn record(json: serde_json::Value) -> JsonFeatureSource {
    JsonFeatureSource::new(json)
}

fn eval(query: &AstNode, source: &dyn FeatureSource) -> Result<Value, EvalError> {
    engine().evaluate(query, &EvaluationContext::new(source))
}

/// Records every property lookup
#[derive(Default)]
struct CountingSource {
    lookups: Mutex<Vec<String>>,
}

impl FeatureSource for CountingSource {
    fn get_property(&self, path: &str) -> Value {
        self.lookups.lock().push(path.to_string());
        Value::Bool(false)
    }
}

// ============================================================================
// Boolean queries
// ============================================================================

#[test]
fn test_and_of_equalities() {
    // a = 1 AND b = 2
    let mut b = AstBuilder::new();
    let a = b.property("a");
    let one = b.literal(1i64);
    let left = b.compare(Operator::Equal, a, one);
    let bp = b.property("b");
    let two = b.literal(2i64);
    let right = b.compare(Operator::Equal, bp, two);
    let query = b.and(left, right);

    let result = eval(&query, &record(json!({ "a": 1, "b": 2 }))).unwrap();
    assert_eq!(result, Value::Bool(true));

    let result = eval(&query, &record(json!({ "a": 1, "b": 3 }))).unwrap();
    assert_eq!(result, Value::Bool(false));
}

#[test]
fn test_city_in_list() {
    // city IN ('X', 'Y')
    let mut b = AstBuilder::new();
    let city = b.property("city");
    let query = b.in_list(Operator::In, city, [Value::from("X"), Value::from("Y")]);

    assert_eq!(eval(&query, &record(json!({ "city": "Z" }))).unwrap(), Value::Bool(false));
    assert_eq!(eval(&query, &record(json!({ "city": "X" }))).unwrap(), Value::Bool(true));
    assert!(eval(&query, &record(json!({}))).unwrap().is_null());
}

#[test]
fn test_missing_property_in_comparison_fails() {
    let mut b = AstBuilder::new();
    let a = b.property("a");
    let one = b.literal(1i64);
    let query = b.compare(Operator::Greater, a, one);

    let err = eval(&query, &record(json!({}))).unwrap_err();
    assert!(matches!(err, EvalError::TypeMismatch { .. }));
}

#[test]
fn test_both_operands_are_always_evaluated() {
    let mut b = AstBuilder::new();
    let x = b.property("x");
    let y = b.property("y");
    let query = b.and(x, y);

    let source = CountingSource::default();
    let result = eval(&query, &source).unwrap();
    assert_eq!(result, Value::Bool(false));
    assert_eq!(*source.lookups.lock(), vec!["x".to_string(), "y".to_string()]);
}

#[test]
fn test_error_in_right_operand_surfaces_even_when_left_decides() {
    let mut b = AstBuilder::new();
    let f = b.literal(false);
    let bad = b.literal(1i64);
    let query = b.and(f, bad);

    let err = eval(&query, &record(json!({}))).unwrap_err();
    assert_eq!(
        err,
        EvalError::type_mismatch("AND", "value 1 of AND should be bool but is int64")
    );
}

// ============================================================================
// Negated operators
// ============================================================================

fn compare_literals(op: Operator, lhs: Value, rhs: Value) -> AstNode {
    let mut b = AstBuilder::new();
    let l = b.literal(lhs);
    let r = b.literal(rhs);
    b.compare(op, l, r)
}

#[test]
fn test_not_equal_inherits_equal_failures() {
    let lhs = Value::from("1");
    let rhs = Value::Int64(1);
    let equal = eval(&compare_literals(Operator::Equal, lhs.clone(), rhs.clone()), &record(json!({})));
    let not_equal = eval(&compare_literals(Operator::NotEqual, lhs, rhs), &record(json!({})));
    assert_eq!(equal.unwrap_err(), not_equal.unwrap_err());
}

fn membership(op: Operator) -> AstNode {
    let mut b = AstBuilder::new();
    let x = b.property("x");
    b.in_list(op, x, [Value::Int64(1), Value::Int64(2)])
}

#[test]
fn test_not_in_negates_in() {
    let query = membership(Operator::NotIn);

    assert_eq!(eval(&query, &record(json!({ "x": 1 }))).unwrap(), Value::Bool(false));
    assert_eq!(eval(&query, &record(json!({ "x": 3 }))).unwrap(), Value::Bool(true));
    assert!(eval(&query, &record(json!({ "x": null }))).unwrap().is_null());

    let source = record(json!({ "x": [1] }));
    let in_err = eval(&membership(Operator::In), &source).unwrap_err();
    let not_in_err = eval(&query, &source).unwrap_err();
    assert_eq!(not_in_err, in_err);
}

#[test]
fn test_not_between_inherits_between_failures() {
    let query = |op| {
        let mut b = AstBuilder::new();
        let x = b.property("x");
        let low = b.literal(1i64);
        let high = b.literal(10i64);
        b.between(op, x, low, high)
    };
    let source = record(json!({ "x": "five" }));
    let between = eval(&query(Operator::Between), &source).unwrap_err();
    let not_between = eval(&query(Operator::NotBetween), &source).unwrap_err();
    assert_eq!(not_between, between);

    let source = record(json!({ "x": 5 }));
    assert_eq!(eval(&query(Operator::NotBetween), &source).unwrap(), Value::Bool(false));
}

#[test]
fn test_not_like_inherits_like_failures() {
    let query = |op| {
        let mut b = AstBuilder::new();
        let name = b.property("name");
        let pattern = b.literal("Mount%");
        b.like(op, name, pattern)
    };
    let source = record(json!({ "name": 7 }));
    let like = eval(&query(Operator::Like), &source).unwrap_err();
    let not_like = eval(&query(Operator::NotLike), &source).unwrap_err();
    assert_eq!(not_like, like);

    let source = record(json!({ "name": "Mountain View" }));
    assert_eq!(eval(&query(Operator::NotLike), &source).unwrap(), Value::Bool(false));
}

proptest! {
    #[test]
    fn prop_not_equal_is_negated_equal(a in -1000i64..1000, b in -1000i64..1000) {
        let source = record(json!({}));
        let equal = eval(&compare_literals(Operator::Equal, Value::Int64(a), Value::Int64(b)), &source).unwrap();
        let not_equal = eval(&compare_literals(Operator::NotEqual, Value::Int64(a), Value::Int64(b)), &source).unwrap();
        prop_assert_eq!(equal, Value::Bool(a == b));
        prop_assert_eq!(not_equal, Value::Bool(a != b));
    }

    #[test]
    fn prop_literal_echoes_origin(n in any::<i64>(), s in ".*") {
        let mut b = AstBuilder::new();
        let int = b.literal(n);
        let text = b.literal(s.clone());
        let engine = engine();
        let source = record(json!({}));
        let ctx = EvaluationContext::new(&source);
        let mut cache = EvaluationCache::new();
        for _ in 0..2 {
            prop_assert_eq!(engine.evaluate_with_cache(&int, &ctx, &mut cache).unwrap(), Value::Int64(n));
            prop_assert_eq!(engine.evaluate_with_cache(&text, &ctx, &mut cache).unwrap(), Value::String(s.clone()));
        }
    }
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn test_array_predicates() {
    let cases = [
        (Operator::ArrayContains, vec![1, 2, 3], vec![4], false),
        (Operator::ArrayContains, vec![1, 2, 2, 3], vec![2, 3], true),
        (Operator::ArrayEquals, vec![1, 2, 3], vec![3, 2, 1], true),
        (Operator::ArrayContainedBy, vec![3], vec![1, 2, 3], true),
    ];
    for (op, lhs, rhs, expected) in cases {
        let mut b = AstBuilder::new();
        let l = b.array_of(lhs.into_iter().map(Value::Int64));
        let r = b.array_of(rhs.into_iter().map(Value::Int64));
        let query = b.array_pred(op, l, r);
        assert_eq!(eval(&query, &record(json!({}))).unwrap(), Value::Bool(expected), "{op}");
    }
}

#[test]
fn test_array_property_against_literal() {
    let mut b = AstBuilder::new();
    let tags = b.property("tags");
    let wanted = b.array_of([Value::from("a")]);
    let query = b.array_pred(Operator::ArrayContains, tags, wanted);

    let result = eval(&query, &record(json!({ "tags": ["b", "a", null] }))).unwrap();
    assert_eq!(result, Value::Bool(true));
}

#[test]
fn test_array_of_close_doubles_is_a_set() {
    // consecutive elements sit within the set tolerance, the ends do not
    let xs: Vec<f64> = (0..64).map(|k| 1.0 + k as f64 * 0.6e-9).collect();
    let mut b = AstBuilder::new();
    let values = b.property("xs");
    let wanted = b.array_of([Value::Double(1.0)]);
    let query = b.array_pred(Operator::ArrayContains, values, wanted);

    let result = eval(&query, &record(json!({ "xs": xs }))).unwrap();
    assert_eq!(result, Value::Bool(true));
}

#[test]
fn test_array_overlaps_is_unsupported() {
    let mut b = AstBuilder::new();
    let l = b.array_of([Value::Int64(1)]);
    let r = b.array_of([Value::Int64(1)]);
    let query = b.array_pred(Operator::ArrayOverlaps, l, r);
    assert!(matches!(
        eval(&query, &record(json!({}))),
        Err(EvalError::UnsupportedFeature { .. })
    ));
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_unknown_function() {
    let mut b = AstBuilder::new();
    let arg = b.literal(1i64);
    let query = b.function("foo", vec![arg]);
    assert_eq!(
        eval(&query, &record(json!({}))).unwrap_err(),
        EvalError::unknown_function("foo")
    );
}

#[test]
fn test_avg_in_comparison() {
    // avg(scores) > 2
    let mut b = AstBuilder::new();
    let scores = b.property("scores");
    let call = b.function("avg", vec![scores]);
    let two = b.literal(2i64);
    let query = b.compare(Operator::Greater, call, two);

    let source = record(json!({ "scores": [1, 2, 6] }));
    assert_eq!(eval(&query, &source).unwrap(), Value::Bool(true));
}

#[test]
fn test_custom_function_registry() {
    let mut functions = FunctionRegistry::with_builtins();
    functions.register("avg", |_: &[Value]| Ok(Value::Int64(42)));
    functions.register("upper", |args: &[Value]| {
        Ok(args
            .first()
            .and_then(Value::as_str)
            .map(|s| Value::from(s.to_uppercase()))
            .unwrap_or_default())
    });
    let engine = Cql2Engine::with_functions(functions);

    let mut b = AstBuilder::new();
    let name = b.property("name");
    let call = b.function("upper", vec![name]);
    let expected = b.literal("BOB");
    let query = b.compare(Operator::Equal, call, expected);

    let source = record(json!({ "name": "bob" }));
    let ctx = EvaluationContext::new(&source);
    assert_eq!(engine.evaluate(&query, &ctx).unwrap(), Value::Bool(true));

    let mut b = AstBuilder::new();
    let arg = b.array_of(Vec::new());
    let shadowed = b.function("avg", vec![arg]);
    assert_eq!(engine.evaluate(&shadowed, &ctx).unwrap(), Value::Int64(42));
}

// ============================================================================
// Spatial
// ============================================================================

#[test]
fn test_point_feature_intersects_bbox() {
    // S_INTERSECTS(geom, BBOX(0,0,10,10))
    let mut b = AstBuilder::new();
    let geom = b.property("geom");
    let bbox = b.bbox(0.0, 0.0, 10.0, 10.0);
    let query = b.spatial(Operator::SpatialIntersects, geom, bbox);

    let inside = GeoJsonFeatureSource::from_feature(&json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [5, 5] },
        "properties": {}
    }));
    assert_eq!(eval(&query, &inside).unwrap(), Value::Bool(true));

    let outside = GeoJsonFeatureSource::from_feature(&json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [15, 5] },
        "properties": {}
    }));
    assert_eq!(eval(&query, &outside).unwrap(), Value::Bool(false));
}

#[test]
fn test_other_spatial_operators_have_no_evaluator() {
    let mut b = AstBuilder::new();
    let geom = b.property("geom");
    let bbox = b.bbox(0.0, 0.0, 10.0, 10.0);
    let query = b.spatial(Operator::SpatialTouches, geom, bbox);
    assert!(matches!(
        eval(&query, &record(json!({}))),
        Err(EvalError::UnknownOperator { kind: NodeType::SpatialPred, .. })
    ));
}

#[test]
fn test_temporal_operators_are_unsupported() {
    for op in Operator::TEMPORAL {
        let mut b = AstBuilder::new();
        let l = b.property("t");
        let r = b.literal("2024-01-01");
        let query = b.node(NodeType::TemporalPred, op, vec![l, r]);
        assert!(matches!(
            eval(&query, &record(json!({}))),
            Err(EvalError::UnsupportedFeature { .. })
        ));
    }
}

// ============================================================================
// Engine
// ============================================================================

struct ConstantTrue;

impl OperatorModule for ConstantTrue {
    fn name(&self) -> &'static str {
        "constant"
    }

    fn register(&self, table: &mut DispatchTable) {
        table.register(NodeType::SpatialPred, Operator::SpatialWithin, |_, _, _| {
            Ok(Value::Bool(true))
        });
    }
}

#[test]
fn test_installing_a_module() {
    let mut engine = Cql2Engine::new();
    engine.install(&ConstantTrue);

    let mut b = AstBuilder::new();
    let l = b.bbox(0.0, 0.0, 1.0, 1.0);
    let r = b.bbox(5.0, 5.0, 6.0, 6.0);
    let query = b.spatial(Operator::SpatialWithin, l, r);
    let source = record(json!({}));
    let ctx = EvaluationContext::new(&source);
    assert_eq!(engine.evaluate(&query, &ctx).unwrap(), Value::Bool(true));
}

#[test]
fn test_concurrent_evaluation_of_one_tree() {
    let mut b = AstBuilder::new();
    let a = b.property("a");
    let limit = b.literal(50i64);
    let query = Arc::new(b.compare(Operator::Lesser, a, limit));
    let engine = Arc::new(engine());

    let handles: Vec<_> = (0..8i64)
        .map(|i| {
            let query = Arc::clone(&query);
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let source = record(json!({ "a": i * 10 }));
                let ctx = EvaluationContext::new(&source);
                let mut cache = EvaluationCache::new();
                let result = engine.evaluate_with_cache(&query, &ctx, &mut cache).unwrap();
                (i, result, cache.get(query.id()).cloned())
            })
        })
        .collect();

    for handle in handles {
        let (i, result, cached) = handle.join().unwrap();
        assert_eq!(result, Value::Bool(i * 10 < 50));
        assert_eq!(cached, Some(result));
    }
}
