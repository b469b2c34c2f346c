//! SQL Conversion Tests

use cql2_ast::{AstBuilder, AstNode, NodeType, Operator};
use cql2_sql::{SqlConverter, SqlError};
use cql2_types::{PlanarGeometry, Value};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

// ============================================================================
// Test Helpers
// ============================================================================

fn sql(node: &AstNode) -> String {
    SqlConverter::new().convert(node).unwrap()
}

// ============================================================================
// Predicates
// ============================================================================

#[test]
fn test_simple_equality() {
    let mut b = AstBuilder::new();
    let a = b.property("a");
    let one = b.literal(1i64);
    let query = b.compare(Operator::Equal, a, one);
    assert_eq!(sql(&query), "\"a\" = 1");
}

#[rstest]
#[case(Operator::Greater, "\"x\" > 2.5")]
#[case(Operator::GreaterEqual, "\"x\" >= 2.5")]
#[case(Operator::Lesser, "\"x\" < 2.5")]
#[case(Operator::LesserEqual, "\"x\" <= 2.5")]
#[case(Operator::NotEqual, "\"x\" <> 2.5")]
fn test_comparisons(#[case] op: Operator, #[case] expected: &str) {
    let mut b = AstBuilder::new();
    let x = b.property("x");
    let v = b.literal(2.5);
    assert_eq!(sql(&b.compare(op, x, v)), expected);
}

#[rstest]
#[case(Operator::Plus, "\"x\" + 1")]
#[case(Operator::DivInt, "\"x\" DIV 1")]
#[case(Operator::Mod, "\"x\" % 1")]
#[case(Operator::Power, "\"x\" ^ 1")]
fn test_arithmetic(#[case] op: Operator, #[case] expected: &str) {
    let mut b = AstBuilder::new();
    let x = b.property("x");
    let one = b.literal(1i64);
    assert_eq!(sql(&b.arith(op, x, one)), expected);
}

fn nested_arith(outer: Operator, inner: Operator, inner_on_left: bool) -> AstNode {
    let mut b = AstBuilder::new();
    let a = b.property("a");
    let bp = b.property("b");
    let inner = b.arith(inner, a, bp);
    let c = b.property("c");
    if inner_on_left {
        b.arith(outer, inner, c)
    } else {
        b.arith(outer, c, inner)
    }
}

#[rstest]
#[case(Operator::Mult, Operator::Plus, true, "(\"a\" + \"b\") * \"c\"")]
#[case(Operator::Plus, Operator::Mult, true, "\"a\" * \"b\" + \"c\"")]
#[case(Operator::Plus, Operator::Plus, true, "\"a\" + \"b\" + \"c\"")]
#[case(Operator::Minus, Operator::Minus, false, "\"c\" - (\"a\" - \"b\")")]
#[case(Operator::Div, Operator::Mult, false, "\"c\" / (\"a\" * \"b\")")]
#[case(Operator::Power, Operator::Power, true, "(\"a\" ^ \"b\") ^ \"c\"")]
fn test_nested_arithmetic_keeps_tree_order(
    #[case] outer: Operator,
    #[case] inner: Operator,
    #[case] inner_on_left: bool,
    #[case] expected: &str,
) {
    assert_eq!(sql(&nested_arith(outer, inner, inner_on_left)), expected);
}

#[test]
fn test_in_list() {
    let mut b = AstBuilder::new();
    let city = b.property("city");
    let query = b.in_list(Operator::In, city, [Value::from("X"), Value::from("Y")]);
    assert_eq!(sql(&query), "\"city\" IN ('X','Y')");

    let mut b = AstBuilder::new();
    let n = b.property("n");
    let query = b.in_list(Operator::NotIn, n, [Value::Int64(1), Value::Int64(2)]);
    assert_eq!(sql(&query), "\"n\" NOT IN (1,2)");
}

#[test]
fn test_basic_predicates() {
    let mut b = AstBuilder::new();
    let name = b.property("name");
    let pattern = b.literal("Mount%");
    assert_eq!(sql(&b.like(Operator::Like, name, pattern)), "\"name\" LIKE 'Mount%'");

    let name = b.property("name");
    let pattern = b.literal("Mount%");
    assert_eq!(sql(&b.like(Operator::NotLike, name, pattern)), "\"name\" NOT LIKE 'Mount%'");

    let x = b.property("x");
    assert_eq!(sql(&b.is_null(Operator::IsNotNull, x)), "\"x\" IS NOT NULL");

    let x = b.property("x");
    let lo = b.literal(1i64);
    let hi = b.literal(10i64);
    assert_eq!(
        sql(&b.between(Operator::NotBetween, x, lo, hi)),
        "\"x\" NOT BETWEEN 1 AND 10"
    );
}

#[test]
fn test_spatial() {
    let mut b = AstBuilder::new();
    let geom = b.property("geom");
    let bbox = b.bbox(0.0, 0.0, 10.0, 10.0);
    let query = b.spatial(Operator::SpatialIntersects, geom, bbox);
    assert_eq!(sql(&query), "ST_Intersects(\"geom\",ST_MakeEnvelope(0,0,10,10))");

    let geom = b.property("geom");
    let point = b.geometry(PlanarGeometry::point(1.0, 2.0).into_ref());
    let query = b.spatial(Operator::SpatialWithin, geom, point);
    assert_eq!(sql(&query), "ST_Within(\"geom\",ST_GeomFromText('POINT (1 2)'))");
}

#[test]
fn test_function_calls() {
    let mut b = AstBuilder::new();
    let x = b.property("x");
    let two = b.literal(2i64);
    let query = b.function("pow", vec![x, two]);
    assert_eq!(sql(&query), "pow(\"x\",2)");

    let name = b.literal("now");
    let bare = b.node(NodeType::Function, Operator::NullOp, vec![name]);
    assert_eq!(sql(&bare), "now()");
}

// ============================================================================
// Boolean structure
// ============================================================================

#[test]
fn test_logical_grouping() {
    // (a = 1 OR b = 2) AND NOT c
    let mut b = AstBuilder::new();
    let a = b.property("a");
    let one = b.literal(1i64);
    let left = b.compare(Operator::Equal, a, one);
    let bp = b.property("b");
    let two = b.literal(2i64);
    let right = b.compare(Operator::Equal, bp, two);
    let either = b.or(left, right);
    let c = b.property("c");
    let not = b.not(c);
    let query = b.and(either, not);

    assert_eq!(sql(&query), "(\"a\" = 1 OR \"b\" = 2) AND NOT \"c\"");
}

#[test]
fn test_same_operator_chains_are_flat() {
    let mut b = AstBuilder::new();
    let x = b.property("x");
    let y = b.property("y");
    let z = b.property("z");
    let inner = b.and(x, y);
    let query = b.and(inner, z);
    assert_eq!(sql(&query), "\"x\" AND \"y\" AND \"z\"");
}

#[test]
fn test_not_reads_its_last_child() {
    let mut b = AstBuilder::new();
    let marker = b.literal(Value::Null);
    let x = b.property("x");
    let y = b.property("y");
    let operand = b.or(x, y);
    let query = b.node(NodeType::BoolExpr, Operator::Not, vec![marker, operand]);
    assert_eq!(sql(&query), "NOT (\"x\" OR \"y\")");
}

// ============================================================================
// Failures and extension
// ============================================================================

#[test]
fn test_array_predicates_have_no_sql() {
    let mut b = AstBuilder::new();
    let l = b.property("tags");
    let r = b.array_of([Value::from("a")]);
    let query = b.array_pred(Operator::ArrayContains, l, r);
    assert_eq!(
        SqlConverter::new().convert(&query).unwrap_err(),
        SqlError::UnknownOperator {
            kind: NodeType::ArrayPred,
            operator: Operator::ArrayContains,
        }
    );
}

#[test]
fn test_recursion_limit() {
    let mut b = AstBuilder::new();
    let mut node = b.property("x");
    for _ in 0..10 {
        node = b.not(node);
    }
    let converter = SqlConverter::new().with_max_depth(4);
    assert_eq!(
        converter.convert(&node).unwrap_err(),
        SqlError::RecursionLimit { limit: 4 }
    );
}

#[test]
fn test_register_custom_renderer() {
    let mut converter = SqlConverter::new();
    converter.register(NodeType::ArrayPred, Operator::ArrayContains, 2..=2, |_, c| {
        format!("{} @> {}", c[0], c[1])
    });
    converter.register(NodeType::Array, Operator::NullOp, 0..=usize::MAX, |_, c| {
        format!("ARRAY[{}]", c.join(","))
    });

    let mut b = AstBuilder::new();
    let l = b.property("tags");
    let r = b.array_of([Value::from("a"), Value::from("b")]);
    let query = b.array_pred(Operator::ArrayContains, l, r);
    assert_eq!(converter.convert(&query).unwrap(), "\"tags\" @> ARRAY['a','b']");
}

proptest! {
    #[test]
    fn prop_conversion_is_deterministic(
        values in proptest::collection::vec(any::<i64>(), 1..8),
        name in "[a-z]{1,8}",
    ) {
        let mut b = AstBuilder::new();
        let prop = b.property(name);
        let query = b.in_list(Operator::In, prop, values.into_iter().map(Value::Int64));
        let converter = SqlConverter::new();
        let first = converter.convert(&query).unwrap();
        let second = converter.convert(&query).unwrap();
        prop_assert_eq!(first, second);
    }
}
