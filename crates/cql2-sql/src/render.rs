//! Standard renderers
//!
//! Output targets databases with the `ST_*` spatial functions and
//! double-quoted identifiers.

use crate::converter::SqlConverter;
use cql2_ast::{AstNode, NodeType, Operator};
use cql2_types::Value;

const ANY: std::ops::RangeInclusive<usize> = 0..=usize::MAX;

pub(crate) fn register_standard(converter: &mut SqlConverter) {
    register_logical(converter);
    register_comparison(converter);
    register_arithmetic(converter);
    register_membership(converter);
    register_predicates(converter);
    register_spatial(converter);
    register_leaves(converter);
}

fn register_logical(converter: &mut SqlConverter) {
    for (op, keyword) in [(Operator::And, "AND"), (Operator::Or, "OR")] {
        converter.register(NodeType::BoolExpr, op, 2..=2, move |node, c| {
            format!(
                "{} {keyword} {}",
                group_for(node, 0, &c[0]),
                group_for(node, 1, &c[1])
            )
        });
    }
    // the operand is the last child
    converter.register(NodeType::BoolExpr, Operator::Not, 1..=2, |node, c| {
        let index = c.len() - 1;
        format!("NOT {}", group_for(node, index, &c[index]))
    });
}

fn register_comparison(converter: &mut SqlConverter) {
    let infix = [
        (Operator::Greater, ">"),
        (Operator::GreaterEqual, ">="),
        (Operator::Lesser, "<"),
        (Operator::LesserEqual, "<="),
        (Operator::NotEqual, "<>"),
        (Operator::Equal, "="),
    ];
    for (op, symbol) in infix {
        converter.register(NodeType::BinCompPred, op, 2..=2, move |_, c| {
            format!("{} {symbol} {}", c[0], c[1])
        });
    }
}

fn register_arithmetic(converter: &mut SqlConverter) {
    let infix = [
        (Operator::Plus, "+"),
        (Operator::Minus, "-"),
        (Operator::Mult, "*"),
        (Operator::Div, "/"),
        (Operator::DivInt, "DIV"),
        (Operator::Mod, "%"),
        (Operator::Power, "^"),
    ];
    for (op, symbol) in infix {
        converter.register(NodeType::ArithExpr, op, 2..=2, move |node, c| {
            format!(
                "{} {symbol} {}",
                arith_group_for(node, 0, &c[0]),
                arith_group_for(node, 1, &c[1])
            )
        });
    }
}

fn register_membership(converter: &mut SqlConverter) {
    converter.register(NodeType::IsInListPred, Operator::In, 2..=2, |_, c| {
        format!("{} IN ({})", c[0], c[1])
    });
    converter.register(NodeType::IsInListPred, Operator::NotIn, 2..=2, |_, c| {
        format!("{} NOT IN ({})", c[0], c[1])
    });
    converter.register(NodeType::InList, Operator::NullOp, ANY, |_, c| c.join(","));
    converter.register(NodeType::ArgumentList, Operator::NullOp, ANY, |_, c| c.join(","));
    converter.register(NodeType::Function, Operator::NullOp, 1..=2, |node, c| {
        let name = node
            .child(0)
            .and_then(|name| name.origin().as_str())
            .unwrap_or_default();
        format!("{name}({})", c.get(1).map(String::as_str).unwrap_or_default())
    });
}

fn register_predicates(converter: &mut SqlConverter) {
    converter.register(NodeType::IsLikePred, Operator::Like, 2..=2, |_, c| {
        format!("{} LIKE {}", c[0], c[1])
    });
    converter.register(NodeType::IsLikePred, Operator::NotLike, 2..=2, |_, c| {
        format!("{} NOT LIKE {}", c[0], c[1])
    });
    converter.register(NodeType::IsNullPred, Operator::IsNull, 1..=1, |_, c| {
        format!("{} IS NULL", c[0])
    });
    converter.register(NodeType::IsNullPred, Operator::IsNotNull, 1..=1, |_, c| {
        format!("{} IS NOT NULL", c[0])
    });
    converter.register(NodeType::IsBetweenPred, Operator::Between, 3..=3, |_, c| {
        format!("{} BETWEEN {} AND {}", c[0], c[1], c[2])
    });
    converter.register(NodeType::IsBetweenPred, Operator::NotBetween, 3..=3, |_, c| {
        format!("{} NOT BETWEEN {} AND {}", c[0], c[1], c[2])
    });
}

fn register_spatial(converter: &mut SqlConverter) {
    for op in Operator::SPATIAL {
        // S_Intersects -> ST_Intersects
        let function = format!("ST_{}", op.name().trim_start_matches("S_"));
        converter.register(NodeType::SpatialPred, op, 2..=2, move |_, c| {
            format!("{function}({},{})", c[0], c[1])
        });
    }
}

fn register_leaves(converter: &mut SqlConverter) {
    converter.register(NodeType::Literal, Operator::NullOp, 0..=0, |node, _| {
        literal(node.origin())
    });
    converter.register(NodeType::PropertyName, Operator::NullOp, 0..=0, |node, _| {
        match node.origin().as_str() {
            Some(path) => quote_identifier(path),
            None => {
                log::error!("Property name is {} instead of string", node.origin().type_name());
                String::new()
            }
        }
    });
}

/// Wrap an And/Or operand in parentheses when it is itself an And/Or of the
/// other kind, or when the parent is Not
fn group_for(parent: &AstNode, index: usize, sql: &str) -> String {
    let needs_group = parent.child(index).is_some_and(|child| {
        child.kind() == NodeType::BoolExpr
            && matches!(child.op(), Operator::And | Operator::Or)
            && child.op() != parent.op()
    });
    if needs_group {
        format!("({sql})")
    } else {
        sql.to_string()
    }
}

fn precedence(op: Operator) -> u8 {
    match op {
        Operator::Plus | Operator::Minus => 1,
        Operator::Power => 3,
        _ => 2,
    }
}

/// Wrap an arithmetic operand in parentheses unless the infix rendering
/// already evaluates it first. A right operand of equal precedence is always
/// grouped, as is any operand of `^`.
fn arith_group_for(parent: &AstNode, index: usize, sql: &str) -> String {
    let needs_group = parent.child(index).is_some_and(|child| {
        if child.kind() != NodeType::ArithExpr || !child.op().is_arithmetic() {
            return false;
        }
        let (outer, inner) = (precedence(parent.op()), precedence(child.op()));
        parent.op() == Operator::Power || inner < outer || (index == 1 && inner == outer)
    });
    if needs_group {
        format!("({sql})")
    } else {
        sql.to_string()
    }
}

/// Render a literal value
pub fn literal(value: &Value) -> String {
    match value {
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Int64(i) => i.to_string(),
        Value::UInt64(u) => u.to_string(),
        Value::Double(d) => double(*d),
        Value::String(s) => quote_string(s),
        Value::Geometry(g) => format!("ST_GeomFromText({})", quote_string(&g.to_wkt())),
        Value::BBox(b) => format!(
            "ST_MakeEnvelope({},{},{},{})",
            b.min_x, b.min_y, b.max_x, b.max_y
        ),
        other => {
            log::error!("Unsupported {} literal in sql conversion", other.type_name());
            String::new()
        }
    }
}

fn double(d: f64) -> String {
    if d.is_finite() && d.fract() == 0.0 && d.abs() < 1e15 {
        format!("{d:.1}")
    } else {
        d.to_string()
    }
}

fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn quote_identifier(path: &str) -> String {
    format!("\"{}\"", path.replace('"', "\"\""))
}
