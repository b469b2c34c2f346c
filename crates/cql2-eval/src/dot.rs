//! Graphviz export of a tree and, optionally, its computed values

use crate::cache::EvaluationCache;
use cql2_ast::{AstNode, NodeType, Operator};
use std::fmt::Write;

/// Render `root` as a Graphviz `digraph`.
///
/// Each node is labelled with its id and either its operator or its value;
/// values come from `cache` when given, otherwise from the literal as written.
pub fn to_dot(root: &AstNode, cache: Option<&EvaluationCache>) -> String {
    let mut out = String::from("digraph G {\n");
    write_vertices(&mut out, root, cache);
    out.push('\n');
    write_edges(&mut out, root);
    out.push('}');
    out
}

// Vertices and edges are both emitted in pre-order
fn write_vertices(out: &mut String, node: &AstNode, cache: Option<&EvaluationCache>) {
    let _ = writeln!(
        out,
        "  \"{}\" [label=\"{} {}\"];",
        node.id(),
        node.id(),
        escape(&label(node, cache))
    );
    for child in node.children() {
        write_vertices(out, child, cache);
    }
}

fn write_edges(out: &mut String, node: &AstNode) {
    for child in node.children() {
        let _ = writeln!(out, "  \"{}\" -> \"{}\";", node.id(), child.id());
        write_edges(out, child);
    }
}

fn label(node: &AstNode, cache: Option<&EvaluationCache>) -> String {
    let computed = cache.and_then(|cache| cache.get(node.id()));
    if node.kind().is_leaf() {
        return match (node.kind(), computed) {
            (NodeType::PropertyName, Some(value)) => format!("property {}={value}", node.origin()),
            (NodeType::PropertyName, None) => format!("property {}", node.origin()),
            (_, value) => value.unwrap_or(node.origin()).to_string(),
        };
    }
    match (node.op(), computed) {
        (Operator::NullOp, _) => node.kind().to_string(),
        (op, Some(value)) => format!("{op}({value})"),
        (op, None) => op.to_string(),
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
