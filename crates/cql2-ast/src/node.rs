//! AST nodes, node identifiers and the tree builder

use cql2_types::{BBox, GeometryRef, Value};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use crate::{NodeType, Operator};

/// Identifier of a node, unique within one parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Monotonic id source; one generator per parse
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next id
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    /// Restart numbering for an independent parse
    pub fn reset(&mut self) {
        self.next = 0;
    }
}

/// One syntax construct of a CQL2 query.
///
/// A node exclusively owns its children, so a tree is dropped as a whole.
/// Nodes are immutable once built; evaluation results are kept outside the
/// tree, keyed by [`NodeId`].
#[derive(Debug, Clone)]
pub struct AstNode {
    id: NodeId,
    kind: NodeType,
    op: Operator,
    origin: Value,
    children: Vec<AstNode>,
}

impl AstNode {
    /// Create an inner node
    pub fn new(id: NodeId, kind: NodeType, op: Operator, children: Vec<AstNode>) -> Self {
        Self {
            id,
            kind,
            op,
            origin: Value::Null,
            children,
        }
    }

    /// Create a leaf node carrying the value as written in the query
    pub fn leaf(id: NodeId, kind: NodeType, origin: Value) -> Self {
        Self {
            id,
            kind,
            op: Operator::NullOp,
            origin,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeType {
        self.kind
    }

    pub fn op(&self) -> Operator {
        self.op
    }

    /// The literal value as written; null for inner nodes
    pub fn origin(&self) -> &Value {
        &self.origin
    }

    pub fn children(&self) -> &[AstNode] {
        &self.children
    }

    /// Get a child by position
    pub fn child(&self, index: usize) -> Option<&AstNode> {
        self.children.get(index)
    }

    /// Breadth-first iteration over this node and all descendants
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            queue: VecDeque::from([self]),
        }
    }

    /// Number of nodes in this subtree
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// The distinct property paths referenced by this query
    pub fn property_names(&self) -> BTreeSet<&str> {
        self.iter()
            .filter(|node| node.kind == NodeType::PropertyName)
            .filter_map(|node| node.origin.as_str())
            .collect()
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.op == Operator::NullOp {
            write!(f, "{} {} {}", self.id, self.kind, self.origin.typed())
        } else {
            write!(f, "{} {} {}", self.id, self.kind, self.op)
        }
    }
}

impl<'a> IntoIterator for &'a AstNode {
    type Item = &'a AstNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Breadth-first iterator over a tree
pub struct Iter<'a> {
    queue: VecDeque<&'a AstNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a AstNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.children.iter());
        Some(node)
    }
}

/// Builds trees with ids from a single generator.
///
/// Producers (a parser, or tests) use one builder per query so ids are unique
/// within the tree and restart from zero for the next query.
#[derive(Debug, Default)]
pub struct AstBuilder {
    ids: IdGenerator,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inner node of any kind
    pub fn node(&mut self, kind: NodeType, op: Operator, children: Vec<AstNode>) -> AstNode {
        AstNode::new(self.ids.next_id(), kind, op, children)
    }

    /// Literal leaf
    pub fn literal(&mut self, value: impl Into<Value>) -> AstNode {
        AstNode::leaf(self.ids.next_id(), NodeType::Literal, value.into())
    }

    /// Bounding box literal
    pub fn bbox(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> AstNode {
        self.literal(BBox::new(min_x, min_y, max_x, max_y))
    }

    /// Geometry literal
    pub fn geometry(&mut self, geometry: GeometryRef) -> AstNode {
        self.literal(geometry)
    }

    /// Property reference leaf
    pub fn property(&mut self, path: impl Into<String>) -> AstNode {
        AstNode::leaf(
            self.ids.next_id(),
            NodeType::PropertyName,
            Value::String(path.into()),
        )
    }

    pub fn and(&mut self, lhs: AstNode, rhs: AstNode) -> AstNode {
        self.node(NodeType::BoolExpr, Operator::And, vec![lhs, rhs])
    }

    pub fn or(&mut self, lhs: AstNode, rhs: AstNode) -> AstNode {
        self.node(NodeType::BoolExpr, Operator::Or, vec![lhs, rhs])
    }

    pub fn not(&mut self, operand: AstNode) -> AstNode {
        self.node(NodeType::BoolExpr, Operator::Not, vec![operand])
    }

    /// Binary comparison predicate
    pub fn compare(&mut self, op: Operator, lhs: AstNode, rhs: AstNode) -> AstNode {
        self.node(NodeType::BinCompPred, op, vec![lhs, rhs])
    }

    /// Arithmetic expression
    pub fn arith(&mut self, op: Operator, lhs: AstNode, rhs: AstNode) -> AstNode {
        self.node(NodeType::ArithExpr, op, vec![lhs, rhs])
    }

    /// `expr [NOT] IN (candidates...)`
    pub fn in_list(
        &mut self,
        op: Operator,
        expr: AstNode,
        candidates: impl IntoIterator<Item = Value>,
    ) -> AstNode {
        let items = candidates
            .into_iter()
            .map(|value| self.literal(value))
            .collect();
        let list = self.node(NodeType::InList, Operator::NullOp, items);
        self.node(NodeType::IsInListPred, op, vec![expr, list])
    }

    /// Array constructor
    pub fn array(&mut self, elements: Vec<AstNode>) -> AstNode {
        self.node(NodeType::Array, Operator::NullOp, elements)
    }

    /// Array literal built from plain values
    pub fn array_of(&mut self, values: impl IntoIterator<Item = Value>) -> AstNode {
        let elements = values.into_iter().map(|value| self.literal(value)).collect();
        self.array(elements)
    }

    /// Array predicate
    pub fn array_pred(&mut self, op: Operator, lhs: AstNode, rhs: AstNode) -> AstNode {
        self.node(NodeType::ArrayPred, op, vec![lhs, rhs])
    }

    /// Spatial predicate
    pub fn spatial(&mut self, op: Operator, lhs: AstNode, rhs: AstNode) -> AstNode {
        self.node(NodeType::SpatialPred, op, vec![lhs, rhs])
    }

    /// `expr [NOT] BETWEEN low AND high`
    pub fn between(&mut self, op: Operator, expr: AstNode, low: AstNode, high: AstNode) -> AstNode {
        self.node(NodeType::IsBetweenPred, op, vec![expr, low, high])
    }

    /// `expr [NOT] LIKE pattern`
    pub fn like(&mut self, op: Operator, expr: AstNode, pattern: AstNode) -> AstNode {
        self.node(NodeType::IsLikePred, op, vec![expr, pattern])
    }

    /// `expr IS [NOT] NULL`
    pub fn is_null(&mut self, op: Operator, expr: AstNode) -> AstNode {
        self.node(NodeType::IsNullPred, op, vec![expr])
    }

    /// Function call: a name literal followed by an argument list
    pub fn function(&mut self, name: &str, args: Vec<AstNode>) -> AstNode {
        let name = self.literal(name);
        let args = self.node(NodeType::ArgumentList, Operator::NullOp, args);
        self.node(NodeType::Function, Operator::NullOp, vec![name, args])
    }
}
