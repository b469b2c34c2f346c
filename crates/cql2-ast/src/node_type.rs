//! Syntactic categories of AST nodes

use serde::{Deserialize, Serialize};
use std::fmt;

/// The syntactic category of an AST node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Literal,
    BoolExpr,

    // Predicates
    BinCompPred,
    IsLikePred,
    IsBetweenPred,
    IsInListPred,
    InList,
    IsNullPred,
    SpatialPred,
    TemporalPred,
    ArrayPred,

    CharacterClause,
    ArithExpr,
    Array,
    PropertyName,
    Function,
    ArgumentList,
}

impl NodeType {
    /// Stable diagnostic name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Literal => "Literal",
            Self::BoolExpr => "BoolExpr",
            Self::BinCompPred => "BinCompPred",
            Self::IsLikePred => "IsLikePred",
            Self::IsBetweenPred => "IsBetweenPred",
            Self::IsInListPred => "IsInListPred",
            Self::InList => "InList",
            Self::IsNullPred => "IsNullPred",
            Self::SpatialPred => "SpatialPred",
            Self::TemporalPred => "TemporalPred",
            Self::ArrayPred => "ArrayPred",
            Self::CharacterClause => "CharacterClause",
            Self::ArithExpr => "ArithExpr",
            Self::Array => "Array",
            Self::PropertyName => "PropertyName",
            Self::Function => "Function",
            Self::ArgumentList => "ArgumentList",
        }
    }

    /// Leaf kinds carry an origin value instead of children
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Literal | Self::PropertyName)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
