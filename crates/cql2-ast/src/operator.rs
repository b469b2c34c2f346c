//! CQL2 operators

use serde::{Deserialize, Serialize};
use std::fmt;

/// The semantic operation an AST node performs within its node type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// No operator: the node type alone determines behavior
    NullOp,

    // Logical
    And,
    Or,
    Not,

    // Comparison
    Equal,
    NotEqual,
    Greater,
    Lesser,
    GreaterEqual,
    LesserEqual,

    // Pattern, range and membership
    Like,
    NotLike,
    Between,
    NotBetween,
    In,
    NotIn,
    IsNull,
    IsNotNull,

    // Arithmetic
    Plus,
    Minus,
    Mult,
    Div,
    DivInt,
    Mod,
    Power,

    // Spatial
    SpatialContains,
    SpatialCrosses,
    SpatialDisjoint,
    SpatialEquals,
    SpatialIntersects,
    SpatialOverlaps,
    SpatialTouches,
    SpatialWithin,

    // Temporal
    TemporalAfter,
    TemporalBefore,
    TemporalContains,
    TemporalDisjoint,
    TemporalDuring,
    TemporalEquals,
    TemporalFinishedBy,
    TemporalFinishes,
    TemporalIntersects,
    TemporalMeets,
    TemporalMetBy,
    TemporalOverlappedBy,
    TemporalOverlaps,
    TemporalStartedBy,
    TemporalStarts,

    // Array
    ArrayEquals,
    ArrayContains,
    ArrayContainedBy,
    ArrayOverlaps,
}

impl Operator {
    /// All spatial operators
    pub const SPATIAL: [Operator; 8] = [
        Self::SpatialContains,
        Self::SpatialCrosses,
        Self::SpatialDisjoint,
        Self::SpatialEquals,
        Self::SpatialIntersects,
        Self::SpatialOverlaps,
        Self::SpatialTouches,
        Self::SpatialWithin,
    ];

    /// All temporal operators
    pub const TEMPORAL: [Operator; 15] = [
        Self::TemporalAfter,
        Self::TemporalBefore,
        Self::TemporalContains,
        Self::TemporalDisjoint,
        Self::TemporalDuring,
        Self::TemporalEquals,
        Self::TemporalFinishedBy,
        Self::TemporalFinishes,
        Self::TemporalIntersects,
        Self::TemporalMeets,
        Self::TemporalMetBy,
        Self::TemporalOverlappedBy,
        Self::TemporalOverlaps,
        Self::TemporalStartedBy,
        Self::TemporalStarts,
    ];

    /// Stable diagnostic name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NullOp => "NullOp",
            Self::And => "And",
            Self::Or => "Or",
            Self::Not => "Not",
            Self::Equal => "Equal",
            Self::NotEqual => "NotEqual",
            Self::Greater => "Greater",
            Self::Lesser => "Lesser",
            Self::GreaterEqual => "GreaterEqual",
            Self::LesserEqual => "LesserEqual",
            Self::Like => "Like",
            Self::NotLike => "NotLike",
            Self::Between => "Between",
            Self::NotBetween => "NotBetween",
            Self::In => "In",
            Self::NotIn => "NotIn",
            Self::IsNull => "IsNull",
            Self::IsNotNull => "IsNotNull",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Mult => "MULT",
            Self::Div => "DIV",
            Self::DivInt => "DIVINT",
            Self::Mod => "MOD",
            Self::Power => "POWER",
            Self::SpatialContains => "S_Contains",
            Self::SpatialCrosses => "S_Crosses",
            Self::SpatialDisjoint => "S_Disjoint",
            Self::SpatialEquals => "S_Equals",
            Self::SpatialIntersects => "S_Intersects",
            Self::SpatialOverlaps => "S_Overlaps",
            Self::SpatialTouches => "S_Touches",
            Self::SpatialWithin => "S_Within",
            Self::TemporalAfter => "T_After",
            Self::TemporalBefore => "T_Before",
            Self::TemporalContains => "T_Contains",
            Self::TemporalDisjoint => "T_Disjoint",
            Self::TemporalDuring => "T_During",
            Self::TemporalEquals => "T_Equals",
            Self::TemporalFinishedBy => "T_FinishedBy",
            Self::TemporalFinishes => "T_Finishes",
            Self::TemporalIntersects => "T_Intersects",
            Self::TemporalMeets => "T_Meets",
            Self::TemporalMetBy => "T_MetBy",
            Self::TemporalOverlappedBy => "T_OverlappedBy",
            Self::TemporalOverlaps => "T_Overlaps",
            Self::TemporalStartedBy => "T_StartedBy",
            Self::TemporalStarts => "T_Starts",
            Self::ArrayEquals => "A_Equals",
            Self::ArrayContains => "A_Contains",
            Self::ArrayContainedBy => "A_ContainedBy",
            Self::ArrayOverlaps => "A_Overlaps",
        }
    }

    /// Check if this is an arithmetic operator
    pub const fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Self::Plus | Self::Minus | Self::Mult | Self::Div | Self::DivInt | Self::Mod | Self::Power
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
