//! Evaluation context for CQL2 execution
//!
//! A context binds one evaluation to the record under test (through a
//! [`FeatureSource`]) and to the geometry engine used by spatial predicates.
//! It is read-only and borrowed for the duration of a single evaluation.

use cql2_types::{GeometryEngine, PlanarEngine, Value};
use std::collections::HashMap;

static PLANAR_ENGINE: PlanarEngine = PlanarEngine;

/// Resolves property paths against the record being evaluated
pub trait FeatureSource: Send + Sync {
    /// Value of the property at `path`, or null when it can't be resolved
    fn get_property(&self, path: &str) -> Value;
}

/// A record with no properties
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptySource;

impl FeatureSource for EmptySource {
    fn get_property(&self, _path: &str) -> Value {
        Value::Null
    }
}

/// Flat records keyed by the full property path
impl FeatureSource for HashMap<String, Value> {
    fn get_property(&self, path: &str) -> Value {
        self.get(path).cloned().unwrap_or_default()
    }
}

/// Evaluation context for CQL2 expression execution
#[derive(Clone, Copy)]
pub struct EvaluationContext<'a> {
    source: &'a dyn FeatureSource,
    geometry: &'a dyn GeometryEngine,
}

impl<'a> EvaluationContext<'a> {
    /// Create a context over `source` using the planar geometry engine
    pub fn new(source: &'a dyn FeatureSource) -> Self {
        Self {
            source,
            geometry: &PLANAR_ENGINE,
        }
    }

    /// Start building a context
    pub fn builder(source: &'a dyn FeatureSource) -> EvaluationContextBuilder<'a> {
        EvaluationContextBuilder::new(source)
    }

    /// Resolve a property of the current record
    pub fn get_property(&self, path: &str) -> Value {
        self.source.get_property(path)
    }

    pub fn source(&self) -> &'a dyn FeatureSource {
        self.source
    }

    /// Geometry engine for spatial predicates
    pub fn geometry(&self) -> &'a dyn GeometryEngine {
        self.geometry
    }
}

/// Builder for [`EvaluationContext`]
pub struct EvaluationContextBuilder<'a> {
    source: &'a dyn FeatureSource,
    geometry: Option<&'a dyn GeometryEngine>,
}

impl<'a> EvaluationContextBuilder<'a> {
    pub fn new(source: &'a dyn FeatureSource) -> Self {
        Self {
            source,
            geometry: None,
        }
    }

    /// Use a custom geometry engine
    pub fn geometry_engine(mut self, engine: &'a dyn GeometryEngine) -> Self {
        self.geometry = Some(engine);
        self
    }

    /// Build the context
    pub fn build(self) -> EvaluationContext<'a> {
        EvaluationContext {
            source: self.source,
            geometry: self.geometry.unwrap_or(&PLANAR_ENGINE),
        }
    }
}
