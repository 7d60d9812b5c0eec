//! # Node-type registry interface
//!
//! The engine never interprets a node's type tag; an external registry maps
//! tags to the metadata the canvas needs to materialize a node: default
//! dimensions and the ordered port name lists. [`TypeCatalog`] is a plain
//! map implementation for hosts and tests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use wireflow_core::CanvasSize;

/// Geometry-relevant metadata for one node type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeTypeMetadata {
    /// Dimensions used when a node record carries no explicit size
    pub default_size: CanvasSize,
    /// Ordered input port names (top edge)
    pub inputs: Vec<String>,
    /// Ordered output port names (bottom edge)
    pub outputs: Vec<String>,
}

/// Read-only lookup keyed by a node's opaque type tag.
///
/// Supplied by the surrounding product's node-type catalog; the engine only
/// ever reads through this seam.
pub trait NodeTypeRegistry {
    fn metadata(&self, type_tag: &str) -> Option<&NodeTypeMetadata>;
}

/// In-memory [`NodeTypeRegistry`] backed by a map.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: HashMap<String, NodeTypeMetadata>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the metadata for a type tag
    pub fn register(&mut self, type_tag: impl Into<String>, metadata: NodeTypeMetadata) {
        self.types.insert(type_tag.into(), metadata);
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl NodeTypeRegistry for TypeCatalog {
    fn metadata(&self, type_tag: &str) -> Option<&NodeTypeMetadata> {
        self.types.get(type_tag)
    }
}
