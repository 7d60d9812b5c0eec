//! # Node records
//!
//! - **NodeId**: unique identifier for a canvas node
//! - **NodeLayout**: position and dimensions shared by all nodes
//! - **Node**: the full record (tag, geometry, ports, config)
//! - **NodeFactory**: sequential id allocation with collision guarding
//!
//! Nodes are uniform records; the type tag is an opaque string that only an
//! external node-type registry can interpret.

use serde::{Deserialize, Serialize};
use wireflow_core::{CanvasBounds, CanvasPoint, CanvasSize};

use crate::port::{port_anchor, PortSide};
use crate::registry::NodeTypeMetadata;

/// A unique identifier for a canvas node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn new(id: usize) -> Self {
        NodeId(id)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node-{}", self.0)
    }
}

/// Layout information for a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeLayout {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl NodeLayout {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> CanvasPoint {
        CanvasPoint::new(self.x, self.y)
    }

    pub fn size(&self) -> CanvasSize {
        CanvasSize::new(self.width, self.height)
    }

    pub fn bounds(&self) -> CanvasBounds {
        CanvasBounds::new(self.origin(), self.size())
    }

    /// Check if a canvas point is inside this layout
    pub fn contains(&self, point: CanvasPoint) -> bool {
        self.bounds().contains(point)
    }
}

/// A node on the canvas.
///
/// The engine is agnostic to what a node type means; `type_tag` is carried
/// verbatim for external collaborators, and `config` is an opaque payload
/// the engine never reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    pub type_tag: String,
    pub layout: NodeLayout,
    /// Ordered input port names; inputs anchor on the top edge
    pub inputs: Vec<String>,
    /// Ordered output port names; outputs anchor on the bottom edge
    pub outputs: Vec<String>,
    /// Opaque configuration payload owned by external collaborators
    pub config: serde_json::Value,
}

impl Node {
    pub fn new(id: NodeId, type_tag: impl Into<String>, layout: NodeLayout) -> Self {
        Self {
            id,
            type_tag: type_tag.into(),
            layout,
            inputs: Vec::new(),
            outputs: Vec::new(),
            config: serde_json::Value::Null,
        }
    }

    /// Build a node at the given position from registry metadata (ports and
    /// default size come from the node-type catalog).
    pub fn from_metadata(
        id: NodeId,
        type_tag: impl Into<String>,
        position: CanvasPoint,
        metadata: &NodeTypeMetadata,
    ) -> Self {
        Self {
            id,
            type_tag: type_tag.into(),
            layout: NodeLayout::new(
                position.x(),
                position.y(),
                metadata.default_size.width(),
                metadata.default_size.height(),
            ),
            inputs: metadata.inputs.clone(),
            outputs: metadata.outputs.clone(),
            config: serde_json::Value::Null,
        }
    }

    pub fn with_inputs(mut self, inputs: Vec<String>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<String>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn bounds(&self) -> CanvasBounds {
        self.layout.bounds()
    }

    /// The ordered port names on one side of the node
    pub fn ports(&self, side: PortSide) -> &[String] {
        match side {
            PortSide::Input => &self.inputs,
            PortSide::Output => &self.outputs,
        }
    }

    /// Index of a named port on the given side
    pub fn port_index(&self, side: PortSide, name: &str) -> Option<usize> {
        self.ports(side).iter().position(|p| p == name)
    }

    /// Whether the named port exists on the given side
    pub fn has_port(&self, side: PortSide, name: &str) -> bool {
        self.port_index(side, name).is_some()
    }

    /// Canvas-space anchor point of a named port
    pub fn port_anchor(&self, side: PortSide, name: &str) -> Option<CanvasPoint> {
        let index = self.port_index(side, name)?;
        Some(port_anchor(
            &self.layout,
            side,
            index,
            self.ports(side).len(),
        ))
    }
}

/// Factory for generating nodes with guaranteed unique identifiers.
///
/// Centralizes id allocation so every node receives a unique [`NodeId`],
/// including after a snapshot restore (see [`NodeFactory::observe`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeFactory {
    next_id: usize,
}

impl Default for NodeFactory {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

impl NodeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a new unique node ID
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Record an externally supplied id so future allocations never collide
    /// with loaded nodes.
    pub fn observe(&mut self, id: NodeId) {
        self.next_id = self.next_id.max(id.0 + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(42);
        assert_eq!(id.0, 42);
        assert_eq!(format!("{}", id), "Node-42");
    }

    #[test]
    fn test_node_layout() {
        let layout = NodeLayout::new(10.0, 20.0, 100.0, 200.0);
        let bounds = layout.bounds();
        assert_eq!(bounds.origin, CanvasPoint::new(10.0, 20.0));
        assert_eq!(bounds.size, CanvasSize::new(100.0, 200.0));
        assert!(layout.contains(CanvasPoint::new(50.0, 100.0)));
        assert!(!layout.contains(CanvasPoint::new(5.0, 100.0)));
    }

    #[test]
    fn test_node_factory_observe() {
        let mut factory = NodeFactory::new();
        assert_eq!(factory.next_id(), NodeId::new(1));

        factory.observe(NodeId::new(10));
        assert_eq!(factory.next_id(), NodeId::new(11));

        // Observing a lower id never rewinds the counter
        factory.observe(NodeId::new(3));
        assert_eq!(factory.next_id(), NodeId::new(12));
    }

    #[test]
    fn test_port_lookup() {
        let node = Node::new(NodeId::new(1), "http", NodeLayout::new(0.0, 0.0, 120.0, 60.0))
            .with_inputs(vec!["in".into()])
            .with_outputs(vec!["ok".into(), "err".into()]);

        assert_eq!(node.port_index(PortSide::Output, "err"), Some(1));
        assert!(node.has_port(PortSide::Input, "in"));
        assert!(!node.has_port(PortSide::Output, "in"));
    }

    #[test]
    fn test_from_metadata_defaults() {
        let metadata = NodeTypeMetadata {
            default_size: CanvasSize::new(120.0, 60.0),
            inputs: vec!["in".into()],
            outputs: vec!["out".into()],
        };
        let node = Node::from_metadata(
            NodeId::new(7),
            "docker",
            CanvasPoint::new(40.0, 80.0),
            &metadata,
        );
        assert_eq!(node.layout, NodeLayout::new(40.0, 80.0, 120.0, 60.0));
        assert_eq!(node.inputs, vec!["in".to_string()]);
    }
}
