//! # Snapshots
//!
//! Load/save surface for external persistence. The engine exposes its
//! current `(nodes, connections, viewport)` on demand and accepts a full
//! snapshot to restore. Restoring validates the whole load up front:
//! malformed data (dangling node ids, ports that don't exist on the stated
//! side, self-loops, duplicate edges) rejects the entire snapshot with a
//! descriptive error rather than corrupting the model. No partial recovery
//! is attempted; the caller decides what to do with a bad load.

use std::collections::HashSet;

use log::warn;
use node::{Node, NodeId, NodeLayout, NodeTypeRegistry, PortSide};
use serde::{Deserialize, Serialize};
use wireflow_core::Viewport;

use crate::connection::{Connection, ConnectionId, WireStyle};
use crate::model::GraphModel;

/// Why a snapshot load was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    #[error("node {node} has unknown type {type_tag:?}")]
    UnknownNodeType { node: NodeId, type_tag: String },
    #[error("node id {node} appears more than once")]
    DuplicateNodeId { node: NodeId },
    #[error("connection {connection} references unknown node {node}")]
    UnknownNode {
        connection: ConnectionId,
        node: NodeId,
    },
    #[error("connection {connection} references no port {port:?} on the {side} side of {node}")]
    UnknownPort {
        connection: ConnectionId,
        node: NodeId,
        side: PortSide,
        port: String,
    },
    #[error("connection {connection} connects node {node} to itself")]
    SelfLoop {
        connection: ConnectionId,
        node: NodeId,
    },
    #[error("connection {connection} duplicates an earlier connection")]
    DuplicateConnection { connection: ConnectionId },
    #[error("viewport zoom must be strictly positive, got {zoom}")]
    NonPositiveZoom { zoom: f32 },
}

/// Persisted form of a node. Width/height are optional; absent dimensions
/// fall back to the registry's default size for the node's type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub type_tag: String,
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default)]
    pub config: serde_json::Value,
}

/// Persisted form of a connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub id: ConnectionId,
    pub source: NodeId,
    pub source_port: String,
    pub target: NodeId,
    pub target_port: String,
    #[serde(default)]
    pub style: WireStyle,
}

/// A complete editor snapshot: graph content plus viewport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeRecord>,
    pub connections: Vec<ConnectionRecord>,
    pub viewport: Viewport,
}

impl GraphSnapshot {
    /// Capture the current model and viewport for an external save.
    pub fn capture(model: &GraphModel, viewport: &Viewport) -> Self {
        let nodes = model
            .nodes()
            .iter()
            .map(|node| NodeRecord {
                id: node.id(),
                type_tag: node.type_tag.clone(),
                x: node.layout.x,
                y: node.layout.y,
                width: Some(node.layout.width),
                height: Some(node.layout.height),
                config: node.config.clone(),
            })
            .collect();
        let connections = model
            .connections()
            .iter()
            .map(|c| ConnectionRecord {
                id: c.id,
                source: c.source,
                source_port: c.source_port.clone(),
                target: c.target,
                target_port: c.target_port.clone(),
                style: c.style.clone(),
            })
            .collect();
        Self {
            nodes,
            connections,
            viewport: *viewport,
        }
    }

    /// Validate and materialize the snapshot into a fresh model + viewport.
    pub fn restore(
        &self,
        registry: &dyn NodeTypeRegistry,
    ) -> Result<(GraphModel, Viewport), SnapshotError> {
        match self.try_restore(registry) {
            Ok(restored) => Ok(restored),
            Err(err) => {
                warn!("snapshot rejected: {err}");
                Err(err)
            }
        }
    }

    fn try_restore(
        &self,
        registry: &dyn NodeTypeRegistry,
    ) -> Result<(GraphModel, Viewport), SnapshotError> {
        if self.viewport.zoom <= 0.0 {
            return Err(SnapshotError::NonPositiveZoom {
                zoom: self.viewport.zoom,
            });
        }

        let mut model = GraphModel::new();
        let mut seen = HashSet::new();
        for record in &self.nodes {
            if !seen.insert(record.id) {
                return Err(SnapshotError::DuplicateNodeId { node: record.id });
            }
            let metadata =
                registry
                    .metadata(&record.type_tag)
                    .ok_or_else(|| SnapshotError::UnknownNodeType {
                        node: record.id,
                        type_tag: record.type_tag.clone(),
                    })?;
            let layout = NodeLayout::new(
                record.x,
                record.y,
                record.width.unwrap_or(metadata.default_size.width()),
                record.height.unwrap_or(metadata.default_size.height()),
            );
            let mut node = Node::new(record.id, record.type_tag.clone(), layout)
                .with_inputs(metadata.inputs.clone())
                .with_outputs(metadata.outputs.clone());
            node.config = record.config.clone();
            model.insert_node(node);
        }

        for record in &self.connections {
            Self::check_connection(&model, record)?;
            let mut connection = Connection::new(
                record.source,
                record.source_port.clone(),
                record.target,
                record.target_port.clone(),
            );
            connection.id = record.id;
            connection.style = record.style.clone();
            model.insert_connection(connection);
        }

        Ok((model, self.viewport))
    }

    fn check_connection(model: &GraphModel, record: &ConnectionRecord) -> Result<(), SnapshotError> {
        if record.source == record.target {
            return Err(SnapshotError::SelfLoop {
                connection: record.id,
                node: record.source,
            });
        }
        for (id, side, port) in [
            (record.source, PortSide::Output, &record.source_port),
            (record.target, PortSide::Input, &record.target_port),
        ] {
            let node = model.node(id).ok_or(SnapshotError::UnknownNode {
                connection: record.id,
                node: id,
            })?;
            if !node.has_port(side, port) {
                return Err(SnapshotError::UnknownPort {
                    connection: record.id,
                    node: id,
                    side,
                    port: port.clone(),
                });
            }
        }
        let duplicate = model.connections().iter().any(|c| {
            c.joins(
                record.source,
                &record.source_port,
                record.target,
                &record.target_port,
            )
        });
        if duplicate {
            return Err(SnapshotError::DuplicateConnection {
                connection: record.id,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use node::{NodeTypeMetadata, TypeCatalog};
    use wireflow_core::{CanvasPoint, CanvasSize};

    fn catalog() -> TypeCatalog {
        let mut catalog = TypeCatalog::new();
        catalog.register(
            "step",
            NodeTypeMetadata {
                default_size: CanvasSize::new(120.0, 60.0),
                inputs: vec!["in".into()],
                outputs: vec!["out".into()],
            },
        );
        catalog
    }

    fn node_record(id: usize, x: f32, y: f32) -> NodeRecord {
        NodeRecord {
            id: NodeId::new(id),
            type_tag: "step".into(),
            x,
            y,
            width: None,
            height: None,
            config: serde_json::Value::Null,
        }
    }

    fn connection_record(source: usize, target: usize) -> ConnectionRecord {
        ConnectionRecord {
            id: ConnectionId::generate(),
            source: NodeId::new(source),
            source_port: "out".into(),
            target: NodeId::new(target),
            target_port: "in".into(),
            style: WireStyle::default(),
        }
    }

    #[test]
    fn round_trip_through_capture() {
        let catalog = catalog();
        let snapshot = GraphSnapshot {
            nodes: vec![node_record(1, 0.0, 0.0), node_record(2, 300.0, 200.0)],
            connections: vec![connection_record(1, 2)],
            viewport: Viewport::default(),
        };
        let (model, viewport) = snapshot.restore(&catalog).unwrap();

        let recaptured = GraphSnapshot::capture(&model, &viewport);
        assert_eq!(recaptured.nodes.len(), 2);
        assert_eq!(recaptured.connections.len(), 1);
        // Missing dimensions were filled from the registry default
        assert_eq!(recaptured.nodes[0].width, Some(120.0));

        let (again, _) = recaptured.restore(&catalog).unwrap();
        assert_eq!(again.nodes().len(), 2);
        assert_eq!(again.connections().len(), 1);
    }

    #[test]
    fn rejects_unknown_node_reference() {
        let catalog = catalog();
        let snapshot = GraphSnapshot {
            nodes: vec![node_record(1, 0.0, 0.0)],
            connections: vec![connection_record(1, 99)],
            viewport: Viewport::default(),
        };
        let err = snapshot.restore(&catalog).unwrap_err();
        assert!(matches!(err, SnapshotError::UnknownNode { node, .. } if node == NodeId::new(99)));
    }

    #[test]
    fn rejects_port_on_wrong_side() {
        let catalog = catalog();
        let mut bad = connection_record(1, 2);
        bad.source_port = "in".into(); // "in" exists, but as an input
        let snapshot = GraphSnapshot {
            nodes: vec![node_record(1, 0.0, 0.0), node_record(2, 300.0, 0.0)],
            connections: vec![bad],
            viewport: Viewport::default(),
        };
        let err = snapshot.restore(&catalog).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::UnknownPort {
                side: PortSide::Output,
                ..
            }
        ));
    }

    #[test]
    fn rejects_self_loop_and_duplicates() {
        let catalog = catalog();
        let snapshot = GraphSnapshot {
            nodes: vec![node_record(1, 0.0, 0.0)],
            connections: vec![connection_record(1, 1)],
            viewport: Viewport::default(),
        };
        assert!(matches!(
            snapshot.restore(&catalog).unwrap_err(),
            SnapshotError::SelfLoop { .. }
        ));

        let snapshot = GraphSnapshot {
            nodes: vec![node_record(1, 0.0, 0.0), node_record(2, 300.0, 0.0)],
            connections: vec![connection_record(1, 2), connection_record(1, 2)],
            viewport: Viewport::default(),
        };
        assert!(matches!(
            snapshot.restore(&catalog).unwrap_err(),
            SnapshotError::DuplicateConnection { .. }
        ));
    }

    #[test]
    fn rejects_duplicate_node_ids_and_bad_zoom() {
        let catalog = catalog();
        let snapshot = GraphSnapshot {
            nodes: vec![node_record(1, 0.0, 0.0), node_record(1, 10.0, 0.0)],
            connections: vec![],
            viewport: Viewport::default(),
        };
        assert!(matches!(
            snapshot.restore(&catalog).unwrap_err(),
            SnapshotError::DuplicateNodeId { .. }
        ));

        let snapshot = GraphSnapshot {
            nodes: vec![],
            connections: vec![],
            viewport: Viewport {
                pan: glam::Vec2::ZERO,
                zoom: 0.0,
            },
        };
        assert_eq!(
            snapshot.restore(&catalog).unwrap_err(),
            SnapshotError::NonPositiveZoom { zoom: 0.0 }
        );
    }

    #[test]
    fn restored_ids_do_not_collide_with_new_nodes() {
        let catalog = catalog();
        let snapshot = GraphSnapshot {
            nodes: vec![node_record(7, 0.0, 0.0)],
            connections: vec![],
            viewport: Viewport::default(),
        };
        let (mut model, _) = snapshot.restore(&catalog).unwrap();
        let id = model
            .create_node("step", CanvasPoint::new(10.0, 10.0), &catalog)
            .unwrap();
        assert_eq!(id, NodeId::new(8));
    }
}
