//! # Graph model
//!
//! `GraphModel` is the single owned mutable store: nodes in z-order
//! (insertion order, last on top), committed connections, and the id
//! factory. Components receive it by reference and never hold
//! back-references to each other.

use std::collections::HashMap;

use glam::Vec2;
use log::debug;
use node::{Node, NodeFactory, NodeId, NodeLayout, NodeTypeRegistry, PortAddress, PortSide};
use wireflow_core::{CanvasBounds, CanvasPoint};

use crate::connection::{Connection, ConnectionId, ConnectionRejected};

/// The node-type registry has no entry for the given tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown node type {0:?}")]
pub struct UnknownNodeType(pub String);

/// The shared graph model mutated by the canvas.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    /// Nodes in z-order: insertion order, topmost last
    nodes: Vec<Node>,
    /// Id → position in `nodes`
    index: HashMap<NodeId, usize>,
    connections: Vec<Connection>,
    factory: NodeFactory,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes in z-order (topmost last)
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let i = *self.index.get(&id)?;
        Some(&mut self.nodes[i])
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    /// Create a node of the given type at a canvas position (palette drop).
    /// Default size and port lists come from the registry.
    pub fn create_node(
        &mut self,
        type_tag: &str,
        position: CanvasPoint,
        registry: &dyn NodeTypeRegistry,
    ) -> Result<NodeId, UnknownNodeType> {
        let metadata = registry
            .metadata(type_tag)
            .ok_or_else(|| UnknownNodeType(type_tag.to_string()))?;
        let id = self.factory.next_id();
        let node = Node::from_metadata(id, type_tag, position, metadata);
        self.insert_node(node);
        Ok(id)
    }

    /// Insert a fully formed node (loaded or externally constructed).
    pub fn insert_node(&mut self, node: Node) {
        let id = node.id();
        self.factory.observe(id);
        self.index.insert(id, self.nodes.len());
        self.nodes.push(node);
    }

    /// Remove a node and every connection touching it.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(position) = self.index.remove(&id) else {
            return false;
        };
        self.nodes.remove(position);
        self.connections.retain(|c| !c.touches(id));
        self.rebuild_index();
        debug!("removed {id} and its connections");
        true
    }

    /// Translate a node by a canvas-space delta, clamped to non-negative
    /// coordinates.
    pub fn move_node_by(&mut self, id: NodeId, delta: Vec2) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        node.layout.x = (node.layout.x + delta.x).max(0.0);
        node.layout.y = (node.layout.y + delta.y).max(0.0);
        true
    }

    /// Replace a node's layout wholesale (resize commits go through here).
    pub fn set_layout(&mut self, id: NodeId, layout: NodeLayout) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.layout = layout;
                true
            }
            None => false,
        }
    }

    /// Check whether connecting the two grabbed ports would be accepted,
    /// returning the normalized (output, input) endpoints.
    ///
    /// Valid iff the nodes differ, the grabbed sides are opposite, both
    /// ports exist on their stated sides, and no committed connection joins
    /// the same unordered port pair. Symmetric under side-swap.
    pub fn validate_candidate<'a>(
        &self,
        a: &'a PortAddress,
        b: &'a PortAddress,
    ) -> Result<(&'a PortAddress, &'a PortAddress), ConnectionRejected> {
        if a.side == b.side {
            return Err(ConnectionRejected::SameSide(a.side));
        }
        // Normalize so the output side comes first
        let (source, target) = if a.side == PortSide::Output {
            (a, b)
        } else {
            (b, a)
        };
        if source.node == target.node {
            return Err(ConnectionRejected::SelfLoop);
        }
        for end in [source, target] {
            let exists = self
                .node(end.node)
                .is_some_and(|n| n.has_port(end.side, &end.name));
            if !exists {
                return Err(ConnectionRejected::UnknownEndpoint {
                    node: end.node,
                    side: end.side,
                    port: end.name.clone(),
                });
            }
        }
        let duplicate = self
            .connections
            .iter()
            .any(|c| c.joins(source.node, &source.name, target.node, &target.name));
        if duplicate {
            return Err(ConnectionRejected::Duplicate);
        }
        Ok((source, target))
    }

    /// Commit a connection between two grabbed ports, in either grab order.
    pub fn connect(
        &mut self,
        a: &PortAddress,
        b: &PortAddress,
    ) -> Result<ConnectionId, ConnectionRejected> {
        let (source, target) = self.validate_candidate(a, b)?;
        let connection = Connection::new(source.node, &source.name, target.node, &target.name);
        let id = connection.id;
        debug!("connected {source} -> {target}");
        self.connections.push(connection);
        Ok(id)
    }

    /// Insert an already-validated connection (snapshot restore).
    pub(crate) fn insert_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    /// Remove a connection by id.
    pub fn disconnect(&mut self, id: ConnectionId) -> bool {
        let before = self.connections.len();
        self.connections.retain(|c| c.id != id);
        self.connections.len() != before
    }

    /// Bounding box of all nodes, or `None` for an empty graph.
    pub fn content_bounds(&self) -> Option<CanvasBounds> {
        let mut nodes = self.nodes.iter();
        let first = nodes.next()?.bounds();
        Some(nodes.fold(first, |acc, node| acc.union(&node.bounds())))
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id(), i))
            .collect();
    }
}
