//! # Connections
//!
//! A connection joins an output port of one node to an input port of
//! another. Direction is normalized at creation time: `source` is always the
//! output side, regardless of which end the user grabbed first.

use node::NodeId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        ConnectionId(Uuid::new_v4())
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Connection-{}", self.0)
    }
}

/// Visual styling for a rendered connection.
///
/// Purely cosmetic passthrough for the host renderer; the hit-test corridor
/// width is fixed and independent of `stroke_width`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireStyle {
    pub stroke_width: f32,
    /// RGBA, each channel 0..=1
    pub color: [f32; 4],
    pub arrow: bool,
    pub dashed: bool,
    pub label: Option<String>,
}

impl Default for WireStyle {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            color: [0.4, 0.4, 0.4, 1.0],
            arrow: true,
            dashed: false,
            label: None,
        }
    }
}

/// A committed connection between two ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    /// Node owning the output port this connection leaves from
    pub source: NodeId,
    pub source_port: String,
    /// Node owning the input port this connection arrives at
    pub target: NodeId,
    pub target_port: String,
    #[serde(default)]
    pub style: WireStyle,
}

impl Connection {
    pub fn new(
        source: NodeId,
        source_port: impl Into<String>,
        target: NodeId,
        target_port: impl Into<String>,
    ) -> Self {
        Self {
            id: ConnectionId::generate(),
            source,
            source_port: source_port.into(),
            target,
            target_port: target_port.into(),
            style: WireStyle::default(),
        }
    }

    /// Whether this connection joins the same unordered port pair as the
    /// given endpoints. The reverse orientation counts as the same pair, so
    /// duplicate detection is symmetric under side-swap.
    pub fn joins(&self, node_a: NodeId, port_a: &str, node_b: NodeId, port_b: &str) -> bool {
        let forward = self.source == node_a
            && self.source_port == port_a
            && self.target == node_b
            && self.target_port == port_b;
        let reverse = self.source == node_b
            && self.source_port == port_b
            && self.target == node_a
            && self.target_port == port_a;
        forward || reverse
    }

    /// Whether this connection touches the given node on either end
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}

/// Why a candidate connection was refused.
///
/// These are silent refusals, not failures: the validity check gates what
/// gets committed, and the host UI decides whether to surface feedback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionRejected {
    #[error("a node cannot connect to itself")]
    SelfLoop,
    #[error("both ends were grabbed on the {0} side")]
    SameSide(node::PortSide),
    #[error("the port pair is already connected")]
    Duplicate,
    #[error("no port named {port:?} on the {side} side of {node}")]
    UnknownEndpoint {
        node: NodeId,
        side: node::PortSide,
        port: String,
    },
}
