//! # Port placement
//!
//! Ports are named, directional connection anchors on a node. Inputs sit on
//! the top edge, outputs on the bottom edge, and the ports on one side are
//! spaced evenly along it: the i-th of N ports (0-indexed) sits at
//! `width / (N + 1) * (i + 1)` from the node's left edge.
//!
//! That spacing rule is load-bearing: hit testing and any format recording
//! absolute port coordinates both depend on reproducing it exactly.

use serde::{Deserialize, Serialize};
use wireflow_core::CanvasPoint;

use crate::node::{NodeId, NodeLayout};

/// Which side of a node a port lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortSide {
    /// Connection target; anchored on the node's top edge
    Input,
    /// Connection source; anchored on the node's bottom edge
    Output,
}

impl PortSide {
    pub fn opposite(&self) -> Self {
        match self {
            PortSide::Input => PortSide::Output,
            PortSide::Output => PortSide::Input,
        }
    }
}

impl std::fmt::Display for PortSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortSide::Input => write!(f, "input"),
            PortSide::Output => write!(f, "output"),
        }
    }
}

/// Identifies one port on one node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortAddress {
    pub node: NodeId,
    pub side: PortSide,
    pub name: String,
}

impl PortAddress {
    pub fn new(node: NodeId, side: PortSide, name: impl Into<String>) -> Self {
        Self {
            node,
            side,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for PortAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}:{}", self.node, self.side, self.name)
    }
}

/// Canvas-space anchor of the `index`-th of `count` ports on one side of a
/// node.
pub fn port_anchor(layout: &NodeLayout, side: PortSide, index: usize, count: usize) -> CanvasPoint {
    let step = layout.width / (count as f32 + 1.0);
    let x = layout.x + step * (index as f32 + 1.0);
    let y = match side {
        PortSide::Input => layout.y,
        PortSide::Output => layout.y + layout.height,
    };
    CanvasPoint::new(x, y)
}
