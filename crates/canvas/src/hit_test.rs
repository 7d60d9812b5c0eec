//! # Hit testing
//!
//! Resolves canvas-space pointer positions to semantic targets: a resize
//! handle, a port, a node body, a connection corridor, or empty canvas.
//!
//! Both the node scan and the port scan are O(total ports) per call. They
//! run on pointer-move, which is bounded by the input event rate rather
//! than data size, so at expected graph sizes (hundreds of nodes) no
//! spatial index is needed; an implementation targeting much larger graphs
//! could substitute a quadtree behind these same signatures.

use graph::{ConnectionId, GraphModel};
use node::{port_anchor, NodeId, NodeLayout, PortAddress, PortSide};
use wireflow_core::CanvasPoint;

use crate::resize::ResizeHandle;
use crate::wire::WirePath;

/// Maximum distance at which a pointer is considered "over" a port.
///
/// Directly affects usability: it is both the grab radius when starting a
/// connection and the snap radius while drawing one.
pub const PORT_SNAP_RADIUS: f32 = 20.0;

/// Side length of the square hotspot around each resize handle.
pub const RESIZE_HANDLE_SIZE: f32 = 8.0;

/// A port resolved by a proximity query
#[derive(Debug, Clone, PartialEq)]
pub struct PortHit {
    pub address: PortAddress,
    pub anchor: CanvasPoint,
    pub distance: f32,
}

/// Topmost node whose bounding box contains the point.
///
/// Z-order is insertion order with the most recently added node on top, so
/// the scan runs in reverse.
pub fn node_at_point(model: &GraphModel, point: CanvasPoint) -> Option<NodeId> {
    model
        .nodes()
        .iter()
        .rev()
        .find(|node| node.layout.contains(point))
        .map(|node| node.id())
}

/// Closest port within `radius` of the point, optionally restricted to one
/// side.
///
/// Iteration order is stable — node insertion order, inputs before outputs —
/// and only a strictly closer port displaces the current best, so ties break
/// toward the first-encountered port.
pub fn nearest_port(
    model: &GraphModel,
    point: CanvasPoint,
    radius: f32,
    side: Option<PortSide>,
) -> Option<PortHit> {
    let mut best: Option<PortHit> = None;
    for node in model.nodes() {
        for candidate_side in [PortSide::Input, PortSide::Output] {
            if side.is_some_and(|s| s != candidate_side) {
                continue;
            }
            let ports = node.ports(candidate_side);
            for (index, name) in ports.iter().enumerate() {
                let anchor = port_anchor(&node.layout, candidate_side, index, ports.len());
                let distance = anchor.distance(point);
                if distance > radius {
                    continue;
                }
                if best.as_ref().is_none_or(|b| distance < b.distance) {
                    best = Some(PortHit {
                        address: PortAddress::new(node.id(), candidate_side, name.clone()),
                        anchor,
                        distance,
                    });
                }
            }
        }
    }
    best
}

/// Topmost connection whose hit corridor contains the point.
pub fn connection_at_point(model: &GraphModel, point: CanvasPoint) -> Option<ConnectionId> {
    model
        .connections()
        .iter()
        .rev()
        .find(|connection| {
            WirePath::for_connection(model, connection).is_some_and(|path| path.hits(point))
        })
        .map(|connection| connection.id)
}

/// Resize handle of the layout whose hotspot contains the point, if any.
pub fn resize_handle_at(layout: &NodeLayout, point: CanvasPoint) -> Option<ResizeHandle> {
    let half = RESIZE_HANDLE_SIZE / 2.0;
    ResizeHandle::ALL.into_iter().find(|handle| {
        let (fx, fy) = handle.unit_position();
        let center_x = layout.x + layout.width * fx;
        let center_y = layout.y + layout.height * fy;
        (point.x() - center_x).abs() <= half && (point.y() - center_y).abs() <= half
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use node::{Node, NodeLayout};

    fn model_with_two_nodes() -> (GraphModel, NodeId, NodeId) {
        let mut model = GraphModel::new();
        let first = Node::new(
            NodeId::new(1),
            "step",
            NodeLayout::new(0.0, 0.0, 120.0, 60.0),
        )
        .with_inputs(vec!["in".into()])
        .with_outputs(vec!["out".into()]);
        let second = Node::new(
            NodeId::new(2),
            "step",
            NodeLayout::new(100.0, 40.0, 120.0, 60.0),
        )
        .with_inputs(vec!["in".into()])
        .with_outputs(vec!["out".into()]);
        model.insert_node(first);
        model.insert_node(second);
        (model, NodeId::new(1), NodeId::new(2))
    }

    #[test]
    fn topmost_node_wins_in_overlap() {
        let (model, _, second) = model_with_two_nodes();
        // (110, 50) lies inside both nodes; the later insertion is on top
        assert_eq!(node_at_point(&model, CanvasPoint::new(110.0, 50.0)), Some(second));
        assert_eq!(node_at_point(&model, CanvasPoint::new(500.0, 500.0)), None);
    }

    #[test]
    fn nearest_port_respects_radius() {
        let (model, first, _) = model_with_two_nodes();
        // First node's output anchor is (60, 60)
        let hit = nearest_port(&model, CanvasPoint::new(63.0, 62.0), PORT_SNAP_RADIUS, None)
            .expect("within radius");
        assert_eq!(hit.address, PortAddress::new(first, PortSide::Output, "out"));
        assert_eq!(hit.anchor, CanvasPoint::new(60.0, 60.0));

        assert!(nearest_port(
            &model,
            CanvasPoint::new(63.0, 120.0),
            PORT_SNAP_RADIUS,
            None
        )
        .is_none());
    }

    #[test]
    fn side_filter_excludes_other_side() {
        let (model, first, _) = model_with_two_nodes();
        // Next to the first node's output; an input-only query must not see it
        let hit = nearest_port(
            &model,
            CanvasPoint::new(60.0, 61.0),
            PORT_SNAP_RADIUS,
            Some(PortSide::Input),
        );
        assert!(hit.is_none_or(|h| h.address.side == PortSide::Input));

        let hit = nearest_port(
            &model,
            CanvasPoint::new(60.0, 61.0),
            PORT_SNAP_RADIUS,
            Some(PortSide::Output),
        )
        .unwrap();
        assert_eq!(hit.address.node, first);
    }

    #[test]
    fn tie_breaks_to_first_encountered() {
        let mut model = GraphModel::new();
        // Two single-output nodes whose anchors coincide
        for id in [1usize, 2] {
            model.insert_node(
                Node::new(
                    NodeId::new(id),
                    "step",
                    NodeLayout::new(0.0, 0.0, 100.0, 50.0),
                )
                .with_outputs(vec!["out".into()]),
            );
        }
        let hit = nearest_port(&model, CanvasPoint::new(50.0, 50.0), PORT_SNAP_RADIUS, None)
            .expect("hit");
        assert_eq!(hit.address.node, NodeId::new(1));
    }

    #[test]
    fn connection_corridor_hit() {
        let (mut model, first, second) = model_with_two_nodes();
        let output = PortAddress::new(first, PortSide::Output, "out");
        let input = PortAddress::new(second, PortSide::Input, "in");
        let id = model.connect(&output, &input).unwrap();

        let path = WirePath::for_connection(&model, &model.connections()[0]).unwrap();
        let mid = path.point(0.5);
        assert_eq!(connection_at_point(&model, mid), Some(id));
        assert_eq!(
            connection_at_point(&model, CanvasPoint::new(1000.0, 1000.0)),
            None
        );
    }

    #[test]
    fn resize_handles_resolve_by_position() {
        let layout = NodeLayout::new(100.0, 100.0, 120.0, 60.0);
        assert_eq!(
            resize_handle_at(&layout, CanvasPoint::new(100.0, 100.0)),
            Some(ResizeHandle::NorthWest)
        );
        assert_eq!(
            resize_handle_at(&layout, CanvasPoint::new(220.0, 160.0)),
            Some(ResizeHandle::SouthEast)
        );
        assert_eq!(
            resize_handle_at(&layout, CanvasPoint::new(160.0, 161.0)),
            Some(ResizeHandle::South)
        );
        assert_eq!(
            resize_handle_at(&layout, CanvasPoint::new(160.0, 130.0)),
            None
        );
    }
}
