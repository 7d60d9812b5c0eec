//! # Derived render geometry
//!
//! The engine does not render. Every frame the host asks for a [`Scene`]:
//! node rectangles, port anchors, connection curves, and the in-progress
//! preview curve, all projected into screen space through the current
//! viewport. The host draws it however it likes.

use std::collections::HashSet;

use graph::{ConnectionId, GraphModel, WireStyle};
use node::{port_anchor, NodeId, PortSide};
use wireflow_core::{CanvasSize, ScreenPoint, Viewport};

use crate::interaction::{HoverTarget, InteractionState};
use crate::wire::WirePath;

/// A cubic Bézier projected into screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenePath {
    pub from: ScreenPoint,
    pub c1: ScreenPoint,
    pub c2: ScreenPoint,
    pub to: ScreenPoint,
}

impl ScenePath {
    fn project(path: &WirePath, viewport: &Viewport) -> Self {
        Self {
            from: viewport.to_screen(path.from),
            c1: viewport.to_screen(path.c1),
            c2: viewport.to_screen(path.c2),
            to: viewport.to_screen(path.to),
        }
    }
}

/// One port anchor in screen space
#[derive(Debug, Clone, PartialEq)]
pub struct ScenePort {
    pub name: String,
    pub side: PortSide,
    pub position: ScreenPoint,
    pub hovered: bool,
}

/// One node quad in screen space
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub id: NodeId,
    pub type_tag: String,
    pub origin: ScreenPoint,
    /// Screen-space dimensions (canvas size × zoom)
    pub size: CanvasSize,
    pub selected: bool,
    pub ports: Vec<ScenePort>,
}

/// One committed connection in screen space
#[derive(Debug, Clone, PartialEq)]
pub struct SceneWire {
    pub id: ConnectionId,
    pub path: ScenePath,
    pub style: WireStyle,
    pub hovered: bool,
}

/// The in-progress connection preview
#[derive(Debug, Clone, PartialEq)]
pub struct ScenePreview {
    pub path: ScenePath,
    /// False when the snapped candidate would be refused (self-loop,
    /// duplicate, same side); hosts render this in an "invalid" style
    pub valid: bool,
    /// Whether the preview is snapped to a port or free-following the pointer
    pub snapped: bool,
}

/// Everything a host renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
    pub wires: Vec<SceneWire>,
    pub preview: Option<ScenePreview>,
    pub viewport: Viewport,
}

impl Scene {
    /// Project the model and transient interaction state into screen space.
    /// Nodes and wires appear in z-order (topmost last).
    pub fn build(
        model: &GraphModel,
        viewport: &Viewport,
        state: &InteractionState,
        hover: Option<&HoverTarget>,
        selected: &HashSet<NodeId>,
    ) -> Self {
        let hovered_port = match hover {
            Some(HoverTarget::Port(hit)) => Some(&hit.address),
            _ => None,
        };
        let hovered_wire = match hover {
            Some(HoverTarget::Connection(id)) => Some(*id),
            _ => None,
        };

        let nodes = model
            .nodes()
            .iter()
            .map(|node| {
                let mut ports = Vec::with_capacity(node.inputs.len() + node.outputs.len());
                for side in [PortSide::Input, PortSide::Output] {
                    let names = node.ports(side);
                    for (index, name) in names.iter().enumerate() {
                        let anchor = port_anchor(&node.layout, side, index, names.len());
                        ports.push(ScenePort {
                            name: name.clone(),
                            side,
                            position: viewport.to_screen(anchor),
                            hovered: hovered_port.is_some_and(|address| {
                                address.node == node.id()
                                    && address.side == side
                                    && address.name == *name
                            }),
                        });
                    }
                }
                SceneNode {
                    id: node.id(),
                    type_tag: node.type_tag.clone(),
                    origin: viewport.to_screen(node.layout.origin()),
                    size: viewport.size_to_screen(node.layout.size()),
                    selected: selected.contains(&node.id()),
                    ports,
                }
            })
            .collect();

        let wires = model
            .connections()
            .iter()
            .filter_map(|connection| {
                let path = WirePath::for_connection(model, connection)?;
                Some(SceneWire {
                    id: connection.id,
                    path: ScenePath::project(&path, viewport),
                    style: connection.style.clone(),
                    hovered: hovered_wire == Some(connection.id),
                })
            })
            .collect();

        let preview = match state {
            InteractionState::DrawingConnection {
                source,
                source_anchor,
                pointer,
                target,
            } => {
                let loose_end = target.as_ref().map_or(*pointer, |hit| hit.anchor);
                // The preview obeys the committed-wire tangent rule, so the
                // output-side anchor is always the start of the curve.
                let path = match source.side {
                    PortSide::Output => WirePath::between(*source_anchor, loose_end),
                    PortSide::Input => WirePath::between(loose_end, *source_anchor),
                };
                let valid = match target {
                    Some(hit) => model.validate_candidate(source, &hit.address).is_ok(),
                    None => true,
                };
                Some(ScenePreview {
                    path: ScenePath::project(&path, viewport),
                    valid,
                    snapped: target.is_some(),
                })
            }
            _ => None,
        };

        Self {
            nodes,
            wires,
            preview,
            viewport: *viewport,
        }
    }
}
