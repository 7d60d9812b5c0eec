//! # Canvas editor
//!
//! The interactive core of the node-graph editor: an [`Editor`] owns the
//! graph model, the viewport, and the exclusive interaction state, and
//! consumes screen-space pointer/keyboard signals from the host UI layer.
//!
//! ## Architecture
//!
//! Pointer events resolve to semantic targets through [`hit_test`], the
//! [`interaction`] state machine decides and executes the mutation against
//! the shared model, and [`scene`] derives the geometry a host renderer
//! draws each frame. Everything runs synchronously on the thread delivering
//! input events; there are no background workers and nothing here blocks.
//!
//! Gesture rules (initial state is always idle):
//! - pointer-down over a port starts a connection draw, recording the
//!   grabbed side
//! - pointer-down over a node body selects and starts a node drag
//! - pointer-down over empty canvas (or anywhere with the Hand tool) pans
//! - a resize-handle grab on the selected node preempts the other gestures;
//!   it is the one documented exception to "gestures start from idle"
//! - pointer-up returns to idle; a connection draw first tries to commit
//! - only an in-progress connection draw is cancellable

pub mod hit_test;
pub mod interaction;
pub mod resize;
pub mod scene;
pub mod wire;

use std::collections::HashSet;

use graph::{GraphModel, GraphSnapshot, SnapshotError, UnknownNodeType};
use log::debug;
use node::{NodeId, NodeTypeRegistry};
use wireflow_core::{CanvasPoint, CanvasSize, ScreenPoint, Viewport};

use crate::hit_test::{
    connection_at_point, nearest_port, node_at_point, resize_handle_at, PORT_SNAP_RADIUS,
};
use crate::interaction::{HoverTarget, InteractionState, Tool};
use crate::scene::Scene;

/// An open editor instance: one graph, one viewport, one interaction state.
///
/// Multiple instances (tabs) each own an independent copy; nothing is
/// shared between them.
#[derive(Debug, Default)]
pub struct Editor {
    model: GraphModel,
    viewport: Viewport,
    state: InteractionState,
    hover: Option<HoverTarget>,
    selected: HashSet<NodeId>,
    tool: Tool,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an editor over an existing model and viewport (load path).
    pub fn from_parts(model: GraphModel, viewport: Viewport) -> Self {
        Self {
            model,
            viewport,
            ..Self::default()
        }
    }

    /// Restore an editor from a persisted snapshot, validating the whole
    /// load first.
    pub fn from_snapshot(
        snapshot: &GraphSnapshot,
        registry: &dyn NodeTypeRegistry,
    ) -> Result<Self, SnapshotError> {
        let (model, viewport) = snapshot.restore(registry)?;
        Ok(Self::from_parts(model, viewport))
    }

    /// Capture the current `(nodes, connections, viewport)` for an external
    /// save operation.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::capture(&self.model, &self.viewport)
    }

    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut GraphModel {
        &mut self.model
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn hover(&self) -> Option<&HoverTarget> {
        self.hover.as_ref()
    }

    pub fn selected_nodes(&self) -> &HashSet<NodeId> {
        &self.selected
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Create a node of the given type at a screen position (palette drop)
    /// and select it.
    pub fn create_node_at(
        &mut self,
        type_tag: &str,
        screen: ScreenPoint,
        registry: &dyn NodeTypeRegistry,
    ) -> Result<NodeId, UnknownNodeType> {
        let position = self.viewport.to_canvas(screen);
        let id = self.model.create_node(type_tag, position, registry)?;
        self.selected.clear();
        self.selected.insert(id);
        Ok(id)
    }

    /// Handle a pointer-down at a screen position.
    pub fn pointer_down(&mut self, screen: ScreenPoint) {
        let point = self.viewport.to_canvas(screen);

        if self.tool == Tool::Hand {
            self.set_state(InteractionState::PanningCanvas {
                last_screen: screen,
            });
            return;
        }

        // Resize handles sit on top of everything else, but only the
        // selected node shows them.
        let handle_grab = self.selected.iter().find_map(|&id| {
            let node = self.model.node(id)?;
            resize_handle_at(&node.layout, point).map(|handle| (id, handle, node.layout))
        });
        if let Some((node, handle, initial)) = handle_grab {
            self.set_state(InteractionState::ResizingNode {
                node,
                handle,
                start_screen: screen,
                initial,
            });
            return;
        }

        if let Some(hit) = nearest_port(&self.model, point, PORT_SNAP_RADIUS, None) {
            self.hover = None;
            self.set_state(InteractionState::DrawingConnection {
                source_anchor: hit.anchor,
                source: hit.address,
                pointer: point,
                target: None,
            });
            return;
        }

        if let Some(id) = node_at_point(&self.model, point) {
            self.selected.clear();
            self.selected.insert(id);
            self.set_state(InteractionState::DraggingNode {
                node: id,
                last_screen: screen,
            });
            return;
        }

        self.selected.clear();
        self.set_state(InteractionState::PanningCanvas {
            last_screen: screen,
        });
    }

    /// Handle a pointer-move at a screen position.
    pub fn pointer_move(&mut self, screen: ScreenPoint) {
        let point = self.viewport.to_canvas(screen);

        match std::mem::take(&mut self.state) {
            InteractionState::Idle => {
                self.hover = self.compute_hover(point);
            }
            InteractionState::DraggingNode { node, last_screen } => {
                // Screen delta, zoom-compensated into canvas space
                let delta = (screen - last_screen).as_vec2() / self.viewport.zoom;
                self.model.move_node_by(node, delta);
                self.state = InteractionState::DraggingNode {
                    node,
                    last_screen: screen,
                };
            }
            InteractionState::PanningCanvas { last_screen } => {
                // Raw screen delta; panning is intentionally 1:1 with the
                // pointer at any zoom
                self.viewport.pan_by((screen - last_screen).as_vec2());
                self.state = InteractionState::PanningCanvas {
                    last_screen: screen,
                };
            }
            InteractionState::DrawingConnection {
                source,
                source_anchor,
                ..
            } => {
                let target = nearest_port(
                    &self.model,
                    point,
                    PORT_SNAP_RADIUS,
                    Some(source.side.opposite()),
                );
                self.state = InteractionState::DrawingConnection {
                    source,
                    source_anchor,
                    pointer: point,
                    target,
                };
            }
            InteractionState::ResizingNode {
                node,
                handle,
                start_screen,
                initial,
            } => {
                // Delta since gesture start against the gesture-start layout,
                // so repeated conversions cannot accumulate drift
                let delta = (screen - start_screen).as_vec2() / self.viewport.zoom;
                self.model.set_layout(node, resize::resize(&initial, handle, delta));
                self.state = InteractionState::ResizingNode {
                    node,
                    handle,
                    start_screen,
                    initial,
                };
            }
        }
    }

    /// Handle a pointer-up at a screen position. Every gesture returns to
    /// idle; a connection draw first tries to resolve and commit a target.
    pub fn pointer_up(&mut self, screen: ScreenPoint) {
        let previous = std::mem::take(&mut self.state);

        if let InteractionState::DrawingConnection { source, .. } = &previous {
            let point = self.viewport.to_canvas(screen);
            let target = nearest_port(
                &self.model,
                point,
                PORT_SNAP_RADIUS,
                Some(source.side.opposite()),
            );
            if let Some(hit) = target {
                // Invalid candidates are silently refused; the preview was
                // the feedback
                if let Err(rejected) = self.model.connect(source, &hit.address) {
                    debug!("connection refused: {rejected}");
                }
            }
        }

        if !previous.is_idle() {
            debug!("interaction: {} -> idle", previous.label());
        }
    }

    /// Explicit cancellation (e.g. Escape). Only an in-progress connection
    /// draw is cancellable; every other gesture runs to pointer-up.
    pub fn cancel(&mut self) {
        if self.state.is_drawing_connection() {
            debug!("interaction: {} -> idle (cancelled)", self.state.label());
            self.state = InteractionState::Idle;
        }
    }

    /// Delete the selected nodes and every connection touching them.
    /// Ignored mid-gesture.
    pub fn delete_selected(&mut self) {
        if !self.state.is_idle() {
            return;
        }
        let ids: Vec<NodeId> = self.selected.drain().collect();
        for id in ids {
            self.model.remove_node(id);
        }
        self.hover = None;
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Fit all nodes into a view of the given size. A no-op on an empty
    /// graph.
    pub fn fit_to_view(&mut self, view: CanvasSize) {
        if let Some(content) = self.model.content_bounds() {
            self.viewport.fit(content, view);
        }
    }

    /// Derive the screen-space geometry for the host renderer.
    pub fn scene(&self) -> Scene {
        Scene::build(
            &self.model,
            &self.viewport,
            &self.state,
            self.hover.as_ref(),
            &self.selected,
        )
    }

    fn compute_hover(&self, point: CanvasPoint) -> Option<HoverTarget> {
        if let Some(hit) = nearest_port(&self.model, point, PORT_SNAP_RADIUS, None) {
            return Some(HoverTarget::Port(hit));
        }
        connection_at_point(&self.model, point).map(HoverTarget::Connection)
    }

    fn set_state(&mut self, next: InteractionState) {
        debug!("interaction: {} -> {}", self.state.label(), next.label());
        self.state = next;
    }
}
