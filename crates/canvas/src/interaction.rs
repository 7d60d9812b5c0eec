//! # Interaction state
//!
//! The editor's drag/interaction modes as a tagged union: at most one mode
//! is active at a time, each variant carries only the data its mode needs,
//! and entering a new state fully replaces the previous one — there is no
//! stacking or nesting of gestures.

use node::{NodeId, NodeLayout, PortAddress};
use strum_macros::Display;
use wireflow_core::{CanvasPoint, ScreenPoint};

use crate::hit_test::PortHit;
use crate::resize::ResizeHandle;

/// The active tool, determining how pointer input is interpreted.
#[derive(Default, Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Standard tool: drag nodes, grab ports, resize, pan on empty canvas
    #[default]
    Select,
    /// Explicit pan-mode toggle: every pointer-down pans the canvas
    Hand,
}

/// The exclusive interaction mode. Created on pointer-down, destroyed on
/// pointer-up (or explicit cancellation of a connection draw).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    /// No gesture in progress
    #[default]
    Idle,
    /// Moving a node; the screen anchor advances every frame and the delta
    /// is zoom-compensated before it reaches the model
    DraggingNode {
        node: NodeId,
        last_screen: ScreenPoint,
    },
    /// Panning the viewport by raw screen deltas
    PanningCanvas { last_screen: ScreenPoint },
    /// Drawing a connection from a grabbed port; the preview either snaps
    /// to `target` or free-follows `pointer`
    DrawingConnection {
        source: PortAddress,
        source_anchor: CanvasPoint,
        pointer: CanvasPoint,
        target: Option<PortHit>,
    },
    /// Resizing a node from one handle; deltas apply against the layout
    /// captured at gesture start
    ResizingNode {
        node: NodeId,
        handle: ResizeHandle,
        start_screen: ScreenPoint,
        initial: NodeLayout,
    },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    pub fn is_drawing_connection(&self) -> bool {
        matches!(self, InteractionState::DrawingConnection { .. })
    }

    /// Short name for transition logging
    pub fn label(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::DraggingNode { .. } => "dragging-node",
            InteractionState::PanningCanvas { .. } => "panning-canvas",
            InteractionState::DrawingConnection { .. } => "drawing-connection",
            InteractionState::ResizingNode { .. } => "resizing-node",
        }
    }
}

/// What sits under the pointer right now. Transient visual feedback only;
/// committed mutations never read this.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverTarget {
    Port(PortHit),
    Connection(graph::ConnectionId),
}
