//! # Resize engine
//!
//! Eight handles: four corners and four edge midpoints. Each handle moves
//! only its own edge(s); the opposite edge or corner stays stationary,
//! including when the minimum-size clamp kicks in (the origin shift is
//! derived from the clamped dimension, not the raw pointer delta).
//!
//! Deltas are canvas-space: the pointer's screen delta since gesture start
//! divided by the current zoom, applied against the layout captured at
//! gesture start so repeated small conversions cannot accumulate drift.

use glam::Vec2;
use node::NodeLayout;
use strum_macros::Display;

/// Smallest width/height a node can be resized to.
pub const MIN_NODE_SIZE: f32 = 40.0;

/// A resize handle position on a node's boundary
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::NorthWest,
        ResizeHandle::North,
        ResizeHandle::NorthEast,
        ResizeHandle::East,
        ResizeHandle::SouthEast,
        ResizeHandle::South,
        ResizeHandle::SouthWest,
        ResizeHandle::West,
    ];

    /// Returns true if this handle drags the left edge
    pub fn moves_left_edge(&self) -> bool {
        matches!(
            self,
            ResizeHandle::NorthWest | ResizeHandle::West | ResizeHandle::SouthWest
        )
    }

    /// Returns true if this handle drags the right edge
    pub fn moves_right_edge(&self) -> bool {
        matches!(
            self,
            ResizeHandle::NorthEast | ResizeHandle::East | ResizeHandle::SouthEast
        )
    }

    /// Returns true if this handle drags the top edge
    pub fn moves_top_edge(&self) -> bool {
        matches!(
            self,
            ResizeHandle::NorthWest | ResizeHandle::North | ResizeHandle::NorthEast
        )
    }

    /// Returns true if this handle drags the bottom edge
    pub fn moves_bottom_edge(&self) -> bool {
        matches!(
            self,
            ResizeHandle::SouthWest | ResizeHandle::South | ResizeHandle::SouthEast
        )
    }

    /// Returns the opposite handle (the stationary anchor of a resize)
    pub fn opposite(&self) -> Self {
        match self {
            ResizeHandle::NorthWest => ResizeHandle::SouthEast,
            ResizeHandle::North => ResizeHandle::South,
            ResizeHandle::NorthEast => ResizeHandle::SouthWest,
            ResizeHandle::East => ResizeHandle::West,
            ResizeHandle::SouthEast => ResizeHandle::NorthWest,
            ResizeHandle::South => ResizeHandle::North,
            ResizeHandle::SouthWest => ResizeHandle::NorthEast,
            ResizeHandle::West => ResizeHandle::East,
        }
    }

    /// Fractional position of this handle on a unit rectangle
    pub fn unit_position(&self) -> (f32, f32) {
        match self {
            ResizeHandle::NorthWest => (0.0, 0.0),
            ResizeHandle::North => (0.5, 0.0),
            ResizeHandle::NorthEast => (1.0, 0.0),
            ResizeHandle::East => (1.0, 0.5),
            ResizeHandle::SouthEast => (1.0, 1.0),
            ResizeHandle::South => (0.5, 1.0),
            ResizeHandle::SouthWest => (0.0, 1.0),
            ResizeHandle::West => (0.0, 0.5),
        }
    }
}

/// Compute the new layout for a resize gesture.
///
/// `initial` is the layout at gesture start and `delta` the canvas-space
/// pointer delta since gesture start.
pub fn resize(initial: &NodeLayout, handle: ResizeHandle, delta: Vec2) -> NodeLayout {
    let mut layout = *initial;

    if handle.moves_right_edge() {
        layout.width = (initial.width + delta.x).max(MIN_NODE_SIZE);
    }
    if handle.moves_left_edge() {
        layout.width = (initial.width - delta.x).max(MIN_NODE_SIZE);
        // Keep the right edge stationary under the clamp
        layout.x = initial.x + (initial.width - layout.width);
    }
    if handle.moves_bottom_edge() {
        layout.height = (initial.height + delta.y).max(MIN_NODE_SIZE);
    }
    if handle.moves_top_edge() {
        layout.height = (initial.height - delta.y).max(MIN_NODE_SIZE);
        layout.y = initial.y + (initial.height - layout.height);
    }

    layout
}
