//! # Core geometry and viewport types for Wireflow
//!
//! This crate provides the shared coordinate-space types and the viewport
//! transform used by every other crate in the workspace. Nothing here holds
//! onto editor state; the types are plain values that the canvas passes
//! around.

pub mod coordinates;
pub mod viewport;

pub use coordinates::{CanvasBounds, CanvasPoint, CanvasSize, ScreenPoint};
pub use viewport::{Viewport, FIT_MARGIN, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP_IN, ZOOM_STEP_OUT};
