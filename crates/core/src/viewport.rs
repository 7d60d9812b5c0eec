//! # Viewport
//!
//! Pan/zoom state for an open editor instance, plus the screen↔canvas
//! transform every coordinate conversion goes through. The transform is a
//! pure function of the viewport snapshot: for a fixed viewport,
//! `to_screen(to_canvas(p)) == p`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::coordinates::{CanvasBounds, CanvasPoint, CanvasSize, ScreenPoint};

/// Lower bound of the zoom clamp range.
pub const ZOOM_MIN: f32 = 0.1;
/// Upper bound of the zoom clamp range.
pub const ZOOM_MAX: f32 = 10.0;
/// Multiplier applied by a single zoom-in step.
pub const ZOOM_STEP_IN: f32 = 1.2;
/// Multiplier applied by a single zoom-out step.
pub const ZOOM_STEP_OUT: f32 = 0.8;
/// Fraction of the view that fitted content may occupy, so fitted nodes do
/// not touch the view edges.
pub const FIT_MARGIN: f32 = 0.9;

/// Camera state for the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Pan offset in screen coordinates
    pub pan: Vec2,
    /// Zoom level (1.0 = 100%)
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a point from screen coordinates to canvas coordinates.
    pub fn to_canvas(&self, screen: ScreenPoint) -> CanvasPoint {
        CanvasPoint::from_vec2((screen.as_vec2() - self.pan) / self.zoom)
    }

    /// Convert a point from canvas coordinates to screen coordinates.
    pub fn to_screen(&self, canvas: CanvasPoint) -> ScreenPoint {
        ScreenPoint::from_vec2(canvas.as_vec2() * self.zoom + self.pan)
    }

    /// Convert a canvas-space size to screen space.
    pub fn size_to_screen(&self, size: CanvasSize) -> CanvasSize {
        CanvasSize::from_vec2(size.as_vec2() * self.zoom)
    }

    /// Pan the viewport by a delta in screen coordinates.
    ///
    /// Panning is intentionally not zoom-compensated: the canvas follows the
    /// pointer 1:1 regardless of zoom level. Node dragging, by contrast,
    /// divides its screen delta by zoom.
    pub fn pan_by(&mut self, screen_delta: Vec2) {
        self.pan += screen_delta;
    }

    /// Zoom in one step, clamped to [`ZOOM_MIN`]..=[`ZOOM_MAX`].
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP_IN);
    }

    /// Zoom out one step, clamped to [`ZOOM_MIN`]..=[`ZOOM_MAX`].
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP_OUT);
    }

    /// Set the zoom level, clamped to the documented range.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Reset to the default view.
    pub fn reset(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = 1.0;
    }

    /// Fit the given content bounds into a view of the given size.
    ///
    /// Picks the zoom that fits the content times [`FIT_MARGIN`], clamped to
    /// the zoom range, and a pan offset that centers the content in the view.
    /// Degenerate content (zero width or height) is centered at zoom 1.
    pub fn fit(&mut self, content: CanvasBounds, view: CanvasSize) {
        let content_size = content.size;
        let zoom = if content_size.is_positive() {
            let fit_x = view.width() / content_size.width();
            let fit_y = view.height() / content_size.height();
            (fit_x.min(fit_y) * FIT_MARGIN).clamp(ZOOM_MIN, ZOOM_MAX)
        } else {
            1.0
        };

        self.zoom = zoom;
        let view_center = view.as_vec2() * 0.5;
        self.pan = view_center - content.center().as_vec2() * zoom;
    }
}
