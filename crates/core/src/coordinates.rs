//! # Coordinate System Types
//!
//! Type-safe coordinate representations for the two coordinate spaces the
//! editor deals with. Using distinct types for each space prevents
//! accidental mixing of screen-space pointer positions with canvas-space
//! node positions.
//!
//! ## Coordinate Spaces
//!
//! - **Canvas coordinates**: the logical, zoom/pan-independent space in
//!   which node positions are stored
//! - **Screen coordinates**: device pixels as reported by pointer events

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Canvas coordinates: the logical space node positions are stored in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasPoint(Vec2);

/// Screen coordinates: device pixels with origin at the top-left of the view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint(Vec2);

/// Size (width, height) in canvas space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize(Vec2);

/// Axis-aligned bounds in canvas coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasBounds {
    pub origin: CanvasPoint,
    pub size: CanvasSize,
}

impl CanvasPoint {
    pub const ZERO: Self = Self(Vec2::ZERO);

    /// Create a new canvas point at the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    /// Create from a glam Vec2
    pub fn from_vec2(vec: Vec2) -> Self {
        Self(vec)
    }

    /// Get the underlying Vec2
    pub fn as_vec2(&self) -> Vec2 {
        self.0
    }

    /// Get x coordinate
    pub fn x(&self) -> f32 {
        self.0.x
    }

    /// Get y coordinate
    pub fn y(&self) -> f32 {
        self.0.y
    }

    /// Calculate distance to another point
    pub fn distance(&self, other: CanvasPoint) -> f32 {
        self.0.distance(other.0)
    }

    /// Calculate squared distance to another point (cheaper for comparisons)
    pub fn distance_squared(&self, other: CanvasPoint) -> f32 {
        self.0.distance_squared(other.0)
    }

    /// Linear interpolation to another point
    pub fn lerp(&self, other: CanvasPoint, t: f32) -> CanvasPoint {
        CanvasPoint(self.0.lerp(other.0, t))
    }
}

impl ScreenPoint {
    pub const ZERO: Self = Self(Vec2::ZERO);

    /// Create a new screen point at the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    /// Create from a glam Vec2
    pub fn from_vec2(vec: Vec2) -> Self {
        Self(vec)
    }

    /// Get the underlying Vec2
    pub fn as_vec2(&self) -> Vec2 {
        self.0
    }

    /// Get x coordinate
    pub fn x(&self) -> f32 {
        self.0.x
    }

    /// Get y coordinate
    pub fn y(&self) -> f32 {
        self.0.y
    }

    /// Calculate distance to another point
    pub fn distance(&self, other: ScreenPoint) -> f32 {
        self.0.distance(other.0)
    }
}

impl CanvasSize {
    pub const ZERO: Self = Self(Vec2::ZERO);

    /// Create a new canvas size with the specified dimensions
    pub fn new(width: f32, height: f32) -> Self {
        Self(Vec2::new(width, height))
    }

    /// Create from a glam Vec2
    pub fn from_vec2(vec: Vec2) -> Self {
        Self(vec)
    }

    /// Get the underlying Vec2
    pub fn as_vec2(&self) -> Vec2 {
        self.0
    }

    /// Get width
    pub fn width(&self) -> f32 {
        self.0.x
    }

    /// Get height
    pub fn height(&self) -> f32 {
        self.0.y
    }

    /// Check if both dimensions are strictly positive
    pub fn is_positive(&self) -> bool {
        self.0.x > 0.0 && self.0.y > 0.0
    }
}

impl CanvasBounds {
    /// Create new canvas bounds with the specified origin and size
    pub fn new(origin: CanvasPoint, size: CanvasSize) -> Self {
        Self { origin, size }
    }

    /// Bounds spanning the two given corner points
    pub fn from_corners(min: CanvasPoint, max: CanvasPoint) -> Self {
        Self {
            origin: min,
            size: CanvasSize(max.0 - min.0),
        }
    }

    /// Get the center point of the bounds
    pub fn center(&self) -> CanvasPoint {
        CanvasPoint(self.origin.0 + self.size.0 * 0.5)
    }

    /// Get the minimum point (top-left)
    pub fn min(&self) -> CanvasPoint {
        self.origin
    }

    /// Get the maximum point (bottom-right)
    pub fn max(&self) -> CanvasPoint {
        CanvasPoint(self.origin.0 + self.size.0)
    }

    /// Check if this bounds contains a point (edges inclusive)
    pub fn contains(&self, point: CanvasPoint) -> bool {
        let min = self.origin.0;
        let max = self.origin.0 + self.size.0;
        point.0.x >= min.x && point.0.y >= min.y && point.0.x <= max.x && point.0.y <= max.y
    }

    /// Get the union of two bounds
    pub fn union(&self, other: &CanvasBounds) -> CanvasBounds {
        let self_min = self.origin.0;
        let self_max = self.origin.0 + self.size.0;
        let other_min = other.origin.0;
        let other_max = other.origin.0 + other.size.0;

        let min = Vec2::new(self_min.x.min(other_min.x), self_min.y.min(other_min.y));
        let max = Vec2::new(self_max.x.max(other_max.x), self_max.y.max(other_max.y));

        CanvasBounds {
            origin: CanvasPoint(min),
            size: CanvasSize(max - min),
        }
    }

    /// Expand the bounds by a given amount in all directions
    pub fn expand(&self, amount: f32) -> CanvasBounds {
        let expand_vec = Vec2::splat(amount);
        CanvasBounds {
            origin: CanvasPoint(self.origin.0 - expand_vec),
            size: CanvasSize(self.size.0 + expand_vec * 2.0),
        }
    }
}

impl Add for CanvasPoint {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for CanvasPoint {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Mul<f32> for CanvasPoint {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self(self.0 * scalar)
    }
}

impl Div<f32> for CanvasPoint {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self(self.0 / scalar)
    }
}

impl Add for ScreenPoint {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for ScreenPoint {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Mul<f32> for ScreenPoint {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self(self.0 * scalar)
    }
}

impl Div<f32> for ScreenPoint {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self(self.0 / scalar)
    }
}

impl Add for CanvasSize {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for CanvasSize {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Mul<f32> for CanvasSize {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self(self.0 * scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_bounds_contains() {
        let bounds = CanvasBounds::new(CanvasPoint::new(10.0, 10.0), CanvasSize::new(20.0, 30.0));

        // Points inside
        assert!(bounds.contains(CanvasPoint::new(15.0, 15.0)));
        assert!(bounds.contains(CanvasPoint::new(10.0, 10.0))); // On edge
        assert!(bounds.contains(CanvasPoint::new(30.0, 40.0))); // Bottom right

        // Points outside
        assert!(!bounds.contains(CanvasPoint::new(5.0, 15.0)));
        assert!(!bounds.contains(CanvasPoint::new(15.0, 5.0)));
        assert!(!bounds.contains(CanvasPoint::new(35.0, 15.0)));
        assert!(!bounds.contains(CanvasPoint::new(15.0, 45.0)));
    }

    #[test]
    fn test_bounds_union() {
        let bounds1 = CanvasBounds::new(CanvasPoint::new(0.0, 0.0), CanvasSize::new(10.0, 10.0));
        let bounds2 = CanvasBounds::new(CanvasPoint::new(5.0, 5.0), CanvasSize::new(10.0, 10.0));

        let union = bounds1.union(&bounds2);
        assert_eq!(union.origin, CanvasPoint::new(0.0, 0.0));
        assert_eq!(union.size, CanvasSize::new(15.0, 15.0));
    }

    #[test]
    fn test_point_operations() {
        let p1 = CanvasPoint::new(10.0, 20.0);
        let p2 = CanvasPoint::new(5.0, 10.0);

        let sum = p1 + p2;
        assert_eq!(sum.x(), 15.0);
        assert_eq!(sum.y(), 30.0);

        let diff = p1 - p2;
        assert_eq!(diff.x(), 5.0);
        assert_eq!(diff.y(), 10.0);

        let scaled = p1 * 2.0;
        assert_eq!(scaled.x(), 20.0);
        assert_eq!(scaled.y(), 40.0);

        let divided = p1 / 2.0;
        assert_eq!(divided.x(), 5.0);
        assert_eq!(divided.y(), 10.0);
    }

    #[test]
    fn test_distance_and_lerp() {
        let p1 = CanvasPoint::new(0.0, 0.0);
        let p2 = CanvasPoint::new(3.0, 4.0);

        assert_eq!(p1.distance(p2), 5.0);

        let mid = p1.lerp(p2, 0.5);
        assert_eq!(mid.x(), 1.5);
        assert_eq!(mid.y(), 2.0);
    }

    #[test]
    fn test_from_corners() {
        let bounds =
            CanvasBounds::from_corners(CanvasPoint::new(2.0, 3.0), CanvasPoint::new(12.0, 9.0));
        assert_eq!(bounds.size, CanvasSize::new(10.0, 6.0));
        assert_eq!(bounds.center(), CanvasPoint::new(7.0, 6.0));
    }
}
