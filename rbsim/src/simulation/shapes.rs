//! Collision/render shapes
//!
//! A body carries exactly one [`Shape`], stored by value. The shape keeps its
//! own copy of the body position so it can answer geometric queries
//! (containment, extents) on its own; `Body` is responsible for keeping the two
//! in sync.
//!
//! Boxes are axis-aligned and positioned by their **center**. Every consumer
//! (detection, penetration, containment, boundaries, rendering) uses that
//! convention.

use std::f64::consts::PI;
use std::fmt;

use super::states::NVec2;
use super::vector::Vector2Ext;

/// Rejected shape construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeError {
    /// Circle radius was zero, negative or not finite
    InvalidRadius(f64),
    /// Box width or height was zero, negative or not finite
    InvalidSize { width: f64, height: f64 },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRadius(r) => write!(f, "circle radius must be positive and finite, got {r}"),
            Self::InvalidSize { width, height } => {
                write!(f, "box size must be positive and finite, got {width} x {height}")
            }
        }
    }
}

impl std::error::Error for ShapeError {}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Discriminant of a [`Shape`], used by renderers and snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Circle,
    Box,
}

/// Circle with a strictly positive radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: NVec2,
    radius: f64,
}

impl Circle {
    pub fn new(center: NVec2, radius: f64) -> Result<Self, ShapeError> {
        if !positive(radius) {
            return Err(ShapeError::InvalidRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> NVec2 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// Boundary inclusive
    pub fn contains(&self, p: NVec2) -> bool {
        p.distance_to(&self.center) <= self.radius
    }
}

/// Axis-aligned box, positioned by its center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    center: NVec2,
    width: f64,
    height: f64,
}

impl BoxShape {
    pub fn new(center: NVec2, width: f64, height: f64) -> Result<Self, ShapeError> {
        if !positive(width) || !positive(height) {
            return Err(ShapeError::InvalidSize { width, height });
        }
        Ok(Self { center, width, height })
    }

    pub fn center(&self) -> NVec2 {
        self.center
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn half_width(&self) -> f64 {
        0.5 * self.width
    }

    pub fn half_height(&self) -> f64 {
        0.5 * self.height
    }

    pub fn left(&self) -> f64 {
        self.center.x - self.half_width()
    }

    pub fn right(&self) -> f64 {
        self.center.x + self.half_width()
    }

    pub fn top(&self) -> f64 {
        self.center.y - self.half_height()
    }

    pub fn bottom(&self) -> f64 {
        self.center.y + self.half_height()
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Boundary inclusive
    pub fn contains(&self, p: NVec2) -> bool {
        self.left() <= p.x && p.x <= self.right() && self.top() <= p.y && p.y <= self.bottom()
    }

    /// Point of the box (surface or interior) closest to `p`
    pub fn closest_point(&self, p: NVec2) -> NVec2 {
        NVec2::new(
            p.x.clamp(self.left(), self.right()),
            p.y.clamp(self.top(), self.bottom()),
        )
    }
}

/// Closed set of shapes a body can carry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Box(BoxShape),
}

impl Shape {
    /// Circle centered at `center`
    pub fn circle(center: NVec2, radius: f64) -> Result<Self, ShapeError> {
        Circle::new(center, radius).map(Self::Circle)
    }

    /// Axis-aligned box centered at `center`
    pub fn rect(center: NVec2, width: f64, height: f64) -> Result<Self, ShapeError> {
        BoxShape::new(center, width, height).map(Self::Box)
    }

    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Circle(_) => ShapeType::Circle,
            Shape::Box(_) => ShapeType::Box,
        }
    }

    pub fn position(&self) -> NVec2 {
        match self {
            Shape::Circle(c) => c.center,
            Shape::Box(b) => b.center,
        }
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        let p = NVec2::new(x, y);
        match self {
            Shape::Circle(c) => c.center = p,
            Shape::Box(b) => b.center = p,
        }
    }

    pub fn area(&self) -> f64 {
        match self {
            Shape::Circle(c) => c.area(),
            Shape::Box(b) => b.area(),
        }
    }

    pub fn contains(&self, p: NVec2) -> bool {
        match self {
            Shape::Circle(c) => c.contains(p),
            Shape::Box(b) => b.contains(p),
        }
    }

    /// Distance from the center to the edge along x and y:
    /// `(r, r)` for a circle, `(w/2, h/2)` for a box
    pub fn half_extents(&self) -> NVec2 {
        match self {
            Shape::Circle(c) => NVec2::new(c.radius, c.radius),
            Shape::Box(b) => NVec2::new(b.half_width(), b.half_height()),
        }
    }
}
