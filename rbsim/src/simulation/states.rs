//! Core state types for the rigid-body sandbox.
//!
//! - `Body`   one simulated object: position, velocity, transient acceleration,
//!            mass and the shape it owns
//! - `System` the world: ordered bodies, bounds, elapsed simulated time
//!
//! Positions are in pixels with +y pointing down (screen convention), velocity
//! in px/s, time in milliseconds.

use nalgebra::Vector2;

use super::shapes::{Shape, ShapeType};

pub type NVec2 = Vector2<f64>;

/// A simulated body and its shape.
///
/// Position and shape are private so that every mutation goes through a method
/// that keeps `shape.position() == body.position()`.
#[derive(Debug, Clone)]
pub struct Body {
    x: NVec2, // position
    pub v: NVec2, // velocity
    a: NVec2, // transient acceleration, drained every tick
    pub m: f64, // mass, <= 0 means immovable
    shape: Shape,
}

impl Body {
    /// The shape is moved onto `x` regardless of where it was built.
    /// Immovable bodies start at rest whatever `v` says.
    pub fn new(x: NVec2, v: NVec2, m: f64, mut shape: Shape) -> Self {
        shape.set_position(x.x, x.y);
        let mut body = Self {
            x,
            v,
            a: NVec2::zeros(),
            m,
            shape,
        };
        if body.is_immovable() {
            body.v = NVec2::zeros();
        }
        body
    }

    /// Body whose mass is derived from its shape area (`area / 1000`)
    pub fn with_area_mass(x: NVec2, v: NVec2, shape: Shape) -> Self {
        let m = shape.area() / 1000.0;
        Self::new(x, v, m, shape)
    }

    pub fn position(&self) -> NVec2 {
        self.x
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Velocity as seen by collisions: always zero for immovable bodies
    pub fn effective_velocity(&self) -> NVec2 {
        if self.is_immovable() { NVec2::zeros() } else { self.v }
    }

    pub fn acceleration(&self) -> NVec2 {
        self.a
    }

    pub fn set_position(&mut self, x: NVec2) {
        self.x = x;
        self.sync_shape_position();
    }

    pub fn translate(&mut self, dx: NVec2) {
        self.set_position(self.x + dx);
    }

    fn sync_shape_position(&mut self) {
        self.shape.set_position(self.x.x, self.x.y);
    }

    /// Zero or negative (or non-finite) mass counts as infinite mass
    pub fn is_immovable(&self) -> bool {
        !(self.m.is_finite() && self.m > 0.0)
    }

    /// 1/m, or 0 for immovable bodies
    pub fn inv_mass(&self) -> f64 {
        if self.is_immovable() { 0.0 } else { 1.0 / self.m }
    }

    /// Newton's second law: a += F / m. Immovable bodies ignore forces.
    pub fn apply_force(&mut self, f: NVec2) {
        self.a += f * self.inv_mass();
    }

    /// Returns the accumulated transient acceleration and resets it
    pub fn drain_acceleration(&mut self) -> NVec2 {
        std::mem::replace(&mut self.a, NVec2::zeros())
    }

    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            shape_type: self.shape.shape_type(),
            position: self.x,
            half_extents: self.shape.half_extents(),
        }
    }
}

/// Read-only view of a body handed to renderers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    pub shape_type: ShapeType,
    pub position: NVec2,
    pub half_extents: NVec2, // (r, r) for circles, (w/2, h/2) for boxes
}

/// World rectangle bodies are kept inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Whole window width, floor line `floor_offset` px above the bottom edge
    pub fn from_window(width: f64, height: f64, floor_offset: f64) -> Self {
        Self {
            min_x: 0.0,
            max_x: width,
            min_y: 0.0,
            max_y: height - floor_offset,
        }
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // ordered collection of bodies
    pub bounds: Bounds, // world walls and floor
    pub t: f64, // simulated time, ms
    pub ticks: u64, // completed ticks
}

impl System {
    pub fn new(bodies: Vec<Body>, bounds: Bounds) -> Self {
        Self {
            bodies,
            bounds,
            t: 0.0,
            ticks: 0,
        }
    }

    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        self.bodies.iter().map(Body::snapshot).collect()
    }

    /// Push every body for one tick
    pub fn apply_force_all(&mut self, f: NVec2) {
        for b in self.bodies.iter_mut() {
            b.apply_force(f);
        }
    }

    /// Push the bodies whose shape contains `point`, returns how many were hit
    pub fn apply_force_at(&mut self, point: NVec2, f: NVec2) -> usize {
        let mut hit = 0;
        for b in self.bodies.iter_mut().filter(|b| b.shape().contains(point)) {
            b.apply_force(f);
            hit += 1;
        }
        hit
    }

    /// Total linear momentum of the movable bodies
    pub fn momentum(&self) -> NVec2 {
        self.bodies
            .iter()
            .filter(|b| !b.is_immovable())
            .fold(NVec2::zeros(), |p, b| p + b.m * b.v)
    }
}
