//! Narrow-phase collision detection and resolution
//!
//! Detection is a boolean overlap test dispatched on the shape pair. Resolution
//! runs only for pairs that passed detection and does three things:
//!
//! 1. collision normal from the center line (`first -> second`)
//! 2. elastic impulse along that normal (restitution 1, tangential velocity
//!    untouched)
//! 3. penetration estimate per shape pair and a positional split proportional
//!    to inverse mass
//!
//! Box-box penetration uses `min(overlap_x, overlap_y)`. That is a minimum
//! translation approximation and can pick the wrong axis near corners; the
//! correction is always applied along the center normal.

use super::shapes::{BoxShape, Circle, Shape};
use super::states::{Body, NVec2};
use super::vector::{Vector2Ext, EPSILON};

/// Outcome of resolving one overlapping pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub normal: NVec2, // unit vector from first to second (zero if centers coincide)
    pub depth: f64, // estimated penetration, <= 0 means no positional correction
    pub impulse: f64, // signed impulse magnitude applied along `normal`
}

// =========================================================================================
// Detection
// =========================================================================================

/// Overlap test between two bodies, boundary inclusive
pub fn check_collide(first: &Body, second: &Body) -> bool {
    match (first.shape(), second.shape()) {
        (Shape::Circle(c1), Shape::Circle(c2)) => circle_circle(c1, c2),
        (Shape::Circle(c), Shape::Box(b)) | (Shape::Box(b), Shape::Circle(c)) => circle_box(c, b),
        (Shape::Box(b1), Shape::Box(b2)) => box_box(b1, b2),
    }
}

pub fn circle_circle(c1: &Circle, c2: &Circle) -> bool {
    c1.center().distance_to(&c2.center()) <= c1.radius() + c2.radius()
}

/// Closest point of the box to the circle center, then a radius check
pub fn circle_box(c: &Circle, b: &BoxShape) -> bool {
    let closest = b.closest_point(c.center());
    c.center().distance_to(&closest) <= c.radius()
}

pub fn box_box(b1: &BoxShape, b2: &BoxShape) -> bool {
    let (ox, oy) = box_overlap(b1, b2);
    ox >= 0.0 && oy >= 0.0
}

/// Signed interval overlap on x and y, negative when separated on that axis
fn box_overlap(b1: &BoxShape, b2: &BoxShape) -> (f64, f64) {
    let ox = b1.right().min(b2.right()) - b1.left().max(b2.left());
    let oy = b1.bottom().min(b2.bottom()) - b1.top().max(b2.top());
    (ox, oy)
}

// =========================================================================================
// Resolution
// =========================================================================================

/// Penetration estimate for an overlapping pair. `dist` is the (epsilon
/// guarded) center distance used for the normal.
pub fn penetration_depth(first: &Body, second: &Body, dist: f64) -> f64 {
    match (first.shape(), second.shape()) {
        (Shape::Circle(c1), Shape::Circle(c2)) => (c1.radius() + c2.radius()) - dist,
        (Shape::Circle(c), Shape::Box(b)) | (Shape::Box(b), Shape::Circle(c)) => {
            let closest = b.closest_point(c.center());
            c.radius() - c.center().distance_to(&closest)
        }
        (Shape::Box(b1), Shape::Box(b2)) => {
            let (ox, oy) = box_overlap(b1, b2);
            ox.min(oy)
        }
    }
}

/// Resolve an overlapping pair in place. Callers only invoke this after
/// [`check_collide`] returned true.
pub fn resolve_collision(first: &mut Body, second: &mut Body) -> Contact {
    // Normal along the center line
    let delta = second.position() - first.position();
    let mut dist = delta.magnitude();
    if dist == 0.0 {
        dist = EPSILON;
    }
    let normal = delta.safe_div(dist);

    // Velocity impulse (1D elastic collision projected on the normal)
    let v_rel = (second.effective_velocity() - first.effective_velocity()).dot(&normal);
    let impulse = match (first.is_immovable(), second.is_immovable()) {
        (false, false) => {
            let impulse = (2.0 * second.m / (first.m + second.m)) * v_rel;
            first.v += impulse * normal;
            second.v -= impulse * normal;
            impulse
        }
        // against an immovable body the movable one reflects its relative
        // normal velocity
        (true, false) => {
            second.v -= 2.0 * v_rel * normal;
            -2.0 * v_rel
        }
        (false, true) => {
            first.v += 2.0 * v_rel * normal;
            2.0 * v_rel
        }
        (true, true) => 0.0,
    };

    // Positional correction, split by inverse mass
    let depth = penetration_depth(first, second, dist);
    if depth > 0.0 {
        let inv1 = first.inv_mass();
        let inv2 = second.inv_mass();
        let mut total_inv = inv1 + inv2;
        if total_inv == 0.0 {
            total_inv = 1.0;
        }

        first.translate(-normal * (depth * inv1 / total_inv));
        second.translate(normal * (depth * inv2 / total_inv));
    }

    Contact { normal, depth, impulse }
}
