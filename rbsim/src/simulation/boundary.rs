//! Wall and floor handling
//!
//! Shape-aware reflect-and-clamp: a body whose extent crosses an edge is put
//! back touching that edge and the matching velocity component is negated.
//! Perfectly elastic, no friction.

use super::states::{Body, Bounds, NVec2};

/// Immovable bodies are left where they are, even across an edge
pub fn handle_boundaries(body: &mut Body, bounds: &Bounds) {
    if body.is_immovable() {
        return;
    }
    let half = body.shape().half_extents();
    let mut x = body.position();
    let mut v = body.v;

    // left / right
    if x.x - half.x < bounds.min_x {
        x.x = bounds.min_x + half.x;
        v.x = -v.x;
    }
    if x.x + half.x > bounds.max_x {
        x.x = bounds.max_x - half.x;
        v.x = -v.x;
    }

    // top / floor
    if x.y - half.y < bounds.min_y {
        x.y = bounds.min_y + half.y;
        v.y = -v.y;
    }
    if x.y + half.y > bounds.max_y {
        x.y = bounds.max_y - half.y;
        v.y = -v.y;
    }

    body.v = v;
    body.set_position(x);
}

/// True when the body rests on (or sinks into) the floor line
pub fn on_floor(body: &Body, bounds: &Bounds) -> bool {
    let half: NVec2 = body.shape().half_extents();
    body.position().y + half.y >= bounds.max_y
}
