//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - tick duration in simulated milliseconds,
//! - uniform gravity and the optional mutual attraction constants (`G`, `eps2`),
//! - window size and floor offset used to derive the world bounds,
//! - the force injected by user input

use super::states::{Bounds, NVec2};

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub tick_ms: f64, // simulated ms advanced per tick
    pub gravity: NVec2, // px/s^2, +y is down
    pub width: f64, // window width, px
    pub height: f64, // window height, px
    pub floor_offset: f64, // distance from window bottom to the floor line
    pub jump_force: NVec2, // force applied for one tick on user input
    pub G: f64, // mutual attraction constant, 0 disables
    pub eps2: f64, // softening for mutual attraction
}

impl Parameters {
    pub fn bounds(&self) -> Bounds {
        Bounds::from_window(self.width, self.height, self.floor_offset)
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            tick_ms: 10.0,
            gravity: NVec2::new(0.0, 98.0),
            width: 1280.0,
            height: 720.0,
            floor_offset: 40.0,
            jump_force: NVec2::new(0.0, -500_000.0),
            G: 0.0,
            eps2: 1.0,
        }
    }
}
