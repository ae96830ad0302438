//! Configuration types for loading sandbox scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – stepping policy (every frame, or fixed interval)
//! - [`ParametersConfig`] – tick size, gravity, window and input constants
//! - [`BodyConfig`]       – initial state for each explicitly placed body
//! - [`RandomConfig`]     – optional batch of randomly placed circles
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   stepping: "frame"       # or "fixed"
//!   interval_ms: 10         # only used by "fixed"
//!
//! parameters:
//!   tick_ms: 10             # simulated ms per tick
//!   gravity: [0.0, 98.0]    # px/s^2, +y is down
//!   width: 1280             # window size, px
//!   height: 720
//!   floor_offset: 40        # floor line distance from the bottom edge
//!   jump_force: [0.0, -500000.0]
//!   G: 0.0                  # mutual attraction, 0 disables
//!   eps2: 1.0               # softening for mutual attraction
//!
//! bodies:
//!   - x: [ 200.0, 100.0 ]
//!     v: [ 50.0, 0.0 ]
//!     m: 10.0               # optional, defaults to area / 1000
//!     shape: { type: circle, radius: 30.0 }
//!   - x: [ 640.0, 500.0 ]
//!     shape: { type: box, width: 120.0, height: 40.0 }
//!
//! random:
//!   count: 5
//!   seed: 42
//!   min_radius: 50.0
//!   max_radius: 150.0
//! ```
//!
//! Every section except `parameters` is optional. The scenario builder turns
//! this into the runtime `Scenario` and validates shapes on the way.

use serde::Deserialize;

/// When the simulation advances
/// stepping: "frame"` or `stepping: "fixed"
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SteppingConfig {
    #[serde(rename = "frame")] // one tick per rendered frame
    #[default]
    Frame,

    #[serde(rename = "fixed")] // one tick once `interval_ms` of wall-clock time has passed
    Fixed,
}

#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default)]
    pub stepping: SteppingConfig,
    pub interval_ms: Option<f64>, // gate interval for fixed stepping
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stepping: SteppingConfig::Frame,
            interval_ms: None,
        }
    }
}

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub tick_ms: f64, // simulated ms per tick
    pub gravity: [f64; 2], // px/s^2
    pub width: f64, // window width
    pub height: f64, // window height
    pub floor_offset: f64, // floor line distance from the bottom
    pub jump_force: Option<[f64; 2]>, // force injected by space / click
    #[serde(default)]
    pub G: f64, // mutual attraction constant
    pub eps2: Option<f64>, // softening for mutual attraction
}

/// Shape of a configured body, sized but not positioned
/// shape: { type: circle, radius: .. }` or `shape: { type: box, width: .., height: .. }
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeConfig {
    Circle { radius: f64 },
    Box { width: f64, height: f64 },
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial position (center), px
    #[serde(default)]
    pub v: [f64; 2], // initial velocity, px/s
    pub m: Option<f64>, // mass; area / 1000 when omitted, <= 0 means immovable
    pub shape: ShapeConfig,
}

/// Randomly placed, non-overlapping circles
#[derive(Deserialize, Debug, Clone)]
pub struct RandomConfig {
    pub count: usize,
    pub seed: u64, // makes runs reproducible
    pub min_radius: f64,
    pub max_radius: f64,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    pub random: Option<RandomConfig>,
}
