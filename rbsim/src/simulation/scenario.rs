//! Build fully-initialized sandbox scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`: stepping policy and tick gate)
//! - numerical parameters (`Parameters`)
//! - world state (`System` with bodies at t = 0)
//! - active force set (`AccelSet`)
//!
//! The scenario is inserted into Bevy as a `Resource` and consumed by the
//! tick and visualization systems. It is the only owner of the bodies.

use std::fmt;

use bevy::log::{info, warn};
use bevy::prelude::Resource;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::configuration::config::{BodyConfig, RandomConfig, ScenarioConfig, ShapeConfig};
use crate::simulation::collision::check_collide;
use crate::simulation::engine::{simulation_tick, Engine, TickReport};
use crate::simulation::forces::{AccelSet, NewtonianGravity, UniformGravity};
use crate::simulation::params::Parameters;
use crate::simulation::shapes::{Shape, ShapeError};
use crate::simulation::states::{Body, NVec2, System};

/// Draws per random body before placement gives up
const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Fallback for `engine.interval_ms`
const DEFAULT_INTERVAL_MS: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// `bodies[index]` has an invalid shape
    InvalidShape { index: usize, source: ShapeError },
    /// A parameter is out of range
    InvalidParameter { name: &'static str, value: f64 },
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidShape { index, source } => write!(f, "body {index}: {source}"),
            Self::InvalidParameter { name, value } => write!(f, "invalid parameter {name} = {value}"),
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidShape { source, .. } => Some(source),
            Self::InvalidParameter { .. } => None,
        }
    }
}

/// Bevy resource representing a fully-initialized sandbox
///
/// This is the main "runtime bundle" constructed from a [`ScenarioConfig`]:
/// it contains the engine settings, parameters, current world state, and the
/// set of active acceleration terms
#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: AccelSet,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ScenarioError> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let defaults = Parameters::default();
        let parameters = Parameters {
            tick_ms: p_cfg.tick_ms,
            gravity: NVec2::new(p_cfg.gravity[0], p_cfg.gravity[1]),
            width: p_cfg.width,
            height: p_cfg.height,
            floor_offset: p_cfg.floor_offset,
            jump_force: p_cfg.jump_force.map_or(defaults.jump_force, |f| NVec2::new(f[0], f[1])),
            G: p_cfg.G,
            eps2: p_cfg.eps2.unwrap_or(defaults.eps2),
        };
        validate_parameters(&parameters)?;

        // Engine (runtime) from EngineConfig
        let e_cfg = cfg.engine;
        let interval_ms = e_cfg.interval_ms.unwrap_or(DEFAULT_INTERVAL_MS);
        if !(interval_ms.is_finite() && interval_ms >= 0.0) {
            return Err(ScenarioError::InvalidParameter { name: "interval_ms", value: interval_ms });
        }
        let engine = Engine::new(e_cfg.stepping, interval_ms);

        // Bodies: explicit ones first, in file order
        let mut bodies = cfg
            .bodies
            .iter()
            .enumerate()
            .map(|(index, bc)| body_from_config(bc).map_err(|source| ScenarioError::InvalidShape { index, source }))
            .collect::<Result<Vec<Body>, _>>()?;

        let mut system = System::new(Vec::new(), parameters.bounds());
        if let Some(r_cfg) = &cfg.random {
            place_random_circles(&mut bodies, r_cfg, &system)?;
        }
        system.bodies = bodies;

        let forces = build_forces(&parameters);

        info!(
            bodies = system.bodies.len(),
            stepping = ?engine.stepping,
            tick_ms = parameters.tick_ms,
            "scenario built"
        );

        Ok(Self {
            engine,
            parameters,
            system,
            forces,
        })
    }

    /// One full tick with this scenario's forces and parameters
    pub fn tick(&mut self) -> TickReport {
        let Scenario { system, parameters, forces, .. } = self;
        simulation_tick(system, forces, parameters)
    }

    /// Window resize: the floor follows the new bottom edge
    pub fn resize(&mut self, width: f64, height: f64) {
        self.parameters.width = width;
        self.parameters.height = height;
        self.system.bounds = self.parameters.bounds();
        if self.system.bounds.max_y <= self.system.bounds.min_y {
            warn!(width, height, "window shorter than the floor offset");
        }
    }
}

fn validate_parameters(p: &Parameters) -> Result<(), ScenarioError> {
    let checks = [
        ("tick_ms", p.tick_ms, p.tick_ms > 0.0),
        ("width", p.width, p.width > 0.0),
        ("height", p.height, p.height > p.floor_offset),
        ("floor_offset", p.floor_offset, p.floor_offset >= 0.0),
        ("eps2", p.eps2, p.eps2 >= 0.0),
        ("gravity.x", p.gravity.x, true),
        ("gravity.y", p.gravity.y, true),
        ("jump_force.x", p.jump_force.x, true),
        ("jump_force.y", p.jump_force.y, true),
        ("G", p.G, true),
    ];
    for (name, value, ok) in checks {
        if !(value.is_finite() && ok) {
            return Err(ScenarioError::InvalidParameter { name, value });
        }
    }
    Ok(())
}

/// Uniform gravity always, mutual attraction only when `G != 0`
fn build_forces(p: &Parameters) -> AccelSet {
    let mut forces = AccelSet::new().with(UniformGravity { g: p.gravity });
    if p.G != 0.0 {
        forces = forces.with(NewtonianGravity {
            G: p.G,
            eps2: p.eps2,
        });
    }
    forces
}

fn shape_from_config(sc: &ShapeConfig, at: NVec2) -> Result<Shape, ShapeError> {
    match *sc {
        ShapeConfig::Circle { radius } => Shape::circle(at, radius),
        ShapeConfig::Box { width, height } => Shape::rect(at, width, height),
    }
}

fn body_from_config(bc: &BodyConfig) -> Result<Body, ShapeError> {
    let x = NVec2::new(bc.x[0], bc.x[1]);
    let v = NVec2::new(bc.v[0], bc.v[1]);
    let shape = shape_from_config(&bc.shape, x)?;
    Ok(match bc.m {
        Some(m) => Body::new(x, v, m, shape),
        None => Body::with_area_mass(x, v, shape),
    })
}

/// Add `cfg.count` circles at random positions inside the bounds, re-drawing a
/// position while it overlaps any body already placed. Circles that cannot be
/// placed after `MAX_PLACEMENT_ATTEMPTS` draws are skipped.
fn place_random_circles(bodies: &mut Vec<Body>, cfg: &RandomConfig, sys: &System) -> Result<(), ScenarioError> {
    if !(cfg.min_radius.is_finite() && cfg.min_radius > 0.0) {
        return Err(ScenarioError::InvalidParameter { name: "min_radius", value: cfg.min_radius });
    }
    if !(cfg.max_radius.is_finite() && cfg.max_radius >= cfg.min_radius) {
        return Err(ScenarioError::InvalidParameter { name: "max_radius", value: cfg.max_radius });
    }

    let mut rng = Pcg64::seed_from_u64(cfg.seed);
    let bounds = sys.bounds;

    for n in 0..cfg.count {
        let radius = rng.gen_range(cfg.min_radius..=cfg.max_radius);

        let mut placed = None;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let x = sample_axis(&mut rng, bounds.min_x + radius, bounds.max_x - radius);
            let y = sample_axis(&mut rng, bounds.min_y + radius, bounds.max_y - radius);
            let at = NVec2::new(x, y);
            let shape = Shape::circle(at, radius).map_err(|source| ScenarioError::InvalidShape {
                index: bodies.len(),
                source,
            })?;
            let candidate = Body::with_area_mass(at, NVec2::zeros(), shape);

            if !bodies.iter().any(|b| check_collide(b, &candidate)) {
                placed = Some(candidate);
                break;
            }
        }

        match placed {
            Some(body) => bodies.push(body),
            None => warn!(circle = n, radius, "no free spot found, circle skipped"),
        }
    }
    Ok(())
}

/// Uniform in `[lo, hi]`, or the midpoint when the range is empty
fn sample_axis(rng: &mut Pcg64, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        0.5 * (lo + hi)
    }
}
