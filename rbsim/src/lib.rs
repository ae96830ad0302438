pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, BodySnapshot, Bounds, System, NVec2};
pub use simulation::shapes::{BoxShape, Circle, Shape, ShapeError, ShapeType};
pub use simulation::vector::Vector2Ext;
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity, UniformGravity};
pub use simulation::integrator::{euler_integrator, physic_step};
pub use simulation::boundary::handle_boundaries;
pub use simulation::collision::{check_collide, resolve_collision, Contact};
pub use simulation::engine::{simulation_tick, Engine, TickGate, TickReport};
pub use simulation::scenario::{Scenario, ScenarioError};

pub use configuration::config::{EngineConfig, ParametersConfig, BodyConfig, RandomConfig, ScenarioConfig, ShapeConfig, SteppingConfig};

pub use visualization::{rbsim_vis2d::run_2d, headless::run_headless};

pub use benchmark::benchmark::bench_tick;
