pub mod vector;
pub mod shapes;
pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod boundary;
pub mod collision;
pub mod scenario;
