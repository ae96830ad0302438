use std::time::Instant;
use crate::simulation::engine::simulation_tick;
use crate::simulation::forces::{AccelSet, UniformGravity};
use crate::simulation::params::Parameters;
use crate::simulation::shapes::Shape;
use crate::simulation::states::{Body, Bounds, System, NVec2};

/// Deterministic mix of circles and boxes spread over a square world
fn bench_system(n: usize) -> System {
    let side = 40.0 * (n as f64).sqrt() + 200.0;
    let bounds = Bounds { min_x: 0.0, max_x: side, min_y: 0.0, max_y: side };

    let mut bodies = Vec::with_capacity(n);
    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec2::new(
            0.5 * side + (i_f * 0.37).sin() * 0.45 * side,
            0.5 * side + (i_f * 0.13).cos() * 0.45 * side,
        );
        let v = NVec2::new((i_f * 0.71).cos() * 100.0, (i_f * 0.29).sin() * 100.0);

        let shape = if i % 3 == 0 {
            Shape::rect(x, 12.0, 8.0)
        } else {
            Shape::circle(x, 5.0)
        };
        // sizes above are constants, construction cannot fail
        if let Ok(shape) = shape {
            bodies.push(Body::new(x, v, 1.0, shape));
        }
    }

    System::new(bodies, bounds)
}

/// Wall-clock cost of one tick (all-pairs broad phase) for growing body counts
pub fn bench_tick() {
    let ns = [100, 200, 400, 800, 1600, 3200];
    let steps = 20;

    let params = Parameters::default();
    let forces = AccelSet::new().with(UniformGravity { g: params.gravity });

    for n in ns {
        let mut sys = bench_system(n);

        // Warm up
        simulation_tick(&mut sys, &forces, &params);

        let mut collisions = 0;
        let t0 = Instant::now();
        for _ in 0..steps {
            collisions += simulation_tick(&mut sys, &forces, &params).resolved.len();
        }
        let per_tick = t0.elapsed().as_secs_f64() / steps as f64;

        println!("N = {n:5}, tick = {:10.6} s, pairs = {:9}, collisions/tick = {:6.1}",
            per_tick,
            n * (n - 1) / 2,
            collisions as f64 / steps as f64,
        );
    }
}
