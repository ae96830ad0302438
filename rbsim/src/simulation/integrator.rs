//! Fixed-step time integrator for the sandbox
//!
//! Semi-implicit (symplectic) Euler: velocity is updated first and the new
//! velocity moves the body. No sub-stepping. Step sizes are simulated
//! milliseconds; velocities and accelerations are per second.

use super::states::{Body, System, NVec2};
use super::forces::AccelSet;
use super::params::Parameters;

/// Advance one body by `dt_ms` under `accel` (persistent terms) plus whatever
/// was pushed into it with `apply_force` since the last step. The transient part
/// is drained, the shape follows the new position.
pub fn physic_step(body: &mut Body, accel: NVec2, dt_ms: f64) {
    let transient = body.drain_acceleration();
    if body.is_immovable() {
        return;
    }
    let dt = dt_ms / 1000.0;

    // v_n+1 = v_n + dt * a_n
    body.v += (accel + transient) * dt;

    // x_n+1 = x_n + dt * v_n+1
    let dx = body.v * dt;
    body.translate(dx);
}

/// Advance every body in the system by one tick of `params.tick_ms`
/// Accelerations are evaluated once, on the state at the start of the tick
pub fn euler_integrator(sys: &mut System, forces: &AccelSet, params: &Parameters) {
    let n = sys.bodies.len();
    if n > 0 {
        let mut accels = vec![NVec2::zeros(); n];
        forces.accumulate_accels(sys.t, &*sys, &mut accels);

        for (b, a) in sys.bodies.iter_mut().zip(accels.iter()) {
            physic_step(b, *a, params.tick_ms);
        }
    }

    sys.t += params.tick_ms;
}
