//! Persistent acceleration sources for the sandbox
//!
//! Terms in an [`AccelSet`] are re-evaluated every tick and summed per body.
//! They are never stored on the body, so nothing has to be "re-applied";
//! one-shot pushes go through `Body::apply_force` instead.

use crate::simulation::states::{System, NVec2};
use crate::simulation::vector::EPSILON;

/// Collection of acceleration terms (uniform gravity, mutual attraction, ...)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total accelerations at time `t` for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, t: f64, sys: &System, out: &mut [NVec2]) {
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        for term in &self.terms {
            term.acceleration(t, sys, out);
        }
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Acceleration source operating on a [`System`]
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, t: f64, sys: &System, out: &mut [NVec2]);
}

/// Same acceleration for every body, independent of mass
pub struct UniformGravity {
    pub g: NVec2,
}

impl Acceleration for UniformGravity {
    fn acceleration(&self, _t: f64, sys: &System, out: &mut [NVec2]) {
        for (b, a) in sys.bodies.iter().zip(out.iter_mut()) {
            if !b.is_immovable() {
                *a += self.g;
            }
        }
    }
}

/// Softened pairwise Newtonian attraction between bodies
/// Immovable bodies neither attract nor get pulled
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64, // attraction constant, px^3 / (mass * s^2)
    pub eps2: f64, // softening
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, _t: f64, sys: &System, out: &mut [NVec2]) {
        let n = sys.bodies.len();

        // each unordered pair (i, j) once, equal and opposite
        for i in 0..n {
            let bi = &sys.bodies[i];
            if bi.is_immovable() {
                continue;
            }
            let xi = bi.position();

            for j in (i + 1)..n {
                let bj = &sys.bodies[j];
                if bj.is_immovable() {
                    continue;
                }

                // r points from i to j: i is pulled along +r, j along -r
                let r = bj.position() - xi;
                let d2 = (r.dot(&r) + self.eps2).max(EPSILON);
                let inv_r = d2.sqrt().recip();
                let coef = self.G * inv_r * inv_r * inv_r;

                out[i] += coef * bj.m * r;
                out[j] -= coef * bi.m * r;
            }
        }
    }
}
