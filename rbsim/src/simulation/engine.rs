//! High-level runtime engine: stepping policy and the simulation tick
//!
//! One tick runs to completion before anything reads the state:
//! 1. integrate every body (forces evaluated once, at the start of the tick)
//! 2. reflect/clamp every body against the world bounds
//! 3. one pass over all unordered pairs in ascending `(i, j)` order, resolving
//!    each pair that overlaps
//!
//! Pairs are resolved sequentially with the already-updated state of earlier
//! pairs and are not re-tested within the tick, so simultaneous multi-body
//! contacts are an approximation.

use bevy::log::debug;

use crate::configuration::config::SteppingConfig;
use super::boundary::handle_boundaries;
use super::collision::{check_collide, resolve_collision, Contact};
use super::forces::AccelSet;
use super::integrator::euler_integrator;
use super::params::Parameters;
use super::states::System;

#[derive(Debug, Clone)]
pub struct Engine {
    pub stepping: SteppingConfig, // frame-coupled or fixed interval
    pub gate: TickGate,
}

impl Engine {
    pub fn new(stepping: SteppingConfig, interval_ms: f64) -> Self {
        let gate = match stepping {
            SteppingConfig::Frame => TickGate::frame_coupled(),
            SteppingConfig::Fixed => TickGate::fixed(interval_ms),
        };
        Self { stepping, gate }
    }
}

/// Decides whether a tick runs on a given frame
/// Frame-coupled gates always fire; fixed gates fire once `interval_ms` of
/// wall-clock time has passed since the last tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickGate {
    interval_ms: f64,
    last_tick_ms: Option<f64>,
}

impl TickGate {
    pub fn frame_coupled() -> Self {
        Self { interval_ms: 0.0, last_tick_ms: None }
    }

    pub fn fixed(interval_ms: f64) -> Self {
        Self { interval_ms: interval_ms.max(0.0), last_tick_ms: None }
    }

    /// `now_ms` is a monotonic clock reading. At most one tick per call.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.last_tick_ms {
            Some(last) if now_ms - last < self.interval_ms => false,
            _ => {
                self.last_tick_ms = Some(now_ms);
                true
            }
        }
    }
}

/// A pair that overlapped and was resolved during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPair {
    pub i: usize,
    pub j: usize,
    pub contact: Contact,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub pairs_tested: usize,
    pub resolved: Vec<ResolvedPair>,
}

/// Run one full simulation tick in place
pub fn simulation_tick(sys: &mut System, forces: &AccelSet, params: &Parameters) -> TickReport {
    euler_integrator(sys, forces, params);

    let bounds = sys.bounds;
    for b in sys.bodies.iter_mut() {
        handle_boundaries(b, &bounds);
    }

    let mut report = TickReport::default();
    let n = sys.bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            report.pairs_tested += 1;

            // i < j, so body i lives in `head` and body j starts `tail`
            let (head, tail) = sys.bodies.split_at_mut(j);
            let (first, second) = (&mut head[i], &mut tail[0]);

            if check_collide(first, second) {
                let contact = resolve_collision(first, second);
                report.resolved.push(ResolvedPair { i, j, contact });
            }
        }
    }

    sys.ticks += 1;
    if !report.resolved.is_empty() {
        debug!(tick = sys.ticks, collisions = report.resolved.len(), "resolved collisions");
    }
    report
}
