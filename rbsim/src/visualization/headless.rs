//! Window-less runner
//!
//! Same tick as the viewer, driven by `MinimalPlugins` for a fixed number of
//! ticks, with a summary logged at the end.

use bevy::app::AppExit;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use crate::simulation::boundary::on_floor;
use crate::simulation::engine::TickReport;
use crate::simulation::scenario::Scenario;

/// Collision statistics over a run
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub collisions: usize,
    pub busiest_tick: usize, // most pairs resolved in one tick
}

impl RunSummary {
    pub fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.collisions += report.resolved.len();
        self.busiest_tick = self.busiest_tick.max(report.resolved.len());
    }
}

#[derive(Resource)]
struct TickBudget(u64);

pub fn run_headless(scenario: Scenario, ticks: u64) {
    println!("run_headless: {} ticks with {} bodies", ticks, scenario.system.bodies.len());

    App::new()
        .insert_resource(scenario)
        .insert_resource(TickBudget(ticks))
        .init_resource::<RunSummary>()
        .add_plugins((MinimalPlugins, LogPlugin::default()))
        .add_systems(Update, headless_step_system)
        .run();
}

/// Every update is one tick; no wall-clock gating without a window
fn headless_step_system(
    mut scenario: ResMut<Scenario>,
    mut budget: ResMut<TickBudget>,
    mut summary: ResMut<RunSummary>,
    mut exit: EventWriter<AppExit>,
) {
    if budget.0 == 0 {
        log_summary(&scenario, &summary);
        exit.send(AppExit::Success);
        return;
    }

    let report = scenario.tick();
    summary.record(&report);
    budget.0 -= 1;
}

fn log_summary(scenario: &Scenario, summary: &RunSummary) {
    let sys = &scenario.system;
    let resting = sys.bodies.iter().filter(|b| on_floor(b, &sys.bounds)).count();
    let p = sys.momentum();

    info!(
        ticks = summary.ticks,
        simulated_ms = sys.t,
        collisions = summary.collisions,
        busiest_tick = summary.busiest_tick,
        on_floor = resting,
        "run finished"
    );
    info!("final momentum: ({:.3}, {:.3})", p.x, p.y);
    for (i, b) in sys.bodies.iter().enumerate() {
        let x = b.position();
        debug!("body {i}: x = ({:.2}, {:.2}) v = ({:.2}, {:.2})", x.x, x.y, b.v.x, b.v.y);
    }
}
