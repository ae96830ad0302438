use rbsim::simulation::states::{Body, Bounds, System, NVec2};
use rbsim::simulation::shapes::{Shape, ShapeError, ShapeType};
use rbsim::simulation::params::Parameters;
use rbsim::simulation::forces::{AccelSet, NewtonianGravity, UniformGravity};
use rbsim::simulation::integrator::{euler_integrator, physic_step};
use rbsim::simulation::boundary::handle_boundaries;
use rbsim::simulation::collision::{check_collide, resolve_collision};
use rbsim::simulation::engine::{simulation_tick, TickGate};
use rbsim::simulation::scenario::{Scenario, ScenarioError};
use rbsim::visualization::headless::RunSummary;
use rbsim::ScenarioConfig;

const TOL: f64 = 1e-9;

/// Circle body at (x, y) at rest
pub fn circle(x: f64, y: f64, r: f64, m: f64) -> Body {
    let p = NVec2::new(x, y);
    Body::new(p, NVec2::zeros(), m, Shape::circle(p, r).unwrap())
}

/// Box body centered at (x, y) at rest
pub fn rect(x: f64, y: f64, w: f64, h: f64, m: f64) -> Body {
    let p = NVec2::new(x, y);
    Body::new(p, NVec2::zeros(), m, Shape::rect(p, w, h).unwrap())
}

/// Large world so walls never interfere
pub fn open_bounds() -> Bounds {
    Bounds { min_x: -1.0e6, max_x: 1.0e6, min_y: -1.0e6, max_y: 1.0e6 }
}

/// Parameters without gravity, 10 ms ticks
pub fn test_params() -> Parameters {
    Parameters {
        gravity: NVec2::zeros(),
        ..Parameters::default()
    }
}

fn shape_in_sync(b: &Body) -> bool {
    b.shape().position() == b.position()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < TOL
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn constant_acceleration_matches_semi_implicit_euler() {
    let a = NVec2::new(0.0, 100.0);
    let dt_ms = 10.0;
    let n = 100;
    let mut b = circle(0.0, 0.0, 1.0, 1.0);

    for _ in 0..n {
        physic_step(&mut b, a, dt_ms);
    }

    let dt = dt_ms / 1000.0;
    let nf = n as f64;

    // velocity is exact: a * n * dt
    assert!((b.v.y - a.y * nf * dt).abs() < 1e-9);

    // position: a * dt^2 * n(n+1)/2 for symplectic Euler ...
    let euler = a.y * dt * dt * nf * (nf + 1.0) / 2.0;
    assert!((b.position().y - euler).abs() < 1e-9);

    // ... which approaches the analytic a * T^2 / 2 up to one step of truncation
    let analytic = a.y * (nf * dt).powi(2) / 2.0;
    assert!((b.position().y - analytic).abs() <= a.y * dt * dt * nf / 2.0 + 1e-9);
    assert!(shape_in_sync(&b));
}

#[test]
fn applied_force_lasts_one_tick() {
    let mut b = circle(0.0, 0.0, 1.0, 2.0);
    b.apply_force(NVec2::new(400.0, 0.0)); // a = 200 px/s^2

    assert_eq!(b.acceleration(), NVec2::new(200.0, 0.0));
    physic_step(&mut b, NVec2::zeros(), 10.0);
    assert!(close(b.v.x, 2.0));
    assert_eq!(b.acceleration(), NVec2::zeros());

    physic_step(&mut b, NVec2::zeros(), 10.0);
    assert!(close(b.v.x, 2.0));
}

#[test]
fn immovable_bodies_ignore_gravity_and_forces() {
    let mut sys = System::new(vec![rect(10.0, 10.0, 4.0, 4.0, 0.0), circle(50.0, 50.0, 2.0, -3.0)], open_bounds());
    let params = Parameters::default();
    let forces = AccelSet::new().with(UniformGravity { g: params.gravity });

    sys.apply_force_all(NVec2::new(1.0e6, 0.0));
    for _ in 0..10 {
        euler_integrator(&mut sys, &forces, &params);
    }

    assert_eq!(sys.bodies[0].position(), NVec2::new(10.0, 10.0));
    assert_eq!(sys.bodies[1].position(), NVec2::new(50.0, 50.0));
    assert!(close(sys.t, 100.0));
}

// ==================================================================================
// Boundary tests
// ==================================================================================

#[test]
fn circle_left_of_min_x_is_clamped_and_reflected() {
    let bounds = Bounds { min_x: 0.0, max_x: 100.0, min_y: 0.0, max_y: 100.0 };
    let r = 5.0;
    let mut b = circle(bounds.min_x - 1.0, 50.0, r, 1.0);
    b.v = NVec2::new(-3.0, 1.0);

    handle_boundaries(&mut b, &bounds);

    assert_eq!(b.position().x, bounds.min_x + r);
    assert_eq!(b.v, NVec2::new(3.0, 1.0));
    assert!(shape_in_sync(&b));
}

#[test]
fn box_uses_half_extents_on_every_edge() {
    let bounds = Bounds { min_x: 0.0, max_x: 100.0, min_y: 0.0, max_y: 80.0 };

    let mut b = rect(98.0, 79.0, 20.0, 10.0, 1.0);
    b.v = NVec2::new(4.0, 6.0);
    handle_boundaries(&mut b, &bounds);
    assert_eq!(b.position(), NVec2::new(90.0, 75.0));
    assert_eq!(b.v, NVec2::new(-4.0, -6.0));

    let mut b = rect(3.0, 2.0, 20.0, 10.0, 1.0);
    b.v = NVec2::new(-1.0, -2.0);
    handle_boundaries(&mut b, &bounds);
    assert_eq!(b.position(), NVec2::new(10.0, 5.0));
    assert_eq!(b.v, NVec2::new(1.0, 2.0));
    assert!(shape_in_sync(&b));
}

#[test]
fn immovable_body_across_an_edge_stays_put() {
    let mut sys = System::new(
        vec![rect(100.0, 195.0, 200.0, 20.0, 0.0)],
        Bounds { min_x: 0.0, max_x: 400.0, min_y: 0.0, max_y: 200.0 },
    );
    simulation_tick(&mut sys, &AccelSet::new(), &test_params());

    assert_eq!(sys.bodies[0].position(), NVec2::new(100.0, 195.0));
    assert_eq!(sys.bodies[0].v, NVec2::zeros());
}

#[test]
fn body_inside_bounds_is_untouched() {
    let bounds = Bounds { min_x: 0.0, max_x: 100.0, min_y: 0.0, max_y: 100.0 };
    let mut b = circle(50.0, 50.0, 10.0, 1.0);
    b.v = NVec2::new(-7.0, 7.0);
    handle_boundaries(&mut b, &bounds);
    assert_eq!(b.position(), NVec2::new(50.0, 50.0));
    assert_eq!(b.v, NVec2::new(-7.0, 7.0));
}

// ==================================================================================
// Detection tests
// ==================================================================================

#[test]
fn circle_circle_touching_counts_as_overlap() {
    let a = circle(0.0, 0.0, 5.0, 1.0);
    let b = circle(10.0, 0.0, 5.0, 1.0);
    assert!(check_collide(&a, &b));

    let c = circle(10.01, 0.0, 5.0, 1.0);
    assert!(!check_collide(&a, &c));
}

#[test]
fn detection_is_symmetric_across_shape_pairs() {
    let bodies = [
        circle(0.0, 0.0, 5.0, 1.0),
        rect(9.0, 0.0, 10.0, 10.0, 1.0),
        rect(18.0, 4.0, 8.0, 8.0, 1.0),
        circle(40.0, 40.0, 3.0, 1.0),
    ];
    for a in &bodies {
        for b in &bodies {
            assert_eq!(check_collide(a, b), check_collide(b, a));
        }
    }
    assert!(check_collide(&bodies[0], &bodies[1]));
    assert!(check_collide(&bodies[1], &bodies[2]));
    assert!(!check_collide(&bodies[0], &bodies[2]));
    assert!(!check_collide(&bodies[2], &bodies[3]));
}

// ==================================================================================
// Resolution tests
// ==================================================================================

#[test]
fn equal_masses_swap_velocities_head_on() {
    // touching, so no positional correction
    let mut a = circle(0.0, 0.0, 5.0, 2.0);
    let mut b = circle(10.0, 0.0, 5.0, 2.0);
    a.v = NVec2::new(3.0, 0.0);
    b.v = NVec2::new(-1.0, 0.0);

    let contact = resolve_collision(&mut a, &mut b);

    assert!(close(contact.depth, 0.0));
    assert!(close(a.v.x, -1.0));
    assert!(close(b.v.x, 3.0));
    assert_eq!(a.position(), NVec2::new(0.0, 0.0));
    assert_eq!(b.position(), NVec2::new(10.0, 0.0));
}

#[test]
fn equal_mass_collision_conserves_momentum() {
    let mut a = circle(0.0, 0.0, 5.0, 1.5);
    let mut b = circle(6.0, 8.0, 5.0, 1.5);
    a.v = NVec2::new(4.0, 2.0);
    b.v = NVec2::new(-1.0, -3.0);
    let before = a.m * a.v + b.m * b.v;

    resolve_collision(&mut a, &mut b);

    let after = a.m * a.v + b.m * b.v;
    assert!((after - before).magnitude() < 1e-9);
}

#[test]
fn tangential_velocity_is_untouched() {
    let mut a = circle(0.0, 0.0, 5.0, 1.0);
    let mut b = circle(10.0, 0.0, 5.0, 1.0);
    a.v = NVec2::new(2.0, 7.0);
    b.v = NVec2::new(-2.0, -4.0);

    resolve_collision(&mut a, &mut b);

    assert!(close(a.v.y, 7.0));
    assert!(close(b.v.y, -4.0));
}

#[test]
fn penetration_is_split_by_inverse_mass() {
    let mut a = circle(0.0, 0.0, 10.0, 1.0);
    let mut b = circle(15.0, 0.0, 10.0, 1.0);

    let contact = resolve_collision(&mut a, &mut b);

    assert!(close(contact.depth, 5.0));
    assert!(close(a.position().x, -2.5));
    assert!(close(b.position().x, 17.5));
    assert!(close((b.position() - a.position()).magnitude(), 20.0));
    assert!(shape_in_sync(&a) && shape_in_sync(&b));
}

#[test]
fn static_wall_ignores_configured_velocity() {
    let p = NVec2::new(0.0, 0.0);
    let wall = Body::new(p, NVec2::new(50.0, 0.0), 0.0, Shape::rect(p, 20.0, 200.0).unwrap());
    assert_eq!(wall.v, NVec2::zeros());

    let mut ball = circle(15.0, 0.0, 10.0, 1.0);
    ball.v = NVec2::new(-10.0, 0.0);
    let mut sys = System::new(vec![wall, ball], open_bounds());
    simulation_tick(&mut sys, &AccelSet::new(), &test_params());

    assert_eq!(sys.bodies[0].position(), NVec2::new(0.0, 0.0));
    // reflected, same speed
    assert!(close(sys.bodies[1].v.x, 10.0));
    assert!(close(sys.bodies[1].v.y, 0.0));
}

#[test]
fn heavier_body_moves_less() {
    let mut light = circle(0.0, 0.0, 10.0, 1.0);
    let mut heavy = circle(14.0, 0.0, 10.0, 3.0);

    resolve_collision(&mut light, &mut heavy);

    // depth 6: inverse masses 1 and 1/3 -> 4.5 and 1.5
    assert!(close(light.position().x, -4.5));
    assert!(close(heavy.position().x, 15.5));
}

// ==================================================================================
// Tick tests
// ==================================================================================

#[test]
fn tick_never_resolves_separated_pairs() {
    let mut a = circle(0.0, 0.0, 5.0, 1.0);
    let mut b = rect(100.0, 0.0, 10.0, 10.0, 1.0);
    let mut c = circle(0.0, 100.0, 5.0, 1.0);
    a.v = NVec2::new(10.0, 0.0);
    b.v = NVec2::new(-10.0, 0.0);
    c.v = NVec2::new(0.0, 3.0);
    let mut sys = System::new(vec![a, b, c], open_bounds());

    let params = test_params();
    let forces = AccelSet::new();
    let report = simulation_tick(&mut sys, &forces, &params);

    assert_eq!(report.pairs_tested, 3);
    assert!(report.resolved.is_empty());
    // pure drift, no collision response
    assert_eq!(sys.bodies[0].v, NVec2::new(10.0, 0.0));
    assert_eq!(sys.bodies[1].v, NVec2::new(-10.0, 0.0));
    assert_eq!(sys.bodies[2].v, NVec2::new(0.0, 3.0));
    assert_eq!(sys.ticks, 1);
}

#[test]
fn tick_resolves_only_overlapping_pairs_in_order() {
    let bodies = vec![
        circle(0.0, 0.0, 10.0, 1.0),
        circle(500.0, 0.0, 10.0, 1.0),
        circle(15.0, 0.0, 10.0, 1.0),
        rect(505.0, 0.0, 10.0, 10.0, 1.0),
    ];
    let mut sys = System::new(bodies, open_bounds());

    let report = simulation_tick(&mut sys, &AccelSet::new(), &test_params());

    let pairs: Vec<(usize, usize)> = report.resolved.iter().map(|p| (p.i, p.j)).collect();
    assert_eq!(pairs, vec![(0, 2), (1, 3)]);
    assert_eq!(report.pairs_tested, 6);
    assert!(sys.bodies.iter().all(shape_in_sync));
}

#[test]
fn ball_bounces_off_floor() {
    let bounds = Bounds::from_window(200.0, 240.0, 40.0);
    let mut ball = circle(100.0, 185.0, 10.0, 1.0);
    ball.v = NVec2::new(0.0, 600.0);
    let mut sys = System::new(vec![ball], bounds);

    let params = Parameters::default();
    let forces = AccelSet::new().with(UniformGravity { g: params.gravity });
    simulation_tick(&mut sys, &forces, &params);

    let b = &sys.bodies[0];
    assert_eq!(b.position().y, 190.0);
    assert!(b.v.y < 0.0);
}

#[test]
fn tick_gate_fixed_interval() {
    let mut gate = TickGate::fixed(10.0);
    assert!(gate.ready(0.0));
    assert!(!gate.ready(5.0));
    assert!(!gate.ready(9.9));
    assert!(gate.ready(10.0));
    // one tick per call even after a long stall
    assert!(gate.ready(100.0));
    assert!(!gate.ready(101.0));

    let mut every_frame = TickGate::frame_coupled();
    assert!(every_frame.ready(0.0));
    assert!(every_frame.ready(0.0));
}

#[test]
fn run_summary_counts_collisions() {
    let mut sys = System::new(vec![circle(0.0, 0.0, 10.0, 1.0), circle(15.0, 0.0, 10.0, 1.0)], open_bounds());
    let mut summary = RunSummary::default();

    for _ in 0..3 {
        let report = simulation_tick(&mut sys, &AccelSet::new(), &test_params());
        summary.record(&report);
    }

    assert_eq!(summary.ticks, 3);
    assert!(summary.collisions >= 1);
    assert_eq!(summary.busiest_tick, 1);
}

// ==================================================================================
// Force tests
// ==================================================================================

#[test]
fn mutual_attraction_obeys_third_law() {
    let sys = System::new(vec![circle(-0.5, 0.0, 0.1, 2.0), circle(0.5, 0.0, 0.1, 3.0)], open_bounds());
    let forces = AccelSet::new().with(NewtonianGravity { G: 0.1, eps2: 0.0 });

    let mut acc = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(sys.t, &sys, &mut acc);

    let net = acc[0] * sys.bodies[0].m + acc[1] * sys.bodies[1].m;
    assert!(net.magnitude() < 1e-12, "Net force not zero: {:?}", net);

    let dx = sys.bodies[1].position() - sys.bodies[0].position();
    assert!(acc[0].dot(&dx) > 0.0, "Acceleration is not toward second body");
}

#[test]
fn uniform_gravity_is_mass_independent() {
    let sys = System::new(vec![circle(0.0, 0.0, 1.0, 1.0), circle(10.0, 0.0, 1.0, 50.0)], open_bounds());
    let forces = AccelSet::new().with(UniformGravity { g: NVec2::new(0.0, 98.0) });

    let mut acc = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(0.0, &sys, &mut acc);

    assert_eq!(acc[0], acc[1]);
}

#[test]
fn click_push_only_hits_contained_bodies() {
    let mut sys = System::new(vec![circle(0.0, 0.0, 10.0, 1.0), rect(100.0, 0.0, 20.0, 20.0, 1.0)], open_bounds());

    let hit = sys.apply_force_at(NVec2::new(105.0, 5.0), NVec2::new(0.0, -10.0));

    assert_eq!(hit, 1);
    assert_eq!(sys.bodies[0].acceleration(), NVec2::zeros());
    assert_eq!(sys.bodies[1].acceleration(), NVec2::new(0.0, -10.0));
}

// ==================================================================================
// Scenario tests
// ==================================================================================

const MIXED_YAML: &str = r#"
engine:
  stepping: "fixed"
  interval_ms: 20
parameters:
  tick_ms: 10
  gravity: [0.0, 98.0]
  width: 800
  height: 600
  floor_offset: 40
bodies:
  - x: [100.0, 100.0]
    v: [10.0, 0.0]
    shape: { type: circle, radius: 10.0 }
  - x: [300.0, 200.0]
    m: 0.0
    shape: { type: box, width: 200.0, height: 20.0 }
random:
  count: 8
  seed: 3
  min_radius: 10.0
  max_radius: 30.0
"#;

fn load(yaml: &str) -> ScenarioConfig {
    serde_yaml::from_str(yaml).unwrap()
}

#[test]
fn scenario_builds_from_yaml() {
    let scenario = Scenario::build_scenario(load(MIXED_YAML)).unwrap();
    let sys = &scenario.system;

    assert_eq!(sys.bodies.len(), 10);
    assert_eq!(sys.bounds, Bounds { min_x: 0.0, max_x: 800.0, min_y: 0.0, max_y: 560.0 });

    // mass defaults to area / 1000
    let first = &sys.bodies[0];
    assert!(close(first.m, std::f64::consts::PI * 100.0 / 1000.0));
    assert!(sys.bodies[1].is_immovable());
    assert_eq!(sys.bodies[1].shape().shape_type(), ShapeType::Box);

    // random circles never start overlapping anything
    for i in 0..sys.bodies.len() {
        for j in (i + 1)..sys.bodies.len() {
            assert!(!check_collide(&sys.bodies[i], &sys.bodies[j]), "bodies {i} and {j} overlap");
        }
    }
    assert_eq!(scenario.forces.len(), 1);
}

#[test]
fn random_placement_is_reproducible() {
    let a = Scenario::build_scenario(load(MIXED_YAML)).unwrap();
    let b = Scenario::build_scenario(load(MIXED_YAML)).unwrap();
    let pa: Vec<NVec2> = a.system.bodies.iter().map(|b| b.position()).collect();
    let pb: Vec<NVec2> = b.system.bodies.iter().map(|b| b.position()).collect();
    assert_eq!(pa, pb);
}

#[test]
fn invalid_shape_is_rejected() {
    let yaml = r#"
parameters:
  tick_ms: 10
  gravity: [0.0, 98.0]
  width: 800
  height: 600
  floor_offset: 40
bodies:
  - x: [100.0, 100.0]
    shape: { type: circle, radius: 10.0 }
  - x: [100.0, 300.0]
    shape: { type: box, width: 0.0, height: 20.0 }
"#;
    let err = Scenario::build_scenario(load(yaml)).err().unwrap();
    assert_eq!(
        err,
        ScenarioError::InvalidShape {
            index: 1,
            source: ShapeError::InvalidSize { width: 0.0, height: 20.0 },
        }
    );
}

#[test]
fn invalid_tick_is_rejected() {
    let yaml = r#"
parameters:
  tick_ms: 0
  gravity: [0.0, 98.0]
  width: 800
  height: 600
  floor_offset: 40
"#;
    let err = Scenario::build_scenario(load(yaml)).err().unwrap();
    assert!(matches!(err, ScenarioError::InvalidParameter { name: "tick_ms", .. }));
}

#[test]
fn non_finite_forces_are_rejected() {
    let yaml = r#"
parameters:
  tick_ms: 10
  gravity: [0.0, 98.0]
  width: 800
  height: 600
  floor_offset: 40
  G: .nan
"#;
    let err = Scenario::build_scenario(load(yaml)).err().unwrap();
    assert!(matches!(err, ScenarioError::InvalidParameter { name: "G", .. }));

    let yaml = r#"
parameters:
  tick_ms: 10
  gravity: [0.0, .inf]
  width: 800
  height: 600
  floor_offset: 40
"#;
    let err = Scenario::build_scenario(load(yaml)).err().unwrap();
    assert!(matches!(err, ScenarioError::InvalidParameter { name: "gravity.y", .. }));
}

#[test]
fn default_jump_lifts_a_large_ball() {
    let params = Parameters::default();
    let p = NVec2::new(0.0, 0.0);
    let mut b = Body::with_area_mass(p, NVec2::zeros(), Shape::circle(p, 100.0).unwrap());

    b.apply_force(params.jump_force);
    physic_step(&mut b, NVec2::zeros(), params.tick_ms);

    // rises well over 100 px against the default gravity
    let rise = b.v.y * b.v.y / (2.0 * params.gravity.y);
    assert!(b.v.y < 0.0);
    assert!(rise > 100.0);
}

#[test]
fn resize_moves_the_floor() {
    let mut scenario = Scenario::build_scenario(load(MIXED_YAML)).unwrap();
    scenario.resize(1024.0, 768.0);

    assert_eq!(scenario.system.bounds.max_x, 1024.0);
    assert_eq!(scenario.system.bounds.max_y, 728.0);
}

#[test]
fn scenario_ticks_stay_finite_and_in_sync() {
    let mut scenario = Scenario::build_scenario(load(MIXED_YAML)).unwrap();
    for _ in 0..500 {
        scenario.tick();
    }

    for b in &scenario.system.bodies {
        let x = b.position();
        assert!(x.x.is_finite() && x.y.is_finite());
        assert!(b.v.x.is_finite() && b.v.y.is_finite());
        assert!(shape_in_sync(b));
    }
    // the platform never moves
    assert_eq!(scenario.system.bodies[1].position(), NVec2::new(300.0, 200.0));
    assert_eq!(scenario.system.ticks, 500);
    assert!(close(scenario.system.t, 5000.0));
}
