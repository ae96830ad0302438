use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::{Circle, Rectangle};
use bevy::window::{PrimaryWindow, WindowResized, WindowResizeConstraints};

use crate::simulation::scenario::Scenario;
use crate::simulation::shapes::ShapeType;
use crate::simulation::states::NVec2;

#[derive(Component)]
struct BodyIndex(pub usize);

const MIN_WINDOW: (f32, f32) = (640.0, 480.0);

pub fn run_2d(scenario: Scenario) {
    println!("run_2d: starting Bevy 2D viewer with {} bodies", scenario.system.bodies.len());

    let window = Window {
        title: "rbsim sandbox".into(),
        resolution: (scenario.parameters.width as f32, scenario.parameters.height as f32).into(),
        resize_constraints: WindowResizeConstraints {
            min_width: MIN_WINDOW.0,
            min_height: MIN_WINDOW.1,
            ..Default::default()
        },
        ..Default::default()
    };

    App::new()
        .insert_resource(scenario)
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(window),
            ..Default::default()
        }))
        .add_systems(Startup, setup_bodies_system)
        .add_systems(
            Update,
            (
                resize_system,
                input_system,
                physics_step_system,
                sync_transforms_system,
                draw_floor_system,
            )
                .chain(),
        )
        .run();
}

/// Simulation space is pixels with the origin top-left and +y down; the 2D
/// camera is centered with +y up
fn to_screen(scenario: &Scenario, p: NVec2) -> Vec2 {
    let w = scenario.parameters.width;
    let h = scenario.parameters.height;
    Vec2::new((p.x - 0.5 * w) as f32, (0.5 * h - p.y) as f32)
}

fn setup_bodies_system(mut commands: Commands, scenario: Res<Scenario>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    commands.spawn(Camera2dBundle::default());

    for (i, snap) in scenario.system.snapshot().iter().enumerate() {
        let half = snap.half_extents;
        let mesh = match snap.shape_type {
            ShapeType::Circle => Mesh2dHandle(meshes.add(Circle::new(half.x as f32))),
            ShapeType::Box => Mesh2dHandle(meshes.add(Rectangle::new(2.0 * half.x as f32, 2.0 * half.y as f32))),
        };
        let at = to_screen(&scenario, snap.position);

        commands.spawn((
            MaterialMesh2dBundle {
                mesh,
                material: materials.add(ColorMaterial::from(Color::WHITE)),
                transform: Transform::from_xyz(at.x, at.y, 0.0),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

fn resize_system(mut events: EventReader<WindowResized>, mut scenario: ResMut<Scenario>) {
    for e in events.read() {
        scenario.resize(e.width as f64, e.height as f64);
        debug!(width = e.width, height = e.height, "bounds updated");
    }
}

/// Space pushes every body, a left click pushes the bodies under the cursor
fn input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut scenario: ResMut<Scenario>,
) {
    let force = scenario.parameters.jump_force;

    if keys.just_pressed(KeyCode::Space) {
        scenario.system.apply_force_all(force);
    }

    if mouse.just_pressed(MouseButton::Left) {
        // cursor coordinates are top-left based, same as the simulation
        let cursor = windows.get_single().ok().and_then(|w| w.cursor_position());
        if let Some(c) = cursor {
            let hit = scenario.system.apply_force_at(NVec2::new(c.x as f64, c.y as f64), force);
            debug!(hit, "click impulse");
        }
    }
}

fn physics_step_system(time: Res<Time>, mut scenario: ResMut<Scenario>) {
    let now_ms = time.elapsed_seconds_f64() * 1000.0;
    let scenario = &mut *scenario;

    if scenario.engine.gate.ready(now_ms) {
        scenario.tick();
    }
}

fn sync_transforms_system(scenario: Res<Scenario>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(b) = scenario.system.bodies.get(*i) {
            let at = to_screen(&scenario, b.position());
            transform.translation.x = at.x;
            transform.translation.y = at.y;
        }
    }
}

fn draw_floor_system(scenario: Res<Scenario>, mut gizmos: Gizmos) {
    let bounds = scenario.system.bounds;
    let left = to_screen(&scenario, NVec2::new(bounds.min_x, bounds.max_y));
    let right = to_screen(&scenario, NVec2::new(bounds.max_x, bounds.max_y));
    gizmos.line_2d(left, right, Color::WHITE);

    // hatching below the floor line, every 10 px
    let mut x = bounds.min_x;
    while x < bounds.max_x {
        let top = to_screen(&scenario, NVec2::new(x, bounds.max_y));
        let bottom = to_screen(&scenario, NVec2::new(x + 5.0, bounds.max_y + 10.0));
        gizmos.line_2d(top, bottom, Color::WHITE);
        x += 10.0;
    }
}
