//! Mesh2d circle rendering, simulation-to-render mapping, and the HUD.
//!
//! ## Layer model
//!
//! Everything on the field is the same shared unit-circle mesh, scaled per
//! entity by its radius and tinted by its own `ColorMaterial`:
//!
//! | Layer     | z   | Material                          |
//! |-----------|-----|-----------------------------------|
//! | Player    | 1.0 | fixed light blue                  |
//! | Enemies   | 2.0 | per-enemy warm tint               |
//! | Particles | 3.0 | per-particle tint, alpha written every frame |
//!
//! Enemies draw over the player and debris draws over everything.
//!
//! ## Coordinate spaces
//!
//! The simulation runs in pointer space: origin at the top-left corner,
//! y growing downward, matching `Window::cursor_position`. The camera is a
//! stock `Camera2d` with the origin at the window center and y growing
//! upward. [`render_pos`] is the single place where the two meet; no other
//! code converts coordinates.
//!
//! ## System responsibilities
//!
//! | System                        | Schedule | Purpose                           |
//! |-------------------------------|----------|-----------------------------------|
//! | `setup_camera`                | Startup  | Spawn the 2D camera               |
//! | `init_circle_mesh`            | Startup  | Build the shared unit-circle mesh |
//! | `setup_hud`                   | Startup  | Spawn score/difficulty text       |
//! | `attach_*_mesh_system`        | Update   | Give fresh entities their visuals |
//! | `sync_transforms_system`      | Update   | Mirror simulation state to render |
//! | `sync_particle_alpha_system`  | Update   | Write particle fade into materials|
//! | `hud_display_system`          | Update   | Refresh the HUD text              |

use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};

use crate::color::player_blue;
use crate::enemy::Enemy;
use crate::particles::Particle;
use crate::player::Player;
use crate::state::{GameRun, GameState};
use crate::viewport::Viewport;

const PLAYER_Z: f32 = 1.0;
const ENEMY_Z: f32 = 2.0;
const PARTICLE_Z: f32 = 3.0;

/// Shared unit-radius circle mesh used by every entity on the field.
#[derive(Resource)]
pub struct CircleMesh(pub Handle<Mesh>);

/// Marker for the HUD root nodes, so they can be hidden on the end screen.
#[derive(Component)]
pub struct Hud;

/// Marker for the score line of the HUD.
#[derive(Component)]
pub struct ScoreText;

/// Marker for the difficulty line of the HUD.
#[derive(Component)]
pub struct DifficultyText;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_camera, init_circle_mesh, setup_hud))
            .add_systems(
                Update,
                (
                    (
                        attach_player_mesh_system,
                        attach_enemy_mesh_system,
                        attach_particle_mesh_system,
                    ),
                    sync_transforms_system,
                    sync_particle_alpha_system,
                    hud_display_system,
                )
                    .chain(),
            )
            .add_systems(OnEnter(GameState::Playing), show_hud)
            .add_systems(OnExit(GameState::Playing), hide_hud);
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Setup camera for 2D rendering.
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    eprintln!("[SETUP] Camera spawned");
}

/// Build the shared circle mesh and store it as a [`CircleMesh`] resource.
fn init_circle_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let handle = meshes.add(unit_circle_mesh(32));
    commands.insert_resource(CircleMesh(handle));
}

/// Spawn the top-left score and difficulty readouts.
fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(20.0),
                top: Val::Px(20.0),
                ..default()
            },
            Hud,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Score: 0"),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                ScoreText,
            ));
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(20.0),
                top: Val::Px(60.0),
                ..default()
            },
            Hud,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Difficulty: 1"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(player_blue()),
                DifficultyText,
            ));
        });
}

// ── Mesh attachment ───────────────────────────────────────────────────────────

/// Give every newly spawned player its visuals.
///
/// Uses [`Added<Player>`] so this only executes for entities that appeared
/// since the previous frame.
pub fn attach_player_mesh_system(
    mut commands: Commands,
    circle_mesh: Res<CircleMesh>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    viewport: Res<Viewport>,
    players: Query<(Entity, &Player), Added<Player>>,
) {
    for (entity, player) in players.iter() {
        let material = materials.add(ColorMaterial::from_color(player_blue()));
        commands.entity(entity).insert((
            Mesh2d(circle_mesh.0.clone()),
            MeshMaterial2d(material),
            circle_transform(&viewport, player.pos, player.radius, PLAYER_Z),
            Visibility::default(),
        ));
    }
}

/// Give every newly spawned enemy its visuals, tinted with its rolled color.
pub fn attach_enemy_mesh_system(
    mut commands: Commands,
    circle_mesh: Res<CircleMesh>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    viewport: Res<Viewport>,
    enemies: Query<(Entity, &Enemy), Added<Enemy>>,
) {
    for (entity, enemy) in enemies.iter() {
        let material = materials.add(ColorMaterial::from_color(enemy.color));
        commands.entity(entity).insert((
            Mesh2d(circle_mesh.0.clone()),
            MeshMaterial2d(material),
            circle_transform(&viewport, enemy.pos, enemy.radius, ENEMY_Z),
            Visibility::default(),
        ));
    }
}

/// Give every newly spawned particle its visuals.
///
/// Each particle gets its own material so its alpha can fade individually.
pub fn attach_particle_mesh_system(
    mut commands: Commands,
    circle_mesh: Res<CircleMesh>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    viewport: Res<Viewport>,
    particles: Query<(Entity, &Particle), Added<Particle>>,
) {
    for (entity, particle) in particles.iter() {
        let material = materials.add(ColorMaterial::from_color(particle.color));
        commands.entity(entity).insert((
            Mesh2d(circle_mesh.0.clone()),
            MeshMaterial2d(material),
            circle_transform(&viewport, particle.pos, particle.radius, PARTICLE_Z),
            Visibility::default(),
        ));
    }
}

// ── Per-frame sync ────────────────────────────────────────────────────────────

/// Mirror every entity's simulation position and radius into its `Transform`.
#[allow(clippy::type_complexity)]
pub fn sync_transforms_system(
    viewport: Res<Viewport>,
    mut players: Query<(&Player, &mut Transform)>,
    mut enemies: Query<(&Enemy, &mut Transform), Without<Player>>,
    mut particles: Query<(&Particle, &mut Transform), (Without<Player>, Without<Enemy>)>,
) {
    for (player, mut transform) in players.iter_mut() {
        *transform = circle_transform(&viewport, player.pos, player.radius, PLAYER_Z);
    }
    for (enemy, mut transform) in enemies.iter_mut() {
        *transform = circle_transform(&viewport, enemy.pos, enemy.radius, ENEMY_Z);
    }
    for (particle, mut transform) in particles.iter_mut() {
        *transform = circle_transform(&viewport, particle.pos, particle.radius, PARTICLE_Z);
    }
}

/// Write each particle's fade into its material alpha.
pub fn sync_particle_alpha_system(
    mut materials: ResMut<Assets<ColorMaterial>>,
    particles: Query<(&Particle, &MeshMaterial2d<ColorMaterial>)>,
) {
    for (particle, material) in particles.iter() {
        if let Some(mat) = materials.get_mut(&material.0) {
            mat.color = particle.color.with_alpha(particle.alpha.max(0.0));
        }
    }
}

/// Refresh the HUD readouts whenever the run state changes.
pub fn hud_display_system(
    run: Res<GameRun>,
    mut score_text: Query<&mut Text, (With<ScoreText>, Without<DifficultyText>)>,
    mut difficulty_text: Query<&mut Text, With<DifficultyText>>,
) {
    if !run.is_changed() {
        return;
    }
    for mut text in score_text.iter_mut() {
        *text = Text::new(format!("Score: {}", run.score));
    }
    for mut text in difficulty_text.iter_mut() {
        *text = Text::new(format!("Difficulty: {}", run.difficulty));
    }
}

fn show_hud(mut huds: Query<&mut Visibility, With<Hud>>) {
    for mut visibility in huds.iter_mut() {
        *visibility = Visibility::Visible;
    }
}

fn hide_hud(mut huds: Query<&mut Visibility, With<Hud>>) {
    for mut visibility in huds.iter_mut() {
        *visibility = Visibility::Hidden;
    }
}

// ── Geometry helpers ──────────────────────────────────────────────────────────

/// Map a simulation-space point (origin top-left, y down) to render space
/// (origin centered, y up).
pub fn render_pos(viewport: &Viewport, pos: Vec2) -> Vec2 {
    Vec2::new(
        pos.x - viewport.width / 2.0,
        viewport.height / 2.0 - pos.y,
    )
}

fn circle_transform(viewport: &Viewport, pos: Vec2, radius: f32, z: f32) -> Transform {
    Transform::from_translation(render_pos(viewport, pos).extend(z))
        .with_scale(Vec3::splat(radius))
}

/// Build a filled unit circle approximated by an `n`-sided regular polygon.
///
/// Triangle fan from the centre: `(0, i, i+1 mod n)`. Entities scale it by
/// their radius through the transform, so one mesh serves the whole field.
fn unit_circle_mesh(sides: u32) -> Mesh {
    let n = sides as usize;
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(n + 1);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(n + 1);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(n + 1);

    positions.push([0.0, 0.0, 0.0]);
    normals.push([0.0, 0.0, 1.0]);
    uvs.push([0.5, 0.5]);

    for i in 0..n {
        let angle = std::f32::consts::TAU * i as f32 / n as f32;
        let (x, y) = (angle.cos(), angle.sin());
        positions.push([x, y, 0.0]);
        normals.push([0.0, 0.0, 1.0]);
        uvs.push([x / 2.0 + 0.5, y / 2.0 + 0.5]);
    }

    let mut indices: Vec<u32> = Vec::with_capacity(n * 3);
    for i in 0..n as u32 {
        let v1 = i + 1;
        let v2 = (i + 1) % n as u32 + 1;
        indices.extend_from_slice(&[0, v1, v2]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}
