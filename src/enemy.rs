//! Enemies: edge spawning, homing pursuit, culling, and both collision sweeps.
//!
//! ## Pursuit model
//!
//! An enemy carries a fixed scalar speed and a velocity vector that is
//! re-aimed at the player every tick. The ordering is move-then-retarget:
//! position integrates with the velocity computed on the *previous* tick,
//! then the aim is refreshed from the new position. The resulting one-tick
//! homing lag is intentional gameplay behavior; fast enemies overshoot a
//! sidestepping player instead of pivoting instantly.
//!
//! ## Removal discipline
//!
//! Both sweeps decide against a stable snapshot and despawn through
//! `Commands`, so nothing mutates a collection mid-iteration. The pair sweep
//! additionally keeps liveness flags over its snapshot: once an enemy is
//! claimed by a collision it can never be matched again in the same pass.

use crate::color::{hsl_to_rgb, player_blue};
use crate::config::GameConfig;
use crate::constants::{ENEMY_HUE_MAX, ENEMY_LIGHTNESS, ENEMY_SATURATION};
use crate::geometry::{overlaps, Circle};
use crate::particles::spawn_explosion;
use crate::player::Player;
use crate::state::{GameRun, GameState};
use crate::viewport::Viewport;
use bevy::prelude::*;
use rand::Rng;

/// A pursuing circle. Speed is fixed at spawn; the velocity direction is
/// re-aimed at the player every tick.
#[derive(Component, Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub velocity: Vec2,
    pub color: Color,
}

impl Enemy {
    /// The enemy's collision shape.
    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    /// One pursuit tick: integrate with the stale velocity, then re-aim.
    pub fn advance(&mut self, player_pos: Vec2) {
        self.pos += self.velocity;
        self.retarget(player_pos);
    }

    /// Point the velocity at the player, keeping the fixed speed.
    ///
    /// atan2 rather than normalize: a degenerate zero offset aims along +x
    /// instead of producing NaN.
    fn retarget(&mut self, player_pos: Vec2) {
        let angle = (player_pos.y - self.pos.y).atan2(player_pos.x - self.pos.x);
        self.velocity = Vec2::new(angle.cos(), angle.sin()) * self.speed;
    }
}

/// Roll a fresh enemy on a uniformly chosen viewport edge.
///
/// The spawn point sits exactly `enemy_edge_offset` outside the chosen edge,
/// at a uniform position along it (inclusive of both corners). Speed grows
/// with the difficulty in force at spawn time and never changes afterward.
/// The tint is a warm hue at full saturation and mid lightness.
pub fn edge_spawn(
    rng: &mut impl Rng,
    viewport: &Viewport,
    player_pos: Vec2,
    difficulty: u32,
    config: &GameConfig,
) -> Enemy {
    let offset = config.enemy_edge_offset;
    let pos = match rng.gen_range(0..4) {
        // top
        0 => Vec2::new(rng.gen_range(0.0..=viewport.width), -offset),
        // right
        1 => Vec2::new(viewport.width + offset, rng.gen_range(0.0..=viewport.height)),
        // bottom
        2 => Vec2::new(rng.gen_range(0.0..=viewport.width), viewport.height + offset),
        // left
        _ => Vec2::new(-offset, rng.gen_range(0.0..=viewport.height)),
    };

    let radius = rng.gen_range(config.enemy_radius_min..=config.enemy_radius_max);
    let speed = config.enemy_base_speed_min
        + rng.gen::<f32>() * config.enemy_base_speed_spread
        + difficulty as f32 * config.enemy_speed_per_difficulty;

    let (r, g, b) = hsl_to_rgb(
        rng.gen_range(0.0..=ENEMY_HUE_MAX),
        ENEMY_SATURATION,
        ENEMY_LIGHTNESS,
    );

    let mut enemy = Enemy {
        pos,
        radius,
        speed,
        velocity: Vec2::ZERO,
        color: Color::srgb_u8(r, g, b),
    };
    enemy.retarget(player_pos);
    enemy
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Fixed-tick step 2: advance the spawn timer and fire a spawn when it
/// reaches the interval.
///
/// The interval is recomputed only inside the trigger branch, so a mid-cycle
/// difficulty rise takes effect at the next spawn, not retroactively.
pub fn enemy_spawn_system(
    mut commands: Commands,
    mut run: ResMut<GameRun>,
    viewport: Res<Viewport>,
    config: Res<GameConfig>,
    players: Query<&Player>,
) {
    run.spawn_timer += 1;
    if run.spawn_timer < run.spawn_interval {
        return;
    }
    let Ok(player) = players.single() else {
        return;
    };

    let mut rng = rand::thread_rng();
    commands.spawn(edge_spawn(
        &mut rng,
        &viewport,
        player.pos,
        run.difficulty,
        &config,
    ));

    run.spawn_timer = 0;
    run.spawn_interval = config
        .spawn_interval_initial
        .saturating_sub(run.difficulty * config.spawn_interval_per_difficulty)
        .max(config.spawn_interval_min);
}

/// Fixed-tick step 3a: every enemy moves with its stale velocity, then
/// re-aims at the player's current position.
pub fn enemy_pursuit_system(players: Query<&Player>, mut enemies: Query<&mut Enemy>) {
    let Ok(player) = players.single() else {
        return;
    };
    for mut enemy in enemies.iter_mut() {
        enemy.advance(player.pos);
    }
}

/// Fixed-tick step 3b: the run ends the moment any enemy overlaps the player.
///
/// Ends the run (recording the end tick exactly once), bursts an explosion in
/// the player's color at the player's position, and requests the `GameOver`
/// state for the UI. The rest of the current tick still runs; the tick latch
/// freezes the world from the next tick.
pub fn enemy_player_collision_system(
    mut commands: Commands,
    mut run: ResMut<GameRun>,
    mut next_state: ResMut<NextState<GameState>>,
    config: Res<GameConfig>,
    players: Query<&Player>,
    enemies: Query<&Enemy>,
) {
    let Ok(player) = players.single() else {
        return;
    };
    for enemy in enemies.iter() {
        if overlaps(player.circle(), enemy.circle()) {
            run.end();
            let mut rng = rand::thread_rng();
            spawn_explosion(&mut commands, &mut rng, player.pos, player_blue(), &config);
            next_state.set(GameState::GameOver);
            break;
        }
    }
}

/// Fixed-tick step 3c: cull enemies that escaped past the off-screen margin
/// and pay the dodge bonus for each.
pub fn enemy_offscreen_system(
    mut commands: Commands,
    mut run: ResMut<GameRun>,
    viewport: Res<Viewport>,
    config: Res<GameConfig>,
    enemies: Query<(Entity, &Enemy)>,
) {
    for (entity, enemy) in enemies.iter() {
        if viewport.outside_by(enemy.pos, config.offscreen_margin) {
            commands.entity(entity).despawn();
            run.score += config.offscreen_bonus;
        }
    }
}

/// Fixed-tick step 4: enemy-vs-enemy annihilation sweep.
///
/// Scans all unordered pairs over a snapshot sorted by entity id (spawn
/// order), so the scan order is deterministic for a given world state. The
/// first colliding partner claims the outer enemy: both are flagged dead,
/// each bursts in its own color, the bonus is paid once, and the outer index
/// moves on. Dead entries are skipped on both sides of the pair for the rest
/// of the pass.
pub fn enemy_pair_sweep_system(
    mut commands: Commands,
    mut run: ResMut<GameRun>,
    config: Res<GameConfig>,
    enemies: Query<(Entity, &Enemy)>,
) {
    let mut snapshot: Vec<(Entity, Vec2, f32, Color)> = enemies
        .iter()
        .map(|(entity, enemy)| (entity, enemy.pos, enemy.radius, enemy.color))
        .collect();
    snapshot.sort_by_key(|&(entity, ..)| entity);

    let mut alive = vec![true; snapshot.len()];
    let mut rng = rand::thread_rng();

    for i in 0..snapshot.len() {
        if !alive[i] {
            continue;
        }
        for j in (i + 1)..snapshot.len() {
            if !alive[j] {
                continue;
            }
            let (entity_i, pos_i, radius_i, color_i) = snapshot[i];
            let (entity_j, pos_j, radius_j, color_j) = snapshot[j];
            if overlaps(Circle::new(pos_i, radius_i), Circle::new(pos_j, radius_j)) {
                alive[i] = false;
                alive[j] = false;
                spawn_explosion(&mut commands, &mut rng, pos_i, color_i, &config);
                spawn_explosion(&mut commands, &mut rng, pos_j, color_j, &config);
                commands.entity(entity_i).despawn();
                commands.entity(entity_j).despawn();
                run.score += config.collision_bonus;
                break;
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
