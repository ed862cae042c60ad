//! Runtime gameplay configuration loaded from `assets/config.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors the gameplay constants
//! in [`crate::constants`]. At startup, [`load_game_config`] reads
//! `assets/config.toml` and overwrites the defaults with any values present
//! in the file. Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the values you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<GameConfig>` to any system parameter list and read values
//! with `config.player_step`, `config.spawn_interval_min`, etc.
//!
//! ## Tuning workflow
//!
//! 1. Edit `assets/config.toml`.
//! 2. Restart the game; no recompilation required.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{
    validate_fade_rate, validate_positive, validate_radius_fraction, validate_spawn_interval,
    ConfigResult,
};
use bevy::prelude::*;
use serde::Deserialize;

/// Path probed for overrides at startup.
pub const CONFIG_PATH: &str = "assets/config.toml";

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`. Override any subset by setting the value in
/// `assets/config.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Player ───────────────────────────────────────────────────────────────
    pub player_radius_fraction: f32,
    pub player_step: f32,
    pub player_arrive_epsilon: f32,

    // ── Enemies ──────────────────────────────────────────────────────────────
    pub enemy_edge_offset: f32,
    pub enemy_radius_min: f32,
    pub enemy_radius_max: f32,
    pub enemy_base_speed_min: f32,
    pub enemy_base_speed_spread: f32,
    pub enemy_speed_per_difficulty: f32,
    pub offscreen_margin: f32,

    // ── Spawning ─────────────────────────────────────────────────────────────
    pub spawn_interval_initial: u32,
    pub spawn_interval_min: u32,
    pub spawn_interval_per_difficulty: u32,

    // ── Scoring ──────────────────────────────────────────────────────────────
    pub score_per_tick: u32,
    pub offscreen_bonus: u32,
    pub collision_bonus: u32,
    pub difficulty_score_step: u32,

    // ── Particles ────────────────────────────────────────────────────────────
    pub explosion_particle_count: u32,
    pub particle_fade_per_tick: f32,
    pub particle_spread: f32,
    pub particle_radius_min: f32,
    pub particle_radius_spread: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Player
            player_radius_fraction: PLAYER_RADIUS_FRACTION,
            player_step: PLAYER_STEP,
            player_arrive_epsilon: PLAYER_ARRIVE_EPSILON,
            // Enemies
            enemy_edge_offset: ENEMY_EDGE_OFFSET,
            enemy_radius_min: ENEMY_RADIUS_MIN,
            enemy_radius_max: ENEMY_RADIUS_MAX,
            enemy_base_speed_min: ENEMY_BASE_SPEED_MIN,
            enemy_base_speed_spread: ENEMY_BASE_SPEED_SPREAD,
            enemy_speed_per_difficulty: ENEMY_SPEED_PER_DIFFICULTY,
            offscreen_margin: OFFSCREEN_MARGIN,
            // Spawning
            spawn_interval_initial: SPAWN_INTERVAL_INITIAL,
            spawn_interval_min: SPAWN_INTERVAL_MIN,
            spawn_interval_per_difficulty: SPAWN_INTERVAL_PER_DIFFICULTY,
            // Scoring
            score_per_tick: SCORE_PER_TICK,
            offscreen_bonus: OFFSCREEN_BONUS,
            collision_bonus: COLLISION_BONUS,
            difficulty_score_step: DIFFICULTY_SCORE_STEP,
            // Particles
            explosion_particle_count: EXPLOSION_PARTICLE_COUNT,
            particle_fade_per_tick: PARTICLE_FADE_PER_TICK,
            particle_spread: PARTICLE_SPREAD,
            particle_radius_min: PARTICLE_RADIUS_MIN,
            particle_radius_spread: PARTICLE_RADIUS_SPREAD,
        }
    }
}

impl GameConfig {
    /// Reject values that would break core invariants (zero spawn interval,
    /// degenerate player, immortal particles) rather than letting them warp
    /// the simulation at a distance.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_radius_fraction(self.player_radius_fraction)?;
        validate_positive("player_step", self.player_step)?;
        validate_positive("enemy_radius_min", self.enemy_radius_min)?;
        validate_positive(
            "enemy_radius_max",
            self.enemy_radius_max - self.enemy_radius_min,
        )?;
        validate_spawn_interval(self.spawn_interval_min, self.spawn_interval_initial)?;
        validate_fade_rate(self.particle_fade_per_tick)?;
        Ok(())
    }
}

/// Read and validate a config file.
fn read_config(path: &str) -> ConfigResult<GameConfig> {
    let contents = std::fs::read_to_string(path).map_err(crate::error::ConfigError::Read)?;
    let config: GameConfig =
        toml::from_str(&contents).map_err(crate::error::ConfigError::Parse)?;
    config.validate()?;
    Ok(config)
}

/// Startup system: attempt to load `assets/config.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults. A missing file is silently
/// ignored (defaults are already in place from `init_resource`); an invalid
/// file is reported and the defaults kept, so a typo in the TOML never takes
/// the game down.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    if !std::path::Path::new(CONFIG_PATH).exists() {
        println!("ℹ No {CONFIG_PATH} found; using compiled defaults");
        return;
    }
    match read_config(CONFIG_PATH) {
        Ok(loaded) => {
            *config = loaded;
            println!("✓ Loaded game config from {CONFIG_PATH}");
        }
        Err(e) => {
            eprintln!("⚠ Ignoring {CONFIG_PATH}: {e}; using defaults");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
