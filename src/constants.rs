//! Authoritative tuning values for the simulation.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! The gameplay subset is mirrored by [`GameConfig`](crate::config::GameConfig),
//! which systems read at runtime and which `assets/config.toml` may override
//! at startup. Change a default here and the config mirror picks it up.

// ── Tick cadence ──────────────────────────────────────────────────────────────

/// Simulation tick rate in Hz. All per-tick quantities below (step lengths,
/// fade rates, spawn intervals) are expressed against this cadence.
pub const TICK_HZ: f64 = 60.0;

/// Integer twin of [`TICK_HZ`] for survival-time arithmetic.
pub const TICKS_PER_SECOND: u64 = 60;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Initial window width in logical pixels. The window is resizable; live
/// dimensions come from the [`Viewport`](crate::viewport::Viewport) resource.
pub const VIEW_WIDTH: f32 = 800.0;

/// Initial window height in logical pixels.
pub const VIEW_HEIGHT: f32 = 600.0;

// ── Player ────────────────────────────────────────────────────────────────────

/// Player radius as a fraction of the smaller viewport dimension.
///
/// Recomputed on every resize. 0.05 gives a 30 px circle at 800×600.
/// Increase for a clumsier, harder game; decrease below 0.03 and enemies
/// become nearly impossible to collide with.
pub const PLAYER_RADIUS_FRACTION: f32 = 0.05;

/// Distance moved toward the pointer target per tick, in pixels.
pub const PLAYER_STEP: f32 = 5.0;

/// Below this distance to the target the player does not move at all.
/// Prevents oscillation jitter when the pointer rests on the player.
pub const PLAYER_ARRIVE_EPSILON: f32 = 1.0;

// ── Enemies ───────────────────────────────────────────────────────────────────

/// How far outside the viewport edge an enemy materializes, in pixels.
pub const ENEMY_EDGE_OFFSET: f32 = 20.0;

/// Enemy radius range, sampled uniformly at spawn.
pub const ENEMY_RADIUS_MIN: f32 = 15.0;
pub const ENEMY_RADIUS_MAX: f32 = 35.0;

/// Enemy speed is `base_min + random × spread + difficulty × per_difficulty`,
/// fixed for the enemy's lifetime. At difficulty 1 that is 1.3–3.3 px/tick;
/// past difficulty 10 fresh enemies outrun the player's 5 px/tick step.
pub const ENEMY_BASE_SPEED_MIN: f32 = 1.0;
pub const ENEMY_BASE_SPEED_SPREAD: f32 = 2.0;
pub const ENEMY_SPEED_PER_DIFFICULTY: f32 = 0.3;

/// Enemy hue is sampled uniformly from [0, `ENEMY_HUE_MAX`] degrees, the
/// red-to-yellow band. Saturation and lightness are fixed.
pub const ENEMY_HUE_MAX: f32 = 60.0;
pub const ENEMY_SATURATION: f32 = 100.0;
pub const ENEMY_LIGHTNESS: f32 = 50.0;

/// An enemy strictly further than this outside any viewport edge is culled
/// and the dodge bonus awarded.
pub const OFFSCREEN_MARGIN: f32 = 50.0;

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Starting value of the spawn interval, in ticks. The live interval is
/// `max(SPAWN_INTERVAL_MIN, SPAWN_INTERVAL_INITIAL − difficulty × 10)`,
/// recomputed each time a spawn fires, so it only tightens on spawn
/// boundaries.
pub const SPAWN_INTERVAL_INITIAL: u32 = 120;

/// Hard floor of the spawn interval: two spawns per second at 60 Hz.
pub const SPAWN_INTERVAL_MIN: u32 = 30;

/// Ticks shaved off the spawn interval per difficulty level.
pub const SPAWN_INTERVAL_PER_DIFFICULTY: u32 = 10;

// ── Scoring ───────────────────────────────────────────────────────────────────

/// Passive score awarded every simulation tick while the run is live.
pub const SCORE_PER_TICK: u32 = 1;

/// Bonus when an enemy exits the viewport past [`OFFSCREEN_MARGIN`].
pub const OFFSCREEN_BONUS: u32 = 10;

/// Bonus when two enemies collide and annihilate each other.
pub const COLLISION_BONUS: u32 = 20;

/// Score points per difficulty level: `difficulty = score / step + 1`.
/// One level roughly every 8 seconds of pure survival.
pub const DIFFICULTY_SCORE_STEP: u32 = 500;

// ── Particles ─────────────────────────────────────────────────────────────────

/// Particles spawned per explosion burst.
pub const EXPLOSION_PARTICLE_COUNT: u32 = 20;

/// Linear opacity loss per tick; 0.02 gives a 50-tick burst lifetime.
pub const PARTICLE_FADE_PER_TICK: f32 = 0.02;

/// Particle velocity per axis is `(random − 0.5) × spread` px/tick.
pub const PARTICLE_SPREAD: f32 = 8.0;

/// Particle radius is `min + random × spread` pixels.
pub const PARTICLE_RADIUS_MIN: f32 = 1.0;
pub const PARTICLE_RADIUS_SPREAD: f32 = 3.0;
