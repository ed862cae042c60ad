//! The game state machine: run phase, score, difficulty, and timers.
//!
//! Two layers share the job. The [`GameState`] Bevy state drives UI
//! lifecycle (HUD on `Playing`, end screen on `GameOver`) and session
//! setup/teardown via `OnEnter`/`OnExit`. The [`GameRun`] resource is the
//! authoritative per-run record: its `running` flag is what gameplay systems
//! actually obey, latched once at the top of every tick by
//! [`begin_tick_system`] so that the tick in which the player dies still
//! completes all its remaining steps before the freeze takes hold.

use crate::config::GameConfig;
use crate::constants::{SPAWN_INTERVAL_INITIAL, TICKS_PER_SECOND};
use bevy::prelude::*;

/// Top-level application state machine.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Live gameplay; the simulation ticks.
    #[default]
    Playing,
    /// The player has been hit; the world is frozen behind the end screen
    /// until a restart.
    GameOver,
}

/// Authoritative record of the current run.
///
/// Recreated whole on every (re)start. Read by the renderer for the HUD and
/// end screen; mutated only by the fixed-update simulation chain.
#[derive(Resource, Debug, Clone)]
pub struct GameRun {
    /// False from the moment the player is hit. Checked via the latch below,
    /// not directly, so the death tick finishes cleanly.
    pub running: bool,
    /// Value of `running` latched at the top of the current tick.
    pub tick_active: bool,
    /// Ticks elapsed since the run started. Monotonic; survival time is
    /// derived from this, never from wall clocks.
    pub tick: u64,
    pub score: u32,
    /// Derived from score; starts at 1, never decreases within a run.
    pub difficulty: u32,
    /// Ticks since the last enemy spawn.
    pub spawn_timer: u32,
    /// Current ticks-between-spawns; tightens as difficulty rises.
    pub spawn_interval: u32,
    /// Tick at which the run ended. Set exactly once, never overwritten.
    pub end_tick: Option<u64>,
}

impl Default for GameRun {
    fn default() -> Self {
        Self {
            running: true,
            tick_active: false,
            tick: 0,
            score: 0,
            difficulty: 1,
            spawn_timer: 0,
            spawn_interval: SPAWN_INTERVAL_INITIAL,
            end_tick: None,
        }
    }
}

impl GameRun {
    /// A fresh run using the live config's starting interval.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            spawn_interval: config.spawn_interval_initial,
            ..Self::default()
        }
    }

    /// Flip to the ended state, recording the end tick. Idempotent: only the
    /// first call on a running instance takes effect, so the end tick can
    /// never be overwritten.
    pub fn end(&mut self) {
        if self.running {
            self.running = false;
            self.end_tick = Some(self.tick);
        }
    }

    /// Whole seconds survived, derived from the tick counter.
    pub fn survival_seconds(&self) -> u64 {
        self.end_tick.unwrap_or(self.tick) / TICKS_PER_SECOND
    }
}

/// Difficulty as a step function of score: one level per full score step,
/// starting at 1. Never decreases within a run because score never does.
pub fn difficulty_for_score(score: u32, score_step: u32) -> u32 {
    score / score_step + 1
}

/// Rank label for a final score. Thresholds are part of the game's identity
/// and are not config-tunable.
pub fn rank_label(score: u32) -> &'static str {
    if score < 500 {
        "Newbie Warrior"
    } else if score < 1000 {
        "Dodge Apprentice"
    } else if score < 2000 {
        "Movement Master"
    } else if score < 5000 {
        "Extreme Survivor"
    } else {
        "Legendary Dodger"
    }
}

// ── Tick gating ───────────────────────────────────────────────────────────────

/// First system of every fixed tick: latch the running flag and advance the
/// tick counter.
///
/// Gameplay systems run against the latched value, so a mid-tick `end()`
/// (player hit during the enemy pass) does not cut the tick short, exactly
/// like a flag that is only consulted at the top of the loop. The next tick
/// latches false and the world freezes.
pub fn begin_tick_system(mut run: ResMut<GameRun>) {
    run.tick_active = run.running;
    if run.tick_active {
        run.tick += 1;
    }
}

/// Run condition for every gameplay system in the fixed-update chain.
pub fn tick_active(run: Res<GameRun>) -> bool {
    run.tick_active
}

// ── Scoring systems ───────────────────────────────────────────────────────────

/// Per-tick survival score. Runs after the collision sweeps so bonuses land
/// first, matching the scoring order of the tick contract.
pub fn passive_score_system(config: Res<GameConfig>, mut run: ResMut<GameRun>) {
    run.score += config.score_per_tick;
}

/// Recompute difficulty from the (possibly just-raised) score. Last step of
/// the tick; the new level applies to next tick's spawns.
pub fn difficulty_system(config: Res<GameConfig>, mut run: ResMut<GameRun>) {
    run.difficulty = difficulty_for_score(run.score, config.difficulty_score_step);
}

/// Restart request: `R` on the end screen tears the run down and rebuilds it
/// via the `OnEnter(Playing)` session setup.
pub fn restart_key_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        next_state.set(GameState::Playing);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_run_state() {
        let run = GameRun::new(&GameConfig::default());
        assert!(run.running);
        assert_eq!(run.score, 0);
        assert_eq!(run.difficulty, 1);
        assert_eq!(run.tick, 0);
        assert_eq!(run.spawn_timer, 0);
        assert_eq!(run.spawn_interval, SPAWN_INTERVAL_INITIAL);
        assert_eq!(run.end_tick, None);
    }

    /// The end tick is set exactly once; a second `end()` must not move it.
    #[test]
    fn end_is_idempotent() {
        let mut run = GameRun::new(&GameConfig::default());
        run.tick = 120;
        run.end();
        assert!(!run.running);
        assert_eq!(run.end_tick, Some(120));

        run.tick = 500;
        run.end();
        assert_eq!(run.end_tick, Some(120), "end tick must never be overwritten");
    }

    #[test]
    fn survival_seconds_floors_whole_seconds() {
        let mut run = GameRun::new(&GameConfig::default());
        run.tick = 130;
        run.end();
        assert_eq!(run.survival_seconds(), 2, "130 ticks is 2 whole seconds");

        let mut short = GameRun::new(&GameConfig::default());
        short.tick = 59;
        short.end();
        assert_eq!(short.survival_seconds(), 0);
    }

    #[test]
    fn difficulty_steps_every_five_hundred_points() {
        assert_eq!(difficulty_for_score(0, 500), 1);
        assert_eq!(difficulty_for_score(499, 500), 1);
        assert_eq!(difficulty_for_score(500, 500), 2);
        assert_eq!(difficulty_for_score(999, 500), 2);
        assert_eq!(difficulty_for_score(1000, 500), 3);
        assert_eq!(difficulty_for_score(5000, 500), 11);
    }

    #[test]
    fn rank_ladder_thresholds() {
        assert_eq!(rank_label(0), "Newbie Warrior");
        assert_eq!(rank_label(499), "Newbie Warrior");
        assert_eq!(rank_label(500), "Dodge Apprentice");
        assert_eq!(rank_label(999), "Dodge Apprentice");
        assert_eq!(rank_label(1000), "Movement Master");
        assert_eq!(rank_label(1999), "Movement Master");
        assert_eq!(rank_label(2000), "Extreme Survivor");
        assert_eq!(rank_label(4999), "Extreme Survivor");
        assert_eq!(rank_label(5000), "Legendary Dodger");
    }

    /// The latch preserves the in-flight tick: ending the run mid-tick does
    /// not clear `tick_active`, the next latch does.
    #[test]
    fn latch_freezes_only_from_the_next_tick() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameRun::new(&GameConfig::default()));
        app.add_systems(Update, begin_tick_system);

        app.update();
        {
            let run = app.world().resource::<GameRun>();
            assert!(run.tick_active);
            assert_eq!(run.tick, 1);
        }

        // Mid-tick death: the latch keeps the current tick live.
        app.world_mut().resource_mut::<GameRun>().end();
        assert!(app.world().resource::<GameRun>().tick_active);

        app.update();
        let run = app.world().resource::<GameRun>();
        assert!(!run.tick_active, "next tick is frozen");
        assert_eq!(run.tick, 1, "tick counter stops with the run");
    }
}
