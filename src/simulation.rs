//! Core loop wiring: the fixed-tick gameplay schedule and session lifecycle.
//!
//! ## Tick anatomy
//!
//! All gameplay mutation happens in `FixedUpdate` at 60 Hz, as one `chain()`ed
//! pipeline gated by a per-tick latch:
//!
//! 1. `begin_tick_system` latches whether this tick is live and counts it.
//! 2. Player motion toward the pointer target.
//! 3. Spawn timer, enemy pursuit, player collision, off-screen culling.
//! 4. Enemy pair sweep (mutual annihilation).
//! 5. Particle decay.
//! 6. Passive score and difficulty recompute.
//!
//! The latch reproduces end-of-run semantics exactly: the tick on which the
//! player dies still runs to completion (the death explosion advances once,
//! the final passive point is paid), and the world is frozen from the top of
//! the next tick. Gating each system on `in_state` alone would not survive a
//! frame that catches up with several fixed ticks back to back.
//!
//! Input sampling and window bookkeeping stay in `PreUpdate`; they never
//! mutate simulation state mid-tick.

use bevy::prelude::*;

use crate::config::GameConfig;
use crate::constants::TICK_HZ;
use crate::enemy::{
    enemy_offscreen_system, enemy_pair_sweep_system, enemy_player_collision_system,
    enemy_pursuit_system, enemy_spawn_system, Enemy,
};
use crate::particles::{particle_decay_system, Particle};
use crate::player::{player_motion_system, pointer_target_system, spawn_player, Player};
use crate::state::{
    begin_tick_system, difficulty_system, passive_score_system, restart_key_system, tick_active,
    GameRun, GameState,
};
use crate::viewport::{viewport_sync_system, Viewport};

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<GameConfig>()
            .init_resource::<Viewport>()
            .init_resource::<GameRun>()
            .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            .add_systems(
                PreUpdate,
                (viewport_sync_system, pointer_target_system).chain(),
            )
            .add_systems(
                FixedUpdate,
                (
                    begin_tick_system,
                    (
                        player_motion_system,
                        enemy_spawn_system,
                        enemy_pursuit_system,
                        enemy_player_collision_system,
                        enemy_offscreen_system,
                        enemy_pair_sweep_system,
                        particle_decay_system,
                        passive_score_system,
                        difficulty_system,
                    )
                        .chain()
                        .run_if(tick_active),
                )
                    .chain(),
            )
            .add_systems(
                Update,
                restart_key_system.run_if(in_state(GameState::GameOver)),
            )
            .add_systems(OnEnter(GameState::Playing), setup_session);
    }
}

/// Session bootstrap, run on entering `Playing` both at startup and on every
/// restart: clear any leftover run entities, reset the run state, and spawn a
/// fresh player at the viewport center.
fn setup_session(
    mut commands: Commands,
    config: Res<GameConfig>,
    viewport: Res<Viewport>,
    mut run: ResMut<GameRun>,
    leftovers: Query<Entity, Or<(With<Player>, With<Enemy>, With<Particle>)>>,
) {
    for entity in leftovers.iter() {
        commands.entity(entity).despawn();
    }
    *run = GameRun::new(&config);
    spawn_player(&mut commands, &viewport, &config);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::input::ButtonInput;
    use bevy::state::app::StatesPlugin;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    /// Time is pinned so no fixed tick fires; these tests cover the schedule
    /// plumbing around the tick loop, not the loop itself.
    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.init_resource::<ButtonInput<KeyCode>>();
        app.add_plugins(SimulationPlugin);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
        app
    }

    #[test]
    fn startup_enters_playing_with_a_fresh_session() {
        let mut app = test_app();

        app.update();

        let world = app.world_mut();
        let player = world.query::<&Player>().single(world).unwrap();
        assert_eq!(player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(player.radius, 30.0);

        let run = app.world().resource::<GameRun>();
        assert!(run.running);
        assert_eq!(run.score, 0);
        assert_eq!(run.difficulty, 1);
    }

    #[test]
    fn restart_clears_the_battlefield_and_resets_the_run() {
        let mut app = test_app();
        app.update();

        // Fake a finished run with leftovers on the field.
        app.world_mut().spawn(Enemy {
            pos: Vec2::new(100.0, 100.0),
            radius: 20.0,
            speed: 2.0,
            velocity: Vec2::ZERO,
            color: Color::srgb_u8(255, 0, 0),
        });
        app.world_mut().spawn(Particle {
            pos: Vec2::new(200.0, 200.0),
            velocity: Vec2::ZERO,
            radius: 2.0,
            color: Color::srgb_u8(255, 0, 0),
            alpha: 0.5,
        });
        {
            let mut run = app.world_mut().resource_mut::<GameRun>();
            run.score = 1234;
            run.end();
        }
        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::GameOver);
        app.update();

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyR);
        app.update(); // restart key observed, Playing requested
        app.update(); // transition applies, session rebuilt

        let world = app.world_mut();
        assert_eq!(world.query::<&Enemy>().iter(world).count(), 0);
        assert_eq!(world.query::<&Particle>().iter(world).count(), 0);
        let player = world.query::<&Player>().single(world).unwrap();
        assert_eq!(player.pos, Vec2::new(400.0, 300.0));

        let run = app.world().resource::<GameRun>();
        assert!(run.running);
        assert_eq!(run.score, 0);
        assert_eq!(run.end_tick, None);
    }
}
