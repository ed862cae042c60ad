//! The player: a pointer-chasing circle pinned inside the viewport.
//!
//! The player never receives velocity; each tick it takes one fixed-length
//! step toward wherever the pointer last was, then gets clamped back inside
//! the viewport inset by its radius. The pointer is sampled per frame in
//! `PreUpdate` (before any fixed ticks run), and only while the run is live,
//! so on the end screen the corpse stays put even if the pointer moves.

use crate::config::GameConfig;
use crate::geometry::Circle;
use crate::state::GameRun;
use crate::viewport::Viewport;
use bevy::prelude::*;

/// The controlled entity. Exactly one exists while a session is live.
///
/// `pos` and `target` are in simulation space (top-left origin, y down),
/// which is also pointer space, so cursor input needs no conversion.
#[derive(Component, Debug)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub target: Vec2,
}

impl Player {
    /// A fresh player at the viewport center with a resting target and a
    /// radius derived from the smaller viewport dimension.
    pub fn at_center(viewport: &Viewport, config: &GameConfig) -> Self {
        let center = viewport.center();
        Self {
            pos: center,
            radius: viewport.min_dimension() * config.player_radius_fraction,
            target: center,
        }
    }

    /// The player's collision shape.
    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    /// One movement tick: step toward the target, then clamp into bounds.
    ///
    /// The step is always the full `player_step` along the target direction
    /// (deliberately overshooting near the target; the arrive epsilon only
    /// suppresses sub-pixel jitter when the pointer rests on the player).
    /// Clamping is min-then-max per axis so a viewport narrower than the
    /// player's diameter degrades to the low bound instead of panicking.
    pub fn advance(&mut self, viewport: &Viewport, config: &GameConfig) {
        let delta = self.target - self.pos;
        let distance = delta.length();
        if distance > config.player_arrive_epsilon {
            self.pos += delta / distance * config.player_step;
        }

        self.pos.x = self.pos.x.min(viewport.width - self.radius).max(self.radius);
        self.pos.y = self
            .pos
            .y
            .min(viewport.height - self.radius)
            .max(self.radius);
    }

    /// Resize rule: recompute the radius from the new dimensions and snap
    /// player and target back to the center.
    pub fn recenter(&mut self, viewport: &Viewport, config: &GameConfig) {
        self.radius = viewport.min_dimension() * config.player_radius_fraction;
        self.pos = viewport.center();
        self.target = self.pos;
    }
}

/// Spawn the session's player entity.
pub fn spawn_player(commands: &mut Commands, viewport: &Viewport, config: &GameConfig) {
    commands.spawn(Player::at_center(viewport, config));
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Sample the pointer into the player's target, only while the run is live.
///
/// Cursor coordinates are already simulation-space (logical pixels from the
/// window's top-left, y down). When the cursor is outside the window there
/// is no position and the target simply keeps its last value.
pub fn pointer_target_system(
    windows: Query<&Window>,
    run: Res<GameRun>,
    mut players: Query<&mut Player>,
) {
    if !run.running {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok(mut player) = players.single_mut() else {
        return;
    };
    player.target = cursor;
}

/// Fixed-tick step 1: player motion.
pub fn player_motion_system(
    viewport: Res<Viewport>,
    config: Res<GameConfig>,
    mut players: Query<&mut Player>,
) {
    let Ok(mut player) = players.single_mut() else {
        return;
    };
    player.advance(&viewport, &config);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn spawns_centered_with_derived_radius() {
        let player = Player::at_center(&test_viewport(), &GameConfig::default());
        assert_eq!(player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(player.target, player.pos);
        assert_eq!(player.radius, 30.0, "5% of the 600 px height");
    }

    #[test]
    fn steps_full_length_toward_target() {
        let viewport = test_viewport();
        let config = GameConfig::default();
        let mut player = Player::at_center(&viewport, &config);
        player.target = Vec2::new(500.0, 300.0);

        player.advance(&viewport, &config);
        assert_eq!(player.pos, Vec2::new(405.0, 300.0), "one 5 px step east");

        player.advance(&viewport, &config);
        assert_eq!(player.pos, Vec2::new(410.0, 300.0));
    }

    /// Within the arrive epsilon the player must not move at all.
    #[test]
    fn holds_still_inside_arrive_epsilon() {
        let viewport = test_viewport();
        let config = GameConfig::default();
        let mut player = Player::at_center(&viewport, &config);
        player.target = player.pos + Vec2::new(0.5, 0.5);

        player.advance(&viewport, &config);
        assert_eq!(player.pos, Vec2::new(400.0, 300.0), "sub-epsilon: no jitter");
    }

    /// Between epsilon and step length the player overshoots; that is the
    /// specified behavior, not a bug.
    #[test]
    fn overshoots_close_targets() {
        let viewport = test_viewport();
        let config = GameConfig::default();
        let mut player = Player::at_center(&viewport, &config);
        player.target = player.pos + Vec2::new(2.0, 0.0);

        player.advance(&viewport, &config);
        assert_eq!(player.pos, Vec2::new(405.0, 300.0), "full step past target");
    }

    #[test]
    fn clamps_to_viewport_inset_by_radius() {
        let viewport = test_viewport();
        let config = GameConfig::default();
        let mut player = Player::at_center(&viewport, &config);
        player.pos = Vec2::new(31.0, 31.0);
        player.target = Vec2::new(-500.0, -500.0);

        for _ in 0..20 {
            player.advance(&viewport, &config);
        }
        assert_eq!(player.pos, Vec2::new(30.0, 30.0), "pinned at the inset corner");
    }

    /// A viewport smaller than the player diameter must degrade to the low
    /// bound, not panic.
    #[test]
    fn degenerate_viewport_does_not_panic() {
        let viewport = Viewport::new(40.0, 40.0);
        let config = GameConfig::default();
        let mut player = Player::at_center(&test_viewport(), &config);
        player.radius = 30.0; // diameter 60 > viewport 40
        player.target = Vec2::new(1000.0, 1000.0);

        player.advance(&viewport, &config);
        assert_eq!(player.pos, Vec2::new(30.0, 30.0));
    }

    #[test]
    fn recenter_applies_resize_rules() {
        let config = GameConfig::default();
        let mut player = Player::at_center(&test_viewport(), &config);
        player.pos = Vec2::new(100.0, 100.0);
        player.target = Vec2::new(50.0, 50.0);

        let resized = Viewport::new(1200.0, 900.0);
        player.recenter(&resized, &config);
        assert_eq!(player.pos, Vec2::new(600.0, 450.0));
        assert_eq!(player.target, player.pos);
        assert_eq!(player.radius, 45.0, "5% of 900");
    }

    proptest! {
        /// After any single advance from any start toward any target, the
        /// position is inside the viewport inset by the radius.
        #[test]
        fn position_always_inside_bounds(
            px in -2000.0f32..2000.0, py in -2000.0f32..2000.0,
            tx in -2000.0f32..2000.0, ty in -2000.0f32..2000.0,
        ) {
            let viewport = test_viewport();
            let config = GameConfig::default();
            let mut player = Player::at_center(&viewport, &config);
            player.pos = Vec2::new(px, py);
            player.target = Vec2::new(tx, ty);

            player.advance(&viewport, &config);

            prop_assert!(player.pos.x >= player.radius);
            prop_assert!(player.pos.x <= viewport.width - player.radius);
            prop_assert!(player.pos.y >= player.radius);
            prop_assert!(player.pos.y <= viewport.height - player.radius);
        }
    }
}
