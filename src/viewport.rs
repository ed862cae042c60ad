//! Live play-area dimensions.
//!
//! Every computation that needs the window size (spawn-edge placement,
//! boundary clamping, off-screen culling) reads the [`Viewport`] resource
//! instead of poking at the window directly, so the whole simulation can run
//! headless. [`viewport_sync_system`] keeps the resource in step with the
//! real window and applies the resize rules: the player's radius is
//! recomputed from the new dimensions and the player snaps back to the
//! center with a fresh target. Enemies and particles are deliberately left
//! untouched by a resize.

use crate::config::GameConfig;
use crate::constants::{VIEW_HEIGHT, VIEW_WIDTH};
use crate::player::Player;
use bevy::prelude::*;

/// Current width/height of the play area in logical pixels.
///
/// Simulation space spans `[0, width] × [0, height]` with the origin at the
/// top-left corner and y growing downward, matching pointer coordinates.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEW_WIDTH,
            height: VIEW_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }

    /// True iff `point` lies strictly further than `margin` outside any edge.
    ///
    /// A point sitting exactly on the margin line is still considered inside;
    /// enemy culling relies on that strictness.
    pub fn outside_by(&self, point: Vec2, margin: f32) -> bool {
        point.x < -margin
            || point.x > self.width + margin
            || point.y < -margin
            || point.y > self.height + margin
    }
}

/// Mirror the primary window's size into [`Viewport`] and apply the resize
/// rules when it changes.
///
/// Runs every frame in `PreUpdate`, before the fixed-update simulation ticks,
/// so a resize is fully applied before any gameplay logic sees the frame.
/// Resizes are honored on the end screen too: the frozen player recenters,
/// which is what the restart will use as its anchor anyway.
pub fn viewport_sync_system(
    windows: Query<&Window>,
    config: Res<GameConfig>,
    mut viewport: ResMut<Viewport>,
    mut players: Query<&mut Player>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let (width, height) = (window.width(), window.height());
    if width == viewport.width && height == viewport.height {
        return;
    }
    viewport.width = width;
    viewport.height = height;
    if let Ok(mut player) = players.single_mut() {
        player.recenter(&viewport, &config);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
