//! End screen overlay shown while the run is over.
//!
//! | System              | Schedule            | Purpose                        |
//! |---------------------|---------------------|--------------------------------|
//! | `setup_game_over`   | `OnEnter(GameOver)` | Spawn the overlay and stats    |
//! | `cleanup_game_over` | `OnExit(GameOver)`  | Despawn the overlay tree       |
//!
//! The overlay is a translucent black sheet over the frozen field, with the
//! final score, survival time, and rank centered on it. The restart key
//! itself is handled by the simulation
//! ([`restart_key_system`](crate::state::restart_key_system)); this module
//! only draws the prompt.

use bevy::prelude::*;

use crate::color::player_blue;
use crate::state::{rank_label, GameRun, GameState};

/// Root node of the end screen; the whole tree is despawned on restart.
#[derive(Component)]
pub struct GameOverRoot;

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::GameOver), setup_game_over)
            .add_systems(OnExit(GameState::GameOver), cleanup_game_over);
    }
}

fn overlay_color() -> Color {
    // 200/255 black, enough to dim the field without hiding it.
    Color::srgba(0.0, 0.0, 0.0, 200.0 / 255.0)
}

/// Spawn the full-screen end overlay.
///
/// Layout:
/// ```text
/// ┌─────────────────────────────────┐
/// │          GAME OVER!             │
/// │        Final Score: 1240        │
/// │     Survival Time: 73 seconds   │
/// │      Rank: Movement Master      │
/// │      Press 'R' to Restart       │
/// └─────────────────────────────────┘
/// ```
pub fn setup_game_over(mut commands: Commands, run: Res<GameRun>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(overlay_color()),
            GameOverRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("GAME OVER!"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(player_blue()),
            ));

            spacer(root, 20.0);

            root.spawn((
                Text::new(format!("Final Score: {}", run.score)),
                TextFont {
                    font_size: 30.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            spacer(root, 10.0);

            root.spawn((
                Text::new(format!("Survival Time: {} seconds", run.survival_seconds())),
                TextFont {
                    font_size: 30.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            spacer(root, 10.0);

            root.spawn((
                Text::new(format!("Rank: {}", rank_label(run.score))),
                TextFont {
                    font_size: 30.0,
                    ..default()
                },
                TextColor(player_blue()),
            ));

            spacer(root, 30.0);

            root.spawn((
                Text::new("Press 'R' to Restart"),
                TextFont {
                    font_size: 30.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// Spawn a fixed-height invisible spacer node.
fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

/// Despawn the end screen tree.
pub fn cleanup_game_over(mut commands: Commands, query: Query<Entity, With<GameOverRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}
