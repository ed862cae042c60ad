//! Application composition root.
//!
//! Provides two public configuration functions:
//! - [`configure_full`]: DefaultPlugins (window/render) plus every game plugin.
//! - [`configure_headless`]: the simulation and end screen without a window,
//!   for integration tests.

use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::window::WindowResolution;

use crate::color::background_navy;
use crate::config::load_game_config;
use crate::menu::MenuPlugin;
use crate::rendering::RenderingPlugin;
use crate::simulation::SimulationPlugin;

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

/// The full windowed game.
///
/// The config file is read in `Startup`, before the first state transition
/// builds the session, so the initial player and spawn pacing already see the
/// final values.
pub fn configure_full(app: &mut App) {
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Extreme Dodge".into(),
            resolution: WindowResolution::new(800, 600),
            ..default()
        }),
        ..default()
    }));
    app.insert_resource(ClearColor(background_navy()));
    app.add_systems(Startup, load_game_config);
    configure_game(app);
    app.add_plugins(RenderingPlugin);
}

/// Headless configuration for integration tests.
///
/// No DefaultPlugins and no renderer. The key-input resource the window
/// stack normally provides is created empty so the restart system can poll
/// it; tests press keys by mutating it directly.
pub fn configure_headless(app: &mut App) {
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_resource::<ButtonInput<KeyCode>>();
    configure_game(app);
}

/// Game logic common to both configurations.
fn configure_game(app: &mut App) {
    app.add_plugins((SimulationPlugin, MenuPlugin));
}
