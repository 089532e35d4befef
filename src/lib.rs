//! Bubble Burst: a hex-grid bubble shooter.

pub mod game;

use bevy::prelude::*;

pub use game::{BubbleGame, GameConfig, GameSnapshot, GameStatus};

pub struct AppPlugin;

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Window {
                title: "Bubble Burst".to_string(),
                fit_canvas_to_parent: true,
                ..default()
            }
            .into(),
            ..default()
        }));

        app.add_plugins(game::plugin);
    }
}
