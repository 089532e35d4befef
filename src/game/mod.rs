//! The bubble shooter.
//!
//! The engine modules are plain Rust and know nothing about Bevy's world:
//! - Offset hex grid geometry and the bubble grid
//! - Cluster matching and the floating sweep
//! - Projectile flight, wall bounces and snapping
//! - Shooter aim and the trajectory preview
//! - [`BubbleGame`], the state machine tying them together
//!
//! `session` and `render` drive one [`BubbleGame`] from Bevy input and draw
//! it with gizmos.

pub mod aim;
pub mod bubble;
pub mod cluster;
pub mod config;
pub mod error;
pub mod grid;
pub mod hex;
pub mod projectile;
mod render;
mod session;
pub mod shooter;
pub mod snapshot;
pub mod state;

use bevy::prelude::*;

pub use bubble::{Bubble, BubbleColor};
pub use config::GameConfig;
pub use error::{ConfigError, PlacementError};
pub use grid::BubbleGrid;
pub use hex::GridCoord;
pub use session::{Session, SessionSystems, ShotResolved};
pub use snapshot::GameSnapshot;
pub use state::{BubbleGame, GameScore, GameStatus, TickReport};

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera);
    app.add_plugins((session::plugin, render::plugin));
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((Name::new("Camera"), Camera2d));
}
