//! Read-only view of a session for whatever draws it.
//!
//! Plain serde-friendly values only, so a snapshot can be handed to any
//! renderer or dumped as JSON.

use serde::Serialize;

use super::{
    bubble::BubbleColor,
    shooter::ShooterState,
    state::{BubbleGame, GameScore, GameStatus},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleView {
    pub row: i32,
    pub col: i32,
    pub x: f32,
    pub y: f32,
    pub color: BubbleColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileView {
    pub x: f32,
    pub y: f32,
    pub color: BubbleColor,
}

/// One frame's worth of state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    /// Placed bubbles in row-major order.
    pub bubbles: Vec<BubbleView>,
    pub projectile: Option<ProjectileView>,
    pub shooter: ShooterState,
    /// Preview ray as `[start, end]` point pairs.
    pub preview: Vec<[[f32; 2]; 2]>,
    pub score: GameScore,
    pub target_score: u32,
    pub status: GameStatus,
}

impl GameSnapshot {
    pub fn capture(game: &BubbleGame) -> Self {
        let bubbles = game
            .grid()
            .sorted()
            .into_iter()
            .map(|b| BubbleView {
                row: b.coord.row,
                col: b.coord.col,
                x: b.pos().x,
                y: b.pos().y,
                color: b.color,
            })
            .collect();

        let projectile = game.projectile().map(|p| ProjectileView {
            x: p.pos.x,
            y: p.pos.y,
            color: p.color,
        });

        let preview = game
            .preview_path()
            .iter()
            .map(|s| [s.start.to_array(), s.end.to_array()])
            .collect();

        Self {
            bubbles,
            projectile,
            shooter: *game.shooter(),
            preview,
            score: *game.score(),
            target_score: game.config().target_score,
            status: game.status(),
        }
    }
}
