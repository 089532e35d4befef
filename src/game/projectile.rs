//! Projectile - the bubble being shot.
//!
//! The projectile travels in a straight line at a fixed distance per tick,
//! bouncing off the side walls, until it touches a placed bubble or the
//! ceiling. It then snaps to a grid cell.

use bevy::prelude::*;

use super::{
    bubble::BubbleColor,
    grid::{BubbleGrid, in_bounds},
    hex::{BUBBLE_RADIUS, CANVAS_WIDTH, GridCoord},
};

/// Centre-to-centre distance below which two bubbles touch.
pub const COLLISION_DISTANCE: f32 = BUBBLE_RADIUS * 2.0;

/// What stopped the projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// Overlapped a placed bubble; the nearest one is reported.
    Bubble(GridCoord),
    /// Reached the ceiling without touching anything.
    Ceiling,
}

/// The live, moving bubble.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Projectile {
    /// Current centre in playfield pixels.
    pub pos: Vec2,
    /// Displacement per tick.
    pub velocity: Vec2,
    /// The bubble color
    pub color: BubbleColor,
}

impl Projectile {
    /// Launch from `origin` along `angle` (radians from straight up,
    /// positive to the right).
    pub fn launch(origin: Vec2, angle: f32, speed: f32, color: BubbleColor) -> Self {
        Self {
            pos: origin,
            velocity: Vec2::new(angle.sin() * speed, -angle.cos() * speed),
            color,
        }
    }

    /// Move one tick and bounce off the side walls.
    ///
    /// Bouncing negates the horizontal velocity and leaves the position
    /// where it is; the next step carries it back inside.
    pub fn advance(&mut self) {
        self.pos += self.velocity;

        if self.pos.x - BUBBLE_RADIUS < 0.0 || self.pos.x + BUBBLE_RADIUS > CANVAS_WIDTH {
            self.velocity.x = -self.velocity.x;
        }
    }

    /// The nearest placed bubble this projectile overlaps.
    ///
    /// Ties on distance go to the first cell in row-major order, so the
    /// result never depends on map iteration order.
    pub fn nearest_overlap(&self, grid: &BubbleGrid) -> Option<GridCoord> {
        let limit = COLLISION_DISTANCE * COLLISION_DISTANCE;
        grid.iter()
            .map(|b| (b.coord, b.pos().distance_squared(self.pos)))
            .filter(|&(_, d)| d < limit)
            .min_by(|(ca, da), (cb, db)| da.total_cmp(db).then(ca.cmp(cb)))
            .map(|(coord, _)| coord)
    }

    /// Whether the projectile has hit something after its latest step.
    pub fn impact(&self, grid: &BubbleGrid) -> Option<Impact> {
        if let Some(coord) = self.nearest_overlap(grid) {
            return Some(Impact::Bubble(coord));
        }
        if self.pos.y - BUBBLE_RADIUS < 0.0 {
            return Some(Impact::Ceiling);
        }
        None
    }
}

/// The cell a projectile at `pos` settles into.
///
/// Normally the cell under its centre. When that cell is taken or lies
/// outside the walls, the closest free in-bounds neighbor is used
/// instead; `None` means there is nowhere to put it.
pub fn snap_cell(grid: &BubbleGrid, pos: Vec2) -> Option<GridCoord> {
    let target = GridCoord::from_pixel(pos);
    if in_bounds(target) && !grid.is_occupied(target) {
        return Some(target);
    }

    warn!("Snap target {} is taken or off the grid, trying its neighbors", target);
    grid.nearest_free_neighbor(target, pos)
}
