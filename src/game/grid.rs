//! The offset grid that holds all placed bubbles.
//!
//! Uses a HashMap keyed by cell for sparse storage - only occupied cells
//! are stored, and occupancy checks are O(1).

use bevy::prelude::*;
use rand::Rng;
use std::collections::HashMap;

use super::{
    bubble::{Bubble, BubbleColor},
    error::PlacementError,
    hex::{COLS, GridCoord},
};

/// Number of rows filled at the start of a game.
pub const INITIAL_ROWS: i32 = 5;

/// Whether a cell lies inside the playfield: at or below the ceiling and
/// between the walls.
///
/// Rows are unbounded below, so a bubble can settle past the danger line
/// and end the game instead of being rejected.
pub fn in_bounds(coord: GridCoord) -> bool {
    coord.row >= 0 && (0..COLS).contains(&coord.col)
}

/// All placed bubbles, keyed by cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BubbleGrid {
    bubbles: HashMap<GridCoord, Bubble>,
}

impl BubbleGrid {
    /// Create a new empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the opening layout.
    ///
    /// Rows `0..INITIAL_ROWS` are filled wall to wall; odd rows drop their
    /// last column so the shifted row stays inside the playfield.
    pub fn initial_layout(rng: &mut impl Rng) -> Self {
        let mut grid = Self::new();
        for row in 0..INITIAL_ROWS {
            for col in 0..COLS {
                let coord = GridCoord::new(row, col);
                if coord.is_odd_row() && col == COLS - 1 {
                    continue;
                }
                grid.bubbles
                    .insert(coord, Bubble::new(coord, BubbleColor::random(rng)));
            }
        }
        grid
    }

    /// Check if a cell is occupied.
    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        self.bubbles.contains_key(&coord)
    }

    /// Get the bubble at a cell, if any.
    pub fn get(&self, coord: GridCoord) -> Option<&Bubble> {
        self.bubbles.get(&coord)
    }

    /// Color of the bubble at a cell, if any.
    pub fn color_at(&self, coord: GridCoord) -> Option<BubbleColor> {
        self.get(coord).map(|b| b.color)
    }

    /// Place a bubble.
    ///
    /// Never overwrites: an occupied or out-of-bounds cell is rejected and
    /// the grid is left unchanged.
    pub fn insert(&mut self, coord: GridCoord, color: BubbleColor) -> Result<&Bubble, PlacementError> {
        if !in_bounds(coord) {
            return Err(PlacementError::OutOfBounds { coord });
        }
        if let Some(existing) = self.bubbles.get(&coord) {
            return Err(PlacementError::Occupied {
                coord,
                existing: existing.color,
            });
        }
        Ok(self
            .bubbles
            .entry(coord)
            .or_insert_with(|| Bubble::new(coord, color)))
    }

    /// Remove a bubble from a cell.
    ///
    /// Returns the bubble that was removed, if any.
    pub fn remove(&mut self, coord: GridCoord) -> Option<Bubble> {
        self.bubbles.remove(&coord)
    }

    /// Remove every listed cell, returning how many were occupied.
    pub fn remove_all<'a>(&mut self, coords: impl IntoIterator<Item = &'a GridCoord>) -> usize {
        let mut removed = 0;
        for coord in coords {
            if self.bubbles.remove(coord).is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// Get the number of bubbles in the grid.
    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    /// Check if the grid is empty.
    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    /// Iterate over all bubbles in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Bubble> {
        self.bubbles.values()
    }

    /// All bubbles in row-major order.
    pub fn sorted(&self) -> Vec<&Bubble> {
        let mut bubbles: Vec<&Bubble> = self.bubbles.values().collect();
        bubbles.sort_by_key(|b| b.coord);
        bubbles
    }

    /// Get all occupied cells.
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.bubbles.keys().copied()
    }

    /// All occupied cells in the ceiling row.
    pub fn ceiling_coords(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.coords().filter(|c| c.row == 0)
    }

    /// Lowest pixel centre (largest y) among placed bubbles.
    pub fn max_y(&self) -> Option<f32> {
        self.bubbles.values().map(|b| b.pos().y).reduce(f32::max)
    }

    /// The free in-bounds neighbor of `target` closest to `pos`.
    ///
    /// Used when a snap lands on an occupied cell. Ties keep the first
    /// neighbor in neighbor order.
    pub fn nearest_free_neighbor(&self, target: GridCoord, pos: Vec2) -> Option<GridCoord> {
        target
            .neighbors()
            .into_iter()
            .filter(|n| in_bounds(*n) && !self.is_occupied(*n))
            .min_by(|a, b| {
                let da = a.to_pixel().distance_squared(pos);
                let db = b.to_pixel().distance_squared(pos);
                da.total_cmp(&db)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::hex::ROWS;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_initial_layout_staggers_odd_rows() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = BubbleGrid::initial_layout(&mut rng);

        assert_eq!(grid.len(), 3 * 15 + 2 * 14);
        assert!(grid.is_occupied(GridCoord::new(0, 14)));
        assert!(!grid.is_occupied(GridCoord::new(1, 14)));
        assert!(grid.is_occupied(GridCoord::new(1, 13)));
        assert!(!grid.is_occupied(GridCoord::new(5, 0)));
    }

    #[test]
    fn test_initial_layout_roundtrips() {
        let mut rng = StdRng::seed_from_u64(2);
        let grid = BubbleGrid::initial_layout(&mut rng);
        for bubble in grid.iter() {
            assert_eq!(GridCoord::from_pixel(bubble.pos()), bubble.coord);
        }
    }

    #[test]
    fn test_insert_rejects_occupied_cell() {
        let mut grid = BubbleGrid::new();
        let coord = GridCoord::new(0, 3);
        grid.insert(coord, BubbleColor::Teal).unwrap();

        let err = grid.insert(coord, BubbleColor::Sun).unwrap_err();
        assert_eq!(
            err,
            PlacementError::Occupied {
                coord,
                existing: BubbleColor::Teal
            }
        );
        assert_eq!(grid.color_at(coord), Some(BubbleColor::Teal));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_insert_rejects_out_of_bounds() {
        let mut grid = BubbleGrid::new();
        assert!(matches!(
            grid.insert(GridCoord::new(0, COLS), BubbleColor::Sky),
            Err(PlacementError::OutOfBounds { .. })
        ));
        assert!(matches!(
            grid.insert(GridCoord::new(-1, 2), BubbleColor::Sky),
            Err(PlacementError::OutOfBounds { .. })
        ));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_rows_past_the_playfield_are_in_bounds() {
        let below = GridCoord::new(ROWS + 5, 3);
        assert!(in_bounds(below));
        let mut grid = BubbleGrid::new();
        assert!(grid.insert(below, BubbleColor::Sun).is_ok());
    }

    #[test]
    fn test_max_y_tracks_lowest_bubble() {
        let mut grid = BubbleGrid::new();
        assert_eq!(grid.max_y(), None);
        grid.insert(GridCoord::new(0, 0), BubbleColor::Coral).unwrap();
        grid.insert(GridCoord::new(4, 2), BubbleColor::Coral).unwrap();
        assert_eq!(grid.max_y(), Some(180.0));
    }

    #[test]
    fn test_nearest_free_neighbor_skips_occupied_and_walls() {
        let mut grid = BubbleGrid::new();
        grid.insert(GridCoord::new(0, 0), BubbleColor::Coral).unwrap();
        grid.insert(GridCoord::new(1, 0), BubbleColor::Coral).unwrap();

        let free = grid
            .nearest_free_neighbor(GridCoord::new(0, 0), Vec2::new(15.0, 30.0))
            .unwrap();
        assert_eq!(free, GridCoord::new(0, 1));
    }
}
