//! Offset hexagonal coordinate system.
//!
//! Bubbles live on a rectangular grid of rows and columns where every odd
//! row is shifted right by one bubble radius. Storage coordinates stay
//! square, but each cell still touches six neighbors.
//!
//! Pixel space here is the playfield's own space: origin at the top-left
//! corner, x grows right, y grows down. Mapping into Bevy world space
//! happens only in the render layer.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Radius of every bubble in pixels.
pub const BUBBLE_RADIUS: f32 = 20.0;

/// Distance between neighboring centres on the same row.
pub const BUBBLE_DIAMETER: f32 = BUBBLE_RADIUS * 2.0;

/// Number of columns across the playfield.
pub const COLS: i32 = 15;

/// Number of rows the playfield is designed around. Not a hard limit:
/// bubbles may settle below it, which is how a game is lost.
pub const ROWS: i32 = 8;

/// Width of the playfield in pixels.
pub const CANVAS_WIDTH: f32 = 620.0;

/// Height of the playfield in pixels.
pub const CANVAS_HEIGHT: f32 = 600.0;

/// Neighbor deltas `(d_row, d_col)` for cells on odd (shifted) rows.
const ODD_ROW_NEIGHBORS: [(i32, i32); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0), (1, 1)];

/// Neighbor deltas `(d_row, d_col)` for cells on even rows.
const EVEN_ROW_NEIGHBORS: [(i32, i32); 6] =
    [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, -1), (1, 0)];

/// A cell on the offset grid.
///
/// Ordering is row-major, which gives the engine a stable iteration order
/// wherever it needs one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize, Deserialize,
)]
pub struct GridCoord {
    /// Row, 0 is the ceiling.
    pub row: i32,
    /// Column, 0 is the left wall.
    pub col: i32,
}

impl GridCoord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Whether this cell sits on a shifted row.
    #[inline]
    pub const fn is_odd_row(&self) -> bool {
        self.row.rem_euclid(2) == 1
    }

    /// Horizontal shift applied to this cell's row.
    #[inline]
    pub fn row_offset(&self) -> f32 {
        row_offset(self.row)
    }

    /// The six adjacent cells.
    ///
    /// Deltas depend on row parity. Results are not filtered, callers
    /// check occupancy and bounds themselves.
    pub fn neighbors(&self) -> [GridCoord; 6] {
        let deltas = if self.is_odd_row() {
            ODD_ROW_NEIGHBORS
        } else {
            EVEN_ROW_NEIGHBORS
        };
        deltas.map(|(dr, dc)| GridCoord::new(self.row + dr, self.col + dc))
    }

    /// Whether `other` is one of this cell's six neighbors.
    pub fn is_adjacent(&self, other: GridCoord) -> bool {
        self.neighbors().contains(&other)
    }

    /// Canonical pixel centre of this cell.
    pub fn to_pixel(&self) -> Vec2 {
        let x = self.col as f32 * BUBBLE_DIAMETER + self.row_offset() + BUBBLE_RADIUS;
        let y = self.row as f32 * BUBBLE_DIAMETER + BUBBLE_RADIUS;
        Vec2::new(x, y)
    }

    /// Nearest cell to a pixel position.
    ///
    /// The row is found first, then the column is corrected for that
    /// row's shift. Exact inverse of [`GridCoord::to_pixel`].
    pub fn from_pixel(pos: Vec2) -> Self {
        let row = round_half_up((pos.y - BUBBLE_RADIUS) / BUBBLE_DIAMETER);
        let col = round_half_up((pos.x - BUBBLE_RADIUS - row_offset(row)) / BUBBLE_DIAMETER);
        Self { row, col }
    }
}

impl std::fmt::Display for GridCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Horizontal shift for a row: one radius on odd rows, none on even rows.
#[inline]
pub fn row_offset(row: i32) -> f32 {
    if row.rem_euclid(2) == 1 {
        BUBBLE_RADIUS
    } else {
        0.0
    }
}

/// Halves round toward +inf, so a projectile grazing the left wall or the
/// ceiling still lands in column 0 / row 0.
#[inline]
fn round_half_up(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_count() {
        let coord = GridCoord::new(0, 0);
        assert_eq!(coord.neighbors().len(), 6);
    }

    #[test]
    fn test_neighbors_depend_on_row_parity() {
        let even = GridCoord::new(2, 5).neighbors();
        assert!(even.contains(&GridCoord::new(1, 4)));
        assert!(even.contains(&GridCoord::new(3, 4)));
        assert!(!even.contains(&GridCoord::new(1, 6)));

        let odd = GridCoord::new(3, 5).neighbors();
        assert!(odd.contains(&GridCoord::new(2, 6)));
        assert!(odd.contains(&GridCoord::new(4, 6)));
        assert!(!odd.contains(&GridCoord::new(2, 4)));
    }

    #[test]
    fn test_neighbor_symmetry() {
        for row in 0..ROWS {
            for col in 0..COLS {
                let a = GridCoord::new(row, col);
                for b in a.neighbors() {
                    assert!(b.is_adjacent(a), "{b} should list {a} as a neighbor");
                }
            }
        }
    }

    #[test]
    fn test_pixel_roundtrip_even_row() {
        let original = GridCoord::new(2, 5);
        let back = GridCoord::from_pixel(original.to_pixel());
        assert_eq!(original, back);
    }

    #[test]
    fn test_pixel_roundtrip_odd_row() {
        let original = GridCoord::new(3, 3);
        let back = GridCoord::from_pixel(original.to_pixel());
        assert_eq!(original, back);
    }

    #[test]
    fn test_pixel_roundtrip_whole_playfield() {
        for row in 0..ROWS + 6 {
            for col in 0..COLS {
                let coord = GridCoord::new(row, col);
                assert_eq!(GridCoord::from_pixel(coord.to_pixel()), coord);
            }
        }
    }

    #[test]
    fn test_odd_rows_are_shifted_by_radius() {
        assert_eq!(GridCoord::new(0, 0).to_pixel(), Vec2::new(20.0, 20.0));
        assert_eq!(GridCoord::new(1, 0).to_pixel(), Vec2::new(40.0, 60.0));
        assert_eq!(GridCoord::new(2, 14).to_pixel(), Vec2::new(580.0, 100.0));
    }

    #[test]
    fn test_from_pixel_near_ceiling_stays_in_row_zero() {
        assert_eq!(GridCoord::from_pixel(Vec2::new(310.0, 14.0)), GridCoord::new(0, 7));
        assert_eq!(GridCoord::from_pixel(Vec2::new(19.0, 0.0)), GridCoord::new(0, 0));
    }
}
