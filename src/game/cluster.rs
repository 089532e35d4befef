//! Cluster detection - finding and popping matching bubbles.
//!
//! Uses flood fill (BFS) to find connected groups of same-colored bubbles.
//! When a cluster of 3+ is found it pops, and anything no longer hanging
//! from the ceiling drops with it.

use bevy::prelude::*;
use std::collections::{HashSet, VecDeque};

use super::{bubble::BubbleColor, grid::BubbleGrid, hex::GridCoord};

/// Minimum cluster size to pop (match-3).
pub const MIN_CLUSTER_SIZE: usize = 3;

/// Points awarded per bubble popped in a cluster.
pub const POINTS_PER_BUBBLE: u32 = 10;

/// Points awarded per floating bubble dropped after a pop.
pub const POINTS_PER_FLOATING: u32 = 5;

/// What one placement removed from the grid.
///
/// Both lists are in row-major order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// The popped same-color cluster, including the placed bubble.
    pub cluster: Vec<GridCoord>,
    /// Bubbles left hanging after the pop.
    pub floating: Vec<GridCoord>,
}

impl MatchResult {
    /// Whether anything was removed.
    pub fn popped(&self) -> bool {
        !self.cluster.is_empty()
    }

    /// Points earned by this placement.
    pub fn score_delta(&self) -> u32 {
        self.cluster.len() as u32 * POINTS_PER_BUBBLE + self.floating.len() as u32 * POINTS_PER_FLOATING
    }
}

/// Find all connected bubbles of `color` reachable from `start` (BFS).
///
/// Only occupied cells are visited. The seed itself must hold `color`,
/// otherwise the cluster is empty.
pub fn find_cluster(grid: &BubbleGrid, start: GridCoord, color: BubbleColor) -> HashSet<GridCoord> {
    let mut cluster = HashSet::new();
    if grid.color_at(start) != Some(color) {
        return cluster;
    }

    let mut queue = VecDeque::new();
    cluster.insert(start);
    queue.push_back(start);

    while let Some(coord) = queue.pop_front() {
        for neighbor in coord.neighbors() {
            if !cluster.contains(&neighbor) && grid.color_at(neighbor) == Some(color) {
                cluster.insert(neighbor);
                queue.push_back(neighbor);
            }
        }
    }

    cluster
}

/// Find all bubbles connected to the ceiling row, by any color, using BFS.
fn find_anchored_bubbles(grid: &BubbleGrid) -> HashSet<GridCoord> {
    let mut anchored = HashSet::new();
    let mut queue = VecDeque::new();

    // Start from every bubble in the ceiling row at once
    for coord in grid.ceiling_coords() {
        queue.push_back(coord);
        anchored.insert(coord);
    }

    while let Some(coord) = queue.pop_front() {
        for neighbor in coord.neighbors() {
            if !anchored.contains(&neighbor) && grid.is_occupied(neighbor) {
                anchored.insert(neighbor);
                queue.push_back(neighbor);
            }
        }
    }

    anchored
}

/// Bubbles with no path to the ceiling, in row-major order.
pub fn find_floating(grid: &BubbleGrid) -> Vec<GridCoord> {
    let anchored = find_anchored_bubbles(grid);
    let mut floating: Vec<GridCoord> = grid.coords().filter(|c| !anchored.contains(c)).collect();
    floating.sort();
    floating
}

/// Remove every floating bubble and return what was removed.
pub fn sweep_floating(grid: &mut BubbleGrid) -> Vec<GridCoord> {
    let floating = find_floating(grid);
    if !floating.is_empty() {
        grid.remove_all(&floating);
        info!("Dropped {} floating bubbles", floating.len());
    }
    floating
}

/// Resolve a freshly placed bubble.
///
/// A cluster of at least [`MIN_CLUSTER_SIZE`] is removed and followed by a
/// floating sweep. A smaller cluster leaves the grid untouched.
pub fn resolve_placement(grid: &mut BubbleGrid, placed: GridCoord, color: BubbleColor) -> MatchResult {
    let cluster = find_cluster(grid, placed, color);
    if cluster.len() < MIN_CLUSTER_SIZE {
        return MatchResult::default();
    }

    let mut cluster: Vec<GridCoord> = cluster.into_iter().collect();
    cluster.sort();
    grid.remove_all(&cluster);
    info!(
        "Popped cluster of {} {:?} bubbles at {}",
        cluster.len(),
        color,
        placed
    );

    let floating = sweep_floating(grid);
    MatchResult { cluster, floating }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(cells: &[(i32, i32, BubbleColor)]) -> BubbleGrid {
        let mut grid = BubbleGrid::new();
        for &(row, col, color) in cells {
            grid.insert(GridCoord::new(row, col), color).unwrap();
        }
        grid
    }

    #[test]
    fn test_cluster_skips_isolated_same_color() {
        use BubbleColor::*;
        let grid = grid_with(&[
            (2, 3, Sky),
            (2, 4, Sky),
            (2, 5, Sky),
            (2, 6, Sky),
            (2, 7, Coral),
            (2, 9, Sky),
        ]);

        let cluster = find_cluster(&grid, GridCoord::new(2, 4), Sky);
        assert_eq!(cluster.len(), 4);
        assert!(!cluster.contains(&GridCoord::new(2, 9)));
        assert!(!cluster.contains(&GridCoord::new(2, 7)));
    }

    #[test]
    fn test_cluster_follows_diagonal_stagger() {
        use BubbleColor::*;
        // (0,7) and (0,8) both touch the odd-row cell (1,7)
        let grid = grid_with(&[(0, 7, Mint), (0, 8, Mint), (1, 7, Mint), (1, 6, Mint)]);
        let cluster = find_cluster(&grid, GridCoord::new(1, 7), Mint);
        assert_eq!(cluster.len(), 4);
    }

    #[test]
    fn test_cluster_from_empty_or_mismatched_seed_is_empty() {
        use BubbleColor::*;
        let grid = grid_with(&[(0, 0, Sun), (0, 1, Sun)]);
        assert!(find_cluster(&grid, GridCoord::new(0, 2), Sun).is_empty());
        assert!(find_cluster(&grid, GridCoord::new(0, 0), Teal).is_empty());
    }

    #[test]
    fn test_sweep_removes_cluster_cut_from_ceiling() {
        use BubbleColor::*;
        let mut grid = grid_with(&[
            (0, 5, Coral),
            (0, 6, Coral),
            (0, 7, Coral),
            (0, 8, Coral),
            (1, 6, Sun),
            (2, 6, Sun),
            (3, 6, Mint),
            (3, 7, Mint),
            (3, 8, Mint),
        ]);

        assert!(sweep_floating(&mut grid).is_empty());
        assert_eq!(grid.len(), 9);

        grid.remove(GridCoord::new(1, 6));
        grid.remove(GridCoord::new(2, 6));
        let dropped = sweep_floating(&mut grid);

        assert_eq!(
            dropped,
            vec![GridCoord::new(3, 6), GridCoord::new(3, 7), GridCoord::new(3, 8)]
        );
        assert_eq!(grid.len(), 4);
        assert!(grid.coords().all(|c| c.row == 0));
    }

    #[test]
    fn test_pair_does_not_pop() {
        use BubbleColor::*;
        let mut grid = grid_with(&[(0, 7, Teal), (1, 7, Teal), (0, 0, Sun)]);
        let result = resolve_placement(&mut grid, GridCoord::new(1, 7), Teal);
        assert!(!result.popped());
        assert_eq!(result.score_delta(), 0);
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn test_triple_pops_and_drops_hangers() {
        use BubbleColor::*;
        // (2,7) hangs only from the Teal triple
        let mut grid = grid_with(&[
            (0, 7, Teal),
            (0, 8, Teal),
            (1, 7, Teal),
            (2, 7, Sky),
            (0, 0, Sun),
        ]);
        let result = resolve_placement(&mut grid, GridCoord::new(1, 7), Teal);

        assert_eq!(
            result.cluster,
            vec![GridCoord::new(0, 7), GridCoord::new(0, 8), GridCoord::new(1, 7)]
        );
        assert_eq!(result.floating, vec![GridCoord::new(2, 7)]);
        assert_eq!(result.score_delta(), 3 * 10 + 5);
        assert_eq!(grid.len(), 1);
        assert!(grid.is_occupied(GridCoord::new(0, 0)));
    }
}
