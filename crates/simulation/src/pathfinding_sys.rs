use pathfinding::prelude::bfs;

use crate::grid::{GridCoord, LevelGrid};

/// Shortest route from `start` to the exit row over currently open cells.
///
/// The returned path excludes `start` and ends on the exit row. It is empty
/// when `start` is invalid, already on the exit row, or cut off; callers tell
/// "arrived" and "blocked" apart with [`GridCoord::is_exit_row`]. Equal-length
/// routes are resolved by neighbor order (up, down, left, right).
pub fn path_to_exit_row(grid: &LevelGrid, start: GridCoord) -> Vec<GridCoord> {
    if !grid.is_valid(start) || start.is_exit_row() {
        return Vec::new();
    }

    let result = bfs(
        &start,
        |coord| open_neighbors(grid, *coord),
        |coord| coord.is_exit_row(),
    );

    match result {
        Some(mut path) => {
            path.remove(0);
            path
        }
        None => Vec::new(),
    }
}

/// Whether any open route to the exit row exists from `start`.
pub fn has_path_to_exit_row(grid: &LevelGrid, start: GridCoord) -> bool {
    !path_to_exit_row(grid, start).is_empty()
}

fn open_neighbors(grid: &LevelGrid, coord: GridCoord) -> Vec<GridCoord> {
    let (neighbors, count) = grid.neighbors4(coord);
    neighbors[..count]
        .iter()
        .copied()
        .filter(|n| grid.is_open(*n))
        .collect()
}
