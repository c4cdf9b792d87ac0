//! Level grid: static cell kinds plus dynamic passenger occupancy.
//!
//! Coordinates are `(x, y)` with `y = 0` being the exit row. Cell kinds are
//! stored row-major and never change after construction; occupancy lives in
//! a separate map and only mutates through [`LevelGrid::set_occupied`].

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::EXIT_ROW;
use crate::passenger::PassengerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord(pub i32, pub i32);

impl GridCoord {
    #[inline]
    pub fn x(self) -> i32 {
        self.0
    }

    #[inline]
    pub fn y(self) -> i32 {
        self.1
    }

    #[inline]
    pub fn is_exit_row(self) -> bool {
        self.1 == EXIT_ROW
    }

    /// Saturates at `u32::MAX` for coordinates at opposite ends of the
    /// `i32` range.
    pub fn manhattan_distance(self, other: GridCoord) -> u32 {
        self.0
            .abs_diff(other.0)
            .saturating_add(self.1.abs_diff(other.1))
    }

    /// Orthogonal offsets in enumeration order: up, down, left, right.
    /// This order breaks ties between equally short paths.
    pub const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(0, 1), (0, -1), (-1, 0), (1, 0)];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    #[default]
    Open,
    /// Permanently impassable; never holds a passenger.
    Void,
}

#[derive(Debug, Clone, Default)]
pub struct LevelGrid {
    width: usize,
    height: usize,
    kinds: Vec<CellKind>,
    occupants: HashMap<GridCoord, PassengerId>,
}

impl LevelGrid {
    /// An all-open grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_kinds(width, height, vec![CellKind::Open; width * height])
    }

    pub fn from_kinds(width: usize, height: usize, kinds: Vec<CellKind>) -> Self {
        debug_assert_eq!(kinds.len(), width * height, "cell kinds must cover the grid");
        Self {
            width,
            height,
            kinds,
            occupants: HashMap::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, coord: GridCoord) -> Option<usize> {
        if self.is_valid(coord) {
            Some(coord.1 as usize * self.width + coord.0 as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_valid(&self, coord: GridCoord) -> bool {
        coord.0 >= 0
            && coord.1 >= 0
            && (coord.0 as usize) < self.width
            && (coord.1 as usize) < self.height
    }

    pub fn kind(&self, coord: GridCoord) -> Option<CellKind> {
        self.index(coord).and_then(|i| self.kinds.get(i).copied())
    }

    pub fn is_void(&self, coord: GridCoord) -> bool {
        self.kind(coord) == Some(CellKind::Void)
    }

    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        self.occupants.contains_key(&coord)
    }

    /// Valid, not void and unoccupied.
    pub fn is_open(&self, coord: GridCoord) -> bool {
        self.kind(coord) == Some(CellKind::Open) && !self.is_occupied(coord)
    }

    pub fn occupant_at(&self, coord: GridCoord) -> Option<PassengerId> {
        self.occupants.get(&coord).copied()
    }

    /// Sets or clears the occupant of a cell. Returns `false` (and changes
    /// nothing) for invalid or void cells, or when the cell already holds a
    /// different passenger.
    pub fn set_occupied(&mut self, coord: GridCoord, occupant: Option<PassengerId>) -> bool {
        if self.kind(coord) != Some(CellKind::Open) {
            return false;
        }
        match occupant {
            Some(id) => {
                if let Some(existing) = self.occupants.get(&coord) {
                    if *existing != id {
                        warn!(
                            "cell {:?} already holds passenger {}, refusing {}",
                            coord, existing, id
                        );
                        debug_assert!(false, "double occupancy at {coord:?}");
                        return false;
                    }
                }
                self.occupants.insert(coord, id);
            }
            None => {
                self.occupants.remove(&coord);
            }
        }
        true
    }

    pub fn occupied_count(&self) -> usize {
        self.occupants.len()
    }

    pub fn occupied_cells(&self) -> impl Iterator<Item = (GridCoord, PassengerId)> + '_ {
        self.occupants.iter().map(|(c, id)| (*c, *id))
    }

    /// Orthogonal in-grid neighbors in up, down, left, right order.
    /// Returns a fixed-size array and the number of valid entries.
    pub fn neighbors4(&self, coord: GridCoord) -> ([GridCoord; 4], usize) {
        let mut result = [GridCoord(0, 0); 4];
        let mut count = 0;
        for (dx, dy) in GridCoord::NEIGHBOR_OFFSETS {
            let n = GridCoord(coord.0 + dx, coord.1 + dy);
            if self.is_valid(n) {
                result[count] = n;
                count += 1;
            }
        }
        (result, count)
    }

    /// True when every in-grid orthogonal neighbor is occupied or void.
    /// A cell with no in-grid neighbors is never surrounded.
    pub fn is_surrounded(&self, coord: GridCoord) -> bool {
        let (neighbors, count) = self.neighbors4(coord);
        count > 0
            && neighbors[..count]
                .iter()
                .all(|n| self.is_void(*n) || self.is_occupied(*n))
    }
}
