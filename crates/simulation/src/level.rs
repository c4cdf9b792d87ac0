//! Level definitions and load-time validation.
//!
//! [`LevelDefinition`] is the on-disk JSON shape. It is turned into an
//! immutable [`Level`] through `TryFrom`, which rejects anything the
//! simulation could not run. Nothing downstream re-checks these rules.

use std::collections::HashSet;
use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_BENCH_CAPACITY, DEFAULT_LEVEL_BENCH_CAPACITY, DEFAULT_TIME_LIMIT, MAX_GRID_DIM,
};
use crate::grid::{CellKind, GridCoord, LevelGrid};
use crate::passenger::PassengerColor;
use crate::vehicles::VehicleSpec;

// =============================================================================
// On-disk definition
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerPlacement {
    pub color: PassengerColor,
    pub coord: GridCoord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    #[serde(default)]
    pub name: String,
    pub width: usize,
    pub height: usize,
    #[serde(default = "default_time_limit")]
    pub time_limit: f32,
    #[serde(default = "default_bench_capacity")]
    pub bench_capacity: usize,
    /// Row-major cell kinds. Empty means every cell is open.
    #[serde(default)]
    pub cells: Vec<CellKind>,
    pub vehicles: Vec<VehicleSpec>,
    pub passengers: Vec<PassengerPlacement>,
}

fn default_time_limit() -> f32 {
    DEFAULT_TIME_LIMIT
}

fn default_bench_capacity() -> usize {
    DEFAULT_LEVEL_BENCH_CAPACITY
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum LevelError {
    Malformed(String),
    EmptyGrid,
    GridTooLarge { width: usize, height: usize },
    CellCountMismatch { expected: usize, found: usize },
    NonPositiveTimeLimit(f32),
    NoPassengers,
    NoVehicles,
    ZeroCapacityVehicle { index: usize },
    PlacementOutOfBounds(GridCoord),
    PlacementOnVoid(GridCoord),
    DuplicatePlacement(GridCoord),
    UnmatchedVehicleColor(PassengerColor),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Malformed(msg) => write!(f, "malformed level file: {msg}"),
            LevelError::EmptyGrid => write!(f, "grid must have at least one row and column"),
            LevelError::GridTooLarge { width, height } => write!(
                f,
                "grid {width}x{height} exceeds the {MAX_GRID_DIM}x{MAX_GRID_DIM} limit"
            ),
            LevelError::CellCountMismatch { expected, found } => {
                write!(f, "expected {expected} cells, found {found}")
            }
            LevelError::NonPositiveTimeLimit(t) => {
                write!(f, "time limit must be positive, got {t}")
            }
            LevelError::NoPassengers => write!(f, "level has no passengers"),
            LevelError::NoVehicles => write!(f, "level has no vehicles"),
            LevelError::ZeroCapacityVehicle { index } => {
                write!(f, "vehicle #{index} has zero capacity")
            }
            LevelError::PlacementOutOfBounds(c) => {
                write!(f, "passenger at ({}, {}) is outside the grid", c.0, c.1)
            }
            LevelError::PlacementOnVoid(c) => {
                write!(f, "passenger at ({}, {}) sits on a void cell", c.0, c.1)
            }
            LevelError::DuplicatePlacement(c) => {
                write!(f, "more than one passenger at ({}, {})", c.0, c.1)
            }
            LevelError::UnmatchedVehicleColor(color) => {
                write!(f, "no passenger matches vehicle color {}", color.name())
            }
        }
    }
}

impl std::error::Error for LevelError {}

// =============================================================================
// Validated level
// =============================================================================

/// A validated, immutable level.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    name: String,
    width: usize,
    height: usize,
    time_limit: f32,
    bench_capacity: usize,
    cells: Vec<CellKind>,
    vehicles: Vec<VehicleSpec>,
    passengers: Vec<PassengerPlacement>,
}

impl Level {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let definition: LevelDefinition =
            serde_json::from_str(json).map_err(|e| LevelError::Malformed(e.to_string()))?;
        Self::try_from(definition)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn time_limit(&self) -> f32 {
        self.time_limit
    }

    pub fn bench_capacity(&self) -> usize {
        self.bench_capacity
    }

    pub fn vehicles(&self) -> &[VehicleSpec] {
        &self.vehicles
    }

    pub fn passengers(&self) -> &[PassengerPlacement] {
        &self.passengers
    }

    /// Fresh grid with this level's cell kinds and no occupants.
    pub fn build_grid(&self) -> LevelGrid {
        LevelGrid::from_kinds(self.width, self.height, self.cells.clone())
    }
}

impl TryFrom<LevelDefinition> for Level {
    type Error = LevelError;

    fn try_from(def: LevelDefinition) -> Result<Self, Self::Error> {
        if def.width == 0 || def.height == 0 {
            return Err(LevelError::EmptyGrid);
        }
        let too_large = LevelError::GridTooLarge {
            width: def.width,
            height: def.height,
        };
        if def.width > MAX_GRID_DIM || def.height > MAX_GRID_DIM {
            return Err(too_large);
        }
        let Some(expected) = def.width.checked_mul(def.height) else {
            return Err(too_large);
        };
        let cells = if def.cells.is_empty() {
            vec![CellKind::Open; expected]
        } else if def.cells.len() == expected {
            def.cells
        } else {
            return Err(LevelError::CellCountMismatch {
                expected,
                found: def.cells.len(),
            });
        };
        if def.time_limit.is_nan() || def.time_limit <= 0.0 {
            return Err(LevelError::NonPositiveTimeLimit(def.time_limit));
        }
        if def.passengers.is_empty() {
            return Err(LevelError::NoPassengers);
        }
        if def.vehicles.is_empty() {
            return Err(LevelError::NoVehicles);
        }
        if let Some(index) = def.vehicles.iter().position(|v| v.capacity == 0) {
            return Err(LevelError::ZeroCapacityVehicle { index });
        }

        let grid = LevelGrid::from_kinds(def.width, def.height, cells.clone());
        let mut seen = HashSet::new();
        for placement in &def.passengers {
            let coord = placement.coord;
            if !grid.is_valid(coord) {
                return Err(LevelError::PlacementOutOfBounds(coord));
            }
            if grid.is_void(coord) {
                return Err(LevelError::PlacementOnVoid(coord));
            }
            if !seen.insert(coord) {
                return Err(LevelError::DuplicatePlacement(coord));
            }
        }

        let colors: HashSet<PassengerColor> = def.passengers.iter().map(|p| p.color).collect();
        if let Some(vehicle) = def.vehicles.iter().find(|v| !colors.contains(&v.color)) {
            return Err(LevelError::UnmatchedVehicleColor(vehicle.color));
        }

        let bench_capacity = if def.bench_capacity == 0 {
            warn!(
                "level '{}' has a zero-seat bench, using {}",
                def.name, DEFAULT_BENCH_CAPACITY
            );
            DEFAULT_BENCH_CAPACITY
        } else {
            def.bench_capacity
        };

        Ok(Level {
            name: def.name,
            width: def.width,
            height: def.height,
            time_limit: def.time_limit,
            bench_capacity,
            cells,
            vehicles: def.vehicles,
            passengers: def.passengers,
        })
    }
}
