//! Fluent level construction for tests.

use crate::grid::{CellKind, GridCoord};
use crate::level::{Level, LevelDefinition, PassengerPlacement};
use crate::passenger::PassengerColor;
use crate::vehicles::VehicleSpec;

/// Builds a [`LevelDefinition`] in code. Panics on invalid levels, which is
/// what a test wants.
#[derive(Debug, Clone)]
pub struct LevelBuilder {
    definition: LevelDefinition,
}

impl LevelBuilder {
    /// An all-open `width` x `height` grid, bench of 5, 60 second countdown.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            definition: LevelDefinition {
                name: "test level".to_string(),
                width,
                height,
                time_limit: 60.0,
                bench_capacity: 5,
                cells: vec![CellKind::Open; width * height],
                vehicles: Vec::new(),
                passengers: Vec::new(),
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.definition.name = name.to_string();
        self
    }

    pub fn void(mut self, x: i32, y: i32) -> Self {
        let index = y as usize * self.definition.width + x as usize;
        self.definition.cells[index] = CellKind::Void;
        self
    }

    pub fn passenger(mut self, color: PassengerColor, x: i32, y: i32) -> Self {
        self.definition.passengers.push(PassengerPlacement {
            color,
            coord: GridCoord(x, y),
        });
        self
    }

    pub fn vehicle(mut self, color: PassengerColor, capacity: u32) -> Self {
        self.definition
            .vehicles
            .push(VehicleSpec { color, capacity });
        self
    }

    pub fn bench(mut self, capacity: usize) -> Self {
        self.definition.bench_capacity = capacity;
        self
    }

    pub fn time_limit(mut self, seconds: f32) -> Self {
        self.definition.time_limit = seconds;
        self
    }

    pub fn definition(&self) -> &LevelDefinition {
        &self.definition
    }

    pub fn build(self) -> Level {
        match Level::try_from(self.definition) {
            Ok(level) => level,
            Err(e) => panic!("test level is invalid: {e}"),
        }
    }
}
