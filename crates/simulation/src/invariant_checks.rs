//! Runtime invariant guards for the play field.
//!
//! `check_play_field` is a read-only audit of occupancy, bench, vehicle and
//! membership invariants. `LevelSession::apply` runs it after every input in
//! debug builds; the `validate_level_invariants` system runs it whenever the
//! session changes and records what it finds.

use bevy::prelude::*;

use crate::field::PlayField;
use crate::grid::GridCoord;
use crate::passenger::{PassengerId, PassengerState};
use crate::session::LevelSession;
use crate::vehicles::VehicleId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A grid cell points at a passenger that does not claim to stand there.
    StrayOccupant { coord: GridCoord, passenger: PassengerId },
    OccupiedCountMismatch { cells: usize, on_grid: usize },
    BenchOverCapacity { len: usize, capacity: usize },
    BenchSlotMismatch { passenger: PassengerId, slot: Option<usize> },
    VehicleOverCapacity { vehicle: VehicleId },
    MultipleLoadingVehicles(usize),
    ActiveVehicleCount(usize),
    /// A passenger is in the wrong number of places for its state.
    Membership { passenger: PassengerId, places: usize },
}

/// Findings of the most recent validation pass, plus a running total.
#[derive(Resource, Default, Debug)]
pub struct InvariantViolations {
    pub last: Vec<InvariantViolation>,
    pub total: u64,
}

pub fn check_play_field(field: &PlayField) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let grid = field.grid();
    let roster = field.roster();
    let bench = field.bench();
    let vehicles = field.vehicles();

    // Occupancy
    for (coord, id) in grid.occupied_cells() {
        let stands_here = roster.get(id).is_some_and(|p| {
            p.coord == Some(coord)
                && matches!(p.state, PassengerState::OnGrid | PassengerState::Moving)
        });
        if !stands_here {
            violations.push(InvariantViolation::StrayOccupant {
                coord,
                passenger: id,
            });
        }
    }
    let on_grid = roster.count_in_state(PassengerState::OnGrid)
        + roster.count_in_state(PassengerState::Moving);
    if grid.occupied_count() != on_grid {
        violations.push(InvariantViolation::OccupiedCountMismatch {
            cells: grid.occupied_count(),
            on_grid,
        });
    }

    // Bench
    if bench.len() > bench.capacity() {
        violations.push(InvariantViolation::BenchOverCapacity {
            len: bench.len(),
            capacity: bench.capacity(),
        });
    }
    for p in roster.iter() {
        let expected = bench.slot_of(p.id);
        let consistent = match p.state {
            PassengerState::InQueue => expected.is_some() && p.bench_slot == expected,
            _ => expected.is_none() && p.bench_slot.is_none(),
        };
        if !consistent {
            violations.push(InvariantViolation::BenchSlotMismatch {
                passenger: p.id,
                slot: p.bench_slot,
            });
        }
    }

    // Vehicles
    for vehicle in vehicles.active() {
        if vehicle.boarded.len() as u32 > vehicle.capacity {
            violations.push(InvariantViolation::VehicleOverCapacity {
                vehicle: vehicle.id,
            });
        }
    }
    if vehicles.loading_count() > 1 {
        violations.push(InvariantViolation::MultipleLoadingVehicles(
            vehicles.loading_count(),
        ));
    }
    if !vehicles.is_exhausted() && vehicles.active().len() != 1 {
        violations.push(InvariantViolation::ActiveVehicleCount(
            vehicles.active().len(),
        ));
    }

    // Membership
    for p in roster.iter() {
        let on_grid = p
            .coord
            .is_some_and(|c| grid.occupant_at(c) == Some(p.id)) as usize;
        let on_bench = bench.slot_of(p.id).is_some() as usize;
        let on_vehicle = vehicles
            .active()
            .iter()
            .filter(|v| v.boarded.contains(&p.id))
            .count();
        let places = on_grid + on_bench + on_vehicle;
        let expected_places = match p.state {
            PassengerState::Removed => 0,
            PassengerState::OnGrid
            | PassengerState::Moving
            | PassengerState::InQueue
            | PassengerState::OnBus => 1,
        };
        let right_place = match p.state {
            PassengerState::OnGrid | PassengerState::Moving => on_grid == 1,
            PassengerState::InQueue => on_bench == 1,
            PassengerState::OnBus => on_vehicle == 1,
            PassengerState::Removed => true,
        };
        if places != expected_places || !right_place {
            violations.push(InvariantViolation::Membership {
                passenger: p.id,
                places,
            });
        }
    }

    violations
}

/// Audits the running level whenever the session changed this frame.
pub fn validate_level_invariants(
    session: Res<LevelSession>,
    mut violations: ResMut<InvariantViolations>,
) {
    if !session.is_changed() {
        return;
    }
    let Some(field) = session.field() else {
        return;
    };
    let found = check_play_field(field);
    for violation in &found {
        warn!("Invariant violation: {:?}", violation);
    }
    violations.total += found.len() as u64;
    violations.last = found;
}
