//! The board a level is played on: grid, passengers, bench and vehicles.
//!
//! `PlayField` owns every piece of mutable level state and performs the
//! cascades that move passengers between them. Passenger-initiated moves live
//! in [`crate::movement`]; this file holds construction and the
//! vehicle-driven side (arrival loading, departure, removal).

use std::collections::BTreeSet;

use bevy::prelude::*;

use crate::bench::{Bench, Dequeued};
use crate::grid::LevelGrid;
use crate::level::Level;
use crate::passenger::{PassengerId, PassengerRoster, PassengerState};
use crate::signals::{GameSignal, Location};
use crate::vehicles::{Vehicle, VehicleId, VehicleSequencer};

#[derive(Debug, Clone, Default)]
pub struct PlayField {
    pub(crate) grid: LevelGrid,
    pub(crate) roster: PassengerRoster,
    pub(crate) bench: Bench,
    pub(crate) vehicles: VehicleSequencer,
    /// On-grid passengers that can still make progress toward the exit row.
    pub(crate) reachable: BTreeSet<PassengerId>,
}

impl PlayField {
    /// Places every passenger and releases the first vehicle.
    pub fn new(level: &Level, out: &mut Vec<GameSignal>) -> Self {
        let mut field = Self {
            grid: level.build_grid(),
            roster: PassengerRoster::default(),
            bench: Bench::new(level.bench_capacity()),
            vehicles: VehicleSequencer::new(level.vehicles()),
            reachable: BTreeSet::new(),
        };

        for placement in level.passengers() {
            let id = field.roster.spawn(placement.color, placement.coord);
            field.grid.set_occupied(placement.coord, Some(id));
            out.push(GameSignal::PassengerCreated {
                id,
                color: placement.color,
                coord: placement.coord,
            });
        }

        if let Some(vehicle) = field.vehicles.spawn_next() {
            out.push(spawned_signal(&vehicle));
        }

        field.recompute_reachability();
        field
    }

    pub fn grid(&self) -> &LevelGrid {
        &self.grid
    }

    pub fn roster(&self) -> &PassengerRoster {
        &self.roster
    }

    pub fn bench(&self) -> &Bench {
        &self.bench
    }

    pub fn vehicles(&self) -> &VehicleSequencer {
        &self.vehicles
    }

    // -------------------------------------------------------------------------
    // Vehicle-driven cascades
    // -------------------------------------------------------------------------

    /// Arrival finished: the vehicle starts loading and drains matching bench
    /// passengers. Returns `false` for stale notifications.
    pub fn complete_vehicle_arrival(&mut self, id: VehicleId, out: &mut Vec<GameSignal>) -> bool {
        let Some(report) = self.vehicles.complete_arrival(id, &mut self.bench) else {
            return false;
        };
        let Some(color) = self.vehicles.vehicle(id).map(|v| v.color) else {
            return false;
        };
        out.push(GameSignal::VehicleArrived { id, color });

        for dequeued in &report.loaded {
            self.seat_from_bench(id, dequeued, out);
        }
        if report.departing {
            self.announce_loaded(id, out);
        }
        true
    }

    fn seat_from_bench(&mut self, vehicle: VehicleId, dequeued: &Dequeued, out: &mut Vec<GameSignal>) {
        if let Some(p) = self.roster.get_mut(dequeued.passenger) {
            p.state = PassengerState::OnBus;
            p.bench_slot = None;
            out.push(GameSignal::PassengerMoved {
                id: p.id,
                color: p.color,
                from: Location::Bench(dequeued.vacated_slot),
                to: Location::Vehicle(vehicle),
            });
        }
        self.apply_bench_shifts(dequeued, out);
    }

    pub(crate) fn apply_bench_shifts(&mut self, dequeued: &Dequeued, out: &mut Vec<GameSignal>) {
        for shift in &dequeued.shifted {
            if let Some(p) = self.roster.get_mut(shift.passenger) {
                p.bench_slot = Some(shift.to);
                out.push(GameSignal::PassengerMoved {
                    id: p.id,
                    color: p.color,
                    from: Location::Bench(shift.from),
                    to: Location::Bench(shift.to),
                });
            }
        }
    }

    pub(crate) fn announce_loaded(&self, id: VehicleId, out: &mut Vec<GameSignal>) {
        if let Some(vehicle) = self.vehicles.vehicle(id) {
            debug!(
                "vehicle {} loaded with {}/{} passengers",
                id,
                vehicle.boarded.len(),
                vehicle.capacity
            );
            out.push(GameSignal::VehicleLoaded {
                id,
                color: vehicle.color,
                count: vehicle.boarded.len(),
            });
        }
    }

    /// External request to leave with free seats.
    pub fn command_departure(&mut self, id: VehicleId, out: &mut Vec<GameSignal>) -> bool {
        if !self.vehicles.command_departure(id) {
            return false;
        }
        self.announce_loaded(id, out);
        true
    }

    /// Departure finished: boarded passengers leave play and the next vehicle
    /// is released. Returns whether the whole sequence is now exhausted, or
    /// `None` for stale notifications.
    pub fn complete_vehicle_departure(
        &mut self,
        id: VehicleId,
        out: &mut Vec<GameSignal>,
    ) -> Option<bool> {
        let report = self.vehicles.complete_departure(id)?;

        for passenger in &report.vehicle.boarded {
            if let Some(p) = self.roster.get_mut(*passenger) {
                p.state = PassengerState::Removed;
                out.push(GameSignal::PassengerRemoved {
                    id: p.id,
                    color: p.color,
                    from: Location::Vehicle(id),
                });
            }
        }
        out.push(GameSignal::VehicleDeparted {
            id,
            color: report.vehicle.color,
        });
        if let Some(next) = &report.spawned {
            out.push(spawned_signal(next));
        }
        Some(report.exhausted)
    }
}

fn spawned_signal(vehicle: &Vehicle) -> GameSignal {
    GameSignal::VehicleSpawned {
        id: vehicle.id,
        color: vehicle.color,
        capacity: vehicle.capacity,
    }
}
