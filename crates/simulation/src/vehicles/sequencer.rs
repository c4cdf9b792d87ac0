use std::collections::VecDeque;

use bevy::prelude::*;

use crate::bench::Bench;
use crate::passenger::{PassengerColor, PassengerId};

use super::types::*;

// =============================================================================
// VehicleSequencer
// =============================================================================

/// Releases the level's vehicles in order and drives each one's lifecycle.
#[derive(Debug, Clone, Default)]
pub struct VehicleSequencer {
    pending: VecDeque<VehicleSpec>,
    active: Vec<Vehicle>,
    next_id: VehicleId,
    exhausted_signaled: bool,
}

impl VehicleSequencer {
    pub fn new(specs: &[VehicleSpec]) -> Self {
        Self {
            pending: specs.iter().copied().collect(),
            ..Default::default()
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.active.iter().find(|v| v.id == id)
    }

    fn vehicle_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.active.iter_mut().find(|v| v.id == id)
    }

    /// Vehicles in Approaching, Loading or Departing.
    pub fn active(&self) -> &[Vehicle] {
        &self.active
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn loading_count(&self) -> usize {
        self.active
            .iter()
            .filter(|v| v.state == VehicleState::Loading)
            .count()
    }

    /// The loading vehicle of `color` with a free seat, if any.
    pub fn loading_vehicle_of_color(&self, color: PassengerColor) -> Option<VehicleId> {
        self.active
            .iter()
            .find(|v| v.state == VehicleState::Loading && v.color == color && !v.is_full())
            .map(|v| v.id)
    }

    pub fn is_departing(&self, id: VehicleId) -> bool {
        self.vehicle(id)
            .is_some_and(|v| v.state == VehicleState::Departing)
    }

    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty() && self.active.is_empty()
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Releases the next queued vehicle in `Approaching`.
    pub fn spawn_next(&mut self) -> Option<Vehicle> {
        let spec = self.pending.pop_front()?;
        let vehicle = Vehicle {
            id: self.next_id,
            color: spec.color,
            capacity: spec.capacity,
            state: VehicleState::Approaching,
            boarded: Vec::with_capacity(spec.capacity as usize),
        };
        self.next_id += 1;
        debug!(
            "vehicle {} ({}, {} seats) spawned, {} still queued",
            vehicle.id,
            vehicle.color.name(),
            vehicle.capacity,
            self.pending.len()
        );
        self.active.push(vehicle.clone());
        Some(vehicle)
    }

    /// Approaching -> Loading, then pulls matching bench passengers aboard
    /// until full or the bench has none of this color left. A vehicle filled
    /// here moves straight on to `Departing`.
    pub fn complete_arrival(&mut self, id: VehicleId, bench: &mut Bench) -> Option<ArrivalReport> {
        let Some(vehicle) = self.vehicle_mut(id) else {
            warn!("arrival completed for unknown vehicle {}", id);
            return None;
        };
        if vehicle.state != VehicleState::Approaching {
            warn!(
                "arrival completed for vehicle {} while {:?}, ignoring",
                id, vehicle.state
            );
            return None;
        }

        vehicle.state = VehicleState::Loading;
        let mut loaded = Vec::new();
        while !vehicle.is_full() {
            let Some(dequeued) = bench.dequeue_by_color(vehicle.color) else {
                break;
            };
            vehicle.boarded.push(dequeued.passenger);
            loaded.push(dequeued);
        }

        let departing = vehicle.is_full();
        if departing {
            vehicle.state = VehicleState::Departing;
        }
        Some(ArrivalReport {
            vehicle: id,
            loaded,
            departing,
        })
    }

    /// Seats `passenger` on a loading vehicle. Filling the last seat starts
    /// departure.
    pub fn board(&mut self, id: VehicleId, passenger: PassengerId) -> bool {
        let Some(vehicle) = self.vehicle_mut(id) else {
            return false;
        };
        if vehicle.state != VehicleState::Loading || vehicle.is_full() {
            return false;
        }
        vehicle.boarded.push(passenger);
        if vehicle.is_full() {
            vehicle.state = VehicleState::Departing;
        }
        true
    }

    /// Loading -> Departing regardless of free seats.
    pub fn command_departure(&mut self, id: VehicleId) -> bool {
        match self.vehicle_mut(id) {
            Some(vehicle) if vehicle.state == VehicleState::Loading => {
                vehicle.state = VehicleState::Departing;
                true
            }
            Some(vehicle) => {
                warn!(
                    "departure commanded for vehicle {} while {:?}, ignoring",
                    id, vehicle.state
                );
                false
            }
            None => {
                warn!("departure commanded for unknown vehicle {}", id);
                false
            }
        }
    }

    /// Departing -> Gone. Releases the vehicle and spawns its successor.
    pub fn complete_departure(&mut self, id: VehicleId) -> Option<DepartureReport> {
        let Some(index) = self.active.iter().position(|v| v.id == id) else {
            warn!("departure completed for unknown vehicle {}", id);
            return None;
        };
        if self.active[index].state != VehicleState::Departing {
            warn!(
                "departure completed for vehicle {} while {:?}, ignoring",
                id, self.active[index].state
            );
            return None;
        }

        let mut vehicle = self.active.remove(index);
        vehicle.state = VehicleState::Gone;
        let spawned = self.spawn_next();

        let exhausted = self.is_exhausted() && !self.exhausted_signaled;
        if exhausted {
            self.exhausted_signaled = true;
        }

        Some(DepartureReport {
            vehicle,
            spawned,
            exhausted,
        })
    }
}
