//! Data types for vehicles and sequencer reports.

use serde::{Deserialize, Serialize};

use crate::bench::Dequeued;
use crate::config::DEFAULT_VEHICLE_CAPACITY;
use crate::passenger::{PassengerColor, PassengerId};

pub type VehicleId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleState {
    Approaching,
    Loading,
    Departing,
    Gone,
}

/// One entry of a level's vehicle queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub color: PassengerColor,
    #[serde(default = "default_capacity")]
    pub capacity: u32,
}

fn default_capacity() -> u32 {
    DEFAULT_VEHICLE_CAPACITY
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub color: PassengerColor,
    pub capacity: u32,
    pub state: VehicleState,
    /// Boarding order.
    pub boarded: Vec<PassengerId>,
}

impl Vehicle {
    pub fn is_full(&self) -> bool {
        self.boarded.len() as u32 >= self.capacity
    }

    pub fn remaining_seats(&self) -> u32 {
        self.capacity.saturating_sub(self.boarded.len() as u32)
    }
}

/// What happened when a vehicle finished arriving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalReport {
    pub vehicle: VehicleId,
    /// Bench passengers pulled aboard, in boarding order, each with the
    /// compaction it caused.
    pub loaded: Vec<Dequeued>,
    /// The bench filled every seat and the vehicle is already departing.
    pub departing: bool,
}

/// What happened when a vehicle finished departing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureReport {
    /// The vehicle as it left, in state `Gone`.
    pub vehicle: Vehicle,
    /// Next vehicle released from the queue, if any.
    pub spawned: Option<Vehicle>,
    /// Set on the single departure that emptied the whole sequence.
    pub exhausted: bool,
}
