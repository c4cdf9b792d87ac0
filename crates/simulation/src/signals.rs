//! Input and output event vocabularies of the puzzle core.
//!
//! Everything that can happen to a level arrives as a [`GameInput`] and
//! everything a presentation layer needs to react to leaves as a
//! [`GameSignal`]. One input is fully resolved, cascades included, before the
//! next is read, and its signals are emitted in the order they occurred.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::grid::GridCoord;
use crate::level::Level;
use crate::movement::BlockReason;
use crate::passenger::{PassengerColor, PassengerId};
use crate::vehicles::VehicleId;
use crate::win_condition::OutcomeTrigger;

// =============================================================================
// Inputs
// =============================================================================

/// Which externally timed transition just finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "id", rename_all = "snake_case")]
pub enum AnimationPhase {
    PassengerMove(PassengerId),
    VehicleArrival(VehicleId),
    VehicleDeparture(VehicleId),
}

#[derive(Event, Debug, Clone)]
pub enum GameInput {
    /// Replaces any loaded pack with this single level.
    LoadLevel(Box<Level>),
    /// Replaces any loaded pack and starts its first level. Ignored when empty.
    LoadPack(Vec<Level>),
    RestartLevel,
    NextLevel,
    PreviousLevel,
    PassengerClicked(PassengerId),
    /// Resolved to the passenger standing on `coord`, if any.
    GridCellClicked(GridCoord),
    /// Move one cell to an adjacent open cell.
    StepRequested {
        passenger: PassengerId,
        target: GridCoord,
    },
    AnimationCompleted(AnimationPhase),
    DepartureCommanded(VehicleId),
    TimerTick(f32),
    PauseRequested,
    ResumeRequested,
}

// =============================================================================
// Outputs
// =============================================================================

/// Where a passenger token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Grid(GridCoord),
    Bench(usize),
    Vehicle(VehicleId),
}

#[derive(Event, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum GameSignal {
    LevelStarted {
        name: String,
        width: usize,
        height: usize,
        time_limit: f32,
        bench_capacity: usize,
    },
    PassengerCreated {
        id: PassengerId,
        color: PassengerColor,
        coord: GridCoord,
    },
    PassengerMoved {
        id: PassengerId,
        color: PassengerColor,
        from: Location,
        to: Location,
    },
    PassengerRemoved {
        id: PassengerId,
        color: PassengerColor,
        from: Location,
    },
    /// A click that changed nothing.
    PassengerBlocked {
        id: PassengerId,
        reason: BlockReason,
    },
    VehicleSpawned {
        id: VehicleId,
        color: PassengerColor,
        capacity: u32,
    },
    VehicleArrived {
        id: VehicleId,
        color: PassengerColor,
    },
    /// Boarding finished; `count` passengers are aboard.
    VehicleLoaded {
        id: VehicleId,
        color: PassengerColor,
        count: usize,
    },
    VehicleDeparted {
        id: VehicleId,
        color: PassengerColor,
    },
    AllVehiclesCompleted,
    AllPassengersRemoved,
    CellStateChanged {
        coord: GridCoord,
        is_open: bool,
    },
    TimerUpdated {
        remaining: f32,
        total: f32,
    },
    TimerPaused {
        remaining: f32,
        total: f32,
    },
    TimerResumed {
        remaining: f32,
        total: f32,
    },
    TimerExpired,
    LevelCompleted {
        reason: OutcomeTrigger,
    },
    LevelFailed {
        reason: OutcomeTrigger,
    },
    /// The pack cursor moved. Precedes the `LevelStarted` of the new level.
    LevelChanged {
        previous: Option<usize>,
        index: usize,
        count: usize,
    },
    /// Follows `LevelCompleted` when the pack has a level after this one.
    NextLevelAvailable {
        index: usize,
    },
    /// Follows `LevelCompleted` on the last level of the pack.
    AllLevelsCompleted,
}

impl GameSignal {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GameSignal::LevelCompleted { .. } | GameSignal::LevelFailed { .. }
        )
    }

    /// Pack progress announced right after a `LevelCompleted`.
    pub fn is_pack_progress(&self) -> bool {
        matches!(
            self,
            GameSignal::NextLevelAvailable { .. } | GameSignal::AllLevelsCompleted
        )
    }
}
