//! Passenger tokens and the per-level roster that owns them.

use serde::{Deserialize, Serialize};

use crate::grid::GridCoord;

pub type PassengerId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassengerColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl PassengerColor {
    pub const ALL: [PassengerColor; 6] = [
        PassengerColor::Red,
        PassengerColor::Blue,
        PassengerColor::Green,
        PassengerColor::Yellow,
        PassengerColor::Purple,
        PassengerColor::Orange,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PassengerColor::Red => "Red",
            PassengerColor::Blue => "Blue",
            PassengerColor::Green => "Green",
            PassengerColor::Yellow => "Yellow",
            PassengerColor::Purple => "Purple",
            PassengerColor::Orange => "Orange",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassengerState {
    OnGrid,
    /// Mid-transition; further clicks on this passenger are ignored until
    /// the move completes.
    Moving,
    InQueue,
    OnBus,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Passenger {
    pub id: PassengerId,
    pub color: PassengerColor,
    /// Only `Some` while the passenger is on the grid (including `Moving`).
    pub coord: Option<GridCoord>,
    pub state: PassengerState,
    /// Only `Some` while `InQueue`.
    pub bench_slot: Option<usize>,
}

impl Passenger {
    /// Still counts toward the level: on the grid, on the bench or aboard a
    /// vehicle that has not left yet.
    pub fn is_remaining(&self) -> bool {
        self.state != PassengerState::Removed
    }
}

/// All passengers of the running level. Ids are dense indices into the roster.
#[derive(Debug, Clone, Default)]
pub struct PassengerRoster {
    passengers: Vec<Passenger>,
}

impl PassengerRoster {
    pub fn spawn(&mut self, color: PassengerColor, coord: GridCoord) -> PassengerId {
        let id = self.passengers.len() as PassengerId;
        self.passengers.push(Passenger {
            id,
            color,
            coord: Some(coord),
            state: PassengerState::OnGrid,
            bench_slot: None,
        });
        id
    }

    pub fn get(&self, id: PassengerId) -> Option<&Passenger> {
        self.passengers.get(id as usize)
    }

    pub fn get_mut(&mut self, id: PassengerId) -> Option<&mut Passenger> {
        self.passengers.get_mut(id as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Passenger> {
        self.passengers.iter()
    }

    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.passengers.iter().filter(|p| p.is_remaining()).count()
    }

    pub fn count_in_state(&self, state: PassengerState) -> usize {
        self.passengers.iter().filter(|p| p.state == state).count()
    }
}
