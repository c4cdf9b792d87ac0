use bevy::prelude::*;
use serde::Serialize;

use crate::field::PlayField;
use crate::grid::GridCoord;
use crate::passenger::{PassengerId, PassengerState};
use crate::pathfinding_sys::path_to_exit_row;
use crate::signals::{GameSignal, Location};
use crate::vehicles::VehicleId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    /// Every orthogonal neighbor is occupied or void. Recoverable.
    SurroundedByPassengers,
    /// No vehicle seat and no bench slot. Ends the level.
    BenchQueueFull,
    /// Off the exit row with no open route to it. Recoverable.
    NoPathToExit,
}

impl BlockReason {
    pub fn is_fatal(self) -> bool {
        self == BlockReason::BenchQueueFull
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Unknown passenger, mid-move, or no longer on the grid.
    Ignored,
    MovingToExit { path: Vec<GridCoord> },
    Boarded { vehicle: VehicleId },
    Benched { slot: usize },
    Blocked(BlockReason),
}

impl PlayField {
    pub fn click(&mut self, id: PassengerId, out: &mut Vec<GameSignal>) -> ClickOutcome {
        let Some(passenger) = self.roster.get(id) else {
            warn!("click on unknown passenger {}", id);
            return ClickOutcome::Ignored;
        };
        if passenger.state != PassengerState::OnGrid {
            debug!("click on passenger {} ignored while {:?}", id, passenger.state);
            return ClickOutcome::Ignored;
        }
        let Some(coord) = passenger.coord else {
            return ClickOutcome::Ignored;
        };

        if coord.is_exit_row() {
            return self.resolve_exit_row(id, out);
        }

        let path = path_to_exit_row(&self.grid, coord);
        let Some(&destination) = path.last() else {
            out.push(GameSignal::PassengerBlocked {
                id,
                reason: BlockReason::NoPathToExit,
            });
            return ClickOutcome::Blocked(BlockReason::NoPathToExit);
        };
        self.begin_move(id, coord, destination, out);
        ClickOutcome::MovingToExit { path }
    }

    /// Vacates `from`, claims `to` and marks the passenger `Moving`.
    pub(crate) fn begin_move(
        &mut self,
        id: PassengerId,
        from: GridCoord,
        to: GridCoord,
        out: &mut Vec<GameSignal>,
    ) {
        let Some(passenger) = self.roster.get_mut(id) else {
            return;
        };
        self.grid.set_occupied(from, None);
        self.grid.set_occupied(to, Some(id));
        passenger.coord = Some(to);
        passenger.state = PassengerState::Moving;
        out.push(GameSignal::CellStateChanged {
            coord: from,
            is_open: true,
        });
        out.push(GameSignal::CellStateChanged {
            coord: to,
            is_open: false,
        });
        out.push(GameSignal::PassengerMoved {
            id,
            color: passenger.color,
            from: Location::Grid(from),
            to: Location::Grid(to),
        });
        self.recompute_reachability();
    }

    /// Move animation finished. Passengers that landed on the exit row carry
    /// on with the placement steps; others just settle. Returns `None` when
    /// nothing beyond settling happened or the notification was stale.
    pub fn complete_move(&mut self, id: PassengerId, out: &mut Vec<GameSignal>) -> Option<ClickOutcome> {
        let Some(passenger) = self.roster.get_mut(id) else {
            warn!("move completed for unknown passenger {}", id);
            return None;
        };
        if passenger.state != PassengerState::Moving {
            warn!(
                "move completed for passenger {} while {:?}, ignoring",
                id, passenger.state
            );
            return None;
        }
        passenger.state = PassengerState::OnGrid;

        if passenger.coord.is_some_and(GridCoord::is_exit_row) {
            Some(self.resolve_exit_row(id, out))
        } else {
            self.recompute_reachability();
            None
        }
    }

    /// Placement steps for an exit-row passenger: surrounded check, vehicle,
    /// bench, then bench-full failure.
    pub(crate) fn resolve_exit_row(&mut self, id: PassengerId, out: &mut Vec<GameSignal>) -> ClickOutcome {
        let Some((color, coord)) = self
            .roster
            .get(id)
            .and_then(|p| p.coord.map(|c| (p.color, c)))
        else {
            return ClickOutcome::Ignored;
        };

        if self.grid.is_surrounded(coord) {
            out.push(GameSignal::PassengerBlocked {
                id,
                reason: BlockReason::SurroundedByPassengers,
            });
            return ClickOutcome::Blocked(BlockReason::SurroundedByPassengers);
        }

        if let Some(vehicle) = self.vehicles.loading_vehicle_of_color(color) {
            if self.vehicles.board(vehicle, id) {
                self.leave_grid(id, coord, PassengerState::OnBus, None);
                out.push(GameSignal::CellStateChanged {
                    coord,
                    is_open: true,
                });
                out.push(GameSignal::PassengerMoved {
                    id,
                    color,
                    from: Location::Grid(coord),
                    to: Location::Vehicle(vehicle),
                });
                if self.vehicles.is_departing(vehicle) {
                    self.announce_loaded(vehicle, out);
                }
                self.recompute_reachability();
                return ClickOutcome::Boarded { vehicle };
            }
        }

        if let Ok(slot) = self.bench.enqueue(id, color) {
            self.leave_grid(id, coord, PassengerState::InQueue, Some(slot));
            out.push(GameSignal::CellStateChanged {
                coord,
                is_open: true,
            });
            out.push(GameSignal::PassengerMoved {
                id,
                color,
                from: Location::Grid(coord),
                to: Location::Bench(slot),
            });
            self.recompute_reachability();
            return ClickOutcome::Benched { slot };
        }

        out.push(GameSignal::PassengerBlocked {
            id,
            reason: BlockReason::BenchQueueFull,
        });
        ClickOutcome::Blocked(BlockReason::BenchQueueFull)
    }

    fn leave_grid(
        &mut self,
        id: PassengerId,
        coord: GridCoord,
        state: PassengerState,
        bench_slot: Option<usize>,
    ) {
        self.grid.set_occupied(coord, None);
        if let Some(p) = self.roster.get_mut(id) {
            p.coord = None;
            p.state = state;
            p.bench_slot = bench_slot;
        }
    }
}
