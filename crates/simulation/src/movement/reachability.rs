use std::collections::BTreeSet;

use crate::field::PlayField;
use crate::passenger::{PassengerId, PassengerState};
use crate::pathfinding_sys::has_path_to_exit_row;

impl PlayField {
    /// An on-grid passenger can progress if it has a route to the exit row,
    /// or already stands there without being boxed in.
    pub fn can_progress(&self, id: PassengerId) -> bool {
        let Some(passenger) = self.roster.get(id) else {
            return false;
        };
        if passenger.state != PassengerState::OnGrid {
            return false;
        }
        let Some(coord) = passenger.coord else {
            return false;
        };
        if coord.is_exit_row() {
            !self.grid.is_surrounded(coord)
        } else {
            has_path_to_exit_row(&self.grid, coord)
        }
    }

    /// Rebuilds the reachable set over all on-grid passengers. Read-only
    /// with respect to the board.
    pub(crate) fn recompute_reachability(&mut self) {
        let reachable: BTreeSet<PassengerId> = self
            .roster
            .iter()
            .filter(|p| p.state == PassengerState::OnGrid)
            .map(|p| p.id)
            .filter(|id| self.can_progress(*id))
            .collect();
        self.reachable = reachable;
    }

    pub fn is_reachable(&self, id: PassengerId) -> bool {
        self.reachable.contains(&id)
    }

    pub fn reachable(&self) -> impl Iterator<Item = PassengerId> + '_ {
        self.reachable.iter().copied()
    }
}
