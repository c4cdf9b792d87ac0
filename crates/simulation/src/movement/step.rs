use bevy::prelude::*;

use crate::field::PlayField;
use crate::grid::GridCoord;
use crate::passenger::{PassengerId, PassengerState};
use crate::signals::GameSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moving,
    /// Unknown passenger, mid-move, or not on the grid.
    Ignored,
    NotAdjacent,
    /// Target is outside the grid, void or occupied.
    TargetUnavailable,
}

impl PlayField {
    /// Moves an idle on-grid passenger one cell to an orthogonally adjacent
    /// open cell. Completion goes through [`PlayField::complete_move`] like
    /// any other move.
    pub fn step(&mut self, id: PassengerId, target: GridCoord, out: &mut Vec<GameSignal>) -> StepOutcome {
        let Some(from) = self
            .roster
            .get(id)
            .filter(|p| p.state == PassengerState::OnGrid)
            .and_then(|p| p.coord)
        else {
            debug!("step for passenger {} ignored", id);
            return StepOutcome::Ignored;
        };
        if !self.grid.is_valid(target) {
            return StepOutcome::TargetUnavailable;
        }
        if from.manhattan_distance(target) != 1 {
            return StepOutcome::NotAdjacent;
        }
        if !self.grid.is_open(target) {
            return StepOutcome::TargetUnavailable;
        }
        self.begin_move(id, from, target, out);
        StepOutcome::Moving
    }
}
