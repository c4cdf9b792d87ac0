//! Assertion helpers for `TestLevel` integration tests.

use crate::grid::GridCoord;
use crate::invariant_checks::check_play_field;
use crate::passenger::{PassengerId, PassengerState};
use crate::signals::GameSignal;
use crate::win_condition::LevelOutcome;

use super::TestLevel;

impl TestLevel {
    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    pub fn assert_passenger_state(&self, id: PassengerId, expected: PassengerState) {
        let state = self.passenger_state(id);
        assert_eq!(
            state,
            Some(expected),
            "Expected passenger {id} to be {expected:?}, found {state:?}"
        );
    }

    pub fn assert_cell_open(&self, x: i32, y: i32) {
        assert!(
            self.field().grid().is_open(GridCoord(x, y)),
            "Expected ({x}, {y}) to be open, occupant {:?}",
            self.passenger_at(x, y)
        );
    }

    pub fn assert_cell_holds(&self, x: i32, y: i32, id: PassengerId) {
        assert_eq!(
            self.passenger_at(x, y),
            Some(id),
            "Expected passenger {id} at ({x}, {y})"
        );
    }

    pub fn assert_bench_order(&self, expected: &[PassengerId]) {
        let order = self.bench_order();
        assert_eq!(order, expected, "Unexpected bench order");
        for (slot, id) in order.iter().enumerate() {
            let recorded = self.passenger(*id).and_then(|p| p.bench_slot);
            assert_eq!(
                recorded,
                Some(slot),
                "Passenger {id} should record bench slot {slot}"
            );
        }
    }

    pub fn assert_outcome(&self, expected: Option<LevelOutcome>) {
        assert_eq!(self.outcome(), expected, "Unexpected level outcome");
    }

    /// Assert exactly `n` recorded signals match `pred`.
    pub fn assert_signal_count(&self, n: usize, pred: impl Fn(&GameSignal) -> bool) {
        let count = self.count_signals(pred);
        assert_eq!(count, n, "Expected {n} matching signals, got {count}");
    }

    pub fn assert_invariants(&self) {
        let violations = check_play_field(self.field());
        assert!(
            violations.is_empty(),
            "Invariant violations: {violations:?}"
        );
    }
}
