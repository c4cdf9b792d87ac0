//! The reference scenarios for click resolution, pathing, bench failure,
//! vehicle sequencing and surrounded blocking.

use crate::grid::GridCoord;
use crate::movement::BlockReason;
use crate::passenger::PassengerColor::{Blue, Green, Red};
use crate::passenger::PassengerState;
use crate::pathfinding_sys::path_to_exit_row;
use crate::signals::{GameInput, GameSignal, Location};
use crate::test_harness::{LevelBuilder, TestLevel};
use crate::vehicles::VehicleState;
use crate::win_condition::{LevelOutcome, OutcomeTrigger};

// ===========================================================================
// A. Exit-row passenger with no loading vehicle takes a bench seat
// ===========================================================================

#[test]
fn exit_row_click_enqueues_on_bench() {
    let mut level = TestLevel::from_builder(
        LevelBuilder::new(3, 3)
            .passenger(Red, 1, 0)
            .vehicle(Red, 2)
            .bench(2),
    );
    assert_eq!(
        level.vehicle_in_state(VehicleState::Loading),
        None,
        "first vehicle is still approaching"
    );

    level.click(0);

    level.assert_passenger_state(0, PassengerState::InQueue);
    level.assert_bench_order(&[0]);
    level.assert_cell_open(1, 0);
    level.assert_invariants();
}

// ===========================================================================
// B. Shortest path from the back row
// ===========================================================================

#[test]
fn back_row_passenger_paths_straight_down() {
    let level = TestLevel::from_builder(
        LevelBuilder::new(3, 3)
            .passenger(Red, 1, 2)
            .vehicle(Red, 1),
    );
    assert_eq!(
        path_to_exit_row(level.field().grid(), GridCoord(1, 2)),
        vec![GridCoord(1, 1), GridCoord(1, 0)]
    );
}

#[test]
fn back_row_click_moves_passenger_to_exit_row() {
    let mut level = TestLevel::from_builder(
        LevelBuilder::new(3, 3)
            .passenger(Red, 1, 2)
            .vehicle(Red, 1),
    );
    level.take_signals();
    level.click(0);

    level.assert_passenger_state(0, PassengerState::Moving);
    level.assert_cell_holds(1, 0, 0);
    level.assert_cell_open(1, 2);
    assert!(level.signals().contains(&GameSignal::PassengerMoved {
        id: 0,
        color: Red,
        from: Location::Grid(GridCoord(1, 2)),
        to: Location::Grid(GridCoord(1, 0)),
    }));

    level.finish_move(0);
    level.assert_passenger_state(0, PassengerState::InQueue);
}

// ===========================================================================
// C. Full bench fails the level exactly once
// ===========================================================================

#[test]
fn full_bench_fails_level_once() {
    let mut level = TestLevel::from_builder(
        LevelBuilder::new(3, 1)
            .passenger(Blue, 0, 0)
            .passenger(Red, 2, 0)
            .vehicle(Red, 1)
            .bench(1),
    );
    level.click(0);
    level.assert_bench_order(&[0]);

    // Two clicks resolved in the same frame.
    level.send_all([GameInput::PassengerClicked(1), GameInput::PassengerClicked(1)]);

    level.assert_signal_count(1, |s| {
        matches!(
            s,
            GameSignal::PassengerBlocked {
                reason: BlockReason::BenchQueueFull,
                ..
            }
        )
    });
    level.assert_signal_count(1, |s| matches!(s, GameSignal::LevelFailed { .. }));
    level.assert_outcome(Some(LevelOutcome::Failed(OutcomeTrigger::BenchQueueFull)));
    level.assert_passenger_state(1, PassengerState::OnGrid);
}

// ===========================================================================
// D. Vehicle sequence: auto-depart, successor spawn, exhaustion
// ===========================================================================

#[test]
fn vehicle_sequence_runs_to_exhaustion() {
    let mut level = TestLevel::from_builder(
        LevelBuilder::new(3, 2)
            .passenger(Red, 0, 0)
            .passenger(Red, 2, 0)
            .passenger(Blue, 1, 1)
            .vehicle(Red, 2)
            .vehicle(Blue, 1),
    );

    level.arrive(0);
    assert_eq!(level.vehicle_in_state(VehicleState::Loading), Some(0));
    level.click(0).click(1);
    assert_eq!(level.vehicle(0).map(|v| v.state), Some(VehicleState::Departing));
    level.assert_signal_count(1, |s| {
        matches!(s, GameSignal::VehicleLoaded { id: 0, count: 2, .. })
    });

    level.depart(0);
    level.assert_passenger_state(0, PassengerState::Removed);
    level.assert_passenger_state(1, PassengerState::Removed);
    assert_eq!(level.vehicle_in_state(VehicleState::Approaching), Some(1));
    assert!(level.signals().contains(&GameSignal::VehicleSpawned {
        id: 1,
        color: Blue,
        capacity: 1
    }));

    level.arrive(1);
    level.click_through(2);
    level.assert_passenger_state(2, PassengerState::OnBus);
    level.depart(1);

    level.assert_signal_count(1, |s| *s == GameSignal::AllVehiclesCompleted);
    level.assert_signal_count(1, |s| s.is_terminal());
    level.assert_outcome(Some(LevelOutcome::Completed(
        OutcomeTrigger::AllPassengersRemoved,
    )));
    assert!(level.field().vehicles().is_exhausted());
}

#[test]
fn running_out_of_vehicles_completes_level_with_passengers_left() {
    let mut level = TestLevel::from_builder(
        LevelBuilder::new(3, 1)
            .passenger(Red, 0, 0)
            .passenger(Green, 2, 0)
            .vehicle(Red, 1),
    );
    level.arrive(0).click(0).depart(0);
    level.assert_outcome(Some(LevelOutcome::Completed(
        OutcomeTrigger::AllVehiclesCompleted,
    )));
    level.assert_passenger_state(1, PassengerState::OnGrid);
    level.assert_signal_count(0, |s| *s == GameSignal::AllPassengersRemoved);
}

// ===========================================================================
// E. Surrounded exit-row passenger
// ===========================================================================

#[test]
fn surrounded_exit_row_passenger_is_blocked() {
    let mut level = TestLevel::from_builder(
        LevelBuilder::new(3, 2)
            .passenger(Red, 1, 0)
            .passenger(Blue, 0, 0)
            .passenger(Blue, 2, 0)
            .passenger(Green, 1, 1)
            .vehicle(Red, 1),
    );
    level.arrive(0);
    level.take_signals();

    level.click(0);

    level.assert_passenger_state(0, PassengerState::OnGrid);
    level.assert_cell_holds(1, 0, 0);
    assert!(level.bench().is_empty());
    assert_eq!(level.vehicle(0).map(|v| v.boarded.len()), Some(0));
    assert_eq!(
        level.signals(),
        &[GameSignal::PassengerBlocked {
            id: 0,
            reason: BlockReason::SurroundedByPassengers
        }]
    );
    level.assert_outcome(None);
}
