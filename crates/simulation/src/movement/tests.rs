//! Unit tests for click resolution, stepping and reachability.

#[cfg(test)]
mod tests {
    use crate::field::PlayField;
    use crate::grid::GridCoord;
    use crate::movement::{BlockReason, ClickOutcome, StepOutcome};
    use crate::passenger::PassengerColor::{Blue, Green, Red};
    use crate::passenger::PassengerState;
    use crate::signals::{GameSignal, Location};
    use crate::test_harness::LevelBuilder;

    fn field(builder: LevelBuilder) -> PlayField {
        PlayField::new(&builder.build(), &mut Vec::new())
    }

    #[test]
    fn test_exit_row_click_without_vehicle_goes_to_bench() {
        let mut f = field(
            LevelBuilder::new(3, 3)
                .passenger(Red, 1, 0)
                .vehicle(Red, 2)
                .bench(2),
        );
        let mut out = Vec::new();
        assert_eq!(f.click(0, &mut out), ClickOutcome::Benched { slot: 0 });

        let p = f.roster().get(0).unwrap();
        assert_eq!(p.state, PassengerState::InQueue);
        assert_eq!(p.bench_slot, Some(0));
        assert!(f.grid().is_open(GridCoord(1, 0)));
        assert!(out.contains(&GameSignal::PassengerMoved {
            id: 0,
            color: Red,
            from: Location::Grid(GridCoord(1, 0)),
            to: Location::Bench(0),
        }));
    }

    #[test]
    fn test_back_row_click_commits_whole_path() {
        let mut f = field(LevelBuilder::new(3, 3).passenger(Red, 1, 2).vehicle(Red, 1));
        let mut out = Vec::new();
        let outcome = f.click(0, &mut out);
        assert_eq!(
            outcome,
            ClickOutcome::MovingToExit {
                path: vec![GridCoord(1, 1), GridCoord(1, 0)]
            }
        );
        assert_eq!(f.roster().get(0).unwrap().state, PassengerState::Moving);
        assert!(f.grid().is_open(GridCoord(1, 2)));
        assert!(f.grid().is_open(GridCoord(1, 1)), "intermediate cells stay open");
        assert_eq!(f.grid().occupant_at(GridCoord(1, 0)), Some(0));
    }

    #[test]
    fn test_click_while_moving_is_ignored() {
        let mut f = field(LevelBuilder::new(3, 3).passenger(Red, 1, 2).vehicle(Red, 1));
        let mut out = Vec::new();
        f.click(0, &mut out);
        out.clear();
        assert_eq!(f.click(0, &mut out), ClickOutcome::Ignored);
        assert!(out.is_empty());
    }

    #[test]
    fn test_move_completion_on_exit_row_resolves_placement() {
        let mut f = field(LevelBuilder::new(3, 3).passenger(Red, 1, 2).vehicle(Red, 1));
        let mut out = Vec::new();
        f.click(0, &mut out);
        assert_eq!(
            f.complete_move(0, &mut out),
            Some(ClickOutcome::Benched { slot: 0 })
        );
        assert_eq!(f.roster().get(0).unwrap().state, PassengerState::InQueue);
        assert_eq!(f.grid().occupied_count(), 0);
    }

    #[test]
    fn test_stale_move_completion_is_ignored() {
        let mut f = field(LevelBuilder::new(3, 3).passenger(Red, 1, 2).vehicle(Red, 1));
        let mut out = Vec::new();
        assert_eq!(f.complete_move(0, &mut out), None);
        assert_eq!(f.complete_move(42, &mut out), None);
        assert_eq!(f.roster().get(0).unwrap().state, PassengerState::OnGrid);
    }

    #[test]
    fn test_no_path_leaves_passenger_unchanged() {
        // Row 0 is full, so (1,1) cannot reach it.
        let mut f = field(
            LevelBuilder::new(3, 2)
                .passenger(Red, 0, 0)
                .passenger(Blue, 1, 0)
                .passenger(Green, 2, 0)
                .passenger(Red, 1, 1)
                .vehicle(Red, 1),
        );
        let mut out = Vec::new();
        assert_eq!(
            f.click(3, &mut out),
            ClickOutcome::Blocked(BlockReason::NoPathToExit)
        );
        assert_eq!(f.roster().get(3).unwrap().state, PassengerState::OnGrid);
        assert_eq!(
            out,
            vec![GameSignal::PassengerBlocked {
                id: 3,
                reason: BlockReason::NoPathToExit
            }]
        );
    }

    #[test]
    fn test_surrounded_exit_row_passenger_is_blocked() {
        let mut f = field(
            LevelBuilder::new(3, 2)
                .passenger(Red, 1, 0)
                .passenger(Blue, 0, 0)
                .passenger(Blue, 2, 0)
                .passenger(Green, 1, 1)
                .vehicle(Red, 1)
                .bench(3),
        );
        let mut out = Vec::new();
        assert_eq!(
            f.click(0, &mut out),
            ClickOutcome::Blocked(BlockReason::SurroundedByPassengers)
        );
        assert_eq!(f.roster().get(0).unwrap().state, PassengerState::OnGrid);
        assert!(f.bench().is_empty());
        assert!(!BlockReason::SurroundedByPassengers.is_fatal());
    }

    #[test]
    fn test_void_neighbors_count_as_blocking() {
        let mut f = field(
            LevelBuilder::new(3, 2)
                .void(0, 0)
                .void(2, 0)
                .void(1, 1)
                .passenger(Red, 1, 0)
                .vehicle(Red, 1),
        );
        let mut out = Vec::new();
        assert_eq!(
            f.click(0, &mut out),
            ClickOutcome::Blocked(BlockReason::SurroundedByPassengers)
        );
    }

    #[test]
    fn test_boards_loading_vehicle_of_matching_color() {
        let mut f = field(
            LevelBuilder::new(3, 1)
                .passenger(Red, 0, 0)
                .passenger(Red, 2, 0)
                .vehicle(Red, 2),
        );
        let mut out = Vec::new();
        assert!(f.complete_vehicle_arrival(0, &mut out));
        out.clear();

        assert_eq!(f.click(0, &mut out), ClickOutcome::Boarded { vehicle: 0 });
        assert_eq!(f.roster().get(0).unwrap().state, PassengerState::OnBus);
        assert!(!out
            .iter()
            .any(|s| matches!(s, GameSignal::VehicleLoaded { .. })));

        assert_eq!(f.click(1, &mut out), ClickOutcome::Boarded { vehicle: 0 });
        assert!(out.contains(&GameSignal::VehicleLoaded {
            id: 0,
            color: Red,
            count: 2
        }));
        assert!(f.vehicles().is_departing(0));
    }

    #[test]
    fn test_mismatched_color_goes_to_bench_while_vehicle_loads() {
        let mut f = field(
            LevelBuilder::new(3, 1)
                .passenger(Red, 0, 0)
                .passenger(Blue, 2, 0)
                .vehicle(Red, 2)
                .vehicle(Blue, 1),
        );
        let mut out = Vec::new();
        f.complete_vehicle_arrival(0, &mut out);
        assert_eq!(f.click(1, &mut out), ClickOutcome::Benched { slot: 0 });
    }

    #[test]
    fn test_full_bench_blocks_with_fatal_reason() {
        let mut f = field(
            LevelBuilder::new(3, 1)
                .passenger(Red, 0, 0)
                .passenger(Blue, 2, 0)
                .vehicle(Red, 1)
                .vehicle(Blue, 1)
                .bench(1),
        );
        let mut out = Vec::new();
        assert_eq!(f.click(1, &mut out), ClickOutcome::Benched { slot: 0 });
        let outcome = f.click(0, &mut out);
        assert_eq!(outcome, ClickOutcome::Blocked(BlockReason::BenchQueueFull));
        assert!(BlockReason::BenchQueueFull.is_fatal());
        assert_eq!(f.roster().get(0).unwrap().state, PassengerState::OnGrid);
    }

    #[test]
    fn test_step_moves_one_cell() {
        let mut f = field(LevelBuilder::new(3, 3).passenger(Red, 1, 2).vehicle(Red, 1));
        let mut out = Vec::new();
        assert_eq!(f.step(0, GridCoord(0, 2), &mut out), StepOutcome::Moving);
        assert_eq!(f.grid().occupant_at(GridCoord(0, 2)), Some(0));
        assert_eq!(f.complete_move(0, &mut out), None);
        assert_eq!(f.roster().get(0).unwrap().state, PassengerState::OnGrid);
    }

    #[test]
    fn test_step_rejections() {
        let mut f = field(
            LevelBuilder::new(3, 3)
                .void(0, 1)
                .passenger(Red, 0, 2)
                .passenger(Red, 1, 2)
                .vehicle(Red, 2),
        );
        let mut out = Vec::new();
        assert_eq!(f.step(0, GridCoord(2, 2), &mut out), StepOutcome::NotAdjacent);
        assert_eq!(f.step(0, GridCoord(1, 1), &mut out), StepOutcome::NotAdjacent);
        assert_eq!(
            f.step(0, GridCoord(1, 2), &mut out),
            StepOutcome::TargetUnavailable
        );
        assert_eq!(
            f.step(0, GridCoord(0, 1), &mut out),
            StepOutcome::TargetUnavailable
        );
        assert_eq!(
            f.step(0, GridCoord(0, 3), &mut out),
            StepOutcome::TargetUnavailable
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_step_to_extreme_coordinates_is_rejected() {
        let mut f = field(LevelBuilder::new(3, 3).passenger(Red, 0, 2).vehicle(Red, 2));
        let mut out = Vec::new();
        for target in [
            GridCoord(i32::MIN, 2),
            GridCoord(i32::MAX, 2),
            GridCoord(0, i32::MIN),
            GridCoord(i32::MIN, i32::MIN),
        ] {
            assert_eq!(f.step(0, target, &mut out), StepOutcome::TargetUnavailable);
        }
        assert!(out.is_empty());
        assert_eq!(f.roster().get(0).map(|p| p.state), Some(PassengerState::OnGrid));
    }

    #[test]
    fn test_step_onto_exit_row_continues_placement() {
        let mut f = field(LevelBuilder::new(2, 2).passenger(Red, 0, 1).vehicle(Red, 1));
        let mut out = Vec::new();
        f.complete_vehicle_arrival(0, &mut out);
        assert_eq!(f.step(0, GridCoord(0, 0), &mut out), StepOutcome::Moving);
        assert_eq!(
            f.complete_move(0, &mut out),
            Some(ClickOutcome::Boarded { vehicle: 0 })
        );
    }

    #[test]
    fn test_reachability_tracks_blocked_passengers() {
        let f = field(
            LevelBuilder::new(3, 2)
                .passenger(Red, 0, 0)
                .passenger(Blue, 1, 0)
                .passenger(Green, 2, 0)
                .passenger(Red, 1, 1)
                .vehicle(Red, 1),
        );
        assert!(f.is_reachable(0), "corner exit-row passenger has a free neighbor");
        assert!(!f.is_reachable(1), "middle exit-row passenger is boxed in");
        assert!(!f.is_reachable(3), "back-row passenger has no route");
        let reachable: Vec<_> = f.reachable().collect();
        assert_eq!(reachable, vec![0, 2]);
    }

    #[test]
    fn test_reachability_recomputed_after_placement() {
        let mut f = field(
            LevelBuilder::new(3, 2)
                .passenger(Red, 0, 0)
                .passenger(Blue, 1, 0)
                .passenger(Green, 2, 0)
                .passenger(Red, 1, 1)
                .vehicle(Red, 1),
        );
        let mut out = Vec::new();
        assert_eq!(f.click(1, &mut out), ClickOutcome::Blocked(BlockReason::SurroundedByPassengers));
        assert_eq!(f.click(0, &mut out), ClickOutcome::Benched { slot: 0 });
        assert!(f.is_reachable(1));
        assert!(f.is_reachable(3));
    }
}
