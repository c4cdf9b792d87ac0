//! Input shorthands and state queries for `TestLevel`.

use bevy::prelude::*;

use crate::bench::Bench;
use crate::field::PlayField;
use crate::grid::GridCoord;
use crate::observation::LevelObservation;
use crate::passenger::{Passenger, PassengerId, PassengerState};
use crate::session::{LevelSession, TimerDriver};
use crate::signal_journal::SignalJournal;
use crate::signals::{AnimationPhase, GameInput, GameSignal};
use crate::vehicles::{Vehicle, VehicleId, VehicleState};
use crate::win_condition::LevelOutcome;

use super::TestLevel;

impl TestLevel {
    // -----------------------------------------------------------------------
    // Input shorthands
    // -----------------------------------------------------------------------

    pub fn click(&mut self, id: PassengerId) -> &mut Self {
        self.send(GameInput::PassengerClicked(id))
    }

    pub fn click_cell(&mut self, x: i32, y: i32) -> &mut Self {
        self.send(GameInput::GridCellClicked(GridCoord(x, y)))
    }

    pub fn step(&mut self, id: PassengerId, x: i32, y: i32) -> &mut Self {
        self.send(GameInput::StepRequested {
            passenger: id,
            target: GridCoord(x, y),
        })
    }

    pub fn finish_move(&mut self, id: PassengerId) -> &mut Self {
        self.send(GameInput::AnimationCompleted(AnimationPhase::PassengerMove(id)))
    }

    /// Click, then complete the move animation if one started.
    pub fn click_through(&mut self, id: PassengerId) -> &mut Self {
        self.click(id);
        if self.passenger_state(id) == Some(PassengerState::Moving) {
            self.finish_move(id);
        }
        self
    }

    pub fn arrive(&mut self, vehicle: VehicleId) -> &mut Self {
        self.send(GameInput::AnimationCompleted(AnimationPhase::VehicleArrival(
            vehicle,
        )))
    }

    pub fn depart(&mut self, vehicle: VehicleId) -> &mut Self {
        self.send(GameInput::AnimationCompleted(
            AnimationPhase::VehicleDeparture(vehicle),
        ))
    }

    pub fn command_departure(&mut self, vehicle: VehicleId) -> &mut Self {
        self.send(GameInput::DepartureCommanded(vehicle))
    }

    /// Complete arrival of whatever vehicle is currently approaching.
    pub fn arrive_current(&mut self) -> &mut Self {
        if let Some(id) = self.vehicle_in_state(VehicleState::Approaching) {
            self.arrive(id);
        }
        self
    }

    pub fn tick_timer(&mut self, dt: f32) -> &mut Self {
        self.send(GameInput::TimerTick(dt))
    }

    pub fn restart(&mut self) -> &mut Self {
        self.send(GameInput::RestartLevel)
    }

    pub fn set_timer_driver(&mut self, driver: TimerDriver) -> &mut Self {
        self.app.world_mut().insert_resource(driver);
        self
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn session(&self) -> &LevelSession {
        self.app.world().resource::<LevelSession>()
    }

    pub fn journal(&self) -> &SignalJournal {
        self.app.world().resource::<SignalJournal>()
    }

    /// Panics if no level is loaded.
    pub fn field(&self) -> &PlayField {
        self.session().field().expect("no level loaded")
    }

    pub fn passenger(&self, id: PassengerId) -> Option<&Passenger> {
        self.field().roster().get(id)
    }

    pub fn passenger_state(&self, id: PassengerId) -> Option<PassengerState> {
        self.passenger(id).map(|p| p.state)
    }

    pub fn passenger_at(&self, x: i32, y: i32) -> Option<PassengerId> {
        self.field().grid().occupant_at(GridCoord(x, y))
    }

    pub fn bench(&self) -> &Bench {
        self.field().bench()
    }

    /// Bench occupants in slot order.
    pub fn bench_order(&self) -> Vec<PassengerId> {
        self.bench().occupants().iter().map(|o| o.passenger).collect()
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.field().vehicles().vehicle(id)
    }

    pub fn vehicle_in_state(&self, state: VehicleState) -> Option<VehicleId> {
        self.field()
            .vehicles()
            .active()
            .iter()
            .find(|v| v.state == state)
            .map(|v| v.id)
    }

    pub fn outcome(&self) -> Option<LevelOutcome> {
        self.session().outcome()
    }

    pub fn observation(&self) -> LevelObservation {
        LevelObservation::capture(self.session())
    }

    // -----------------------------------------------------------------------
    // Signals
    // -----------------------------------------------------------------------

    /// Every signal emitted since the harness was created.
    pub fn signals(&self) -> &[GameSignal] {
        &self.signals
    }

    /// Returns and forgets the signals recorded so far.
    pub fn take_signals(&mut self) -> Vec<GameSignal> {
        std::mem::take(&mut self.signals)
    }

    pub fn count_signals(&self, pred: impl Fn(&GameSignal) -> bool) -> usize {
        self.signals.iter().filter(|s| pred(s)).count()
    }
}
