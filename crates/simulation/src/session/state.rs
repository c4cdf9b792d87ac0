use bevy::prelude::*;

use crate::field::PlayField;
use crate::level::Level;
use crate::level_pack::LevelPack;
use crate::level_timer::{LevelTimer, TimerStep};
use crate::movement::{BlockReason, ClickOutcome};
use crate::signals::{AnimationPhase, GameInput, GameSignal};
use crate::win_condition::{LevelOutcome, OutcomeLatch, OutcomeTrigger};

// =============================================================================
// ActiveLevel
// =============================================================================

/// A level in play: the board, its countdown and the outcome latch.
#[derive(Debug, Clone)]
pub struct ActiveLevel {
    pub field: PlayField,
    pub timer: LevelTimer,
    pub latch: OutcomeLatch,
}

impl ActiveLevel {
    fn start(level: &Level, out: &mut Vec<GameSignal>) -> Self {
        out.push(GameSignal::LevelStarted {
            name: level.name().to_string(),
            width: level.width(),
            height: level.height(),
            time_limit: level.time_limit(),
            bench_capacity: level.bench_capacity(),
        });
        let field = PlayField::new(level, out);
        let mut timer = LevelTimer::default();
        timer.start(level.time_limit());
        out.push(GameSignal::TimerUpdated {
            remaining: timer.remaining(),
            total: timer.total(),
        });
        Self {
            field,
            timer,
            latch: OutcomeLatch::default(),
        }
    }

    pub fn outcome(&self) -> Option<LevelOutcome> {
        self.latch.outcome()
    }

    fn apply(&mut self, input: &GameInput, out: &mut Vec<GameSignal>) {
        if self.latch.is_latched() {
            debug!("{:?} ignored, level already decided", input);
            return;
        }

        match input {
            GameInput::PassengerClicked(id) => {
                let outcome = self.field.click(*id, out);
                self.after_placement(outcome, out);
            }
            GameInput::GridCellClicked(coord) => match self.field.grid().occupant_at(*coord) {
                Some(id) => {
                    let outcome = self.field.click(id, out);
                    self.after_placement(outcome, out);
                }
                None => debug!("click on empty cell {:?}", coord),
            },
            GameInput::StepRequested { passenger, target } => {
                let outcome = self.field.step(*passenger, *target, out);
                debug!("step {} -> {:?}: {:?}", passenger, target, outcome);
            }
            GameInput::AnimationCompleted(phase) => self.complete_animation(*phase, out),
            GameInput::DepartureCommanded(id) => {
                self.field.command_departure(*id, out);
            }
            GameInput::TimerTick(dt) => match self.timer.tick(*dt) {
                TimerStep::Idle => {}
                TimerStep::Updated { remaining, total } => {
                    out.push(GameSignal::TimerUpdated { remaining, total });
                }
                TimerStep::Expired { total } => {
                    out.push(GameSignal::TimerUpdated {
                        remaining: 0.0,
                        total,
                    });
                    out.push(GameSignal::TimerExpired);
                    self.conclude(OutcomeTrigger::TimerExpired, out);
                }
            },
            GameInput::PauseRequested => {
                if self.timer.pause() {
                    out.push(GameSignal::TimerPaused {
                        remaining: self.timer.remaining(),
                        total: self.timer.total(),
                    });
                }
            }
            GameInput::ResumeRequested => {
                if self.timer.resume() {
                    out.push(GameSignal::TimerResumed {
                        remaining: self.timer.remaining(),
                        total: self.timer.total(),
                    });
                }
            }
            // Handled by `LevelSession`.
            GameInput::LoadLevel(_)
            | GameInput::LoadPack(_)
            | GameInput::RestartLevel
            | GameInput::NextLevel
            | GameInput::PreviousLevel => {}
        }
    }

    fn complete_animation(&mut self, phase: AnimationPhase, out: &mut Vec<GameSignal>) {
        match phase {
            AnimationPhase::PassengerMove(id) => {
                if let Some(outcome) = self.field.complete_move(id, out) {
                    self.after_placement(outcome, out);
                }
            }
            AnimationPhase::VehicleArrival(id) => {
                self.field.complete_vehicle_arrival(id, out);
            }
            AnimationPhase::VehicleDeparture(id) => {
                let Some(exhausted) = self.field.complete_vehicle_departure(id, out) else {
                    return;
                };
                let cleared = self.field.roster().remaining() == 0;
                if cleared {
                    out.push(GameSignal::AllPassengersRemoved);
                }
                if exhausted {
                    out.push(GameSignal::AllVehiclesCompleted);
                }
                // Both facts are announced before the single terminal signal.
                if cleared {
                    self.conclude(OutcomeTrigger::AllPassengersRemoved, out);
                }
                if exhausted {
                    self.conclude(OutcomeTrigger::AllVehiclesCompleted, out);
                }
            }
        }
    }

    fn after_placement(&mut self, outcome: ClickOutcome, out: &mut Vec<GameSignal>) {
        if outcome == ClickOutcome::Blocked(BlockReason::BenchQueueFull) {
            self.conclude(OutcomeTrigger::BenchQueueFull, out);
        }
    }

    fn conclude(&mut self, trigger: OutcomeTrigger, out: &mut Vec<GameSignal>) {
        let Some(outcome) = self.latch.observe(trigger) else {
            return;
        };
        self.timer.stop();
        match outcome {
            LevelOutcome::Completed(reason) => {
                info!("level completed ({:?})", reason);
                out.push(GameSignal::LevelCompleted { reason });
            }
            LevelOutcome::Failed(reason) => {
                info!("level failed ({:?})", reason);
                out.push(GameSignal::LevelFailed { reason });
            }
        }
    }
}

// =============================================================================
// Resource: LevelSession
// =============================================================================

/// The loaded level pack and the level in play from it.
#[derive(Resource, Debug, Default)]
pub struct LevelSession {
    pack: Option<LevelPack>,
    active: Option<ActiveLevel>,
}

impl LevelSession {
    /// Applies one input to completion and returns the signals it produced,
    /// in order.
    pub fn apply(&mut self, input: &GameInput) -> Vec<GameSignal> {
        let mut out = Vec::new();
        match input {
            GameInput::LoadLevel(level) => {
                self.pack = Some(LevelPack::single(level.as_ref().clone()));
                self.start_current(&mut out);
            }
            GameInput::LoadPack(levels) => match LevelPack::new(levels.clone()) {
                Some(pack) => {
                    info!("loaded pack of {} levels", pack.len());
                    let count = pack.len();
                    self.pack = Some(pack);
                    out.push(GameSignal::LevelChanged {
                        previous: None,
                        index: 0,
                        count,
                    });
                    self.start_current(&mut out);
                }
                None => warn!("empty level pack ignored"),
            },
            GameInput::RestartLevel => match &self.pack {
                Some(pack) => {
                    info!("restarting level '{}'", pack.current().name());
                    self.start_current(&mut out);
                }
                None => warn!("restart requested with no level loaded"),
            },
            GameInput::NextLevel => self.navigate(LevelPack::advance, &mut out),
            GameInput::PreviousLevel => self.navigate(LevelPack::retreat, &mut out),
            other => {
                let Some(active) = self.active.as_mut() else {
                    warn!("{:?} ignored, no level loaded", other);
                    return out;
                };
                let was_decided = active.latch.is_latched();
                active.apply(other, &mut out);
                if !was_decided {
                    if let Some(LevelOutcome::Completed(_)) = active.outcome() {
                        self.announce_progress(&mut out);
                    }
                }
            }
        }

        if cfg!(debug_assertions) {
            if let Some(active) = &self.active {
                let violations = crate::invariant_checks::check_play_field(&active.field);
                debug_assert!(
                    violations.is_empty(),
                    "invariants broken after {input:?}: {violations:?}"
                );
            }
        }
        out
    }

    /// Moves the pack cursor with `step` and starts the level it lands on.
    fn navigate(&mut self, step: fn(&mut LevelPack) -> bool, out: &mut Vec<GameSignal>) {
        let Some(pack) = self.pack.as_mut() else {
            warn!("level navigation requested with no pack loaded");
            return;
        };
        let previous = pack.index();
        if !step(pack) {
            debug!("no level to move to from index {}", previous);
            return;
        }
        out.push(GameSignal::LevelChanged {
            previous: Some(previous),
            index: pack.index(),
            count: pack.len(),
        });
        self.start_current(out);
    }

    fn announce_progress(&self, out: &mut Vec<GameSignal>) {
        let Some(pack) = &self.pack else {
            return;
        };
        if pack.has_next() {
            out.push(GameSignal::NextLevelAvailable {
                index: pack.index() + 1,
            });
        } else {
            info!("all {} levels completed", pack.len());
            out.push(GameSignal::AllLevelsCompleted);
        }
    }

    fn start_current(&mut self, out: &mut Vec<GameSignal>) {
        let Some(pack) = &self.pack else {
            return;
        };
        let level = pack.current();
        info!(
            "starting level '{}' ({}x{}, {} passengers, {} vehicles, {}s)",
            level.name(),
            level.width(),
            level.height(),
            level.passengers().len(),
            level.vehicles().len(),
            level.time_limit()
        );
        self.active = Some(ActiveLevel::start(level, out));
    }

    pub fn level(&self) -> Option<&Level> {
        self.pack.as_ref().map(LevelPack::current)
    }

    pub fn pack(&self) -> Option<&LevelPack> {
        self.pack.as_ref()
    }

    pub fn active(&self) -> Option<&ActiveLevel> {
        self.active.as_ref()
    }

    pub fn field(&self) -> Option<&PlayField> {
        self.active.as_ref().map(|a| &a.field)
    }

    pub fn outcome(&self) -> Option<LevelOutcome> {
        self.active.as_ref().and_then(ActiveLevel::outcome)
    }

    /// A level is loaded and undecided.
    pub fn is_playing(&self) -> bool {
        self.active.is_some() && self.outcome().is_none()
    }
}
