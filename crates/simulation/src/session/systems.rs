use bevy::prelude::*;

use crate::signal_journal::SignalJournal;
use crate::signals::{GameInput, GameSignal};

use super::state::LevelSession;

/// Where countdown ticks come from.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimerDriver {
    /// Only explicit `GameInput::TimerTick` inputs advance the countdown.
    #[default]
    External,
    /// Every frame sends a tick with Bevy's frame delta.
    FrameTime,
}

pub fn drive_timer_from_frame_time(
    driver: Res<TimerDriver>,
    time: Res<Time>,
    mut inputs: EventWriter<GameInput>,
) {
    if *driver != TimerDriver::FrameTime {
        return;
    }
    let dt = time.delta_secs();
    if dt > 0.0 {
        inputs.send(GameInput::TimerTick(dt));
    }
}

/// Drains pending inputs in arrival order and publishes their signals.
pub fn process_game_inputs(
    mut inputs: EventReader<GameInput>,
    mut session: ResMut<LevelSession>,
    mut journal: ResMut<SignalJournal>,
    mut signals: EventWriter<GameSignal>,
) {
    for input in inputs.read() {
        for signal in session.apply(input) {
            journal.push(signal.clone());
            signals.send(signal);
        }
    }
}
