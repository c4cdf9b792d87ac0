//! Level session: owns the running level and applies inputs to it.
//!
//! Inputs are drained from `Events<GameInput>` by a single system and applied
//! strictly in order. Each one runs to completion, including auto-loading,
//! auto-departure and bench compaction, before the next is looked at. The
//! produced signals are forwarded to `Events<GameSignal>` and recorded in the
//! [`SignalJournal`](crate::signal_journal::SignalJournal).

pub mod state;
pub mod systems;

pub use state::*;
pub use systems::*;

use bevy::prelude::*;

use crate::signal_journal::SignalJournal;
use crate::signals::{GameInput, GameSignal};
use crate::SimulationSet;

// =============================================================================
// Plugin
// =============================================================================

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GameInput>()
            .add_event::<GameSignal>()
            .init_resource::<LevelSession>()
            .init_resource::<SignalJournal>()
            .init_resource::<TimerDriver>()
            .add_systems(
                Update,
                drive_timer_from_frame_time.in_set(SimulationSet::Input),
            )
            .add_systems(
                Update,
                process_game_inputs.in_set(SimulationSet::Resolve),
            );
    }
}
