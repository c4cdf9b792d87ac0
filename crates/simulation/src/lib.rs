use bevy::prelude::*;

pub mod agent_protocol;
pub mod bench;
pub mod config;
pub mod field;
pub mod grid;
pub mod invariant_checks;
pub mod level;
pub mod level_pack;
pub mod level_timer;
pub mod movement;
pub mod observation;
pub mod passenger;
pub mod pathfinding_sys;
pub mod session;
pub mod signal_journal;
pub mod signals;
pub mod vehicles;
pub mod win_condition;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

use invariant_checks::{validate_level_invariants, InvariantViolations};
use session::SessionPlugin;

/// Ordering of the puzzle systems within `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Systems that produce `GameInput`s (frame-time countdown).
    Input,
    /// Draining and applying `GameInput`s.
    Resolve,
    /// Read-only checks over the resolved state.
    PostResolve,
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                SimulationSet::Input,
                SimulationSet::Resolve,
                SimulationSet::PostResolve,
            )
                .chain(),
        );

        app.add_plugins(SessionPlugin);

        app.init_resource::<InvariantViolations>().add_systems(
            Update,
            validate_level_invariants.in_set(SimulationSet::PostResolve),
        );
    }
}
