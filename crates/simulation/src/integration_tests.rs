//! Integration tests using the `TestLevel` harness.
//!
//! These tests boot a headless Bevy App with `SimulationPlugin` and drive
//! complete levels through `GameInput` events, checking the emitted
//! `GameSignal`s and the resulting board state.

mod scenario_tests;
