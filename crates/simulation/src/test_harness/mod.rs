//! # TestLevel: headless integration test harness
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` + `SimulationPlugin`, loads
//! a level through the normal `GameInput` path and records every emitted
//! `GameSignal` so tests can drive inputs and assert on the results.

mod assertions;
mod queries;
mod setup;

pub use setup::LevelBuilder;

use bevy::app::App;
use bevy::ecs::event::EventCursor;
use bevy::prelude::*;

use crate::level::Level;
use crate::signals::{GameInput, GameSignal};
use crate::SimulationPlugin;

/// A headless Bevy App running one level.
///
/// Every `send` runs exactly one `app.update()`, so each input is resolved
/// (cascades included) before the call returns.
pub struct TestLevel {
    app: App,
    cursor: EventCursor<GameSignal>,
    signals: Vec<GameSignal>,
}

impl TestLevel {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Boot the app and load `level`.
    pub fn new(level: Level) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(SimulationPlugin);

        // Run one update so resources and event buffers are initialised.
        app.update();

        let cursor = app.world().resource::<Events<GameSignal>>().get_cursor();
        let mut test = Self {
            app,
            cursor,
            signals: Vec::new(),
        };
        test.send(GameInput::LoadLevel(Box::new(level)));
        test
    }

    /// Shorthand for `TestLevel::new(builder.build())`.
    pub fn from_builder(builder: LevelBuilder) -> Self {
        Self::new(builder.build())
    }

    /// Boot the app without loading anything.
    pub fn empty() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(SimulationPlugin);
        app.update();
        let cursor = app.world().resource::<Events<GameSignal>>().get_cursor();
        Self {
            app,
            cursor,
            signals: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    /// Queue one input and run a single frame.
    pub fn send(&mut self, input: GameInput) -> &mut Self {
        self.app.world_mut().send_event(input);
        self.update();
        self
    }

    /// Queue several inputs and resolve them all in a single frame.
    pub fn send_all(&mut self, inputs: impl IntoIterator<Item = GameInput>) -> &mut Self {
        for input in inputs {
            self.app.world_mut().send_event(input);
        }
        self.update();
        self
    }

    /// Run a frame with no new input.
    pub fn update(&mut self) -> &mut Self {
        self.app.update();
        let events = self.app.world().resource::<Events<GameSignal>>();
        self.signals.extend(self.cursor.read(events).cloned());
        self
    }
}
