//! Headless `--agent` mode: a blocking synchronous loop that reads JSON
//! commands from stdin and writes JSON responses to stdout.
//!
//! ## Protocol
//!
//! Each line of stdin is a JSON object with a `"cmd"` discriminator.
//! Each line of stdout is a JSON response with `"protocol_version"` and
//! `"type"` fields. See [`simulation::agent_protocol`] for the full schema.
//! Logs go to stderr so they never interleave with the protocol.

use std::io::{self, BufRead, Write};

use bevy::ecs::event::EventCursor;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use simulation::agent_protocol::{
    make_response, AgentCommand, AgentRequest, AgentResponse, ResponsePayload,
    PROTOCOL_VERSION,
};
use simulation::level::Level;
use simulation::observation::LevelObservation;
use simulation::session::LevelSession;
use simulation::signals::{GameInput, GameSignal};

/// The app plus a cursor over the signals it has published so far.
struct AgentSession {
    app: App,
    cursor: EventCursor<GameSignal>,
}

impl AgentSession {
    fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(LogPlugin::default());
        app.add_plugins(simulation::SimulationPlugin);

        // Initial update so resources and event buffers exist.
        app.update();

        let cursor = app.world().resource::<Events<GameSignal>>().get_cursor();
        Self { app, cursor }
    }

    /// Resolves one input in a single frame and returns what it produced.
    fn apply(&mut self, input: GameInput) -> Vec<GameSignal> {
        self.app.world_mut().send_event(input);
        self.app.update();
        let events = self.app.world().resource::<Events<GameSignal>>();
        self.cursor.read(events).cloned().collect()
    }

    fn observe(&self) -> LevelObservation {
        LevelObservation::capture(self.app.world().resource::<LevelSession>())
    }

    fn process_command(&mut self, cmd: AgentCommand) -> AgentResponse {
        match cmd.into_request() {
            AgentRequest::Input(input) => make_response(ResponsePayload::Signals {
                signals: self.apply(input),
            }),
            AgentRequest::Observe => make_response(ResponsePayload::Observation {
                observation: Box::new(self.observe()),
            }),
            AgentRequest::Quit => make_response(ResponsePayload::Goodbye),
        }
    }
}

fn emit(out: &mut impl Write, response: &AgentResponse) -> io::Result<()> {
    let line = serde_json::to_string(response)?;
    writeln!(out, "{line}")?;
    out.flush()
}

/// Loads `levels` as a pack and serves commands until `quit` or end of
/// input. `levels` must not be empty.
pub fn run_agent_mode(levels: Vec<Level>) -> io::Result<()> {
    let mut session = AgentSession::new();

    let level_count = levels.len();
    let name = levels
        .first()
        .map(|level| level.name().to_string())
        .unwrap_or_default();
    let signals = session.apply(GameInput::LoadPack(levels));
    if let Some(pack) = session.app.world().resource::<LevelSession>().pack() {
        info!("level order: {}", pack.names().collect::<Vec<_>>().join(", "));
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    emit(
        &mut stdout,
        &make_response(ResponsePayload::Ready {
            level: name,
            level_count,
            signals,
        }),
    )?;
    info!(
        "busjam agent mode v{} ready, waiting for commands on stdin",
        PROTOCOL_VERSION
    );

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<AgentCommand>(&line) {
            Ok(cmd) => session.process_command(cmd),
            Err(e) => {
                warn!("rejected agent command: {e}");
                make_response(ResponsePayload::Error {
                    message: format!("Parse error: {e}"),
                })
            }
        };
        let is_goodbye = matches!(response.payload, ResponsePayload::Goodbye);
        emit(&mut stdout, &response)?;

        if is_goodbye {
            break;
        }
    }

    info!("busjam agent mode shutting down");
    Ok(())
}
