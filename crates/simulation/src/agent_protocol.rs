//! Agent text protocol types for the `--agent` headless mode.
//!
//! Defines the JSON command/response envelope that external programs (solvers,
//! scripts, test harnesses) use to play a level over newline-delimited JSON on
//! stdin/stdout.
//!
//! These types live in the `simulation` crate so they can be unit-tested
//! without pulling in the app binary. The actual I/O loop lives in
//! `crates/app/src/agent_mode.rs`.

use serde::{Deserialize, Serialize};

use crate::grid::GridCoord;
use crate::observation::LevelObservation;
use crate::passenger::PassengerId;
use crate::signals::{AnimationPhase, GameInput, GameSignal};
use crate::vehicles::VehicleId;

// ---------------------------------------------------------------------------
// Commands (stdin → simulation)
// ---------------------------------------------------------------------------

/// A single command sent by the external agent over stdin.
///
/// Each line of stdin is parsed as one `AgentCommand`. The `cmd` field acts as
/// the discriminator tag.
#[derive(Debug, Deserialize)]
#[serde(tag = "cmd")]
pub enum AgentCommand {
    /// Request the current level observation snapshot.
    #[serde(rename = "observe")]
    Observe,

    #[serde(rename = "click")]
    Click { passenger: PassengerId },

    #[serde(rename = "click_cell")]
    ClickCell { coord: GridCoord },

    /// One-hop move to an adjacent open cell.
    #[serde(rename = "step")]
    Step {
        passenger: PassengerId,
        target: GridCoord,
    },

    /// Report that an externally timed transition has finished.
    #[serde(rename = "animation_complete")]
    AnimationComplete { animation: AnimationPhase },

    #[serde(rename = "depart")]
    Depart { vehicle: VehicleId },

    /// Advance the countdown by `dt` seconds.
    #[serde(rename = "tick")]
    Tick { dt: f32 },

    #[serde(rename = "pause")]
    Pause,

    #[serde(rename = "resume")]
    Resume,

    #[serde(rename = "restart")]
    Restart,

    /// Start the next level of the loaded pack.
    #[serde(rename = "next_level")]
    NextLevel,

    #[serde(rename = "previous_level")]
    PreviousLevel,

    /// Gracefully shut down the agent session.
    #[serde(rename = "quit")]
    Quit,
}

/// What the agent loop does with a command.
#[derive(Debug)]
pub enum AgentRequest {
    /// Forward to the simulation and report the signals it produces.
    Input(GameInput),
    Observe,
    Quit,
}

impl AgentCommand {
    pub fn into_request(self) -> AgentRequest {
        let input = match self {
            AgentCommand::Observe => return AgentRequest::Observe,
            AgentCommand::Quit => return AgentRequest::Quit,
            AgentCommand::Click { passenger } => GameInput::PassengerClicked(passenger),
            AgentCommand::ClickCell { coord } => GameInput::GridCellClicked(coord),
            AgentCommand::Step { passenger, target } => {
                GameInput::StepRequested { passenger, target }
            }
            AgentCommand::AnimationComplete { animation } => {
                GameInput::AnimationCompleted(animation)
            }
            AgentCommand::Depart { vehicle } => GameInput::DepartureCommanded(vehicle),
            AgentCommand::Tick { dt } => GameInput::TimerTick(dt),
            AgentCommand::Pause => GameInput::PauseRequested,
            AgentCommand::Resume => GameInput::ResumeRequested,
            AgentCommand::Restart => GameInput::RestartLevel,
            AgentCommand::NextLevel => GameInput::NextLevel,
            AgentCommand::PreviousLevel => GameInput::PreviousLevel,
        };
        AgentRequest::Input(input)
    }
}

// ---------------------------------------------------------------------------
// Responses (simulation → stdout)
// ---------------------------------------------------------------------------

/// Every response includes the protocol version and a tagged payload.
#[derive(Debug, Serialize)]
pub struct AgentResponse {
    /// Monotonically increasing protocol version (currently 1).
    pub protocol_version: u32,
    /// The response payload, flattened into this object.
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

/// Tagged payload variants for agent responses.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ResponsePayload {
    /// The first level is loaded; carries the signals produced by loading it.
    #[serde(rename = "ready")]
    Ready {
        level: String,
        level_count: usize,
        signals: Vec<GameSignal>,
    },

    /// Signals produced by one command, in order. May be empty.
    #[serde(rename = "signals")]
    Signals { signals: Vec<GameSignal> },

    #[serde(rename = "observation")]
    Observation { observation: Box<LevelObservation> },

    /// An error occurred while processing the command.
    #[serde(rename = "error")]
    Error { message: String },

    /// The session is ending (response to `quit`).
    #[serde(rename = "goodbye")]
    Goodbye,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Current protocol version. Bump when the command/response schema changes.
pub const PROTOCOL_VERSION: u32 = 1;

/// Convenience constructor that wraps a payload with the current protocol version.
pub fn make_response(payload: ResponsePayload) -> AgentResponse {
    AgentResponse {
        protocol_version: PROTOCOL_VERSION,
        payload,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_observe_command() {
        let json = r#"{"cmd":"observe"}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, AgentCommand::Observe));
        assert!(matches!(cmd.into_request(), AgentRequest::Observe));
    }

    #[test]
    fn deserialize_click_command() {
        let json = r#"{"cmd":"click","passenger":4}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(
            cmd.into_request(),
            AgentRequest::Input(GameInput::PassengerClicked(4))
        ));
    }

    #[test]
    fn deserialize_click_cell_command() {
        let json = r#"{"cmd":"click_cell","coord":[2,0]}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        if let AgentCommand::ClickCell { coord } = cmd {
            assert_eq!(coord, GridCoord(2, 0));
        } else {
            panic!("expected ClickCell");
        }
    }

    #[test]
    fn deserialize_step_command() {
        let json = r#"{"cmd":"step","passenger":1,"target":[0,1]}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(
            cmd.into_request(),
            AgentRequest::Input(GameInput::StepRequested {
                passenger: 1,
                target: GridCoord(0, 1)
            })
        ));
    }

    #[test]
    fn deserialize_animation_complete_command() {
        let json = r#"{"cmd":"animation_complete","animation":{"phase":"vehicle_departure","id":0}}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(
            cmd.into_request(),
            AgentRequest::Input(GameInput::AnimationCompleted(
                AnimationPhase::VehicleDeparture(0)
            ))
        ));
    }

    #[test]
    fn deserialize_tick_command() {
        let json = r#"{"cmd":"tick","dt":0.5}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        if let AgentRequest::Input(GameInput::TimerTick(dt)) = cmd.into_request() {
            assert!((dt - 0.5).abs() < f32::EPSILON);
        } else {
            panic!("expected TimerTick");
        }
    }

    #[test]
    fn deserialize_unit_commands() {
        for (json, expected) in [
            (r#"{"cmd":"pause"}"#, "PauseRequested"),
            (r#"{"cmd":"resume"}"#, "ResumeRequested"),
            (r#"{"cmd":"restart"}"#, "RestartLevel"),
            (r#"{"cmd":"next_level"}"#, "NextLevel"),
            (r#"{"cmd":"previous_level"}"#, "PreviousLevel"),
        ] {
            let cmd: AgentCommand = serde_json::from_str(json).unwrap();
            let AgentRequest::Input(input) = cmd.into_request() else {
                panic!("{json} should map to an input");
            };
            assert_eq!(format!("{input:?}"), expected);
        }
    }

    #[test]
    fn quit_is_answered_by_the_loop() {
        let cmd: AgentCommand = serde_json::from_str(r#"{"cmd":"quit"}"#).unwrap();
        assert!(matches!(cmd.into_request(), AgentRequest::Quit));
    }

    #[test]
    fn serialize_ready_response() {
        let resp = make_response(ResponsePayload::Ready {
            level: "first".to_string(),
            level_count: 2,
            signals: Vec::new(),
        });
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["type"], "ready");
        assert_eq!(json["level"], "first");
        assert_eq!(json["level_count"], 2);
    }

    #[test]
    fn unknown_command_fails() {
        let json = r#"{"cmd":"fly"}"#;
        assert!(serde_json::from_str::<AgentCommand>(json).is_err());
    }

    #[test]
    fn serialize_signals_response() {
        let resp = make_response(ResponsePayload::Signals {
            signals: vec![GameSignal::TimerExpired],
        });
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["protocol_version"], PROTOCOL_VERSION);
        assert_eq!(json["type"], "signals");
        assert_eq!(json["signals"][0]["signal"], "timer_expired");
    }

    #[test]
    fn serialize_goodbye_response() {
        let resp = make_response(ResponsePayload::Goodbye);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"type\":\"goodbye\""));
        assert!(json.contains("\"protocol_version\":1"));
    }
}
