//! Vehicle sequencing: the level's ordered vehicle list, released one at a
//! time, each running Approaching -> Loading -> Departing -> Gone.
//!
//! ## Lifecycle
//! - `Approaching`: spawned, travelling to the stop. Ends when the arrival
//!   animation completes.
//! - `Loading`: on arrival the vehicle immediately pulls every bench passenger
//!   of its color (earliest first) until it is full or none are left, then
//!   accepts exit-row passengers of its color.
//! - `Departing`: entered automatically when the last seat fills, or on an
//!   external departure command.
//! - `Gone`: departure animation completed. Boarded passengers are removed
//!   from play and the next pending vehicle is spawned. When nothing is left,
//!   sequence exhaustion is reported once.

pub mod sequencer;
pub mod types;

pub use sequencer::VehicleSequencer;
pub use types::*;
