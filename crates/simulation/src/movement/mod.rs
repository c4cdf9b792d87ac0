//! Passenger movement: click resolution, one-hop steps and reachability.
//!
//! ## Click flow
//! 1. A passenger that is mid-move ignores the click.
//! 2. Off the exit row, the shortest open path to it is committed as a single
//!    move (only the two endpoint cells change) and the passenger becomes
//!    `Moving`. No path means nothing happens.
//! 3. On the exit row (immediately, or once the move animation completes), a
//!    passenger whose every neighbor is occupied or void is blocked.
//! 4. Otherwise it boards the loading vehicle of its color if one has a seat,
//! 5. else takes the next bench slot,
//! 6. else the bench is full and the level is lost.

mod reachability;
mod step;
mod tests;
mod validator;

pub use step::StepOutcome;
pub use validator::{BlockReason, ClickOutcome};
