//! Read-only snapshot of a running level for external agents.
//!
//! Built on demand from the [`LevelSession`]; the board is also rendered as
//! ASCII rows (top row first, exit row last):
//! - `#` void, `.` open
//! - `R B G Y P O` passenger color, lowercase while mid-move

use serde::Serialize;

use crate::field::PlayField;
use crate::grid::{CellKind, GridCoord};
use crate::passenger::{Passenger, PassengerColor, PassengerId, PassengerState};
use crate::session::LevelSession;
use crate::vehicles::Vehicle;
use crate::win_condition::LevelOutcome;

#[derive(Debug, Clone, Default, Serialize)]
pub struct LevelObservation {
    pub level: String,
    /// Position of this level in the loaded pack.
    pub level_index: usize,
    pub level_count: usize,
    pub width: usize,
    pub height: usize,
    pub board: Vec<String>,
    pub passengers: Vec<Passenger>,
    /// Bench occupants in slot order.
    pub bench: Vec<PassengerId>,
    pub bench_capacity: usize,
    pub vehicles: Vec<Vehicle>,
    pub pending_vehicles: usize,
    /// On-grid passengers that can still progress toward the exit row.
    pub reachable: Vec<PassengerId>,
    pub time_remaining: f32,
    pub time_total: f32,
    pub paused: bool,
    pub outcome: Option<LevelOutcome>,
}

impl LevelObservation {
    /// `Default` when no level is loaded.
    pub fn capture(session: &LevelSession) -> Self {
        let (Some(level), Some(active)) = (session.level(), session.active()) else {
            return Self::default();
        };
        let field = &active.field;
        let (level_index, level_count) = session
            .pack()
            .map_or((0, 1), |pack| (pack.index(), pack.len()));
        Self {
            level: level.name().to_string(),
            level_index,
            level_count,
            width: level.width(),
            height: level.height(),
            board: render_board(field),
            passengers: field.roster().iter().cloned().collect(),
            bench: field.bench().occupants().iter().map(|o| o.passenger).collect(),
            bench_capacity: field.bench().capacity(),
            vehicles: field.vehicles().active().to_vec(),
            pending_vehicles: field.vehicles().pending_len(),
            reachable: field.reachable().collect(),
            time_remaining: active.timer.remaining(),
            time_total: active.timer.total(),
            paused: active.timer.is_paused(),
            outcome: active.outcome(),
        }
    }
}

pub fn color_char(color: PassengerColor) -> char {
    match color {
        PassengerColor::Red => 'R',
        PassengerColor::Blue => 'B',
        PassengerColor::Green => 'G',
        PassengerColor::Yellow => 'Y',
        PassengerColor::Purple => 'P',
        PassengerColor::Orange => 'O',
    }
}

pub fn render_board(field: &PlayField) -> Vec<String> {
    let grid = field.grid();
    (0..grid.height() as i32)
        .rev()
        .map(|y| {
            (0..grid.width() as i32)
                .map(|x| {
                    let coord = GridCoord(x, y);
                    if grid.kind(coord) == Some(CellKind::Void) {
                        return '#';
                    }
                    match grid.occupant_at(coord).and_then(|id| field.roster().get(id)) {
                        Some(p) if p.state == PassengerState::Moving => {
                            color_char(p.color).to_ascii_lowercase()
                        }
                        Some(p) => color_char(p.color),
                        None => '.',
                    }
                })
                .collect()
        })
        .collect()
}
