/// Row passengers must reach before they can board or take a bench seat.
pub const EXIT_ROW: i32 = 0;

/// Largest accepted level width or height. Keeps cell indices and grid
/// coordinates inside `i32`.
pub const MAX_GRID_DIM: usize = 1024;

/// Bench capacity used when a level asks for a zero-seat bench.
pub const DEFAULT_BENCH_CAPACITY: usize = 5;

/// Countdown in seconds for level definitions that omit one.
pub const DEFAULT_TIME_LIMIT: f32 = 120.0;

/// Seats per vehicle for level definitions that omit a capacity.
pub const DEFAULT_VEHICLE_CAPACITY: u32 = 4;

/// Bench capacity for level definitions that omit one.
pub const DEFAULT_LEVEL_BENCH_CAPACITY: usize = 10;

/// Number of output signals retained by the [`crate::signal_journal::SignalJournal`].
pub const SIGNAL_JOURNAL_CAPACITY: usize = 256;
