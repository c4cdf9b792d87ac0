//! Level countdown. Driven by explicit `tick(dt)` calls so the core stays
//! independent of wall-clock time; [`crate::session::TimerDriver`] can feed it
//! from Bevy's frame time instead.

use serde::Serialize;

/// Result of advancing the countdown by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerStep {
    /// Not running, paused, or a non-positive delta.
    Idle,
    Updated { remaining: f32, total: f32 },
    /// Reached zero on this tick. Reported exactly once per start.
    Expired { total: f32 },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LevelTimer {
    total: f32,
    remaining: f32,
    running: bool,
    paused: bool,
    expired: bool,
}

impl LevelTimer {
    pub fn start(&mut self, limit: f32) {
        debug_assert!(limit > 0.0, "time limit must be positive");
        *self = Self {
            total: limit,
            remaining: limit,
            running: true,
            paused: false,
            expired: false,
        };
    }

    pub fn tick(&mut self, dt: f32) -> TimerStep {
        if !self.running || self.paused || dt.is_nan() || dt <= 0.0 {
            return TimerStep::Idle;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.running = false;
            self.expired = true;
            return TimerStep::Expired { total: self.total };
        }
        TimerStep::Updated {
            remaining: self.remaining,
            total: self.total,
        }
    }

    pub fn pause(&mut self) -> bool {
        if self.running && !self.paused {
            self.paused = true;
            return true;
        }
        false
    }

    pub fn resume(&mut self) -> bool {
        if self.running && self.paused {
            self.paused = false;
            return true;
        }
        false
    }

    /// Halts the countdown without reporting expiry.
    pub fn stop(&mut self) {
        self.running = false;
        self.paused = false;
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn total(&self) -> f32 {
        self.total
    }

    pub fn elapsed(&self) -> f32 {
        self.total - self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_counts_down() {
        let mut timer = LevelTimer::default();
        timer.start(10.0);
        assert_eq!(
            timer.tick(2.5),
            TimerStep::Updated {
                remaining: 7.5,
                total: 10.0
            }
        );
        assert!((timer.elapsed() - 2.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_expiry_reported_once_and_clamped() {
        let mut timer = LevelTimer::default();
        timer.start(1.0);
        assert_eq!(timer.tick(5.0), TimerStep::Expired { total: 1.0 });
        assert_eq!(timer.remaining(), 0.0);
        assert!(timer.is_expired());
        assert_eq!(timer.tick(1.0), TimerStep::Idle);
        assert!(!timer.resume());
    }

    #[test]
    fn test_pause_freezes_countdown() {
        let mut timer = LevelTimer::default();
        timer.start(3.0);
        assert!(timer.pause());
        assert!(!timer.pause());
        assert_eq!(timer.tick(1.0), TimerStep::Idle);
        assert_eq!(timer.remaining(), 3.0);
        assert!(timer.resume());
        assert!(matches!(timer.tick(1.0), TimerStep::Updated { .. }));
    }

    #[test]
    fn test_stopped_timer_never_expires() {
        let mut timer = LevelTimer::default();
        timer.start(1.0);
        timer.stop();
        assert_eq!(timer.tick(10.0), TimerStep::Idle);
        assert!(!timer.is_expired());
    }

    #[test]
    fn test_non_positive_delta_is_ignored() {
        let mut timer = LevelTimer::default();
        timer.start(2.0);
        assert_eq!(timer.tick(0.0), TimerStep::Idle);
        assert_eq!(timer.tick(-1.0), TimerStep::Idle);
        assert_eq!(timer.tick(f32::NAN), TimerStep::Idle);
        assert_eq!(timer.remaining(), 2.0);
    }

    #[test]
    fn test_idle_before_start() {
        let mut timer = LevelTimer::default();
        assert_eq!(timer.tick(1.0), TimerStep::Idle);
        assert!(!timer.pause());
    }
}
