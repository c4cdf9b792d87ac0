//! Win/lose evaluation. The first terminal trigger decides the level; later
//! triggers are swallowed by the latch.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeTrigger {
    AllVehiclesCompleted,
    AllPassengersRemoved,
    TimerExpired,
    BenchQueueFull,
}

impl OutcomeTrigger {
    pub fn is_success(self) -> bool {
        matches!(
            self,
            OutcomeTrigger::AllVehiclesCompleted | OutcomeTrigger::AllPassengersRemoved
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum LevelOutcome {
    Completed(OutcomeTrigger),
    Failed(OutcomeTrigger),
}

#[derive(Debug, Clone, Default)]
pub struct OutcomeLatch {
    outcome: Option<LevelOutcome>,
}

impl OutcomeLatch {
    /// Returns the outcome only for the trigger that latched it.
    pub fn observe(&mut self, trigger: OutcomeTrigger) -> Option<LevelOutcome> {
        if self.outcome.is_some() {
            return None;
        }
        let outcome = if trigger.is_success() {
            LevelOutcome::Completed(trigger)
        } else {
            LevelOutcome::Failed(trigger)
        };
        self.outcome = Some(outcome);
        Some(outcome)
    }

    pub fn outcome(&self) -> Option<LevelOutcome> {
        self.outcome
    }

    pub fn is_latched(&self) -> bool {
        self.outcome.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_trigger_wins() {
        let mut latch = OutcomeLatch::default();
        assert_eq!(
            latch.observe(OutcomeTrigger::BenchQueueFull),
            Some(LevelOutcome::Failed(OutcomeTrigger::BenchQueueFull))
        );
        assert_eq!(latch.observe(OutcomeTrigger::AllVehiclesCompleted), None);
        assert_eq!(latch.observe(OutcomeTrigger::BenchQueueFull), None);
        assert_eq!(
            latch.outcome(),
            Some(LevelOutcome::Failed(OutcomeTrigger::BenchQueueFull))
        );
    }

    #[test]
    fn test_success_triggers_complete_the_level() {
        let mut latch = OutcomeLatch::default();
        assert_eq!(
            latch.observe(OutcomeTrigger::AllPassengersRemoved),
            Some(LevelOutcome::Completed(OutcomeTrigger::AllPassengersRemoved))
        );
        assert!(latch.is_latched());
    }

    #[test]
    fn test_timer_expiry_fails_the_level() {
        assert!(!OutcomeTrigger::TimerExpired.is_success());
        assert!(!OutcomeTrigger::BenchQueueFull.is_success());
        assert!(OutcomeTrigger::AllVehiclesCompleted.is_success());
    }
}
