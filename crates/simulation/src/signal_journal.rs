//! Ring-buffer log of recently emitted [`GameSignal`]s.
//!
//! Gives callers (the headless agent loop, tests) a way to inspect what
//! happened without holding an event cursor across frames.

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::config::SIGNAL_JOURNAL_CAPACITY;
use crate::signals::GameSignal;

#[derive(Resource, Debug, Clone, Default)]
pub struct SignalJournal {
    entries: VecDeque<(u64, GameSignal)>,
    recorded: u64,
}

impl SignalJournal {
    /// Record a signal, evicting the oldest entry when full.
    pub fn push(&mut self, signal: GameSignal) {
        if self.entries.len() >= SIGNAL_JOURNAL_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back((self.recorded, signal));
        self.recorded += 1;
    }

    /// Signals with a sequence number of at least `seq`, oldest first.
    pub fn since(&self, seq: u64) -> impl Iterator<Item = &GameSignal> {
        self.entries
            .iter()
            .filter(move |(s, _)| *s >= seq)
            .map(|(_, signal)| signal)
    }

    /// Up to `n` most recent signals, oldest first.
    pub fn last_n(&self, n: usize) -> impl Iterator<Item = &GameSignal> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).map(|(_, signal)| signal)
    }

    /// Total signals ever recorded; also the next sequence number.
    pub fn recorded(&self) -> u64 {
        self.recorded
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
