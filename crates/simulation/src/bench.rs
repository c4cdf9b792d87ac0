//! Waiting bench: a bounded FIFO of passengers that reached the exit row but
//! had no loading vehicle of their color.
//!
//! Slots are positions in an ordered list, so occupied slots are always the
//! contiguous range `0..len` in arrival order. Removing a passenger shifts
//! everyone behind it one slot forward; each shift is reported so the caller
//! can reposition the token.

use bevy::prelude::*;
use serde::Serialize;

use crate::config::DEFAULT_BENCH_CAPACITY;
use crate::passenger::{PassengerColor, PassengerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BenchOccupant {
    pub passenger: PassengerId,
    pub color: PassengerColor,
}

/// A passenger that changed slot during compaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotMove {
    pub passenger: PassengerId,
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dequeued {
    pub passenger: PassengerId,
    pub vacated_slot: usize,
    pub shifted: Vec<SlotMove>,
}

/// Returned by [`Bench::enqueue`] when every slot is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchFull;

#[derive(Debug, Clone, Default)]
pub struct Bench {
    capacity: usize,
    occupants: Vec<BenchOccupant>,
}

impl Bench {
    pub fn new(capacity: usize) -> Self {
        if capacity == 0 {
            warn!(
                "bench capacity 0 is invalid, using default of {}",
                DEFAULT_BENCH_CAPACITY
            );
        }
        let capacity = if capacity == 0 {
            DEFAULT_BENCH_CAPACITY
        } else {
            capacity
        };
        Self {
            capacity,
            occupants: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    pub fn can_accept(&self) -> bool {
        self.occupants.len() < self.capacity
    }

    /// Seats the passenger in the lowest free slot.
    pub fn enqueue(
        &mut self,
        passenger: PassengerId,
        color: PassengerColor,
    ) -> Result<usize, BenchFull> {
        if !self.can_accept() {
            return Err(BenchFull);
        }
        debug_assert!(
            self.slot_of(passenger).is_none(),
            "passenger {passenger} is already benched"
        );
        self.occupants.push(BenchOccupant { passenger, color });
        Ok(self.occupants.len() - 1)
    }

    /// Removes the earliest-arrived passenger of `color` and compacts.
    pub fn dequeue_by_color(&mut self, color: PassengerColor) -> Option<Dequeued> {
        let slot = self.occupants.iter().position(|o| o.color == color)?;
        Some(self.remove_at(slot))
    }

    fn remove_at(&mut self, slot: usize) -> Dequeued {
        let removed = self.occupants.remove(slot);
        let shifted = self.occupants[slot..]
            .iter()
            .enumerate()
            .map(|(offset, o)| SlotMove {
                passenger: o.passenger,
                from: slot + offset + 1,
                to: slot + offset,
            })
            .collect();
        Dequeued {
            passenger: removed.passenger,
            vacated_slot: slot,
            shifted,
        }
    }

    pub fn count_of_color(&self, color: PassengerColor) -> usize {
        self.occupants.iter().filter(|o| o.color == color).count()
    }

    pub fn slot_of(&self, passenger: PassengerId) -> Option<usize> {
        self.occupants.iter().position(|o| o.passenger == passenger)
    }

    /// Occupants in slot order.
    pub fn occupants(&self) -> &[BenchOccupant] {
        &self.occupants
    }
}
