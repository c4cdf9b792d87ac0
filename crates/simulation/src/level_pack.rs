//! Ordered list of levels played one after another, with a cursor on the
//! level currently loaded.

use crate::level::Level;

#[derive(Debug, Clone)]
pub struct LevelPack {
    levels: Vec<Level>,
    current: usize,
}

impl LevelPack {
    /// `None` for an empty list.
    pub fn new(levels: Vec<Level>) -> Option<Self> {
        if levels.is_empty() {
            return None;
        }
        Some(Self { levels, current: 0 })
    }

    pub fn single(level: Level) -> Self {
        Self {
            levels: vec![level],
            current: 0,
        }
    }

    pub fn current(&self) -> &Level {
        &self.levels[self.current]
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.levels.len()
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    /// Moves the cursor forward. Returns false at the last level.
    pub fn advance(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Moves the cursor back. Returns false at the first level.
    pub fn retreat(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.levels.iter().map(Level::name)
    }
}
