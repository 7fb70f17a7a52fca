//! Platform abstraction layer
//!
//! The simulation never reads a live key map or a global clock. The embedder
//! implements [`KeyState`] over whatever input backend it has, and the loop
//! samples it once per tick into a [`TickContext`].

use std::collections::HashSet;

/// Logical inputs the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    MoveLeft,
    MoveRight,
    Fire,
    /// Restart after game over
    Confirm,
}

/// Queryable pressed/not-pressed state of the logical inputs
pub trait KeyState {
    fn is_pressed(&self, key: Key) -> bool;
}

impl KeyState for HashSet<Key> {
    fn is_pressed(&self, key: Key) -> bool {
        self.contains(&key)
    }
}

/// Input sampled once at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    pub confirm: bool,
}

impl InputSnapshot {
    pub fn sample(keys: &dyn KeyState) -> Self {
        Self {
            move_left: keys.is_pressed(Key::MoveLeft),
            move_right: keys.is_pressed(Key::MoveRight),
            fire: keys.is_pressed(Key::Fire),
            confirm: keys.is_pressed(Key::Confirm),
        }
    }

    /// Horizontal intent: -1, 0 or 1 (both keys cancel out)
    pub fn horizontal(&self) -> f32 {
        match (self.move_left, self.move_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

impl KeyState for InputSnapshot {
    fn is_pressed(&self, key: Key) -> bool {
        match key {
            Key::MoveLeft => self.move_left,
            Key::MoveRight => self.move_right,
            Key::Fire => self.fire,
            Key::Confirm => self.confirm,
        }
    }
}

/// Immutable per-tick context threaded through every update
#[derive(Debug, Clone, Copy, Default)]
pub struct TickContext {
    /// Elapsed wall-clock time in milliseconds
    pub now_ms: f64,
    pub input: InputSnapshot,
}

impl TickContext {
    pub fn new(now_ms: f64, input: InputSnapshot) -> Self {
        Self { now_ms, input }
    }

    /// Milliseconds elapsed since `timestamp`
    #[inline]
    pub fn since(&self, timestamp: f64) -> f64 {
        self.now_ms - timestamp
    }
}
