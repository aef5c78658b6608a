//! Move representation.
//!
//! A `DraughtsMove` is either one quiet step or a chain of capture steps by
//! the same piece. Moves and move lists are fixed-size values so generation
//! and search never touch the heap.

use std::fmt;
use std::ops::Index;

use crate::game_state::draughts_types::*;

/// One hop `from -> to`. For captures exactly one enemy lies between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Step {
    pub from: u8,
    pub to: u8,
}

impl Step {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from: from as u8,
            to: to as u8,
        }
    }

    #[inline]
    pub const fn from_square(self) -> Square {
        self.from as Square
    }

    #[inline]
    pub const fn to_square(self) -> Square {
        self.to as Square
    }

    #[inline]
    pub const fn row_distance(self) -> i32 {
        (row_of(self.to_square()) - row_of(self.from_square())).abs()
    }
}

/// Compact move identity used by the TT, killer slots and history.
///
/// Two moves with the same origin, destination and step count share a key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MoveKey(u32);

impl MoveKey {
    pub const NONE: MoveKey = MoveKey(0);

    #[inline]
    pub const fn new(from: Square, to: Square, len: usize) -> Self {
        MoveKey((from as u32) | ((to as u32) << 8) | ((len as u32) << 16))
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DraughtsMove {
    steps: [Step; MAX_CHAIN],
    len: u8,
    capture: bool,
}

impl DraughtsMove {
    /// Empty chain, the seed for capture enumeration.
    pub const EMPTY_CAPTURE: DraughtsMove = DraughtsMove {
        steps: [Step { from: 0, to: 0 }; MAX_CHAIN],
        len: 0,
        capture: true,
    };

    /// A single non-capturing step.
    pub fn quiet(from: Square, to: Square) -> Self {
        let mut mv = Self::default();
        mv.steps[0] = Step::new(from, to);
        mv.len = 1;
        mv
    }

    /// A capture chain built from consecutive steps. Steps past `MAX_CHAIN`
    /// are ignored.
    pub fn capture(steps: &[Step]) -> Self {
        let mut mv = Self::EMPTY_CAPTURE;
        for &step in steps.iter().take(MAX_CHAIN) {
            mv.push_step(step);
        }
        mv
    }

    #[inline]
    pub fn push_step(&mut self, step: Step) {
        if (self.len as usize) < MAX_CHAIN {
            self.steps[self.len as usize] = step;
            self.len += 1;
        }
    }

    #[inline]
    pub fn pop_step(&mut self) {
        if self.len > 0 {
            self.len -= 1;
            self.steps[self.len as usize] = Step::default();
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn steps(&self) -> &[Step] {
        &self.steps[..self.len as usize]
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.capture && self.len > 0
    }

    #[inline]
    pub fn from(&self) -> Square {
        self.steps[0].from_square()
    }

    /// Final landing square.
    #[inline]
    pub fn to(&self) -> Square {
        self.steps[self.len.saturating_sub(1) as usize].to_square()
    }

    /// Rows travelled between the origin and the final landing square.
    #[inline]
    pub fn row_span(&self) -> i32 {
        (row_of(self.to()) - row_of(self.from())).abs()
    }

    #[inline]
    pub fn key(&self) -> MoveKey {
        if self.is_empty() {
            return MoveKey::NONE;
        }
        MoveKey::new(self.from(), self.to(), self.len())
    }
}

impl fmt::Display for DraughtsMove {
    /// `(r1,c1-r2,c2)` per step, joined by `->`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps().iter().enumerate() {
            if i > 0 {
                f.write_str("->")?;
            }
            write!(
                f,
                "({},{}-{},{})",
                row_of(step.from_square()),
                col_of(step.from_square()),
                row_of(step.to_square()),
                col_of(step.to_square())
            )?;
        }
        Ok(())
    }
}

/// Bounded per-node move buffer. Pushes past capacity are dropped.
#[derive(Debug, Clone)]
pub struct MoveList {
    moves: [DraughtsMove; MAX_MOVES],
    len: usize,
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveList {
    pub fn new() -> Self {
        Self {
            moves: [DraughtsMove::default(); MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: DraughtsMove) {
        if self.len < MAX_MOVES {
            self.moves[self.len] = mv;
            self.len += 1;
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn first(&self) -> Option<&DraughtsMove> {
        self.as_slice().first()
    }

    #[inline]
    pub fn as_slice(&self) -> &[DraughtsMove] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [DraughtsMove] {
        &mut self.moves[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, DraughtsMove> {
        self.as_slice().iter()
    }
}

impl Index<usize> for MoveList {
    type Output = DraughtsMove;

    fn index(&self, index: usize) -> &DraughtsMove {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a DraughtsMove;
    type IntoIter = std::slice::Iter<'a, DraughtsMove>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
