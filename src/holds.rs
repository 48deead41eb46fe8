//! Endless hold sequence with a bounded same-side run length.
//!
//! The window is a queue: the due hold is the oldest entry at the front, new holds
//! are appended at the back (top of the wall). Each new side is a fair coin flip,
//! except when the trailing run is one short of `max_run`, in which case the
//! opposite side is forced.

use crate::bone::Side;
use rand::rngs::SmallRng;
use rand::Rng;
use serde::Serialize;
use std::collections::VecDeque;

/// Cosmetic hold shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HoldShape {
    Jug,
    Crimp,
    Sloper,
    Pinch,
}

impl HoldShape {
    const ALL: [HoldShape; 4] = [HoldShape::Jug, HoldShape::Crimp, HoldShape::Sloper, HoldShape::Pinch];
}

/// Visual attributes of a hold. Not used by any game rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoldStyle {
    /// Size multiplier around 1.0
    pub size: f32,
    pub shape: HoldShape,
    /// Index into the host's hold palette
    pub tint: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hold {
    /// Monotonic id, stable while the hold scrolls through the window
    pub id: u64,
    pub side: Side,
    pub style: HoldStyle,
}

/// Number of hold palette entries the host provides
pub const HOLD_TINTS: u8 = 6;

#[derive(Debug, Clone)]
pub struct HoldSequence {
    holds: VecDeque<Hold>,
    /// Window never drops below this many holds after a top-up
    floor: usize,
    max_run: usize,
    next_id: u64,
    rng: SmallRng,
}

impl HoldSequence {
    /// Create a sequence and fill its window.
    ///
    /// `max_run` below 2 is raised to 2, and `floor` is raised to `max_run` so the
    /// window always remembers enough recent sides to bound the run.
    pub fn new(floor: usize, max_run: usize, rng: SmallRng) -> Self {
        let max_run = max_run.max(2);
        let floor = floor.max(max_run);
        let mut sequence = Self {
            holds: VecDeque::with_capacity(floor + 1),
            floor,
            max_run,
            next_id: 0,
            rng,
        };
        sequence.top_up();
        sequence
    }

    /// Tear the window down and build a fresh one
    pub fn rebuild(&mut self) {
        self.holds.clear();
        self.top_up();
    }

    /// Side of the due hold: the one move that is correct right now
    pub fn peek_due(&self) -> Option<Side> {
        self.holds.front().map(|hold| hold.side)
    }

    /// Remove and return the due hold. Follow with [`Self::top_up`].
    pub fn consume_due(&mut self) -> Option<Hold> {
        self.holds.pop_front()
    }

    /// Append holds until the window is back at its floor size
    pub fn top_up(&mut self) {
        while self.holds.len() < self.floor {
            self.append_next();
        }
    }

    /// Consecutive most-recent holds sharing the last hold's side.
    ///
    /// Only the last `max_run` entries are inspected, so the count is capped there.
    pub fn trailing_run(&self) -> usize {
        let mut recent = self.holds.iter().rev().take(self.max_run);
        let Some(last) = recent.next() else {
            return 0;
        };
        1 + recent.take_while(|hold| hold.side == last.side).count()
    }

    /// Draw the next hold and append it to the top of the window
    pub fn append_next(&mut self) -> Hold {
        let run = self.trailing_run();
        let side = match self.holds.back() {
            Some(last) if run + 1 >= self.max_run => last.side.opposite(),
            _ => {
                if self.rng.random_bool(0.5) {
                    Side::Left
                } else {
                    Side::Right
                }
            }
        };
        let hold = Hold {
            id: self.next_id,
            side,
            style: self.draw_style(),
        };
        self.next_id += 1;
        self.holds.push_back(hold);
        hold
    }

    fn draw_style(&mut self) -> HoldStyle {
        HoldStyle {
            size: self.rng.random_range(0.8..1.2),
            shape: HoldShape::ALL[self.rng.random_range(0..HoldShape::ALL.len())],
            tint: self.rng.random_range(0..HOLD_TINTS),
        }
    }

    /// Holds from the due one upwards
    pub fn iter(&self) -> impl Iterator<Item = &Hold> {
        self.holds.iter()
    }

    pub fn len(&self) -> usize {
        self.holds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holds.is_empty()
    }

    pub fn max_run(&self) -> usize {
        self.max_run
    }
}
