//! The desk's day counter.

use crate::types::Day;

/// Monotonic day counter, advanced once each time the library opens
///
/// Owned by the [`Library`](crate::Library) it was handed to; nothing else
/// can move it forward.
#[derive(Clone, Debug, Default)]
pub struct Clock {
    day: Day,
}

impl Clock {
    /// A clock at day 0, before the library has ever opened
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock already at `day`
    pub fn starting_at(day: Day) -> Self {
        Self { day }
    }

    pub fn current(&self) -> Day {
        self.day
    }

    pub fn advance(&mut self) {
        self.day += 1;
    }
}
