//! Wall-clock sources.
//!
//! Game time is the host's tick counter; the only wall-clock reading the
//! engine takes is the `saved_at` stamp written into the system metadata
//! document on each save.

use crate::infrastructure::ports::ClockPort;
use chrono::{DateTime, Utc};

/// Real time, for the save stamp.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Pinned save stamp for tests.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
