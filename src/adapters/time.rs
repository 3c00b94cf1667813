//! Host time adapter.
//!
//! Provides the free-running 32-bit microsecond counter the dispatcher
//! schedules against.  On the node this is the hardware timer's low word;
//! on the host it is derived from `std::time::Instant` and truncated to 32
//! bits so it wraps exactly like the hardware counter (~71.6 minutes).

use std::time::Instant;

use crate::app::ports::Clock;

pub struct MonotonicClock {
    start: Instant,
    /// Added to every reading; lets a simulation start close to a wrap.
    offset_us: u32,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::with_offset(0)
    }

    /// Clock whose first reading is `offset_us`.
    pub fn with_offset(offset_us: u32) -> Self {
        Self {
            start: Instant::now(),
            offset_us,
        }
    }

    /// Microseconds since construction (64-bit, does not wrap).
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

impl Clock for MonotonicClock {
    fn now_us(&self) -> u32 {
        (self.uptime_us() as u32).wrapping_add(self.offset_us)
    }
}
