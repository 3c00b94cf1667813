//! Frequency-to-interval conversion and clamp policy.
//!
//! | requested `f`      | accepted | interval installed        | reply  |
//! |--------------------|----------|---------------------------|--------|
//! | `0`                | `0`      | none (dispatch disabled)  | ack    |
//! | `1..=max`          | `f`      | `1_000_000 / f`           | ack    |
//! | `> max`            | `max`    | `1_000_000 / max`         | error  |
//!
//! The clamp case still installs the minimum interval so the scheduler is
//! never left holding a stale period after an out-of-range request.

use core::num::NonZeroU16;

pub const MICROS_PER_SEC: u32 = 1_000_000;

/// Period in microseconds for a non-zero frequency (integer division).
pub const fn interval_us(hz: NonZeroU16) -> u32 {
    MICROS_PER_SEC / hz.get() as u32
}

/// Outcome of a frequency request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// In range.
    Accepted { hz: NonZeroU16, interval_us: u32 },
    /// Above the ceiling: clamped, installed, reported as an error.
    Clamped { hz: NonZeroU16, interval_us: u32 },
    /// Zero: dispatch off, no interval.
    Disabled,
}

impl Conversion {
    /// Value to store in the frequency register.
    pub fn accepted_hz(self) -> u16 {
        match self {
            Self::Accepted { hz, .. } | Self::Clamped { hz, .. } => hz.get(),
            Self::Disabled => 0,
        }
    }

    /// Interval to install, if any.
    pub fn interval_us(self) -> Option<u32> {
        match self {
            Self::Accepted { interval_us, .. } | Self::Clamped { interval_us, .. } => {
                Some(interval_us)
            }
            Self::Disabled => None,
        }
    }

    /// Whether the host should get an error reply.
    pub fn is_rejected(self) -> bool {
        matches!(self, Self::Clamped { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyConverter {
    max_hz: NonZeroU16,
}

impl FrequencyConverter {
    pub const fn new(max_hz: NonZeroU16) -> Self {
        Self { max_hz }
    }

    pub fn max_hz(&self) -> u16 {
        self.max_hz.get()
    }

    /// Shortest interval this converter will ever install.
    pub fn min_interval_us(&self) -> u32 {
        interval_us(self.max_hz)
    }

    pub fn convert(&self, requested_hz: u16) -> Conversion {
        match NonZeroU16::new(requested_hz) {
            None => Conversion::Disabled,
            Some(hz) if hz > self.max_hz => Conversion::Clamped {
                hz: self.max_hz,
                interval_us: self.min_interval_us(),
            },
            Some(hz) => Conversion::Accepted {
                hz,
                interval_us: interval_us(hz),
            },
        }
    }
}
