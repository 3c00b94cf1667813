//! Periodic dispatch scheduler.
//!
//! Polled cooperatively from the main loop at arbitrary, irregular rates.
//! The scheduler only decides *whether* the current tick is due; the
//! caller reads the sample and emits the event.
//!
//! ```text
//!               gate opens (rephase: next = now + interval)
//!        ┌──────┐ ───────────────────────────────────▶ ┌───────┐
//!        │ Idle │                                      │ Armed │──┐ due: next += k·interval
//!        └──────┘ ◀─────────────────────────────────── └───────┘◀─┘ emit once
//!                          gate closes
//! ```
//!
//! ## Wraparound
//!
//! `next_fire_time_us` is an absolute reading of a 32-bit microsecond
//! counter that wraps every ~71.6 minutes.  Due-ness is always the signed
//! difference `(now - next) as i32 >= 0`, never a direct `>=`, which stays
//! correct as long as the loop polls at least once per ~35 minutes.

use log::debug;

// ═══════════════════════════════════════════════════════════════
//  Due predicate
// ═══════════════════════════════════════════════════════════════

/// Signed distance from `deadline_us` to `now_us`, wraparound-safe.
pub const fn elapsed_since(now_us: u32, deadline_us: u32) -> i32 {
    now_us.wrapping_sub(deadline_us) as i32
}

/// Whether `deadline_us` has been reached at `now_us`.
pub const fn is_due(now_us: u32, deadline_us: u32) -> bool {
    elapsed_since(now_us, deadline_us) >= 0
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// Gate closed; not counting.
    Idle,
    /// Gate open; counting toward `next_fire_time_us`.
    Armed,
}

/// Result of one [`DispatchScheduler::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// Gate closed.
    Idle,
    /// Armed but not yet due.
    Pending,
    /// Due: emit exactly one event.  `missed` counts whole periods that
    /// elapsed beyond this one and were skipped.
    Due { missed: u32 },
}

#[derive(Debug, Clone)]
pub struct DispatchScheduler {
    interval_us: u32,
    next_fire_time_us: u32,
    state: DispatchState,
    /// Periods skipped by catch-up since the last reset.
    missed_periods: u32,
}

impl DispatchScheduler {
    /// A scheduler armed at `now_us + interval_us`.
    pub const fn new(interval_us: u32, now_us: u32) -> Self {
        Self {
            interval_us,
            next_fire_time_us: now_us.wrapping_add(interval_us),
            state: DispatchState::Armed,
            missed_periods: 0,
        }
    }

    /// Back to the post-reset baseline: armed, first fire one full interval
    /// from now, counters cleared.  Nothing can be overdue afterwards.
    pub fn reset(&mut self, interval_us: u32, now_us: u32) {
        *self = Self::new(interval_us, now_us);
    }

    /// Install a new interval and restart the phase from `now_us`, so that
    /// shortening the interval cannot produce a burst of overdue fires.
    pub fn set_interval(&mut self, interval_us: u32, now_us: u32) {
        self.interval_us = interval_us;
        self.rephase(now_us);
    }

    fn rephase(&mut self, now_us: u32) {
        self.next_fire_time_us = now_us.wrapping_add(self.interval_us);
    }

    /// Evaluate one loop tick.  Never blocks.
    pub fn poll(&mut self, now_us: u32, gate_open: bool) -> Poll {
        if !gate_open || self.interval_us == 0 {
            if self.state == DispatchState::Armed {
                debug!("dispatch: idle");
                self.state = DispatchState::Idle;
            }
            return Poll::Idle;
        }

        if self.state == DispatchState::Idle {
            // The old deadline may be arbitrarily stale (or wrapped); start
            // a fresh period instead of trusting it.
            debug!("dispatch: armed, every {}us", self.interval_us);
            self.state = DispatchState::Armed;
            self.rephase(now_us);
            return Poll::Pending;
        }

        let elapsed = elapsed_since(now_us, self.next_fire_time_us);
        if elapsed < 0 {
            return Poll::Pending;
        }

        // Advance past `now` in one step: fire once, skip the rest.
        let missed = elapsed as u32 / self.interval_us;
        self.next_fire_time_us = self
            .next_fire_time_us
            .wrapping_add(self.interval_us.wrapping_mul(missed + 1));
        if missed > 0 {
            debug!("dispatch: skipped {missed} missed periods");
            self.missed_periods = self.missed_periods.saturating_add(missed);
        }
        Poll::Due { missed }
    }

    pub fn interval_us(&self) -> u32 {
        self.interval_us
    }

    pub fn next_fire_time_us(&self) -> u32 {
        self.next_fire_time_us
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    pub fn missed_periods(&self) -> u32 {
        self.missed_periods
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
