//! Acquisition side: the shared sample cell and the thermistor ADC driver.
//!
//! The ADC is sampled continuously by a producer the polling loop does not
//! control (DMA on the target, a thread on the host).  The only thing the
//! two sides share is a [`SampleCell`].

pub mod thermistor;

use core::sync::atomic::{AtomicU16, Ordering};

/// Latest raw ADC sample, written asynchronously by the acquisition
/// producer and read by the register file.
///
/// There is no "sample ready" signal and no interlock: readers always get
/// whatever value was stored last.  The cell is exactly one 16-bit atomic
/// so a read can be stale but never torn.  `Relaxed` ordering is enough
/// because no other memory is published through the cell.
///
/// Place it in a `static` so the producer never borrows the application:
///
/// ```
/// use sniff_detector::sensors::SampleCell;
///
/// static RAW_VOLTAGE: SampleCell = SampleCell::new();
/// RAW_VOLTAGE.store(2048);
/// assert_eq!(RAW_VOLTAGE.load(), 2048);
/// ```
#[derive(Debug)]
pub struct SampleCell(AtomicU16);

impl SampleCell {
    pub const fn new() -> Self {
        Self(AtomicU16::new(0))
    }

    /// Snapshot of the latest sample.
    pub fn load(&self) -> u16 {
        self.0.load(Ordering::Relaxed)
    }

    /// Producer side.  Lock-free; safe to call from interrupt context.
    pub fn store(&self, raw: u16) {
        self.0.store(raw, Ordering::Relaxed);
    }
}

impl Default for SampleCell {
    fn default() -> Self {
        Self::new()
    }
}
