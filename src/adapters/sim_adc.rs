//! Simulated ADS7049 for host runs.
//!
//! Implements [`SpiDevice`] and clocks out frames for a slow breathing-like
//! waveform, so the real [`Thermistor`] driver decodes them exactly as it
//! would on the node.  [`spawn_acquisition`] plays the DMA producer: a
//! background thread converting at a fixed period into the shared cell.

use std::f32::consts::TAU;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use embedded_hal::spi::{ErrorType, Operation, SpiDevice};
use log::warn;

use crate::sensors::SampleCell;
use crate::sensors::thermistor::{FULL_SCALE, Thermistor, encode_frame};

/// Respiration rate of the simulated subject.
const BREATH_HZ: f32 = 0.5;

pub struct SimAdc {
    start: Instant,
}

impl Default for SimAdc {
    fn default() -> Self {
        Self::new()
    }
}

impl SimAdc {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Mid-scale with a ±25 % swing: warm exhale, cool inhale.
    fn code_at(&self, t_secs: f32) -> u16 {
        let mid = f32::from(FULL_SCALE) / 2.0;
        let swing = f32::from(FULL_SCALE) / 4.0;
        (mid + swing * (TAU * BREATH_HZ * t_secs).sin()) as u16
    }
}

impl ErrorType for SimAdc {
    type Error = core::convert::Infallible;
}

impl SpiDevice for SimAdc {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        let frame = encode_frame(self.code_at(self.start.elapsed().as_secs_f32()));
        for op in operations {
            if let Operation::Read(buf) = op {
                for (dst, src) in buf.iter_mut().zip(frame) {
                    *dst = src;
                }
            }
        }
        Ok(())
    }
}

/// Convert every `interval` into `cell` on a background thread.
pub fn spawn_acquisition(cell: &'static SampleCell, interval: Duration) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut adc = Thermistor::new(SimAdc::new());
        loop {
            if let Err(e) = adc.sample_into(cell) {
                warn!("acquisition: {e}");
            }
            thread::sleep(interval);
        }
    })
}
