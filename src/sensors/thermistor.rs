//! ADS7049 12-bit SPI ADC reading the thermistor divider.
//!
//! One conversion is a 16-clock frame: two leading zeros, the 12-bit
//! result MSB first, then two trailing zeros.  Chip select framing is
//! handled by the [`SpiDevice`] implementation.
//!
//! ## Dual-target design
//!
//! On the node the driver runs in the acquisition context and stores each
//! conversion into the shared [`SampleCell`].  On the host it is driven by
//! the simulated ADC in [`adapters::sim_adc`](crate::adapters::sim_adc).

use embedded_hal::spi::SpiDevice;

use super::SampleCell;
use crate::error::SensorError;

/// Full-scale code of the 12-bit converter.
pub const FULL_SCALE: u16 = 0x0FFF;

pub struct Thermistor<SPI> {
    spi: SPI,
    total_reads: u32,
}

impl<SPI: SpiDevice> Thermistor<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self {
            spi,
            total_reads: 0,
        }
    }

    /// Run one conversion and return the raw 12-bit code.
    pub fn read_raw(&mut self) -> Result<u16, SensorError> {
        let mut frame = [0u8; 2];
        self.spi
            .read(&mut frame)
            .map_err(|_| SensorError::SpiTransferFailed)?;
        self.total_reads = self.total_reads.wrapping_add(1);
        Ok(decode_frame(frame))
    }

    /// Run one conversion and publish it to `cell`.  On failure the cell
    /// keeps its previous value.
    pub fn sample_into(&mut self, cell: &SampleCell) -> Result<u16, SensorError> {
        let raw = self.read_raw()?;
        cell.store(raw);
        Ok(raw)
    }

    pub fn total_reads(&self) -> u32 {
        self.total_reads
    }

    /// Give the SPI device back.
    pub fn release(self) -> SPI {
        self.spi
    }
}

/// Extract the conversion result from a raw 16-bit frame.
pub const fn decode_frame(frame: [u8; 2]) -> u16 {
    (u16::from_be_bytes(frame) >> 2) & FULL_SCALE
}

/// Build the frame the converter would clock out for `raw`.
pub const fn encode_frame(raw: u16) -> [u8; 2] {
    ((raw & FULL_SCALE) << 2).to_be_bytes()
}
