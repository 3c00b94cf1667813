//! The application register block.
//!
//! `RegisterState` is the one mutable structure holding every application
//! register value.  It is owned by the [`AppService`](crate::app::service::AppService)
//! and mutated only by write handlers and the lifecycle reset, with one
//! exception: the raw sample lives in a [`SampleCell`] that the acquisition
//! producer overwrites asynchronously.

use crate::sensors::SampleCell;

/// Storage location of a logical register inside [`RegisterState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    RawVoltage,
    ErrorState,
    EventEnable,
    DispatchFrequency,
}

/// Bits of the `ErrorState` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorFlag {
    /// The thermistor is not connected.
    SensorNotDetected = 0b0000_0001,
}

impl ErrorFlag {
    pub const fn mask(self) -> u8 {
        self as u8
    }
}

/// Bits of the `EventEnable` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EventSource {
    /// Periodic `RawVoltage` events.
    RawVoltage = 0b0000_0001,
}

impl EventSource {
    pub const fn mask(self) -> u8 {
        self as u8
    }

    /// Every bit the `EventEnable` register understands.
    pub const ALL: u8 = Self::RawVoltage.mask();
}

/// Application register values.
#[derive(Debug)]
pub struct RegisterState {
    raw_voltage: &'static SampleCell,
    error_state: u8,
    event_enable: u8,
    dispatch_frequency_hz: u16,
}

impl RegisterState {
    /// Bind the block to the sample cell fed by the acquisition pipeline.
    /// Every other field starts zeroed until the first reset.
    pub const fn new(raw_voltage: &'static SampleCell) -> Self {
        Self {
            raw_voltage,
            error_state: 0,
            event_enable: 0,
            dispatch_frequency_hz: 0,
        }
    }

    /// Latest raw ADC sample.  Last-value-wins snapshot; see [`SampleCell`].
    pub fn raw_voltage(&self) -> u16 {
        self.raw_voltage.load()
    }

    pub fn error_state(&self) -> u8 {
        self.error_state
    }

    pub fn event_enable(&self) -> u8 {
        self.event_enable
    }

    pub fn dispatch_frequency_hz(&self) -> u16 {
        self.dispatch_frequency_hz
    }

    pub(crate) fn set_error_state(&mut self, flags: u8) {
        self.error_state = flags;
    }

    pub(crate) fn set_event_enable(&mut self, mask: u8) {
        self.event_enable = mask;
    }

    pub(crate) fn set_dispatch_frequency_hz(&mut self, hz: u16) {
        self.dispatch_frequency_hz = hz;
    }

    /// Zero-extended value of `field`.
    pub(crate) fn load(&self, field: Field) -> u64 {
        match field {
            Field::RawVoltage => u64::from(self.raw_voltage()),
            Field::ErrorState => u64::from(self.error_state),
            Field::EventEnable => u64::from(self.event_enable),
            Field::DispatchFrequency => u64::from(self.dispatch_frequency_hz),
        }
    }

    /// Store `value` into `field`, truncated to the field width.
    pub(crate) fn store(&mut self, field: Field, value: u64) {
        match field {
            // Owned by the acquisition producer.
            Field::RawVoltage => {}
            Field::ErrorState => self.error_state = value as u8,
            Field::EventEnable => self.event_enable = value as u8,
            Field::DispatchFrequency => self.dispatch_frequency_hz = value as u16,
        }
    }
}
