//! Unified error types for the sniff detector application layer.
//!
//! A single `Error` enum that every subsystem converts into.  All variants
//! are `Copy` so they can be handed back from register handlers and logged
//! from the polling loop without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A host register request was rejected.
    Register(RegisterError),
    /// The thermistor ADC could not be read.
    Sensor(SensorError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register(e) => write!(f, "register: {e}"),
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Register errors
// ---------------------------------------------------------------------------

/// Errors reported to the host at the point of the offending request.
///
/// None of these halt the polling loop; the service answers with a
/// read-error or write-error reply and carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    /// The host wrote an out-of-range value.  The value may still have been
    /// clamped and applied (see the dispatch-frequency handler).
    WriteRejected { address: u8 },
    /// The register has no write semantics.
    ReadOnlyViolation { address: u8 },
    /// The address is outside the application register block.
    UnknownAddress(u8),
    /// The payload width does not match the register width.
    PayloadLength {
        address: u8,
        expected: usize,
        got: usize,
    },
    /// Reserved for error-state reporting that is not raised yet.
    Unspecified,
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteRejected { address } => write!(f, "write to {address} rejected"),
            Self::ReadOnlyViolation { address } => write!(f, "register {address} is read-only"),
            Self::UnknownAddress(address) => write!(f, "no register at address {address}"),
            Self::PayloadLength {
                address,
                expected,
                got,
            } => write!(
                f,
                "register {address} expects {expected} payload bytes, got {got}"
            ),
            Self::Unspecified => write!(f, "unspecified error"),
        }
    }
}

impl From<RegisterError> for Error {
    fn from(e: RegisterError) -> Self {
        Self::Register(e)
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The SPI transaction with the ADC failed.
    SpiTransferFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpiTransferFailed => write!(f, "SPI transfer failed"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
