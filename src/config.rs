//! Device configuration.
//!
//! Identity reported to the transport core, dispatch policy, and
//! acquisition timing.  Values are validated before use, never silently
//! clamped: a bad config is a deployment error, not host input.

use core::num::NonZeroU16;

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::registers::state::EventSource;
use crate::registers::table::APP_REG_COUNT;

/// First address available to application registers; everything below
/// belongs to the transport core's common registers.
pub const APP_REG_START_ADDRESS: u8 = 32;

/// Length of the device-name register.
pub const DEVICE_NAME_LEN: usize = 25;

/// Identity the transport core publishes in its common registers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub who_am_i: u16,
    pub hw_version: (u8, u8),
    pub assembly_version: u8,
    pub protocol_version: (u8, u8),
    pub fw_version: (u8, u8),
    pub serial_number: u16,
    pub name: String<DEVICE_NAME_LEN>,
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        let mut name = String::new();
        let _ = name.push_str("Sniff Detector");
        Self {
            who_am_i: 0x0579,
            hw_version: (0, 0),
            assembly_version: 0,
            protocol_version: (0, 0),
            fw_version: (0, 0),
            serial_number: 0,
            name,
        }
    }
}

/// Periodic event dispatch policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Address of the first application register.
    pub app_reg_start_address: u8,
    /// Frequency restored on reset (0 = dispatch off).
    pub default_frequency_hz: u16,
    /// Ceiling for host-requested frequencies.
    pub max_frequency_hz: u16,
    /// `EventEnable` value restored on reset.
    pub default_event_mask: u8,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            app_reg_start_address: APP_REG_START_ADDRESS,
            default_frequency_hz: 1,
            max_frequency_hz: 1000,
            default_event_mask: EventSource::RawVoltage.mask(),
        }
    }
}

impl DispatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_frequency_hz == 0 {
            return Err(Error::Config("max_frequency_hz must be non-zero"));
        }
        if self.default_frequency_hz > self.max_frequency_hz {
            return Err(Error::Config("default_frequency_hz exceeds max_frequency_hz"));
        }
        if self.app_reg_start_address < APP_REG_START_ADDRESS {
            return Err(Error::Config("app_reg_start_address overlaps core registers"));
        }
        if usize::from(self.app_reg_start_address) + APP_REG_COUNT > 256 {
            return Err(Error::Config("register block overflows the address space"));
        }
        if self.default_event_mask & !EventSource::ALL != 0 {
            return Err(Error::Config("default_event_mask has unknown bits"));
        }
        Ok(())
    }

    /// Ceiling as a non-zero value.  Only meaningful after [`validate`](Self::validate).
    pub fn max_frequency(&self) -> NonZeroU16 {
        NonZeroU16::new(self.max_frequency_hz).unwrap_or(NonZeroU16::MIN)
    }
}

/// Complete device configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub identity: DeviceIdentity,
    pub dispatch: DispatchConfig,
    /// ADC conversion period of the acquisition producer (microseconds).
    pub sample_interval_us: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            identity: DeviceIdentity::default(),
            dispatch: DispatchConfig::default(),
            sample_interval_us: 10_000,
        }
    }
}

impl DeviceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sample_interval_us == 0 {
            return Err(Error::Config("sample_interval_us must be non-zero"));
        }
        self.dispatch.validate()
    }

    /// Parse a JSON config; missing sections are an error, bad values are
    /// caught by [`validate`](Self::validate).
    pub fn from_json(json: &[u8]) -> Result<Self> {
        let config: Self =
            serde_json::from_slice(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }
}

/// Firmware defaults: 1 Hz dispatch of a 100 Hz acquisition.
pub fn default_config() -> DeviceConfig {
    DeviceConfig::default()
}
