//! Inbound host requests.
//!
//! The transport has already parsed the frame, checked its checksum and
//! routed it to the application block by the time one of these arrives.

use crate::registers::{MAX_REGISTER_BYTES, Payload};

/// Requests the transport forwards into the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRequest {
    /// Read a register.
    Read { address: u8 },

    /// Write raw payload bytes into a register.
    Write { address: u8, payload: Payload },

    /// Device reset command: restore register defaults and scheduler phase.
    Reset,
}

impl HostRequest {
    /// Write request carrying `bytes`; `None` if they exceed the widest
    /// register.
    pub fn write(address: u8, bytes: &[u8]) -> Option<Self> {
        if bytes.len() > MAX_REGISTER_BYTES {
            return None;
        }
        Payload::from_slice(bytes)
            .ok()
            .map(|payload| Self::Write { address, payload })
    }

    pub fn write_u8(address: u8, value: u8) -> Self {
        let mut payload = Payload::new();
        let _ = payload.push(value);
        Self::Write { address, payload }
    }

    pub fn write_u16(address: u8, value: u16) -> Self {
        let mut payload = Payload::new();
        for b in value.to_le_bytes() {
            let _ = payload.push(b);
        }
        Self::Write { address, payload }
    }
}
