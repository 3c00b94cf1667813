//! Outbound replies and events.
//!
//! The [`AppService`](super::service::AppService) hands these to the
//! [`HostLink`](super::ports::HostLink) port.  Serialising them onto the
//! wire (headers, timestamps, checksums) is the transport's job.

use crate::registers::RegisterValue;

/// Message types understood by the device protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageType {
    Read = 1,
    Write = 2,
    /// Unsolicited, scheduled broadcast of a register value.
    Event = 3,
    ReadError = 9,
    WriteError = 10,
}

impl MessageType {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn is_error(self) -> bool {
        matches!(self, Self::ReadError | Self::WriteError)
    }
}

/// Direction of the request an error reply answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl Access {
    pub const fn error_type(self) -> MessageType {
        match self {
            Self::Read => MessageType::ReadError,
            Self::Write => MessageType::WriteError,
        }
    }
}

/// One message to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub message_type: MessageType,
    pub address: u8,
    /// Current register value; `None` when the address names no register.
    pub value: Option<RegisterValue>,
}

impl Reply {
    pub fn new(message_type: MessageType, address: u8, value: Option<RegisterValue>) -> Self {
        Self {
            message_type,
            address,
            value,
        }
    }
}
