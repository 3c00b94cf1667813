//! Application register file.
//!
//! ```text
//!  host request ──▶ RegisterTable::lookup ──▶ RegisterDescriptor
//!                                                 │
//!                        ┌────────────────────────┴─────────────┐
//!                        ▼                                      ▼
//!                  ReadHandler                            WriteHandler
//!                  (access::read)          (generic · read-only · validated)
//!                        │                                      │
//!                        └──────────────▶ RegisterState ◀───────┘
//! ```
//!
//! Registers are addressed contiguously from the configured base address
//! in descriptor-table order.  Multi-byte values are little-endian.

pub mod access;
pub mod state;
pub mod table;

use heapless::Vec;

/// Widest register payload supported by the device protocol (U64/S64).
pub const MAX_REGISTER_BYTES: usize = 8;

/// Raw register payload as carried by the transport.
pub type Payload = Vec<u8, MAX_REGISTER_BYTES>;

/// Primitive payload type tags.  Discriminants are the wire codes used by
/// the device protocol; the low nibble is the width in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PayloadType {
    U8 = 0x01,
    S8 = 0x81,
    U16 = 0x02,
    S16 = 0x82,
    U32 = 0x04,
    S32 = 0x84,
    U64 = 0x08,
    S64 = 0x88,
    Float = 0x44,
}

impl PayloadType {
    /// Width of one value of this type, in bytes.
    pub const fn width(self) -> usize {
        (self as u8 & 0x0F) as usize
    }

    /// Wire code of this type tag.
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::U8),
            0x81 => Some(Self::S8),
            0x02 => Some(Self::U16),
            0x82 => Some(Self::S16),
            0x04 => Some(Self::U32),
            0x84 => Some(Self::S32),
            0x08 => Some(Self::U64),
            0x88 => Some(Self::S64),
            0x44 => Some(Self::Float),
            _ => None,
        }
    }
}

/// A register value snapshot: type tag plus exactly `width` raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterValue {
    payload_type: PayloadType,
    bytes: Payload,
}

impl RegisterValue {
    /// Build a value from the low `payload_type.width()` bytes of `raw`
    /// (little-endian).
    pub fn from_le(payload_type: PayloadType, raw: u64) -> Self {
        let mut bytes = Payload::new();
        for &b in &raw.to_le_bytes()[..payload_type.width()] {
            // width() never exceeds MAX_REGISTER_BYTES.
            let _ = bytes.push(b);
        }
        Self {
            payload_type,
            bytes,
        }
    }

    pub fn from_u8(value: u8) -> Self {
        Self::from_le(PayloadType::U8, u64::from(value))
    }

    pub fn from_u16(value: u16) -> Self {
        Self::from_le(PayloadType::U16, u64::from(value))
    }

    pub fn payload_type(&self) -> PayloadType {
        self.payload_type
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Interpret the bytes as an unsigned little-endian integer.
    pub fn to_u64(&self) -> u64 {
        le_to_u64(&self.bytes)
    }

    pub fn as_u8(&self) -> Option<u8> {
        (self.payload_type == PayloadType::U8).then(|| self.bytes[0])
    }

    pub fn as_u16(&self) -> Option<u16> {
        (self.payload_type == PayloadType::U16).then(|| self.to_u64() as u16)
    }
}

/// Zero-extend up to eight little-endian bytes into a `u64`.
pub(crate) fn le_to_u64(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .take(MAX_REGISTER_BYTES)
        .enumerate()
        .fold(0u64, |acc, (i, &b)| acc | (u64::from(b) << (8 * i)))
}
