//! Register descriptor table.
//!
//! One [`RegisterDescriptor`] per logical register, built once by a
//! `const fn` and never resized.  The descriptor binds the register to its
//! storage [`Field`], its payload type, and the handler pair that serves
//! host reads and writes.

use super::PayloadType;
use super::state::Field;
use crate::error::RegisterError;

/// Number of application registers.
pub const APP_REG_COUNT: usize = 4;

/// Read handler variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadHandler {
    /// Copy the field bytes out verbatim.
    Generic,
}

/// Write handler variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteHandler {
    /// Copy the payload into the field verbatim.  For plain read-write
    /// registers with no validation; the current map has none.
    Generic,
    /// Reject every write without touching state.
    ReadOnlyReject,
    /// Copy, then validate and apply side effects.
    Validated(Validator),
}

/// Validated write handlers with side effects on dispatch timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    EventEnable,
    DispatchFrequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterDescriptor {
    pub name: &'static str,
    pub field: Field,
    pub payload_type: PayloadType,
    /// Always `payload_type.width()`.
    pub size_bytes: usize,
    pub read: ReadHandler,
    pub write: WriteHandler,
}

impl RegisterDescriptor {
    pub const fn new(
        name: &'static str,
        field: Field,
        payload_type: PayloadType,
        read: ReadHandler,
        write: WriteHandler,
    ) -> Self {
        Self {
            name,
            field,
            payload_type,
            size_bytes: payload_type.width(),
            read,
            write,
        }
    }
}

/// Application register block, in address order.
const DESCRIPTORS: [RegisterDescriptor; APP_REG_COUNT] = [
    RegisterDescriptor::new(
        "RawVoltage",
        Field::RawVoltage,
        PayloadType::U16,
        ReadHandler::Generic,
        WriteHandler::ReadOnlyReject,
    ),
    RegisterDescriptor::new(
        "ErrorState",
        Field::ErrorState,
        PayloadType::U8,
        ReadHandler::Generic,
        WriteHandler::ReadOnlyReject,
    ),
    RegisterDescriptor::new(
        "EventEnable",
        Field::EventEnable,
        PayloadType::U8,
        ReadHandler::Generic,
        WriteHandler::Validated(Validator::EventEnable),
    ),
    RegisterDescriptor::new(
        "EventDispatchFrequency",
        Field::DispatchFrequency,
        PayloadType::U16,
        ReadHandler::Generic,
        WriteHandler::Validated(Validator::DispatchFrequency),
    ),
];

/// The fixed descriptor table anchored at a base address.
#[derive(Debug, Clone)]
pub struct RegisterTable {
    base_address: u8,
    descriptors: [RegisterDescriptor; APP_REG_COUNT],
}

impl RegisterTable {
    pub const fn new(base_address: u8) -> Self {
        Self {
            base_address,
            descriptors: DESCRIPTORS,
        }
    }

    pub fn base_address(&self) -> u8 {
        self.base_address
    }

    /// Resolve a host address to its descriptor.
    pub fn lookup(&self, address: u8) -> Result<&RegisterDescriptor, RegisterError> {
        address
            .checked_sub(self.base_address)
            .and_then(|offset| self.descriptors.get(offset as usize))
            .ok_or(RegisterError::UnknownAddress(address))
    }

    /// Offset of `field` inside the block, in descriptor-table order.
    pub const fn offset(field: Field) -> usize {
        match field {
            Field::RawVoltage => 0,
            Field::ErrorState => 1,
            Field::EventEnable => 2,
            Field::DispatchFrequency => 3,
        }
    }

    /// Address of the register stored in `field`.
    pub fn address_of(&self, field: Field) -> u8 {
        self.base_address.wrapping_add(Self::offset(field) as u8)
    }

    /// Descriptor for `field`.
    pub fn descriptor(&self, field: Field) -> &RegisterDescriptor {
        &self.descriptors[Self::offset(field)]
    }

    /// `(address, descriptor)` pairs in address order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &RegisterDescriptor)> {
        self.descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| (self.base_address.wrapping_add(i as u8), d))
    }

    pub fn len(&self) -> usize {
        APP_REG_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
