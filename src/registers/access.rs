//! Register access layer: the default read and write handlers.
//!
//! Registers with side effects (dispatch frequency, event enable) build on
//! [`write_generic`] and then validate; see
//! [`AppService`](crate::app::service::AppService).  Replies to the host are
//! sent by the caller, synchronously, before the request returns.

use super::state::RegisterState;
use super::table::RegisterDescriptor;
use super::{RegisterValue, le_to_u64};
use crate::error::RegisterError;

/// Copy exactly `size_bytes` of the register out of the block.
pub fn read(state: &RegisterState, desc: &RegisterDescriptor) -> RegisterValue {
    RegisterValue::from_le(desc.payload_type, state.load(desc.field))
}

/// Copy `payload` verbatim into the register.
///
/// The transport validates payload length before dispatch; a mismatch is
/// still refused here rather than partially applied.
pub fn write_generic(
    state: &mut RegisterState,
    desc: &RegisterDescriptor,
    address: u8,
    payload: &[u8],
) -> Result<(), RegisterError> {
    if payload.len() != desc.size_bytes {
        return Err(RegisterError::PayloadLength {
            address,
            expected: desc.size_bytes,
            got: payload.len(),
        });
    }
    state.store(desc.field, le_to_u64(payload));
    Ok(())
}

/// Handler for registers with no write semantics.  Never mutates state.
pub fn write_read_only_error(address: u8) -> Result<(), RegisterError> {
    Err(RegisterError::ReadOnlyViolation { address })
}
