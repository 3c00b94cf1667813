//! Enable/mute gate.
//!
//! Dispatch may fire only while the locally owned enable flag is set and
//! the transport's mute flag is clear.  The mute flag belongs to the
//! transport and is passed in on every check; the gate never stores it.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnableGate {
    enabled: bool,
}

impl EnableGate {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_open(&self, muted: bool) -> bool {
        self.enabled && !muted
    }
}
