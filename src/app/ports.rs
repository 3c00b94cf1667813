//! Port traits: the boundary between the dispatcher and the transport core.
//!
//! ```text
//!   transport core ──▶ RequestSource ──▶ AppService ──▶ HostLink ──▶ transport core
//!                                           ▲
//!                                         Clock
//! ```
//!
//! The transport (framing, parsing, sync clock) is an external
//! collaborator.  It implements these traits; the
//! [`AppService`](super::service::AppService) consumes them via generics
//! and never touches the wire directly.

use super::commands::HostRequest;
use super::events::{Access, MessageType, Reply};
use crate::registers::RegisterValue;

// ───────────────────────────────────────────────────────────────
// Host link (domain → transport)
// ───────────────────────────────────────────────────────────────

/// Reply primitives and the transport-level mute flag.
///
/// Every call is synchronous and must not block: the transport queues or
/// drops as it sees fit.  Events are fire-and-forget.
pub trait HostLink {
    /// Global suppression of unsolicited events.  Read-only to the app.
    fn is_muted(&self) -> bool;

    /// Hand one message to the transport.
    fn send(&mut self, reply: Reply);

    fn send_event(&mut self, address: u8, value: RegisterValue) {
        self.send(Reply::new(MessageType::Event, address, Some(value)));
    }

    fn send_read(&mut self, address: u8, value: RegisterValue) {
        self.send(Reply::new(MessageType::Read, address, Some(value)));
    }

    /// Write acknowledgement carrying the register's value after the write.
    fn send_ack(&mut self, address: u8, value: RegisterValue) {
        self.send(Reply::new(MessageType::Write, address, Some(value)));
    }

    fn send_error(&mut self, access: Access, address: u8, value: Option<RegisterValue>) {
        self.send(Reply::new(access.error_type(), address, value));
    }
}

// ───────────────────────────────────────────────────────────────
// Request source (transport → domain)
// ───────────────────────────────────────────────────────────────

/// Parsed host requests addressed to the application block.
pub trait RequestSource {
    /// Next pending request.  Returns `None` immediately when idle.
    fn poll_request(&mut self) -> Option<HostRequest>;
}

// ───────────────────────────────────────────────────────────────
// Clock
// ───────────────────────────────────────────────────────────────

/// Free-running microsecond tick counter.  Wraps modulo 2^32.
pub trait Clock {
    fn now_us(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Null link
// ───────────────────────────────────────────────────────────────

/// A link that is never muted, discards every reply and never has
/// requests.  Useful when no host is attached.
pub struct NullLink;

impl HostLink for NullLink {
    fn is_muted(&self) -> bool {
        false
    }

    fn send(&mut self, _reply: Reply) {}
}

impl RequestSource for NullLink {
    fn poll_request(&mut self) -> Option<HostRequest> {
        None
    }
}
