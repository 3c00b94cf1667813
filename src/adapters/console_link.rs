//! Log-based host link adapter.
//!
//! Implements [`HostLink`] by writing every reply to the `log` facade, and
//! [`RequestSource`] by draining a bounded request channel that a scripted
//! host (or a real transport reader thread) feeds.  The mute flag belongs
//! to whoever plays the transport's role; the link only reads it.

use core::sync::atomic::{AtomicBool, Ordering};

use log::{info, warn};

use super::channels::RequestChannel;
use crate::app::commands::HostRequest;
use crate::app::events::{MessageType, Reply};
use crate::app::ports::{HostLink, RequestSource};

pub struct ConsoleLink {
    requests: &'static RequestChannel,
    muted: &'static AtomicBool,
}

impl ConsoleLink {
    pub fn new(requests: &'static RequestChannel, muted: &'static AtomicBool) -> Self {
        Self { requests, muted }
    }
}

impl HostLink for ConsoleLink {
    fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    fn send(&mut self, reply: Reply) {
        let bytes = reply.value.as_ref().map_or(&[][..], |v| v.as_bytes());
        match reply.message_type {
            MessageType::Event => {
                info!("EVENT | reg={} | {:02X?}", reply.address, bytes);
            }
            MessageType::Read | MessageType::Write => {
                info!("{:?} | reg={} | {:02X?}", reply.message_type, reply.address, bytes);
            }
            MessageType::ReadError | MessageType::WriteError => {
                warn!("{:?} | reg={} | {:02X?}", reply.message_type, reply.address, bytes);
            }
        }
    }
}

impl RequestSource for ConsoleLink {
    fn poll_request(&mut self) -> Option<HostRequest> {
        self.requests.try_receive().ok()
    }
}
