//! Host-side transport plumbing shared between threads.
//!
//! The scripted host (or a real transport reader) runs on its own thread
//! and hands parsed requests to the polling loop through a bounded static
//! `embassy-sync` channel; nothing is heap-allocated and a flooding host
//! sees `try_send` fail instead of growing a queue.
//!
//! ```text
//! ┌──────────────┐  HostRequest  ┌──────────────┐
//! │  Host thread │──────────────▶│ Polling loop │
//! │  (transport) │  HOST_MUTED   │  (Device)    │
//! └──────────────┘──────────────▶└──────────────┘
//! ```

use core::sync::atomic::AtomicBool;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::app::commands::HostRequest;

/// Depth of the inbound request queue.
pub const REQUEST_DEPTH: usize = 8;

pub type RequestChannel = Channel<CriticalSectionRawMutex, HostRequest, REQUEST_DEPTH>;

/// Inbound requests: host thread → polling loop.
pub static HOST_REQUESTS: RequestChannel = Channel::new();

/// Transport-level mute flag, owned by the host side.
pub static HOST_MUTED: AtomicBool = AtomicBool::new(false);
