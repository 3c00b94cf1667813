//! Sniff detector application layer.
//!
//! A register-mapped periodic event dispatcher for a thermistor sensor
//! node.  The device-protocol transport (framing, parsing, sync clock) is
//! an external collaborator reached through the port traits in
//! [`app::ports`]; everything here is pure logic and runs on the host for
//! testing.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod device;
pub mod error;
pub mod frequency;
pub mod gate;
pub mod registers;
pub mod scheduler;
pub mod sensors;
