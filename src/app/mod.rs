//! Application core: pure dispatch logic, zero I/O.
//!
//! The register file, frequency policy, scheduler and gate are owned by
//! [`service::AppService`].  Every interaction with the transport core
//! happens through the **port traits** in [`ports`], keeping this layer
//! fully testable on the host.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
