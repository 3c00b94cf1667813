//! Device loop: the glue the transport core's `run()` provides.
//!
//! Registration hands the core the [`AppService`], which carries the
//! descriptor table, the per-register handler pairs, the per-tick update
//! and the reset callback.  Each iteration drains a bounded number of host
//! requests and then ticks the dispatcher once.

use core::ops::ControlFlow;

use log::info;

use crate::app::commands::HostRequest;
use crate::app::ports::{Clock, HostLink, RequestSource};
use crate::app::service::AppService;
use crate::config::DeviceIdentity;

/// Requests handled per iteration before the dispatcher gets its tick, so a
/// chatty host cannot starve event dispatch.
pub const MAX_REQUESTS_PER_TICK: usize = 8;

/// Counters for one iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub requests: usize,
    pub rejected: usize,
    pub event_sent: bool,
}

pub struct Device<L, C> {
    identity: DeviceIdentity,
    app: AppService,
    link: L,
    clock: C,
}

impl<L, C> Device<L, C>
where
    L: HostLink + RequestSource,
    C: Clock,
{
    pub fn new(identity: DeviceIdentity, app: AppService, link: L, clock: C) -> Self {
        info!(
            "{} (id 0x{:04X}, fw {}.{}), registers {}..{}",
            identity.name,
            identity.who_am_i,
            identity.fw_version.0,
            identity.fw_version.1,
            app.table().base_address(),
            app.table().base_address() as usize + app.table().len() - 1,
        );
        Self {
            identity,
            app,
            link,
            clock,
        }
    }

    /// One loop iteration.
    pub fn run_once(&mut self) -> TickReport {
        let mut report = TickReport::default();
        while report.requests < MAX_REQUESTS_PER_TICK {
            let Some(request) = self.link.poll_request() else {
                break;
            };
            report.requests += 1;
            if let HostRequest::Reset = request {
                info!("host reset");
            }
            let now = self.clock.now_us();
            if self.app.handle_request(&request, now, &mut self.link).is_err() {
                report.rejected += 1;
            }
        }
        let now = self.clock.now_us();
        report.event_sent = self.app.update(now, &mut self.link);
        report
    }

    /// Poll forever without pausing.  Meant for the node, where the loop
    /// owns the core; hosts should use [`run_until`](Self::run_until).
    pub fn run(&mut self) -> ! {
        loop {
            self.run_once();
            core::hint::spin_loop();
        }
    }

    /// Poll until `pace` breaks.  `pace` sees every iteration's report and
    /// decides how long to idle before the next one.
    pub fn run_until<F>(&mut self, mut pace: F) -> usize
    where
        F: FnMut(&TickReport) -> ControlFlow<()>,
    {
        let mut iterations = 0;
        loop {
            let report = self.run_once();
            iterations += 1;
            if pace(&report).is_break() {
                return iterations;
            }
        }
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn app(&self) -> &AppService {
        &self.app
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
