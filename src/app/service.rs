//! Application service: the register-mapped periodic event dispatcher.
//!
//! [`AppService`] owns the register block, descriptor table, frequency
//! policy, scheduler and enable gate.  The transport core drives it
//! through three entry points:
//!
//! ```text
//!  HostRequest ──▶ handle_request ──▶ read/write handlers ──▶ reply
//!  loop tick   ──▶ update         ──▶ gate · scheduler    ──▶ event
//!  reset cmd   ──▶ reset          ──▶ defaults · phase
//! ```
//!
//! All three are synchronous, never block, and never panic on host input.

use log::{info, trace, warn};

use crate::config::DispatchConfig;
use crate::error::{RegisterError, Result};
use crate::frequency::{Conversion, FrequencyConverter, interval_us};
use crate::gate::EnableGate;
use crate::registers::access;
use crate::registers::state::{EventSource, Field, RegisterState};
use crate::registers::table::{
    ReadHandler, RegisterDescriptor, RegisterTable, Validator, WriteHandler,
};
use crate::registers::{RegisterValue, le_to_u64};
use crate::scheduler::{DispatchScheduler, Poll};
use crate::sensors::SampleCell;

use super::commands::HostRequest;
use super::events::Access;
use super::ports::HostLink;

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService {
    config: DispatchConfig,
    table: RegisterTable,
    regs: RegisterState,
    converter: FrequencyConverter,
    scheduler: DispatchScheduler,
    gate: EnableGate,
    events_sent: u32,
}

impl AppService {
    /// Validate `config`, bind the register block to the acquisition cell
    /// and apply the reset baseline at `now_us`.
    pub fn new(
        config: DispatchConfig,
        raw_voltage: &'static SampleCell,
        now_us: u32,
    ) -> Result<Self> {
        config.validate()?;
        let mut app = Self {
            table: RegisterTable::new(config.app_reg_start_address),
            regs: RegisterState::new(raw_voltage),
            converter: FrequencyConverter::new(config.max_frequency()),
            scheduler: DispatchScheduler::new(0, now_us),
            gate: EnableGate::default(),
            events_sent: 0,
            config,
        };
        app.reset(now_us);
        Ok(app)
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Restore register defaults and restart the dispatch phase.
    ///
    /// Idempotent.  Afterwards the first event is one full interval away,
    /// so no tick can be reported as already overdue.
    pub fn reset(&mut self, now_us: u32) {
        let default_hz = self.config.default_frequency_hz;
        let conversion = self.converter.convert(default_hz);

        self.regs.set_error_state(0);
        self.regs.set_event_enable(self.config.default_event_mask);
        self.regs.set_dispatch_frequency_hz(conversion.accepted_hz());

        // A disabled default keeps the slowest period installed so the
        // scheduler never holds a zero interval.
        let interval = conversion
            .interval_us()
            .unwrap_or_else(|| interval_us(core::num::NonZeroU16::MIN));
        self.scheduler.reset(interval, now_us);
        self.refresh_gate();

        info!(
            "app reset: {}Hz (every {}us), events=0b{:08b}",
            default_hz,
            interval,
            self.regs.event_enable()
        );
    }

    // ── Host requests ─────────────────────────────────────────

    /// Route one host request.  Errors have already been answered on
    /// `link` when this returns; they are handed back for the caller's
    /// bookkeeping only.
    pub fn handle_request(
        &mut self,
        request: &HostRequest,
        now_us: u32,
        link: &mut impl HostLink,
    ) -> core::result::Result<(), RegisterError> {
        match request {
            HostRequest::Read { address } => self.handle_read(*address, link),
            HostRequest::Write { address, payload } => {
                self.handle_write(*address, payload, now_us, link)
            }
            HostRequest::Reset => {
                self.reset(now_us);
                Ok(())
            }
        }
    }

    pub fn handle_read(
        &self,
        address: u8,
        link: &mut impl HostLink,
    ) -> core::result::Result<(), RegisterError> {
        match self.table.lookup(address) {
            Ok(desc) => {
                let value = self.read_register(desc);
                link.send_read(address, value);
                Ok(())
            }
            Err(e) => {
                warn!("read rejected: {e}");
                link.send_error(Access::Read, address, None);
                Err(e)
            }
        }
    }

    /// Dispatch a write to the register's handler and reply synchronously.
    pub fn handle_write(
        &mut self,
        address: u8,
        payload: &[u8],
        now_us: u32,
        link: &mut impl HostLink,
    ) -> core::result::Result<(), RegisterError> {
        let desc = match self.table.lookup(address) {
            Ok(desc) => *desc,
            Err(e) => {
                warn!("write rejected: {e}");
                link.send_error(Access::Write, address, None);
                return Err(e);
            }
        };

        let result = match desc.write {
            WriteHandler::Generic => access::write_generic(&mut self.regs, &desc, address, payload),
            WriteHandler::ReadOnlyReject => access::write_read_only_error(address),
            WriteHandler::Validated(Validator::EventEnable) => {
                self.write_event_enable(&desc, address, payload)
            }
            WriteHandler::Validated(Validator::DispatchFrequency) => {
                self.write_dispatch_frequency(&desc, address, payload, now_us)
            }
        };

        let value = self.read_register(&desc);
        match result {
            Ok(()) => link.send_ack(address, value),
            Err(e) => {
                warn!("write to {} ({}) rejected: {e}", address, desc.name);
                link.send_error(Access::Write, address, Some(value));
            }
        }
        result
    }

    // ── Per-tick update ───────────────────────────────────────

    /// Called once per loop iteration.  Emits at most one event and
    /// returns whether it did.
    pub fn update(&mut self, now_us: u32, link: &mut impl HostLink) -> bool {
        let gate_open = self.gate.is_open(link.is_muted());
        match self.scheduler.poll(now_us, gate_open) {
            Poll::Due { .. } => {
                let desc = self.table.descriptor(Field::RawVoltage);
                let address = self.table.address_of(Field::RawVoltage);
                let value = self.read_register(desc);
                trace!("event {} @{}us: {:?}", address, now_us, value.as_bytes());
                link.send_event(address, value);
                self.events_sent = self.events_sent.wrapping_add(1);
                true
            }
            Poll::Idle | Poll::Pending => false,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn registers(&self) -> &RegisterState {
        &self.regs
    }

    pub fn table(&self) -> &RegisterTable {
        &self.table
    }

    pub fn scheduler(&self) -> &DispatchScheduler {
        &self.scheduler
    }

    pub fn gate(&self) -> &EnableGate {
        &self.gate
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Events emitted since startup (wrapping).
    pub fn events_sent(&self) -> u32 {
        self.events_sent
    }

    // ── Handlers ──────────────────────────────────────────────

    fn read_register(&self, desc: &RegisterDescriptor) -> RegisterValue {
        match desc.read {
            ReadHandler::Generic => access::read(&self.regs, desc),
        }
    }

    /// Copy, then clamp.  Above the ceiling the clamped value and minimum
    /// interval are still installed before the write is reported rejected.
    fn write_dispatch_frequency(
        &mut self,
        desc: &RegisterDescriptor,
        address: u8,
        payload: &[u8],
        now_us: u32,
    ) -> core::result::Result<(), RegisterError> {
        access::write_generic(&mut self.regs, desc, address, payload)?;

        let conversion = self.converter.convert(self.regs.dispatch_frequency_hz());
        self.regs.set_dispatch_frequency_hz(conversion.accepted_hz());
        if let Some(interval) = conversion.interval_us() {
            self.scheduler.set_interval(interval, now_us);
        }
        self.refresh_gate();

        match conversion {
            Conversion::Clamped { hz, .. } => {
                warn!(
                    "dispatch frequency {} above ceiling, clamped to {}Hz",
                    le_to_u64(payload),
                    hz
                );
                Err(RegisterError::WriteRejected { address })
            }
            Conversion::Accepted { hz, interval_us } => {
                info!("dispatch frequency {}Hz (every {}us)", hz, interval_us);
                Ok(())
            }
            Conversion::Disabled => {
                info!("dispatch frequency 0: events off");
                Ok(())
            }
        }
    }

    /// Copy, then mask unknown bits.  Unknown bits are dropped and the
    /// write reported rejected; the known bits still take effect.
    fn write_event_enable(
        &mut self,
        desc: &RegisterDescriptor,
        address: u8,
        payload: &[u8],
    ) -> core::result::Result<(), RegisterError> {
        access::write_generic(&mut self.regs, desc, address, payload)?;

        let requested = self.regs.event_enable();
        self.regs.set_event_enable(requested & EventSource::ALL);
        self.refresh_gate();

        if requested & !EventSource::ALL != 0 {
            return Err(RegisterError::WriteRejected { address });
        }
        Ok(())
    }

    /// Dispatch is enabled while the RawVoltage event is selected and the
    /// frequency is non-zero.
    fn refresh_gate(&mut self) {
        let enabled = self.regs.event_enable() & EventSource::RawVoltage.mask() != 0
            && self.regs.dispatch_frequency_hz() != 0;
        self.gate.set_enabled(enabled);
    }
}
