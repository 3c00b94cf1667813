//! Sniff detector node: host simulation entry point.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                     │
//! │                                                               │
//! │  SimAdc ─▶ Thermistor ─▶ SampleCell     (acquisition thread)  │
//! │  ConsoleLink ◀─ HOST_REQUESTS / HOST_MUTED   MonotonicClock   │
//! │                                                               │
//! │  ──────────────── Port Trait Boundary ───────────────────     │
//! │                                                               │
//! │  ┌─────────────────────────────────────────────────────┐      │
//! │  │  AppService: registers · frequency · scheduler ·    │      │
//! │  │              enable/mute gate · reset               │      │
//! │  └─────────────────────────────────────────────────────┘      │
//! │                         ▲                                     │
//! │               Device::run_until() (polling loop)              │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `sniff-detector-sim [config.json]`

use std::ops::ControlFlow;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};

use sniff_detector::adapters::channels::{HOST_MUTED, HOST_REQUESTS};
use sniff_detector::adapters::console_link::ConsoleLink;
use sniff_detector::adapters::sim_adc::spawn_acquisition;
use sniff_detector::adapters::time::MonotonicClock;
use sniff_detector::app::commands::HostRequest;
use sniff_detector::app::ports::Clock;
use sniff_detector::app::service::AppService;
use sniff_detector::config::{DeviceConfig, default_config};
use sniff_detector::device::Device;
use sniff_detector::sensors::SampleCell;

/// Written by the acquisition thread, read by the register file.
static RAW_VOLTAGE: SampleCell = SampleCell::new();

/// Pause after an iteration with nothing to do; well below the 1 ms
/// shortest dispatch interval.
const IDLE_PAUSE: Duration = Duration::from_micros(200);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read(&path).with_context(|| format!("reading {path}"))?;
            DeviceConfig::from_json(&json).with_context(|| format!("loading {path}"))?
        }
        None => default_config(),
    };
    config.validate()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Sniff Detector sim v{}           ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // Acquisition runs on its own; the loop only ever reads the cell.
    spawn_acquisition(
        &RAW_VOLTAGE,
        Duration::from_micros(u64::from(config.sample_interval_us)),
    );

    spawn_host_script(config.dispatch.app_reg_start_address);

    let clock = MonotonicClock::new();
    let app = AppService::new(config.dispatch.clone(), &RAW_VOLTAGE, clock.now_us())?;
    let link = ConsoleLink::new(&HOST_REQUESTS, &HOST_MUTED);
    let mut device = Device::new(config.identity, app, link, clock);
    device.run_until(|report| {
        if report.requests == 0 && !report.event_sent {
            thread::sleep(IDLE_PAUSE);
        }
        ControlFlow::Continue(())
    });
    Ok(())
}

/// Plays the host: exercises every register path once, then leaves the
/// node streaming.
fn spawn_host_script(base: u8) {
    let raw_voltage = base;
    let error_state = base + 1;
    let event_enable = base + 2;
    let frequency = base + 3;

    thread::spawn(move || {
        let step = |secs: u64| thread::sleep(Duration::from_secs(secs));
        let send = |req: HostRequest| {
            if HOST_REQUESTS.try_send(req).is_err() {
                warn!("host: request queue full, dropped");
            }
        };

        step(3);
        send(HostRequest::Read { address: frequency });
        send(HostRequest::Read { address: error_state });
        send(HostRequest::write_u16(frequency, 4));
        step(2);
        info!("host: mute");
        HOST_MUTED.store(true, Ordering::Relaxed);
        step(2);
        info!("host: unmute");
        HOST_MUTED.store(false, Ordering::Relaxed);
        step(2);
        send(HostRequest::write_u16(raw_voltage, 0));
        send(HostRequest::write_u16(frequency, 5000));
        thread::sleep(Duration::from_millis(20));
        send(HostRequest::write_u8(event_enable, 0));
        step(2);
        send(HostRequest::write_u8(event_enable, 1));
        send(HostRequest::write_u16(frequency, 0));
        step(2);
        send(HostRequest::Reset);
    });
}
