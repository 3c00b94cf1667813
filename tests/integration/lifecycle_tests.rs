//! Reset behaviour and the `Device` polling loop.

use std::ops::ControlFlow;

use sniff_detector::app::commands::HostRequest;
use sniff_detector::app::events::MessageType;
use sniff_detector::app::service::AppService;
use sniff_detector::config::{DeviceIdentity, DispatchConfig};
use sniff_detector::device::{Device, MAX_REQUESTS_PER_TICK, TickReport};

use crate::mock_link::{ManualClock, RecordingLink, leak_cell, make_app, run_ticks};

fn make_device(now_us: u32) -> (Device<RecordingLink, ManualClock>, ManualClock) {
    let clock = ManualClock::at(now_us);
    let app = AppService::new(DispatchConfig::default(), leak_cell(0x0100), now_us).unwrap();
    let device = Device::new(
        DeviceIdentity::default(),
        app,
        RecordingLink::new(),
        clock.clone(),
    );
    (device, clock)
}

// ── Reset ─────────────────────────────────────────────────────

#[test]
fn reset_restores_defaults_and_phase() {
    let (mut app, _, mut link) = make_app(0);
    app.handle_write(35, &200u16.to_le_bytes(), 0, &mut link)
        .unwrap();
    app.handle_write(34, &[0], 0, &mut link).unwrap();

    app.reset(7_000_000);
    assert_eq!(app.registers().dispatch_frequency_hz(), 1);
    assert_eq!(app.registers().event_enable(), 0x01);
    assert_eq!(app.registers().error_state(), 0);
    assert_eq!(app.scheduler().interval_us(), 1_000_000);
    assert_eq!(app.scheduler().next_fire_time_us(), 8_000_000);
    assert!(app.gate().is_enabled());
}

#[test]
fn nothing_is_overdue_right_after_reset() {
    let (mut app, _, mut link) = make_app(0);

    // Long idle stretch, then reset: the stale deadline must not fire.
    app.reset(60_000_000);
    assert!(!app.update(60_000_000, &mut link));
    assert!(!app.update(60_990_000, &mut link));
    assert!(app.update(61_000_000, &mut link));
}

#[test]
fn reset_is_idempotent() {
    let (mut app, _, mut link) = make_app(0);
    app.reset(1_000);
    app.reset(1_000);
    let fired = run_ticks(&mut app, &mut link, 1_000, 2_001_000, 10_000);
    assert_eq!(fired, vec![1_001_000, 2_001_000]);
}

// ── Device loop ───────────────────────────────────────────────

#[test]
fn run_once_handles_requests_then_ticks() {
    let (mut device, clock) = make_device(0);
    device.link_mut().push(HostRequest::write_u16(35, 4));
    device.link_mut().push(HostRequest::Read { address: 35 });

    let report = device.run_once();
    assert_eq!(
        report,
        TickReport {
            requests: 2,
            rejected: 0,
            event_sent: false
        }
    );

    clock.set(250_000);
    let report = device.run_once();
    assert!(report.event_sent);
    assert_eq!(device.link().event_count(), 1);
}

#[test]
fn run_once_counts_rejected_requests() {
    let (mut device, _) = make_device(0);
    device.link_mut().push(HostRequest::write_u16(32, 1));
    device.link_mut().push(HostRequest::Read { address: 99 });
    device.link_mut().push(HostRequest::write_u16(35, 9999));

    let report = device.run_once();
    assert_eq!(report.requests, 3);
    assert_eq!(report.rejected, 3);
    let errors = device
        .link()
        .replies
        .iter()
        .filter(|r| r.message_type.is_error())
        .count();
    assert_eq!(errors, 3);
}

#[test]
fn request_burst_is_bounded_per_tick() {
    let (mut device, clock) = make_device(0);
    for _ in 0..(MAX_REQUESTS_PER_TICK + 3) {
        device.link_mut().push(HostRequest::Read { address: 32 });
    }
    clock.set(1_000_000);

    let report = device.run_once();
    assert_eq!(report.requests, MAX_REQUESTS_PER_TICK);
    assert!(report.event_sent, "dispatch still gets its tick");
    assert_eq!(device.link().requests.len(), 3);

    let report = device.run_once();
    assert_eq!(report.requests, 3);
}

#[test]
fn reset_request_rephases_from_clock() {
    let (mut device, clock) = make_device(0);
    clock.set(5_500_000);
    device.link_mut().push(HostRequest::Reset);

    let report = device.run_once();
    assert_eq!(report.requests, 1);
    assert!(!report.event_sent);
    assert_eq!(device.app().scheduler().next_fire_time_us(), 6_500_000);
}

#[test]
fn muted_device_answers_requests_but_sends_no_events() {
    let (mut device, clock) = make_device(0);
    device.link_mut().muted = true;
    device.link_mut().push(HostRequest::Read { address: 32 });
    clock.set(3_000_000);

    let report = device.run_once();
    assert!(!report.event_sent);
    assert_eq!(device.link().replies.len(), 1);
    assert_eq!(device.link().replies[0].message_type, MessageType::Read);
}

#[test]
fn run_until_paces_every_iteration_and_stops_on_break() {
    let (mut device, clock) = make_device(0);
    device.link_mut().push(HostRequest::Read { address: 32 });

    let mut idle_ticks = 0;
    let mut events = 0;
    let iterations = device.run_until(|report| {
        if report.event_sent {
            events += 1;
        }
        if report.requests == 0 && !report.event_sent {
            idle_ticks += 1;
        }
        clock.advance(100_000);
        if events == 2 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });

    // Fires at 1.0 s and 2.0 s; the first iteration handled the read.
    assert_eq!(iterations, 21);
    assert_eq!(idle_ticks, 18);
    assert_eq!(device.link().event_count(), 2);
}
