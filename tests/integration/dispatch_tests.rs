//! Periodic dispatch through `AppService::update`: frequency, enable gate,
//! mute and wraparound, all driven by a hand-stepped clock.

use sniff_detector::app::events::MessageType;
use sniff_detector::error::RegisterError;
use sniff_detector::registers::RegisterValue;

use crate::mock_link::{make_app, run_ticks};

const RAW_VOLTAGE: u8 = 32;
const EVENT_ENABLE: u8 = 34;
const FREQUENCY: u8 = 35;

// ── Default 1 Hz scenario ─────────────────────────────────────

#[test]
fn default_rate_fires_twice_in_two_and_a_half_seconds() {
    let (mut app, cell, mut link) = make_app(0);

    let fired = run_ticks(&mut app, &mut link, 0, 1_500_000, 10_000);
    assert_eq!(fired, vec![1_000_000]);

    cell.store(0x0456);
    let fired = run_ticks(&mut app, &mut link, 1_510_000, 2_500_000, 10_000);
    assert_eq!(fired, vec![2_000_000]);

    let values: Vec<_> = link
        .events()
        .map(|r| {
            assert_eq!(r.address, RAW_VOLTAGE);
            r.value.as_ref().and_then(RegisterValue::as_u16)
        })
        .collect();
    assert_eq!(values, vec![Some(0x0123), Some(0x0456)]);
    assert_eq!(app.events_sent(), 2);
}

#[test]
fn at_most_one_event_per_tick() {
    let (mut app, _, mut link) = make_app(0);
    assert!(app.update(1_000_000, &mut link));
    assert!(!app.update(1_000_000, &mut link));
    assert_eq!(link.event_count(), 1);
}

// ── Frequency writes ──────────────────────────────────────────

#[test]
fn frequency_write_installs_interval_and_acks() {
    let (mut app, _, mut link) = make_app(0);

    let res = app.handle_write(FREQUENCY, &10u16.to_le_bytes(), 0, &mut link);
    assert_eq!(res, Ok(()));
    assert_eq!(app.scheduler().interval_us(), 100_000);

    let ack = link.last().unwrap();
    assert_eq!(ack.message_type, MessageType::Write);
    assert_eq!(ack.address, FREQUENCY);
    assert_eq!(ack.value.as_ref().and_then(RegisterValue::as_u16), Some(10));

    link.clear();
    let fired = run_ticks(&mut app, &mut link, 0, 1_000_000, 10_000);
    assert_eq!(fired.len(), 10);
    assert_eq!(fired[0], 100_000);
}

#[test]
fn frequency_above_ceiling_is_clamped_and_reported() {
    let (mut app, _, mut link) = make_app(0);

    let res = app.handle_write(FREQUENCY, &2000u16.to_le_bytes(), 0, &mut link);
    assert_eq!(res, Err(RegisterError::WriteRejected { address: FREQUENCY }));
    assert_eq!(app.registers().dispatch_frequency_hz(), 1000);
    assert_eq!(app.scheduler().interval_us(), 1_000);

    let reply = link.last().unwrap();
    assert_eq!(reply.message_type, MessageType::WriteError);
    assert_eq!(reply.value.as_ref().and_then(RegisterValue::as_u16), Some(1000));

    // The clamped rate is live.
    link.clear();
    let fired = run_ticks(&mut app, &mut link, 0, 10_000, 500);
    assert_eq!(fired.len(), 10);
}

#[test]
fn zero_frequency_disables_until_rewritten() {
    let (mut app, _, mut link) = make_app(0);
    let interval = app.scheduler().interval_us();

    assert_eq!(app.handle_write(FREQUENCY, &[0, 0], 0, &mut link), Ok(()));
    assert_eq!(link.last().unwrap().message_type, MessageType::Write);
    assert!(!app.gate().is_enabled());
    assert_eq!(app.scheduler().interval_us(), interval);

    link.clear();
    assert!(run_ticks(&mut app, &mut link, 0, 5_000_000, 10_000).is_empty());

    assert_eq!(
        app.handle_write(FREQUENCY, &5u16.to_le_bytes(), 5_000_000, &mut link),
        Ok(())
    );
    assert!(app.gate().is_enabled());
    let fired = run_ticks(&mut app, &mut link, 5_000_000, 6_000_000, 10_000);
    assert_eq!(fired.len(), 5);
}

#[test]
fn rate_change_restarts_phase_from_write_time() {
    let (mut app, _, mut link) = make_app(0);
    app.handle_write(FREQUENCY, &2u16.to_le_bytes(), 700_000, &mut link)
        .unwrap();
    assert_eq!(app.scheduler().next_fire_time_us(), 1_200_000);

    // Nothing fires at the old 1 s deadline.
    assert!(!app.update(1_000_000, &mut link));
    assert!(app.update(1_200_000, &mut link));
}

// ── Enable gate ───────────────────────────────────────────────

#[test]
fn clearing_event_enable_stops_dispatch() {
    let (mut app, _, mut link) = make_app(0);

    assert_eq!(app.handle_write(EVENT_ENABLE, &[0], 0, &mut link), Ok(()));
    assert!(!app.gate().is_enabled());
    assert!(run_ticks(&mut app, &mut link, 0, 3_000_000, 10_000).is_empty());

    assert_eq!(
        app.handle_write(EVENT_ENABLE, &[1], 3_000_000, &mut link),
        Ok(())
    );
    let fired = run_ticks(&mut app, &mut link, 3_000_000, 5_000_000, 10_000);
    // Re-enabling restarts the phase from the first open tick.
    assert_eq!(fired, vec![4_000_000, 5_000_000]);
}

#[test]
fn mute_suppresses_and_unmute_resumes_without_rewrite() {
    let (mut app, _, mut link) = make_app(0);

    link.muted = true;
    assert!(run_ticks(&mut app, &mut link, 0, 3_000_000, 10_000).is_empty());
    assert!(app.gate().is_enabled());

    link.muted = false;
    let fired = run_ticks(&mut app, &mut link, 3_010_000, 5_100_000, 10_000);
    assert_eq!(fired, vec![4_010_000, 5_010_000]);
    assert_eq!(app.registers().dispatch_frequency_hz(), 1);
}

// ── Wraparound and stalls ─────────────────────────────────────

#[test]
fn deadline_across_counter_wrap_fires_exactly_once() {
    let start = u32::MAX - 500_000;
    let (mut app, _, mut link) = make_app(start);
    assert_eq!(app.scheduler().next_fire_time_us(), 499_999);

    let mut now = start;
    let mut fired = Vec::new();
    for _ in 0..150 {
        now = now.wrapping_add(10_000);
        if app.update(now, &mut link) {
            fired.push(now);
        }
    }
    // 150 ticks of 10 ms span 1.5 s: one deadline inside.
    assert_eq!(fired, vec![499_999]);
    assert_eq!(link.event_count(), 1);
}

#[test]
fn stall_emits_one_event_and_keeps_phase() {
    let (mut app, _, mut link) = make_app(0);

    // The loop stalls for 9.5 periods.
    assert!(app.update(10_500_000, &mut link));
    assert_eq!(link.event_count(), 1);
    assert_eq!(app.scheduler().missed_periods(), 9);
    assert_eq!(app.scheduler().next_fire_time_us(), 11_000_000);

    assert!(!app.update(10_900_000, &mut link));
    assert!(app.update(11_000_000, &mut link));
}
