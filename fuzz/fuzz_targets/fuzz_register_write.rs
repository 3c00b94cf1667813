//! Fuzz target: host request stream into `AppService`
//!
//! Decodes the input as a sequence of `[op, address, dt_lo, dt_hi, len,
//! payload...]` records and feeds them through `handle_request` and
//! `update`.  The service must never panic and must never leave dispatch
//! enabled with an interval shorter than the ceiling allows.
//!
//! cargo fuzz run fuzz_register_write

#![no_main]

use libfuzzer_sys::fuzz_target;
use sniff_detector::app::commands::HostRequest;
use sniff_detector::app::ports::NullLink;
use sniff_detector::app::service::AppService;
use sniff_detector::config::DispatchConfig;
use sniff_detector::sensors::SampleCell;

static CELL: SampleCell = SampleCell::new();

fuzz_target!(|data: &[u8]| {
    let config = DispatchConfig::default();
    let min_interval = 1_000_000 / u32::from(config.max_frequency_hz);
    let Ok(mut app) = AppService::new(config, &CELL, 0) else {
        return;
    };
    let mut link = NullLink;
    let mut now = 0u32;

    let mut rest = data;
    while let [op, address, dt_lo, dt_hi, len, tail @ ..] = rest {
        let len = usize::from(*len % 9).min(tail.len());
        let (payload, next) = tail.split_at(len);
        rest = next;

        now = now.wrapping_add(u32::from(u16::from_le_bytes([*dt_lo, *dt_hi])) * 64);
        CELL.store(u16::from_le_bytes([*dt_lo, *op]) & 0x0FFF);

        let request = match op % 3 {
            0 => HostRequest::Read { address: *address },
            1 => match HostRequest::write(*address, payload) {
                Some(req) => req,
                None => continue,
            },
            _ => HostRequest::Reset,
        };
        let _ = app.handle_request(&request, now, &mut link);
        app.update(now, &mut link);

        if app.gate().is_enabled() {
            assert!(app.scheduler().interval_us() >= min_interval);
        }
        assert!(app.registers().dispatch_frequency_hz() <= 1000);
    }
});
