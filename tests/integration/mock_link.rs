//! Mock transport adapters for integration tests.
//!
//! Records every reply so tests can assert on the full message history
//! without a wire, and lets tests play the host's mute flag and clock.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use sniff_detector::app::commands::HostRequest;
use sniff_detector::app::events::{MessageType, Reply};
use sniff_detector::app::ports::{Clock, HostLink, RequestSource};
use sniff_detector::app::service::AppService;
use sniff_detector::config::DispatchConfig;
use sniff_detector::sensors::SampleCell;

// ── RecordingLink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingLink {
    pub muted: bool,
    pub replies: Vec<Reply>,
    pub requests: VecDeque<HostRequest>,
}

#[allow(dead_code)]
impl RecordingLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, request: HostRequest) {
        self.requests.push_back(request);
    }

    pub fn last(&self) -> Option<&Reply> {
        self.replies.last()
    }

    pub fn events(&self) -> impl Iterator<Item = &Reply> {
        self.replies
            .iter()
            .filter(|r| r.message_type == MessageType::Event)
    }

    pub fn event_count(&self) -> usize {
        self.events().count()
    }

    pub fn clear(&mut self) {
        self.replies.clear();
    }
}

impl HostLink for RecordingLink {
    fn is_muted(&self) -> bool {
        self.muted
    }

    fn send(&mut self, reply: Reply) {
        self.replies.push(reply);
    }
}

impl RequestSource for RecordingLink {
    fn poll_request(&mut self) -> Option<HostRequest> {
        self.requests.pop_front()
    }
}

// ── ManualClock ───────────────────────────────────────────────

/// Clock whose handle stays with the test after the device takes ownership.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u32>>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn at(now_us: u32) -> Self {
        Self {
            now: Rc::new(Cell::new(now_us)),
        }
    }

    pub fn set(&self, now_us: u32) {
        self.now.set(now_us);
    }

    pub fn advance(&self, delta_us: u32) {
        self.now.set(self.now.get().wrapping_add(delta_us));
    }
}

impl Clock for ManualClock {
    fn now_us(&self) -> u32 {
        self.now.get()
    }
}

// ── Fixtures ──────────────────────────────────────────────────

/// A fresh acquisition cell per test.
pub fn leak_cell(initial: u16) -> &'static SampleCell {
    let cell: &'static SampleCell = Box::leak(Box::new(SampleCell::new()));
    cell.store(initial);
    cell
}

#[allow(dead_code)]
pub fn make_app(now_us: u32) -> (AppService, &'static SampleCell, RecordingLink) {
    let cell = leak_cell(0x0123);
    let app = AppService::new(DispatchConfig::default(), cell, now_us)
        .expect("default dispatch config is valid");
    (app, cell, RecordingLink::new())
}

/// Tick `app` every `step_us` from `from_us` up to and including `to_us`.
#[allow(dead_code)]
pub fn run_ticks(
    app: &mut AppService,
    link: &mut RecordingLink,
    from_us: u32,
    to_us: u32,
    step_us: u32,
) -> Vec<u32> {
    let mut fired = Vec::new();
    let mut now = from_us;
    while now <= to_us {
        if app.update(now, link) {
            fired.push(now);
        }
        now += step_us;
    }
    fired
}
