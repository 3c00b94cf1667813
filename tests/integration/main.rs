//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises one subsystem through the
//! public API against mock adapters.  Everything runs on the host; time is
//! driven by hand through [`mock_link::ManualClock`].

mod dispatch_tests;
mod lifecycle_tests;
mod mock_link;
