//! Adapters: host implementations of the port traits.
//!
//! | Adapter        | Implements              | Connects to                      |
//! |----------------|-------------------------|----------------------------------|
//! | `console_link` | HostLink, RequestSource | `log` output + static channel    |
//! | `sim_adc`      | SpiDevice               | Synthetic thermistor signal      |
//! | `time`         | Clock                   | `std::time::Instant`             |

#[cfg(feature = "sim")]
pub mod channels;
#[cfg(feature = "sim")]
pub mod console_link;
pub mod sim_adc;
pub mod time;
