//! Link configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables for one board link instance.
///
/// The defaults match the board firmware's expectations; change them only
/// for firmware variants that differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Inbound accumulator cap. Exceeding it clears the accumulator.
    pub max_buffered_bytes: usize,

    /// How long to wait after the shutdown frames before releasing the
    /// transport, giving the device time to act on them.
    pub settle: Duration,

    /// Number of digital output ports forced low during shutdown.
    pub digital_ports: u8,

    /// Driver poll cadence for pending host requests.
    pub poll_interval: Duration,

    /// Consecutive byte-source errors tolerated before the driver gives up.
    pub max_source_errors: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            max_buffered_bytes: 100,
            settle: Duration::from_millis(500),
            digital_ports: 7,
            poll_interval: Duration::from_millis(20),
            max_source_errors: 10,
        }
    }
}
