//! Parser diagnostic counters.

use serde::{Deserialize, Serialize};

/// Running counters for the inbound parser.
///
/// Framing recovery is silent by design; these counters are the observable
/// record of how much recovery actually happened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserStats {
    /// Frames that validated and updated the snapshot.
    pub frames_decoded: u64,
    /// Bytes dropped while hunting for a frame start (bad delimiter/header).
    pub resync_drops: u64,
    /// Frames whose payload failed checksum validation.
    pub checksum_failures: u64,
    /// Times the accumulator was cleared after exceeding its cap.
    pub buffer_resets: u64,
}
