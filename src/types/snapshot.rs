//! Latest-value telemetry snapshot.

use serde::{Deserialize, Serialize};

use crate::protocol::checksum::INBOUND_PAYLOAD_LEN;

/// The board's current telemetry readings.
///
/// Six positional readings plus one mode/status field, each one unsigned
/// byte. The parser overwrites the whole snapshot on every validated frame;
/// no history is retained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub p1: u8,
    pub p2: u8,
    pub p3: u8,
    pub p4: u8,
    pub p5: u8,
    pub p6: u8,
    /// Mode/status field.
    pub rmc: u8,
}

impl TelemetrySnapshot {
    /// Build a snapshot from a checksum-validated telemetry payload.
    ///
    /// The mapping is positional: `payload[0..7]` becomes `p1..p6, rmc`.
    /// The trailing checksum byte is ignored here; callers validate first.
    pub fn from_payload(payload: &[u8; INBOUND_PAYLOAD_LEN]) -> Self {
        Self {
            p1: payload[0],
            p2: payload[1],
            p3: payload[2],
            p4: payload[3],
            p5: payload[4],
            p6: payload[5],
            rmc: payload[6],
        }
    }

    /// The snapshot's fields paired with the names hosts expect when the
    /// snapshot is published over the exchange bridge.
    pub fn named_fields(&self) -> [(&'static str, u8); 7] {
        [
            ("p1", self.p1),
            ("p2", self.p2),
            ("p3", self.p3),
            ("p4", self.p4),
            ("p5", self.p5),
            ("p6", self.p6),
            ("rmc", self.rmc),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_mapping() {
        let snapshot = TelemetrySnapshot::from_payload(&[1, 2, 3, 4, 5, 6, 7, 0xAA]);
        assert_eq!(
            snapshot,
            TelemetrySnapshot { p1: 1, p2: 2, p3: 3, p4: 4, p5: 5, p6: 6, rmc: 7 }
        );
    }

    #[test]
    fn named_fields_cover_every_reading() {
        let snapshot = TelemetrySnapshot::from_payload(&[10, 20, 30, 40, 50, 60, 70, 0]);
        let fields = snapshot.named_fields();
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[0], ("p1", 10));
        assert_eq!(fields[6], ("rmc", 70));
    }
}
