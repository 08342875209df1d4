//! XOR checksum routines for both frame directions.
//!
//! The two directions checksum different byte windows of differently shaped
//! frames and are deliberately kept as separate functions: inbound validation
//! folds the first seven bytes of an extracted telemetry payload, while
//! outbound sealing folds the opcode and argument bytes of a full frame
//! (skipping the delimiter and length prefix).

/// Byte count of an extracted inbound telemetry payload.
pub const INBOUND_PAYLOAD_LEN: usize = 8;

/// Validate an inbound telemetry payload.
///
/// XOR-folds `payload[0..7]` and compares the result against the trailing
/// checksum byte `payload[7]`.
pub fn validate_inbound(payload: &[u8; INBOUND_PAYLOAD_LEN]) -> bool {
    let folded = payload[..INBOUND_PAYLOAD_LEN - 1].iter().fold(0u8, |acc, b| acc ^ b);
    folded == payload[INBOUND_PAYLOAD_LEN - 1]
}

/// Seal an outbound frame in place.
///
/// XOR-folds `frame[2..len-1]` (opcode and argument bytes, excluding the
/// delimiter, the length byte, and the checksum slot itself) and writes the
/// result into the last byte.
pub fn seal_outbound(frame: &mut [u8]) {
    debug_assert!(frame.len() >= 4, "outbound frame must at least hold delimiter/len/opcode/cksum");
    let last = frame.len() - 1;
    let folded = frame[2..last].iter().fold(0u8, |acc, b| acc ^ b);
    frame[last] = folded;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn validates_known_payload() {
        let mut payload = [1u8, 2, 3, 4, 5, 6, 7, 0];
        payload[7] = 1 ^ 2 ^ 3 ^ 4 ^ 5 ^ 6 ^ 7;
        assert!(validate_inbound(&payload));
    }

    #[test]
    fn rejects_wrong_checksum_byte() {
        let payload = [1u8, 2, 3, 4, 5, 6, 7, 0xFF];
        assert!(!validate_inbound(&payload));
    }

    #[test]
    fn seals_opcode_only_frame() {
        // Motors-off has no arguments; the checksum is the bare opcode.
        let mut frame = [0x23, 0x01, 0x83, 0x00];
        seal_outbound(&mut frame);
        assert_eq!(frame, [0x23, 0x01, 0x83, 0x83]);
    }

    #[test]
    fn seal_skips_delimiter_and_length() {
        let mut frame = [0x23, 0x03, 0x80, 0x02, 0x01, 0x00];
        seal_outbound(&mut frame);
        assert_eq!(frame[5], 0x80 ^ 0x02 ^ 0x01);
    }

    proptest! {
        #[test]
        fn mutating_any_payload_byte_invalidates(data in any::<[u8; 7]>(), idx in 0usize..7, delta in 1u8..=255) {
            let mut payload = [0u8; 8];
            payload[..7].copy_from_slice(&data);
            payload[7] = data.iter().fold(0u8, |acc, b| acc ^ b);
            prop_assert!(validate_inbound(&payload));

            // Flip one data byte without touching the checksum slot.
            let mut corrupted = payload;
            corrupted[idx] = corrupted[idx].wrapping_add(delta);
            prop_assert!(!validate_inbound(&corrupted));

            // Restoring the matching checksum makes it accepted again.
            corrupted[7] = corrupted[..7].iter().fold(0u8, |acc, b| acc ^ b);
            prop_assert!(validate_inbound(&corrupted));
        }

        #[test]
        fn sealed_frames_survive_reverse_fold(args in prop::collection::vec(any::<u8>(), 0..8), opcode in any::<u8>()) {
            let mut frame = vec![0x23, args.len() as u8 + 1, opcode];
            frame.extend_from_slice(&args);
            frame.push(0);
            seal_outbound(&mut frame);

            let last = frame.len() - 1;
            let folded = frame[2..last].iter().fold(0u8, |acc, b| acc ^ b);
            prop_assert_eq!(folded, frame[last]);
        }
    }
}
