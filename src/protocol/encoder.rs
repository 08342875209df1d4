//! Command-to-frame encoding.
//!
//! One generic encoder driven by the [`command_set`](super::command_set)
//! table. Unknown opcodes encode to nothing (`Ok(None)`): the firmware
//! reserves opcodes the host never sends, and silently ignoring them is part
//! of the wire contract. A request missing one of its command's declared
//! fields is a hard error instead.

use bytes::{BufMut, BytesMut};
use tracing::debug;

use super::checksum;
use super::command_set::{CommandSpec, Layout, command_spec};
use super::opcode::START_DELIMITER;
use crate::error::{LinkError, Result};
use crate::types::CommandRequest;

/// Fixed wire size of the delay-seconds frame.
const DELAY_FRAME_LEN: usize = 7;

/// Encode a request into a checksum-sealed outbound frame.
///
/// Returns `Ok(None)` when the opcode has no spec row, and
/// [`LinkError::MissingField`] when a declared field is absent from the
/// request.
pub fn encode(request: &CommandRequest) -> Result<Option<Vec<u8>>> {
    let Some(spec) = command_spec(request.opcode) else {
        debug!("no command spec for opcode {:#04x}, dropping request", request.opcode);
        return Ok(None);
    };

    let mut args = Vec::with_capacity(spec.fields.len());
    for field in spec.fields {
        let value = request
            .field(*field)
            .ok_or_else(|| LinkError::missing_field(request.opcode, *field))?;
        args.push(value);
    }

    let frame = match spec.layout {
        Layout::Default => encode_default(spec, &args),
        Layout::DelaySeconds => encode_delay(spec, &args),
    };
    Ok(Some(frame))
}

/// `[0x23, argc+1, opcode, args…, cksum]` with one byte per argument.
fn encode_default(spec: &CommandSpec, args: &[u16]) -> Vec<u8> {
    let mut frame = BytesMut::with_capacity(args.len() + 4);
    frame.put_u8(START_DELIMITER);
    frame.put_u8(args.len() as u8 + 1);
    frame.put_u8(spec.opcode);
    for value in args {
        frame.put_u8(*value as u8);
    }
    frame.put_u8(0);
    let mut frame = frame.to_vec();
    checksum::seal_outbound(&mut frame);
    frame
}

/// Fixed 7-byte delay frame with the seconds value split little-endian.
fn encode_delay(spec: &CommandSpec, args: &[u16]) -> Vec<u8> {
    // Row order is [kind, seconds].
    let kind = args[0] as u8;
    let seconds = args[1];
    let mut frame = BytesMut::with_capacity(DELAY_FRAME_LEN);
    frame.put_u8(START_DELIMITER);
    frame.put_u8(4);
    frame.put_u8(spec.opcode);
    frame.put_u8(kind);
    frame.put_u8((seconds & 0xFF) as u8);
    frame.put_u8((seconds >> 8) as u8);
    frame.put_u8(0);
    let mut frame = frame.to_vec();
    checksum::seal_outbound(&mut frame);
    frame
}
