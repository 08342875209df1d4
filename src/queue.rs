//! Outbound command queue with structural dedup.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::error::Result;
use crate::protocol::encoder;
use crate::transport::Transport;
use crate::types::{CommandRequest, FieldMap};

/// One encoded command awaiting transmission.
///
/// Keeps the original request fields alongside the encoded frame: the
/// fields are the dedup key, the frame is what goes on the wire.
#[derive(Debug, Clone)]
pub struct PendingCommand {
    pub opcode: u8,
    pub fields: FieldMap,
    pub frame: Vec<u8>,
}

/// FIFO of pending commands.
///
/// Invariant: no two queued entries share both opcode and field map. Hosts
/// tend to redeliver unchanged request state on every poll; the dedup keeps
/// that from flooding the device with identical frames.
#[derive(Debug, Default)]
pub struct CommandQueue {
    entries: VecDeque<PendingCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode and enqueue a request.
    ///
    /// Returns `Ok(true)` if a new entry was queued; `Ok(false)` if the
    /// request encoded to nothing (unknown opcode) or duplicated a queued
    /// entry. A request missing a declared field is an error and queues
    /// nothing.
    pub fn submit(&mut self, request: CommandRequest) -> Result<bool> {
        let Some(frame) = encoder::encode(&request)? else {
            return Ok(false);
        };

        let duplicate = self
            .entries
            .iter()
            .any(|entry| entry.opcode == request.opcode && entry.fields == request.fields);
        if duplicate {
            debug!("duplicate pending request for opcode {:#04x}, dropping", request.opcode);
            return Ok(false);
        }

        self.entries.push_back(PendingCommand {
            opcode: request.opcode,
            fields: request.fields,
            frame,
        });
        Ok(true)
    }

    /// Write every queued frame to the transport in FIFO order.
    ///
    /// Frames are consumed as they are handed over; a failed write is logged
    /// and the drain continues. Once handed to the transport a frame cannot
    /// be recalled, and nothing on this path is fatal.
    pub fn drain_all(&mut self, transport: &mut dyn Transport) {
        while let Some(entry) = self.entries.pop_front() {
            debug!("sending {}-byte frame for opcode {:#04x}", entry.frame.len(), entry.opcode);
            if let Err(e) = transport.write_frame(&entry.frame) {
                warn!("frame write failed for opcode {:#04x}: {}", entry.opcode, e);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
