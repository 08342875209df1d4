//! The board link engine instance.
//!
//! [`BoardLink`] ties the inbound parser, the outbound queue and an optional
//! attached transport into one explicitly constructed instance; there is no
//! process-wide singleton. The host (or the [`Driver`](crate::driver::Driver))
//! calls the entry points; the link itself never spawns tasks.

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::bridge::{ExchangeBridge, REQUEST_KEY, ordered_requests};
use crate::config::LinkConfig;
use crate::parser::TelemetryParser;
use crate::protocol::command_set::FieldName;
use crate::protocol::{encoder, opcode};
use crate::queue::CommandQueue;
use crate::transport::Transport;
use crate::types::{CommandRequest, ParserStats, TelemetrySnapshot};

/// One protocol engine instance for one device.
pub struct BoardLink {
    parser: TelemetryParser,
    queue: CommandQueue,
    transport: Option<Box<dyn Transport>>,
    config: LinkConfig,
}

impl BoardLink {
    /// Create a detached link.
    pub fn new(config: LinkConfig) -> Self {
        Self {
            parser: TelemetryParser::new(config.max_buffered_bytes),
            queue: CommandQueue::new(),
            transport: None,
            config,
        }
    }

    /// Attach the outbound transport. Replaces any previously attached one.
    pub fn attach(&mut self, transport: Box<dyn Transport>) {
        info!("transport attached");
        self.transport = Some(transport);
    }

    /// Detach and return the outbound transport, if any.
    pub fn detach(&mut self) -> Option<Box<dyn Transport>> {
        if self.transport.is_some() {
            info!("transport detached");
        }
        self.transport.take()
    }

    pub fn is_attached(&self) -> bool {
        self.transport.is_some()
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Feed raw inbound bytes to the parser.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.parser.feed(bytes);
    }

    /// The latest decoded telemetry.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        self.parser.snapshot()
    }

    /// Parser diagnostics.
    pub fn stats(&self) -> ParserStats {
        self.parser.stats()
    }

    /// Number of commands awaiting transmission.
    pub fn pending_commands(&self) -> usize {
        self.queue.len()
    }

    /// Submit one command directly, bypassing the exchange bridge.
    pub fn submit(&mut self, request: CommandRequest) -> crate::Result<bool> {
        self.queue.submit(request)
    }

    /// Pull the staged request batch from the bridge into the queue.
    ///
    /// Requests that fail validation are dropped with a warning; one bad
    /// request never blocks the rest of the batch.
    pub fn process_requests(&mut self, bridge: &mut dyn ExchangeBridge) {
        let Some(batch) = bridge.take(REQUEST_KEY) else {
            return;
        };
        for request in ordered_requests(batch) {
            let op = request.opcode;
            if let Err(e) = self.queue.submit(request) {
                warn!("dropping invalid request for opcode {op:#04x}: {e}");
            }
        }
    }

    /// Publish the current snapshot to the bridge, one field per key.
    pub fn publish_telemetry(&self, bridge: &mut dyn ExchangeBridge) {
        for (name, value) in self.snapshot().named_fields() {
            bridge.publish(name, value);
        }
    }

    /// Write every pending frame to the attached transport.
    ///
    /// With no transport attached this is a no-op and the queue is left
    /// intact for a later drain.
    pub fn drain(&mut self) {
        match self.transport.as_mut() {
            Some(transport) => self.queue.drain_all(transport.as_mut()),
            None => {
                if !self.queue.is_empty() {
                    debug!("no transport attached, keeping {} pending commands", self.queue.len());
                }
            }
        }
    }

    /// Shut the device down and release the transport.
    ///
    /// Writes a stop-all-motors frame, forces every digital output port low,
    /// waits the configured settle period so the device can act on the
    /// frames, then drops the transport. Write failures are logged and
    /// swallowed; the settle and the release happen on every path, and the
    /// transport is released exactly once.
    pub async fn shutdown(&mut self) {
        let Some(mut transport) = self.transport.take() else {
            debug!("shutdown with no transport attached");
            return;
        };
        info!("shutting down device");

        Self::write_swallowing(&mut transport, &CommandRequest::new(opcode::DC_MOTOR_OFF));
        for port in 0..self.config.digital_ports {
            let off = CommandRequest::new(opcode::GPIO_OUT)
                .with(FieldName::Port, port as u16)
                .with(FieldName::Value, 0);
            Self::write_swallowing(&mut transport, &off);
        }

        sleep(self.config.settle).await;
        drop(transport);
        info!("transport released");
    }

    fn write_swallowing(transport: &mut Box<dyn Transport>, request: &CommandRequest) {
        match encoder::encode(request) {
            Ok(Some(frame)) => {
                if let Err(e) = transport.write_frame(&frame) {
                    warn!("shutdown frame write failed for opcode {:#04x}: {}", request.opcode, e);
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!("shutdown frame failed to encode for opcode {:#04x}: {}", request.opcode, e);
            }
        }
    }
}
