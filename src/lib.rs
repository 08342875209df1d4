//! Type-safe Rust engine for the serial command/telemetry protocol of
//! motorized coding boards.
//!
//! Botlink sits between a host control application and a controller board on
//! the other end of a byte stream. Inbound, it parses noisy serial data into
//! fixed-size telemetry frames, resynchronizing after corruption. Outbound,
//! it encodes motor, GPIO, IoT and program-flow commands into
//! checksum-sealed frames, deduplicating redundant requests before they
//! reach the wire.
//!
//! # Features
//!
//! - **Noise tolerance**: byte-at-a-time resynchronization, never deadlocks
//! - **Type safety**: a static command table and typed request validation
//! - **Poll or task**: drive [`BoardLink`] yourself, or let [`Driver`] own it
//! - **Fire-and-forget**: no retransmission, no acknowledgement, by design
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use botlink::{BoardLink, CommandRequest, FieldName, LinkConfig, opcode};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut link = BoardLink::new(LinkConfig::default());
//!
//!     // Inbound: feed raw serial bytes, read the decoded snapshot.
//!     link.feed(&[0x23, 0x08, 0x00, 1, 2, 3, 4, 5, 6, 7, 0x00]);
//!     println!("telemetry: {:?}", link.snapshot());
//!
//!     // Outbound: submit a command, drain to the attached transport.
//!     let request = CommandRequest::new(opcode::GPIO_OUT)
//!         .with(FieldName::Port, 0)
//!         .with(FieldName::Value, 1);
//!     link.submit(request)?;
//!     link.drain();
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod error;
pub mod protocol;
pub mod types;

// Engine components
pub mod bridge;
pub mod config;
pub mod driver;
pub mod link;
pub mod parser;
pub mod queue;
pub mod source;
pub mod transport;

// Feature-gated transports
#[cfg(feature = "serial")]
pub mod transport_serial;

#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;

// Core exports
pub use error::{LinkError, Result};
pub use protocol::{FieldName, opcode};
pub use types::{CommandRequest, FieldMap, ParserStats, TelemetrySnapshot};

// Engine exports
pub use bridge::{ExchangeBridge, REQUEST_KEY, RequestBatch, RequestFields};
pub use config::LinkConfig;
pub use driver::{Driver, DriverChannels};
pub use link::BoardLink;
pub use parser::TelemetryParser;
pub use queue::{CommandQueue, PendingCommand};
pub use source::{ByteSource, ChannelSource};
pub use transport::Transport;

#[cfg(feature = "serial")]
pub use transport_serial::SerialTransport;

/// Unified entry point wiring a link to its driver task.
///
/// For hosts that want the engine to own the poll loop: build the byte
/// source, the exchange bridge and the transport, and get back the running
/// driver's channels.
///
/// # Example
///
/// ```rust,ignore
/// let (chunks, source) = botlink::ChannelSource::new(32);
/// let channels = botlink::Botlink::spawn(source, bridge, transport, LinkConfig::default());
/// let mut telemetry = channels.telemetry.clone();
/// ```
pub struct Botlink;

impl Botlink {
    /// Attach `transport` to a fresh [`BoardLink`] and spawn its [`Driver`].
    pub fn spawn<S, B, T>(
        source: S,
        bridge: B,
        transport: T,
        config: LinkConfig,
    ) -> DriverChannels
    where
        S: ByteSource,
        B: ExchangeBridge + 'static,
        T: Transport + 'static,
    {
        let mut link = BoardLink::new(config);
        link.attach(Box::new(transport));
        Driver::spawn(source, bridge, link)
    }
}
