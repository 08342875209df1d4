//! Core types for telemetry and command data.
//!
//! - [`TelemetrySnapshot`] is the latest decoded board state
//! - [`CommandRequest`] + [`FieldMap`] describe one outbound command with a
//!   canonical, order-independent field map
//! - [`ParserStats`] exposes the parser's silent recovery work as counters

mod request;
mod snapshot;
mod stats;

pub use request::{CommandRequest, FieldMap};
pub use snapshot::TelemetrySnapshot;
pub use stats::ParserStats;
