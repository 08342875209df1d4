//! Test doubles for the transport and the exchange bridge.
//!
//! Shared by unit tests and benches. The fakes are `Clone` with shared
//! interior state so a test can keep a handle for inspection after moving a
//! clone into the code under test.

#![cfg(any(test, feature = "benchmark"))]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::bridge::{ExchangeBridge, REQUEST_KEY, RequestBatch};
use crate::error::{LinkError, Result};
use crate::protocol::TELEMETRY_HEADER;
use crate::protocol::opcode::START_DELIMITER;
use crate::transport::Transport;

/// Build a valid 11-byte telemetry frame around seven readings.
pub fn telemetry_frame(readings: [u8; 7]) -> Vec<u8> {
    let mut frame = vec![START_DELIMITER, TELEMETRY_HEADER[0], TELEMETRY_HEADER[1]];
    frame.extend_from_slice(&readings);
    frame.push(readings.iter().fold(0u8, |acc, b| acc ^ b));
    frame
}

/// In-memory [`Transport`] recording every written frame.
#[derive(Clone, Default)]
pub struct MockTransport {
    written: Arc<Mutex<Vec<Vec<u8>>>>,
    fail: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every write fails.
    pub fn failing() -> Self {
        Self { written: Arc::default(), fail: true }
    }

    /// Frames written so far.
    pub fn written(&self) -> Vec<Vec<u8>> {
        self.written.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        if self.fail {
            return Err(LinkError::transport("mock write failure"));
        }
        self.written.lock().unwrap().push(frame.to_vec());
        Ok(())
    }
}

/// In-memory [`ExchangeBridge`] with stageable batches.
#[derive(Clone, Default)]
pub struct MemoryBridge {
    inner: Arc<Mutex<BridgeState>>,
}

#[derive(Default)]
struct BridgeState {
    staged: HashMap<String, RequestBatch>,
    published: Vec<(String, u8)>,
}

impl MemoryBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage one request under the `"SET"` batch.
    pub fn stage(&mut self, composite: &str, fields: &[(&str, u16)]) {
        let mut inner = self.inner.lock().unwrap();
        let batch = inner.staged.entry(REQUEST_KEY.to_string()).or_default();
        batch.insert(
            composite.to_string(),
            fields.iter().map(|(name, value)| (name.to_string(), *value)).collect(),
        );
    }

    /// Every `(key, value)` published so far.
    pub fn published(&self) -> Vec<(String, u8)> {
        self.inner.lock().unwrap().published.clone()
    }
}

impl ExchangeBridge for MemoryBridge {
    fn take(&mut self, key: &str) -> Option<RequestBatch> {
        self.inner.lock().unwrap().staged.remove(key)
    }

    fn publish(&mut self, key: &str, value: u8) {
        self.inner.lock().unwrap().published.push((key.to_string(), value));
    }
}
