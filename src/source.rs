//! Inbound byte-source abstraction.

use tokio::sync::mpsc;

use crate::error::Result;

/// Trait for inbound byte streams.
///
/// Sources abstract over where raw board bytes come from (a serial read
/// loop, a replayed capture, a test fixture) and handle their own timing
/// internally.
#[async_trait::async_trait]
pub trait ByteSource: Send + 'static {
    /// Get the next chunk of raw bytes.
    ///
    /// Returns:
    /// - `Ok(Some(chunk))` - new bytes available, of arbitrary length
    /// - `Ok(None)` - stream ended (normal termination)
    /// - `Err(e)` - transient read failure
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>>;
}

/// Channel-backed [`ByteSource`].
///
/// Hosts that already own their read loop push chunks into the sender half;
/// dropping the sender ends the stream.
pub struct ChannelSource {
    rx: mpsc::Receiver<Vec<u8>>,
}

impl ChannelSource {
    /// Create a source and the sender feeding it.
    pub fn new(capacity: usize) -> (mpsc::Sender<Vec<u8>>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self { rx })
    }
}

#[async_trait::async_trait]
impl ByteSource for ChannelSource {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        Ok(self.rx.recv().await)
    }
}
