//! Outbound byte-sink abstraction.

use crate::error::Result;

/// A write-only byte sink carrying encoded frames to the board.
///
/// The protocol is fire-and-forget: writes are expected to be accepted
/// immediately and there is no backpressure or acknowledgement signal. A
/// sink is attached to and detached from a [`BoardLink`](crate::BoardLink);
/// while no sink is attached, draining the command queue is a no-op.
pub trait Transport: Send {
    /// Hand one encoded frame to the device.
    fn write_frame(&mut self, frame: &[u8]) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        (**self).write_frame(frame)
    }
}
