//! Serial-port transport (feature `serial`).

use std::io::Write;
use std::time::Duration;

use tracing::info;

use crate::error::{LinkError, Result};
use crate::transport::Transport;

/// [`Transport`] backed by a physical serial port.
pub struct SerialTransport {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialTransport {
    /// Open a serial port at the given baud rate.
    pub fn open(path: &str, baud_rate: u32) -> Result<Self> {
        let port = serialport::new(path, baud_rate)
            .timeout(Duration::from_millis(100))
            .open()
            .map_err(|e| {
                LinkError::transport_with_source(format!("failed to open {path}"), Box::new(e))
            })?;
        info!("serial port opened: {} @ {} baud", path, baud_rate);
        Ok(Self { port })
    }

    /// Wrap an already-opened serial port handle.
    pub fn from_port(port: Box<dyn serialport::SerialPort>) -> Self {
        Self { port }
    }
}

impl Transport for SerialTransport {
    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.port.write_all(frame).map_err(|e| {
            LinkError::transport_with_source("serial write failed".to_string(), Box::new(e))
        })
    }
}
