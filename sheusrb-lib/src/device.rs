use crate::constants::{DEFAULT_BAUD_RATE, DEFAULT_PORT, DEFAULT_TIMEOUT, FIXED_PAYLOAD};
use crate::error::SheusrbError;
use serialport::{DataBits, FlowControl, Parity, SerialPort, SerialPortInfo, StopBits};
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info};

/// Where and how to open the serial device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSettings {
    pub path: String,
    pub baud_rate: u32,
    pub timeout: Duration,
}

impl Default for PortSettings {
    fn default() -> Self {
        Self {
            path: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl PortSettings {
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Opens a device and hands back an owned handle.
///
/// Dropping the handle must release the device.
pub trait Connector {
    type Port: Write;

    fn open(&self, settings: &PortSettings) -> Result<Self::Port, SheusrbError>;
}

/// Connector backed by the `serialport` crate, 8N1 without flow control
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialConnector;

impl Connector for SerialConnector {
    type Port = Box<dyn SerialPort>;

    fn open(&self, settings: &PortSettings) -> Result<Self::Port, SheusrbError> {
        // Exclusive access (TIOCEXCL) is the serialport default on unix
        serialport::new(settings.path.as_str(), settings.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(settings.timeout)
            .open()
            .map_err(|e| SheusrbError::device_unavailable(&settings.path, e))
    }
}

/// Writes payloads to a device, one open/write/close cycle per call
pub struct PortWriter<C: Connector = SerialConnector> {
    connector: C,
    settings: PortSettings,
}

impl<C: Connector> PortWriter<C> {
    pub fn new(connector: C, settings: PortSettings) -> Self {
        Self { connector, settings }
    }

    pub fn settings(&self) -> &PortSettings {
        &self.settings
    }

    /// Open the device, write `payload` in full and close it again.
    ///
    /// The handle is dropped on every return path, including a failed write.
    /// Nothing is retried; a partial write surfaces as [`SheusrbError::Io`].
    pub fn send(&self, payload: &[u8]) -> Result<(), SheusrbError> {
        info!(
            path = %self.settings.path,
            baud_rate = self.settings.baud_rate,
            "Opening serial device"
        );
        let mut port = self.connector.open(&self.settings)?;

        debug!(bytes = hex::encode(payload), "Serial Write");
        port.write_all(payload)?;
        port.flush()?;

        info!("Sent {} bytes", payload.len());
        Ok(())
    }
}

/// Send the fixed command to the default device
pub fn send_fixed_command() -> Result<(), SheusrbError> {
    send_fixed_command_with(SerialConnector, PortSettings::default())
}

/// Send the fixed command through any connector
pub fn send_fixed_command_with<C: Connector>(connector: C, settings: PortSettings) -> Result<(), SheusrbError> {
    PortWriter::new(connector, settings).send(&FIXED_PAYLOAD)
}

/// Serial ports currently visible to the system
pub fn list_ports() -> Result<Vec<SerialPortInfo>, SheusrbError> {
    let ports = serialport::available_ports().map_err(SheusrbError::Enumerate)?;
    debug!("Found {} serial port(s)", ports.len());
    Ok(ports)
}
