use std::io;
use thiserror::Error;

/// The primary error type for the `sheusrb-lib` library.
#[derive(Error, Debug)]
pub enum SheusrbError {
    #[error("Serial device {path} unavailable: {source}")]
    DeviceUnavailable {
        path: String,
        #[source]
        source: serialport::Error,
    },

    #[error("Serial port enumeration failed: {0}")]
    Enumerate(serialport::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("Decode error: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

impl SheusrbError {
    pub fn device_unavailable(path: impl Into<String>, source: serialport::Error) -> Self {
        SheusrbError::DeviceUnavailable {
            path: path.into(),
            source,
        }
    }
}
