pub mod constants;
pub mod device;
pub mod error;
pub mod message;

// Re-export the writer entry points for easy access
pub use device::{
    Connector, PortSettings, PortWriter, SerialConnector, list_ports, send_fixed_command, send_fixed_command_with,
};
pub use error::SheusrbError;
pub use message::{Axis, AxisPair, Message};
