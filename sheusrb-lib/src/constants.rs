// Constants for the sheusrb command link

use std::time::Duration;

/// Serial device the board enumerates as (USB CDC-ACM)
pub const DEFAULT_PORT: &str = "/dev/ttyACM2";

/// Line speed. Ignored by CDC-ACM devices but required to open the port.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Write timeout. Long enough that a 5-byte write never hits it on a live device.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Size of the fixed command (5 bytes)
pub const PAYLOAD_LEN: usize = 5;

/// The fixed command: bincode encoding of `Message::fixed()`
pub const FIXED_PAYLOAD: [u8; PAYLOAD_LEN] = [1, 1, 42, 0, 32];

/// Head marker. Reserved, never written to the device.
pub const HEAD: [u8; 2] = [0xFF, 0xFF];
