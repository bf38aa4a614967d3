use crate::error::SheusrbError;
use bincode::{Decode, Encode};
use bytes::Bytes;

/// One axis as the firmware tracks it
#[derive(Encode, Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axis {
    pub stop: bool,
    pub pose: u16,
}

/// Setpoint and measurement for the same axis
#[derive(Encode, Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisPair {
    pub goal: Axis,
    pub meas: Axis,
}

/// Messages understood by the sheusrb firmware.
///
/// Variant order is part of the wire format: bincode writes the variant index
/// as the first byte, so `Axis` is 0 and `Pair` is 1.
#[derive(Encode, Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Axis(Axis),
    Pair(AxisPair),
}

impl Message {
    /// The command whose encoding is [`FIXED_PAYLOAD`](crate::constants::FIXED_PAYLOAD)
    pub fn fixed() -> Self {
        Message::Pair(AxisPair {
            goal: Axis { stop: true, pose: 42 },
            meas: Axis { stop: false, pose: 32 },
        })
    }

    /// Encode with the bincode standard config (little endian, varint)
    pub fn encode(&self) -> Result<Bytes, SheusrbError> {
        let buf = bincode::encode_to_vec(self, bincode::config::standard())?;
        Ok(Bytes::from(buf))
    }

    /// Decode one message, returning it with the number of bytes consumed
    pub fn decode(data: &[u8]) -> Result<(Self, usize), SheusrbError> {
        let (message, size) = bincode::decode_from_slice(data, bincode::config::standard())?;
        Ok((message, size))
    }
}
