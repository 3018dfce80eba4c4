//! Headset Serial Protocol Implementation
//!
//! Streaming framing and payload decoding for NeuroSky-style biosignal
//! headset transceivers. Turns a noisy serial byte stream into validated
//! sensor readings: two sync bytes, a declared payload length, the payload,
//! and an additive checksum per frame.

mod error;
mod framer;
mod payload;
mod session;

pub use error::ProtocolError;
pub use framer::{FrameDecoder, FrameStep, RawPacket};
pub use payload::{Band, SensorReading, EEG_BAND_COUNT, NO_CONTACT};
pub use session::{ByteSource, HeadsetSession, SliceSource};

/// Serial baud rate used by the headset transceiver
pub const DEFAULT_BAUD_RATE: u32 = 57_600;

/// Frame sync byte; two in a row open a frame
pub const SYNC: u8 = 0xAA;

/// Maximum declared payload length in bytes
pub const MAX_PAYLOAD_LEN: usize = 169;

/// Payload field-code constants
pub mod field {
    /// Poor signal quality (0 = best contact, 200 = no contact);
    /// marks the packet as carrying the complete field set
    pub const POOR_QUALITY: u8 = 0x02;
    /// Attention score (0-100)
    pub const ATTENTION: u8 = 0x04;
    /// Meditation score (0-100)
    pub const MEDITATION: u8 = 0x05;
    /// Blink strength (0-100)
    pub const BLINK_STRENGTH: u8 = 0x16;
    /// Raw wave sample; fixed 3-byte field, value ignored
    pub const RAW_WAVE: u8 = 0x80;
    /// Eight consecutive 3-byte big-endian band power values
    pub const BAND_POWER: u8 = 0x83;
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::SYNC;

    /// Build a wire frame around a payload: sync pair, length, payload,
    /// additive checksum.
    pub fn frame(payload: &[u8]) -> Vec<u8> {
        let sum: u8 = payload.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
        let mut out = vec![SYNC, SYNC, payload.len() as u8];
        out.extend_from_slice(payload);
        out.push(255 - sum);
        out
    }
}
