//! Headset Protocol Error Types

use thiserror::Error;

/// Errors that can occur while framing or decoding headset packets
///
/// Framing-level errors (`ChecksumMismatch`, `OversizedPayload`) drop the
/// frame and resync; they are logged, never surfaced to the drain caller.
/// `TruncatedField` rejects a payload the same way a checksum failure would.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Checksum mismatch
    #[error("Checksum mismatch: expected {expected:02X}, got {actual:02X}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    /// Declared payload length exceeds the protocol maximum
    #[error("Declared payload length {declared} exceeds maximum {max}")]
    OversizedPayload { declared: usize, max: usize },

    /// A multi-byte field runs past the end of the declared payload
    #[error("Field {code:02X} at offset {offset} runs past payload end ({len} bytes)")]
    TruncatedField { code: u8, offset: usize, len: usize },
}
