//! Streaming Frame Reassembly
//!
//! State machine that reassembles sync+length+payload+checksum frames from
//! a noisy serial stream, one byte at a time.

use crate::error::ProtocolError;
use crate::{MAX_PAYLOAD_LEN, SYNC};
use tracing::trace;

/// Framing states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameState {
    WaitFirstSync,
    WaitSecondSync,
    WaitLength,
    WaitPayload,
    WaitChecksum,
}

/// One reassembled, checksum-valid payload
///
/// Fixed-capacity storage; the decoder hands it out by value and retains
/// nothing.
#[derive(Debug, Clone, Copy)]
pub struct RawPacket {
    bytes: [u8; MAX_PAYLOAD_LEN],
    len: usize,
}

impl RawPacket {
    /// The payload bytes, truncated to the declared length
    pub fn payload(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Outcome of feeding one byte to the decoder
#[derive(Debug)]
pub enum FrameStep {
    /// More bytes needed
    Incomplete,
    /// A checksum-valid frame completed
    Complete(RawPacket),
    /// Frame dropped; framing has already resynced
    Dropped(ProtocolError),
    /// Oversized declared length; frame dropped AND the current drain batch
    /// must stop (remaining buffered bytes wait for the next cycle)
    Abort(ProtocolError),
}

/// Incremental frame decoder
///
/// Feed bytes one at a time; a `Complete` step hands out the validated
/// payload. Invalid frames are dropped without surfacing an error (the
/// serial link is expected to be noisy) and the decoder resyncs on the next
/// `0xAA 0xAA` pair.
pub struct FrameDecoder {
    state: FrameState,
    buf: [u8; MAX_PAYLOAD_LEN],
    payload_len: usize,
    payload_idx: usize,
    checksum_acc: u8,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self {
            state: FrameState::WaitFirstSync,
            buf: [0; MAX_PAYLOAD_LEN],
            payload_len: 0,
            payload_idx: 0,
            checksum_acc: 0,
        }
    }

    /// Process one byte from the stream
    pub fn feed(&mut self, b: u8) -> FrameStep {
        match self.state {
            FrameState::WaitFirstSync => {
                if b == SYNC {
                    self.state = FrameState::WaitSecondSync;
                }
                FrameStep::Incomplete
            }
            FrameState::WaitSecondSync => {
                // A non-sync byte here is discarded outright, never
                // reinterpreted as a new first sync. Protocol compatibility
                // depends on this exact resync policy.
                self.state = if b == SYNC {
                    FrameState::WaitLength
                } else {
                    FrameState::WaitFirstSync
                };
                FrameStep::Incomplete
            }
            FrameState::WaitLength => {
                let declared = b as usize;
                if declared > MAX_PAYLOAD_LEN {
                    self.state = FrameState::WaitFirstSync;
                    return FrameStep::Abort(ProtocolError::OversizedPayload {
                        declared,
                        max: MAX_PAYLOAD_LEN,
                    });
                }
                self.payload_len = declared;
                self.payload_idx = 0;
                self.checksum_acc = 0;
                self.state = FrameState::WaitPayload;
                FrameStep::Incomplete
            }
            FrameState::WaitPayload => {
                // A zero-length frame still consumes (and discards) one byte
                // here before the checksum, matching the reference device
                if self.payload_idx < self.payload_len {
                    self.buf[self.payload_idx] = b;
                    self.payload_idx += 1;
                    self.checksum_acc = self.checksum_acc.wrapping_add(b);
                }
                if self.payload_idx >= self.payload_len {
                    self.state = FrameState::WaitChecksum;
                }
                FrameStep::Incomplete
            }
            FrameState::WaitChecksum => {
                self.state = FrameState::WaitFirstSync;
                let expected = 255 - self.checksum_acc;
                if b == expected {
                    trace!(len = self.payload_len, "frame complete");
                    FrameStep::Complete(RawPacket {
                        bytes: self.buf,
                        len: self.payload_len,
                    })
                } else {
                    FrameStep::Dropped(ProtocolError::ChecksumMismatch {
                        expected,
                        actual: b,
                    })
                }
            }
        }
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}
