//! Payload Field Decoding
//!
//! Walks a checksum-validated payload tagged by single-byte field codes and
//! produces a typed sensor reading. Every multi-byte read is bounds-checked
//! against the declared payload length; a field running past the buffer end
//! rejects the whole packet.

use crate::error::ProtocolError;
use crate::field;
use serde::{Deserialize, Serialize};

/// Number of spectral bands reported per complete packet
pub const EEG_BAND_COUNT: usize = 8;

/// Poor-quality value meaning no skin contact
pub const NO_CONTACT: u8 = 200;

/// Spectral band identifiers, in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Band {
    Delta = 0,
    Theta = 1,
    LowAlpha = 2,
    HighAlpha = 3,
    LowBeta = 4,
    HighBeta = 5,
    LowGamma = 6,
    MidGamma = 7,
}

impl Band {
    /// All bands in wire order
    pub const ALL: [Band; EEG_BAND_COUNT] = [
        Band::Delta,
        Band::Theta,
        Band::LowAlpha,
        Band::HighAlpha,
        Band::LowBeta,
        Band::HighBeta,
        Band::LowGamma,
        Band::MidGamma,
    ];

    /// Position within the wire-order band sequence
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Decoded contents of one validated packet
///
/// Every field is rebuilt from scratch per packet; a field absent from the
/// payload holds its default, never a previous packet's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Inverse contact quality: 0 = best, 200 = no contact
    pub poor_quality: u8,
    /// Attention score (0-100)
    pub attention: u8,
    /// Meditation score (0-100)
    pub meditation: u8,
    /// Blink strength (0-100); 0 when the packet carried no blink event
    pub blink_strength: u8,
    /// 24-bit band power values in wire order
    pub bands: [u32; EEG_BAND_COUNT],
    /// Whether this packet carried the complete (quality + bands) field set
    pub complete: bool,
}

impl Default for SensorReading {
    fn default() -> Self {
        Self {
            poor_quality: NO_CONTACT,
            attention: 0,
            meditation: 0,
            blink_strength: 0,
            bands: [0; EEG_BAND_COUNT],
            complete: false,
        }
    }
}

impl SensorReading {
    /// Decode a checksum-validated payload
    pub fn decode(payload: &[u8]) -> Result<Self, ProtocolError> {
        let mut reading = Self::default();
        let mut i = 0;
        while i < payload.len() {
            let code = payload[i];
            i += 1;
            match code {
                field::POOR_QUALITY => {
                    reading.poor_quality = take(payload, code, i)?;
                    reading.complete = true;
                    i += 1;
                }
                field::ATTENTION => {
                    reading.attention = take(payload, code, i)?;
                    i += 1;
                }
                field::MEDITATION => {
                    reading.meditation = take(payload, code, i)?;
                    i += 1;
                }
                field::BLINK_STRENGTH => {
                    reading.blink_strength = take(payload, code, i)?;
                    i += 1;
                }
                field::RAW_WAVE => {
                    // fixed-width field, value ignored
                    if i + 3 > payload.len() {
                        return Err(truncated(code, i, payload.len()));
                    }
                    i += 3;
                }
                field::BAND_POWER => {
                    let need = 3 * EEG_BAND_COUNT;
                    if i + need > payload.len() {
                        return Err(truncated(code, i, payload.len()));
                    }
                    for band in 0..EEG_BAND_COUNT {
                        let at = i + band * 3;
                        reading.bands[band] = (u32::from(payload[at]) << 16)
                            | (u32::from(payload[at + 1]) << 8)
                            | u32::from(payload[at + 2]);
                    }
                    i += need;
                }
                _ => {
                    // value-less single-byte marker, skipped
                }
            }
        }
        Ok(reading)
    }

    /// Contact quality on a 0-100 scale (100 = best)
    ///
    /// The wire value is documented as 0-200, but the checksum does not
    /// constrain field values; anything above 200 clamps to quality 0.
    pub fn quality(&self) -> u8 {
        100u8.saturating_sub(self.poor_quality / 2)
    }

    /// Band power for a named band
    pub fn band(&self, band: Band) -> u32 {
        self.bands[band.index()]
    }

    pub fn delta(&self) -> u32 {
        self.band(Band::Delta)
    }

    pub fn theta(&self) -> u32 {
        self.band(Band::Theta)
    }

    pub fn low_alpha(&self) -> u32 {
        self.band(Band::LowAlpha)
    }

    pub fn high_alpha(&self) -> u32 {
        self.band(Band::HighAlpha)
    }

    pub fn low_beta(&self) -> u32 {
        self.band(Band::LowBeta)
    }

    pub fn high_beta(&self) -> u32 {
        self.band(Band::HighBeta)
    }

    pub fn low_gamma(&self) -> u32 {
        self.band(Band::LowGamma)
    }

    pub fn mid_gamma(&self) -> u32 {
        self.band(Band::MidGamma)
    }
}

fn take(payload: &[u8], code: u8, offset: usize) -> Result<u8, ProtocolError> {
    payload
        .get(offset)
        .copied()
        .ok_or_else(|| truncated(code, offset, payload.len()))
}

fn truncated(code: u8, offset: usize, len: usize) -> ProtocolError {
    ProtocolError::TruncatedField { code, offset, len }
}
