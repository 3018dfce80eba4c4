//! Fixed Ring of Score Triples

use serde::{Deserialize, Serialize};

/// Window capacity; a design constant, not user-configurable
pub const HISTORY_CAPACITY: usize = 10;

/// Mean of each score stream over the full window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreAverages {
    pub drowsiness: f32,
    pub attention: f32,
    pub meditation: f32,
}

/// Fixed-capacity circular buffer of parallel score arrays
///
/// Ring semantics: the write cursor wraps and the oldest slot is overwritten
/// in place, no shifting. Averages divide by the full capacity including
/// zero-initialized slots, so sensitivity ramps up over the first ten
/// readings after startup. That bias is intentional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryWindow {
    drowsiness: [f32; HISTORY_CAPACITY],
    attention: [f32; HISTORY_CAPACITY],
    meditation: [f32; HISTORY_CAPACITY],
    cursor: usize,
}

impl HistoryWindow {
    pub fn new() -> Self {
        Self {
            drowsiness: [0.0; HISTORY_CAPACITY],
            attention: [0.0; HISTORY_CAPACITY],
            meditation: [0.0; HISTORY_CAPACITY],
            cursor: 0,
        }
    }

    /// Write one score triple at the cursor and advance it
    pub fn push(&mut self, drowsiness: f32, attention: f32, meditation: f32) {
        self.drowsiness[self.cursor] = drowsiness;
        self.attention[self.cursor] = attention;
        self.meditation[self.cursor] = meditation;
        self.cursor = (self.cursor + 1) % HISTORY_CAPACITY;
    }

    /// Arithmetic mean of each stream over all slots
    pub fn averages(&self) -> ScoreAverages {
        let cap = HISTORY_CAPACITY as f32;
        ScoreAverages {
            drowsiness: self.drowsiness.iter().sum::<f32>() / cap,
            attention: self.attention.iter().sum::<f32>() / cap,
            meditation: self.meditation.iter().sum::<f32>() / cap,
        }
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::new()
    }
}
