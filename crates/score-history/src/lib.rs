//! Rolling Score History
//!
//! Fixed-capacity ring of the three most recent score streams (drowsiness,
//! attention, meditation) with running averages over the full window.

mod window;

pub use window::{HistoryWindow, ScoreAverages, HISTORY_CAPACITY};
