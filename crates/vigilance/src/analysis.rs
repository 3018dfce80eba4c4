//! Vigilance analysis results

use crate::state::DriverState;
use serde::{Deserialize, Serialize};

/// Result of observing one published reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VigilanceUpdate {
    /// Committed state after this observation
    pub state: DriverState,

    /// State before this observation
    pub previous_state: DriverState,

    /// Whether a transition committed on this observation
    pub transitioned: bool,

    /// Published drowsiness score in [0,1]
    pub drowsiness: f32,

    /// Attention score in [0,1]
    pub attention: f32,

    /// Meditation score in [0,1]
    pub meditation: f32,

    /// Whether a blink was consumed by this evaluation
    pub blink_detected: bool,
}

impl VigilanceUpdate {
    /// True when the driver needs escalating feedback
    pub fn is_alarmed(&self) -> bool {
        !matches!(self.state, DriverState::Alert)
    }
}
