//! Per-state feedback policy
//!
//! Maps the committed driver state to LED, beep, and display commands.
//! Audible alerts are paced: Drowsy beeps once at a relaxed interval,
//! AttentionLost beeps in bursts of three at an urgent one.

use crate::sink::{AudibleSink, BeepPattern, DisplaySink, IndicatorSink, LedCommand, StatusFrame};
use serde::{Deserialize, Serialize};
use tracing::debug;
use vigilance::{DriverState, VigilanceUpdate};

/// Feedback pacing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Base interval between audible alerts; Drowsy uses twice this,
    /// AttentionLost half of it
    pub beep_interval_ms: u64,
    /// Beep-on duration per beep
    pub beep_on_ms: u64,
    /// Silence between beeps in a burst
    pub beep_gap_ms: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            beep_interval_ms: 5000,
            beep_on_ms: 80,
            beep_gap_ms: 120,
        }
    }
}

/// Stateful feedback router with beep pacing
pub struct FeedbackPolicy {
    config: FeedbackConfig,
    last_beep_ms: u64,
}

impl FeedbackPolicy {
    pub fn new(config: FeedbackConfig) -> Self {
        Self {
            config,
            last_beep_ms: 0,
        }
    }

    /// LED command for a state
    pub fn led_for(&self, state: DriverState) -> LedCommand {
        match state {
            DriverState::Alert => LedCommand {
                rgb: (0, 0, 255),
                brightness: 30,
                pulse: false,
            },
            DriverState::Drowsy => LedCommand {
                rgb: (255, 255, 0),
                brightness: 50,
                pulse: true,
            },
            DriverState::AttentionLost => LedCommand {
                rgb: (255, 0, 0),
                brightness: 100,
                pulse: true,
            },
            DriverState::Distracted => LedCommand {
                rgb: (128, 0, 128),
                brightness: 70,
                pulse: true,
            },
        }
    }

    /// Beep burst due for a state at this instant, if pacing allows
    pub fn beep_for(&mut self, state: DriverState, now_ms: u64) -> Option<BeepPattern> {
        let (count, interval) = match state {
            DriverState::Drowsy => (1, self.config.beep_interval_ms * 2),
            DriverState::AttentionLost => (3, self.config.beep_interval_ms / 2),
            _ => return None,
        };

        if now_ms.saturating_sub(self.last_beep_ms) <= interval {
            return None;
        }
        self.last_beep_ms = now_ms;
        Some(BeepPattern {
            count,
            on_ms: self.config.beep_on_ms,
            gap_ms: self.config.beep_gap_ms,
        })
    }

    /// Display frame for an update, with the warning line for alarm states
    pub fn status_for(update: &VigilanceUpdate) -> StatusFrame {
        let warning = match update.state {
            DriverState::Drowsy => Some("TAKE A BREAK!"),
            DriverState::AttentionLost => Some("PULL OVER NOW!"),
            _ => None,
        };
        StatusFrame {
            state: update.state,
            drowsiness: update.drowsiness,
            attention: update.attention,
            meditation: update.meditation,
            warning,
        }
    }

    /// Route one update to all three sinks
    pub fn dispatch(
        &mut self,
        update: &VigilanceUpdate,
        now_ms: u64,
        display: &mut dyn DisplaySink,
        indicator: &mut dyn IndicatorSink,
        audible: &mut dyn AudibleSink,
    ) {
        indicator.set(self.led_for(update.state));
        if let Some(pattern) = self.beep_for(update.state, now_ms) {
            debug!(state = ?update.state, count = pattern.count, "audible alert");
            audible.beep(pattern);
        }
        display.render(&Self::status_for(update));
    }
}

impl Default for FeedbackPolicy {
    fn default() -> Self {
        Self::new(FeedbackConfig::default())
    }
}
