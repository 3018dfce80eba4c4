//! Driver state machine
//!
//! Threshold bands with hysteresis, a confirmation delay against flicker,
//! and a fail-safe timeout out of alarm states. Transitions are evaluated
//! from the current state only.

use crate::config::VigilanceConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Discrete alertness states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DriverState {
    #[default]
    Alert,
    Drowsy,
    AttentionLost,
    /// Reserved for a future distraction model; no transition rule enters
    /// it in the current design.
    Distracted,
}

impl DriverState {
    /// Short display label
    pub fn label(&self) -> &'static str {
        match self {
            DriverState::Alert => "ALERT",
            DriverState::Drowsy => "DROWSY",
            DriverState::AttentionLost => "ATTN LOST!",
            DriverState::Distracted => "DISTRACTED",
        }
    }
}

/// Hysteretic state tracker with confirmation delay and safety override
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateTracker {
    current: DriverState,
    previous: DriverState,
    pending: DriverState,
    /// When the current state was entered
    state_since_ms: u64,
    /// When the pending state was first proposed
    pending_since_ms: u64,
}

impl StateTracker {
    pub fn new(now_ms: u64) -> Self {
        Self {
            current: DriverState::Alert,
            previous: DriverState::Alert,
            pending: DriverState::Alert,
            state_since_ms: now_ms,
            pending_since_ms: now_ms,
        }
    }

    pub fn current(&self) -> DriverState {
        self.current
    }

    pub fn previous(&self) -> DriverState {
        self.previous
    }

    pub fn pending(&self) -> DriverState {
        self.pending
    }

    /// When the current state was entered
    pub fn state_since_ms(&self) -> u64 {
        self.state_since_ms
    }

    /// Evaluate transition rules for one score sample
    ///
    /// Returns true when a transition committed (including via the safety
    /// override, which is checked on every evaluation).
    pub fn apply(&mut self, score: f32, now_ms: u64, config: &VigilanceConfig) -> bool {
        self.previous = self.current;
        let proposed = self.propose(score, config);

        let mut changed = false;
        if proposed != self.current {
            if self.confirm(proposed, now_ms, config) {
                info!(from = ?self.current, to = ?proposed, score, "driver state transition");
                self.current = proposed;
                self.state_since_ms = now_ms;
                changed = true;
            }
        } else {
            // No transition condition fired; cancel any stale pending proposal
            self.pending = proposed;
        }

        if self.safety_override(now_ms, config) {
            changed = true;
        }
        changed
    }

    /// Fail-safe: force an unconditional return to Alert after too long in
    /// an alarm state. Bypasses the confirmation delay.
    pub fn safety_override(&mut self, now_ms: u64, config: &VigilanceConfig) -> bool {
        let alarmed = matches!(self.current, DriverState::Drowsy | DriverState::AttentionLost);
        if alarmed && now_ms.saturating_sub(self.state_since_ms) > config.max_alert_ms {
            warn!(state = ?self.current, "safety override: forcing return to Alert");
            self.previous = self.current;
            self.current = DriverState::Alert;
            self.pending = DriverState::Alert;
            self.state_since_ms = now_ms;
            return true;
        }
        false
    }

    fn propose(&self, score: f32, config: &VigilanceConfig) -> DriverState {
        let delta = config.hysteresis;
        match self.current {
            DriverState::Alert => {
                if score > config.drowsy_threshold + delta {
                    DriverState::Drowsy
                } else {
                    DriverState::Alert
                }
            }
            DriverState::Drowsy => {
                if score > config.attention_lost_threshold + delta {
                    DriverState::AttentionLost
                } else if score < config.drowsy_threshold - delta {
                    DriverState::Alert
                } else {
                    DriverState::Drowsy
                }
            }
            DriverState::AttentionLost => {
                if score < config.attention_lost_threshold - delta {
                    DriverState::Drowsy
                } else {
                    DriverState::AttentionLost
                }
            }
            DriverState::Distracted => DriverState::Distracted,
        }
    }

    /// Dwell gate: the same target must be re-proposed continuously for the
    /// confirmation delay before it commits. A divergent proposal restarts
    /// the timer.
    fn confirm(&mut self, proposed: DriverState, now_ms: u64, config: &VigilanceConfig) -> bool {
        if proposed != self.pending {
            self.pending = proposed;
            self.pending_since_ms = now_ms;
            return false;
        }
        now_ms.saturating_sub(self.pending_since_ms) >= config.confirmation_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> VigilanceConfig {
        VigilanceConfig::default()
    }

    /// Walk a fresh tracker into AttentionLost by sustained high scores
    fn attention_lost_tracker() -> (StateTracker, u64) {
        let mut tracker = StateTracker::new(0);
        tracker.apply(0.9, 0, &config());
        tracker.apply(0.9, 1_000, &config());
        assert_eq!(tracker.current(), DriverState::Drowsy);
        tracker.apply(0.9, 1_100, &config());
        tracker.apply(0.9, 2_100, &config());
        assert_eq!(tracker.current(), DriverState::AttentionLost);
        (tracker, 2_100)
    }

    #[test]
    fn test_sustained_score_commits_after_confirmation() {
        let mut tracker = StateTracker::new(0);

        // 0.56 clears 0.4 + 0.15; proposal becomes pending at t=0
        assert!(!tracker.apply(0.56, 0, &config()));
        assert_eq!(tracker.current(), DriverState::Alert);
        assert_eq!(tracker.pending(), DriverState::Drowsy);

        // 900 ms of dwell is not enough
        assert!(!tracker.apply(0.56, 900, &config()));
        assert_eq!(tracker.current(), DriverState::Alert);

        // 1000 ms commits
        assert!(tracker.apply(0.56, 1_000, &config()));
        assert_eq!(tracker.current(), DriverState::Drowsy);
        assert_eq!(tracker.previous(), DriverState::Alert);
    }

    #[test]
    fn test_score_inside_hysteresis_band_stays_alert() {
        let mut tracker = StateTracker::new(0);
        // 0.5 exceeds the bare threshold but not threshold + hysteresis
        tracker.apply(0.5, 0, &config());
        tracker.apply(0.5, 2_000, &config());
        assert_eq!(tracker.current(), DriverState::Alert);
        assert_eq!(tracker.pending(), DriverState::Alert);
    }

    #[test]
    fn test_divergent_proposal_resets_confirmation() {
        let mut tracker = StateTracker::new(0);
        tracker.apply(0.56, 0, &config());
        // Score falls back; pending re-arms to the current state
        tracker.apply(0.3, 500, &config());
        assert_eq!(tracker.pending(), DriverState::Alert);

        // The dwell clock starts over
        tracker.apply(0.56, 600, &config());
        assert!(!tracker.apply(0.56, 1_500, &config()));
        assert_eq!(tracker.current(), DriverState::Alert);
        assert!(tracker.apply(0.56, 1_600, &config()));
        assert_eq!(tracker.current(), DriverState::Drowsy);
    }

    #[test]
    fn test_drowsy_recovers_to_alert() {
        let mut tracker = StateTracker::new(0);
        tracker.apply(0.9, 0, &config());
        tracker.apply(0.9, 1_000, &config());
        assert_eq!(tracker.current(), DriverState::Drowsy);

        // 0.2 is below 0.4 - 0.15
        tracker.apply(0.2, 1_100, &config());
        tracker.apply(0.2, 2_100, &config());
        assert_eq!(tracker.current(), DriverState::Alert);
    }

    #[test]
    fn test_attention_lost_steps_down_not_straight_to_alert() {
        let (mut tracker, t) = attention_lost_tracker();

        // Even a very low score only proposes Drowsy from AttentionLost
        tracker.apply(0.1, t + 100, &config());
        tracker.apply(0.1, t + 1_100, &config());
        assert_eq!(tracker.current(), DriverState::Drowsy);
    }

    #[test]
    fn test_safety_override_forces_alert() {
        let (mut tracker, t) = attention_lost_tracker();

        // Holding score keeps the state; no qualifying transition fires
        tracker.apply(0.8, t + 10_000, &config());
        assert_eq!(tracker.current(), DriverState::AttentionLost);

        // Past the alarm ceiling the override fires unconditionally
        assert!(tracker.safety_override(t + 40_101, &config()));
        assert_eq!(tracker.current(), DriverState::Alert);
        assert_eq!(tracker.previous(), DriverState::AttentionLost);
        assert_eq!(tracker.pending(), DriverState::Alert);
    }

    #[test]
    fn test_state_labels() {
        assert_eq!(DriverState::Alert.label(), "ALERT");
        assert_eq!(DriverState::AttentionLost.label(), "ATTN LOST!");
    }

    #[test]
    fn test_safety_override_inert_when_alert() {
        let mut tracker = StateTracker::new(0);
        assert!(!tracker.safety_override(100_000, &config()));
        assert_eq!(tracker.current(), DriverState::Alert);
    }
}
