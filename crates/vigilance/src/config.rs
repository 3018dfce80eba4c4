//! Vigilance configuration

use serde::{Deserialize, Serialize};

/// Vigilance pipeline configuration
///
/// Score weights and the state-machine timing are tunables; the band
/// normalization divisors are fixed constants in the scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VigilanceConfig {
    /// Weight of normalized theta band power
    pub theta_weight: f32,

    /// Weight of combined normalized alpha band power
    pub alpha_weight: f32,

    /// Weight of normalized meditation score
    pub meditation_weight: f32,

    /// Penalty (negative) for normalized low-beta band power
    pub beta_penalty: f32,

    /// Penalty (negative) for normalized attention score
    pub attention_penalty: f32,

    /// Penalty (negative) applied once per detected blink
    pub blink_penalty: f32,

    /// Weight of the historic drowsiness/attention spread
    pub history_weight: f32,

    /// Score threshold for entering Drowsy from Alert
    pub drowsy_threshold: f32,

    /// Score threshold for entering AttentionLost from Drowsy
    pub attention_lost_threshold: f32,

    /// Symmetric hysteresis band around each threshold
    pub hysteresis: f32,

    /// Continuous time a proposed transition must hold before it commits
    pub confirmation_ms: u64,

    /// Maximum continuous time in an alarm state before the fail-safe
    /// forces a return to Alert
    pub max_alert_ms: u64,

    /// Minimum interval between processed readings
    pub min_update_interval_ms: u64,

    /// Blink strength at or above which the blink flag is latched
    pub blink_strength_min: u8,
}

impl Default for VigilanceConfig {
    fn default() -> Self {
        Self {
            theta_weight: 0.3,
            alpha_weight: 0.3,
            meditation_weight: 0.25,
            beta_penalty: -0.15,
            attention_penalty: -0.2,
            blink_penalty: -0.3,
            history_weight: 0.2,
            drowsy_threshold: 0.4,
            attention_lost_threshold: 0.7,
            hysteresis: 0.15,
            confirmation_ms: 1000,
            max_alert_ms: 30_000,
            min_update_interval_ms: 100,
            blink_strength_min: 40,
        }
    }
}

impl VigilanceConfig {
    /// Create strict config (commits transitions sooner)
    pub fn strict() -> Self {
        Self {
            confirmation_ms: 500,
            hysteresis: 0.10,
            ..Default::default()
        }
    }

    /// Create lenient config (tolerates more flicker before alarming)
    pub fn lenient() -> Self {
        Self {
            confirmation_ms: 2000,
            hysteresis: 0.20,
            max_alert_ms: 45_000,
            ..Default::default()
        }
    }
}
