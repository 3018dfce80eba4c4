//! Drowsiness Score Model
//!
//! Deterministic linear model over normalized band powers, attention,
//! meditation, and the rolling history averages. Output is clamped to [0,1].

use crate::config::VigilanceConfig;
use headset_protocol::{Band, SensorReading};
use score_history::ScoreAverages;

/// Fixed per-band normalization divisors
const THETA_SCALE: f32 = 250_000.0;
const LOW_ALPHA_SCALE: f32 = 60_000.0;
const HIGH_ALPHA_SCALE: f32 = 40_000.0;
const LOW_BETA_SCALE: f32 = 15_000.0;

/// Compute the drowsiness score for one reading
///
/// `blink_detected` is the already-consumed blink flag; the caller clears
/// it so the penalty lands exactly once.
pub fn drowsiness_score(
    reading: &SensorReading,
    history: &ScoreAverages,
    blink_detected: bool,
    config: &VigilanceConfig,
) -> f32 {
    let theta = reading.band(Band::Theta) as f32 / THETA_SCALE;
    let low_alpha = reading.band(Band::LowAlpha) as f32 / LOW_ALPHA_SCALE;
    let high_alpha = reading.band(Band::HighAlpha) as f32 / HIGH_ALPHA_SCALE;
    let low_beta = reading.band(Band::LowBeta) as f32 / LOW_BETA_SCALE;
    let meditation = f32::from(reading.meditation) / 100.0;
    let attention = f32::from(reading.attention) / 100.0;

    let mut score = config.theta_weight * theta
        + config.alpha_weight * (low_alpha + high_alpha)
        + config.meditation_weight * meditation
        + config.beta_penalty * low_beta
        + config.attention_penalty * attention
        + config.history_weight * (history.drowsiness - history.attention);

    if blink_detected {
        score += config.blink_penalty;
    }

    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading_with(bands: [u32; 8], attention: u8, meditation: u8) -> SensorReading {
        SensorReading {
            attention,
            meditation,
            bands,
            ..Default::default()
        }
    }

    fn zero_history() -> ScoreAverages {
        ScoreAverages {
            drowsiness: 0.0,
            attention: 0.0,
            meditation: 0.0,
        }
    }

    #[test]
    fn test_theta_fully_saturated() {
        // theta at its divisor normalizes to 1.0; only the theta term fires
        let reading = reading_with([0, 250_000, 0, 0, 0, 0, 0, 0], 0, 0);
        let score = drowsiness_score(&reading, &zero_history(), false, &VigilanceConfig::default());
        assert!((score - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_attention_pulls_score_down() {
        let reading = reading_with([0, 250_000, 0, 0, 0, 0, 0, 0], 100, 0);
        let score = drowsiness_score(&reading, &zero_history(), false, &VigilanceConfig::default());
        assert!((score - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_clamped_to_zero() {
        let reading = reading_with([0; 8], 100, 0);
        let score = drowsiness_score(&reading, &zero_history(), false, &VigilanceConfig::default());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_clamped_to_one() {
        let reading = reading_with([0, 2_500_000, 600_000, 400_000, 0, 0, 0, 0], 0, 100);
        let score = drowsiness_score(&reading, &zero_history(), false, &VigilanceConfig::default());
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_blink_penalty_applied() {
        let reading = reading_with([0, 250_000, 0, 0, 0, 0, 0, 0], 0, 0);
        let config = VigilanceConfig::default();
        let without = drowsiness_score(&reading, &zero_history(), false, &config);
        let with = drowsiness_score(&reading, &zero_history(), true, &config);
        assert!((without - with - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_history_spread_term() {
        let reading = reading_with([0; 8], 0, 0);
        let history = ScoreAverages {
            drowsiness: 0.8,
            attention: 0.3,
            meditation: 0.0,
        };
        let score = drowsiness_score(&reading, &history, false, &VigilanceConfig::default());
        // 0.2 * (0.8 - 0.3)
        assert!((score - 0.1).abs() < 1e-6);
    }
}
