//! Vigilance Decision Pipeline
//!
//! Turns published sensor readings into a debounced, hysteretic driver-state
//! classification:
//! - Drowsiness scoring over normalized band powers and a rolling history
//! - Threshold bands with hysteresis against flicker
//! - A confirmation delay before any transition commits
//! - A fail-safe timeout out of alarm states

pub mod analysis;
pub mod config;
pub mod scorer;
pub mod state;

pub use analysis::VigilanceUpdate;
pub use config::VigilanceConfig;
pub use state::{DriverState, StateTracker};

use headset_protocol::SensorReading;
use score_history::HistoryWindow;
use tracing::{debug, info};

/// Single-writer decision pipeline
///
/// Owns the whole mutable aggregate (state tracker, history window, blink
/// latch, last-update bookkeeping) and is mutated by exactly one control
/// flow: the polling loop that drains the headset link.
pub struct VigilanceMonitor {
    config: VigilanceConfig,
    tracker: StateTracker,
    history: HistoryWindow,
    blink_pending: bool,
    last_update_ms: Option<u64>,
}

impl VigilanceMonitor {
    pub fn new(config: VigilanceConfig, now_ms: u64) -> Self {
        info!(?config, "creating vigilance monitor");
        Self {
            config,
            tracker: StateTracker::new(now_ms),
            history: HistoryWindow::new(),
            blink_pending: false,
            last_update_ms: None,
        }
    }

    /// Process one published reading through the decision pipeline
    ///
    /// Returns `None` when the reading arrives inside the minimum update
    /// interval; the blink latch is still armed in that case, so a blink is
    /// never lost to rate limiting.
    pub fn observe(&mut self, reading: &SensorReading, now_ms: u64) -> Option<VigilanceUpdate> {
        if reading.blink_strength >= self.config.blink_strength_min && reading.blink_strength > 0 {
            self.blink_pending = true;
        }

        if let Some(last) = self.last_update_ms {
            if now_ms.saturating_sub(last) < self.config.min_update_interval_ms {
                return None;
            }
        }

        // Consume the blink latch exactly once
        let blink = self.blink_pending;
        self.blink_pending = false;

        let averages = self.history.averages();
        let drowsiness = scorer::drowsiness_score(reading, &averages, blink, &self.config);
        let attention = f32::from(reading.attention) / 100.0;
        let meditation = f32::from(reading.meditation) / 100.0;

        self.history.push(drowsiness, attention, meditation);

        let previous = self.tracker.current();
        let transitioned = self.tracker.apply(drowsiness, now_ms, &self.config);
        self.last_update_ms = Some(now_ms);

        let update = VigilanceUpdate {
            state: self.tracker.current(),
            previous_state: previous,
            transitioned,
            drowsiness,
            attention,
            meditation,
            blink_detected: blink,
        };
        debug!(state = ?update.state, drowsiness, "observation processed");
        Some(update)
    }

    /// Idle poll: evaluates only the safety-override timer
    ///
    /// Returns true when the override forced a transition.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.tracker.safety_override(now_ms, &self.config)
    }

    /// Current committed driver state
    pub fn state(&self) -> DriverState {
        self.tracker.current()
    }

    pub fn tracker(&self) -> &StateTracker {
        &self.tracker
    }

    pub fn history(&self) -> &HistoryWindow {
        &self.history
    }

    pub fn config(&self) -> &VigilanceConfig {
        &self.config
    }
}
