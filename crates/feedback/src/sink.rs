//! Feedback sink interfaces

use serde::Serialize;
use vigilance::DriverState;

/// Command for the addressable indicator LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedCommand {
    pub rgb: (u8, u8, u8),
    pub brightness: u8,
    pub pulse: bool,
}

/// Beep burst request for the audible sink
///
/// The sink owns the (blocking) inter-beep timing; the core never sleeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BeepPattern {
    pub count: u8,
    /// Beep-on duration per beep
    pub on_ms: u64,
    /// Silence between beeps in a burst
    pub gap_ms: u64,
}

/// Textual status summary for the display sink
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusFrame {
    pub state: DriverState,
    /// Drowsiness score in [0,1], rendered as a bar
    pub drowsiness: f32,
    /// Attention score in [0,1]
    pub attention: f32,
    /// Meditation score in [0,1]
    pub meditation: f32,
    /// Warning line for alarm states
    pub warning: Option<&'static str>,
}

pub trait DisplaySink {
    fn render(&mut self, frame: &StatusFrame);
}

pub trait IndicatorSink {
    fn set(&mut self, command: LedCommand);
}

pub trait AudibleSink {
    fn beep(&mut self, pattern: BeepPattern);
}

/// No-op collaborator for tests and headless deployments
#[derive(Debug, Default)]
pub struct NullSink;

impl DisplaySink for NullSink {
    fn render(&mut self, _frame: &StatusFrame) {}
}

impl IndicatorSink for NullSink {
    fn set(&mut self, _command: LedCommand) {}
}

impl AudibleSink for NullSink {
    fn beep(&mut self, _pattern: BeepPattern) {}
}
