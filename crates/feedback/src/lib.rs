//! Feedback Collaborators
//!
//! One-way sinks for the vigilance pipeline's escalating feedback: a status
//! display, addressable indicator LEDs, and an audible alert. The pipeline
//! core only talks to the trait interfaces; hardware backends live with the
//! deployment, not here.

mod policy;
mod sink;

pub use policy::{FeedbackConfig, FeedbackPolicy};
pub use sink::{AudibleSink, BeepPattern, DisplaySink, IndicatorSink, LedCommand, NullSink, StatusFrame};
