//! Motion module for coil-stepper.
//!
//! Provides the coil pattern tables and the step sequencer that walks them.

mod mode;
mod pattern;
mod sequencer;

pub use mode::{Direction, StepMode};
pub use pattern::{pattern_for, Coil, CoilVector, FULL_STEP, HALF_STEP};
pub use sequencer::StepSequencer;
