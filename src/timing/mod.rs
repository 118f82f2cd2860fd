//! Timing module for coil-stepper.
//!
//! Computes the step period and abstracts the timer that fires each step.

mod driver;
mod policy;
mod ticker;

pub use driver::PeriodicDriver;
pub use policy::TimingPolicy;
pub use ticker::SoftwareTicker;
