//! Configuration module for coil-stepper.
//!
//! Provides timing profiles and the speed/period settings, loaded from TOML
//! files (with `std` feature) or built in code.

mod policy;
mod profile;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use policy::PeriodPolicy;
pub use profile::Profile;
pub use system::{ProfileId, SystemConfig, MAX_PROFILES};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Milliseconds, SpeedOffset};
