//! # coil-stepper
//!
//! Full/half step sequencing for 4-phase stepper motors with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Pattern tables**: full-step (two coils) and half-step (alternating two/one coil)
//! - **embedded-hal 1.0**: Uses `OutputPin` for the four coil leads
//! - **no_std compatible**: Core library works without standard library
//! - **Interrupt safe**: timer ticks and button presses serialised through one critical section
//! - **Profiles**: named base periods per step mode, adjustable speed offset
//! - **Configuration-driven**: Define profiles and timing in TOML files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coil_stepper::{Button, CoilPins, MotorController, SharedMotor, SystemConfig};
//!
//! static MOTOR: SharedMotor<Coils, StepTimer> = SharedMotor::new();
//!
//! let mut motor = MotorController::builder()
//!     .coils(CoilPins::new(red, gray, yellow, black))
//!     .timer(step_timer)
//!     .config(SystemConfig::default())
//!     .build()?;
//! motor.start();
//! MOTOR.install(motor);
//!
//! // In the timer interrupt
//! MOTOR.tick()?;
//!
//! // In a debounced button interrupt
//! MOTOR.press(Button::SpeedUp)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to the other modules
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;
pub mod timing;

// Re-exports for ergonomic API
pub use config::{validate_config, PeriodPolicy, Profile, ProfileId, SystemConfig};
pub use error::{Error, Result};
pub use motion::{Coil, CoilVector, Direction, StepMode, StepSequencer};
pub use motor::{
    Button, CoilPins, CoilSink, DisplayNotice, DisplaySink, MotorController, MotorEvent,
    MotorState, NoticeQueue, ProfileIndicator, SharedMotor,
};
pub use timing::{PeriodicDriver, SoftwareTicker, TimingPolicy};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Milliseconds, SpeedOffset};
