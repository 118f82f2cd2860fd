//! Motor module for coil-stepper.
//!
//! Provides the motor controller, its coil and display outputs, and the
//! interrupt-safe shared handle.

mod builder;
mod coils;
mod controller;
mod display;
mod event;
mod shared;
pub mod state;

pub use builder::MotorControllerBuilder;
pub use coils::{CoilPins, CoilSink};
pub use controller::MotorController;
pub use display::{DisplayNotice, DisplaySink, NoticeQueue, ProfileIndicator};
pub use event::{Button, MotorEvent};
pub use shared::SharedMotor;
pub use state::MotorState;
