//! Events delivered to the controller from interrupt handlers.

use crate::config::ProfileId;
use crate::motion::{Direction, StepMode};

/// One request for the motor controller.
///
/// Timer and button interrupts turn their callbacks into these values so all
/// state changes go through [`MotorController::handle`].
///
/// [`MotorController::handle`]: crate::motor::MotorController::handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorEvent {
    /// Timer expiry: output the current coil vector and advance.
    Tick,
    /// Set the rotation direction.
    SetDirection(Direction),
    /// Reverse the rotation direction.
    ToggleDirection,
    /// Set the step mode.
    SetStepMode(StepMode),
    /// Switch between full and half stepping.
    ToggleStepMode,
    /// Change speed by a number of presses; positive is faster.
    AdjustSpeed(i16),
    /// Activate a profile.
    SetProfile(ProfileId),
    /// Activate the next profile in configuration order.
    NextProfile,
}

/// The five operator buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Reverse direction.
    Direction,
    /// Toggle full/half stepping.
    StepMode,
    /// Shorten the step period.
    SpeedUp,
    /// Lengthen the step period.
    SpeedDown,
    /// Cycle through profiles.
    Profile,
}

impl Button {
    /// All buttons.
    pub const ALL: [Button; 5] = [
        Button::Direction,
        Button::StepMode,
        Button::SpeedUp,
        Button::SpeedDown,
        Button::Profile,
    ];

    /// Event raised by a debounced press.
    pub const fn event(self) -> MotorEvent {
        match self {
            Button::Direction => MotorEvent::ToggleDirection,
            Button::StepMode => MotorEvent::ToggleStepMode,
            Button::SpeedUp => MotorEvent::AdjustSpeed(1),
            Button::SpeedDown => MotorEvent::AdjustSpeed(-1),
            Button::Profile => MotorEvent::NextProfile,
        }
    }
}

impl From<Button> for MotorEvent {
    fn from(button: Button) -> Self {
        button.event()
    }
}
