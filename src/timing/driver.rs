//! Periodic timer abstraction.

use crate::config::Milliseconds;

/// A timer that fires the step callback at a fixed period.
///
/// Implementations route each expiry to [`MotorController::tick`] (usually via
/// [`SharedMotor::tick`] from the timer interrupt). Arming replaces any
/// previous cadence; there is no guarantee about the phase of the first tick
/// after a rearm.
///
/// [`MotorController::tick`]: crate::motor::MotorController::tick
/// [`SharedMotor::tick`]: crate::motor::SharedMotor::tick
pub trait PeriodicDriver {
    /// Start (or restart) firing every `period`.
    fn arm(&mut self, period: Milliseconds);

    /// Stop firing.
    fn disarm(&mut self);
}

impl<T: PeriodicDriver + ?Sized> PeriodicDriver for &mut T {
    fn arm(&mut self, period: Milliseconds) {
        (**self).arm(period);
    }

    fn disarm(&mut self) {
        (**self).disarm();
    }
}
