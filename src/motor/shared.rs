//! Interrupt-safe handle to a motor controller.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::error::{MotorError, Result};
use crate::timing::PeriodicDriver;

use super::coils::CoilSink;
use super::controller::MotorController;
use super::display::DisplaySink;
use super::event::{Button, MotorEvent};

/// A motor controller behind a critical-section mutex.
///
/// Meant to live in a `static` so the timer interrupt and the button
/// interrupts can reach the same controller. Each call runs entirely inside
/// one critical section, which serialises ticks and reconfigurations.
///
/// # Example
///
/// ```rust,ignore
/// static MOTOR: SharedMotor<Coils, HwTimer, NoticeQueue<4>> = SharedMotor::new();
///
/// MOTOR.install(controller);
///
/// #[interrupt]
/// fn TIM2() {
///     let _ = MOTOR.tick();
/// }
///
/// #[interrupt]
/// fn EXTI4() {
///     let _ = MOTOR.press(Button::Direction);
/// }
/// ```
pub struct SharedMotor<COILS, TIMER, DISPLAY = ()>
where
    COILS: CoilSink,
    TIMER: PeriodicDriver,
    DISPLAY: DisplaySink,
{
    inner: Mutex<RefCell<Option<MotorController<COILS, TIMER, DISPLAY>>>>,
}

impl<COILS, TIMER, DISPLAY> Default for SharedMotor<COILS, TIMER, DISPLAY>
where
    COILS: CoilSink,
    TIMER: PeriodicDriver,
    DISPLAY: DisplaySink,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<COILS, TIMER, DISPLAY> SharedMotor<COILS, TIMER, DISPLAY>
where
    COILS: CoilSink,
    TIMER: PeriodicDriver,
    DISPLAY: DisplaySink,
{
    /// Create an empty handle.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Put a controller in the handle, returning the previous one.
    pub fn install(
        &self,
        controller: MotorController<COILS, TIMER, DISPLAY>,
    ) -> Option<MotorController<COILS, TIMER, DISPLAY>> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(controller))
    }

    /// Remove the controller from the handle.
    pub fn take(&self) -> Option<MotorController<COILS, TIMER, DISPLAY>> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    /// Whether a controller is installed.
    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_some())
    }

    /// Run `f` on the controller inside a critical section.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::NotInstalled` if no controller is installed.
    pub fn with<R>(&self, f: impl FnOnce(&mut MotorController<COILS, TIMER, DISPLAY>) -> R) -> Result<R> {
        critical_section::with(|cs| -> Result<R> {
            let mut slot = self.inner.borrow_ref_mut(cs);
            let controller = slot.as_mut().ok_or(MotorError::NotInstalled)?;
            Ok(f(controller))
        })
    }

    /// Deliver one event.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::NotInstalled`, or the operation's own error.
    pub fn dispatch(&self, event: MotorEvent) -> Result<()> {
        self.with(|controller| controller.handle(event))?
    }

    /// Timer interrupt entry point.
    ///
    /// # Errors
    ///
    /// See [`dispatch`](Self::dispatch).
    pub fn tick(&self) -> Result<()> {
        self.dispatch(MotorEvent::Tick)
    }

    /// Debounced button interrupt entry point.
    ///
    /// # Errors
    ///
    /// See [`dispatch`](Self::dispatch).
    pub fn press(&self, button: Button) -> Result<()> {
        self.dispatch(button.event())
    }
}
