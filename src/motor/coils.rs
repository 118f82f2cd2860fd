//! Coil output sink.

use embedded_hal::digital::{OutputPin, PinState};

use crate::error::MotorError;
use crate::motion::{Coil, CoilVector};

/// Something that can energise the four phase coils.
pub trait CoilSink {
    /// Drive all four coils to `vector`.
    ///
    /// Must write in [`Coil::ALL`] order and must not block.
    fn write(&mut self, vector: CoilVector) -> Result<(), MotorError>;
}

impl<S: CoilSink + ?Sized> CoilSink for &mut S {
    fn write(&mut self, vector: CoilVector) -> Result<(), MotorError> {
        (**self).write(vector)
    }
}

/// Four embedded-hal output pins, one per phase wire.
///
/// Generic over:
/// - `RED`, `GRAY`, `YELLOW`, `BLACK`: pin types (must implement `OutputPin`)
#[derive(Debug)]
pub struct CoilPins<RED, GRAY, YELLOW, BLACK>
where
    RED: OutputPin,
    GRAY: OutputPin,
    YELLOW: OutputPin,
    BLACK: OutputPin,
{
    red: RED,
    gray: GRAY,
    yellow: YELLOW,
    black: BLACK,
}

impl<RED, GRAY, YELLOW, BLACK> CoilPins<RED, GRAY, YELLOW, BLACK>
where
    RED: OutputPin,
    GRAY: OutputPin,
    YELLOW: OutputPin,
    BLACK: OutputPin,
{
    /// Wrap the four coil pins.
    pub fn new(red: RED, gray: GRAY, yellow: YELLOW, black: BLACK) -> Self {
        Self {
            red,
            gray,
            yellow,
            black,
        }
    }

    /// Give the pins back.
    pub fn release(self) -> (RED, GRAY, YELLOW, BLACK) {
        (self.red, self.gray, self.yellow, self.black)
    }
}

impl<RED, GRAY, YELLOW, BLACK> CoilSink for CoilPins<RED, GRAY, YELLOW, BLACK>
where
    RED: OutputPin,
    GRAY: OutputPin,
    YELLOW: OutputPin,
    BLACK: OutputPin,
{
    fn write(&mut self, vector: CoilVector) -> Result<(), MotorError> {
        drive(&mut self.red, vector, Coil::Red)?;
        drive(&mut self.gray, vector, Coil::Gray)?;
        drive(&mut self.yellow, vector, Coil::Yellow)?;
        drive(&mut self.black, vector, Coil::Black)
    }
}

fn drive<P: OutputPin>(pin: &mut P, vector: CoilVector, coil: Coil) -> Result<(), MotorError> {
    pin.set_state(PinState::from(vector.get(coil)))
        .map_err(|_| MotorError::PinError(coil))
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};

    #[test]
    fn test_write_drives_each_pin() {
        let red = PinMock::new(&[PinTransaction::set(State::High)]);
        let gray = PinMock::new(&[PinTransaction::set(State::Low)]);
        let yellow = PinMock::new(&[PinTransaction::set(State::High)]);
        let black = PinMock::new(&[PinTransaction::set(State::Low)]);

        let mut pins = CoilPins::new(red, gray, yellow, black);
        pins.write(CoilVector::new(true, false, true, false)).unwrap();

        let (mut red, mut gray, mut yellow, mut black) = pins.release();
        red.done();
        gray.done();
        yellow.done();
        black.done();
    }
}
