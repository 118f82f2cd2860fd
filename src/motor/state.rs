//! Motor state aggregate.

use crate::config::{ProfileId, SpeedOffset};
use crate::motion::{Direction, StepMode, StepSequencer};

/// Everything the tick and the buttons share.
///
/// Created once at startup and kept for the life of the program. Only
/// [`MotorController`] mutates it.
///
/// [`MotorController`]: crate::motor::MotorController
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorState {
    pub(crate) direction: Direction,
    pub(crate) sequencer: StepSequencer,
    pub(crate) profile: ProfileId,
    pub(crate) offset: SpeedOffset,
}

impl MotorState {
    /// Startup state: given profile, full step, clockwise, no offset, index 0.
    pub fn new(profile: ProfileId) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    /// Rotation direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Active step mode.
    #[inline]
    pub fn step_mode(&self) -> StepMode {
        self.sequencer.mode()
    }

    /// Index into the active pattern table.
    #[inline]
    pub fn index(&self) -> u8 {
        self.sequencer.index()
    }

    /// Length of the active pattern table.
    #[inline]
    pub fn step_count(&self) -> u8 {
        self.sequencer.step_count()
    }

    /// Active profile.
    #[inline]
    pub fn profile(&self) -> ProfileId {
        self.profile
    }

    /// Speed offset applied to the profile's base period.
    #[inline]
    pub fn offset(&self) -> SpeedOffset {
        self.offset
    }

    /// Sequencer holding mode and index.
    #[inline]
    pub fn sequencer(&self) -> &StepSequencer {
        &self.sequencer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_state() {
        let state = MotorState::new(ProfileId(1));

        assert_eq!(state.profile(), ProfileId(1));
        assert_eq!(state.step_mode(), StepMode::Full);
        assert_eq!(state.direction(), Direction::Clockwise);
        assert_eq!(state.offset(), SpeedOffset::ZERO);
        assert_eq!(state.index(), 0);
        assert_eq!(state.step_count(), 4);
    }
}
