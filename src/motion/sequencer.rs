//! Step index bookkeeping.

use super::mode::{Direction, StepMode};
use super::pattern::{pattern_for, CoilVector};

/// Walks the pattern table of the active step mode.
///
/// The step count is derived from the mode held here, so the index and the
/// table it indexes can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepSequencer {
    index: u8,
    mode: StepMode,
}

impl StepSequencer {
    /// Create a sequencer at index 0.
    #[inline]
    pub const fn new(mode: StepMode) -> Self {
        Self { index: 0, mode }
    }

    /// Create a sequencer at `index`, wrapped into range.
    #[inline]
    pub fn at(mode: StepMode, index: u8) -> Self {
        Self {
            index: index % mode.step_count(),
            mode,
        }
    }

    /// Current index into the pattern table.
    #[inline]
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Active step mode.
    #[inline]
    pub fn mode(&self) -> StepMode {
        self.mode
    }

    /// Length of the active pattern table.
    #[inline]
    pub fn step_count(&self) -> u8 {
        self.mode.step_count()
    }

    /// Coil vector at the current index.
    #[inline]
    pub fn current_vector(&self) -> CoilVector {
        pattern_for(self.mode)[self.index as usize]
    }

    /// Move one position in `direction`, wrapping at both ends.
    #[inline]
    pub fn advance(&mut self, direction: Direction) {
        let n = self.step_count() as i16;
        let next = (self.index as i16 + direction.delta() as i16).rem_euclid(n);
        self.index = next as u8;
    }

    /// Switch step mode, keeping the rotor where it is.
    ///
    /// Full index `k` and half index `2k` energise the same coils. Going from
    /// half to full, a one-coil position falls back to the two-coil position
    /// before it.
    pub fn set_mode(&mut self, mode: StepMode) {
        self.index = match (self.mode, mode) {
            (StepMode::Full, StepMode::Half) => self.index * 2,
            (StepMode::Half, StepMode::Full) => self.index / 2,
            _ => self.index,
        } % mode.step_count();
        self.mode = mode;
    }
}
