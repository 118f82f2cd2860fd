//! Step mode and rotation direction.

/// Direction of rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise: walks the pattern table backwards.
    #[default]
    Clockwise,
    /// Counter-clockwise: walks the pattern table forwards.
    CounterClockwise,
}

impl Direction {
    /// The opposite direction.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Index delta for one step in this direction.
    #[inline]
    pub fn delta(self) -> i8 {
        match self {
            Direction::Clockwise => -1,
            Direction::CounterClockwise => 1,
        }
    }
}

/// Step resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepMode {
    /// Two coils energised per step, 4 positions per electrical cycle.
    #[default]
    Full,
    /// Alternating two-coil and one-coil steps, 8 positions per cycle.
    Half,
}

impl StepMode {
    /// The other step mode.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            StepMode::Full => StepMode::Half,
            StepMode::Half => StepMode::Full,
        }
    }

    /// Number of entries in the pattern table for this mode.
    #[inline]
    pub const fn step_count(self) -> u8 {
        match self {
            StepMode::Full => 4,
            StepMode::Half => 8,
        }
    }

    /// Positions per electrical cycle relative to full stepping.
    #[inline]
    pub const fn resolution(self) -> u32 {
        match self {
            StepMode::Full => 1,
            StepMode::Half => 2,
        }
    }

    /// Text shown on the display for this mode.
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            StepMode::Full => "Full step",
            StepMode::Half => "Half step",
        }
    }

    /// Steps per output revolution for a motor with `full_steps` full steps.
    #[inline]
    pub fn steps_per_revolution(self, full_steps: u16) -> u32 {
        full_steps as u32 * self.resolution()
    }

    /// Angular resolution in degrees for a motor with `full_steps` full steps.
    #[inline]
    pub fn degrees_per_step(self, full_steps: u16) -> f32 {
        360.0 / self.steps_per_revolution(full_steps) as f32
    }
}
