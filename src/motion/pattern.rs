//! Coil energisation tables.
//!
//! The four phase wires are named by their lead colour. Full stepping keeps two
//! adjacent coils on; half stepping inserts a single-coil position between each
//! pair of full steps, so every even half-step entry equals a full-step entry.

use super::mode::StepMode;

/// One of the four phase wires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Coil {
    /// Red lead.
    Red,
    /// Gray lead.
    Gray,
    /// Yellow lead.
    Yellow,
    /// Black lead.
    Black,
}

impl Coil {
    /// All coils in output write order.
    pub const ALL: [Coil; 4] = [Coil::Red, Coil::Gray, Coil::Yellow, Coil::Black];

    /// Lead colour as a static string.
    pub const fn name(self) -> &'static str {
        match self {
            Coil::Red => "red",
            Coil::Gray => "gray",
            Coil::Yellow => "yellow",
            Coil::Black => "black",
        }
    }
}

/// Activation state of the four coils at one step position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoilVector {
    /// Red coil energised.
    pub red: bool,
    /// Gray coil energised.
    pub gray: bool,
    /// Yellow coil energised.
    pub yellow: bool,
    /// Black coil energised.
    pub black: bool,
}

impl CoilVector {
    /// All coils off.
    pub const OFF: Self = Self::new(false, false, false, false);

    /// Create a vector in red, gray, yellow, black order.
    #[inline]
    pub const fn new(red: bool, gray: bool, yellow: bool, black: bool) -> Self {
        Self {
            red,
            gray,
            yellow,
            black,
        }
    }

    /// State of a single coil.
    #[inline]
    pub const fn get(self, coil: Coil) -> bool {
        match coil {
            Coil::Red => self.red,
            Coil::Gray => self.gray,
            Coil::Yellow => self.yellow,
            Coil::Black => self.black,
        }
    }

    /// States in red, gray, yellow, black order.
    #[inline]
    pub const fn to_array(self) -> [bool; 4] {
        [self.red, self.gray, self.yellow, self.black]
    }

    /// Number of energised coils.
    #[inline]
    pub fn active_count(self) -> usize {
        self.to_array().iter().filter(|&&on| on).count()
    }
}

const fn v(red: u8, gray: u8, yellow: u8, black: u8) -> CoilVector {
    CoilVector::new(red != 0, gray != 0, yellow != 0, black != 0)
}

/// Full-step sequence.
pub const FULL_STEP: [CoilVector; 4] = [
    v(1, 0, 1, 0), // red + yellow
    v(1, 0, 0, 1), // red + black
    v(0, 1, 0, 1), // gray + black
    v(0, 1, 1, 0), // gray + yellow
];

/// Half-step sequence.
pub const HALF_STEP: [CoilVector; 8] = [
    v(1, 0, 1, 0),
    v(1, 0, 0, 0), // red
    v(1, 0, 0, 1),
    v(0, 0, 0, 1), // black
    v(0, 1, 0, 1),
    v(0, 1, 0, 0), // gray
    v(0, 1, 1, 0),
    v(0, 0, 1, 0), // yellow
];

/// Pattern table for a step mode.
#[inline]
pub fn pattern_for(mode: StepMode) -> &'static [CoilVector] {
    match mode {
        StepMode::Full => &FULL_STEP,
        StepMode::Half => &HALF_STEP,
    }
}
