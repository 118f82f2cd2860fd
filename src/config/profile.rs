//! Timing profile configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::units::Milliseconds;
use crate::motion::StepMode;

/// A named timing profile.
///
/// Holds the base period between two steps for each step mode. The label is
/// shown on the display when the profile becomes active.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Profile {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Display label, e.g. "36s per revolution".
    #[serde(default)]
    pub label: String<32>,

    /// Base period between full steps.
    #[serde(rename = "full_step_period_ms")]
    pub full_step_period: Milliseconds,

    /// Base period between half steps.
    #[serde(rename = "half_step_period_ms")]
    pub half_step_period: Milliseconds,
}

impl Profile {
    /// Create a profile from string slices, truncating to the label capacity.
    pub fn new(
        name: &str,
        label: &str,
        full_step_period: Milliseconds,
        half_step_period: Milliseconds,
    ) -> Self {
        Self {
            name: truncated(name),
            label: truncated(label),
            full_step_period,
            half_step_period,
        }
    }

    /// Reference profile A: 750 ms full step, 375 ms half step.
    pub fn reference_a() -> Self {
        Self::new(
            "Profile A",
            "36s per revolution",
            Milliseconds(750),
            Milliseconds(375),
        )
    }

    /// Reference profile B: 896 ms full step, 448 ms half step.
    pub fn reference_b() -> Self {
        Self::new(
            "Profile B",
            "43s per revolution",
            Milliseconds(896),
            Milliseconds(448),
        )
    }

    /// Base period for a step mode, before any speed offset.
    #[inline]
    pub fn base_period(&self, mode: StepMode) -> Milliseconds {
        match mode {
            StepMode::Full => self.full_step_period,
            StepMode::Half => self.half_step_period,
        }
    }

    /// Shortest base period across both step modes.
    #[inline]
    pub fn shortest_period(&self) -> Milliseconds {
        self.full_step_period.min(self.half_step_period)
    }
}

fn truncated<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
