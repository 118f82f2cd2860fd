//! Unit types for step timing.
//!
//! Periods are unsigned and offsets are signed so that a negative period can
//! only appear as the intermediate result of [`Milliseconds::offset_by`].

use core::ops::Mul;

use serde::Deserialize;

/// A duration in whole milliseconds.
///
/// Used for base step periods, the speed step and the active period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Milliseconds(pub u32);

impl Milliseconds {
    /// Apply a signed offset.
    ///
    /// Returns the raw signed result so callers can decide what to do with
    /// values that are zero or negative.
    #[inline]
    pub const fn offset_by(self, offset: SpeedOffset) -> i64 {
        self.0 as i64 + offset.0 as i64
    }
}

impl Mul<u32> for Milliseconds {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0.saturating_mul(rhs))
    }
}

/// Signed adjustment added to a profile's base period.
///
/// Negative values shorten the period (faster stepping).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedOffset(pub i32);

impl SpeedOffset {
    /// No adjustment.
    pub const ZERO: Self = Self(0);

    /// Offset that turns `base` into `period`, saturating at the `i32` bounds.
    #[inline]
    pub fn between(base: Milliseconds, period: Milliseconds) -> Self {
        let delta = period.0 as i64 - base.0 as i64;
        Self(i32::try_from(delta).unwrap_or(if delta < 0 { i32::MIN } else { i32::MAX }))
    }

    /// Offset shifted by `delta` milliseconds, saturating at the `i32` bounds.
    #[inline]
    pub const fn shifted(self, delta: i32) -> Self {
        Self(self.0.saturating_add(delta))
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to Milliseconds.
    fn ms(self) -> Milliseconds;
}

impl UnitExt for u32 {
    #[inline]
    fn ms(self) -> Milliseconds {
        Milliseconds(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_by_negative_goes_below_zero() {
        assert_eq!(Milliseconds(30).offset_by(SpeedOffset(-40)), -10);
        assert_eq!(Milliseconds(750).offset_by(SpeedOffset(-40)), 710);
    }

    #[test]
    fn test_shifted_saturates() {
        assert_eq!(SpeedOffset(i32::MIN).shifted(-20), SpeedOffset(i32::MIN));
        assert_eq!(SpeedOffset(0).shifted(-20).shifted(-20), SpeedOffset(-40));
    }

    #[test]
    fn test_offset_between_periods() {
        assert_eq!(SpeedOffset::between(375.ms(), 10.ms()), SpeedOffset(-365));
        assert_eq!(SpeedOffset::between(750.ms(), 790.ms()), SpeedOffset(40));
        assert_eq!(SpeedOffset::between(0.ms(), u32::MAX.ms()), SpeedOffset(i32::MAX));
    }

    #[test]
    fn test_revolution_multiplication() {
        assert_eq!(750.ms() * 48, Milliseconds(36_000));
    }
}
