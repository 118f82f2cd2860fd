//! Active step period computation.

use crate::config::{Milliseconds, PeriodPolicy, Profile, SpeedOffset, SystemConfig};
use crate::error::TimingError;
use crate::motion::StepMode;

/// Turns a profile, step mode and speed offset into the period the timer is armed with.
///
/// Speed presses move the offset by a fixed step. A faster press shortens the
/// period; a slower press lengthens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingPolicy {
    speed_step: Milliseconds,
    min_period: Milliseconds,
    policy: PeriodPolicy,
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self::new(Milliseconds(20), Milliseconds(1), PeriodPolicy::Reject)
    }
}

impl TimingPolicy {
    /// Create a policy.
    ///
    /// A zero minimum period is raised to 1 ms so the timer is never armed at 0.
    pub fn new(speed_step: Milliseconds, min_period: Milliseconds, policy: PeriodPolicy) -> Self {
        Self {
            speed_step,
            min_period: min_period.max(Milliseconds(1)),
            policy,
        }
    }

    /// Create a policy from system configuration.
    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(config.speed_step, config.min_period, config.period_policy)
    }

    /// Period change per speed press.
    #[inline]
    pub fn speed_step(&self) -> Milliseconds {
        self.speed_step
    }

    /// Shortest period the timer may be armed with.
    #[inline]
    pub fn min_period(&self) -> Milliseconds {
        self.min_period
    }

    /// Policy applied below the minimum period.
    #[inline]
    pub fn period_policy(&self) -> PeriodPolicy {
        self.policy
    }

    /// Period between steps for `profile` in `mode` with `offset` applied.
    ///
    /// # Errors
    ///
    /// Returns `TimingError::InvalidPeriod` if the result is below the minimum
    /// and the policy is [`PeriodPolicy::Reject`].
    pub fn active_period(
        &self,
        profile: &Profile,
        mode: StepMode,
        offset: SpeedOffset,
    ) -> Result<Milliseconds, TimingError> {
        self.resolve(profile, mode, offset).map(|(period, _)| period)
    }

    /// Like [`active_period`](Self::active_period), but also returns the
    /// offset that yields the period exactly.
    ///
    /// The two offsets differ only when the period was clamped; the returned
    /// one is then `min_period - base`.
    ///
    /// # Errors
    ///
    /// See [`active_period`](Self::active_period).
    pub fn resolve(
        &self,
        profile: &Profile,
        mode: StepMode,
        offset: SpeedOffset,
    ) -> Result<(Milliseconds, SpeedOffset), TimingError> {
        let base = profile.base_period(mode);
        let raw = base.offset_by(offset);
        let period = self
            .policy
            .apply(raw, self.min_period)
            .ok_or(TimingError::InvalidPeriod {
                base,
                offset,
                minimum: self.min_period,
            })?;

        let applied = if raw == period.0 as i64 {
            offset
        } else {
            SpeedOffset::between(base, period)
        };
        Ok((period, applied))
    }

    /// Offset after `presses` speed presses. Positive presses mean faster.
    pub fn adjusted_offset(&self, offset: SpeedOffset, presses: i16) -> SpeedOffset {
        let step = i32::try_from(self.speed_step.0).unwrap_or(i32::MAX);
        offset.shifted((presses as i32).saturating_mul(step).saturating_neg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_periods() {
        let timing = TimingPolicy::default();

        let a = Profile::reference_a();
        let b = Profile::reference_b();
        assert_eq!(timing.active_period(&a, StepMode::Full, SpeedOffset::ZERO), Ok(Milliseconds(750)));
        assert_eq!(timing.active_period(&a, StepMode::Half, SpeedOffset::ZERO), Ok(Milliseconds(375)));
        assert_eq!(timing.active_period(&b, StepMode::Half, SpeedOffset::ZERO), Ok(Milliseconds(448)));
    }

    #[test]
    fn test_two_faster_presses() {
        let timing = TimingPolicy::default();
        let offset = timing.adjusted_offset(SpeedOffset::ZERO, 1);
        let offset = timing.adjusted_offset(offset, 1);

        assert_eq!(offset, SpeedOffset(-40));
        assert_eq!(
            timing.active_period(&Profile::reference_a(), StepMode::Full, offset),
            Ok(Milliseconds(710))
        );
    }

    #[test]
    fn test_slower_press_lengthens() {
        let timing = TimingPolicy::default();
        let offset = timing.adjusted_offset(SpeedOffset::ZERO, -1);

        assert_eq!(offset, SpeedOffset(20));
        assert_eq!(
            timing.active_period(&Profile::reference_a(), StepMode::Half, offset),
            Ok(Milliseconds(395))
        );
    }

    #[test]
    fn test_reject_at_zero() {
        let timing = TimingPolicy::default();
        let result = timing.active_period(&Profile::reference_a(), StepMode::Half, SpeedOffset(-375));

        assert_eq!(
            result,
            Err(TimingError::InvalidPeriod {
                base: Milliseconds(375),
                offset: SpeedOffset(-375),
                minimum: Milliseconds(1),
            })
        );
    }

    #[test]
    fn test_clamp_to_minimum() {
        let timing = TimingPolicy::new(Milliseconds(20), Milliseconds(10), PeriodPolicy::Clamp);
        let result = timing.active_period(&Profile::reference_a(), StepMode::Full, SpeedOffset(-1000));

        assert_eq!(result, Ok(Milliseconds(10)));
    }

    #[test]
    fn test_clamped_offset_sits_on_floor() {
        let timing = TimingPolicy::new(Milliseconds(20), Milliseconds(10), PeriodPolicy::Clamp);
        let profile = Profile::reference_a();

        assert_eq!(
            timing.resolve(&profile, StepMode::Half, SpeedOffset(-600)),
            Ok((Milliseconds(10), SpeedOffset(-365)))
        );
        assert_eq!(
            timing.resolve(&profile, StepMode::Half, SpeedOffset(-40)),
            Ok((Milliseconds(335), SpeedOffset(-40)))
        );
    }

    #[test]
    fn test_zero_minimum_is_raised() {
        let timing = TimingPolicy::new(Milliseconds(20), Milliseconds(0), PeriodPolicy::Clamp);
        assert_eq!(timing.min_period(), Milliseconds(1));
    }
}
