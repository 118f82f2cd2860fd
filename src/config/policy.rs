//! Policy for step periods that fall below the configured minimum.

use serde::Deserialize;

use super::units::Milliseconds;

/// What to do when a reconfiguration would produce a period below the minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum PeriodPolicy {
    /// Reject the reconfiguration and keep the previous state.
    #[default]
    Reject,
    /// Clamp the period to the minimum.
    Clamp,
}

impl PeriodPolicy {
    /// Apply the policy to a raw signed period.
    ///
    /// Returns `Some(period)` if valid or clamped, `None` if rejected.
    pub fn apply(self, raw_ms: i64, minimum: Milliseconds) -> Option<Milliseconds> {
        if raw_ms >= minimum.0 as i64 {
            // Values above u32::MAX cannot come from a u32 base plus an i32 offset
            // without the offset being absurd; saturate rather than wrap.
            Some(Milliseconds(u32::try_from(raw_ms).unwrap_or(u32::MAX)))
        } else {
            match self {
                PeriodPolicy::Reject => None,
                PeriodPolicy::Clamp => Some(minimum),
            }
        }
    }
}
