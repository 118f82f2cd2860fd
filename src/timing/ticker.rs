//! Software periodic driver fed by a millisecond tick.

use crate::config::Milliseconds;

use super::driver::PeriodicDriver;

/// A [`PeriodicDriver`] that counts elapsed milliseconds.
///
/// Useful on targets where the step timer is shared with a 1 kHz system tick,
/// and for driving the controller deterministically in tests. Rearming resets
/// the accumulated time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SoftwareTicker {
    period: Option<Milliseconds>,
    elapsed: u32,
}

impl SoftwareTicker {
    /// Create a disarmed ticker.
    pub const fn new() -> Self {
        Self {
            period: None,
            elapsed: 0,
        }
    }

    /// Currently armed period, if any.
    #[inline]
    pub fn period(&self) -> Option<Milliseconds> {
        self.period
    }

    /// Whether the ticker is armed.
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.period.is_some()
    }

    /// Time accumulated since the last expiry.
    #[inline]
    pub fn elapsed(&self) -> Milliseconds {
        Milliseconds(self.elapsed)
    }

    /// Account for `ms` milliseconds and return how many periods expired.
    pub fn elapse(&mut self, ms: u32) -> u32 {
        let Some(period) = self.period else {
            return 0;
        };

        let total = self.elapsed as u64 + ms as u64;
        let period = period.0 as u64;
        self.elapsed = (total % period) as u32;
        u32::try_from(total / period).unwrap_or(u32::MAX)
    }
}

impl PeriodicDriver for SoftwareTicker {
    fn arm(&mut self, period: Milliseconds) {
        // A zero period would divide by zero in `elapse`.
        self.period = Some(period.max(Milliseconds(1)));
        self.elapsed = 0;
    }

    fn disarm(&mut self) {
        self.period = None;
        self.elapsed = 0;
    }
}
