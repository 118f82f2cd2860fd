//! Display notifications.
//!
//! The controller announces mode and profile changes and never waits on the
//! result. Rendering is up to the sink.

use embedded_hal::digital::{OutputPin, PinState};
use heapless::{Deque, String};

use crate::config::{Milliseconds, ProfileId};
use crate::motion::StepMode;

/// A change worth showing to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayNotice {
    /// Step mode (re)applied, including after a speed change.
    StepMode(StepMode),
    /// A profile became active.
    Profile {
        /// Position of the profile in configuration order.
        id: ProfileId,
        /// Profile name.
        name: String<32>,
        /// Profile label, e.g. "36s per revolution".
        label: String<32>,
        /// Time for one output revolution at the active period.
        revolution_time: Milliseconds,
    },
}

impl DisplayNotice {
    /// Primary text line for this notice.
    pub fn text(&self) -> &str {
        match self {
            DisplayNotice::StepMode(mode) => mode.label(),
            DisplayNotice::Profile { label, .. } => label.as_str(),
        }
    }
}

/// Receiver of display notices.
///
/// Called from interrupt context: implementations must not block.
pub trait DisplaySink {
    /// Handle one notice.
    fn notify(&mut self, notice: &DisplayNotice);
}

impl DisplaySink for () {
    fn notify(&mut self, _notice: &DisplayNotice) {}
}

impl<D: DisplaySink + ?Sized> DisplaySink for &mut D {
    fn notify(&mut self, notice: &DisplayNotice) {
        (**self).notify(notice);
    }
}

impl<A: DisplaySink, B: DisplaySink> DisplaySink for (A, B) {
    fn notify(&mut self, notice: &DisplayNotice) {
        self.0.notify(notice);
        self.1.notify(notice);
    }
}

/// Fixed-capacity queue that defers notices to the idle loop.
///
/// When full, new notices are dropped and counted.
#[derive(Debug, Default)]
pub struct NoticeQueue<const N: usize> {
    queue: Deque<DisplayNotice, N>,
    dropped: u32,
}

impl<const N: usize> NoticeQueue<N> {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            queue: Deque::new(),
            dropped: 0,
        }
    }

    /// Take the oldest pending notice.
    pub fn pop(&mut self) -> Option<DisplayNotice> {
        self.queue.pop_front()
    }

    /// Take every pending notice, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = DisplayNotice> + '_ {
        core::iter::from_fn(move || self.queue.pop_front())
    }

    /// Number of pending notices.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no notices are pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Notices dropped because the queue was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<const N: usize> DisplaySink for NoticeQueue<N> {
    fn notify(&mut self, notice: &DisplayNotice) {
        if self.queue.push_back(notice.clone()).is_err() {
            self.dropped = self.dropped.saturating_add(1);
            warn!("display queue full, {} notices dropped", self.dropped);
        }
    }
}

/// Status LED that toggles on every profile switch.
#[derive(Debug)]
pub struct ProfileIndicator<LED: OutputPin> {
    led: LED,
    lit: bool,
}

impl<LED: OutputPin> ProfileIndicator<LED> {
    /// Take the LED pin and switch it on.
    ///
    /// # Errors
    ///
    /// Returns the pin error if the LED cannot be driven.
    pub fn new(mut led: LED) -> Result<Self, LED::Error> {
        led.set_high()?;
        Ok(Self { led, lit: true })
    }

    /// Whether the LED is currently on.
    #[inline]
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Give the pin back.
    pub fn release(self) -> LED {
        self.led
    }
}

impl<LED: OutputPin> DisplaySink for ProfileIndicator<LED> {
    fn notify(&mut self, notice: &DisplayNotice) {
        if let DisplayNotice::Profile { .. } = notice {
            self.lit = !self.lit;
            if self.led.set_state(PinState::from(self.lit)).is_err() {
                warn!("profile indicator write failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};

    fn profile_notice() -> DisplayNotice {
        DisplayNotice::Profile {
            id: ProfileId(1),
            name: String::try_from("Profile B").unwrap(),
            label: String::try_from("43s per revolution").unwrap(),
            revolution_time: Milliseconds(43_008),
        }
    }

    #[test]
    fn test_queue_drops_when_full() {
        let mut queue: NoticeQueue<2> = NoticeQueue::new();

        queue.notify(&DisplayNotice::StepMode(StepMode::Full));
        queue.notify(&DisplayNotice::StepMode(StepMode::Half));
        queue.notify(&profile_notice());

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dropped(), 1);
        assert_eq!(queue.pop(), Some(DisplayNotice::StepMode(StepMode::Full)));
        assert_eq!(queue.drain().count(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_notice_text() {
        assert_eq!(DisplayNotice::StepMode(StepMode::Half).text(), "Half step");
        assert_eq!(profile_notice().text(), "43s per revolution");
    }

    #[test]
    fn test_indicator_toggles_on_profile_only() {
        let led = PinMock::new(&[
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ]);

        let mut indicator = ProfileIndicator::new(led).unwrap();
        indicator.notify(&profile_notice());
        indicator.notify(&DisplayNotice::StepMode(StepMode::Full));
        assert!(!indicator.is_lit());
        indicator.notify(&profile_notice());
        assert!(indicator.is_lit());

        indicator.release().done();
    }
}
