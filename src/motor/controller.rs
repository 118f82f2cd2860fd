//! Motor controller.
//!
//! Owns the motor state, the coil outputs, the step timer and the display
//! sink. Every operation takes `&mut self`; sharing between interrupt
//! contexts goes through [`SharedMotor`](super::SharedMotor).

use heapless::Vec;

use crate::config::{Milliseconds, Profile, ProfileId, SpeedOffset, MAX_PROFILES};
use crate::error::{Error, MotorError, Result};
use crate::motion::{CoilVector, Direction, StepMode};
use crate::timing::{PeriodicDriver, SoftwareTicker, TimingPolicy};

use super::builder::MotorControllerBuilder;
use super::coils::CoilSink;
use super::display::{DisplayNotice, DisplaySink};
use super::event::MotorEvent;
use super::state::MotorState;

/// Stepping state machine for a 4-phase motor.
///
/// Generic over:
/// - `COILS`: coil output sink (must implement [`CoilSink`])
/// - `TIMER`: periodic driver that calls [`tick`](Self::tick) (must implement [`PeriodicDriver`])
/// - `DISPLAY`: notice receiver (must implement [`DisplaySink`], defaults to `()`)
///
/// Reconfigurations are transactional: the new period is computed first, and
/// if it is rejected nothing changes. Otherwise the timer is disarmed, the
/// state updated and the timer armed again, so a tick never sees a new
/// pattern table with an old index or period. A successful reconfiguration
/// always leaves the timer armed.
pub struct MotorController<COILS, TIMER, DISPLAY = ()>
where
    COILS: CoilSink,
    TIMER: PeriodicDriver,
    DISPLAY: DisplaySink,
{
    /// Coil outputs.
    coils: COILS,

    /// Step timer.
    timer: TIMER,

    /// Display notice receiver.
    display: DISPLAY,

    /// Profiles in configuration order.
    profiles: Vec<Profile, MAX_PROFILES>,

    /// Period computation and speed step.
    timing: TimingPolicy,

    /// Full steps per output revolution.
    full_steps_per_revolution: u16,

    /// Shared stepping state.
    state: MotorState,

    /// Period the timer is (or will be) armed with.
    period: Milliseconds,

    /// Whether the timer is armed.
    running: bool,
}

impl<COILS, TIMER> MotorController<COILS, TIMER, ()>
where
    COILS: CoilSink,
    TIMER: PeriodicDriver,
{
    /// Start building a controller.
    pub fn builder() -> MotorControllerBuilder<COILS, TIMER, ()> {
        MotorControllerBuilder::new()
    }
}

impl<COILS, TIMER, DISPLAY> MotorController<COILS, TIMER, DISPLAY>
where
    COILS: CoilSink,
    TIMER: PeriodicDriver,
    DISPLAY: DisplaySink,
{
    /// Create a stopped controller in the startup state.
    pub(crate) fn new(
        coils: COILS,
        timer: TIMER,
        display: DISPLAY,
        profiles: Vec<Profile, MAX_PROFILES>,
        timing: TimingPolicy,
        full_steps_per_revolution: u16,
        initial_profile: ProfileId,
    ) -> Result<Self> {
        let state = MotorState::new(initial_profile);
        let profile = profiles
            .get(initial_profile.index())
            .ok_or(MotorError::UnknownProfile(initial_profile))?;
        let period = timing.active_period(profile, state.step_mode(), state.offset())?;

        Ok(Self {
            coils,
            timer,
            display,
            profiles,
            timing,
            full_steps_per_revolution,
            state,
            period,
            running: false,
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Snapshot of the shared state.
    #[inline]
    pub fn state(&self) -> &MotorState {
        &self.state
    }

    /// Period the timer is armed with.
    #[inline]
    pub fn period(&self) -> Milliseconds {
        self.period
    }

    /// Whether the timer is armed.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Rotation direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.state.direction()
    }

    /// Active step mode.
    #[inline]
    pub fn step_mode(&self) -> StepMode {
        self.state.step_mode()
    }

    /// Index into the active pattern table.
    #[inline]
    pub fn index(&self) -> u8 {
        self.state.index()
    }

    /// Speed offset.
    #[inline]
    pub fn offset(&self) -> SpeedOffset {
        self.state.offset()
    }

    /// Active profile id.
    #[inline]
    pub fn profile_id(&self) -> ProfileId {
        self.state.profile()
    }

    /// Active profile.
    #[inline]
    pub fn profile(&self) -> &Profile {
        // The active id is checked against `profiles` before it is stored.
        &self.profiles[self.state.profile().index()]
    }

    /// All profiles in configuration order.
    #[inline]
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Timing policy.
    #[inline]
    pub fn timing(&self) -> &TimingPolicy {
        &self.timing
    }

    /// Coil vector the next tick will output.
    #[inline]
    pub fn current_vector(&self) -> CoilVector {
        self.state.sequencer.current_vector()
    }

    /// Time for one output revolution at the active period.
    pub fn revolution_time(&self) -> Milliseconds {
        let steps = self
            .step_mode()
            .steps_per_revolution(self.full_steps_per_revolution);
        self.period * steps
    }

    /// Coil sink.
    #[inline]
    pub fn coils(&self) -> &COILS {
        &self.coils
    }

    /// Step timer.
    #[inline]
    pub fn timer(&self) -> &TIMER {
        &self.timer
    }

    /// Display sink.
    #[inline]
    pub fn display(&self) -> &DISPLAY {
        &self.display
    }

    /// Display sink, mutably (e.g. to drain a [`NoticeQueue`](super::NoticeQueue)).
    #[inline]
    pub fn display_mut(&mut self) -> &mut DISPLAY {
        &mut self.display
    }

    /// Take the controller apart.
    pub fn into_parts(self) -> (COILS, TIMER, DISPLAY) {
        (self.coils, self.timer, self.display)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Arm the timer at the current period and announce mode and profile.
    pub fn start(&mut self) {
        info!("starting at {} ms", self.period.0);
        self.timer.disarm();
        self.timer.arm(self.period);
        self.running = true;
        self.notify_profile();
        self.display.notify(&DisplayNotice::StepMode(self.step_mode()));
    }

    /// Disarm the timer and switch every coil off. State is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if a coil output cannot be written.
    pub fn release(&mut self) -> Result<()> {
        info!("releasing coils");
        self.timer.disarm();
        self.running = false;
        self.coils.write(CoilVector::OFF)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Dispatch an event to the matching operation.
    ///
    /// # Errors
    ///
    /// Returns whatever the operation returns.
    pub fn handle(&mut self, event: MotorEvent) -> Result<()> {
        match event {
            MotorEvent::Tick => self.tick(),
            MotorEvent::SetDirection(direction) => {
                self.set_direction(direction);
                Ok(())
            }
            MotorEvent::ToggleDirection => {
                self.toggle_direction();
                Ok(())
            }
            MotorEvent::SetStepMode(mode) => self.set_step_mode(mode),
            MotorEvent::ToggleStepMode => self.toggle_step_mode(),
            MotorEvent::AdjustSpeed(presses) => self.adjust_speed(presses),
            MotorEvent::SetProfile(id) => self.set_profile(id),
            MotorEvent::NextProfile => self.next_profile(),
        }
    }

    /// Output the current coil vector, then move one position.
    ///
    /// Runs in timer interrupt context: no blocking, no allocation.
    ///
    /// # Errors
    ///
    /// Returns an error if a coil output cannot be written; the index is not
    /// advanced in that case.
    pub fn tick(&mut self) -> Result<()> {
        let vector = self.state.sequencer.current_vector();
        self.coils.write(vector)?;
        self.state.sequencer.advance(self.state.direction);
        trace!("tick -> index {}", self.state.sequencer.index());
        Ok(())
    }

    /// Set the rotation direction. Timing is untouched.
    pub fn set_direction(&mut self, direction: Direction) {
        info!("direction {}", direction);
        self.state.direction = direction;
    }

    /// Reverse the rotation direction.
    pub fn toggle_direction(&mut self) {
        self.set_direction(self.state.direction.reversed());
    }

    /// Switch step mode and rearm at the new period.
    ///
    /// The index is remapped so the same coils stay energised (see
    /// [`StepSequencer::set_mode`](crate::motion::StepSequencer::set_mode)).
    ///
    /// # Errors
    ///
    /// Returns `TimingError::InvalidPeriod` if the new period is rejected;
    /// the state is then unchanged.
    pub fn set_step_mode(&mut self, mode: StepMode) -> Result<()> {
        let period = self.period_for(self.state.profile, mode, self.state.offset)?;

        self.reconfigure(period, |state| state.sequencer.set_mode(mode));
        info!("{} at {} ms", mode, period.0);
        self.display.notify(&DisplayNotice::StepMode(mode));
        Ok(())
    }

    /// Switch between full and half stepping.
    ///
    /// # Errors
    ///
    /// See [`set_step_mode`](Self::set_step_mode).
    pub fn toggle_step_mode(&mut self) -> Result<()> {
        self.set_step_mode(self.step_mode().toggled())
    }

    /// Change speed by `presses` speed steps and rearm. Positive is faster.
    ///
    /// Under [`PeriodPolicy::Clamp`](crate::PeriodPolicy::Clamp) the stored
    /// offset stops at the one that gives the minimum period, so presses past
    /// the floor are not banked.
    ///
    /// # Errors
    ///
    /// Returns `TimingError::InvalidPeriod` if the new period is rejected;
    /// the offset is then unchanged.
    pub fn adjust_speed(&mut self, presses: i16) -> Result<()> {
        let requested = self.timing.adjusted_offset(self.state.offset, presses);
        let mode = self.step_mode();
        let (period, offset) = self.resolve(self.state.profile, mode, requested)?;

        self.reconfigure(period, |state| state.offset = offset);
        info!("speed offset {} ms, period {} ms", offset.0, period.0);
        self.display.notify(&DisplayNotice::StepMode(mode));
        Ok(())
    }

    /// One speed step faster.
    ///
    /// # Errors
    ///
    /// See [`adjust_speed`](Self::adjust_speed).
    pub fn increase_speed(&mut self) -> Result<()> {
        self.adjust_speed(1)
    }

    /// One speed step slower.
    ///
    /// # Errors
    ///
    /// See [`adjust_speed`](Self::adjust_speed).
    pub fn decrease_speed(&mut self) -> Result<()> {
        self.adjust_speed(-1)
    }

    /// Activate a profile and rearm. The speed offset carries over.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::UnknownProfile` for an id outside the configured
    /// profiles, or `TimingError::InvalidPeriod` if the new period is
    /// rejected. The state is unchanged on error.
    pub fn set_profile(&mut self, id: ProfileId) -> Result<()> {
        let period = self.period_for(id, self.step_mode(), self.state.offset)?;

        self.reconfigure(period, |state| state.profile = id);
        info!("profile {} at {} ms", id.0, period.0);
        self.notify_profile();
        Ok(())
    }

    /// Activate the next profile, wrapping to the first.
    ///
    /// # Errors
    ///
    /// See [`set_profile`](Self::set_profile).
    pub fn next_profile(&mut self) -> Result<()> {
        let next = (self.state.profile.index() + 1) % self.profiles.len();
        self.set_profile(ProfileId(next as u8))
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn period_for(&self, id: ProfileId, mode: StepMode, offset: SpeedOffset) -> Result<Milliseconds> {
        self.resolve(id, mode, offset).map(|(period, _)| period)
    }

    fn resolve(
        &self,
        id: ProfileId,
        mode: StepMode,
        offset: SpeedOffset,
    ) -> Result<(Milliseconds, SpeedOffset)> {
        let profile = self
            .profiles
            .get(id.index())
            .ok_or(MotorError::UnknownProfile(id))?;

        self.timing.resolve(profile, mode, offset).map_err(|e| {
            warn!("rejected period change: {}", e);
            Error::from(e)
        })
    }

    /// Stop the cadence, apply `update`, restart at `period`.
    fn reconfigure(&mut self, period: Milliseconds, update: impl FnOnce(&mut MotorState)) {
        self.timer.disarm();
        update(&mut self.state);
        self.period = period;
        self.timer.arm(period);
        self.running = true;
    }

    fn notify_profile(&mut self) {
        let profile = self.profile();
        let notice = DisplayNotice::Profile {
            id: self.state.profile,
            name: profile.name.clone(),
            label: profile.label.clone(),
            revolution_time: self.revolution_time(),
        };
        self.display.notify(&notice);
    }
}

impl<COILS, DISPLAY> MotorController<COILS, SoftwareTicker, DISPLAY>
where
    COILS: CoilSink,
    DISPLAY: DisplaySink,
{
    /// Advance the software ticker by `ms` and run every tick that fell due.
    ///
    /// Returns the number of ticks run.
    ///
    /// # Errors
    ///
    /// Stops at the first failed tick and returns its error.
    pub fn elapse(&mut self, ms: u32) -> Result<u32> {
        let due = self.timer.elapse(ms);
        for _ in 0..due {
            self.tick()?;
        }
        Ok(due)
    }
}

impl<COILS, TIMER, DISPLAY> core::fmt::Debug for MotorController<COILS, TIMER, DISPLAY>
where
    COILS: CoilSink,
    TIMER: PeriodicDriver,
    DISPLAY: DisplaySink,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MotorController")
            .field("state", &self.state)
            .field("period", &self.period)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}
