//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use coil_stepper::error::MotorError;
use coil_stepper::{
    CoilSink, CoilVector, DisplayNotice, DisplaySink, Milliseconds, MotorController,
    PeriodicDriver, SystemConfig,
};

/// Records every coil vector written.
#[derive(Debug, Default)]
pub struct RecordingCoils {
    pub writes: Vec<CoilVector>,
}

impl CoilSink for RecordingCoils {
    fn write(&mut self, vector: CoilVector) -> Result<(), MotorError> {
        self.writes.push(vector);
        Ok(())
    }
}

/// One call made to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCall {
    Arm(Milliseconds),
    Disarm,
}

/// Records arm/disarm calls.
#[derive(Debug, Default)]
pub struct RecordingTimer {
    pub calls: Vec<TimerCall>,
    pub period: Option<Milliseconds>,
}

impl PeriodicDriver for RecordingTimer {
    fn arm(&mut self, period: Milliseconds) {
        self.calls.push(TimerCall::Arm(period));
        self.period = Some(period);
    }

    fn disarm(&mut self) {
        self.calls.push(TimerCall::Disarm);
        self.period = None;
    }
}

/// Records every notice.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub notices: Vec<DisplayNotice>,
}

impl DisplaySink for RecordingDisplay {
    fn notify(&mut self, notice: &DisplayNotice) {
        self.notices.push(notice.clone());
    }
}

pub type TestMotor = MotorController<RecordingCoils, RecordingTimer, RecordingDisplay>;

/// Controller over recording doubles.
pub fn motor(config: SystemConfig) -> TestMotor {
    MotorController::builder()
        .coils(RecordingCoils::default())
        .timer(RecordingTimer::default())
        .display(RecordingDisplay::default())
        .config(config)
        .build()
        .expect("test config should build")
}

/// Controller over recording doubles with the reference profiles.
pub fn reference_motor() -> TestMotor {
    motor(SystemConfig::default())
}
