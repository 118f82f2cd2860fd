//! Builder pattern for MotorController.

use heapless::Vec;

use crate::config::{validate_config, SystemConfig, MAX_PROFILES};
use crate::error::{ConfigError, Error, Result};
use crate::timing::{PeriodicDriver, TimingPolicy};

use super::coils::CoilSink;
use super::controller::MotorController;
use super::display::DisplaySink;

/// Builder for creating MotorController instances.
pub struct MotorControllerBuilder<COILS, TIMER, DISPLAY = ()>
where
    COILS: CoilSink,
    TIMER: PeriodicDriver,
    DISPLAY: DisplaySink,
{
    coils: Option<COILS>,
    timer: Option<TIMER>,
    display: DISPLAY,
    config: Option<SystemConfig>,
}

impl<COILS, TIMER> Default for MotorControllerBuilder<COILS, TIMER, ()>
where
    COILS: CoilSink,
    TIMER: PeriodicDriver,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<COILS, TIMER> MotorControllerBuilder<COILS, TIMER, ()>
where
    COILS: CoilSink,
    TIMER: PeriodicDriver,
{
    /// Create a new builder with no display.
    pub fn new() -> Self {
        Self {
            coils: None,
            timer: None,
            display: (),
            config: None,
        }
    }
}

impl<COILS, TIMER, DISPLAY> MotorControllerBuilder<COILS, TIMER, DISPLAY>
where
    COILS: CoilSink,
    TIMER: PeriodicDriver,
    DISPLAY: DisplaySink,
{
    /// Set the coil outputs.
    pub fn coils(mut self, coils: COILS) -> Self {
        self.coils = Some(coils);
        self
    }

    /// Set the step timer.
    pub fn timer(mut self, timer: TIMER) -> Self {
        self.timer = Some(timer);
        self
    }

    /// Set the display sink.
    pub fn display<D: DisplaySink>(self, display: D) -> MotorControllerBuilder<COILS, TIMER, D> {
        MotorControllerBuilder {
            coils: self.coils,
            timer: self.timer,
            display,
            config: self.config,
        }
    }

    /// Configure profiles and timing. Defaults to [`SystemConfig::default`].
    pub fn config(mut self, config: SystemConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the MotorController.
    ///
    /// The controller starts stopped in the startup state: default profile,
    /// full step, clockwise, no speed offset, index 0.
    ///
    /// # Errors
    ///
    /// Returns an error if coils or timer are missing or the configuration is
    /// invalid.
    pub fn build(self) -> Result<MotorController<COILS, TIMER, DISPLAY>> {
        let coils = self
            .coils
            .ok_or(Error::Config(ConfigError::MissingField("coils")))?;

        let timer = self
            .timer
            .ok_or(Error::Config(ConfigError::MissingField("timer")))?;

        let config = self.config.unwrap_or_default();
        validate_config(&config)?;

        let initial_profile = config.default_profile_id()?;
        let profiles: Vec<_, MAX_PROFILES> = config.profiles.values().cloned().collect();

        MotorController::new(
            coils,
            timer,
            self.display,
            profiles,
            TimingPolicy::from_config(&config),
            config.full_steps_per_revolution,
            initial_profile,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Milliseconds, ProfileId};
    use crate::error::MotorError;
    use crate::motion::CoilVector;
    use crate::timing::SoftwareTicker;

    struct NullCoils;

    impl CoilSink for NullCoils {
        fn write(&mut self, _vector: CoilVector) -> core::result::Result<(), MotorError> {
            Ok(())
        }
    }

    #[test]
    fn test_missing_coils() {
        let result = MotorControllerBuilder::<NullCoils, SoftwareTicker>::new()
            .timer(SoftwareTicker::new())
            .build();

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField("coils")))
        ));
    }

    #[test]
    fn test_default_profile_from_config() {
        let config = SystemConfig {
            default_profile: heapless::String::try_from("b").ok(),
            ..SystemConfig::default()
        };

        let motor = MotorControllerBuilder::new()
            .coils(NullCoils)
            .timer(SoftwareTicker::new())
            .config(config)
            .build()
            .unwrap();

        assert_eq!(motor.profile_id(), ProfileId(1));
        assert_eq!(motor.period(), Milliseconds(896));
    }
}
