//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{Profile, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - At least one profile exists and the default profile resolves
/// - Minimum period and speed step are non-zero
/// - Every base period is at or above the minimum period
/// - Steps per revolution is non-zero
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    if config.min_period.0 == 0 {
        return Err(Error::Config(ConfigError::InvalidMinPeriod(config.min_period)));
    }

    if config.speed_step.0 == 0 {
        return Err(Error::Config(ConfigError::InvalidSpeedStep(config.speed_step)));
    }

    if config.full_steps_per_revolution == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(
            config.full_steps_per_revolution,
        )));
    }

    config.default_profile_id()?;

    for (_, profile) in config.profiles.iter() {
        validate_profile(profile, config)?;
    }

    Ok(())
}

fn validate_profile(profile: &Profile, config: &SystemConfig) -> Result<()> {
    let shortest = profile.shortest_period();
    if shortest < config.min_period {
        return Err(Error::Config(ConfigError::InvalidProfilePeriod {
            profile: profile.name.clone(),
            period: shortest,
            minimum: config.min_period,
        }));
    }

    Ok(())
}
