//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use coil_stepper::load_config;
///
/// let config = load_config("stepper.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(e.message()).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Milliseconds, PeriodPolicy};

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[profiles.a]
name = "Profile A"
full_step_period_ms = 750
half_step_period_ms = 375
"#;

        let config = parse_config(toml).unwrap();
        let profile = config.profile("a").unwrap();
        assert_eq!(profile.full_step_period, Milliseconds(750));
        assert_eq!(config.speed_step, Milliseconds(20));
        assert_eq!(config.min_period, Milliseconds(1));
        assert_eq!(config.period_policy, PeriodPolicy::Reject);
        assert_eq!(config.full_steps_per_revolution, 48);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
default_profile = "b"
speed_step_ms = 10
min_period_ms = 50
period_policy = "clamp"
full_steps_per_revolution = 200

[profiles.a]
name = "Profile A"
label = "36s per revolution"
full_step_period_ms = 750
half_step_period_ms = 375

[profiles.b]
name = "Profile B"
label = "43s per revolution"
full_step_period_ms = 896
half_step_period_ms = 448
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.profile_keys().count(), 2);
        assert_eq!(config.default_profile_id().unwrap().0, 1);
        assert_eq!(config.period_policy, PeriodPolicy::Clamp);
        assert_eq!(config.profile("b").unwrap().label.as_str(), "43s per revolution");
    }

    #[test]
    fn test_parse_rejects_unknown_policy() {
        let toml = r#"
period_policy = "wrap"

[profiles.a]
name = "A"
full_step_period_ms = 750
half_step_period_ms = 375
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("coil-stepper-{}.toml", std::process::id()));
        fs::write(
            &path,
            r#"
default_profile = "slow"
speed_step_ms = 10

[profiles.slow]
name = "Slow"
full_step_period_ms = 1000
half_step_period_ms = 500
"#,
        )
        .unwrap();

        let loaded = load_config(&path);
        fs::remove_file(&path).unwrap();

        let config = loaded.unwrap();
        assert_eq!(config.profile_count(), 1);
        assert_eq!(config.speed_step, Milliseconds(10));
        assert_eq!(config.profile("slow").unwrap().full_step_period, Milliseconds(1000));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_config("/nonexistent/coil-stepper.toml"),
            Err(Error::Config(ConfigError::IoError(_)))
        ));
    }
}
