//! Error types for coil-stepper.
//!
//! Provides unified error handling across configuration, motor control and step timing.

use core::fmt;

use crate::config::{Milliseconds, ProfileId, SpeedOffset};
use crate::motion::Coil;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all coil-stepper operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor operation error
    Motor(MotorError),
    /// Step period computation error
    Timing(TimingError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Configuration declares no profiles
    NoProfiles,
    /// Profile key not found in configuration
    ProfileNotFound(heapless::String<32>),
    /// A profile's base period is below the minimum period
    InvalidProfilePeriod {
        /// Profile name
        profile: heapless::String<32>,
        /// Offending base period
        period: Milliseconds,
        /// Configured minimum
        minimum: Milliseconds,
    },
    /// Speed step must be > 0
    InvalidSpeedStep(Milliseconds),
    /// Minimum period must be > 0
    InvalidMinPeriod(Milliseconds),
    /// Steps per revolution must be > 0
    InvalidStepsPerRevolution(u16),
    /// A required builder part was not supplied
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor operation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Writing a coil output failed
    PinError(Coil),
    /// Profile id does not name a configured profile
    UnknownProfile(ProfileId),
    /// Shared handle used before a controller was installed
    NotInstalled,
}

/// Step period errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingError {
    /// Base period plus offset falls below the minimum period
    InvalidPeriod {
        /// Base period of the profile for the step mode
        base: Milliseconds,
        /// Speed offset that would have been applied
        offset: SpeedOffset,
        /// Configured minimum period
        minimum: Milliseconds,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Timing(e) => write!(f, "Timing error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::NoProfiles => write!(f, "No profiles configured"),
            ConfigError::ProfileNotFound(name) => write!(f, "Profile '{}' not found", name),
            ConfigError::InvalidProfilePeriod {
                profile,
                period,
                minimum,
            } => write!(
                f,
                "Profile '{}' period {} ms is below minimum {} ms",
                profile, period.0, minimum.0
            ),
            ConfigError::InvalidSpeedStep(v) => write!(f, "Invalid speed step: {} ms. Must be > 0", v.0),
            ConfigError::InvalidMinPeriod(v) => write!(f, "Invalid minimum period: {} ms. Must be > 0", v.0),
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError(coil) => write!(f, "GPIO write to {} coil failed", coil.name()),
            MotorError::UnknownProfile(id) => write!(f, "No profile at index {}", id.0),
            MotorError::NotInstalled => write!(f, "Motor controller not installed"),
        }
    }
}

impl fmt::Display for TimingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingError::InvalidPeriod {
                base,
                offset,
                minimum,
            } => write!(
                f,
                "Period {} ms {:+} ms is below minimum {} ms",
                base.0, offset.0, minimum.0
            ),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<TimingError> for Error {
    fn from(e: TimingError) -> Self {
        Error::Timing(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for TimingError {}
