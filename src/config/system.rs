//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::policy::PeriodPolicy;
use super::profile::Profile;
use super::units::Milliseconds;
use crate::error::{ConfigError, Error, Result};

/// Maximum number of profiles in a configuration.
pub const MAX_PROFILES: usize = 4;

/// Position of a profile in configuration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProfileId(pub u8);

impl ProfileId {
    /// Get the index as `usize`.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Named profiles, cycled in declaration order.
    pub profiles: FnvIndexMap<String<32>, Profile, MAX_PROFILES>,

    /// Key of the profile active at startup. Defaults to the first one.
    #[serde(default)]
    pub default_profile: Option<String<32>>,

    /// Period change applied by one speed button press.
    #[serde(default = "default_speed_step", rename = "speed_step_ms")]
    pub speed_step: Milliseconds,

    /// Shortest period the timer may be armed with.
    #[serde(default = "default_min_period", rename = "min_period_ms")]
    pub min_period: Milliseconds,

    /// What happens when a change would go below `min_period`.
    #[serde(default)]
    pub period_policy: PeriodPolicy,

    /// Full steps per output shaft revolution.
    #[serde(default = "default_full_steps")]
    pub full_steps_per_revolution: u16,
}

fn default_speed_step() -> Milliseconds {
    Milliseconds(20)
}

fn default_min_period() -> Milliseconds {
    Milliseconds(1)
}

fn default_full_steps() -> u16 {
    48
}

impl SystemConfig {
    /// Get a profile by key.
    pub fn profile(&self, key: &str) -> Option<&Profile> {
        self.profiles
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v)
    }

    /// Get the position of a profile key.
    pub fn profile_id(&self, key: &str) -> Option<ProfileId> {
        self.profiles
            .keys()
            .position(|k| k.as_str() == key)
            .map(|i| ProfileId(i as u8))
    }

    /// Get a profile by position.
    pub fn profile_at(&self, id: ProfileId) -> Option<&Profile> {
        self.profiles.values().nth(id.index())
    }

    /// Number of configured profiles.
    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    /// List all profile keys in configuration order.
    pub fn profile_keys(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(|s| s.as_str())
    }

    /// Resolve the startup profile.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no profiles or the named default is missing.
    pub fn default_profile_id(&self) -> Result<ProfileId> {
        if self.profiles.is_empty() {
            return Err(Error::Config(ConfigError::NoProfiles));
        }

        match &self.default_profile {
            Some(key) => self
                .profile_id(key.as_str())
                .ok_or_else(|| Error::Config(ConfigError::ProfileNotFound(key.clone()))),
            None => Ok(ProfileId(0)),
        }
    }
}

impl Default for SystemConfig {
    /// The two reference profiles, 20 ms speed step, 48 full steps per revolution.
    fn default() -> Self {
        let mut profiles = FnvIndexMap::new();
        let _ = profiles.insert(String::try_from("a").unwrap_or_default(), Profile::reference_a());
        let _ = profiles.insert(String::try_from("b").unwrap_or_default(), Profile::reference_b());

        Self {
            profiles,
            default_profile: None,
            speed_step: default_speed_step(),
            min_period: default_min_period(),
            period_policy: PeriodPolicy::default(),
            full_steps_per_revolution: default_full_steps(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_reference_profiles_in_order() {
        let config = SystemConfig::default();

        assert_eq!(config.profile_count(), 2);
        assert_eq!(config.profile_id("a"), Some(ProfileId(0)));
        assert_eq!(config.profile_id("b"), Some(ProfileId(1)));
        assert_eq!(
            config.profile_at(ProfileId(1)).map(|p| p.full_step_period),
            Some(Milliseconds(896))
        );
        assert_eq!(config.default_profile_id(), Ok(ProfileId(0)));
    }

    #[test]
    fn test_missing_default_profile() {
        let config = SystemConfig {
            default_profile: Some(String::try_from("c").unwrap()),
            ..SystemConfig::default()
        };

        assert!(matches!(
            config.default_profile_id(),
            Err(Error::Config(ConfigError::ProfileNotFound(_)))
        ));
    }

    #[test]
    fn test_profile_at_out_of_range() {
        let config = SystemConfig::default();
        assert!(config.profile_at(ProfileId(3)).is_none());
    }
}
