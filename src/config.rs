use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "could not read config: {}", e),
            ConfigError::Parse(e) => write!(f, "could not parse config: {}", e),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// parameters for one batch of trials. `package_size` is n, `category_count` is m.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TrialConfig {
    pub num_samples: usize,
    pub num_trials: usize,
    pub package_size: usize,
    pub category_count: usize,
    pub seed: Option<u64>,
    pub verbose: bool,
}

impl Default for TrialConfig {
    fn default() -> Self {
        TrialConfig {
            num_samples: 100_000,
            num_trials: 10,
            package_size: 12,
            category_count: 12,
            seed: None,
            verbose: false,
        }
    }
}

/// values given on the command line. `None` keeps whatever the config already holds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub num_samples: Option<usize>,
    pub num_trials: Option<usize>,
    pub package_size: Option<usize>,
    pub category_count: Option<usize>,
    pub seed: Option<u64>,
    pub verbose: bool,
}

impl TrialConfig {
    pub fn new(
        num_samples: usize,
        num_trials: usize,
        package_size: usize,
        category_count: usize,
    ) -> Self {
        TrialConfig {
            num_samples,
            num_trials,
            package_size,
            category_count,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_overrides(self, overrides: &ConfigOverrides) -> Self {
        TrialConfig {
            num_samples: overrides.num_samples.unwrap_or(self.num_samples),
            num_trials: overrides.num_trials.unwrap_or(self.num_trials),
            package_size: overrides.package_size.unwrap_or(self.package_size),
            category_count: overrides.category_count.unwrap_or(self.category_count),
            seed: overrides.seed.or(self.seed),
            verbose: self.verbose || overrides.verbose,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_samples == 0 {
            return Err(ConfigError::Invalid("num_samples must be positive"));
        }
        if self.num_trials == 0 {
            return Err(ConfigError::Invalid("num_trials must be positive"));
        }
        if self.category_count == 0 {
            return Err(ConfigError::Invalid("category_count must be positive"));
        }
        Ok(())
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: TrialConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut buf = String::new();
        File::open(&path)?.read_to_string(&mut buf)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded trial config");
        Self::from_toml_str(&buf)
    }
}
