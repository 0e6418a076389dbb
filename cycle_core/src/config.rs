//! Configuration file support for Cyclewise.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/cyclewise/config.toml`.

use crate::cycle::{CycleParams, MAX_CYCLE_LENGTH_DAYS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub prediction: CycleParams,
}

/// Data location configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl DataConfig {
    /// Default period history file
    pub fn periods_path(&self) -> PathBuf {
        self.data_dir.join("periods.csv")
    }

    /// Default symptom log file
    pub fn symptoms_path(&self) -> PathBuf {
        self.data_dir.join("symptoms.json")
    }

    /// Default weekly pregnancy update file
    pub fn pregnancy_updates_path(&self) -> PathBuf {
        self.data_dir.join("pregnancy_updates.json")
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cyclewise")
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cyclewise")
            .join("config.toml")
    }

    /// Reject prediction parameters that would produce nonsense dates
    ///
    /// The cycle length must lie in `1..=MAX_CYCLE_LENGTH_DAYS`; the luteal
    /// phase and fertile window offsets must fit inside one cycle.
    pub fn validate(&self) -> Result<()> {
        let p = &self.prediction;
        let cycle = p.default_cycle_length_days;

        if !(1..=MAX_CYCLE_LENGTH_DAYS).contains(&cycle) {
            return Err(Error::Config(format!(
                "default_cycle_length_days must be between 1 and {}, got {}",
                MAX_CYCLE_LENGTH_DAYS, cycle
            )));
        }
        if !(1..cycle).contains(&p.luteal_phase_days) {
            return Err(Error::Config(format!(
                "luteal_phase_days must be between 1 and {}, got {}",
                cycle - 1,
                p.luteal_phase_days
            )));
        }
        for (name, value) in [
            ("fertile_days_before_ovulation", p.fertile_days_before_ovulation),
            ("fertile_days_after_ovulation", p.fertile_days_after_ovulation),
        ] {
            if !(0..cycle).contains(&value) {
                return Err(Error::Config(format!(
                    "{} must be between 0 and {}, got {}",
                    name,
                    cycle - 1,
                    value
                )));
            }
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
