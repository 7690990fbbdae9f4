//! Expansion settings.

use std::path::{Path, PathBuf};

use ::config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_OCCURRENCES};
use crate::error::{ScheduleError, ScheduleResult};

fn default_occurrences() -> u32 {
    DEFAULT_OCCURRENCES
}

fn is_default_occurrences(n: &u32) -> bool {
    *n == DEFAULT_OCCURRENCES
}

/// What a rule with `occurrences = 0` means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroOccurrences {
    /// Same as leaving the count unset
    #[default]
    UseDefault,
    /// Refuse to expand the rule
    Reject,
}

/// Settings for series expansion, read from ~/.config/coachcal/config.toml
///
/// ```toml
/// default_occurrences = 52
/// zero_occurrences = "use_default"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpansionConfig {
    /// Series length (anchor included) for rules without a count
    #[serde(default = "default_occurrences", skip_serializing_if = "is_default_occurrences")]
    pub default_occurrences: u32,

    #[serde(default)]
    pub zero_occurrences: ZeroOccurrences,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        ExpansionConfig {
            default_occurrences: DEFAULT_OCCURRENCES,
            zero_occurrences: ZeroOccurrences::default(),
        }
    }
}

impl ExpansionConfig {
    pub fn config_path() -> ScheduleResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ScheduleError::Config("Could not determine config directory".into()))?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir.join(CONFIG_FILE_NAME))
    }

    /// Load settings from `path`. A missing file gives the defaults.
    pub fn load(path: &Path) -> ScheduleResult<Self> {
        let config: ExpansionConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| ScheduleError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ScheduleError::Config(e.to_string()))?;

        if config.default_occurrences == 0 {
            return Err(ScheduleError::Config(
                "default_occurrences must be at least 1".into(),
            ));
        }

        Ok(config)
    }

    /// Load from the standard location.
    pub fn load_default() -> ScheduleResult<Self> {
        Self::load(&Self::config_path()?)
    }

    pub fn save(&self, path: &Path) -> ScheduleResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ScheduleError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| ScheduleError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Total sessions (anchor included) for a rule's requested count.
    pub fn max_total(&self, requested: Option<u32>) -> ScheduleResult<u32> {
        match (requested, self.zero_occurrences) {
            (Some(0), ZeroOccurrences::Reject) => Err(ScheduleError::ZeroOccurrences),
            (Some(0), ZeroOccurrences::UseDefault) | (None, _) => Ok(self.default_occurrences),
            (Some(n), _) => Ok(n),
        }
    }
}
