use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{
    core::{
        notifications::DEFAULT_UPCOMING_DAYS,
        recurrence::{
            DEFAULT_HORIZON_DAYS, DEFAULT_MAX_OCCURRENCES, MAX_HORIZON_DAYS, MAX_OCCURRENCES,
        },
        services::validation,
    },
    errors::SubscriptionError,
    utils::{
        paths,
        persistence::{load_json, save_json},
    },
};

/// User preferences and engine parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Currency assigned to drafts that do not name one.
    pub default_currency: String,
    /// Lead time, in days, of reminder notifications.
    pub notification_days_before: u32,
    pub upcoming_window_days: i64,
    pub projection_horizon_days: i64,
    pub projection_max_occurrences: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_currency: "USD".into(),
            notification_days_before: 3,
            upcoming_window_days: DEFAULT_UPCOMING_DAYS,
            projection_horizon_days: DEFAULT_HORIZON_DAYS,
            projection_max_occurrences: DEFAULT_MAX_OCCURRENCES,
            data_root: None,
        }
    }
}

impl Config {
    pub fn resolve_data_root(&self) -> PathBuf {
        self.data_root.clone().unwrap_or_else(paths::app_data_dir)
    }

    pub fn validate(&self) -> Result<(), SubscriptionError> {
        validation::validate_currency(&self.default_currency)
            .map_err(|err| SubscriptionError::Config(err.to_string()))?;
        let day_windows = [self.upcoming_window_days, self.projection_horizon_days];
        if day_windows.iter().any(|days| !(0..=MAX_HORIZON_DAYS).contains(days)) {
            return Err(SubscriptionError::Config(format!(
                "day windows must be between 0 and {MAX_HORIZON_DAYS}"
            )));
        }
        if self.projection_max_occurrences > MAX_OCCURRENCES {
            return Err(SubscriptionError::Config(format!(
                "projection_max_occurrences must not exceed {MAX_OCCURRENCES}"
            )));
        }
        Ok(())
    }
}

/// Loads and saves [`Config`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: paths::config_file_in(&base),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored config, or the defaults when no file exists yet.
    pub fn load(&self) -> Result<Config, SubscriptionError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let config: Config = load_json(&self.path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), SubscriptionError> {
        config.validate()?;
        save_json(config, &self.path)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
