use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".subscription_core";
const HOME_ENV: &str = "SUBSCRIPTION_CORE_HOME";
const SUBSCRIPTIONS_DIR: &str = "subscriptions";
const CONFIG_FILE: &str = "config.json";

/// Returns the application data directory, defaulting to `~/.subscription_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding one subscription file per user.
pub fn subscriptions_dir_in(base: &Path) -> PathBuf {
    base.join(SUBSCRIPTIONS_DIR)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}
