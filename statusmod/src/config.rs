use std::path::PathBuf;

use statusmod_engine::{DEFAULT_CONFIG_DIR, players_path};

const CONFIG_DIR_ENV: &str = "STATUSMOD_CONFIG_DIR";

/// Host configuration taken from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HostConfig {
    config_dir: PathBuf,
}

impl HostConfig {
    pub(crate) fn from_env() -> Self {
        Self::from_dir(std::env::var_os(CONFIG_DIR_ENV).map(PathBuf::from))
    }

    fn from_dir(config_dir: Option<PathBuf>) -> Self {
        let config_dir = config_dir
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR));
        Self { config_dir }
    }

    /// Location of the player settings file.
    pub(crate) fn players_path(&self) -> PathBuf {
        players_path(&self.config_dir)
    }
}
