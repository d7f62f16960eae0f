//! Where the roster lives and which sub-roster rule applies.
//!
//! Values come from built-in defaults, then `config.toml`, then `CARPOOL_`
//! environment variables such as `CARPOOL_ROSTER__SUB_ROSTER_RULE`.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::roster::SubRosterRule;

const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "carpool";
const ROSTER_DB_FILE: &str = "roster.db";

/// Tracker settings.
///
/// Later sources win: environment over `~/.config/carpool/config.toml`
/// over defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `[storage]` table.
    pub storage: StorageConfig,
    /// `[roster]` table.
    pub roster: RosterConfig,
}

/// Roster database location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// `SQLite` file holding both rosters and the editor logins. Unset means
    /// `~/.local/share/carpool/roster.db`.
    pub database_path: Option<PathBuf>,
}

/// Roster rule configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// How the sub roster treats absence flags.
    pub sub_roster_rule: SubRosterRule,
}

impl Config {
    /// Read settings, using `path` instead of the default config file when
    /// given. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigLoad`] for unreadable or mistyped settings and
    /// [`Error::ConfigValidation`] for values [`Config::validate`] rejects.
    pub fn load_from(path: Option<PathBuf>) -> Result<Self> {
        let toml_path = path.unwrap_or_else(Self::default_config_path);

        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(&toml_path))
            .merge(
                Env::prefixed("CARPOOL_")
                    .ignore(&["password", "new_password"])
                    .split("__"),
            )
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// `~/.config/carpool/config.toml` or the platform equivalent.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR)
            .join(CONFIG_FILE)
    }

    /// `~/.local/share/carpool` or the platform equivalent.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(APP_DIR)
    }

    /// Reject settings that cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigValidation`] for an empty database path or
    /// one that names a directory.
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.storage.database_path {
            if path.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "database_path must not be empty".to_string(),
                });
            }
            if path.is_dir() {
                return Err(Error::ConfigValidation {
                    message: format!("database_path {} is a directory", path.display()),
                });
            }
        }
        Ok(())
    }

    /// The roster database file.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        match &self.storage.database_path {
            Some(path) => path.clone(),
            None => Self::default_data_dir().join(ROSTER_DB_FILE),
        }
    }

    /// The configured sub-roster rule.
    #[must_use]
    pub fn sub_roster_rule(&self) -> SubRosterRule {
        self.roster.sub_roster_rule
    }
}
